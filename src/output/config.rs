#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl OutputConfig {
    pub fn from_flags(json: bool, pretty: bool) -> Self {
        let format = if json { OutputFormat::Json } else { OutputFormat::Text };
        OutputConfig { format, pretty }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { format: OutputFormat::Text, pretty: false }
    }
}
