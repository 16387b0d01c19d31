use std::path::PathBuf;

/// Why an input document could not be turned into a feed.
#[derive(Debug)]
pub enum Malformed {
    Json(serde_json::Error),
    NotText { item: usize, field: &'static str },
}

impl std::fmt::Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::Json(err) => write!(f, "invalid feed data: {err}"),
            Malformed::NotText { item, field } => {
                write!(f, "items[{item}].{field} must be a string")
            }
        }
    }
}

impl std::error::Error for Malformed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Malformed::Json(err) => Some(err),
            Malformed::NotText { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum FeedError {
    InputNotFound { path: PathBuf },
    InputRead { path: PathBuf, source: std::io::Error },
    InputMalformed { path: PathBuf, source: Malformed },
    OutputWrite { path: PathBuf, source: std::io::Error },
}

impl std::fmt::Display for FeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedError::InputNotFound { path } => {
                write!(f, "input not found: {}", path.display())
            }
            FeedError::InputRead { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            FeedError::InputMalformed { path, source } => {
                write!(f, "malformed input {}: {source}", path.display())
            }
            FeedError::OutputWrite { path, source } => {
                write!(f, "failed to write {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::InputNotFound { .. } => None,
            FeedError::InputRead { source, .. } => Some(source),
            FeedError::InputMalformed { source, .. } => Some(source),
            FeedError::OutputWrite { source, .. } => Some(source),
        }
    }
}
