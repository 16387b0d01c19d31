pub mod config;
pub mod types;

use std::io::{self, Write};

use self::config::{OutputConfig, OutputFormat};
use self::types::Envelope;

pub trait Presenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

// One human line per envelope; `pretty` appends the payload as JSON.
pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        match (env.apply, env.output_path()) {
            (true, Some(path)) => writeln!(w, "Wrote {path}")?,
            (false, Some(path)) => writeln!(w, "Would write {path} (dry run)")?,
            (true, None) => writeln!(w, "Result: {}", env.op)?,
            (false, None) => writeln!(w, "Plan: {}", env.op)?,
        }
        if self.pretty {
            let payload = if env.apply { &env.result } else { &env.plan };
            if let Some(v) = payload { serde_json::to_writer_pretty(&mut *w, v).map_err(to_io)?; writeln!(w)?; }
        }
        Ok(())
    }
}

pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn from_config(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout();
        self.presenter.emit(env, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }
