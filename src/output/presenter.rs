use std::io::{self, Write};

use super::config::{OutputConfig, OutputFormat};
use super::types::Envelope;

pub trait Presenter: Send + Sync {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()>;
}

pub struct JsonPresenter { pub pretty: bool }
impl Presenter for JsonPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }
}

pub struct TextPresenter { pub pretty: bool }
impl Presenter for TextPresenter {
    fn emit(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        writeln!(w, "Result: {}", env.op)?;
        if let Some(obj) = env.result.as_object() {
            for (k, v) in obj {
                writeln!(w, "  {}: {}", k, v)?;
            }
        } else if self.pretty {
            serde_json::to_writer_pretty(&mut *w, &env.result).map_err(to_io)?;
            writeln!(w)?;
        }
        if let Some(ms) = env.meta.as_ref().and_then(|m| m.duration_ms) {
            writeln!(w, "  duration_ms: {}", ms)?;
        }
        Ok(())
    }
}

/// Writes report envelopes to stderr.
pub struct Emitter {
    presenter: Box<dyn Presenter>,
}

impl Emitter {
    pub fn from_env(cfg: OutputConfig) -> Self {
        let presenter: Box<dyn Presenter> = match cfg.format {
            OutputFormat::Json => Box::new(JsonPresenter { pretty: cfg.pretty }),
            OutputFormat::Text => Box::new(TextPresenter { pretty: cfg.pretty }),
        };
        Emitter { presenter }
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut err = io::stderr();
        self.emit_to(env, &mut err)?;
        err.flush()
    }

    pub fn emit_to(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        self.presenter.emit(env, w)
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope() -> Envelope {
        Envelope::result("pack", &json!({"documents": 2, "emitted": 5}), None).unwrap()
    }

    #[test]
    fn json_presenter_writes_one_line() {
        let mut buf = Vec::new();
        let e = Emitter::from_env(OutputConfig { format: OutputFormat::Json, pretty: false });
        e.emit_to(&envelope(), &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.lines().count(), 1);
        assert!(s.contains("\"emitted\":5"));
    }

    #[test]
    fn text_presenter_lists_fields() {
        let mut buf = Vec::new();
        let e = Emitter::from_env(OutputConfig { format: OutputFormat::Text, pretty: false });
        e.emit_to(&envelope(), &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("Result: pack\n"));
        assert!(s.contains("  documents: 2\n"));
    }
}
