//! Assistant that voices session events as terminal lines.

use std::{io::Write, time::Duration};

use abyssal_core::Assistant;
use tracing::warn;

/// Writes every message as a prefixed line; display durations are ignored.
#[derive(Debug)]
pub(crate) struct ConsoleAssistant<W> {
    out: W,
}

impl<W: Write> ConsoleAssistant<W> {
    /// Creates an assistant writing to `out`.
    pub(crate) fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Assistant for ConsoleAssistant<W> {
    fn say(&mut self, message: &str, _duration: Duration) {
        if let Err(error) = writeln!(self.out, "[assistant] {message}") {
            warn!(error = %error, "assistant_write_failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use abyssal_core::{Assistant, Hazard, DEFAULT_SAY_DURATION};

    use super::ConsoleAssistant;

    #[test]
    fn messages_are_prefixed_lines() {
        let mut buffer = Vec::new();
        {
            let mut assistant = ConsoleAssistant::new(&mut buffer);
            assistant.say("Surface in sight.", DEFAULT_SAY_DURATION);
            assistant.hazard_warning(&Hazard {
                kind: "brine_pool".to_owned(),
                severity: Some(4),
                notes: String::new(),
            });
        }

        let text = String::from_utf8(buffer).expect("utf8");
        assert_eq!(
            text,
            "[assistant] Surface in sight.\n[assistant] Warning: brine_pool (severity 4)\n"
        );
    }
}
