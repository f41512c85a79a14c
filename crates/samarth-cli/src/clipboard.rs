//! System clipboard access through the platform's copy utility.

use std::io::Write;
use std::process::{Command, Stdio};

use samarth_core::Clipboard;

/// Copy utilities tried in order; the first one that runs wins.
const COPY_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

pub(crate) struct SystemClipboard;

impl SystemClipboard {
    /// Feed `text` to the utility's stdin. The child is always waited on,
    /// even when the write fails.
    fn pipe_into(mut command: Command, text: &str) -> std::io::Result<()> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let written = child
            .stdin
            .take()
            .map_or(Ok(()), |mut stdin| stdin.write_all(text.as_bytes()));

        let status = child.wait()?;
        written?;
        if status.success() {
            Ok(())
        } else {
            Err(std::io::Error::other(format!(
                "{} exited with {status}",
                command.get_program().to_string_lossy()
            )))
        }
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> std::io::Result<()> {
        let mut last_error =
            std::io::Error::new(std::io::ErrorKind::NotFound, "no clipboard utility found");

        for (program, args) in COPY_COMMANDS {
            let mut command = Command::new(program);
            command.args(*args);
            match Self::pipe_into(command, text) {
                Ok(()) => {
                    tracing::debug!(program, "copied to clipboard");
                    return Ok(());
                }
                Err(e) => {
                    tracing::debug!(program, error = %e, "clipboard utility unavailable");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
