use std::io::{self, BufRead, Write};

use log::warn;
use mafia_engine::{Clipboard, Confirm, Notify};

const CLIP_START: &str = "----- copied prompt -----";
const CLIP_END: &str = "-------------------------";

/// Line-based stand-in for the dialog boxes and the clipboard.
///
/// There is no system clipboard here: copied text is printed between marker
/// lines and kept as `clipboard()` until the next copy.
pub struct TerminalHost<R, W> {
    input: R,
    output: W,
    clipboard: Option<String>,
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalHost {
            input,
            output,
            clipboard: None,
        }
    }

    /// `None` at end of input.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    pub fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()
    }

    pub fn prompt(&mut self, marker: &str) -> io::Result<()> {
        write!(self.output, "{marker}")?;
        self.output.flush()
    }

    pub fn clipboard(&self) -> Option<&str> {
        self.clipboard.as_deref()
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalHost<R, W> {
    fn confirm(&mut self, title: &str, message: &str) -> bool {
        if let Err(e) = self.prompt(&format!("{title}: {message} [y/N] ")) {
            warn!("Failed to ask for confirmation: {e}");
            return false;
        }
        match self.read_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(e) => {
                warn!("Failed to read confirmation: {e}");
                false
            }
        }
    }
}

impl<R: BufRead, W: Write> Notify for TerminalHost<R, W> {
    fn notify(&mut self, title: &str, message: &str) {
        if let Err(e) = self.write_line(&format!("[{title}] {message}")) {
            warn!("Failed to show notification: {e}");
        }
    }
}

impl<R: BufRead, W: Write> Clipboard for TerminalHost<R, W> {
    fn copy(&mut self, text: &str) {
        let block = format!("{CLIP_START}\n{text}\n{CLIP_END}");
        if let Err(e) = self.write_line(&block) {
            warn!("Failed to print copied text: {e}");
        }
        self.clipboard = Some(text.to_string());
    }
}
