//! Interaction surface: prompts for names, confirmations and selections.
//!
//! The lifecycle controller never reads the terminal directly; it asks a
//! [`Prompter`]. The CLI uses [`TerminalPrompter`] over stdin/stdout, tests
//! use a scripted one.

use crate::error::{BreakpointError, Result};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Source of user decisions.
pub trait Prompter {
    /// Ask for a line of text. `None` means the user cancelled (EOF or empty).
    fn input(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Ask the user to pick one of `options`. `None` means cancelled.
    fn select(&mut self, prompt: &str, options: &[String]) -> Result<Option<String>>;

    /// Present a generated document to the user.
    fn open_document(&mut self, path: &Path) -> Result<()>;
}

/// Line-oriented prompter over any reader/writer pair.
pub struct TerminalPrompter<R, W> {
    reader: R,
    writer: W,
    /// Print document contents in `open_document` (otherwise only the path).
    pub show_documents: bool,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stdout> {
    /// Prompter bound to the process stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            show_documents: true,
        }
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{} ", prompt).map_err(io_err)?;
        self.writer.flush().map_err(io_err)?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(io_err)?;
        if read == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(None)
        } else {
            Ok(Some(answer.to_string()))
        }
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn input(&mut self, prompt: &str) -> Result<Option<String>> {
        self.ask(&format!("{}:", prompt))
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = self.ask(&format!("{} [y/N]:", prompt))?;
        Ok(matches!(
            answer.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    fn select(&mut self, prompt: &str, options: &[String]) -> Result<Option<String>> {
        writeln!(self.writer, "{}", prompt).map_err(io_err)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "  {}) {}", i + 1, option).map_err(io_err)?;
        }

        let Some(answer) = self.ask("Select a number or name:")? else {
            return Ok(None);
        };

        if let Ok(index) = answer.parse::<usize>() {
            return Ok(index
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .cloned());
        }

        Ok(options.iter().find(|o| **o == answer).cloned())
    }

    fn open_document(&mut self, path: &Path) -> Result<()> {
        if !self.show_documents {
            return writeln!(self.writer, "{}", path.display()).map_err(io_err);
        }

        let content = fs::read_to_string(path).map_err(|e| {
            BreakpointError::IoError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        writeln!(self.writer, "{}", content).map_err(io_err)?;
        writeln!(self.writer, "Written to {}", path.display()).map_err(io_err)
    }
}

fn io_err(e: io::Error) -> BreakpointError {
    BreakpointError::IoError(format!("terminal I/O failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn input_trims_answer() {
        let mut p = prompter("  my-step  \n");
        assert_eq!(p.input("Step name").unwrap(), Some("my-step".to_string()));
        assert_eq!(String::from_utf8(p.writer).unwrap(), "Step name: ");
    }

    #[test]
    fn input_eof_and_blank_are_cancellation() {
        assert_eq!(prompter("").input("Name").unwrap(), None);
        assert_eq!(prompter("   \n").input("Name").unwrap(), None);
    }

    #[test]
    fn confirm_requires_explicit_yes() {
        assert!(prompter("y\n").confirm("Overwrite?").unwrap());
        assert!(prompter("YES\n").confirm("Overwrite?").unwrap());
        assert!(!prompter("n\n").confirm("Overwrite?").unwrap());
        assert!(!prompter("\n").confirm("Overwrite?").unwrap());
        assert!(!prompter("").confirm("Overwrite?").unwrap());
    }

    #[test]
    fn select_by_number_or_name() {
        let options = vec!["alpha".to_string(), "beta".to_string()];

        assert_eq!(
            prompter("2\n").select("Pick", &options).unwrap(),
            Some("beta".to_string())
        );
        assert_eq!(
            prompter("alpha\n").select("Pick", &options).unwrap(),
            Some("alpha".to_string())
        );
        assert_eq!(prompter("0\n").select("Pick", &options).unwrap(), None);
        assert_eq!(prompter("9\n").select("Pick", &options).unwrap(), None);
        assert_eq!(prompter("gamma\n").select("Pick", &options).unwrap(), None);
    }

    #[test]
    fn select_lists_options() {
        let options = vec!["alpha".to_string(), "beta".to_string()];
        let mut p = prompter("1\n");
        p.select("Pick a breakpoint", &options).unwrap();

        let shown = String::from_utf8(p.writer).unwrap();
        assert!(shown.contains("Pick a breakpoint"));
        assert!(shown.contains("1) alpha"));
        assert!(shown.contains("2) beta"));
    }

    #[test]
    fn open_document_prints_content() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("change-log.md");
        fs::write(&path, "# Log\n").unwrap();

        let mut p = prompter("");
        p.open_document(&path).unwrap();
        let shown = String::from_utf8(p.writer).unwrap();
        assert!(shown.contains("# Log"));
        assert!(shown.contains("Written to"));

        let mut quiet = prompter("");
        quiet.show_documents = false;
        quiet.open_document(&path).unwrap();
        let shown = String::from_utf8(quiet.writer).unwrap();
        assert_eq!(shown, format!("{}\n", path.display()));
    }
}
