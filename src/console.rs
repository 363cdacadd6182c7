//! Line-oriented prompt I/O.
//!
//! [`Console`] wraps any buffered reader and writer so the interactive flow
//! runs against stdin/stdout in the binary and against in-memory buffers in
//! tests.

use std::io::{BufRead, Write};

use anyhow::{Result, bail};
use tracing::trace;

/// Width of the dashed line printed between sections.
pub const SEPARATOR_WIDTH: usize = 40;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `prompt` (without a newline) and reads one line of input.
    ///
    /// The trailing line terminator is stripped; other whitespace is kept.
    ///
    /// # Errors
    ///
    /// Fails when the input is exhausted or cannot be read.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("unexpected end of input while waiting for an answer");
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        trace!(prompt, answer = %answer, "Read answer");
        Ok(answer)
    }

    /// Like [`Console::ask`], lower-casing the answer.
    pub fn ask_lower(&mut self, prompt: &str) -> Result<String> {
        Ok(self.ask(prompt)?.to_lowercase())
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn separator(&mut self) -> Result<()> {
        writeln!(self.output, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        Ok(())
    }

    /// Direct access to the output stream for multi-line reports.
    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_strips_line_ending_and_echoes_prompt() {
        let mut c = console("Chicago\r\nnext\n");
        assert_eq!(c.ask("City? ").unwrap(), "Chicago");
        assert_eq!(c.ask("Again? ").unwrap(), "next");
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out, "City? Again? ");
    }

    #[test]
    fn test_ask_lower() {
        let mut c = console("New York City\n");
        assert_eq!(c.ask_lower("> ").unwrap(), "new york city");
    }

    #[test]
    fn test_empty_line_is_an_answer() {
        let mut c = console("\n");
        assert_eq!(c.ask("> ").unwrap(), "");
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut c = console("");
        let err = c.ask("> ").unwrap_err();
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut c = console("yes");
        assert_eq!(c.ask("> ").unwrap(), "yes");
    }

    #[test]
    fn test_separator() {
        let mut c = console("");
        c.separator().unwrap();
        let out = String::from_utf8(c.into_output()).unwrap();
        assert_eq!(out, format!("{}\n", "-".repeat(40)));
    }
}
