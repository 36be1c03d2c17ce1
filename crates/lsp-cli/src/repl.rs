//! The read-evaluate-print loop.

use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, Write};

pub const PROMPT: &str = "lsp> ";

/// A source of input lines.
pub trait LineReader {
    /// Block until a line is read. `None` means there is no more input.
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>>;

    fn add_history(&mut self, _line: &str) {}
}

impl<T: ?Sized> LineReader for &mut T
where
    T: LineReader,
{
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn add_history(&mut self, line: &str) {
        (**self).add_history(line)
    }
}

impl LineReader for DefaultEditor {
    fn read_line(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        match self.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) => {
                tracing::debug!("interrupted");
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                tracing::debug!("end of input");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(err) = self.add_history_entry(line) {
            tracing::warn!("failed to add history entry: {}", err);
        }
    }
}

pub struct Repl<R, W> {
    reader: R,
    out: W,
}

impl<R, W> Repl<R, W>
where
    R: LineReader,
    W: Write,
{
    pub fn new(reader: R, out: W) -> Self {
        Self { reader, out }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "Lsp version {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(self.out, "Ctrl+C to exit")?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Run until the reader runs out of lines.
    pub fn run(&mut self) -> anyhow::Result<()> {
        while let Some(line) = self.reader.read_line(PROMPT)? {
            self.reader.add_history(&line);
            self.respond(&line)?;
        }
        Ok(())
    }

    /// Evaluate one line and print the result or the parse failure.
    pub fn respond(&mut self, line: &str) -> io::Result<()> {
        match lsp::evaluate(line) {
            Ok(value) => writeln!(self.out, "{}", lsp::render(&value))?,
            Err(failure) => {
                tracing::debug!("parse failure: {:?}", failure);
                writeln!(self.out, "{}", failure)?;
            }
        }
        self.out.flush()
    }
}
