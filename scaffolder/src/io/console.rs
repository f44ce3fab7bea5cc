//! Line-oriented console used for the interactive prompts.
//!
//! The [`Console`] trait keeps the gate and session testable: production code
//! talks to stdin/stdout, tests feed scripted answers and inspect the
//! transcript.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

pub trait Console {
    /// Show `prompt` (no trailing newline) and read one line of input.
    ///
    /// Returns `None` at end of input. The line terminator is stripped.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Print one line of output.
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Console backed by the process's stdin and stdout.
#[derive(Debug)]
pub struct StdConsole {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdConsole {
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        let mut out = self.stdout.lock();
        out.write_all(prompt.as_bytes()).context("write prompt")?;
        out.flush().context("flush stdout")?;
        drop(out);

        let mut line = String::new();
        let read = self
            .stdin
            .lock()
            .read_line(&mut line)
            .context("read stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(&line).to_string()))
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.stdout.lock(), "{message}").context("write stdout")
    }
}

/// Remove one trailing `\n` or `\r\n`, leaving all other whitespace intact.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
