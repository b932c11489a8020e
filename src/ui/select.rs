use std::cell::RefCell;
use std::io::{self, BufRead, Stdin, StdinLock, Stderr, Write};

use anyhow::{Context, Result};

/// Pick one entry from a list.
pub trait Selector {
    /// Returns the chosen index, or `None` if the user backed out.
    fn select_one(&self, title: &str, options: &[String]) -> Result<Option<usize>>;
}

/// Numbered prompt on a line-based input.
///
/// ```text
/// Select toolchain:
///   1) GCC 13.2.0 x86_64-linux-gnu
///   2) Clang 17.0.3 x86_64-pc-linux-gnu
///   0) Exit
/// >
/// ```
///
/// Invalid answers re-prompt; `0`, `q` or end of input cancel.
pub struct TerminalSelector<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl TerminalSelector<StdinLock<'static>, Stderr> {
    /// Prompt on stderr and read from stdin.
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        TerminalSelector::new(stdin.lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalSelector<R, W> {
    pub fn new(input: R, output: W) -> Self {
        TerminalSelector {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    /// Consume the selector and return the output (for inspecting prompts).
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }
}

impl<R: BufRead, W: Write> Selector for TerminalSelector<R, W> {
    fn select_one(&self, title: &str, options: &[String]) -> Result<Option<usize>> {
        if options.is_empty() {
            return Ok(None);
        }

        let mut out = self.output.borrow_mut();
        let mut input = self.input.borrow_mut();

        writeln!(out, "{}:", title)?;
        for (i, opt) in options.iter().enumerate() {
            writeln!(out, "  {}) {}", i + 1, opt)?;
        }
        writeln!(out, "  0) Exit")?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            let read = input
                .read_line(&mut line)
                .context("failed to read selection")?;
            if read == 0 {
                return Ok(None);
            }

            let answer = line.trim();
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(0) => return Ok(None),
                Ok(n) if n <= options.len() => return Ok(Some(n - 1)),
                _ => writeln!(out, "enter a number between 0 and {}", options.len())?,
            }
        }
    }
}
