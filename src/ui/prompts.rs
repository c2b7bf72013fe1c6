//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input must either have defaults or fail
//! with a clear error message.
//!
//! A [`Prompter`] reads answers line by line from any `BufRead` and writes
//! questions to any `Write`, so prompt flows can be driven from tests.
//! End of input while a question is pending counts as cancellation.

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::IoError(e.to_string())
    }
}

/// Whether stdin is attached to a terminal.
pub fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Line-oriented prompter.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    interactive: bool,
}

impl Prompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter over the process's stdin, asking on stderr.
    pub fn stdio(interactive: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), interactive)
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Prompt for text input.
    ///
    /// An empty answer takes `default` when one is given.
    pub fn input(&mut self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        self.input_with(message, default, |_| Ok(()))
    }

    /// Prompt for text input, asking again until `validate` accepts the answer.
    pub fn input_with<F>(
        &mut self,
        message: &str,
        default: Option<&str>,
        validate: F,
    ) -> Result<String, PromptError>
    where
        F: Fn(&str) -> Result<(), String>,
    {
        self.ensure_interactive()?;

        loop {
            match default {
                Some(d) if !d.is_empty() => write!(self.output, "? {} ({}) ", message, d)?,
                _ => write!(self.output, "? {} ", message)?,
            }
            self.output.flush()?;

            let line = self.read_line()?;
            let answer = match default {
                Some(d) if line.is_empty() => d.to_string(),
                _ => line,
            };

            match validate(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => writeln!(self.output, "  {}", reason)?,
            }
        }
    }

    /// Prompt for confirmation (yes/no).
    ///
    /// Returns `Ok(true)` if the user confirms, `Ok(false)` if they decline.
    pub fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        self.ensure_interactive()?;

        let hint = if default { "Y/n" } else { "y/N" };
        loop {
            write!(self.output, "? {} ({}) ", message, hint)?;
            self.output.flush()?;

            match self.read_line()?.to_ascii_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.output, "  Please answer y or n")?,
            }
        }
    }

    fn ensure_interactive(&self) -> Result<(), PromptError> {
        if self.interactive {
            Ok(())
        } else {
            Err(PromptError::NotInteractive)
        }
    }

    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Cancelled);
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompter(input: &str) -> Prompter<&[u8], Vec<u8>> {
        Prompter::new(input.as_bytes(), Vec::new(), true)
    }

    #[test]
    fn input_takes_default_on_empty_answer() {
        let mut p = prompter("\n");
        assert_eq!(p.input("Repository name?", Some("site")).unwrap(), "site");
        assert_eq!(String::from_utf8(p.output).unwrap(), "? Repository name? (site) ");
    }

    #[test]
    fn input_reasks_until_valid() {
        let mut p = prompter("example.com\nsite.webflow.io\n");
        let answer = p
            .input_with("Domain?", None, |s| {
                if s.contains(".webflow.io") {
                    Ok(())
                } else {
                    Err("Domain should end with .webflow.io".into())
                }
            })
            .unwrap();

        assert_eq!(answer, "site.webflow.io");
        assert!(String::from_utf8(p.output)
            .unwrap()
            .contains("Domain should end with .webflow.io"));
    }

    #[test]
    fn confirm_parses_answers() {
        assert!(prompter("\n").confirm("Continue?", true).unwrap());
        assert!(!prompter("\n").confirm("Continue?", false).unwrap());
        assert!(prompter("YES\n").confirm("Continue?", false).unwrap());
        assert!(!prompter("maybe\nn\n").confirm("Continue?", true).unwrap());
    }

    #[test]
    fn end_of_input_cancels() {
        let err = prompter("").input("Name?", None).unwrap_err();
        assert!(matches!(err, PromptError::Cancelled));
    }

    #[test]
    fn non_interactive_refuses() {
        let mut p = Prompter::new(&b"answer\n"[..], Vec::new(), false);
        assert!(matches!(p.input("Name?", None), Err(PromptError::NotInteractive)));
        assert!(matches!(p.confirm("Ok?", true), Err(PromptError::NotInteractive)));
    }
}
