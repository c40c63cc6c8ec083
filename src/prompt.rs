use std::io::{self, BufRead, Write};

/// Questions for whoever sits at the terminal
pub trait Prompt {
    /// `None` once input is closed
    fn line(&mut self, question: &str) -> io::Result<Option<String>>;

    /// Anything but `y` is a no
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.line(&format!("{question} (y/n): "))?;
        Ok(answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")))
    }

    fn pause(&mut self) -> io::Result<()> {
        self.line("\n  Press Enter...").map(|_| ())
    }
}

/// stdin/stdout
#[derive(Debug, Default)]
pub struct Terminal;

impl Prompt for Terminal {
    fn line(&mut self, question: &str) -> io::Result<Option<String>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "  {question}")?;
        stdout.flush()?;

        let mut buf = String::new();
        if io::stdin().lock().read_line(&mut buf)? == 0 {
            return Ok(None);
        }

        Ok(Some(buf.trim().to_string()))
    }
}
