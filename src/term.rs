//! Console output and the interactive capabilities (confirmation, browser).

use crossterm::style::Stylize;
use std::io::{self, Write};

pub fn info(msg: &str) {
    println!("{msg}");
}

pub fn success(msg: &str) {
    println!("{}", msg.green());
}

pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

pub trait Prompt {
    /// Show `question` and return the raw answer.
    fn ask(&self, question: &str) -> io::Result<String>;
}

/// Reads answers from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn ask(&self, question: &str) -> io::Result<String> {
        print!("{question}");
        io::stdout().flush()?;
        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line)
    }
}

/// True only for a case-insensitive `y`. Read errors and EOF count as no.
pub fn confirm(prompt: &dyn Prompt, question: &str) -> bool {
    match prompt.ask(question) {
        Ok(answer) => answer.trim().eq_ignore_ascii_case("y"),
        Err(e) => {
            tracing::debug!(error = %e, "no answer, treating as no");
            false
        }
    }
}

pub trait Browser {
    fn open(&self, url: &str) -> io::Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Browser for SystemBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}
