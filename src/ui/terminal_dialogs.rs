use crossterm::{
    cursor::MoveTo,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, Clear, ClearType},
};
use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::dialogs::Dialogs;

/// `y` or Enter accepts a confirmation; every other key declines it
pub fn is_affirmative(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter
    )
}

/// Dialogs drawn over the bottom line of a full-screen terminal
///
/// The prompt is written straight to the terminal, outside ratatui's frame
/// buffer, so the caller must force a full redraw afterwards (see
/// [`TerminalDialogs::take_redraw`]).
#[derive(Debug, Default)]
pub struct TerminalDialogs {
    needs_redraw: bool,
}

impl TerminalDialogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a dialog was shown since the last call
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn show_prompt(&mut self, text: &str) -> io::Result<()> {
        self.needs_redraw = true;
        let (_, rows) = terminal::size()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            MoveTo(0, rows.saturating_sub(1)),
            Clear(ClearType::CurrentLine),
            SetAttribute(Attribute::Reverse),
            Print(text),
            SetAttribute(Attribute::Reset)
        )
    }

    fn read_key_code() -> io::Result<KeyCode> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(key.code);
                }
            }
        }
    }

    fn ask(&mut self, message: &str) -> io::Result<bool> {
        self.show_prompt(&format!(" {} [Y/n] ", message))?;
        let answer = Self::read_key_code()?;
        Ok(is_affirmative(answer))
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.show_prompt(&format!(" {} (press any key) ", message))?;
        Self::read_key_code()?;
        Ok(())
    }
}

impl Dialogs for TerminalDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        self.ask(message).unwrap_or_else(|e| {
            warn!(target: "ui", "Confirmation prompt failed: {}", e);
            false
        })
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = self.notify(message) {
            warn!(target: "ui", "Could not show alert '{}': {}", message, e);
        }
    }
}

/// Dialogs for line mode: plain prompts on stdout, answers from stdin
#[derive(Debug, Default)]
pub struct LineDialogs;

impl Dialogs for LineDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N]: ", message);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
            Err(e) => {
                warn!(target: "ui", "Could not read confirmation: {}", e);
                false
            }
        }
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}
