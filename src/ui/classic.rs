use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use reedline::{
    FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Reedline, Signal,
};
use std::borrow::Cow;
use tracing::{info, warn};

use super::terminal_dialogs::LineDialogs;
use crate::events::UiEvent;
use crate::list_manager::ListManager;
use crate::storage::KeyValueStore;
use crate::utils::app_paths::AppPaths;
use crate::view_model::{ListModel, SubmitMode};

/// A parsed line-mode command. Row numbers are 1-based as printed by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCommand {
    Add(String),
    Edit(usize),
    Remove(usize),
    Clear,
    Filter(String),
    List,
    Help,
    Quit,
}

impl LineCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "add" | "a" => Ok(LineCommand::Add(rest.to_string())),
            "edit" | "e" => Self::parse_row(rest).map(LineCommand::Edit),
            "rm" | "remove" | "d" => Self::parse_row(rest).map(LineCommand::Remove),
            "clear" => Ok(LineCommand::Clear),
            "filter" | "f" => Ok(LineCommand::Filter(rest.to_string())),
            "list" | "ls" | "" => Ok(LineCommand::List),
            "help" | "?" => Ok(LineCommand::Help),
            "quit" | "exit" | "q" => Ok(LineCommand::Quit),
            other => Err(format!("Unknown command '{}', try 'help'", other)),
        }
    }

    fn parse_row(arg: &str) -> Result<usize, String> {
        match arg.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n - 1),
            _ => Err(format!("Expected an item number, got '{}'", arg)),
        }
    }
}

struct ListPrompt {
    mode: SubmitMode,
}

impl Prompt for ListPrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        match self.mode {
            SubmitMode::Add => Cow::Borrowed("list"),
            SubmitMode::Update => Cow::Borrowed("list (editing)"),
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("> ")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

fn print_help() {
    println!("{}", "Shopping List".blue().bold());
    println!();
    println!("{}", "Commands:".yellow());
    println!("  {}   - Add an item (updates it while editing)", "add <text>".green());
    println!("  {}     - Edit item n; the next add replaces it", "edit <n>".green());
    println!("  {}       - Remove item n", "rm <n>".green());
    println!("  {}        - Remove every item", "clear".green());
    println!("  {} - Show only items containing text", "filter [text]".green());
    println!("  {}         - Show the list", "list".green());
    println!("  {}         - Exit", "quit".green());
    println!();
}

/// Render the visible rows as a table, numbered by their full-list position
pub fn render_table(model: &ListModel) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Item"]);

    for (index, row) in model.visible_rows() {
        let label = if row.editing {
            format!("{} (editing)", row.label)
        } else {
            row.label.clone()
        };
        table.add_row(vec![Cell::new(index + 1), Cell::new(label)]);
    }

    table.to_string()
}

fn print_list(model: &ListModel) {
    if model.is_empty() {
        println!("{}", "No items yet".dark_grey());
        return;
    }

    println!("{}", render_table(model));
    if !model.filter().is_empty() {
        println!(
            "{}",
            format!(
                "Showing {} of {} (filter '{}')",
                model.visible_count(),
                model.len(),
                model.filter()
            )
            .dark_grey()
        );
    }
}

fn run_command<S: KeyValueStore>(
    manager: &mut ListManager<S, LineDialogs>,
    command: LineCommand,
) -> bool {
    // Alerts already reached the user through LineDialogs
    let result = match command {
        LineCommand::Add(text) => manager
            .dispatch(UiEvent::InputChanged(text))
            .and_then(|_| manager.dispatch(UiEvent::Submit)),
        LineCommand::Edit(index) => manager.dispatch(UiEvent::LabelClicked { index }),
        LineCommand::Remove(index) => manager.dispatch(UiEvent::DeleteClicked { index }),
        LineCommand::Clear => manager.dispatch(UiEvent::ClearAllClicked),
        LineCommand::Filter(text) => manager.dispatch(UiEvent::FilterChanged(text)),
        LineCommand::List => Ok(()),
        LineCommand::Help => {
            print_help();
            return true;
        }
        LineCommand::Quit => return false,
    };

    if result.is_ok() {
        print_list(manager.model());
    }
    true
}

/// Line-oriented front-end on top of reedline
pub fn run_classic<S: KeyValueStore>(mut manager: ListManager<S, LineDialogs>) -> Result<()> {
    print_help();

    let mut line_editor = Reedline::create();
    match AppPaths::history_file() {
        Ok(path) => match FileBackedHistory::with_file(100, path) {
            Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
            Err(e) => warn!(target: "ui", "Command history disabled: {}", e),
        },
        Err(e) => warn!(target: "ui", "Command history disabled: {}", e),
    }

    let _ = manager.dispatch(UiEvent::Load);
    print_list(manager.model());

    loop {
        let prompt = ListPrompt {
            mode: manager.model().submit_mode(),
        };
        match line_editor.read_line(&prompt)? {
            Signal::Success(buffer) => match LineCommand::parse(&buffer) {
                Ok(command) => {
                    if !run_command(&mut manager, command) {
                        break;
                    }
                }
                Err(message) => eprintln!("{}", message.red()),
            },
            Signal::CtrlD | Signal::CtrlC => break,
        }
    }

    info!(target: "ui", "Line mode finished with {} item(s)", manager.model().len());
    println!("\nGoodbye!");
    Ok(())
}
