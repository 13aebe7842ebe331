// SPDX-License-Identifier: AGPL-3.0
// Deckhand Console - Command parsing

use deckhand_core::{AppError, ChecklistStatus, SwipeAction};

/// A line typed by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Back,
    Documents,
    Lists,

    // Pre-departure documents
    Swipe { id: String, action: SwipeAction },
    Confirm,
    Decline,

    // Checklist overview (rows are 1-based)
    New(String),
    Delete(usize),
    Complete(usize),
    Reopen(usize),
    SetStatus(usize, ChecklistStatus),

    // Item editor (items are 1-based, draft order)
    Add(String),
    Toggle(usize),
    Remove(usize),
    Primary,
}

pub const HELP: &str = "\
Screens:   docs | lists | back | quit
Documents: mark <id> | skip <id> | uncheck <id> | submit <id> | yes | no
Lists:     new <title> | delete <n> | complete <n> | reopen <n> | status <n> <status>
Editor:    add <text> | check <n> | rm <n> | save | edit | done";

fn invalid(message: impl Into<String>) -> AppError {
    AppError::InvalidInput(message.into())
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str, AppError> {
    if rest.is_empty() {
        Err(invalid(format!("{} needs an argument", verb)))
    } else {
        Ok(rest)
    }
}

fn position(verb: &str, rest: &str) -> Result<usize, AppError> {
    match required(verb, rest)?.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(invalid(format!("{} expects a positive number, got {:?}", verb, rest))),
    }
}

fn swipe(verb: &str, rest: &str, action: SwipeAction) -> Result<Command, AppError> {
    Ok(Command::Swipe {
        id: required(verb, rest)?.to_string(),
        action,
    })
}

fn status(rest: &str) -> Result<Command, AppError> {
    let (n, name) = required("status", rest)?
        .split_once(char::is_whitespace)
        .ok_or_else(|| invalid("status needs a row and a status"))?;
    Ok(Command::SetStatus(position("status", n)?, name.trim().parse()?))
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, AppError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        "back" => Ok(Command::Back),
        "docs" => Ok(Command::Documents),
        "lists" => Ok(Command::Lists),

        "mark" => swipe("mark", rest, SwipeAction::MarkDone),
        "skip" => swipe("skip", rest, SwipeAction::Skip),
        "uncheck" => swipe("uncheck", rest, SwipeAction::RevertToPending),
        "submit" => swipe("submit", rest, SwipeAction::ConfirmSubmission),
        "yes" => Ok(Command::Confirm),
        "no" => Ok(Command::Decline),

        // The raw remainder is kept; trimming is the screen's job
        "new" => Ok(Command::New(rest.to_string())),
        "delete" => position("delete", rest).map(Command::Delete),
        "complete" => position("complete", rest).map(Command::Complete),
        "reopen" => position("reopen", rest).map(Command::Reopen),
        "status" => status(rest),

        "add" => Ok(Command::Add(rest.to_string())),
        "check" => position("check", rest).map(Command::Toggle),
        "rm" => position("rm", rest).map(Command::Remove),
        "save" | "edit" | "done" => Ok(Command::Primary),

        "" => Err(invalid("empty command")),
        other => Err(invalid(format!("unknown command: {}", other))),
    }
}
