//! Session command parsing

use std::path::PathBuf;

use crate::error::{ResilienceError, ResilienceResult};
use crate::models::{Money, TransactionKind};
use crate::services::{SortKey, SortOrder};

use super::View;

const RECURRING_FLAG: &str = "--recurring";

/// One line of session input, parsed
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Record {
        kind: TransactionKind,
        amount: Money,
        category: String,
        description: String,
        is_recurring: bool,
    },
    Debt(Money),
    Savings(Money),
    List {
        key: Option<SortKey>,
        order: Option<SortOrder>,
    },
    Score,
    Dashboard,
    Advice,
    Scan(String),
    View(View),
    Export(PathBuf),
    Help,
    Quit,
}

impl Command {
    /// Whether the command changes the financial state
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Record { .. } | Self::Debt(_) | Self::Savings(_))
    }
}

/// Parse a command line; `Ok(None)` for a blank line
pub fn parse_command(line: &str) -> ResilienceResult<Option<Command>> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match head.to_lowercase().as_str() {
        "income" => parse_record(TransactionKind::Income, args)?,
        "expense" => parse_record(TransactionKind::Expense, args)?,
        "debt" => Command::Debt(parse_single_amount("debt", args)?),
        "savings" => Command::Savings(parse_single_amount("savings", args)?),
        "list" | "ls" => parse_list(args)?,
        "score" => Command::Score,
        "dashboard" => Command::Dashboard,
        "advice" | "coach" => Command::Advice,
        "scan" => Command::Scan(args.join(" ")),
        "view" => match args {
            [name] => Command::View(View::parse(name).ok_or_else(|| usage("view dashboard|scanner"))?),
            _ => return Err(usage("view dashboard|scanner")),
        },
        "export" => match args {
            [path] => Command::Export(PathBuf::from(path)),
            _ => return Err(usage("export <path>")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(ResilienceError::Validation(format!(
                "Unknown command '{}'. Type 'help' for a list of commands.",
                other
            )))
        }
    };

    Ok(Some(command))
}

/// Parse a line typed in the scanner view; `None` for a blank line
///
/// Only a bare navigation command (`view <name>`, `help`, `quit`) is acted
/// on. Everything else, including text that starts with a command word or
/// has stray quotes, is the message to scan and is passed through as typed.
pub fn parse_scanner_line(line: &str) -> Option<Command> {
    let lowered: Vec<String> = line.split_whitespace().map(str::to_lowercase).collect();
    let words: Vec<&str> = lowered.iter().map(String::as_str).collect();

    let navigation = match words.as_slice() {
        [] => return None,
        ["view", name] => View::parse(name).map(Command::View),
        ["help" | "?"] => Some(Command::Help),
        ["quit" | "exit" | "q"] => Some(Command::Quit),
        _ => None,
    };
    Some(navigation.unwrap_or_else(|| Command::Scan(line.trim().to_string())))
}

fn usage(text: &str) -> ResilienceError {
    ResilienceError::Validation(format!("Usage: {}", text))
}

fn parse_amount(raw: &str) -> ResilienceResult<Money> {
    Money::parse(raw).map_err(|e| ResilienceError::Validation(e.to_string()))
}

fn parse_single_amount(name: &str, args: &[String]) -> ResilienceResult<Money> {
    match args {
        [amount] => parse_amount(amount),
        _ => Err(usage(&format!("{} <amount>", name))),
    }
}

fn parse_record(kind: TransactionKind, args: &[String]) -> ResilienceResult<Command> {
    let is_recurring = args.iter().any(|a| a == RECURRING_FLAG);
    let rest: Vec<&String> = args.iter().filter(|a| *a != RECURRING_FLAG).collect();

    let [amount, category, description @ ..] = rest.as_slice() else {
        return Err(usage(&format!(
            "{} <amount> <category> <description...> [{}]",
            kind, RECURRING_FLAG
        )));
    };

    Ok(Command::Record {
        kind,
        amount: parse_amount(amount)?,
        category: category.to_string(),
        description: description
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        is_recurring,
    })
}

fn parse_list(args: &[String]) -> ResilienceResult<Command> {
    let mut key = None;
    let mut order = None;
    for arg in args {
        if let Some(k) = SortKey::parse(arg) {
            key = Some(k);
        } else if let Some(o) = SortOrder::parse(arg) {
            order = Some(o);
        } else {
            return Err(usage("list [date|amount] [asc|desc]"));
        }
    }
    Ok(Command::List { key, order })
}

/// Split a line on whitespace, keeping double-quoted runs together
pub fn tokenize(line: &str) -> ResilienceResult<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    tokens.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(ResilienceError::Validation("Unclosed quote".into()));
    }
    if has_token {
        tokens.push(current);
    }
    Ok(tokens)
}
