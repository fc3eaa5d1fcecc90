//! Onboarding wizard
//!
//! Asks which income channels the user relies on. At least one must be
//! chosen before the dashboard opens.

use std::collections::BTreeSet;
use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::{ResilienceError, ResilienceResult};
use crate::models::{IncomeSource, IncomeSourceType};

/// Interactive income-source selection over any line-based input
pub struct OnboardingWizard<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> OnboardingWizard<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run until a non-empty selection is made
    ///
    /// Returns the chosen sources in catalog order. End of input before that
    /// point cancels onboarding.
    pub fn run(&mut self) -> ResilienceResult<Vec<IncomeSource>> {
        writeln!(self.output)?;
        writeln!(self.output, "Welcome! Let's get to know your finances.")?;
        writeln!(self.output, "How do you earn your money? Select all that apply.")?;
        writeln!(self.output)?;
        for (i, source) in IncomeSourceType::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, source.display_name())?;
        }
        writeln!(self.output)?;

        loop {
            let line = prompt_string(
                &mut self.input,
                &mut self.output,
                "Income sources (e.g. 1,3 or \"side hustle\"): ",
            )?
            .ok_or_else(|| ResilienceError::Cancelled("onboarding ended before a selection".into()))?;

            match parse_selection(&line) {
                Ok(selected) if selected.is_empty() => {
                    writeln!(self.output, "Please select at least one income source.")?;
                }
                Ok(selected) => {
                    let names: Vec<_> = selected.iter().map(|t| t.display_name()).collect();
                    writeln!(self.output, "Selected: {}", names.join(", "))?;
                    debug!(count = selected.len(), "onboarding complete");
                    return Ok(selected.into_iter().map(IncomeSource::new).collect());
                }
                Err(token) => {
                    writeln!(
                        self.output,
                        "Unknown income source '{}'. Use 1-{} or a name from the list.",
                        token,
                        IncomeSourceType::ALL.len()
                    )?;
                }
            }
        }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

/// Parse a selection line into income source types, in catalog order
///
/// Entries are separated by commas or whitespace and may be list numbers or
/// names. Naming the same source twice deselects it again. On failure the
/// unrecognised entry is returned.
pub fn parse_selection(line: &str) -> Result<Vec<IncomeSourceType>, String> {
    let mut selected = BTreeSet::new();

    for piece in line.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        // multi-word names like "Social Grant" are tried whole first
        let tokens: Vec<IncomeSourceType> = match resolve_token(piece) {
            Some(source) => vec![source],
            None => piece
                .split_whitespace()
                .map(|token| resolve_token(token).ok_or_else(|| token.to_string()))
                .collect::<Result<_, _>>()?,
        };

        for source in tokens {
            if !selected.remove(&source) {
                selected.insert(source);
            }
        }
    }

    // enum order is catalog order
    Ok(selected.into_iter().collect())
}

fn resolve_token(token: &str) -> Option<IncomeSourceType> {
    if let Ok(n) = token.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| IncomeSourceType::ALL.get(i).copied());
    }
    IncomeSourceType::parse(token)
}

/// Prompt for a line of input; `None` at end of input
pub(crate) fn prompt_string<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> ResilienceResult<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
