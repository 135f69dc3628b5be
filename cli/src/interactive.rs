use anyhow::{Context, Result};
use friends::response::{ENOUGH, NO_MORE_SOLUTIONS};
use friends::{Reply, SearchBudget, Session, Solutions};
use inquire::{Confirm, InquireError, Text};

use crate::error_formatter::format_error;

/// Reads statements until the user leaves with Esc or Ctrl-C.
///
/// Rules are believed silently. A query shows one solution at a time and asks whether
/// that is enough before looking for the next one.
pub fn run_repl(session: &mut Session) -> Result<()> {
    loop {
        let input = match Text::new(">")
            .with_help_message("Rule or query, Esc to quit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                return Ok(())
            }
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let text = input.trim();
        if text.is_empty() {
            continue;
        }

        match session.input(text) {
            Ok(Reply::Accepted) => {}
            Ok(Reply::Solutions(solutions)) => {
                let budget = SearchBudget::from_limits(session.limits());
                answer(solutions, budget)?;
            }
            Err(e) => eprintln!("{}", format_error(&e)),
        }
    }
}

fn answer(mut solutions: Solutions, mut budget: SearchBudget) -> Result<()> {
    loop {
        match solutions.next_within(&mut budget) {
            Ok(Some(solution)) => {
                println!("{}", solution.describe());
                let enough = Confirm::new("Is that enough?")
                    .with_default(true)
                    .prompt()
                    .context("Failed to read answer")?;
                if enough {
                    println!("{}", ENOUGH);
                    return Ok(());
                }
            }
            Ok(None) => {
                println!("{}", NO_MORE_SOLUTIONS);
                return Ok(());
            }
            Err(e) => {
                eprintln!("{}", format_error(&e));
                return Ok(());
            }
        }
    }
}
