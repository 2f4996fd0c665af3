//! Interactive filter menu shown after discovery.

use anyhow::Result;
use colored::Colorize;
use std::io::{BufRead, Write};

use super::render::write_outcome;
use crate::filter::{FilterEngine, FilterError};

const MENU: &str = "\nFilter options:
  1) Filter by keyword
  2) Filter by minimum rating
  3) Reset filters
  4) Exit";

/// Read one trimmed line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<Option<String>> {
    write!(out, "{message}")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Split a keyword answer on commas and whitespace
fn parse_keywords(answer: &str) -> Vec<String> {
    answer
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Run the menu until the user exits or input ends.
///
/// Unrecognised choices and unparsable ratings re-prompt without touching
/// the filter state.
pub fn run<R: BufRead, W: Write>(engine: &mut FilterEngine<'_>, input: &mut R, out: &mut W) -> Result<()> {
    while !engine.is_closed() {
        writeln!(out, "{MENU}")?;
        let Some(choice) = prompt(input, out, "Choose an option: ")? else {
            engine.exit()?;
            break;
        };

        let outcome = match choice.as_str() {
            "1" => {
                let Some(answer) = prompt(input, out, "Keywords (comma separated): ")? else {
                    continue;
                };
                engine.apply_keywords(parse_keywords(&answer))?
            }
            "2" => {
                let Some(answer) = prompt(input, out, "Minimum rating (0-5): ")? else {
                    continue;
                };
                let Ok(value) = answer.parse::<f64>() else {
                    writeln!(out, "{} '{answer}' is not a number.", "!".yellow())?;
                    continue;
                };
                match engine.apply_threshold(value) {
                    Ok(outcome) => outcome,
                    Err(e @ FilterError::InvalidThreshold(_)) => {
                        writeln!(out, "{} {e}", "!".yellow())?;
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            "3" => {
                writeln!(out, "Filters reset.")?;
                engine.reset()?
            }
            "4" => {
                engine.exit()?;
                writeln!(out, "Goodbye!")?;
                break;
            }
            other => {
                writeln!(out, "{} Unrecognized option: '{other}'", "!".yellow())?;
                continue;
            }
        };

        write_outcome(out, &outcome, engine.state().threshold())?;
    }
    Ok(())
}
