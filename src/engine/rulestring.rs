use std::{fmt::Write, sync::OnceLock};

use regex::Regex;

use crate::{CellState, NEIGHBORHOOD_SUMS, Result, RuleTableError, Variant};

/// Returns the singleton regex matching `B<digits>/S<digits>` rulestrings
fn rulestring_regex() -> &'static Regex {
    static CELL: OnceLock<Regex> = OnceLock::new();
    CELL.get_or_init(|| {
        Regex::new(r"(?i)^B([0-8]*)/S([0-8]*)$").expect("valid rulestring regex")
    })
}

/// Builds the `[Dead, Alive]` variant list described by a rulestring like `B3/S23`
///
/// Digits after `B` are the neighbor counts that bring a dead cell alive, and
/// digits after `S` are those that keep a live cell alive.
pub fn parse(rule: &str) -> Result<Vec<Variant>> {
    let captures = rulestring_regex()
        .captures(rule.trim())
        .ok_or(RuleTableError::Rulestring)?;
    let (_, [birth, survival]) = captures.extract();

    Ok(vec![
        Variant::new(CellState::Dead, 0, table(birth)),
        Variant::new(CellState::Alive, 1, table(survival)),
    ])
}

/// Formats a two-state variant list back into `B.../S...` notation
///
/// Returns [`None`] for tables a rulestring cannot express.
pub(super) fn format(variants: &[Variant]) -> Option<String> {
    let [dead, alive] = variants else {
        return None;
    };
    if dead.state != CellState::Dead
        || alive.state != CellState::Alive
        || dead.influence != 0
        || alive.influence != 1
    {
        return None;
    }

    let mut rule = String::from("B");
    digits(&mut rule, dead)?;
    rule.push_str("/S");
    digits(&mut rule, alive)?;
    Some(rule)
}

fn table(digits: &str) -> [usize; NEIGHBORHOOD_SUMS] {
    let mut transitions = [0; NEIGHBORHOOD_SUMS];
    for digit in digits.bytes() {
        transitions[(digit - b'0') as usize] = 1;
    }
    transitions
}

fn digits(rule: &mut String, variant: &Variant) -> Option<()> {
    for (sum, &target) in variant.transitions.iter().enumerate() {
        match target {
            0 => {}
            1 => write!(rule, "{sum}").ok()?,
            _ => return None,
        }
    }
    Some(())
}
