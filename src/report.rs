//! Plain-text tables shared by the CLI and the interactive session.

use std::fmt::{self, Write};

use crate::form::format_value;
use crate::models::{Pair, Position};
use crate::valuation::Valuation;

/// Pair labels, wire values and spread factors.
pub fn pairs_table() -> String {
    render(write_pairs)
}

/// Positions in insertion order, numbered from 1.
pub fn positions_table(positions: &[Position]) -> String {
    if positions.is_empty() {
        return "No open positions.\n".to_string();
    }
    render(|out| write_positions(out, positions))
}

/// Itemised valuation with the total on the last line.
pub fn valuation_table(valuation: &Valuation, precision: u32) -> String {
    render(|out| write_valuation(out, valuation, precision))
}

/// Writing into a `String` cannot fail.
fn render(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    let _ = write(&mut out);
    out
}

fn write_pairs(out: &mut String) -> fmt::Result {
    writeln!(out, "{:<10} {:<10} {:>8}", "PAIR", "VALUE", "SPREAD")?;
    writeln!(out, "{}", "-".repeat(30))?;
    for pair in Pair::ALL {
        writeln!(
            out,
            "{:<10} {:<10} {:>8}",
            pair.label(),
            pair.as_str(),
            pair.spread_factor().to_string()
        )?;
    }
    Ok(())
}

fn write_positions(out: &mut String, positions: &[Position]) -> fmt::Result {
    writeln!(out, "{:>3}  {:<5} {:>12} {:>14}", "#", "SIDE", "LOT", "OPEN AT")?;
    writeln!(out, "{}", "-".repeat(37))?;
    for (i, position) in positions.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<5} {:>12} {:>14}",
            i + 1,
            position.direction().label(),
            position.lot().to_string(),
            position.open().to_string()
        )?;
    }
    Ok(())
}

fn write_valuation(out: &mut String, valuation: &Valuation, precision: u32) -> fmt::Result {
    writeln!(
        out,
        "Pair: {} (spread {})  Close at: {}",
        valuation.pair, valuation.spread_factor, valuation.close
    )?;
    writeln!(
        out,
        "{:>3}  {:<5} {:>12} {:>14} {:>16}",
        "#", "SIDE", "LOT", "OPEN AT", "VALUE"
    )?;
    writeln!(out, "{}", "-".repeat(54))?;
    for (i, line) in valuation.positions.iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:<5} {:>12} {:>14} {:>16}",
            i + 1,
            line.position.direction().label(),
            line.position.lot().to_string(),
            line.position.open().to_string(),
            format_value(line.value, precision)
        )?;
    }
    writeln!(out, "{}", "-".repeat(54))?;
    writeln!(
        out,
        "{:<48} {:>5}",
        "Total value:",
        format_value(valuation.total, precision)
    )
}
