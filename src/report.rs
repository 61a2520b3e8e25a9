//! Profit/loss table rendering
//!
//! Each matched bet takes two lines: the back-win outcome on top and the
//! lay-win outcome underneath, aligned so both totals sit in the P/L column.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::error::Result;
use crate::models::{BetReturn, OddsSolution};

/// Width of every numeric cell
pub const CELL_WIDTH: usize = 8;

/// Cells before the lay-win returns on the bottom line
const BOTTOM_INDENT_CELLS: usize = 5;

/// Column titles
pub const HEADER_TOP: &str =
    "  B odds  L odds   B stk   L stk  L liab  B rtrn  L rtrn     P/L  (B win)";

/// Header line marking the second line of each row as the lay-win outcome
pub fn header_bottom() -> String {
    format!("{}(L win)", " ".repeat(CELL_WIDTH * 8 + 2))
}

/// Right-aligned cell, rounded to two decimals
pub fn format_cell(value: Decimal) -> String {
    let value = value.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    format!("{:>width$.2}", value, width = CELL_WIDTH)
}

/// Back-win line: odds, stakes, liability and back-win returns
pub fn format_top_line(bet: &BetReturn) -> String {
    [
        bet.back_odds,
        bet.lay_odds,
        bet.back_stake,
        bet.lay_stake,
        // Liability column shows the signed lay return when the back bet wins
        bet.back_win_lay_return,
        bet.back_win_back_return,
        bet.back_win_lay_return,
        bet.back_win_total_return,
    ]
    .into_iter()
    .map(format_cell)
    .collect()
}

/// Lay-win line, indented under the return columns
pub fn format_bottom_line(bet: &BetReturn) -> String {
    let cells: String = [
        bet.lay_win_back_return,
        bet.lay_win_lay_return,
        bet.lay_win_total_return,
    ]
    .into_iter()
    .map(format_cell)
    .collect();

    format!("{}{}", " ".repeat(CELL_WIDTH * BOTTOM_INDENT_CELLS), cells)
}

/// Full plain-text table: header, blank line, two lines per bet
pub fn render_table(bets: &[BetReturn]) -> String {
    let mut out = String::new();
    out.push_str(HEADER_TOP);
    out.push('\n');
    out.push_str(&header_bottom());
    out.push_str("\n\n");

    for bet in bets {
        out.push_str(&format_top_line(bet));
        out.push('\n');
        out.push_str(&format_bottom_line(bet));
        out.push('\n');
    }

    out
}

/// Index of the bet with the best guaranteed profit
///
/// Ties go to the earliest bet.
pub fn best_index(bets: &[BetReturn]) -> Option<usize> {
    bets.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, Decimal)>, (i, bet)| {
            let profit = bet.profit();
            match best {
                Some((_, top)) if top >= profit => best,
                _ => Some((i, profit)),
            }
        })
        .map(|(i, _)| i)
}

/// Bet returns plus derived figures, as written in JSON output
#[derive(Debug, Serialize)]
pub struct ReportEntry<'a> {
    #[serde(flatten)]
    pub bet: &'a BetReturn,
    pub lay_liability: Decimal,
    pub profit: Decimal,
    pub retention: Decimal,
}

impl<'a> From<&'a BetReturn> for ReportEntry<'a> {
    fn from(bet: &'a BetReturn) -> Self {
        Self {
            bet,
            lay_liability: bet.lay_liability(),
            profit: bet.profit(),
            retention: bet.retention(),
        }
    }
}

/// Pretty-printed JSON array of report entries
pub fn render_json(bets: &[BetReturn]) -> Result<String> {
    let entries: Vec<ReportEntry> = bets.iter().map(ReportEntry::from).collect();
    Ok(serde_json::to_string_pretty(&entries)?)
}

/// Column titles for solved odds
pub const SOLUTION_HEADER: &str = "  B odds  L odds  Target";

/// Table of odds pairs solved for a target return
pub fn render_solutions(solutions: &[OddsSolution]) -> String {
    let mut out = String::new();
    out.push_str(SOLUTION_HEADER);
    out.push_str("\n\n");

    for s in solutions {
        out.push_str(&format_cell(s.back_odds));
        out.push_str(&format_cell(s.lay_odds));
        out.push_str(&format_cell(s.target));
        out.push('\n');
    }

    out
}

pub fn render_solutions_json(solutions: &[OddsSolution]) -> Result<String> {
    Ok(serde_json::to_string_pretty(solutions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lay::LayCalculator;
    use crate::models::BetKind;
    use rust_decimal_macros::dec;

    fn cells(values: &[&str]) -> String {
        values.iter().map(|v| format!("{:>8}", v)).collect()
    }

    fn free_bet() -> BetReturn {
        LayCalculator::with_defaults(BetKind::Free)
            .calculate(dec!(10), dec!(5), dec!(5))
            .unwrap()
    }

    #[test]
    fn test_header_alignment() {
        let bottom = header_bottom();
        assert_eq!(HEADER_TOP.len(), 73);
        assert_eq!(bottom.len(), 73);
        assert_eq!(HEADER_TOP.find("(B win)"), bottom.find("(L win)"));
    }

    #[test]
    fn test_format_cell_rounding() {
        assert_eq!(format_cell(dec!(5)), "    5.00");
        assert_eq!(format_cell(dec!(7.8694)), "    7.87");
        assert_eq!(format_cell(dec!(-0.1608)), "   -0.16");
        assert_eq!(format_cell(dec!(0.125)), "    0.12");
    }

    #[test]
    fn test_format_top_line() {
        let line = format_top_line(&free_bet());
        assert_eq!(
            line,
            cells(&["5.00", "5.00", "10.00", "8.03", "-32.12", "40.00", "-32.12", "7.88"])
        );
    }

    #[test]
    fn test_format_bottom_line() {
        let line = format_bottom_line(&free_bet());
        assert_eq!(line, format!("{}{}", " ".repeat(40), cells(&["0.00", "7.87", "7.87"])));
        assert_eq!(line.len(), 64);
    }

    #[test]
    fn test_render_table_layout() {
        let bet = free_bet();
        let table = render_table(&[bet.clone(), bet]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], HEADER_TOP);
        assert!(lines[1].ends_with("(L win)"));
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], lines[5]);
        assert_eq!(lines[4], lines[6]);
    }

    #[test]
    fn test_render_table_empty() {
        let table = render_table(&[]);
        assert_eq!(table.lines().count(), 3);
    }

    #[test]
    fn test_best_index() {
        let calc = LayCalculator::with_defaults(BetKind::Qualifying);
        let bets = calc
            .calculate_flat(dec!(10), &[dec!(3), dec!(3), dec!(3.05), dec!(3.5)])
            .unwrap();

        // Tighter spread on the first pair loses less
        assert_eq!(best_index(&bets), Some(0));
        assert_eq!(best_index(&[]), None);
    }

    #[test]
    fn test_best_index_tie_keeps_first() {
        let calc = LayCalculator::with_defaults(BetKind::Qualifying);
        let bets = calc
            .calculate_flat(
                dec!(10),
                &[dec!(3), dec!(3), dec!(3), dec!(3.5), dec!(3.05), dec!(3.05)],
            )
            .unwrap();

        // Last two pairs are identical and both beat the first
        assert_eq!(bets[1].profit(), bets[2].profit());
        assert_eq!(best_index(&bets), Some(1));
    }

    #[test]
    fn test_render_json() {
        let json = render_json(&[free_bet()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let entry = &value[0];
        assert_eq!(entry["kind"], "free");
        assert_eq!(entry["lay_stake"], "8.03");
        assert_eq!(entry["profit"], "7.8694");
        assert!(entry.get("lay_liability").is_some());
        assert!(entry.get("retention").is_some());
    }

    #[test]
    fn test_render_solutions() {
        let solutions = vec![OddsSolution {
            back_odds: dec!(3),
            lay_odds: dec!(2.96),
            target: dec!(0),
        }];
        let table = render_solutions(&solutions);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], SOLUTION_HEADER);
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], cells(&["3.00", "2.96", "0.00"]));
        assert_eq!(lines[2].len(), SOLUTION_HEADER.len());
    }
}
