//! Matched betting formulas

pub mod inversion;
pub mod lay;

// Re-export commonly used types
pub use inversion::{back_odds_for_return, break_even_lay_odds, lay_odds_for_return};
pub use lay::{free_bet, matched_bet, optimal_lay_stake, qualifying_bet, split_odds, LayCalculator};
