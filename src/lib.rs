//! Matched Bets - lay stake calculator for matched betting
//!
//! This library provides:
//! - Optimal lay stake for a back bet hedged on an exchange
//! - Free bet (stake not returned) and qualifying bet payout models
//! - Equal-return odds inversion (odds needed for a target return)
//! - Fixed-width profit/loss table and JSON rendering
//!
//! # Example
//!
//! ```
//! use matched_bets::core::lay::LayCalculator;
//! use matched_bets::BetKind;
//! use rust_decimal_macros::dec;
//!
//! // £10 qualifying bet backed at 5.0, laid at 5.0 with 2% commission
//! let calc = LayCalculator::with_defaults(BetKind::Qualifying);
//! let bet = calc.calculate(dec!(10), dec!(5), dec!(5)).unwrap();
//! assert_eq!(bet.lay_stake, dec!(10.04));
//! println!("{}", matched_bets::report::render_table(&[bet]));
//! ```

pub mod core;
pub mod error;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use crate::core::LayCalculator;
pub use error::{MatchError, Result};
pub use models::{BetKind, BetReturn, Commission, OddsSolution};
