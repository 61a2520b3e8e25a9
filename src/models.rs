use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of back bet being matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BetKind {
    /// Free bet, stake not returned on a win
    #[default]
    Free,
    /// Qualifying bet with the bettor's own money at risk
    Qualifying,
}

impl fmt::Display for BetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetKind::Free => write!(f, "free"),
            BetKind::Qualifying => write!(f, "qualifying"),
        }
    }
}

/// Commission rates charged on winnings (0.02 = 2%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commission {
    pub back: Decimal,
    pub lay: Decimal,
}

impl Commission {
    pub fn new(back: Decimal, lay: Decimal) -> Self {
        Self { back, lay }
    }

    /// Exchange commission only, bookmaker takes none
    pub fn lay_only(lay: Decimal) -> Self {
        Self {
            back: Decimal::ZERO,
            lay,
        }
    }
}

impl Default for Commission {
    fn default() -> Self {
        Self::lay_only(dec!(0.02))
    }
}

/// Returns of a matched bet for both outcomes
///
/// "Back win" is the outcome where the bookmaker bet wins and the lay bet
/// loses; "lay win" is the opposite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetReturn {
    pub kind: BetKind,
    pub back_stake: Decimal,
    pub lay_stake: Decimal,
    pub back_odds: Decimal,
    pub lay_odds: Decimal,
    pub back_commission: Decimal,
    pub lay_commission: Decimal,

    pub back_win_back_return: Decimal,
    pub back_win_lay_return: Decimal,
    pub back_win_total_return: Decimal,

    pub lay_win_back_return: Decimal,
    pub lay_win_lay_return: Decimal,
    pub lay_win_total_return: Decimal,
}

impl BetReturn {
    /// Amount at risk on the exchange if the back bet wins
    pub fn lay_liability(&self) -> Decimal {
        self.lay_stake * (self.lay_odds - Decimal::ONE)
    }

    /// Guaranteed profit (negative = loss) whichever side wins
    pub fn profit(&self) -> Decimal {
        self.back_win_total_return.min(self.lay_win_total_return)
    }

    /// Profit as a fraction of the back stake
    ///
    /// For free bets this is the conversion rate of the free bet into cash.
    pub fn retention(&self) -> Decimal {
        if self.back_stake.is_zero() {
            return Decimal::ZERO;
        }
        self.profit() / self.back_stake
    }
}

/// Odds pair that locks in a target return
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OddsSolution {
    pub back_odds: Decimal,
    pub lay_odds: Decimal,
    pub target: Decimal,
}
