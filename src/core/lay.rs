//! Lay Stake Matching
//!
//! Optimal lay stake for a back bet hedged on an exchange, and the
//! free-bet / qualifying-bet payout models built on it.
//!
//! Every matched bet has two outcomes. For each one the back and the lay
//! side produce a return:
//!
//! ```text
//!             back side                        lay side
//! back wins:  stake * (bo - 1) * (1 - bc)      -ls * (lo - 1)
//! lay wins:   0 (free) or -stake (qualifying)   ls * (1 - lc)
//! ```
//!
//! The lay side returns are linear in the lay stake `ls`, so equating the
//! two outcome totals gives
//!
//! ```text
//! bwbr + ls * bwlr_ls = lwbr + ls * lwlr_ls
//! ls = (lwbr - bwbr) / (bwlr_ls - lwlr_ls)
//! ```
//!
//! where `bwlr_ls = 1 - lo` and `lwlr_ls = 1 - lc` are the lay returns per
//! unit of lay stake.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{
    overflow, validate_commission, validate_odds, validate_odds_count, validate_stake, MatchError,
    Result,
};
use crate::models::{BetKind, BetReturn, Commission};

/// Lay stakes are placed in whole cents
pub const LAY_STAKE_DP: u32 = 2;

/// Back side return when the back bet wins
pub fn back_win_back_return(
    stake: Decimal,
    back_odds: Decimal,
    back_comm: Decimal,
) -> Result<Decimal> {
    stake
        .checked_mul(back_odds - Decimal::ONE)
        .and_then(|x| x.checked_mul(Decimal::ONE - back_comm))
        .ok_or_else(|| overflow("back winnings"))
}

/// Back side return when the lay bet wins
pub fn lay_win_back_return(kind: BetKind, stake: Decimal) -> Decimal {
    match kind {
        BetKind::Free => Decimal::ZERO,
        BetKind::Qualifying => -stake,
    }
}

/// Calculate the lay stake that equalises both outcomes
///
/// # Arguments
/// * `bwbr` - Back side return if the back bet wins
/// * `bwlr_ls` - Lay side return per unit lay stake if the back bet wins
/// * `lwbr` - Back side return if the lay bet wins
/// * `lwlr_ls` - Lay side return per unit lay stake if the lay bet wins
/// * `round` - Quantise to cents (round half to even)
///
/// # Examples
/// ```
/// use matched_bets::core::lay::optimal_lay_stake;
/// use rust_decimal_macros::dec;
///
/// // £10 free bet at 5.0, laid at 5.0 with 2% commission
/// let ls = optimal_lay_stake(dec!(40), dec!(-4), dec!(0), dec!(0.98), true).unwrap();
/// assert_eq!(ls, dec!(8.03));
/// ```
pub fn optimal_lay_stake(
    bwbr: Decimal,
    bwlr_ls: Decimal,
    lwbr: Decimal,
    lwlr_ls: Decimal,
    round: bool,
) -> Result<Decimal> {
    let spread = bwlr_ls
        .checked_sub(lwlr_ls)
        .ok_or_else(|| overflow("lay return spread"))?;
    if spread.is_zero() {
        return Err(MatchError::Degenerate(format!(
            "lay returns per unit stake are equal ({} and {})",
            bwlr_ls, lwlr_ls
        )));
    }

    let lay_stake = lwbr
        .checked_sub(bwbr)
        .and_then(|x| x.checked_div(spread))
        .ok_or_else(|| overflow("lay stake"))?;

    if round {
        Ok(lay_stake.round_dp_with_strategy(LAY_STAKE_DP, RoundingStrategy::MidpointNearestEven))
    } else {
        Ok(lay_stake)
    }
}

/// Evaluate a matched bet of the given kind
pub fn matched_bet(
    kind: BetKind,
    back_stake: Decimal,
    back_odds: Decimal,
    lay_odds: Decimal,
    commission: Commission,
    round_lay_stake: bool,
) -> Result<BetReturn> {
    validate_stake(back_stake)?;
    validate_odds(back_odds)?;
    validate_odds(lay_odds)?;
    validate_commission(commission.back)?;
    validate_commission(commission.lay)?;

    let bwbr = back_win_back_return(back_stake, back_odds, commission.back)?;
    let lwbr = lay_win_back_return(kind, back_stake);
    let bwlr_ls = Decimal::ONE - lay_odds;
    let lwlr_ls = Decimal::ONE - commission.lay;

    let lay_stake = optimal_lay_stake(bwbr, bwlr_ls, lwbr, lwlr_ls, round_lay_stake)?;

    let bwlr = lay_stake
        .checked_mul(bwlr_ls)
        .ok_or_else(|| overflow("lay liability"))?;
    let lwlr = lay_stake
        .checked_mul(lwlr_ls)
        .ok_or_else(|| overflow("lay winnings"))?;
    let bwtr = bwbr
        .checked_add(bwlr)
        .ok_or_else(|| overflow("back-win total"))?;
    let lwtr = lwbr
        .checked_add(lwlr)
        .ok_or_else(|| overflow("lay-win total"))?;

    tracing::debug!(
        "{} bet {} @ {} laid @ {}: lay stake {}",
        kind,
        back_stake,
        back_odds,
        lay_odds,
        lay_stake
    );

    Ok(BetReturn {
        kind,
        back_stake,
        lay_stake,
        back_odds,
        lay_odds,
        back_commission: commission.back,
        lay_commission: commission.lay,

        back_win_back_return: bwbr,
        back_win_lay_return: bwlr,
        back_win_total_return: bwtr,

        lay_win_back_return: lwbr,
        lay_win_lay_return: lwlr,
        lay_win_total_return: lwtr,
    })
}

/// Free bet: the stake is not returned with the winnings
pub fn free_bet(
    back_stake: Decimal,
    back_odds: Decimal,
    lay_odds: Decimal,
    commission: Commission,
    round_lay_stake: bool,
) -> Result<BetReturn> {
    matched_bet(
        BetKind::Free,
        back_stake,
        back_odds,
        lay_odds,
        commission,
        round_lay_stake,
    )
}

/// Qualifying bet: the back stake is lost if the lay side wins
pub fn qualifying_bet(
    back_stake: Decimal,
    back_odds: Decimal,
    lay_odds: Decimal,
    commission: Commission,
    round_lay_stake: bool,
) -> Result<BetReturn> {
    matched_bet(
        BetKind::Qualifying,
        back_stake,
        back_odds,
        lay_odds,
        commission,
        round_lay_stake,
    )
}

/// Split a flat odds list into (back, lay) pairs
///
/// The first half holds the back odds and the second half the lay odds, so
/// `[2.0, 3.0, 2.1, 3.2]` becomes `[(2.0, 2.1), (3.0, 3.2)]`.
pub fn split_odds(odds: &[Decimal]) -> Result<Vec<(Decimal, Decimal)>> {
    validate_odds_count(odds.len())?;

    let (back, lay) = odds.split_at(odds.len() / 2);
    Ok(back.iter().copied().zip(lay.iter().copied()).collect())
}

/// Matched bet calculator with fixed bet type and commission settings
#[derive(Debug, Clone)]
pub struct LayCalculator {
    pub kind: BetKind,
    pub commission: Commission,
    pub round_lay_stake: bool,
}

impl LayCalculator {
    pub fn new(kind: BetKind, commission: Commission, round_lay_stake: bool) -> Self {
        Self {
            kind,
            commission,
            round_lay_stake,
        }
    }

    /// Default commission (2% lay), lay stakes rounded to cents
    pub fn with_defaults(kind: BetKind) -> Self {
        Self::new(kind, Commission::default(), true)
    }

    /// Calculate returns for a single odds pair
    pub fn calculate(
        &self,
        back_stake: Decimal,
        back_odds: Decimal,
        lay_odds: Decimal,
    ) -> Result<BetReturn> {
        matched_bet(
            self.kind,
            back_stake,
            back_odds,
            lay_odds,
            self.commission,
            self.round_lay_stake,
        )
    }

    /// Calculate returns for several odds pairs sharing one stake
    pub fn calculate_pairs(
        &self,
        back_stake: Decimal,
        pairs: &[(Decimal, Decimal)],
    ) -> Result<Vec<BetReturn>> {
        pairs
            .iter()
            .map(|(back, lay)| self.calculate(back_stake, *back, *lay))
            .collect()
    }

    /// Calculate returns for a flat odds list (back odds, then lay odds)
    pub fn calculate_flat(&self, back_stake: Decimal, odds: &[Decimal]) -> Result<Vec<BetReturn>> {
        let pairs = split_odds(odds)?;
        self.calculate_pairs(back_stake, &pairs)
    }
}

impl Default for LayCalculator {
    fn default() -> Self {
        Self::with_defaults(BetKind::Free)
    }
}
