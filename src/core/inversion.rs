//! Equal-return odds inversion
//!
//! With the unrounded optimal lay stake `ls = (bwbr - lwbr) / (lo - lc)`
//! both outcomes return
//!
//! ```text
//! T = lwbr + ls * (1 - lc)
//! ```
//!
//! Solving for one set of odds given the other yields the odds needed to
//! lock in a target return `T`:
//!
//! ```text
//! lo   = lc + (bwbr - lwbr) * (1 - lc) / (T - lwbr)
//! bwbr = lwbr + (T - lwbr) * (lo - lc) / (1 - lc)
//! ```

use rust_decimal::Decimal;

use super::lay::{back_win_back_return, lay_win_back_return};
use crate::error::{
    overflow, validate_commission, validate_odds, validate_stake, MatchError, Result,
};
use crate::models::{BetKind, Commission};

/// Lay odds at which the matched bet returns `target` on both outcomes
///
/// # Examples
/// ```
/// use matched_bets::core::inversion::lay_odds_for_return;
/// use matched_bets::{BetKind, Commission};
/// use rust_decimal_macros::dec;
///
/// // A £10 free bet at 5.0 converts to £8 when laid at 5.0 with no commission
/// let lo = lay_odds_for_return(
///     BetKind::Free,
///     dec!(10),
///     dec!(5),
///     Commission::lay_only(dec!(0)),
///     dec!(8),
/// )
/// .unwrap();
/// assert_eq!(lo, dec!(5));
/// ```
pub fn lay_odds_for_return(
    kind: BetKind,
    back_stake: Decimal,
    back_odds: Decimal,
    commission: Commission,
    target: Decimal,
) -> Result<Decimal> {
    validate_stake(back_stake)?;
    validate_odds(back_odds)?;
    validate_commission(commission.back)?;
    validate_commission(commission.lay)?;

    let bwbr = back_win_back_return(back_stake, back_odds, commission.back)?;
    let lwbr = lay_win_back_return(kind, back_stake);
    let keep = Decimal::ONE - commission.lay;

    let excess = target
        .checked_sub(lwbr)
        .ok_or_else(|| overflow("target return"))?;
    if excess.is_zero() {
        return Err(MatchError::Unreachable(format!(
            "a return of {} needs a zero lay stake",
            target
        )));
    }

    let lay_odds = bwbr
        .checked_sub(lwbr)
        .and_then(|x| x.checked_mul(keep))
        .and_then(|x| x.checked_div(excess))
        .and_then(|x| x.checked_add(commission.lay))
        .ok_or_else(|| overflow("lay odds"))?;

    if target <= lwbr || lay_odds <= Decimal::ONE {
        return Err(MatchError::Unreachable(format!(
            "no lay odds return {} on a {} bet of {} @ {}",
            target, kind, back_stake, back_odds
        )));
    }

    tracing::debug!("lay odds for return {}: {}", target, lay_odds);
    Ok(lay_odds)
}

/// Back odds at which the matched bet returns `target` on both outcomes
pub fn back_odds_for_return(
    kind: BetKind,
    back_stake: Decimal,
    lay_odds: Decimal,
    commission: Commission,
    target: Decimal,
) -> Result<Decimal> {
    validate_stake(back_stake)?;
    validate_odds(lay_odds)?;
    validate_commission(commission.back)?;
    validate_commission(commission.lay)?;

    let lwbr = lay_win_back_return(kind, back_stake);
    let keep = Decimal::ONE - commission.lay;

    let bwbr = target
        .checked_sub(lwbr)
        .and_then(|x| x.checked_mul(lay_odds - commission.lay))
        .and_then(|x| x.checked_div(keep))
        .and_then(|x| x.checked_add(lwbr))
        .ok_or_else(|| overflow("back winnings"))?;

    let effective_stake = back_stake
        .checked_mul(Decimal::ONE - commission.back)
        .ok_or_else(|| overflow("effective back stake"))?;
    if effective_stake.is_zero() {
        return Err(MatchError::Degenerate(
            "zero effective back stake".to_string(),
        ));
    }

    let back_odds = bwbr
        .checked_div(effective_stake)
        .and_then(|x| x.checked_add(Decimal::ONE))
        .ok_or_else(|| overflow("back odds"))?;

    if back_odds <= Decimal::ONE {
        return Err(MatchError::Unreachable(format!(
            "no back odds return {} on a {} bet of {} laid @ {}",
            target, kind, back_stake, lay_odds
        )));
    }

    tracing::debug!("back odds for return {}: {}", target, back_odds);
    Ok(back_odds)
}

/// Highest lay odds at which the bet does not lose money
pub fn break_even_lay_odds(
    kind: BetKind,
    back_stake: Decimal,
    back_odds: Decimal,
    commission: Commission,
) -> Result<Decimal> {
    lay_odds_for_return(kind, back_stake, back_odds, commission, Decimal::ZERO)
}
