//! Penny reconciliation for the exact-sum guarantee.
//!
//! Rounding each scaled share to cents independently can leave the sum a few
//! cents off the authoritative total. This module removes that residual by
//! redistributing whole cents deterministically: largest rounded shares
//! first, ties broken by member ordering, walking cyclically until the
//! discrepancy is gone.

use rust_decimal::RoundingStrategy;

use crate::model::{MemberId, MemberShares, Money};

/// Rounding mode for quantizing shares to cents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Round half away from zero (`round(x*100)/100` behavior). The default.
    #[default]
    HalfUp,
    /// Round half to nearest even (banker's rounding).
    HalfEven,
}

impl RoundingMode {
    pub fn strategy(self) -> RoundingStrategy {
        match self {
            RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }
}

/// Rounds every scaled share to cents and corrects the rounding residual
/// against `target` so the sum matches exactly.
///
/// `order` fixes both which members appear in the output and the tie-break
/// for residual-cent distribution: members are ranked by rounded share
/// descending, equal shares keep their `order` position. Whole cents are
/// then applied cyclically along that ranking, one per step, concentrating
/// the adjustment on the largest payers first.
///
/// Pure arithmetic over bounded input; this stage cannot fail. The iteration
/// bound of `2 × |members|` exists only to stop a logic defect from looping
/// forever, with any remainder past the bound assigned to the first ranked
/// member.
pub fn reconcile_to_target(
    scaled: &MemberShares,
    order: &[MemberId],
    target: Money,
    mode: RoundingMode,
) -> MemberShares {
    let strategy = mode.strategy();
    let mut shares: Vec<Money> = order
        .iter()
        .map(|member| {
            scaled
                .get(member)
                .copied()
                .unwrap_or(Money::ZERO)
                .round_to_cents(strategy)
        })
        .collect();

    let rounded_sum: Money = shares.iter().copied().sum();
    let discrepancy_cents = (target - rounded_sum).to_cents().unwrap_or_else(|| {
        tracing::warn!(
            member_count = order.len(),
            %target,
            %rounded_sum,
            "Rounding discrepancy does not fit in cents; leaving shares as rounded"
        );
        0
    });

    if discrepancy_cents != 0 && !order.is_empty() {
        let mut ranking: Vec<usize> = (0..order.len()).collect();
        ranking.sort_by(|&a, &b| shares[b].cmp(&shares[a]));

        let step_sign = discrepancy_cents.signum();
        let step = Money::from_cents(step_sign);
        let bound = 2 * order.len();
        let mut remaining = discrepancy_cents.unsigned_abs();
        let mut steps = 0_usize;

        while remaining > 0 && steps < bound {
            shares[ranking[steps % ranking.len()]] += step;
            remaining -= 1;
            steps += 1;
        }

        if remaining > 0 {
            tracing::warn!(
                remaining_cents = remaining,
                member_count = order.len(),
                %target,
                "Residual cents survived the redistribution bound; assigning to the largest payer"
            );
            shares[ranking[0]] += Money::from_cents(step_sign * remaining as i64);
        }

        tracing::debug!(
            discrepancy_cents,
            adjustment_steps = steps,
            member_count = order.len(),
            %target,
            %rounded_sum,
            "Penny reconciliation distributed rounding residual"
        );
    }

    order.iter().cloned().zip(shares).collect()
}
