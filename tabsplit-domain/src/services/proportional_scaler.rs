use rust_decimal::Decimal;

use crate::model::{GrossShares, MemberShares, Money};

/// Rescales gross shares onto the authoritative target total, preserving
/// each member's proportion of the gross distribution.
///
/// No rounding happens here; the sum of the scaled shares matches the target
/// up to exact decimal division error, and the penny reconciler removes the
/// rest. When nothing was shared at all (`gross.total == 0`) the target is
/// split equally across the member ordering, or everyone gets zero if the
/// target is itself zero or there are no members.
pub fn scale_to_target(gross: &GrossShares, target: Money) -> MemberShares {
    if gross.total.is_zero() {
        if target.is_zero() || gross.order.is_empty() {
            return gross
                .order
                .iter()
                .map(|member| (member.clone(), Money::ZERO))
                .collect();
        }

        let per_member = Money::from_decimal(
            target.as_decimal() / Decimal::from(gross.order.len() as u64),
        );
        return gross
            .order
            .iter()
            .map(|member| (member.clone(), per_member))
            .collect();
    }

    let gross_total = gross.total.as_decimal();
    gross
        .order
        .iter()
        .map(|member| {
            let share = gross
                .shares
                .get(member)
                .copied()
                .unwrap_or(Money::ZERO)
                .as_decimal();
            let scaled = share / gross_total * target.as_decimal();
            (member.clone(), Money::from_decimal(scaled))
        })
        .collect()
}
