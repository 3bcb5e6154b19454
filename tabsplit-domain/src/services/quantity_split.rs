use rust_decimal::Decimal;

use crate::model::{MemberId, Money};

/// Computes each member's raw dollar share of a quantity-split item.
///
/// The item's price is divided by the sum of assigned units to get a unit
/// price, and each member owes unit price times their units. Members with
/// zero (or negative) units are not participating in the item and are
/// excluded from the output rather than emitted as zero entries.
///
/// When no units are assigned at all, the price falls back to an equal split
/// across `fallback` (the item's configured member set).
pub fn quantity_shares(
    price: Money,
    assignments: &[(MemberId, Decimal)],
    fallback: &[MemberId],
) -> Vec<(MemberId, Money)> {
    let total_units: Decimal = assignments
        .iter()
        .filter(|(_, units)| *units > Decimal::ZERO)
        .map(|(_, units)| *units)
        .sum();

    if total_units > Decimal::ZERO {
        let unit_price = price.as_decimal() / total_units;
        return assignments
            .iter()
            .filter(|(_, units)| *units > Decimal::ZERO)
            .map(|(member, units)| (member.clone(), Money::from_decimal(unit_price * units)))
            .collect();
    }

    if fallback.is_empty() {
        return Vec::new();
    }

    let per_member = Money::from_decimal(price.as_decimal() / Decimal::from(fallback.len() as u64));
    fallback
        .iter()
        .map(|member| (member.clone(), per_member))
        .collect()
}
