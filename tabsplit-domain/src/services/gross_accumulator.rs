use rust_decimal::Decimal;

use crate::{
    model::{
        ChargeableItem, GrossShares, MemberId, MemberShares, Money, SharingAssignment, Surcharge,
    },
    services::quantity_split::quantity_shares,
};

/// Accumulates each member's un-normalized dollar exposure before the
/// distribution is reconciled against the authoritative bill total.
///
/// The full roster is seeded at zero so members who end up owing nothing are
/// still present in the output. This stage is purely additive and never
/// fails; an item or surcharge with an empty member set simply contributes
/// nothing.
pub struct GrossShareAccumulator {
    shares: MemberShares,
    order: Vec<MemberId>,
}

impl GrossShareAccumulator {
    pub fn new(roster: &[MemberId]) -> Self {
        let mut shares = MemberShares::default();
        let mut order = Vec::with_capacity(roster.len());
        for member in roster {
            if shares.insert(member.clone(), Money::ZERO).is_none() {
                order.push(member.clone());
            }
        }

        Self { shares, order }
    }

    pub fn apply_item(&mut self, item: &ChargeableItem) {
        match &item.sharing {
            SharingAssignment::Equal { shared_by } | SharingAssignment::Custom { shared_by } => {
                self.credit_equally(item.price, shared_by);
            }
            SharingAssignment::Quantity {
                assignments,
                fallback,
            } => {
                for (member, share) in quantity_shares(item.price, assignments, fallback) {
                    self.credit(&member, share);
                }
            }
        }
    }

    pub fn apply_surcharge(&mut self, surcharge: &Surcharge) {
        if surcharge.amount > Money::ZERO {
            self.credit_equally(surcharge.amount, &surcharge.shared_by);
        }
    }

    pub fn into_gross(self) -> GrossShares {
        let total = self.shares.values().copied().sum();
        GrossShares {
            shares: self.shares,
            order: self.order,
            total,
        }
    }

    fn credit_equally(&mut self, amount: Money, members: &[MemberId]) {
        if members.is_empty() {
            return;
        }

        let per_member =
            Money::from_decimal(amount.as_decimal() / Decimal::from(members.len() as u64));
        for member in members {
            self.credit(member, per_member);
        }
    }

    fn credit(&mut self, member: &MemberId, amount: Money) {
        match self.shares.get_mut(member) {
            Some(share) => *share += amount,
            None => {
                // A sharing set may name someone outside the roster; keep
                // their money rather than dropping it, appended after the
                // roster in first-seen order.
                self.shares.insert(member.clone(), amount);
                self.order.push(member.clone());
            }
        }
    }
}
