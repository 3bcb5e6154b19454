use crate::{
    model::{Bill, MemberId, MemberShares, Money},
    services::{
        GrossShareAccumulator, RoundingMode, penny_reconciler::reconcile_to_target,
        proportional_scaler::scale_to_target,
    },
};

/// Final per-member owed amounts, ordered by the roster (members named only
/// by sharing sets follow in first-seen order). Every amount is quantized to
/// cents and the amounts sum exactly to the bill's target total.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationResult {
    entries: Vec<(MemberId, Money)>,
}

impl AllocationResult {
    pub fn entries(&self) -> &[(MemberId, Money)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(MemberId, Money)> {
        self.entries
    }

    pub fn amount_for(&self, member: &MemberId) -> Option<Money> {
        self.entries
            .iter()
            .find(|(id, _)| id == member)
            .map(|&(_, amount)| amount)
    }

    pub fn total(&self) -> Money {
        self.entries.iter().map(|&(_, amount)| amount).sum()
    }
}

/// Intermediate stages alongside the final result, for callers that surface
/// pre-reconciliation diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct AllocationBreakdown {
    pub gross: crate::model::GrossShares,
    pub scaled: MemberShares,
    pub result: AllocationResult,
}

/// The canonical allocation pipeline: accumulate gross shares, scale them
/// onto the target total, reconcile to the penny.
///
/// A pure function of its inputs; it holds no state between calls and the
/// same bill and roster always produce the same result.
pub struct AllocationEngine;

impl AllocationEngine {
    pub fn allocate(bill: &Bill, roster: &[MemberId], mode: RoundingMode) -> AllocationResult {
        Self::allocate_with_breakdown(bill, roster, mode).result
    }

    pub fn allocate_default(bill: &Bill, roster: &[MemberId]) -> AllocationResult {
        Self::allocate(bill, roster, RoundingMode::default())
    }

    pub fn allocate_with_breakdown(
        bill: &Bill,
        roster: &[MemberId],
        mode: RoundingMode,
    ) -> AllocationBreakdown {
        let mut accumulator = GrossShareAccumulator::new(roster);
        for item in &bill.items {
            accumulator.apply_item(item);
        }
        accumulator.apply_surcharge(&bill.tax);
        accumulator.apply_surcharge(&bill.other_charges);

        let gross = accumulator.into_gross();
        let scaled = scale_to_target(&gross, bill.target_total);
        let reconciled = reconcile_to_target(&scaled, &gross.order, bill.target_total, mode);
        let result = Self::ordered_result(&gross.order, reconciled);

        AllocationBreakdown {
            gross,
            scaled,
            result,
        }
    }

    fn ordered_result(order: &[MemberId], mut shares: MemberShares) -> AllocationResult {
        let entries = order
            .iter()
            .map(|member| {
                let amount = shares.remove(member).unwrap_or(Money::ZERO);
                (member.clone(), amount)
            })
            .collect();
        AllocationResult { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChargeableItem, SharingAssignment, Surcharge};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn member(id: &str) -> MemberId {
        MemberId::from(id)
    }

    fn roster(ids: &[&str]) -> Vec<MemberId> {
        ids.iter().copied().map(MemberId::from).collect()
    }

    fn equal_item(name: &str, price_cents: i64, shared_by: &[&str]) -> ChargeableItem {
        ChargeableItem {
            name: name.to_owned(),
            price: Money::from_cents(price_cents),
            sharing: SharingAssignment::Equal {
                shared_by: roster(shared_by),
            },
        }
    }

    fn bill(items: Vec<ChargeableItem>, tax: Surcharge, target_cents: i64) -> Bill {
        Bill {
            items,
            tax,
            other_charges: Surcharge::none(),
            target_total: Money::from_cents(target_cents),
        }
    }

    #[test]
    fn burger_and_fries_end_to_end() {
        // Gross equals the target, so scaling is a no-op and nothing needs
        // reconciling: A = 6.00 + 4.00 + 0.64, B = 6.00 + 0.64.
        let bill = bill(
            vec![
                equal_item("Burger", 1200, &["A", "B"]),
                equal_item("Fries", 400, &["A"]),
            ],
            Surcharge::new(Money::from_cents(128), roster(&["A", "B"])),
            1728,
        );

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B"]));

        assert_eq!(
            result.amount_for(&member("A")),
            Some(Money::from_cents(1064))
        );
        assert_eq!(result.amount_for(&member("B")), Some(Money::from_cents(664)));
        assert_eq!(result.total(), Money::from_cents(1728));
    }

    #[test]
    fn equal_split_with_remainder_sums_exactly() {
        let bill = bill(
            vec![equal_item("Platter", 1000, &["A", "B", "C"])],
            Surcharge::none(),
            1000,
        );

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B", "C"]));

        assert_eq!(result.total(), Money::from_cents(1000));
        let amounts: Vec<i64> = result
            .entries()
            .iter()
            .filter_map(|&(_, amount)| amount.to_cents())
            .collect();
        assert_eq!(amounts.iter().sum::<i64>(), 1000);
        assert!(amounts.iter().all(|&cents| cents == 333 || cents == 334));
    }

    #[test]
    fn discrepancy_forcing_scenario_removes_exactly_one_cent() {
        // $10.01 equally over three members rounds to 3.34 each, one cent
        // over; the first member in order gives it back.
        let bill = bill(
            vec![equal_item("Tasting menu", 1001, &["A", "B", "C"])],
            Surcharge::none(),
            1001,
        );

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B", "C"]));

        assert_eq!(result.amount_for(&member("A")), Some(Money::from_cents(333)));
        assert_eq!(result.amount_for(&member("B")), Some(Money::from_cents(334)));
        assert_eq!(result.amount_for(&member("C")), Some(Money::from_cents(334)));
        assert_eq!(result.total(), Money::from_cents(1001));
    }

    #[test]
    fn zero_gross_falls_back_to_equal_split_of_target() {
        let bill = bill(vec![equal_item("Orphaned", 3000, &[])], Surcharge::none(), 3000);

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B", "C"]));

        for id in ["A", "B", "C"] {
            assert_eq!(
                result.amount_for(&member(id)),
                Some(Money::from_cents(1000)),
                "share mismatch for {id}"
            );
        }
    }

    #[test]
    fn quantity_split_assigns_by_units() {
        let bill = bill(
            vec![ChargeableItem {
                name: "Pitcher".to_owned(),
                price: Money::from_cents(900),
                sharing: SharingAssignment::Quantity {
                    assignments: vec![
                        (member("A"), Decimal::TWO),
                        (member("B"), Decimal::ONE),
                    ],
                    fallback: roster(&["A", "B", "C"]),
                },
            }],
            Surcharge::none(),
            900,
        );

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B", "C"]));

        assert_eq!(result.amount_for(&member("A")), Some(Money::from_cents(600)));
        assert_eq!(result.amount_for(&member("B")), Some(Money::from_cents(300)));
        assert_eq!(result.amount_for(&member("C")), Some(Money::ZERO));
    }

    #[test]
    fn members_outside_a_sharing_set_receive_none_of_that_item() {
        let bill = bill(
            vec![
                equal_item("Steak", 2000, &["A"]),
                equal_item("Salad", 1000, &["B"]),
            ],
            Surcharge::none(),
            3000,
        );

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B", "C"]));

        assert_eq!(result.amount_for(&member("A")), Some(Money::from_cents(2000)));
        assert_eq!(result.amount_for(&member("B")), Some(Money::from_cents(1000)));
        assert_eq!(result.amount_for(&member("C")), Some(Money::ZERO));
    }

    #[test]
    fn target_total_overrides_gross_sum() {
        // User confirmed a $15.00 total against $10.00 of gross shares; the
        // gross proportion carries onto the target. (Discounts reach the
        // engine only through the lowered target.) Both scaled shares land
        // on midpoints, round up, and the extra cent comes back from the
        // largest payer.
        let bill = bill(
            vec![
                equal_item("Entree", 667, &["A"]),
                equal_item("Side", 333, &["B"]),
            ],
            Surcharge::none(),
            1500,
        );

        let result = AllocationEngine::allocate_default(&bill, &roster(&["A", "B"]));

        assert_eq!(result.amount_for(&member("A")), Some(Money::from_cents(1000)));
        assert_eq!(result.amount_for(&member("B")), Some(Money::from_cents(500)));
        assert_eq!(result.total(), Money::from_cents(1500));
    }

    #[rstest]
    #[case::empty_roster(&[], 0)]
    #[case::single_member(&["A"], 1)]
    fn degenerate_rosters_are_handled(#[case] ids: &[&str], #[case] expected_len: usize) {
        let bill = bill(vec![], Surcharge::none(), 0);
        let result = AllocationEngine::allocate_default(&bill, &roster(ids));

        assert_eq!(result.entries().len(), expected_len);
        assert_eq!(result.total(), Money::ZERO);
    }

    #[test]
    fn identical_inputs_yield_identical_output() {
        let bill = bill(
            vec![equal_item("Shared", 1001, &["A", "B", "C"])],
            Surcharge::new(Money::from_cents(77), roster(&["B", "C"])),
            1078,
        );
        let members = roster(&["A", "B", "C"]);

        let first = AllocationEngine::allocate_default(&bill, &members);
        let second = AllocationEngine::allocate_default(&bill, &members);

        assert_eq!(first, second);
    }
}
