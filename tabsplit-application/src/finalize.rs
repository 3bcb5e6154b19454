use rust_decimal::{Decimal, prelude::FromPrimitive};
use serde::Deserialize;
use tabsplit_domain::{
    AllocationEngine, AllocationResult, Bill, ChargeableItem, MemberId, Money, RoundingMode,
    SharingAssignment, Surcharge,
};

use crate::{
    error::FinalizeError,
    model::{ExpensePayload, ExpenseShare, ExtractedReceipt, ItemSplit, SharingConfig, SplitType},
    review::{CalculationWarning, calculation_warning, check_total_coherence},
};

/// Everything the finalize step needs: the confirmed receipt, the sharing
/// configuration, the participant roster, and who actually paid.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    pub members: Vec<String>,
    pub payer: String,
    pub receipt: ExtractedReceipt,
    pub sharing: SharingConfig,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedSplit {
    pub allocation: AllocationResult,
    pub warning: Option<CalculationWarning>,
    pub payload: ExpensePayload,
}

/// Turns a confirmed receipt plus sharing configuration into a finalized,
/// penny-exact split and the expense payload for the ledger service.
pub struct SplitFinalizer;

impl SplitFinalizer {
    pub fn finalize(request: &SplitRequest) -> Result<FinalizedSplit, FinalizeError> {
        Self::finalize_with_mode(request, RoundingMode::default())
    }

    pub fn finalize_with_mode(
        request: &SplitRequest,
        mode: RoundingMode,
    ) -> Result<FinalizedSplit, FinalizeError> {
        if request.members.is_empty() {
            return Err(FinalizeError::EmptyRoster);
        }
        if !request.members.contains(&request.payer) {
            return Err(FinalizeError::UnknownPayer(request.payer.clone()));
        }
        let item_count = request.receipt.items.len();
        if let Some(&index) = request
            .sharing
            .item_splits
            .keys()
            .find(|&&index| index >= item_count)
        {
            return Err(FinalizeError::ItemIndexOutOfBounds { index, item_count });
        }
        check_total_coherence(&request.receipt)?;

        let roster: Vec<MemberId> = request
            .members
            .iter()
            .map(|id| MemberId::new(id.clone()))
            .collect();
        let bill = build_bill(&request.receipt, &request.sharing, &roster);

        let breakdown = AllocationEngine::allocate_with_breakdown(&bill, &roster, mode);
        let warning = calculation_warning(&breakdown.scaled, bill.target_total, mode);
        let allocation = breakdown.result;

        let payload = build_payload(request, &allocation, bill.target_total);
        tracing::debug!(
            member_count = allocation.entries().len(),
            total = %bill.target_total,
            warned = warning.is_some(),
            "Split finalized"
        );

        Ok(FinalizedSplit {
            allocation,
            warning,
            payload,
        })
    }
}

fn build_bill(receipt: &ExtractedReceipt, sharing: &SharingConfig, roster: &[MemberId]) -> Bill {
    let items = receipt
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| ChargeableItem {
            name: item.name.clone(),
            price: Money::from_f64_lossy(item.price),
            sharing: sharing
                .item_splits
                .get(&index)
                .map(|split| build_assignment(split, roster))
                .unwrap_or(SharingAssignment::Equal {
                    shared_by: Vec::new(),
                }),
        })
        .collect();

    Bill {
        items,
        tax: Surcharge::new(
            Money::from_f64_lossy(receipt.taxes.unwrap_or_default()),
            member_ids(&sharing.tax_shared_by),
        ),
        other_charges: Surcharge::new(
            Money::from_f64_lossy(receipt.other_charges.unwrap_or_default()),
            member_ids(&sharing.other_charges_shared_by),
        ),
        target_total: Money::from_f64_lossy(receipt.total_cost),
    }
}

fn build_assignment(split: &ItemSplit, roster: &[MemberId]) -> SharingAssignment {
    match split.split_type {
        SplitType::Equal => SharingAssignment::Equal {
            shared_by: member_ids(&split.shared_by),
        },
        SplitType::Custom => SharingAssignment::Custom {
            shared_by: member_ids(&split.shared_by),
        },
        SplitType::Quantity => {
            // Hash-map iteration order is arbitrary; fix it to roster order
            // (then lexicographic for anyone outside the roster) so the
            // quantity stage stays deterministic.
            let mut assignments: Vec<(MemberId, Decimal)> = Vec::new();
            for member in roster {
                if let Some(&units) = split.quantity_assignments.get(member.as_str()) {
                    assignments.push((member.clone(), units_to_decimal(units)));
                }
            }
            let mut extras: Vec<(&String, &f64)> = split
                .quantity_assignments
                .iter()
                .filter(|(id, _)| !roster.iter().any(|member| member.as_str() == id.as_str()))
                .collect();
            extras.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (id, &units) in extras {
                assignments.push((MemberId::new(id.clone()), units_to_decimal(units)));
            }

            // The fallback for an unassigned quantity item is the item's
            // configured member set, or whoever has an entry when that set
            // was never filled in.
            let fallback = if split.shared_by.is_empty() {
                assignments.iter().map(|(member, _)| member.clone()).collect()
            } else {
                member_ids(&split.shared_by)
            };

            SharingAssignment::Quantity {
                assignments,
                fallback,
            }
        }
    }
}

fn units_to_decimal(units: f64) -> Decimal {
    Decimal::from_f64(units).unwrap_or(Decimal::ZERO)
}

fn member_ids(ids: &[String]) -> Vec<MemberId> {
    ids.iter().map(|id| MemberId::new(id.clone())).collect()
}

fn build_payload(
    request: &SplitRequest,
    allocation: &AllocationResult,
    total: Money,
) -> ExpensePayload {
    let shares = allocation
        .entries()
        .iter()
        .map(|(member, amount)| ExpenseShare {
            user_id: member.as_str().to_owned(),
            paid_share: if member.as_str() == request.payer {
                total.to_string()
            } else {
                Money::ZERO.to_string()
            },
            owed_share: amount.to_string(),
        })
        .collect();

    ExpensePayload {
        description: request
            .description
            .clone()
            .unwrap_or_else(|| "Split bill".to_owned()),
        cost: total.to_string(),
        shares,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ReceiptItem;
    use std::collections::HashMap;

    fn equal_split(shared_by: &[&str]) -> ItemSplit {
        ItemSplit {
            split_type: SplitType::Equal,
            shared_by: shared_by.iter().map(|&id| id.to_owned()).collect(),
            quantity_assignments: HashMap::new(),
        }
    }

    fn request() -> SplitRequest {
        SplitRequest {
            members: vec!["A".to_owned(), "B".to_owned()],
            payer: "A".to_owned(),
            receipt: ExtractedReceipt {
                items: vec![
                    ReceiptItem {
                        name: "Burger".to_owned(),
                        price: 12.00,
                    },
                    ReceiptItem {
                        name: "Fries".to_owned(),
                        price: 4.00,
                    },
                ],
                total_cost: 17.28,
                taxes: Some(1.28),
                other_charges: None,
                discount: None,
            },
            sharing: SharingConfig {
                item_splits: HashMap::from([
                    (0, equal_split(&["A", "B"])),
                    (1, equal_split(&["A"])),
                ]),
                tax_shared_by: vec!["A".to_owned(), "B".to_owned()],
                other_charges_shared_by: Vec::new(),
            },
            description: Some("Dinner".to_owned()),
        }
    }

    #[test]
    fn finalizes_the_burger_and_fries_scenario() {
        let finalized = SplitFinalizer::finalize(&request()).expect("finalize should succeed");

        assert_eq!(
            finalized.allocation.amount_for(&MemberId::from("A")),
            Some(Money::from_cents(1064))
        );
        assert_eq!(
            finalized.allocation.amount_for(&MemberId::from("B")),
            Some(Money::from_cents(664))
        );
        assert!(finalized.warning.is_none());

        assert_eq!(finalized.payload.cost, "17.28");
        assert_eq!(
            finalized.payload.shares,
            vec![
                ExpenseShare {
                    user_id: "A".to_owned(),
                    paid_share: "17.28".to_owned(),
                    owed_share: "10.64".to_owned(),
                },
                ExpenseShare {
                    user_id: "B".to_owned(),
                    paid_share: "0.00".to_owned(),
                    owed_share: "6.64".to_owned(),
                },
            ]
        );
    }

    #[test]
    fn owed_shares_sum_to_the_stated_cost() {
        let mut request = request();
        request.receipt = ExtractedReceipt {
            items: vec![ReceiptItem {
                name: "Tasting".to_owned(),
                price: 10.01,
            }],
            total_cost: 10.01,
            taxes: None,
            other_charges: None,
            discount: None,
        };
        request.members = vec!["A".to_owned(), "B".to_owned(), "C".to_owned()];
        request.sharing = SharingConfig {
            item_splits: HashMap::from([(0, equal_split(&["A", "B", "C"]))]),
            tax_shared_by: Vec::new(),
            other_charges_shared_by: Vec::new(),
        };

        let finalized = SplitFinalizer::finalize(&request).expect("finalize should succeed");

        let owed: Vec<&str> = finalized
            .payload
            .shares
            .iter()
            .map(|share| share.owed_share.as_str())
            .collect();
        assert_eq!(owed, vec!["3.33", "3.34", "3.34"]);
        assert_eq!(finalized.allocation.total(), Money::from_cents(1001));
    }

    #[test]
    fn unknown_payer_is_rejected() {
        let mut request = request();
        request.payer = "Z".to_owned();

        assert_eq!(
            SplitFinalizer::finalize(&request),
            Err(FinalizeError::UnknownPayer("Z".to_owned()))
        );
    }

    #[test]
    fn empty_roster_is_rejected() {
        let mut request = request();
        request.members.clear();

        assert_eq!(
            SplitFinalizer::finalize(&request),
            Err(FinalizeError::EmptyRoster)
        );
    }

    #[test]
    fn out_of_bounds_item_index_is_rejected() {
        let mut request = request();
        request
            .sharing
            .item_splits
            .insert(9, equal_split(&["A"]));

        assert_eq!(
            SplitFinalizer::finalize(&request),
            Err(FinalizeError::ItemIndexOutOfBounds {
                index: 9,
                item_count: 2
            })
        );
    }

    #[test]
    fn incoherent_receipt_blocks_finalizing() {
        let mut request = request();
        request.receipt.total_cost = 25.00;

        assert!(matches!(
            SplitFinalizer::finalize(&request),
            Err(FinalizeError::TotalMismatch { .. })
        ));
    }

    #[test]
    fn quantity_split_request_round_trips_through_json() {
        let json = r#"{
            "members": ["A", "B", "C"],
            "payer": "B",
            "receipt": {
                "items": [{"name": "Pitcher", "price": 9.00}],
                "totalCost": 9.00
            },
            "sharing": {
                "itemSplits": {
                    "0": {
                        "splitType": "quantity",
                        "sharedBy": ["A", "B", "C"],
                        "quantityAssignments": {"A": 2.0, "B": 1.0}
                    }
                }
            }
        }"#;

        let request: SplitRequest = serde_json::from_str(json).expect("request should parse");
        let finalized = SplitFinalizer::finalize(&request).expect("finalize should succeed");

        assert_eq!(
            finalized.allocation.amount_for(&MemberId::from("A")),
            Some(Money::from_cents(600))
        );
        assert_eq!(
            finalized.allocation.amount_for(&MemberId::from("B")),
            Some(Money::from_cents(300))
        );
        assert_eq!(
            finalized.allocation.amount_for(&MemberId::from("C")),
            Some(Money::ZERO)
        );
    }
}
