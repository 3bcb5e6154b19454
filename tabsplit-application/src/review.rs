//! Pre-finalize diagnostics.
//!
//! Two checks run before an allocation is accepted: the stated receipt total
//! must cohere with its own decomposition, and the naively-rounded shares
//! are compared against the target to surface a calculation warning. The
//! warning is a pre-reconciliation diagnostic only; the penny reconciler
//! always eliminates the drift on final output.

use rust_decimal::Decimal;
use tabsplit_domain::{MemberShares, Money, RoundingMode};

use crate::{error::FinalizeError, model::ExtractedReceipt};

/// Drift beyond this between the naively-rounded share sum and the target
/// is surfaced to the user (1.5 cents).
const CALCULATION_WARNING_TOLERANCE: Decimal = Decimal::from_parts(15, 0, 0, false, 3);

/// Stated total may deviate from items + tax + charges - discount by at most
/// one cent before finalizing is blocked.
const TOTAL_COHERENCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

#[derive(Debug, Clone, PartialEq)]
pub struct CalculationWarning {
    pub unreconciled_sum: Money,
    pub target: Money,
    pub drift: Money,
}

/// Checks whether rounding the scaled shares independently would miss the
/// target by more than the warning tolerance. Returns `None` when the drift
/// is within tolerance.
pub fn calculation_warning(
    scaled: &MemberShares,
    target: Money,
    mode: RoundingMode,
) -> Option<CalculationWarning> {
    let strategy = mode.strategy();
    let unreconciled_sum: Money = scaled
        .values()
        .map(|share| share.round_to_cents(strategy))
        .sum();
    let drift = unreconciled_sum - target;

    if drift.abs().as_decimal() > CALCULATION_WARNING_TOLERANCE {
        tracing::debug!(
            %unreconciled_sum,
            %target,
            %drift,
            "Unreconciled share sum drifts past the warning tolerance"
        );
        return Some(CalculationWarning {
            unreconciled_sum,
            target,
            drift,
        });
    }

    None
}

/// Verifies the stated total against the receipt's own decomposition:
/// items + taxes + other charges - discount. A mismatch beyond one cent
/// blocks finalizing until the user adjusts the figures.
pub fn check_total_coherence(receipt: &ExtractedReceipt) -> Result<(), FinalizeError> {
    let items: Money = receipt
        .items
        .iter()
        .map(|item| Money::from_f64_lossy(item.price))
        .sum();
    let computed = items
        + Money::from_f64_lossy(receipt.taxes.unwrap_or_default())
        + Money::from_f64_lossy(receipt.other_charges.unwrap_or_default())
        - Money::from_f64_lossy(receipt.discount.unwrap_or_default());
    let stated = Money::from_f64_lossy(receipt.total_cost);

    if (stated - computed).abs().as_decimal() > TOTAL_COHERENCE_TOLERANCE {
        return Err(FinalizeError::TotalMismatch { stated, computed });
    }

    Ok(())
}
