use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One line item as extracted from the receipt image by the AI service.
/// Prices arrive as floats; conversion to exact decimals happens when the
/// domain bill is built, with NaN collapsing to zero.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptItem {
    pub name: String,
    pub price: f64,
}

/// The structured bill record produced by the external extraction service,
/// as confirmed or overridden by the user. `total_cost` is authoritative and
/// already net of the discount.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedReceipt {
    pub items: Vec<ReceiptItem>,
    pub total_cost: f64,
    #[serde(default)]
    pub taxes: Option<f64>,
    #[serde(default)]
    pub other_charges: Option<f64>,
    #[serde(default)]
    pub discount: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Equal,
    Custom,
    Quantity,
}

/// User-edited sharing rule for a single receipt item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSplit {
    pub split_type: SplitType,
    #[serde(default)]
    pub shared_by: Vec<String>,
    #[serde(default)]
    pub quantity_assignments: HashMap<String, f64>,
}

/// The full sharing configuration: per-item rules keyed by item index, plus
/// the member sets for tax and other charges. Items without an entry are
/// treated as unshared and contribute nothing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharingConfig {
    #[serde(default)]
    pub item_splits: HashMap<usize, ItemSplit>,
    #[serde(default)]
    pub tax_shared_by: Vec<String>,
    #[serde(default)]
    pub other_charges_shared_by: Vec<String>,
}

/// One participant's line in the expense-creation payload. The ledger
/// service requires both shares as decimal strings with exactly two decimal
/// places, and the owed shares must sum to the stated cost to the cent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseShare {
    pub user_id: String,
    pub paid_share: String,
    pub owed_share: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpensePayload {
    pub description: String,
    pub cost: String,
    pub shares: Vec<ExpenseShare>,
}
