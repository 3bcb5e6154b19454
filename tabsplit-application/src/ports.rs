use std::collections::HashMap;

use crate::{
    error::{ExtractError, LedgerError},
    model::{ExpensePayload, ExtractedReceipt},
};

pub struct ReceiptImage<'a> {
    pub bytes: &'a [u8],
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
}

/// External AI service turning a receipt photo into a structured bill.
pub trait ReceiptExtractor: Send + Sync {
    fn extract(&self, image: &ReceiptImage<'_>) -> Result<ExtractedReceipt, ExtractError>;
}

/// Third-party expense-sharing ledger the finalized split is submitted to.
pub trait ExpenseLedger: Send + Sync {
    fn create_expense(&self, payload: &ExpensePayload) -> Result<(), LedgerError>;
}

pub trait MemberDirectory: Send + Sync {
    fn display_name(&self, member_id: &str) -> Option<&str>;
}

impl MemberDirectory for HashMap<String, String> {
    fn display_name(&self, member_id: &str) -> Option<&str> {
        self.get(member_id).map(String::as_str)
    }
}
