use tabsplit_domain::Money;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FinalizeError {
    #[error("Cannot finalize a split with no members")]
    EmptyRoster,
    #[error("Payer '{0}' is not in the member roster")]
    UnknownPayer(String),
    #[error(
        "Sharing configuration references item index {index} but the receipt has {item_count} items"
    )]
    ItemIndexOutOfBounds { index: usize, item_count: usize },
    #[error(
        "Stated total {stated} does not match items + tax + charges - discount ({computed})"
    )]
    TotalMismatch { stated: Money, computed: Money },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Receipt extraction service failed: {0}")]
    Service(String),
    #[error("Unsupported receipt image type: {0}")]
    UnsupportedImageType(String),
    #[error("Extraction response could not be parsed: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger rejected the expense: {0}")]
    Rejected(String),
    #[error("Ledger request failed: {0}")]
    Transport(String),
}
