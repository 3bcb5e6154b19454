#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod finalize;
pub mod model;
pub mod ports;
pub mod review;

pub use error::{ExtractError, FinalizeError, LedgerError};
pub use finalize::{FinalizedSplit, SplitFinalizer, SplitRequest};
pub use model::{
    ExpensePayload, ExpenseShare, ExtractedReceipt, ItemSplit, ReceiptItem, SharingConfig,
    SplitType,
};
pub use ports::{ExpenseLedger, MemberDirectory, ReceiptExtractor, ReceiptImage};
pub use review::{CalculationWarning, calculation_warning, check_total_coherence};
