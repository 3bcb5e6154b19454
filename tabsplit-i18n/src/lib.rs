#![warn(clippy::uninlined_format_args)]

#[cfg(all(feature = "ja", feature = "en"))]
compile_error!("Cannot enable both 'ja' and 'en' features at the same time");

#[cfg(feature = "ja")]
pub mod strings {
    pub const MEMBER: &str = "メンバー";
    pub const OWED: &str = "負担額";
    pub const PAID: &str = "支払額";
    pub const SPLIT_HEADER: &str = "割り勘結果";
    pub const LEDGER_SHARES_HEADER: &str = "台帳送信内容";
    pub const TOTAL: &str = "合計";
    pub const CALCULATION_WARNING: &str =
        "端数処理前の合計が請求額とずれています。確定前に自動調整されます。";
    pub const TOTAL_MISMATCH: &str =
        "品目・税・手数料・割引の合計が請求額と一致しません。金額を確認してください。";
    pub const UNKNOWN_PAYER: &str = "支払者がメンバーに含まれていません";
    pub const FINALIZE_FAILED: &str = "割り勘の確定に失敗しました";
}

#[cfg(feature = "en")]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const OWED: &str = "Owes";
    pub const PAID: &str = "Paid";
    pub const SPLIT_HEADER: &str = "Split result";
    pub const LEDGER_SHARES_HEADER: &str = "Ledger shares";
    pub const TOTAL: &str = "Total";
    pub const CALCULATION_WARNING: &str =
        "Rounded shares drift from the bill total; they will be auto-adjusted before finalizing.";
    pub const TOTAL_MISMATCH: &str =
        "Items, tax, fees, and discount do not add up to the bill total. Check the figures.";
    pub const UNKNOWN_PAYER: &str = "The payer is not in the member roster";
    pub const FINALIZE_FAILED: &str = "Failed to finalize the split";
}

#[cfg(not(any(feature = "ja", feature = "en")))]
pub mod strings {
    pub const MEMBER: &str = "Member";
    pub const OWED: &str = "Owes";
    pub const PAID: &str = "Paid";
    pub const SPLIT_HEADER: &str = "Split result";
    pub const LEDGER_SHARES_HEADER: &str = "Ledger shares";
    pub const TOTAL: &str = "Total";
    pub const CALCULATION_WARNING: &str =
        "Rounded shares drift from the bill total; they will be auto-adjusted before finalizing.";
    pub const TOTAL_MISMATCH: &str =
        "Items, tax, fees, and discount do not add up to the bill total. Check the figures.";
    pub const UNKNOWN_PAYER: &str = "The payer is not in the member roster";
    pub const FINALIZE_FAILED: &str = "Failed to finalize the split";
}

pub use strings::*;

#[cfg(feature = "ja")]
pub fn calculation_warning_detail(drift: impl std::fmt::Display) -> String {
    format!("{CALCULATION_WARNING}(差分: {drift})")
}

#[cfg(not(feature = "ja"))]
pub fn calculation_warning_detail(drift: impl std::fmt::Display) -> String {
    format!("{CALCULATION_WARNING} (drift: {drift})")
}
