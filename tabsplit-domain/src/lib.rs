#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Bill, ChargeableItem, GrossShares, MemberId, MemberShares, Money, SharingAssignment, Surcharge,
};
pub use services::{
    AllocationBreakdown, AllocationEngine, AllocationResult, GrossShareAccumulator, RoundingMode,
    quantity_shares,
    reconcile_to_target, scale_to_target,
};
