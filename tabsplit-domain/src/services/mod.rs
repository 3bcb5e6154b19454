pub mod allocation_engine;
pub mod gross_accumulator;
pub mod penny_reconciler;
pub mod proportional_scaler;
pub mod quantity_split;

pub use allocation_engine::{AllocationBreakdown, AllocationEngine, AllocationResult};
pub use gross_accumulator::GrossShareAccumulator;
pub use penny_reconciler::{RoundingMode, reconcile_to_target};
pub use proportional_scaler::scale_to_target;
pub use quantity_split::quantity_shares;
