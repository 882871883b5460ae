pub mod fee;
pub mod summary;

pub use fee::{Fee, FeeChanges, FeeStatus, FeeType, NewFee};
pub use summary::StudentFeeSummary;
