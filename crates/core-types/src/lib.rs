pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CalculationMethod, HoldingPeriod, OutlierSeverity, ViewMode};
pub use error::CoreError;
pub use structs::{MonthAggregate, MonthlyPriceRecord, OutlierInfo, ReturnCell, ScreenerRow};
