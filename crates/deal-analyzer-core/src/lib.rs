pub mod error;
pub mod math;
pub mod time_value;
pub mod types;

#[cfg(feature = "deal_analysis")]
pub mod deal_analysis;

#[cfg(feature = "scenarios")]
pub mod scenarios;

pub use error::DealAnalyzerError;
pub use types::*;

/// Standard result type for all deal-analyzer operations
pub type DealAnalyzerResult<T> = Result<T, DealAnalyzerError>;
