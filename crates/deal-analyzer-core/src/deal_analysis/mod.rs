pub mod analyzer;
pub mod inputs;
pub mod memo;
pub mod model;
pub mod signals;

pub use analyzer::{analyze_deal, DealAnalysis};
pub use inputs::{DealField, DealInputs};
pub use memo::DealScreen;
pub use model::{compute, compute_with_breakdown, DealBreakdown, DealMetrics};
pub use signals::{classify, DealSignals, MetricKind, Signal};
