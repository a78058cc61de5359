use rust_decimal::Decimal;
use tracing::{debug, trace};

use crate::DealAnalyzerResult;

use super::inputs::{DealField, DealInputs};
use super::model::{compute, DealMetrics};

/// An editable deal whose metrics are recomputed only when its inputs change.
///
/// Mirrors a form bound to a single inputs struct: callers edit fields one at
/// a time and read the metrics back. Edits that leave the inputs structurally
/// equal keep the cached metrics.
#[derive(Debug, Clone)]
pub struct DealScreen {
    inputs: DealInputs,
    metrics: DealMetrics,
    recompute_count: u64,
}

impl DealScreen {
    pub fn new(inputs: DealInputs) -> Self {
        let metrics = compute(&inputs);
        Self {
            inputs,
            metrics,
            recompute_count: 1,
        }
    }

    pub fn inputs(&self) -> &DealInputs {
        &self.inputs
    }

    pub fn metrics(&self) -> &DealMetrics {
        &self.metrics
    }

    /// Number of times the metrics have been derived, including construction.
    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    /// Apply an edit to the inputs. Returns `true` if the metrics were recomputed.
    pub fn update<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut DealInputs),
    {
        let mut next = self.inputs.clone();
        edit(&mut next);
        self.replace(next)
    }

    /// Set one numeric field. Returns `true` if the metrics were recomputed.
    pub fn set(&mut self, field: DealField, value: Decimal) -> DealAnalyzerResult<bool> {
        let mut next = self.inputs.clone();
        next.set(field, value)?;
        Ok(self.replace(next))
    }

    /// Swap in a whole new set of inputs. Returns `true` if the metrics were recomputed.
    pub fn replace(&mut self, inputs: DealInputs) -> bool {
        if inputs == self.inputs {
            trace!("deal inputs unchanged, keeping cached metrics");
            return false;
        }
        self.inputs = inputs;
        self.metrics = compute(&self.inputs);
        self.recompute_count += 1;
        debug!(recompute_count = self.recompute_count, "deal metrics recomputed");
        true
    }
}

impl Default for DealScreen {
    fn default() -> Self {
        Self::new(DealInputs::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_screen_uses_seed() {
        let screen = DealScreen::default();
        assert_eq!(screen.inputs(), &DealInputs::default());
        assert_eq!(screen.metrics().monthly_income, dec!(2200));
        assert_eq!(screen.recompute_count(), 1);
    }

    #[test]
    fn test_noop_edit_keeps_cache() {
        let mut screen = DealScreen::default();
        assert!(!screen.update(|i| i.monthly_rent = dec!(2200)));
        assert!(!screen.set(DealField::Hoa, dec!(25)).unwrap());
        assert_eq!(screen.recompute_count(), 1);
    }

    #[test]
    fn test_edit_recomputes() {
        let mut screen = DealScreen::default();
        assert!(screen.set(DealField::MonthlyRent, dec!(2500)).unwrap());
        assert_eq!(screen.metrics().monthly_income, dec!(2500));
        assert_eq!(screen.metrics(), &compute(screen.inputs()));
        assert_eq!(screen.recompute_count(), 2);
    }

    #[test]
    fn test_non_numeric_edits_recompute() {
        let mut screen = DealScreen::default();
        assert!(screen.update(|i| i.pmi_enabled = false));
        assert!(screen.update(|i| i.address = "12 Elm St".into()));
        assert_eq!(screen.recompute_count(), 3);
    }

    #[test]
    fn test_rejected_edit_leaves_state() {
        let mut screen = DealScreen::default();
        assert!(screen.set(DealField::NumUnits, dec!(2.5)).is_err());
        assert_eq!(screen.inputs().num_units, 4);
        assert_eq!(screen.recompute_count(), 1);
    }
}
