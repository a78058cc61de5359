use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::model::DealMetrics;

/// How a metric is read when judging it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Return percentages: >= 10 favourable, >= 5 caution
    Percentage,
    /// Cash amounts: non-negative is favourable
    Currency,
    /// Rent-to-price percentage: >= 1 favourable
    Ratio,
}

/// Screening verdict for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Favorable,
    Caution,
    Unfavorable,
}

/// Per-metric verdicts for a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealSignals {
    pub net_cfpu: Signal,
    pub cash_on_cash: Signal,
    pub cap_rate: Signal,
    pub one_percent_rule: Signal,
}

const PERCENTAGE_FAVORABLE: Decimal = dec!(10);
const PERCENTAGE_CAUTION: Decimal = dec!(5);
const RATIO_FAVORABLE: Decimal = dec!(1);

pub fn classify(value: Decimal, kind: MetricKind) -> Signal {
    match kind {
        MetricKind::Percentage if value >= PERCENTAGE_FAVORABLE => Signal::Favorable,
        MetricKind::Percentage if value >= PERCENTAGE_CAUTION => Signal::Caution,
        MetricKind::Currency if value >= Decimal::ZERO => Signal::Favorable,
        MetricKind::Ratio if value >= RATIO_FAVORABLE => Signal::Favorable,
        _ => Signal::Unfavorable,
    }
}

impl DealSignals {
    pub fn from_metrics(metrics: &DealMetrics) -> Self {
        Self {
            net_cfpu: classify(metrics.net_cfpu, MetricKind::Currency),
            cash_on_cash: classify(metrics.cash_on_cash, MetricKind::Percentage),
            cap_rate: classify(metrics.cap_rate, MetricKind::Percentage),
            one_percent_rule: classify(metrics.one_percent_rule, MetricKind::Ratio),
        }
    }
}
