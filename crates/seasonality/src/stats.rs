use crate::rounding::round2;
use core_types::{OutlierInfo, OutlierSeverity};
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Robustness statistics for one calendar month's yearly return series.
///
/// Shared by the heatmap display and the screener thresholds, so both views
/// always agree on what the "robust average" and "outlier" of a month are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthStats {
    /// Calendar month, 1-12.
    pub month: u32,
    pub trimmed_mean: Decimal,
    pub outlier: OutlierInfo,
}

/// Derives trimmed mean and outlier info for every month with data.
pub fn monthly_stats(yearly: &BTreeMap<u32, Vec<(i32, Decimal)>>) -> Vec<MonthStats> {
    yearly
        .iter()
        .map(|(&month, series)| {
            let values: Vec<Decimal> = series.iter().map(|(_, v)| *v).collect();
            MonthStats {
                month,
                trimmed_mean: trimmed_mean(&values),
                outlier: detect_outlier(series),
            }
        })
        .collect()
}

/// The robust average of a yearly return series, rounded to 2 decimals.
///
/// With fewer than 5 samples there is not enough data to discard 4 points
/// safely, so the plain mean is used. Otherwise the 2 smallest and 2 largest
/// observations are dropped before averaging. This figure is the
/// authoritative average: every user-facing display and filter threshold
/// compares against it.
pub fn trimmed_mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    if values.len() < 5 {
        return round2(mean(values));
    }
    let mut sorted = values.to_vec();
    sorted.sort();
    round2(mean(&sorted[2..sorted.len() - 2]))
}

/// Flags a single year whose return distorts its month's average upward.
///
/// Needs at least 4 samples, and only positive spikes are considered. The
/// top value is compared against the series with the top 2 values removed,
/// and a flag requires clearing both a magnitude gate and a z-score gate at
/// the same time. A large value inside an already-volatile series fails the
/// z-score gate; a spike whose ratio looks modest only because the baseline
/// is high still clears the magnitude gate via the ratio branch.
pub fn detect_outlier(series: &[(i32, Decimal)]) -> OutlierInfo {
    if series.len() < 4 {
        return OutlierInfo::none();
    }

    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let (top_year, top_value) = sorted[0];
    if top_value <= Decimal::ZERO {
        return OutlierInfo::none();
    }

    let rest: Vec<Decimal> = sorted[2..].iter().map(|(_, v)| *v).collect();
    let avg_others = mean(&rest);
    let std_dev = population_std_dev(&rest, avg_others);
    let z_score = if std_dev.is_zero() {
        Decimal::ZERO
    } else {
        (top_value - avg_others) / std_dev
    };

    let (severity, multiplier) = severity_for(top_value, avg_others, z_score);

    OutlierInfo {
        has_outlier: severity != OutlierSeverity::None,
        severity,
        top_value,
        top_year,
        avg_others: round2(avg_others),
        multiplier: multiplier.map(round2),
        z_score: round2(z_score),
    }
}

/// Evaluates the severity gates, branching on the baseline level.
///
/// Ratios are only stable against a comfortably positive baseline; near or
/// below zero the absolute difference governs instead, with stricter z-score
/// requirements as the baseline degrades.
fn severity_for(
    top_value: Decimal,
    avg_others: Decimal,
    z_score: Decimal,
) -> (OutlierSeverity, Option<Decimal>) {
    let diff = top_value - avg_others;

    if avg_others > Decimal::from(5) {
        let multiplier = top_value / avg_others;
        let severity = if multiplier >= Decimal::from(10) && z_score >= Decimal::from(3) {
            OutlierSeverity::Severe
        } else if multiplier >= Decimal::from(7) && z_score >= Decimal::new(25, 1) {
            OutlierSeverity::High
        } else if multiplier >= Decimal::from(5) && z_score >= Decimal::from(2) {
            OutlierSeverity::Moderate
        } else {
            OutlierSeverity::None
        };
        (severity, Some(multiplier))
    } else if avg_others > Decimal::ZERO {
        let severity = if diff >= Decimal::from(80) && z_score >= Decimal::new(35, 1) {
            OutlierSeverity::Severe
        } else if diff >= Decimal::from(60) && z_score >= Decimal::from(3) {
            OutlierSeverity::High
        } else {
            OutlierSeverity::None
        };
        (severity, None)
    } else {
        let severity = if diff >= Decimal::from(100) && z_score >= Decimal::from(4) {
            OutlierSeverity::Severe
        } else if diff >= Decimal::from(70) && z_score >= Decimal::new(35, 1) {
            OutlierSeverity::High
        } else {
            OutlierSeverity::None
        };
        (severity, None)
    }
}

fn mean(values: &[Decimal]) -> Decimal {
    values.iter().copied().sum::<Decimal>() / Decimal::from(values.len() as u64)
}

fn population_std_dev(values: &[Decimal], mean: Decimal) -> Decimal {
    let variance = values
        .iter()
        .map(|v| (*v - mean) * (*v - mean))
        .sum::<Decimal>()
        / Decimal::from(values.len() as u64);
    variance.sqrt().unwrap_or(Decimal::ZERO)
}
