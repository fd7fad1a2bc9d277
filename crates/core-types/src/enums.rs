use serde::{Deserialize, Serialize};
use std::fmt;

/// How simulated entry and exit prices are chosen from the monthly aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// Enter at the first day's open of the anchor month, exit at the last
    /// day's close of the target month. The exit lands one calendar month
    /// further out than the nominal holding period.
    #[serde(rename = "openClose")]
    OpenClose,
    /// Enter and exit at each month's maximum close.
    #[serde(rename = "maxMax")]
    MaxMax,
}

impl CalculationMethod {
    /// The number of calendar months actually spanned by a simulated trade.
    pub fn actual_holding_months(&self, period: HoldingPeriod) -> u32 {
        match self {
            CalculationMethod::OpenClose => period.months() + 1,
            CalculationMethod::MaxMax => period.months(),
        }
    }
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMethod::OpenClose => write!(f, "openClose"),
            CalculationMethod::MaxMax => write!(f, "maxMax"),
        }
    }
}

/// Whether a computed return is filed under its entry month ("when to buy")
/// or its exit month ("when you'd have sold").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Entry,
    Exit,
}

/// The supported nominal holding-period lengths, in months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum HoldingPeriod {
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl HoldingPeriod {
    pub const ALL: [HoldingPeriod; 4] = [
        HoldingPeriod::OneMonth,
        HoldingPeriod::ThreeMonths,
        HoldingPeriod::SixMonths,
        HoldingPeriod::TwelveMonths,
    ];

    pub fn months(&self) -> u32 {
        match self {
            HoldingPeriod::OneMonth => 1,
            HoldingPeriod::ThreeMonths => 3,
            HoldingPeriod::SixMonths => 6,
            HoldingPeriod::TwelveMonths => 12,
        }
    }
}

impl TryFrom<u32> for HoldingPeriod {
    type Error = crate::CoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HoldingPeriod::OneMonth),
            3 => Ok(HoldingPeriod::ThreeMonths),
            6 => Ok(HoldingPeriod::SixMonths),
            12 => Ok(HoldingPeriod::TwelveMonths),
            other => Err(crate::CoreError::InvalidInput(
                "holding_period".to_string(),
                format!("{} is not one of 1, 3, 6, 12", other),
            )),
        }
    }
}

impl From<HoldingPeriod> for u32 {
    fn from(period: HoldingPeriod) -> u32 {
        period.months()
    }
}

impl fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.months())
    }
}

/// How far a single month's best year deviates from the rest of its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierSeverity {
    Severe,
    High,
    Moderate,
    None,
}
