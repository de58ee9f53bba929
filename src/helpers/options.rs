//! Fixed option lists used by dealer credit and control screens

use serde::Serialize;

/// Wire shape of one option: `{"key": 1, "label": "Daily"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionItem {
    pub key: u8,
    pub label: &'static str,
}

/// Credit limit renewal period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "OptionItem")]
pub enum CreditRange {
    Daily,
    Weekly,
    Monthly,
    Indefinite,
}

impl CreditRange {
    pub fn all() -> [Self; 4] {
        [Self::Daily, Self::Weekly, Self::Monthly, Self::Indefinite]
    }

    /// Backend key
    pub fn key(&self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
            Self::Indefinite => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Indefinite => "Indefinite",
        }
    }
}

impl From<CreditRange> for OptionItem {
    fn from(range: CreditRange) -> Self {
        Self {
            key: range.key(),
            label: range.label(),
        }
    }
}

/// Control check period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "OptionItem")]
pub enum ControlTime {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Indefinite,
}

impl ControlTime {
    pub fn all() -> [Self; 5] {
        [
            Self::Daily,
            Self::Weekly,
            Self::Monthly,
            Self::Yearly,
            Self::Indefinite,
        ]
    }

    /// Backend key
    pub fn key(&self) -> u8 {
        match self {
            Self::Daily => 1,
            Self::Weekly => 2,
            Self::Monthly => 3,
            Self::Yearly => 4,
            Self::Indefinite => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
            Self::Indefinite => "Indefinite",
        }
    }
}

impl From<ControlTime> for OptionItem {
    fn from(time: ControlTime) -> Self {
        Self {
            key: time.key(),
            label: time.label(),
        }
    }
}
