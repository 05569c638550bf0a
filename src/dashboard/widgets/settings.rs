use serde::{Deserialize, Serialize};

/// Reporting window used by stat cards and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    Quarter,
}

impl Default for Period {
    fn default() -> Self {
        Self::Today
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSettings {
    #[serde(default)]
    pub period: Period,
    #[serde(default = "default_true")]
    pub show_trend: bool,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            period: Period::default(),
            show_trend: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSettings {
    #[serde(default = "default_chart_period")]
    pub period: Period,
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            period: default_chart_period(),
            show_legend: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for TableSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

/// Lists, feeds and calendars only need an item limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSettings {
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_chart_period() -> Period {
    Period::Week
}

fn default_page_size() -> u32 {
    5
}

fn default_limit() -> u32 {
    10
}
