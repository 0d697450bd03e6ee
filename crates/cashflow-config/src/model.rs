use serde::{Deserialize, Serialize};

/// Stores user-configurable dashboard preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_locale")]
    pub locale: String,
    #[serde(default = "Config::default_currency")]
    pub currency: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale(),
            currency: Self::default_currency(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            projection: ProjectionConfig::default(),
        }
    }
}

impl Config {
    pub fn default_locale() -> String {
        "en-US".into()
    }

    pub fn default_currency() -> String {
        "EUR".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }
}

/// Bounds applied when expanding recurrences and rendering cashflow views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Maximum number of cadence steps taken while searching for the next
    /// occurrence of a movement. Movements that need more are left out of
    /// the upcoming list.
    #[serde(default = "ProjectionConfig::default_max_recurrence_steps")]
    pub max_recurrence_steps: usize,
    /// Upcoming occurrences folded into the balance projection.
    #[serde(default = "ProjectionConfig::default_projected_occurrences")]
    pub projected_occurrences: usize,
    /// Rows shown in the past-movements table.
    #[serde(default = "ProjectionConfig::default_past_display_limit")]
    pub past_display_limit: usize,
    /// Rows shown in the upcoming table; `null` shows every occurrence.
    #[serde(default = "ProjectionConfig::default_upcoming_display_limit")]
    pub upcoming_display_limit: Option<usize>,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            max_recurrence_steps: Self::default_max_recurrence_steps(),
            projected_occurrences: Self::default_projected_occurrences(),
            past_display_limit: Self::default_past_display_limit(),
            upcoming_display_limit: Self::default_upcoming_display_limit(),
        }
    }
}

impl ProjectionConfig {
    pub fn default_max_recurrence_steps() -> usize {
        60
    }

    pub fn default_projected_occurrences() -> usize {
        6
    }

    pub fn default_past_display_limit() -> usize {
        12
    }

    pub fn default_upcoming_display_limit() -> Option<usize> {
        Some(12)
    }
}
