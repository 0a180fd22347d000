//! Thresholds and keywords for the built-in urgent notification rules.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Upper bound for the certification warning window.
pub const MAX_WINDOW_DAYS: u32 = 365;

const fn default_window_days() -> u32 {
    5
}

fn default_deviation_keywords() -> Vec<String> {
    vec!["deviation".to_string()]
}

fn default_training_keywords() -> Vec<String> {
    vec!["training".to_string()]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NotificationConfig {
    /// Training tasks due within this many days raise a certification warning.
    #[serde(default = "default_window_days")]
    pub certification_window_days: u32,

    /// Activity types containing any of these (case-insensitive) are deviations.
    #[serde(default = "default_deviation_keywords")]
    pub deviation_keywords: Vec<String>,

    /// Activity types containing any of these (case-insensitive) are trainings.
    #[serde(default = "default_training_keywords")]
    pub training_keywords: Vec<String>,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            certification_window_days: default_window_days(),
            deviation_keywords: default_deviation_keywords(),
            training_keywords: default_training_keywords(),
        }
    }
}

impl NotificationConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the window exceeds
    /// [`MAX_WINDOW_DAYS`] or a keyword list is empty or holds a blank entry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.certification_window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::InvalidValue {
                field: "notifications.certification_window_days".into(),
                reason: format!(
                    "{} exceeds the maximum of {MAX_WINDOW_DAYS}",
                    self.certification_window_days
                ),
            });
        }
        check_keywords("notifications.deviation_keywords", &self.deviation_keywords)?;
        check_keywords("notifications.training_keywords", &self.training_keywords)
    }
}

fn check_keywords(field: &str, keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: "at least one keyword is required".into(),
        });
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::InvalidValue {
            field: field.into(),
            reason: "keywords must not be blank".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_field_dashboard() {
        let config = NotificationConfig::default();
        assert_eq!(config.certification_window_days, 5);
        assert_eq!(config.deviation_keywords, vec!["deviation"]);
        assert_eq!(config.training_keywords, vec!["training"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn oversized_window_rejected() {
        let config = NotificationConfig {
            certification_window_days: 400,
            ..NotificationConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("certification_window_days"));
    }

    #[test]
    fn blank_keyword_rejected() {
        let config = NotificationConfig {
            training_keywords: vec!["  ".into()],
            ..NotificationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
