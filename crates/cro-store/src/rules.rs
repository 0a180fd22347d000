//! Urgent notification rules.
//!
//! A rule is a pure function of the current task set and today's date. The
//! store re-runs every registered rule on each `urgent_notifications` call,
//! so a notification disappears as soon as the condition behind it clears.

use std::sync::Arc;

use chrono::NaiveDate;
use cro_config::NotificationConfig;
use cro_core::entities::{Notification, Task};
use cro_core::enums::Severity;

/// Inspects tasks and emits zero or more notifications.
pub trait NotificationRule: Send + Sync {
    /// Stable rule name, copied into every notification it produces.
    fn name(&self) -> &str;

    fn evaluate(&self, tasks: &[Task], today: NaiveDate) -> Vec<Notification>;
}

fn matches_any(activity_type: &str, keywords: &[String]) -> bool {
    let activity = activity_type.to_lowercase();
    keywords
        .iter()
        .any(|keyword| activity.contains(&keyword.to_lowercase()))
}

/// Flags open tasks whose activity type names a protocol deviation.
#[derive(Debug, Clone)]
pub struct DeviationReported {
    keywords: Vec<String>,
}

impl DeviationReported {
    pub const NAME: &'static str = "deviation_reported";

    #[must_use]
    pub const fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }
}

impl Default for DeviationReported {
    fn default() -> Self {
        Self::new(vec!["deviation".into()])
    }
}

impl NotificationRule for DeviationReported {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tasks: &[Task], _today: NaiveDate) -> Vec<Notification> {
        tasks
            .iter()
            .filter(|task| !task.status.is_terminal())
            .filter(|task| matches_any(&task.activity_type, &self.keywords))
            .map(|task| Notification {
                rule: Self::NAME.to_string(),
                severity: Severity::Critical,
                task_id: task.id.clone(),
                site: task.site.clone(),
                message: format!("Protocol deviation reported at {}", task.site),
            })
            .collect()
    }
}

/// Warns about open training tasks falling due within the window.
#[derive(Debug, Clone)]
pub struct CertificationExpiry {
    keywords: Vec<String>,
    window_days: u32,
}

impl CertificationExpiry {
    pub const NAME: &'static str = "certification_expiry";

    #[must_use]
    pub const fn new(keywords: Vec<String>, window_days: u32) -> Self {
        Self {
            keywords,
            window_days,
        }
    }
}

impl Default for CertificationExpiry {
    fn default() -> Self {
        Self::new(vec!["training".into()], 5)
    }
}

fn expiry_message(days: i64, site: &str) -> String {
    match days {
        0 => format!("Staff certification expires today at {site}"),
        1 => format!("Staff certification expires in 1 day at {site}"),
        n => format!("Staff certification expires in {n} days at {site}"),
    }
}

impl NotificationRule for CertificationExpiry {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn evaluate(&self, tasks: &[Task], today: NaiveDate) -> Vec<Notification> {
        let window = i64::from(self.window_days);
        tasks
            .iter()
            .filter(|task| !task.status.is_terminal())
            .filter(|task| matches_any(&task.activity_type, &self.keywords))
            .filter_map(|task| {
                let days = (task.scheduled_date - today).num_days();
                (0..=window).contains(&days).then(|| Notification {
                    rule: Self::NAME.to_string(),
                    severity: Severity::Warning,
                    task_id: task.id.clone(),
                    site: task.site.clone(),
                    message: expiry_message(days, &task.site),
                })
            })
            .collect()
    }
}

/// The built-in rules configured from `[notifications]`.
#[must_use]
pub fn default_rules(config: &NotificationConfig) -> Vec<Arc<dyn NotificationRule>> {
    vec![
        Arc::new(DeviationReported::new(config.deviation_keywords.clone())),
        Arc::new(CertificationExpiry::new(
            config.training_keywords.clone(),
            config.certification_window_days,
        )),
    ]
}
