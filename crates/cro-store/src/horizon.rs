//! Horizon classification.

use chrono::NaiveDate;
use cro_core::entities::Task;
use cro_core::enums::{Horizon, HorizonPolicy};

/// Horizon of `task` under `policy`.
///
/// `Scheduled` puts completed tasks in `Past`, tasks scheduled after `today`
/// in `Upcoming`, and everything else (due today or overdue) in `Current`.
/// Either policy assigns exactly one horizon per task.
#[must_use]
pub fn classify(task: &Task, policy: HorizonPolicy, today: NaiveDate) -> Horizon {
    match policy {
        HorizonPolicy::Assigned => task.horizon,
        HorizonPolicy::Scheduled => {
            if task.status.is_terminal() {
                Horizon::Past
            } else if task.scheduled_date > today {
                Horizon::Upcoming
            } else {
                Horizon::Current
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::task_on;
    use cro_core::enums::{Outcome, TaskStatus};
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 3).unwrap()
    }

    #[test]
    fn assigned_policy_reads_stored_horizon() {
        let task = task_on("2030-01-01", TaskStatus::Pending, Horizon::Past);
        assert_eq!(classify(&task, HorizonPolicy::Assigned, today()), Horizon::Past);
    }

    #[rstest]
    #[case("2025-01-02", TaskStatus::InProgress, Horizon::Current)]
    #[case("2025-01-03", TaskStatus::Started, Horizon::Current)]
    #[case("2025-01-05", TaskStatus::Pending, Horizon::Upcoming)]
    #[case("2025-01-07", TaskStatus::NotStarted, Horizon::Upcoming)]
    fn scheduled_policy_uses_date(
        #[case] date: &str,
        #[case] status: TaskStatus,
        #[case] expected: Horizon,
    ) {
        let task = task_on(date, status, Horizon::Current);
        assert_eq!(classify(&task, HorizonPolicy::Scheduled, today()), expected);
    }

    #[test]
    fn scheduled_policy_puts_completed_in_past() {
        let mut task = task_on("2025-01-10", TaskStatus::Completed, Horizon::Upcoming);
        task.outcome = Some(Outcome::Passed);
        assert_eq!(classify(&task, HorizonPolicy::Scheduled, today()), Horizon::Past);
    }
}
