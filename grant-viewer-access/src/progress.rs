use std::time::{Duration, Instant};

use crate::executor::{Outcome, TaskResult};

pub fn icon(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Granted => "✓",
        Outcome::AlreadyGranted => "→",
        Outcome::WouldGrant => "?",
        Outcome::Failed(_) => "✗",
    }
}

/// Progress lines for every tenth completion and for every write or failure.
pub struct Progress {
    total: usize,
    started: Instant,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            started: Instant::now(),
        }
    }

    pub fn line(&self, result: &TaskResult, completed: usize, role: &str) -> Option<String> {
        self.render(result, completed, role, self.started.elapsed())
    }

    fn render(&self, result: &TaskResult, completed: usize, role: &str, elapsed: Duration) -> Option<String> {
        let notable = matches!(result.outcome, Outcome::Granted | Outcome::Failed(_));
        if completed % 10 != 0 && !notable {
            return None;
        }
        let secs = elapsed.as_secs_f64();
        let rate = if secs > 0.0 { completed as f64 / secs } else { 0.0 };
        let remaining = if rate > 0.0 {
            self.total.saturating_sub(completed) as f64 / rate
        } else {
            0.0
        };
        Some(format!(
            "{} [{}/{}] {}: {} | Rate: {:.1}/sec | ETA: {:.1} min",
            icon(&result.outcome),
            completed,
            self.total,
            result.project_id,
            result.message(role),
            rate,
            remaining / 60.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(outcome: Outcome) -> TaskResult {
        TaskResult {
            project_id: "proj-a".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_quiet_outcomes_print_every_tenth() {
        let progress = Progress::new(100);
        let elapsed = Duration::from_secs(2);
        for outcome in [Outcome::AlreadyGranted, Outcome::WouldGrant] {
            assert!(progress.render(&result(outcome.clone()), 9, "roles/viewer", elapsed).is_none());
            assert!(progress.render(&result(outcome), 10, "roles/viewer", elapsed).is_some());
        }
    }

    #[test]
    fn test_grants_and_failures_always_print() {
        let progress = Progress::new(100);
        let line = progress
            .render(&result(Outcome::Granted), 3, "roles/viewer", Duration::from_secs(1))
            .unwrap();
        assert!(line.starts_with("✓ [3/100] proj-a: Successfully granted roles/viewer"));
        let line = progress
            .render(&result(Outcome::Failed("denied".to_string())), 7, "roles/viewer", Duration::from_secs(1))
            .unwrap();
        assert!(line.starts_with("✗ [7/100] proj-a: denied"));
    }

    #[test]
    fn test_rate_and_eta() {
        let progress = Progress::new(1000);
        let line = progress
            .render(&result(Outcome::AlreadyGranted), 400, "roles/viewer", Duration::from_secs(20))
            .unwrap();
        // 20/sec, 600 left
        assert!(line.ends_with("| Rate: 20.0/sec | ETA: 0.5 min"), "{line}");
    }

    #[test]
    fn test_zero_elapsed() {
        let progress = Progress::new(10);
        let line = progress
            .render(&result(Outcome::Granted), 1, "roles/viewer", Duration::ZERO)
            .unwrap();
        assert!(line.ends_with("| Rate: 0.0/sec | ETA: 0.0 min"), "{line}");
    }
}
