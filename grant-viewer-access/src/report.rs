use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

use crate::error::Error;
use crate::executor::{GrantSummary, Mode};

pub const RULE: &str = "================================================================================";
pub const ERROR_LOG: &str = "grant-access-errors.log";
const ERROR_SAMPLE: usize = 10;

pub fn render_summary(summary: &GrantSummary, total: usize, mode: Mode, elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    let throughput = if secs > 0.0 { total as f64 / secs } else { 0.0 };

    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(
        out,
        "Completed in {:.1} minutes ({throughput:.1} projects/sec)",
        secs / 60.0
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  ✓ Successfully granted: {}", summary.granted);
    let _ = writeln!(out, "  → Already had access: {}", summary.already_granted);
    if !mode.writes() {
        let _ = writeln!(out, "  ? Would grant: {}", summary.would_grant);
    }
    let _ = writeln!(out, "  ✗ Failed: {}", summary.failed);
    let _ = writeln!(out, "{RULE}");
    out
}

pub fn render_errors(errors: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} errors occurred. First {ERROR_SAMPLE}:", errors.len());
    for error in errors.iter().take(ERROR_SAMPLE) {
        let _ = writeln!(out, "  - {error}");
    }
    out
}

/// Appends one line per error, creating the log if needed.
pub async fn append_error_log(path: &Path, errors: &[String]) -> Result<(), Error> {
    let write = async {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        let content = errors.iter().fold(String::new(), |mut out, e| {
            out.push_str(e);
            out.push('\n');
            out
        });
        file.write_all(content.as_bytes()).await?;
        file.flush().await
    };
    write.await.map_err(|source| Error::WriteLog {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_summary() {
        let summary = GrantSummary {
            granted: 7,
            already_granted: 2,
            would_grant: 0,
            failed: 1,
            errors: vec!["Project: p - boom".to_string()],
        };
        let out = render_summary(&summary, 10, Mode::Apply, Duration::from_secs(30));
        assert!(out.contains("Completed in 0.5 minutes (0.3 projects/sec)"));
        assert!(out.contains("  ✓ Successfully granted: 7"));
        assert!(out.contains("  → Already had access: 2"));
        assert!(out.contains("  ✗ Failed: 1"));
        assert!(!out.contains("Would grant"));

        let out = render_summary(&GrantSummary::default(), 0, Mode::DryRun, Duration::ZERO);
        assert!(out.contains("  ? Would grant: 0"));
    }

    #[test]
    fn test_render_errors_shows_first_ten() {
        let errors: Vec<String> = (0..12).map(|i| format!("Project: p{i} - denied")).collect();
        let out = render_errors(&errors);
        assert!(out.contains("12 errors occurred. First 10:"));
        assert!(out.contains("  - Project: p9 - denied"));
        assert!(!out.contains("p10"));
    }

    #[tokio::test]
    async fn test_append_error_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(ERROR_LOG);
        append_error_log(&path, &["Project: a - x".to_string()]).await.unwrap();
        append_error_log(&path, &["Project: b - y".to_string(), "Project: c - z".to_string()])
            .await
            .unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Project: a - x\nProject: b - y\nProject: c - z\n"
        );
    }
}
