use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use google_cloud_resourcemanager::http::projects::Project;

use crate::error::Error;
use crate::filter::Partition;

pub const RULE: &str = "================================================================================";
const DETAILED_HEADER: &str = "PROJECT_ID,PROJECT_NAME,PROJECT_NUMBER";
const EXCLUDED_SAMPLE: usize = 20;
const PREVIEW_LIMIT: usize = 50;

/// `projects.txt` becomes `projects-detailed.txt` next to it.
pub fn detailed_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match output.extension() {
        Some(ext) => format!("{stem}-detailed.{}", ext.to_string_lossy()),
        None => format!("{stem}-detailed.txt"),
    };
    output.with_file_name(file_name)
}

/// One project id per line.
pub fn render_ids(projects: &[Project]) -> String {
    projects.iter().fold(String::new(), |mut out, p| {
        out.push_str(&p.project_id);
        out.push('\n');
        out
    })
}

pub fn render_detailed(projects: &[Project]) -> String {
    let mut out = String::from(DETAILED_HEADER);
    out.push('\n');
    for p in projects {
        let name = p.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("UNNAMED");
        let number = p
            .project_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(out, "{},{},{}", p.project_id, csv_field(name), number);
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Writes the id list and the detailed listing, returning the detailed file path.
pub async fn write_outputs(output: &Path, projects: &[Project]) -> Result<PathBuf, Error> {
    tokio::fs::write(output, render_ids(projects))
        .await
        .map_err(|source| Error::Write {
            path: output.to_path_buf(),
            source,
        })?;
    let detailed = detailed_path(output);
    tokio::fs::write(&detailed, render_detailed(projects))
        .await
        .map_err(|source| Error::Write {
            path: detailed.clone(),
            source,
        })?;
    tracing::debug!("wrote {} projects to {}", projects.len(), output.display());
    Ok(detailed)
}

pub fn render_statistics(total: usize, partition: &Partition) -> String {
    let kept = partition.kept.len();
    let excluded = partition.excluded.len();
    let reduction = if total == 0 {
        0.0
    } else {
        excluded as f64 / total as f64 * 100.0
    };

    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "PROJECT FILTERING STATISTICS");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Total projects found:      {total}");
    let _ = writeln!(out, "Projects after filtering:  {kept}");
    let _ = writeln!(out, "Projects excluded:         {excluded}");
    let _ = writeln!(out, "Reduction:                 {reduction:.1}%");

    if excluded > 0 {
        let _ = writeln!(out, "\n--- Sample Excluded Projects (first {EXCLUDED_SAMPLE}) ---");
        for (i, p) in partition.excluded.iter().take(EXCLUDED_SAMPLE).enumerate() {
            let _ = writeln!(out, "  {:3}. {}", i + 1, p.project_id);
        }
        if excluded > EXCLUDED_SAMPLE {
            let _ = writeln!(out, "  ... and {} more", excluded - EXCLUDED_SAMPLE);
        }
    }
    let _ = writeln!(out, "\n{RULE}");
    out
}

pub fn render_preview(kept: &[Project]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n--- Preview of Filtered Projects (first {PREVIEW_LIMIT}) ---");
    for (i, p) in kept.iter().take(PREVIEW_LIMIT).enumerate() {
        let name = p.name.as_deref().unwrap_or_default();
        let _ = writeln!(out, "  {:4}. {:<60} [{}]", i + 1, p.project_id, name);
    }
    if kept.len() > PREVIEW_LIMIT {
        let _ = writeln!(out, "  ... and {} more", kept.len() - PREVIEW_LIMIT);
    }
    out
}

pub fn render_next_steps(output: &Path) -> String {
    let output = output.display();
    let mut out = String::new();
    let _ = writeln!(out, "\n{RULE}");
    let _ = writeln!(out, "Next Steps:");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "1. Review the project list:");
    let _ = writeln!(out, "   cat {output}");
    let _ = writeln!(out);
    let _ = writeln!(out, "2. Edit if needed (remove unwanted projects):");
    let _ = writeln!(out, "   vim {output}");
    let _ = writeln!(out);
    let _ = writeln!(out, "3. Grant access to the listed projects:");
    let _ = writeln!(out, "   grant-viewer-access --projects {output} --dry-run");
    let _ = writeln!(out, "{RULE}");
    out
}
