use std::path::PathBuf;

use clap::Parser;

use crate::executor::Mode;
use crate::principal::Principal;
use crate::source::ProjectSource;

pub const DEFAULT_ROLE: &str = "roles/viewer";

const EXAMPLES: &str = "\
Examples:
  # Grant Viewer role to current authenticated user on all projects
  grant-viewer-access --all

  # Grant to specific user
  grant-viewer-access --all --user user@example.com

  # Grant to service account
  grant-viewer-access --all --service-account sa@project.iam.gserviceaccount.com

  # Use custom role with specific permissions
  grant-viewer-access --all --role roles/browser

  # Higher parallelism for faster execution
  grant-viewer-access --all --max-workers 300

Recommended Roles:
  roles/viewer              - Full read access (recommended for inventory)
  roles/browser             - Minimal read access (project metadata only)
  Custom role               - Create with specific permissions needed";

/// Grant read-only IAM permissions to scan GCP Projects
#[derive(Parser, Debug)]
#[command(name = "grant-viewer-access", version, about, after_help = EXAMPLES)]
pub struct Args {
    /// Process all GCP Projects
    #[arg(long = "all", conflicts_with = "projects_file")]
    pub all_projects: bool,

    /// Process projects listed in specified file (one ID per line)
    #[arg(long = "projects", value_name = "FILE", default_value = "projects.txt")]
    pub projects_file: PathBuf,

    /// User email to grant access to (e.g., user@example.com)
    #[arg(long = "user", value_name = "EMAIL", conflicts_with = "service_account")]
    pub user_email: Option<String>,

    /// Service account to grant access to (e.g., sa@project.iam.gserviceaccount.com)
    #[arg(long = "service-account", value_name = "EMAIL")]
    pub service_account: Option<String>,

    /// IAM role to grant
    #[arg(long = "role", default_value = DEFAULT_ROLE, value_parser = parse_role)]
    pub role: String,

    /// Maximum parallel requests
    #[arg(long = "max-workers", default_value_t = 100, value_parser = clap::value_parser!(u16).range(1..=1000))]
    pub max_workers: u16,

    /// Show what would be done without making changes
    #[arg(long = "dry-run", conflicts_with = "check_only")]
    pub dry_run: bool,

    /// Only check current permissions, do not grant access
    #[arg(long = "check-only")]
    pub check_only: bool,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.dry_run {
            Mode::DryRun
        } else if self.check_only {
            Mode::CheckOnly
        } else {
            Mode::Apply
        }
    }

    pub fn source(&self) -> ProjectSource {
        if self.all_projects {
            ProjectSource::All
        } else {
            ProjectSource::File(self.projects_file.clone())
        }
    }

    /// The principal named on the command line, if any.
    pub fn principal(&self) -> Option<Principal> {
        match (&self.user_email, &self.service_account) {
            (Some(email), _) => Some(Principal::user(email)),
            (None, Some(email)) => Some(Principal::service_account(email)),
            (None, None) => None,
        }
    }
}

/// Predefined roles live under `roles/`, custom ones under a project or organization.
fn parse_role(role: &str) -> Result<String, String> {
    let role = role.trim();
    if role.starts_with("roles/") || role.starts_with("projects/") || role.starts_with("organizations/") {
        Ok(role.to_string())
    } else {
        Err(format!(
            "'{role}' is not a role name, expected roles/NAME, projects/ID/roles/NAME or organizations/ID/roles/NAME"
        ))
    }
}
