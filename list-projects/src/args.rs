use std::path::PathBuf;

use clap::Parser;
use regex::{Regex, RegexBuilder};

const EXAMPLES: &str = "\
Examples:
  # List all projects to file
  list-projects --output projects-all.txt

  # List and exclude test/dev projects
  list-projects --output projects-prod.txt --exclude \"test|dev|demo|sandbox\"

  # List only specific pattern
  list-projects --output projects-prod.txt --include \"prod|production\"

  # List with statistics
  list-projects --output projects.txt --stats";

/// List and filter GCP Projects
#[derive(Parser, Debug)]
#[command(name = "list-projects", version, about, after_help = EXAMPLES)]
pub struct Args {
    /// Output file to save project IDs
    #[arg(long = "output", value_name = "FILE", default_value = "projects.txt")]
    pub output_file: PathBuf,

    /// Regex pattern to exclude projects (e.g., "test|dev|demo")
    #[arg(long = "exclude", value_name = "REGEX", value_parser = parse_pattern)]
    pub exclude_pattern: Option<Regex>,

    /// Regex pattern to include only matching projects (e.g., "prod|production")
    #[arg(long = "include", value_name = "REGEX", value_parser = parse_pattern)]
    pub include_pattern: Option<Regex>,

    /// Show statistics about filtered projects
    #[arg(long = "stats")]
    pub show_stats: bool,

    /// Preview filtered projects without writing to file
    #[arg(long = "preview")]
    pub preview_only: bool,
}

/// Patterns match anywhere in the project id, ignoring case.
pub fn parse_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
