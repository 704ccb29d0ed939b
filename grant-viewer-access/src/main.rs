//! Grants an IAM role to one principal on many projects, checking each project
//! first so that projects which already have the binding are left untouched.

mod args;
mod confirm;
mod error;
mod executor;
mod principal;
mod progress;
mod report;
mod source;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use google_cloud_resourcemanager::client::{Client, ClientConfig};

use crate::args::Args;
use crate::error::Error;
use crate::executor::{Grant, Mode};
use crate::progress::Progress;
use crate::report::{ERROR_LOG, RULE};
use crate::source::ProjectSource;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Aborted) => {
            println!("Aborted.");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            if let Some(hint) = e.hint() {
                eprintln!("\n{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(args: Args) -> Result<(), Error> {
    println!("{RULE}");
    println!("GCP IAM Permission Grant Script");
    println!("{RULE}");

    // a bad project file fails before any credential lookup
    let project_source = args.source();
    let from_file = match &project_source {
        ProjectSource::File(path) => {
            println!("\nReading projects from: {}", path.display());
            let projects = source::read_project_file(path).await?;
            println!("Found {} projects", projects.len());
            if projects.is_empty() {
                return Err(Error::NoProjects);
            }
            Some(projects)
        }
        ProjectSource::All => None,
    };

    let client = Client::new(ClientConfig::default().with_auth().await?);
    let principal = match args.principal() {
        Some(principal) => principal,
        None => principal::current(&client).await?,
    };
    println!("\nGranting permissions to: {principal}");
    println!("Role: {}", args.role);

    let projects = match from_file {
        Some(projects) => projects,
        None => {
            println!("\nFetching all active projects...");
            let projects = project_source.load(&client).await?;
            println!("Found {} active projects", projects.len());
            projects
        }
    };
    if projects.is_empty() {
        return Err(Error::NoProjects);
    }

    let mode = args.mode();
    if mode.writes() {
        let stdin = std::io::stdin();
        let confirmed = confirm::confirm(projects.len(), &mut stdin.lock(), &mut std::io::stdout())
            .map_err(Error::Confirm)?;
        if !confirmed {
            return Err(Error::Aborted);
        }
    }

    let total = projects.len();
    let workers = usize::from(args.max_workers);
    println!("\nProcessing {total} projects with {workers} workers...");
    println!("Member: {principal}");
    println!("Role: {}", args.role);
    match mode {
        Mode::DryRun => println!("\n*** DRY RUN MODE - No changes will be made ***\n"),
        Mode::CheckOnly => println!("\n*** CHECK ONLY MODE - No changes will be made ***\n"),
        Mode::Apply => {}
    }

    let grant = Arc::new(Grant {
        member: principal.to_string(),
        role: args.role,
        mode,
    });
    let api = Arc::new(client.project().clone());
    let progress = Progress::new(total);
    let started = Instant::now();
    let summary = executor::run(api, grant.clone(), projects, workers, |result, summary| {
        if let Some(line) = progress.line(result, summary.processed(), &grant.role) {
            println!("{line}");
        }
    })
    .await;

    print!("{}", report::render_summary(&summary, total, mode, started.elapsed()));
    if !summary.errors.is_empty() {
        print!("{}", report::render_errors(&summary.errors));
        report::append_error_log(Path::new(ERROR_LOG), &summary.errors).await?;
        println!("\nFull error log written to: {ERROR_LOG}");
    }

    println!("\nDone!");
    Ok(())
}
