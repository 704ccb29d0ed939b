//! Lists the active projects visible to the caller, filters them by id pattern
//! and writes the result for use with `grant-viewer-access`.

mod args;
mod error;
mod filter;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use google_cloud_resourcemanager::client::{Client, ClientConfig};

use crate::args::Args;
use crate::error::Error;
use crate::filter::ProjectFilter;
use crate::output::RULE;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
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
    println!("GCP Project List & Filter Tool");
    println!("{RULE}");

    let config = ClientConfig::default().with_auth().await?;
    let client = Client::new(config);

    println!("Fetching all GCP projects...");
    let projects = client.project().list_active().await.map_err(Error::ListProjects)?;
    println!("Found {} active projects", projects.len());
    if projects.is_empty() {
        return Err(Error::NoProjects);
    }

    let total = projects.len();
    let filter = ProjectFilter::new(args.include_pattern, args.exclude_pattern);
    let partition = filter.partition(projects);
    println!("After filtering: {} projects", partition.kept.len());

    if args.show_stats {
        print!("{}", output::render_statistics(total, &partition));
    }

    if args.preview_only {
        print!("{}", output::render_preview(&partition.kept));
        println!("\nPreview only - no file written.");
        return Ok(());
    }

    let detailed = output::write_outputs(&args.output_file, &partition.kept).await?;
    println!(
        "\n✓ {} project IDs written to: {}",
        partition.kept.len(),
        args.output_file.display()
    );
    println!("✓ Detailed info written to: {}", detailed.display());
    print!("{}", output::render_next_steps(&args.output_file));
    Ok(())
}
