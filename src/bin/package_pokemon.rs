//! Builds the rental and boss catalogs and the matchup tables from the raw
//! data folder.
//!
//! Usage:
//!   package-pokemon --input data/raw --output data --threads 7

use clap::Parser;
use max_lair::logger;
use max_lair::tools::package::package;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder holding Moves.csv, Rental_Pokemon.txt and friends
    #[arg(short, long, default_value = "data")]
    input: PathBuf,

    /// Where the JSON catalogs and tables are written
    #[arg(short, long, default_value = "data")]
    output: PathBuf,

    /// Worker threads (default: CPUs - 1)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Also write a debug log to this folder
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logger::init(args.log_dir.as_deref(), "package_pokemon_log.txt")?;

    let threads = args.threads.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get().saturating_sub(1))
            .unwrap_or(1)
            .max(1)
    });
    rayon::ThreadPoolBuilder::new().num_threads(threads).build_global()?;
    log::info!("Packaging with {} worker threads", threads);

    let data = package(&args.input)?;
    data.save(&args.output)?;
    log::info!("All data has been saved!");
    Ok(())
}
