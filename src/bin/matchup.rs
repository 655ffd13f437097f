//! Prints how a rental fares against another Pokemon, move by move.
//!
//! Usage:
//!   matchup --data data Swampert Zygarde

use clap::Parser;
use max_lair::ai::eval::matchup_summary;
use max_lair::GameData;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder with the packaged catalogs and tables
    #[arg(short, long, default_value = "data")]
    data: PathBuf,

    /// Attacking rental
    attacker: String,

    /// Defender, looked up among bosses first, then rentals
    defender: String,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let data = GameData::load(&args.data)?;
    let attacker = data.rental(&args.attacker)?;
    let defender = match data.boss(&args.defender) {
        Ok(boss) => boss,
        Err(_) => data.rental(&args.defender)?,
    };

    let summary = matchup_summary(attacker, defender, &data.rental_team());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}
