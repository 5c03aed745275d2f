use clap::Parser;
use tracing_subscriber::prelude::*;

use analysis::Side;
use roundscore::teams::{Team, Teams};

#[derive(Debug, Parser)]
#[command(version, about = "Builds a scoreboard from a match's round-end events")]
struct Args {
    /// Event export (.json) or demo file (.dem)
    input: std::path::PathBuf,

    /// Original file name, used to infer team names and sides
    #[arg(long)]
    original_name: Option<String>,

    #[arg(long)]
    team_a: Option<String>,
    #[arg(long, value_parser = parse_side)]
    team_a_side: Option<Side>,
    #[arg(long)]
    team_b: Option<String>,
    #[arg(long, value_parser = parse_side)]
    team_b_side: Option<Side>,

    /// Overrides the tick rate from the input's header
    #[arg(long)]
    tick_rate: Option<f32>,

    /// Disables the round-end stream corrections
    #[arg(long)]
    no_corrections: bool,

    #[arg(long)]
    pretty: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_side(value: &str) -> Result<Side, String> {
    roundscore::teams::parse_side(value).ok_or_else(|| format!("unknown side {:?}, expected T or CT", value))
}

fn init_logging(verbose: u8) -> Result<(), roundscore::Error> {
    let level = match verbose {
        0 => tracing_subscriber::filter::LevelFilter::WARN,
        1 => tracing_subscriber::filter::LevelFilter::INFO,
        2 => tracing_subscriber::filter::LevelFilter::DEBUG,
        _ => tracing_subscriber::filter::LevelFilter::TRACE,
    };

    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().starts_with("analysis") || meta.target().starts_with("roundscore")
        }));
    tracing::subscriber::set_global_default(registry)?;

    Ok(())
}

fn main() -> std::process::ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("{}", e);
        return std::process::ExitCode::FAILURE;
    }

    let options = roundscore::Options {
        input: args.input,
        original_name: args.original_name,
        teams: Teams {
            a: Team {
                name: args.team_a,
                side: args.team_a_side,
            },
            b: Team {
                name: args.team_b,
                side: args.team_b_side,
            },
        },
        tick_rate: args.tick_rate,
        no_corrections: args.no_corrections,
    };

    let output = roundscore::run(&options).and_then(|summary| {
        let json = if args.pretty {
            serde_json::to_string_pretty(&summary)?
        } else {
            serde_json::to_string(&summary)?
        };
        Ok(json)
    });

    match output {
        Ok(json) => {
            println!("{}", json);
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Processing match: {}", e);
            eprintln!(
                "{}",
                serde_json::json!({
                    "error": "Failed to process match",
                    "details": e.to_string(),
                })
            );
            std::process::ExitCode::FAILURE
        }
    }
}
