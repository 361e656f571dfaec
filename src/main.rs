//! Main entry point for the fantasy-stats command line tool
//!
//! Wraps the statistics engine with snapshot loading, printing and an
//! interactive ranking search.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fantasy_stats::config::AppConfig;
use fantasy_stats::ingest::load_collection;
use fantasy_stats::{
    AnalysisPipeline, ComparableCategories, MinMaxRankingEngine, PerGameDeltaComparator,
    PlayerCollection, RankingEngine, RankingEntry, RankingTable, ScatterProjection,
    SnapshotComparator, WeightedCategory,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Fantasy Stats - Player Snapshot Comparison and Weighted Ranking
#[derive(Parser)]
#[command(
    name = "fantasy-stats",
    version,
    about = "Stat ranges, snapshot deltas and weighted rankings for fantasy league players",
    long_about = "Fantasy Stats loads per-player stat exports, filters them by thresholds, \
                 compares two snapshots of the season on a per-game basis and ranks players \
                 by a weighted sum of min-max normalized categories."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        global = true,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        global = true,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, global = true, help = "Enable debug mode with verbose logging")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the configured filter, compare and rank pipeline
    Run {
        /// Later snapshot override
        #[arg(long, value_name = "FILE")]
        later: Option<PathBuf>,
        /// Earlier snapshot override
        #[arg(long, value_name = "FILE")]
        earlier: Option<PathBuf>,
        /// Print only the N best players
        #[arg(long)]
        top: Option<usize>,
        /// Search the ranking by player name afterwards
        #[arg(short, long)]
        interactive: bool,
        /// Print the ranking as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank one snapshot by weighted categories
    Rank {
        file: PathBuf,
        /// Category and weight as NAME:WEIGHT, repeatable
        #[arg(long = "category", value_name = "NAME:WEIGHT", required = true)]
        categories: Vec<WeightedCategory>,
        #[arg(long)]
        per_game: bool,
        #[arg(long)]
        top: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print the min, max, average and range of a category
    Range {
        file: PathBuf,
        category: String,
        #[arg(long)]
        per_game: bool,
    },
    /// Per-game deltas of players present in both snapshots
    Compare {
        later: PathBuf,
        earlier: PathBuf,
        /// Categories to difference; detected from the data when omitted
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print scatter points with bubble sizes for three categories
    Scatter {
        file: PathBuf,
        x: String,
        y: String,
        size: String,
        #[arg(long)]
        per_game: bool,
    },
    /// Validate configuration and exit
    Check,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load configuration and apply CLI overrides
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    Ok(config)
}

/// Display configuration summary
fn display_banner(config: &AppConfig) {
    info!("📊 {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!(
        "   Identity: {} / games played: {}",
        config.schema.identity_key, config.schema.games_played_key
    );
    info!("   Filters: {}", config.filters.len());
    info!(
        "   Ranking: {} categories{}",
        config.ranking.categories.len(),
        if config.ranking.per_game { " per game" } else { "" }
    );
}

fn load(path: &Path, config: &AppConfig) -> Result<PlayerCollection> {
    load_collection(
        path,
        Arc::new(config.schema.clone()),
        config.snapshots.delimiter_byte()?,
    )
}

/// Full ranking in ascending order, or the best `top` players first
fn write_ranking(
    table: &RankingTable,
    top: Option<usize>,
    json: bool,
    mut output: impl Write,
) -> Result<()> {
    let entries: Vec<&RankingEntry> = match top {
        Some(n) => table.top(n),
        None => table.iter().collect(),
    };
    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        for entry in entries {
            writeln!(output, "{entry}")?;
        }
    }
    Ok(())
}

fn write_scatter(projection: &ScatterProjection<'_>, mut output: impl Write) -> Result<()> {
    writeln!(output, "{}", projection.title())?;
    for point in projection.points() {
        let point = point?;
        writeln!(
            output,
            "{:<28} {}={:.4} {}={:.4} bubble={:.1}",
            point.identity,
            projection.x_label(),
            point.x,
            projection.y_label(),
            point.y,
            projection.bubble_size(point.size)?
        )?;
    }
    Ok(())
}

/// Look up players by name until `END` or end of input
fn interactive_search(
    table: &RankingTable,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    write!(output, "What player would you like to search (END to exit): ")?;
    output.flush()?;

    for line in input.lines() {
        let query = line?;
        let query = query.trim();
        if query == "END" {
            break;
        }
        match table.find(query) {
            Some(entry) => writeln!(output, "{entry}")?,
            None => writeln!(output, "No ranked player named {query:?}")?,
        }
        write!(output, "What player would you like to search (END to exit): ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn execute(command: Commands, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::Run {
            later,
            earlier,
            top,
            interactive,
            json,
        } => {
            if later.is_some() {
                config.snapshots.later = later;
            }
            if earlier.is_some() {
                config.snapshots.earlier = earlier;
            }
            display_banner(&config);

            let pipeline = AnalysisPipeline::new(config);
            let output = pipeline.run()?;

            if !json {
                if let Some(projection) = pipeline.scatter(&output) {
                    let projection = projection.context("Scatter projection failed")?;
                    write_scatter(&projection, io::stdout())?;
                    println!();
                }
            }

            write_ranking(&output.rankings, top, json, io::stdout())?;

            if interactive {
                let stdin = io::stdin();
                interactive_search(&output.rankings, stdin.lock(), io::stdout())?;
            }
        }
        Commands::Rank {
            file,
            categories,
            per_game,
            top,
            json,
        } => {
            let collection = load(&file, &config)?;
            let table = MinMaxRankingEngine::new().rank(&collection, &categories, per_game)?;
            write_ranking(&table, top, json, io::stdout())?;
        }
        Commands::Range {
            file,
            category,
            per_game,
        } => {
            let collection = load(&file, &config)?;
            let range = collection.stat_range(&category, per_game)?;
            println!("{category}{}", if per_game { " per game" } else { "" });
            println!("  min:     {:.4}", range.min);
            println!("  max:     {:.4}", range.max);
            println!("  average: {:.4}", range.average);
            println!("  range:   {:.4}", range.range);
        }
        Commands::Compare {
            later,
            earlier,
            categories,
            json,
        } => {
            let later = load(&later, &config)?;
            let earlier = load(&earlier, &config)?;
            let selection = if categories.is_empty() {
                ComparableCategories::Detect
            } else {
                ComparableCategories::Explicit(categories)
            };
            let deltas = PerGameDeltaComparator::new(selection).compare(&later, &earlier)?;

            if json {
                println!("{}", serde_json::to_string_pretty(deltas.all())?);
            } else {
                println!("{deltas}");
                for record in deltas.all() {
                    let changes: Vec<String> = record
                        .attributes()
                        .iter()
                        .filter(|(category, _)| **category != config.schema.identity_key)
                        .map(|(category, delta)| format!("{category}={delta}"))
                        .collect();
                    println!("{:<28} {}", record.get_identity()?, changes.join(" "));
                }
            }
        }
        Commands::Scatter {
            file,
            x,
            y,
            size,
            per_game,
        } => {
            let collection = load(&file, &config)?;
            let projection = ScatterProjection::new(&collection, x, y, size, per_game)?;
            write_scatter(&projection, io::stdout())?;
        }
        Commands::Check => {
            display_banner(&config);
            info!("Configuration validation successful");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = execute(args.command, config) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fantasy_stats::PlayerRecord;

    fn table() -> RankingTable {
        let mut collection = PlayerCollection::new();
        for (name, goals) in [("A", "10"), ("B", "20"), ("C", "0")] {
            collection
                .add(PlayerRecord::from_pairs([
                    ("Name", format!("x{name}")),
                    ("GP", "5".to_string()),
                    ("G", goals.to_string()),
                ]))
                .unwrap();
        }
        MinMaxRankingEngine::new()
            .rank(&collection, &[WeightedCategory::new("G", 1.0)], false)
            .unwrap()
    }

    #[test]
    fn test_interactive_search() {
        let input = "B\nZed\nEND\nA\n".as_bytes();
        let mut output = Vec::new();
        interactive_search(&table(), input, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("#3"));
        assert!(output.contains("No ranked player named \"Zed\""));
        // Nothing after END is answered
        assert!(!output.contains("#2"));
    }

    #[test]
    fn test_ranking_prints_ascending_without_top() {
        let mut output = Vec::new();
        write_ranking(&table(), None, false, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#1") && lines[0].contains('C'));
        assert!(lines[2].starts_with("#3") && lines[2].contains('B'));
    }

    #[test]
    fn test_ranking_top_prints_best_first() {
        let mut output = Vec::new();
        write_ranking(&table(), Some(2), true, &mut output).unwrap();

        let entries: Vec<RankingEntry> = serde_json::from_slice(&output).unwrap();
        let ranks: Vec<_> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![3, 2]);
    }

    #[test]
    fn test_scatter_prints_every_point() {
        let mut collection = PlayerCollection::new();
        for (name, goals, assists, shots) in [("A", "10", "5", "40"), ("B", "20", "10", "80")] {
            collection
                .add(PlayerRecord::from_pairs([
                    ("Name", format!("x{name}")),
                    ("GP", "10".to_string()),
                    ("G", goals.to_string()),
                    ("A", assists.to_string()),
                    ("SOG", shots.to_string()),
                ]))
                .unwrap();
        }
        let projection = ScatterProjection::new(&collection, "G", "A", "SOG", false).unwrap();

        let mut output = Vec::new();
        write_scatter(&projection, &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "X-G, Y-A, Bubble Size-SOG");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("bubble=20.0"));
        assert!(lines[2].ends_with("bubble=120.0"));
    }

    #[test]
    fn test_cli_parses_rank_categories() {
        let args = Args::try_parse_from([
            "fantasy-stats",
            "rank",
            "stats.csv",
            "--category",
            "G:1",
            "--category",
            "PIM:-0.5",
            "--per-game",
        ])
        .unwrap();

        match args.command {
            Commands::Rank {
                categories,
                per_game,
                ..
            } => {
                assert_eq!(categories.len(), 2);
                assert_eq!(categories[1], WeightedCategory::new("PIM", -0.5));
                assert!(per_game);
            }
            _ => panic!("expected rank command"),
        }
    }
}
