mod render;
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use quilt_config::DesignerConfig;
use quilt_core::{get_rectangular_range, BlockDesigner, GridPosition};

/// Quilt block and pattern design tools.
#[derive(Parser, Debug)]
#[command(name = "quilt", version, about)]
struct Cli {
    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every cell in the rectangle between two corners, row by row.
    Range {
        /// First corner as `row,col`.
        #[arg(value_parser = parse_position, allow_hyphen_values = true)]
        start: GridPosition,
        /// Opposite corner as `row,col`.
        #[arg(value_parser = parse_position, allow_hyphen_values = true)]
        end: GridPosition,
    },
    /// Replay a JSON script of block edits and print the resulting block.
    Replay {
        /// Path to the script.
        script: PathBuf,
        /// Config file (defaults to the platform config directory).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Parses `row,col`.
fn parse_position(s: &str) -> Result<GridPosition, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{s}`"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row `{row}`: {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column `{col}`: {e}"))?;
    Ok(GridPosition::new(row, col))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Range { start, end } => {
            for cell in get_rectangular_range(start, end) {
                println!("{},{}", cell.row, cell.col);
            }
        }
        Command::Replay { script, config } => {
            let config_path = config.unwrap_or_else(DesignerConfig::config_path);
            tracing::debug!("Using config at {}", config_path.display());
            let config = DesignerConfig::load_or_create(&config_path);

            let steps = script::load_script(&script)?;
            tracing::info!("Replaying {} step(s) from {}", steps.len(), script.display());

            let mut block = BlockDesigner::from_config(&config);
            script::run(&mut block, &steps)?;

            print!("{}", render::render_grid(block.grid()));
            println!(
                "history: {} undo / {} redo",
                block.history().undo_len(),
                block.history().redo_len()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1,4"), Ok(GridPosition::new(1, 4)));
        assert_eq!(parse_position(" 2 , -3 "), Ok(GridPosition::new(2, -3)));
        assert!(parse_position("1").is_err());
        assert!(parse_position("a,1").is_err());
    }

    #[test]
    fn test_cli_parses_range_with_negative_corner() {
        let cli = Cli::try_parse_from(["quilt", "range", "-1,0", "2,4"]).unwrap();
        match cli.command {
            Command::Range { start, end } => {
                assert_eq!(start, GridPosition::new(-1, 0));
                assert_eq!(end, GridPosition::new(2, 4));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parses_replay() {
        let cli =
            Cli::try_parse_from(["quilt", "-v", "replay", "edits.json", "--config", "q.json"])
                .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Replay { script, config } => {
                assert_eq!(script, PathBuf::from("edits.json"));
                assert_eq!(config, Some(PathBuf::from("q.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
