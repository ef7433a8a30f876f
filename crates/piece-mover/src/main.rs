use std::io;
use std::path::PathBuf;

use chess_board::Board;
use clap::Parser;
use piece_mover::{MoverConfig, Session};

/// Two-player chess piece mover. Enter moves as `e2 e4`.
#[derive(Parser)]
#[command(name = "piece-mover")]
#[command(about = "Move chess pieces on a bitboard board, no rules attached")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = MoverConfig::DEFAULT_PATH)]
    config: PathBuf,

    /// Start position as a FEN placement, optionally followed by `w` or `b`
    #[arg(long)]
    position: Option<String>,

    /// Stop after this many moves
    #[arg(long)]
    max_turns: Option<u32>,

    /// Log level for stderr diagnostics (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = MoverConfig::load(&args.config)?;
    if let Some(position) = args.position {
        config.start_position = Some(position);
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = Some(max_turns);
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.level()?)
        .with_writer(io::stderr)
        .init();
    tracing::debug!(config = ?args.config, "configuration loaded");

    let setup = config.setup()?;
    let board = Board::from_setup(&setup);

    let mut session = Session::new(io::stdin().lock(), io::stdout(), board, setup.side_to_move)
        .with_max_turns(config.max_turns);
    let end = session.run()?;

    tracing::info!(?end, turns = session.turns_played(), "session finished");
    Ok(())
}
