//! Command-line arguments.

use anyhow::{anyhow, Result};

use crate::replay::ReplayOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive terminal game.
    Play,
    /// JSON lines in on stdin, snapshots out on stdout.
    Replay(ReplayOptions),
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some(first) = args.first() else {
        return Ok(Command::Play);
    };
    if first != "replay" {
        return Err(anyhow!("unknown command: {}", first));
    }

    let mut options = ReplayOptions::default();
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--tick-ms" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("replay: missing value for --tick-ms"))?;
                options.tick_ms = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("replay: invalid --tick-ms value: {}", v))?;
            }
            other => {
                return Err(anyhow!("replay: unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(Command::Replay(options))
}
