//! Headless replay: drive a round from JSON lines.
//!
//! Each input line is one command:
//!
//! ```text
//! {"type":"drop","item":"plastic_1","bin":"plastic"}
//! {"type":"tick","ms":500}
//! {"type":"restart"}
//! ```
//!
//! Each command produces exactly one output line, either a `snapshot` of the
//! round after the command or an `error`. A bad line never stops the stream.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{
    dispatch_all, parse_item_id, parse_material, CueCounter, RoundEvent, RoundState,
};
use crate::types::{MaterialMap, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOptions {
    /// Elapsed time for a `tick` command without `ms`.
    pub tick_ms: u32,
}

impl Default for ReplayOptions {
    fn default() -> Self {
        Self { tick_ms: TICK_MS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayCommand {
    Drop { item: String, bin: String },
    Tick {
        #[serde(default)]
        ms: Option<u32>,
    },
    Restart,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayOutput {
    Snapshot(SnapshotMessage),
    Error { seq: u64, message: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotMessage {
    pub seq: u64,
    pub round_id: u32,
    pub score: i32,
    pub terminal: bool,
    /// `matched`, `mismatched` or `ignored`; drops only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<&'static str>,
    pub events: Vec<EventMessage>,
    pub items: Vec<ItemMessage>,
    pub sorted_counts: PerMaterial<u32>,
    pub bin_signals: PerMaterial<&'static str>,
    pub bin_info: PerMaterial<Option<&'static str>>,
    pub correct_drops: u32,
    pub mistakes: u32,
    pub bonuses: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemMessage {
    pub id: String,
    pub material: &'static str,
    pub label: &'static str,
    pub sorted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMessage {
    Correct { material: &'static str },
    Wrong { material: &'static str },
    Bonus { material: &'static str },
    RoundComplete { score: i32 },
}

impl From<RoundEvent> for EventMessage {
    fn from(ev: RoundEvent) -> Self {
        match ev {
            RoundEvent::Correct(m) => EventMessage::Correct {
                material: m.as_str(),
            },
            RoundEvent::Wrong(m) => EventMessage::Wrong {
                material: m.as_str(),
            },
            RoundEvent::Bonus(m) => EventMessage::Bonus {
                material: m.as_str(),
            },
            RoundEvent::RoundComplete { score } => EventMessage::RoundComplete { score },
        }
    }
}

/// Per-material values keyed by material name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PerMaterial<T> {
    pub plastic: T,
    pub paper: T,
    pub metal: T,
    pub glass: T,
}

impl<T: Copy> PerMaterial<T> {
    fn map<U: Copy>(map: &MaterialMap<U>, f: impl Fn(U) -> T) -> Self {
        use crate::types::Material;
        Self {
            plastic: f(map[Material::Plastic]),
            paper: f(map[Material::Paper]),
            metal: f(map[Material::Metal]),
            glass: f(map[Material::Glass]),
        }
    }
}

/// Totals for a finished replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub lines: u64,
    pub errors: u64,
    pub cues: CueCounter,
}

/// Replay state: a round plus a line counter.
#[derive(Debug, Clone)]
pub struct Replay {
    round: RoundState,
    options: ReplayOptions,
    seq: u64,
    stats: ReplayStats,
}

impl Replay {
    pub fn new(options: ReplayOptions) -> Self {
        Self {
            round: RoundState::new(),
            options,
            seq: 0,
            stats: ReplayStats::default(),
        }
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Handle one input line.
    pub fn handle_line(&mut self, line: &str) -> ReplayOutput {
        self.seq += 1;
        self.stats.lines += 1;
        match self.execute(line) {
            Ok(msg) => ReplayOutput::Snapshot(msg),
            Err(e) => {
                self.stats.errors += 1;
                warn!(seq = self.seq, error = %format!("{e:#}"), "rejected replay line");
                ReplayOutput::Error {
                    seq: self.seq,
                    message: format!("{e:#}"),
                }
            }
        }
    }

    fn execute(&mut self, line: &str) -> Result<SnapshotMessage> {
        let command: ReplayCommand = serde_json::from_str(line).context("invalid command")?;
        debug!(seq = self.seq, ?command, "replay command");

        let outcome = match command {
            ReplayCommand::Drop { item, bin } => {
                let item = parse_item_id(&item)?;
                let target = parse_material(&bin)?;
                let outcome = self.round.drop_item(item, target);
                Some(outcome.map(|o| o.as_str()).unwrap_or("ignored"))
            }
            ReplayCommand::Tick { ms } => {
                self.round.tick(ms.unwrap_or(self.options.tick_ms));
                None
            }
            ReplayCommand::Restart => {
                self.round.restart();
                None
            }
        };

        let events = self.round.take_events();
        dispatch_all(events.iter().copied(), &mut self.stats.cues);
        Ok(self.snapshot_message(outcome, events.into_iter().map(EventMessage::from).collect()))
    }

    fn snapshot_message(
        &self,
        outcome: Option<&'static str>,
        events: Vec<EventMessage>,
    ) -> SnapshotMessage {
        let snap = self.round.snapshot();
        SnapshotMessage {
            seq: self.seq,
            round_id: snap.round_id,
            score: snap.score,
            terminal: snap.is_terminal(),
            outcome,
            events,
            items: snap
                .items
                .iter()
                .map(|i| ItemMessage {
                    id: i.id.to_string(),
                    material: i.material().as_str(),
                    label: i.display.label,
                    sorted: i.sorted,
                })
                .collect(),
            sorted_counts: PerMaterial::map(&snap.sorted_counts, |c| c),
            bin_signals: PerMaterial::map(&snap.bin_signal, |s| s.as_str()),
            bin_info: PerMaterial::map(&snap.bin_info, |t| t),
            correct_drops: snap.correct_drops,
            mistakes: snap.mistakes,
            bonuses: snap.bonuses,
        }
    }
}

/// Run a whole replay stream. Blank lines are skipped.
pub fn run_replay<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    options: ReplayOptions,
) -> Result<ReplayStats> {
    let mut replay = Replay::new(options);
    for line in input.lines() {
        let line = line.context("reading replay input")?;
        if line.trim().is_empty() {
            continue;
        }
        let out = replay.handle_line(&line);
        serde_json::to_writer(&mut output, &out)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    let stats = replay.stats();
    info!(
        lines = stats.lines,
        errors = stats.errors,
        score = replay.round().score(),
        correct = stats.cues.correct,
        wrong = stats.cues.wrong,
        bonuses = stats.cues.bonuses,
        completed = stats.cues.completed,
        "replay finished"
    );
    Ok(stats)
}
