// Gesture replay
// Drives an editing session from a JSON script of recorded gestures

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::models::block::{BlockId, Lane};
use crate::models::week::WeekChange;
use crate::services::notification::NotificationSink;
use crate::services::session::{
    EditorSession, MoveGesture, Outcome, ResizeGesture, SlotSelection,
};
use crate::services::week_store::WeekStore;

/// A recorded editing session
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Script {
    /// Day whose week is opened before the first command
    pub start: NaiveDate,
    #[serde(default)]
    pub commands: Vec<ScriptCommand>,
}

/// One recorded gesture. Existing blocks are addressed by their position in
/// the visible week's start-ordered block list at the time of the command.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptCommand {
    Create {
        start: NaiveDateTime,
        end: NaiveDateTime,
        #[serde(default)]
        lane: Option<Lane>,
    },
    Move {
        block: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
        #[serde(default)]
        all_day: bool,
    },
    Resize {
        block: usize,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
    Delete {
        block: usize,
    },
    Undo,
    Redo,
    Navigate {
        date: NaiveDate,
    },
    NextWeek,
    PreviousWeek,
    Today,
}

/// Result of one replayed command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StepResult {
    Edit { outcome: Outcome },
    Navigation { change: Option<String> },
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("failed to parse gesture script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read script from {}", path.display()))?;
        Self::from_json(&data).with_context(|| format!("in {}", path.display()))
    }
}

/// Replay every command in order, stopping at the first hard error
///
/// `today` is what the `today` command navigates to.
pub fn run_script<S: WeekStore, N: NotificationSink>(
    session: &mut EditorSession<S, N>,
    script: &Script,
    today: NaiveDate,
) -> Result<Vec<StepResult>> {
    session.navigate_to(script.start)?;

    let mut results = Vec::with_capacity(script.commands.len());
    for (index, command) in script.commands.iter().enumerate() {
        let result = run_command(session, command, today)
            .with_context(|| format!("command #{} ({:?}) failed", index, command))?;
        log::debug!("command #{}: {:?}", index, result);
        results.push(result);
    }
    Ok(results)
}

fn run_command<S: WeekStore, N: NotificationSink>(
    session: &mut EditorSession<S, N>,
    command: &ScriptCommand,
    today: NaiveDate,
) -> Result<StepResult> {
    let outcome = match command {
        ScriptCommand::Create { start, end, lane } => {
            let selection = match lane {
                Some(lane) => SlotSelection {
                    start: *start,
                    end: *end,
                    lane: *lane,
                },
                None => SlotSelection::new(*start, *end),
            };
            session.select_slot(selection)?
        }
        ScriptCommand::Move {
            block,
            start,
            end,
            all_day,
        } => session.move_block(MoveGesture {
            block_id: block_at(session, *block)?,
            new_start: *start,
            new_end: *end,
            dropped_on_all_day: *all_day,
        })?,
        ScriptCommand::Resize { block, start, end } => session.resize_block(ResizeGesture {
            block_id: block_at(session, *block)?,
            new_start: *start,
            new_end: *end,
        })?,
        ScriptCommand::Delete { block } => {
            let id = block_at(session, *block)?;
            session.delete_block(&id)?
        }
        ScriptCommand::Undo => session.undo()?,
        ScriptCommand::Redo => session.redo()?,
        ScriptCommand::Navigate { date } => return navigation(session.navigate_to(*date)?),
        ScriptCommand::NextWeek => return navigation(session.next_week()?),
        ScriptCommand::PreviousWeek => return navigation(session.previous_week()?),
        ScriptCommand::Today => return navigation(session.go_to_today(today)?),
    };

    Ok(StepResult::Edit { outcome })
}

fn navigation(change: Option<WeekChange>) -> Result<StepResult> {
    Ok(StepResult::Navigation {
        change: change.map(|change| format!("{} -> {}", change.from, change.to)),
    })
}

fn block_at<S: WeekStore, N: NotificationSink>(
    session: &EditorSession<S, N>,
    index: usize,
) -> Result<BlockId> {
    session
        .blocks()
        .get(index)
        .map(|block| block.id.clone())
        .ok_or_else(|| {
            anyhow!(
                "no block #{} in week {} ({} blocks)",
                index,
                session.active_week(),
                session.blocks().len()
            )
        })
}
