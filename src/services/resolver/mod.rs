// Split/merge resolver
//
// Turns a create/move/resize request into the next block set, applying the
// calendar's conflict policy:
// cross-day -> target region -> split -> overlap -> containment merge -> insert/update.

use serde::Serialize;
use thiserror::Error;

use crate::models::block::{BlockId, BlockKind, TimeBlock};
use crate::services::conflict::{classify, lane_peers};

/// User-visible reason a gesture was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Error)]
#[serde(rename_all = "kebab-case")]
pub enum Rejection {
    #[error("Time blocks cannot be dragged across days")]
    CrossDayDrag,
    #[error("Blocks cannot be dropped onto this region")]
    InvalidTargetRegion,
    #[error("Time blocks cannot overlap an existing block")]
    IntervalConflict,
}

impl Rejection {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::CrossDayDrag => "cross-day-drag",
            Rejection::InvalidTargetRegion => "invalid-target-region",
            Rejection::IntervalConflict => "interval-conflict",
        }
    }
}

/// Which accepted path produced a new block set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Inserted,
    Updated,
    Split,
    Merged,
    Deleted,
    Undone,
    Redone,
}

/// A normalized request against the current block set.
///
/// For `Move` and `Resize` the candidate is the mutated block itself (same
/// id, lane and kind) carrying its new geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Create {
        candidate: TimeBlock,
    },
    Move {
        candidate: TimeBlock,
        dropped_on_all_day: bool,
    },
    Resize {
        candidate: TimeBlock,
    },
}

impl Intent {
    pub fn candidate(&self) -> &TimeBlock {
        match self {
            Intent::Create { candidate }
            | Intent::Move { candidate, .. }
            | Intent::Resize { candidate } => candidate,
        }
    }

    /// Id of the block being mutated, excluded from its own conflict checks
    pub fn mutated_id(&self) -> Option<&BlockId> {
        match self {
            Intent::Create { .. } => None,
            Intent::Move { candidate, .. } | Intent::Resize { candidate } => Some(&candidate.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Accepted {
        blocks: Vec<TimeBlock>,
        change: ChangeKind,
    },
    Rejected(Rejection),
}

/// Resolve an intent against the current set.
///
/// `blocks` must already be pairwise disjoint per lane; the returned set is
/// again disjoint and ordered by start. Rejections leave the input untouched.
pub fn resolve(blocks: &[TimeBlock], intent: &Intent) -> Resolution {
    if let Some(rejection) = boundary_rejection(intent) {
        return Resolution::Rejected(rejection);
    }

    let candidate = intent.candidate();
    let mutated = intent.mutated_id();

    if let Some(split) = split(blocks, candidate, mutated) {
        return Resolution::Accepted {
            blocks: split,
            change: ChangeKind::Split,
        };
    }

    let classification = classify(candidate, blocks, mutated);
    if classification.is_conflict() {
        return Resolution::Rejected(Rejection::IntervalConflict);
    }

    let absorbed: Vec<&BlockId> = classification.contained.iter().map(|block| &block.id).collect();
    let change = if !absorbed.is_empty() {
        ChangeKind::Merged
    } else if mutated.is_some() {
        ChangeKind::Updated
    } else {
        ChangeKind::Inserted
    };

    let mut next: Vec<TimeBlock> = blocks
        .iter()
        .filter(|block| Some(&block.id) != mutated && !absorbed.contains(&&block.id))
        .cloned()
        .collect();
    next.push(candidate.clone());
    sort_blocks(&mut next);

    Resolution::Accepted { blocks: next, change }
}

/// Remove a block by id; `None` if no such block exists
pub fn remove(blocks: &[TimeBlock], id: &BlockId) -> Option<Vec<TimeBlock>> {
    if !blocks.iter().any(|block| &block.id == id) {
        return None;
    }

    Some(blocks.iter().filter(|block| &block.id != id).cloned().collect())
}

/// Canonical order: start, then lane, then id
pub fn sort_blocks(blocks: &mut [TimeBlock]) {
    blocks.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.lane.cmp(&b.lane))
            .then_with(|| a.id.cmp(&b.id))
    });
}

fn boundary_rejection(intent: &Intent) -> Option<Rejection> {
    let candidate = intent.candidate();

    if candidate.crosses_midnight() {
        return Some(Rejection::CrossDayDrag);
    }

    match intent {
        Intent::Create { .. } => None,
        Intent::Move {
            candidate,
            dropped_on_all_day,
        } => match candidate.kind {
            BlockKind::Work if *dropped_on_all_day || candidate.is_all_day() => {
                Some(Rejection::InvalidTargetRegion)
            }
            BlockKind::Rest if candidate.days().0 != candidate.days().1 => {
                Some(Rejection::InvalidTargetRegion)
            }
            _ => None,
        },
        Intent::Resize { candidate } => {
            if candidate.kind == BlockKind::Work && candidate.is_all_day() {
                Some(Rejection::InvalidTargetRegion)
            } else {
                None
            }
        }
    }
}

/// Carve the candidate out of a lane peer when exactly one of its edges
/// coincides with the peer's matching edge.
fn split(
    blocks: &[TimeBlock],
    candidate: &TimeBlock,
    mutated: Option<&BlockId>,
) -> Option<Vec<TimeBlock>> {
    let host = lane_peers(candidate, blocks, mutated).find(|block| {
        let downward = candidate.start == block.start
            && block.start < candidate.end
            && candidate.end < block.end;
        let upward = candidate.end == block.end
            && block.start < candidate.start
            && candidate.start < block.end;
        downward || upward
    })?;

    let residual_id = host
        .id
        .split_residual(|id| blocks.iter().any(|block| &block.id == id) || id == &candidate.id);
    let residual = if candidate.start == host.start {
        host.with_span(candidate.end, host.end)
    } else {
        host.with_span(host.start, candidate.start)
    }
    .with_id(residual_id);

    // A timed residual must stay within one day; otherwise the conflict check decides.
    if residual.crosses_midnight() {
        log::debug!("Not splitting {}: residual would cross midnight", host.id);
        return None;
    }

    log::debug!(
        "Splitting block {} at {} into {} and {}",
        host.id,
        if candidate.start == host.start { candidate.end } else { candidate.start },
        candidate.id,
        residual.id
    );

    let mut next: Vec<TimeBlock> = blocks
        .iter()
        .filter(|block| block.id != host.id && Some(&block.id) != mutated)
        .cloned()
        .collect();
    next.push(candidate.clone());
    next.push(residual);
    sort_blocks(&mut next);
    Some(next)
}
