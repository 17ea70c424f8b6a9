// Conflict detection
// Classifies how a candidate interval relates to the blocks already in its lane

use crate::models::block::{BlockId, TimeBlock};

/// Relationship between a candidate (A) and an existing block (B)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// No shared instant
    Disjoint,
    /// Partial overlap, or A strictly inside B. Always a conflict.
    Overlapping,
    /// B lies fully inside (or exactly on) A. Absorbed on commit.
    Contains,
}

/// Classify A against B, ignoring lanes and days.
pub fn relation(candidate: &TimeBlock, existing: &TimeBlock) -> Relation {
    let (a_start, a_end) = (candidate.start, candidate.end);
    let (b_start, b_end) = (existing.start, existing.end);

    if a_start <= b_start && a_end >= b_end {
        return Relation::Contains;
    }

    let start_inside = a_start >= b_start && a_start < b_end;
    let end_inside = a_end > b_start && a_end <= b_end;
    if start_inside || end_inside {
        Relation::Overlapping
    } else {
        Relation::Disjoint
    }
}

/// Outcome of checking a candidate against its lane
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Classification<'a> {
    pub overlapping: Vec<&'a TimeBlock>,
    pub contained: Vec<&'a TimeBlock>,
}

impl Classification<'_> {
    /// Any partial overlap rejects the whole operation
    pub fn is_conflict(&self) -> bool {
        !self.overlapping.is_empty()
    }
}

/// Blocks the candidate has to be checked against: same lane, at least one
/// shared calendar day, and not the block being moved or resized.
pub fn lane_peers<'a>(
    candidate: &'a TimeBlock,
    existing: &'a [TimeBlock],
    exclude: Option<&'a BlockId>,
) -> impl Iterator<Item = &'a TimeBlock> + 'a {
    existing.iter().filter(move |block| {
        block.lane == candidate.lane
            && Some(&block.id) != exclude
            && block.shares_day_with(candidate)
    })
}

/// Split the candidate's lane peers into conflicting and absorbed blocks.
pub fn classify<'a>(
    candidate: &'a TimeBlock,
    existing: &'a [TimeBlock],
    exclude: Option<&'a BlockId>,
) -> Classification<'a> {
    let mut classification = Classification::default();

    for block in lane_peers(candidate, existing, exclude) {
        match relation(candidate, block) {
            Relation::Overlapping => classification.overlapping.push(block),
            Relation::Contains => classification.contained.push(block),
            Relation::Disjoint => {}
        }
    }

    classification
}
