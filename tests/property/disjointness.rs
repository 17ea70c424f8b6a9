// Random gesture sequences never leave overlapping blocks in a lane

use proptest::prelude::*;
use workweek_scheduler::models::block::{Lane, TimeBlock};
use workweek_scheduler::services::session::{MoveGesture, ResizeGesture, SlotSelection};

use crate::fixtures::{dates, sessions};

#[derive(Debug, Clone)]
enum Gesture {
    Create { day: i64, start: u32, len: u32 },
    CreateRest { day: i64, days: i64 },
    Move { pick: usize, start: u32 },
    MoveAllDay { pick: usize, day: i64 },
    Resize { pick: usize, len: u32 },
    Delete { pick: usize },
    Undo,
    Redo,
}

fn gesture() -> impl Strategy<Value = Gesture> {
    prop_oneof![
        4 => (0..7i64, 0..88u32, 1..16u32).prop_map(|(day, start, len)| Gesture::Create { day, start, len }),
        2 => (0..7i64, 1..3i64).prop_map(|(day, days)| Gesture::CreateRest { day, days }),
        2 => (any::<usize>(), 0..88u32).prop_map(|(pick, start)| Gesture::Move { pick, start }),
        2 => (any::<usize>(), 0..7i64).prop_map(|(pick, day)| Gesture::MoveAllDay { pick, day }),
        2 => (any::<usize>(), 1..16u32).prop_map(|(pick, len)| Gesture::Resize { pick, len }),
        1 => any::<usize>().prop_map(|pick| Gesture::Delete { pick }),
        1 => Just(Gesture::Undo),
        1 => Just(Gesture::Redo),
    ]
}

/// Quarter-hour slot `slot` on the given day
fn slot(day: i64, slot: u32) -> chrono::NaiveDateTime {
    dates::at(day, 0, 0) + chrono::Duration::minutes(i64::from(slot) * 15)
}

fn pick_block(blocks: &[TimeBlock], pick: usize) -> Option<TimeBlock> {
    (!blocks.is_empty()).then(|| blocks[pick % blocks.len()].clone())
}

fn assert_valid(blocks: &[TimeBlock]) {
    for block in blocks {
        assert!(block.validate().is_ok(), "invalid block {:?}", block);
    }
}

fn assert_disjoint(blocks: &[TimeBlock]) {
    for (i, a) in blocks.iter().enumerate() {
        for b in &blocks[i + 1..] {
            if a.lane == b.lane {
                assert!(
                    a.end <= b.start || b.end <= a.start,
                    "overlap between {:?} and {:?}",
                    a,
                    b
                );
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: accepted operations keep each lane pairwise disjoint and
    /// every live block valid, across both lanes
    #[test]
    fn prop_lanes_stay_disjoint(gestures in prop::collection::vec(gesture(), 1..40)) {
        let mut session = sessions::fresh();

        for gesture in gestures {
            match gesture {
                Gesture::Create { day, start, len } => {
                    let end = (start + len).min(96);
                    session
                        .select_slot(SlotSelection {
                            start: slot(day, start),
                            end: slot(day, end),
                            lane: Lane::Time,
                        })
                        .unwrap();
                }
                Gesture::CreateRest { day, days } => {
                    let last = (day + days).min(7);
                    session
                        .select_slot(SlotSelection::new(dates::midnight(day), dates::midnight(last)))
                        .unwrap();
                }
                Gesture::Move { pick, start } => {
                    if let Some(block) = pick_block(session.blocks(), pick) {
                        let day = (block.start.date() - dates::monday()).num_days();
                        let new_start = slot(day, start);
                        session
                            .move_block(MoveGesture {
                                block_id: block.id.clone(),
                                new_start,
                                new_end: new_start + block.duration(),
                                dropped_on_all_day: false,
                            })
                            .unwrap();
                    }
                }
                Gesture::MoveAllDay { pick, day } => {
                    if let Some(block) = pick_block(session.blocks(), pick) {
                        session
                            .move_block(MoveGesture {
                                block_id: block.id.clone(),
                                new_start: dates::midnight(day),
                                new_end: dates::midnight(day + 1),
                                dropped_on_all_day: true,
                            })
                            .unwrap();
                    }
                }
                Gesture::Resize { pick, len } => {
                    if let Some(block) = pick_block(session.blocks(), pick) {
                        session
                            .resize_block(ResizeGesture {
                                block_id: block.id.clone(),
                                new_start: block.start,
                                new_end: block.start + chrono::Duration::minutes(i64::from(len) * 15),
                            })
                            .unwrap();
                    }
                }
                Gesture::Delete { pick } => {
                    if let Some(block) = pick_block(session.blocks(), pick) {
                        session.delete_block(&block.id).unwrap();
                    }
                }
                Gesture::Undo => {
                    session.undo().unwrap();
                }
                Gesture::Redo => {
                    session.redo().unwrap();
                }
            }

            assert_disjoint(session.blocks());
            assert_valid(session.blocks());
        }
    }

    /// Property: N accepted commits undo back to an empty week and redo forward again
    #[test]
    fn prop_undo_redo_round_trip(starts in prop::collection::btree_set(0..24u32, 1..10)) {
        let mut session = sessions::fresh();
        for &start in &starts {
            session
                .select_slot(SlotSelection {
                    start: slot(0, start * 4),
                    end: slot(0, start * 4 + 2),
                    lane: Lane::Time,
                })
                .unwrap();
        }
        let final_state = session.blocks().to_vec();

        for _ in 0..starts.len() {
            prop_assert!(session.undo().unwrap().is_applied());
        }
        prop_assert!(session.blocks().is_empty());

        for _ in 0..starts.len() {
            prop_assert!(session.redo().unwrap().is_applied());
        }
        prop_assert_eq!(session.blocks(), final_state.as_slice());
    }
}
