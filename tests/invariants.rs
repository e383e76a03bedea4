//! Property tests: board invariants survive any sequence of operations.

use std::collections::BTreeSet;

use chrono::DateTime;
use proptest::prelude::*;
use taskboard::clock::{ManualClock, SequentialIds};
use taskboard::{Board, BoardStore, ColumnId, DragLocation, DropResult, TaskDraft, TaskId};

#[derive(Debug, Clone)]
enum Op {
    Create { title: String, status: ColumnId },
    Update { pick: usize, status: ColumnId },
    Delete { pick: usize },
    Drag { pick: usize, to: ColumnId, index: usize, cancel: bool },
    DragUnknown { to: ColumnId },
}

fn arb_column() -> impl Strategy<Value = ColumnId> {
    prop_oneof![
        Just(ColumnId::Todo),
        Just(ColumnId::Progress),
        Just(ColumnId::Done),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[a-z]{1,8}", arb_column()).prop_map(|(title, status)| Op::Create { title, status }),
        1 => (any::<usize>(), arb_column()).prop_map(|(pick, status)| Op::Update { pick, status }),
        1 => any::<usize>().prop_map(|pick| Op::Delete { pick }),
        3 => (any::<usize>(), arb_column(), 0usize..8, prop::bool::weighted(0.1))
            .prop_map(|(pick, to, index, cancel)| Op::Drag { pick, to, index, cancel }),
        1 => arb_column().prop_map(|to| Op::DragUnknown { to }),
    ]
}

fn store() -> BoardStore {
    let clock = ManualClock::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    let mut store = BoardStore::with_collaborators(Board::default(), SequentialIds::new(), clock);
    store.mark_ready();
    store
}

/// Picks an existing task id, in a stable order.
fn pick(board: &Board, n: usize) -> Option<TaskId> {
    let ids: Vec<&TaskId> = board.tasks().map(|t| &t.id).collect();
    if ids.is_empty() {
        None
    } else {
        Some(ids[n % ids.len()].clone())
    }
}

fn apply(store: &mut BoardStore, op: &Op) -> isize {
    match op {
        Op::Create { title, status } => {
            isize::from(store.create_task(TaskDraft::new(title, "d", *status)).is_some())
        }
        Op::Update { pick: n, status } => {
            if let Some(id) = pick(store.board(), *n) {
                store.update_task(&id, TaskDraft::new("u", "d", *status));
            }
            0
        }
        Op::Delete { pick: n } => match pick(store.board(), *n) {
            Some(id) => -isize::from(store.delete_task(&id)),
            None => 0,
        },
        Op::Drag {
            pick: n,
            to,
            index,
            cancel,
        } => {
            if let Some(id) = pick(store.board(), *n) {
                let (column, at) = store.board().locate(&id).unwrap();
                let destination = (!cancel).then(|| DragLocation::new(*to, *index));
                store.on_drag_end(&DropResult {
                    source: DragLocation::new(column, at),
                    destination,
                    draggable_id: id,
                });
            }
            0
        }
        Op::DragUnknown { to } => {
            store.on_drag_end(&DropResult {
                source: DragLocation::new(ColumnId::Todo, 0),
                destination: Some(DragLocation::new(*to, 0)),
                draggable_id: "unknown".into(),
            });
            0
        }
    }
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut store = store();
        let mut expected: isize = 0;
        for op in &ops {
            expected += apply(&mut store, op);
            prop_assert!(store.board().check_invariants().is_ok(), "after {:?}", op);
            let listed: usize = store.board().columns().map(|c| c.len()).sum();
            prop_assert_eq!(listed, store.board().len());
        }
        prop_assert_eq!(store.board().len() as isize, expected);
    }

    #[test]
    fn same_column_reorder_is_a_permutation(n in 1usize..8, from in 0usize..8, to in 0usize..8) {
        let from = from % n;
        let to = to % n;
        let mut store = store();
        for i in 0..n {
            store.create_task(TaskDraft::new(format!("task {i}"), "d", ColumnId::Todo));
        }
        let before = store.board().column(ColumnId::Todo).unwrap().task_ids.clone();
        let id = before[from].clone();

        store.on_drag_end(&DropResult {
            source: DragLocation::new(ColumnId::Todo, from),
            destination: Some(DragLocation::new(ColumnId::Todo, to)),
            draggable_id: id.clone(),
        });

        let after = &store.board().column(ColumnId::Todo).unwrap().task_ids;
        prop_assert_eq!(after.len(), before.len());
        prop_assert_eq!(
            after.iter().collect::<BTreeSet<_>>(),
            before.iter().collect::<BTreeSet<_>>()
        );
        prop_assert_eq!(&after[to], &id);
        prop_assert_eq!(store.board().task(&id).unwrap().status, ColumnId::Todo);
    }

    #[test]
    fn cross_column_move_preserves_combined_size(
        todo in 1usize..6,
        done in 0usize..6,
        from in 0usize..6,
        to in 0usize..7,
    ) {
        let from = from % todo;
        let mut store = store();
        for i in 0..todo {
            store.create_task(TaskDraft::new(format!("todo {i}"), "d", ColumnId::Todo));
        }
        for i in 0..done {
            store.create_task(TaskDraft::new(format!("done {i}"), "d", ColumnId::Done));
        }
        let id = store.board().column(ColumnId::Todo).unwrap().task_ids[from].clone();

        let moved = store.on_drag_end(&DropResult {
            source: DragLocation::new(ColumnId::Todo, from),
            destination: Some(DragLocation::new(ColumnId::Done, to)),
            draggable_id: id.clone(),
        });
        prop_assert!(moved);

        let board = store.board();
        let todo_len = board.column(ColumnId::Todo).unwrap().len();
        let done_len = board.column(ColumnId::Done).unwrap().len();
        prop_assert_eq!(todo_len + done_len, todo + done);
        prop_assert_eq!(todo_len, todo - 1);
        prop_assert_eq!(board.task(&id).unwrap().status, ColumnId::Done);
        prop_assert_eq!(board.locate(&id), Some((ColumnId::Done, to.min(done))));
    }
}
