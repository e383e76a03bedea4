//! End-to-end board scenarios driven through the store.

use std::rc::Rc;

use chrono::{DateTime, Duration};
use taskboard::clock::{ManualClock, SequentialIds};
use taskboard::{Board, BoardStore, ColumnId, DragLocation, DropResult, TaskDraft, TaskId};

fn ready_store() -> (BoardStore, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new(
        DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
    ));
    let mut store =
        BoardStore::with_collaborators(Board::default(), SequentialIds::new(), clock.clone());
    store.mark_ready();
    (store, clock)
}

fn add(store: &mut BoardStore, title: &str, status: ColumnId) -> TaskId {
    store
        .create_task(TaskDraft::new(title, "details", status))
        .unwrap()
}

fn column_ids(store: &BoardStore, column: ColumnId) -> Vec<String> {
    store
        .board()
        .column(column)
        .unwrap()
        .task_ids
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn drag(source: (ColumnId, usize), destination: Option<(ColumnId, usize)>, id: &TaskId) -> DropResult {
    DropResult {
        source: DragLocation::new(source.0, source.1),
        destination: destination.map(|(c, i)| DragLocation::new(c, i)),
        draggable_id: id.clone(),
    }
}

#[test]
fn create_on_empty_board() {
    let (mut store, _) = ready_store();
    let id = store
        .create_task(TaskDraft::new("A", "B", ColumnId::Todo))
        .unwrap();

    let board = store.board();
    assert_eq!(board.len(), 1);
    assert_eq!(column_ids(&store, ColumnId::Todo), [id.to_string()]);
    let task = board.task(&id).unwrap();
    assert_eq!(task.created_at, task.updated_at);
    assert_eq!(task.status, ColumnId::Todo);
}

#[test]
fn move_first_todo_into_empty_progress() {
    let (mut store, _) = ready_store();
    let t1 = add(&mut store, "first", ColumnId::Todo);
    let t2 = add(&mut store, "second", ColumnId::Todo);

    assert!(store.on_drag_end(&drag(
        (ColumnId::Todo, 0),
        Some((ColumnId::Progress, 0)),
        &t1
    )));

    assert_eq!(column_ids(&store, ColumnId::Todo), [t2.to_string()]);
    assert_eq!(column_ids(&store, ColumnId::Progress), [t1.to_string()]);
    assert!(column_ids(&store, ColumnId::Done).is_empty());
    assert_eq!(store.board().task(&t1).unwrap().status, ColumnId::Progress);
}

#[test]
fn reorder_first_to_last_within_todo() {
    let (mut store, _) = ready_store();
    let t1 = add(&mut store, "1", ColumnId::Todo);
    let t2 = add(&mut store, "2", ColumnId::Todo);
    let t3 = add(&mut store, "3", ColumnId::Todo);

    assert!(store.on_drag_end(&drag(
        (ColumnId::Todo, 0),
        Some((ColumnId::Todo, 2)),
        &t1
    )));
    assert_eq!(
        column_ids(&store, ColumnId::Todo),
        [t2.to_string(), t3.to_string(), t1.to_string()]
    );
}

#[test]
fn cancelled_and_same_slot_drops_leave_board_equal() {
    let (mut store, _) = ready_store();
    let t1 = add(&mut store, "1", ColumnId::Todo);
    add(&mut store, "2", ColumnId::Done);
    let before = store.board().clone();

    assert!(!store.on_drag_end(&drag((ColumnId::Todo, 0), None, &t1)));
    assert!(!store.on_drag_end(&drag(
        (ColumnId::Todo, 0),
        Some((ColumnId::Todo, 0)),
        &t1
    )));
    assert_eq!(store.board(), &before);
}

#[test]
fn delete_then_lookup() {
    let (mut store, _) = ready_store();
    let t1 = add(&mut store, "1", ColumnId::Progress);
    add(&mut store, "2", ColumnId::Progress);

    assert!(store.delete_task(&t1));
    assert!(store.board().task(&t1).is_none());
    assert!(store.board().columns().all(|c| !c.contains(&t1)));
    assert!(!store.delete_task(&t1));
}

#[test]
fn editing_status_moves_card_like_a_drag() {
    let (mut store, clock) = ready_store();
    let t1 = add(&mut store, "1", ColumnId::Todo);
    let t2 = add(&mut store, "2", ColumnId::Done);

    clock.advance(Duration::minutes(3));
    assert!(store.update_task(&t1, TaskDraft::new("1", "moved by form", ColumnId::Done)));

    assert!(column_ids(&store, ColumnId::Todo).is_empty());
    assert_eq!(
        column_ids(&store, ColumnId::Done),
        [t2.to_string(), t1.to_string()]
    );
    let task = store.board().task(&t1).unwrap();
    assert_eq!(task.updated_at - task.created_at, Duration::minutes(3));
    store.board().check_invariants().unwrap();
}

#[test]
fn cross_column_drag_refreshes_updated_at_like_an_edit() {
    let (mut store, clock) = ready_store();
    let t1 = add(&mut store, "1", ColumnId::Todo);
    let created = store.board().task(&t1).unwrap().created_at;

    clock.advance(Duration::seconds(90));
    store.on_drag_end(&drag((ColumnId::Todo, 0), Some((ColumnId::Done, 0)), &t1));

    let task = store.board().task(&t1).unwrap();
    assert_eq!(task.created_at, created);
    assert_eq!(task.updated_at, created + Duration::seconds(90));
}

#[test]
fn stale_drop_after_delete_is_a_no_op() {
    let (mut store, _) = ready_store();
    let t1 = add(&mut store, "1", ColumnId::Todo);
    let t2 = add(&mut store, "2", ColumnId::Todo);
    store.delete_task(&t1);
    let before = store.board().clone();

    // the gesture started while t1 was still at index 0
    assert!(!store.on_drag_end(&drag(
        (ColumnId::Todo, 0),
        Some((ColumnId::Done, 0)),
        &t1
    )));
    assert_eq!(store.board(), &before);
    assert_eq!(column_ids(&store, ColumnId::Todo), [t2.to_string()]);
}

#[test]
fn print_board_json_shape() {
    let (mut store, _) = ready_store();
    add(&mut store, "A", ColumnId::Todo);
    let json = serde_json::to_string_pretty(store.board()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["columnOrder"], serde_json::json!(["todo", "progress", "done"]));
    assert_eq!(value["tasks"]["t1"]["title"], "A");
}
