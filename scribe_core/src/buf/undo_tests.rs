use super::undo::*;

use compact_str::ToCompactString;

fn make_insert(payload: &str, char_idx_before: usize) -> Insert {
  Insert {
    payload: payload.to_compact_string(),
    char_idx_before,
    char_idx_after: char_idx_before + payload.chars().count(),
  }
}

fn assert_insert(record: &Record, op: Insert) {
  match &record.op {
    Operation::Insert(insert) => assert_eq!(*insert, op),
    _ => unreachable!(),
  }
}

fn assert_delete(record: &Record, op: Delete) {
  match &record.op {
    Operation::Delete(delete) => assert_eq!(*delete, op),
    _ => unreachable!(),
  }
}

#[test]
fn insert1() {
  let mut undo_manager = UndoManager::new(20);
  let payload = "Hello, World!";
  for (i, c) in payload.chars().enumerate() {
    undo_manager.insert(make_insert(&c.to_compact_string(), i));
  }
  assert_eq!(undo_manager.history().len(), payload.chars().count());
  assert!(undo_manager.can_undo());
  assert!(!undo_manager.can_redo());

  let versions: Vec<usize> =
    undo_manager.history().iter().map(|r| r.version).collect();
  for w in versions.windows(2) {
    assert!(w[0] < w[1]);
  }
  assert!(versions.iter().all(|v| *v >= START_VERSION));
}

#[test]
fn insert2() {
  let mut undo_manager = UndoManager::new(10);
  undo_manager.insert(make_insert("", 3));
  undo_manager.delete(Delete {
    payload: "".to_compact_string(),
    char_idx_before: 2,
    char_idx_after: 2,
  });
  assert!(!undo_manager.can_undo());
}

#[test]
fn undo_redo1() {
  let mut undo_manager = UndoManager::new(10);
  undo_manager.insert(make_insert("汤姆", 0));
  undo_manager.delete(Delete {
    payload: "姆".to_compact_string(),
    char_idx_before: 2,
    char_idx_after: 1,
  });

  let r1 = undo_manager.undo().unwrap();
  assert_delete(
    &r1,
    Delete {
      payload: "姆".to_compact_string(),
      char_idx_before: 2,
      char_idx_after: 1,
    },
  );
  let r2 = undo_manager.undo().unwrap();
  assert_insert(&r2, make_insert("汤姆", 0));
  assert!(undo_manager.undo().is_none());
  assert_eq!(undo_manager.redo_tail().len(), 2);

  let r3 = undo_manager.redo().unwrap();
  assert_eq!(r3, r2);
  let r4 = undo_manager.redo().unwrap();
  assert_eq!(r4, r1);
  assert!(undo_manager.redo().is_none());
  assert_eq!(undo_manager.history().len(), 2);
}

#[test]
fn branch_discard1() {
  let mut undo_manager = UndoManager::new(10);
  undo_manager.insert(make_insert("a", 0));
  undo_manager.insert(make_insert("b", 1));
  assert!(undo_manager.undo().is_some());
  assert!(undo_manager.can_redo());

  undo_manager.insert(make_insert("c", 1));
  assert!(!undo_manager.can_redo());
  assert!(undo_manager.redo().is_none());
  assert_eq!(undo_manager.history().len(), 2);
}

#[test]
fn capacity1() {
  let mut undo_manager = UndoManager::new(3);
  assert_eq!(undo_manager.capacity(), 3);
  for i in 0..5 {
    undo_manager.insert(make_insert("x", i));
  }
  assert_eq!(undo_manager.history().len(), 3);

  // The oldest two records are evicted.
  let first = undo_manager.history().iter().next().unwrap();
  assert_insert(first, make_insert("x", 2));

  let mut n = 0;
  while undo_manager.undo().is_some() {
    n += 1;
  }
  assert_eq!(n, 3);
}

#[test]
fn clear1() {
  let mut undo_manager = UndoManager::default();
  undo_manager.insert(make_insert("a", 0));
  undo_manager.insert(make_insert("b", 1));
  undo_manager.undo();
  undo_manager.clear();
  assert!(!undo_manager.can_undo());
  assert!(!undo_manager.can_redo());
}
