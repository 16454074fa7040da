//! Shared access from many threads.

use std::sync::Arc;
use std::thread;

use mural_core::Coordinate;

use crate::common::{store, value};

#[test]
fn disjoint_writers_all_land() {
    let store = store(16, 16);

    thread::scope(|scope| {
        for row in 0..16 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for col in 0..16 {
                    store
                        .set_cell(Coordinate::new(row, col), value(&format!("{row:02}{col:02}")))
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(store.painted_count(), 256);
    for (index, cell) in store.board().cells().iter().enumerate() {
        assert_eq!(cell.as_str(), format!("{:02}{:02}", index / 16, index % 16));
    }
}

#[test]
fn readers_never_see_writes_out_of_order() {
    const WRITES: u32 = 500;
    let store = store(4, 4);
    let coord = Coordinate::new(2, 3);

    thread::scope(|scope| {
        let writer = Arc::clone(&store);
        scope.spawn(move || {
            for i in 1..=WRITES {
                writer.set_cell(coord, value(&format!("{i:06}"))).unwrap();
            }
        });

        for _ in 0..4 {
            let reader = Arc::clone(&store);
            scope.spawn(move || {
                let mut last_seen = 0u32;
                for _ in 0..WRITES {
                    let board = reader.board();
                    assert_eq!(board.len(), 16);
                    let token = board.get(coord).unwrap().as_str().to_string();
                    if token.is_empty() {
                        assert_eq!(last_seen, 0, "cell went back to unset");
                        continue;
                    }
                    let seen: u32 = token.parse().unwrap();
                    assert!(seen >= last_seen, "saw {seen} after {last_seen}");
                    last_seen = seen;
                }
            });
        }
    });

    assert_eq!(store.get_cell(coord).unwrap().as_str(), "000500");
    assert_eq!(store.revision(), u64::from(WRITES));
}

#[test]
fn snapshot_revision_bounds_painted_cells() {
    let store = store(8, 8);

    thread::scope(|scope| {
        for row in 0..8 {
            let store = Arc::clone(&store);
            scope.spawn(move || {
                for col in 0..8 {
                    store.set_cell(Coordinate::new(row, col), value("x")).unwrap();
                }
            });
        }
        let reader = Arc::clone(&store);
        scope.spawn(move || {
            let mut last_revision = 0;
            for _ in 0..200 {
                let board = reader.board();
                assert!(board.revision() >= last_revision);
                assert!(board.painted_count() as u64 <= board.revision());
                last_revision = board.revision();
            }
        });
    });
}
