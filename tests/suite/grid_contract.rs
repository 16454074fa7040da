//! Read/write/board contract of the grid store.

use mural_core::{Cell, Coordinate};

use crate::common::{store, value};

const SHAPES: &[(usize, usize)] = &[(1, 1), (1, 7), (7, 1), (3, 5), (10, 10)];

#[test]
fn unset_sentinel_everywhere_before_writes() {
    for &(rows, cols) in SHAPES {
        let store = store(rows, cols);
        for coord in store.dimensions().coordinates() {
            assert_eq!(store.get_cell(coord).unwrap(), Cell::Unset);
        }
        let tokens = store.board().into_tokens();
        assert_eq!(tokens.len(), rows * cols);
        assert!(tokens.iter().all(String::is_empty));
    }
}

#[test]
fn board_index_matches_get_cell_for_every_shape() {
    for &(rows, cols) in SHAPES {
        let store = store(rows, cols);
        // Paint a diagonal so every row and column has a distinct value somewhere.
        for i in 0..rows.min(cols) {
            store
                .set_cell(Coordinate::new(i, i), value(&format!("d{i}")))
                .unwrap();
        }
        store
            .set_cell(Coordinate::new(rows - 1, 0), value("corner"))
            .unwrap();

        let board = store.board();
        assert_eq!(board.len(), rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let coord = Coordinate::new(r, c);
                assert_eq!(
                    &board.cells()[r * cols + c],
                    &store.get_cell(coord).unwrap(),
                    "mismatch at {coord} on {rows}x{cols}"
                );
            }
        }
    }
}

#[test]
fn last_write_wins_per_cell() {
    let store = store(4, 4);
    let coord = Coordinate::new(3, 2);
    for i in 0..20 {
        store.set_cell(coord, value(&format!("{i:06}"))).unwrap();
    }
    assert_eq!(store.get_cell(coord).unwrap().as_str(), "000019");
    assert_eq!(store.painted_count(), 1);
}

#[test]
fn out_of_bounds_never_mutates() {
    let store = store(10, 10);
    store.set_cell(Coordinate::new(5, 5), value("keep")).unwrap();
    let before = store.board();

    for coord in [
        Coordinate::new(10, 0),
        Coordinate::new(0, 10),
        Coordinate::new(10, 10),
        Coordinate::new(usize::MAX, 0),
    ] {
        assert!(store.set_cell(coord, value("abcdef")).is_err());
        assert!(store.get_cell(coord).is_err());
    }
    for (row, col) in [(-1, 0), (0, -1), (i64::MIN, i64::MAX)] {
        assert!(store.locate(row, col).is_err());
    }

    assert_eq!(store.board(), before);
}

#[test]
fn ten_by_ten_scenario() {
    let store = store(10, 10);
    assert_eq!(store.board().len(), 100);

    store.set_cell(Coordinate::new(0, 0), value("111111")).unwrap();
    let err = store
        .set_cell(Coordinate::new(10, 0), value("abcdef"))
        .unwrap_err();
    assert_eq!(err.to_string(), "coordinate (10, 0) is outside the 10x10 board");

    let tokens = store.board().into_tokens();
    assert_eq!(tokens.len(), 100);
    assert_eq!(tokens[0], "111111");
    assert!(tokens.iter().skip(1).all(String::is_empty));
}

#[test]
fn board_is_consumed_by_iteration() {
    let store = store(2, 2);
    store.set_cell(Coordinate::new(1, 1), value("z")).unwrap();

    let board = store.board();
    let cells: Vec<Cell> = board.into_iter().collect();
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[3].as_str(), "z");
}
