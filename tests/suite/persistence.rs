//! Journal-backed boards across restarts.

use mural_core::Coordinate;
use tempfile::tempdir;

use crate::common::{journaled, value};

#[test]
fn board_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("state").join("board.db");

    {
        let grid = journaled(&path, 10, 10);
        grid.set_cell(Coordinate::new(0, 0), value("111111")).unwrap();
        grid.set_cell(Coordinate::new(4, 7), value("474747")).unwrap();
        assert!(grid.set_cell(Coordinate::new(10, 0), value("abcdef")).is_err());
    }

    let grid = journaled(&path, 10, 10);
    let report = grid.replay_report();
    assert_eq!((report.restored, report.skipped), (2, 0));

    let tokens = grid.board().into_tokens();
    assert_eq!(tokens[0], "111111");
    assert_eq!(tokens[4 * 10 + 7], "474747");
    assert_eq!(tokens.iter().filter(|t| !t.is_empty()).count(), 2);

    let painted = grid.painted();
    assert_eq!(
        painted,
        vec![
            (Coordinate::new(0, 0), value("111111")),
            (Coordinate::new(4, 7), value("474747")),
        ]
    );
}

#[test]
fn restart_keeps_last_write() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.db");

    {
        let grid = journaled(&path, 3, 3);
        for color in ["aa0000", "00aa00", "0000aa"] {
            grid.set_cell(Coordinate::new(1, 1), value(color)).unwrap();
        }
    }

    let grid = journaled(&path, 3, 3);
    assert_eq!(
        grid.get_cell(Coordinate::new(1, 1)).unwrap().as_str(),
        "0000aa"
    );
    assert_eq!(grid.painted_count(), 1);
}

#[test]
fn shrunk_board_skips_out_of_range_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.db");

    {
        let grid = journaled(&path, 10, 10);
        grid.set_cell(Coordinate::new(2, 2), value("in")).unwrap();
        grid.set_cell(Coordinate::new(9, 0), value("out")).unwrap();
    }

    let grid = journaled(&path, 5, 5);
    let report = grid.replay_report();
    assert_eq!((report.restored, report.skipped), (1, 1));
    assert_eq!(grid.board().len(), 25);
    assert!(grid.get_cell(Coordinate::new(9, 0)).is_err());
}
