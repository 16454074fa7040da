//! End-to-end shell sessions.

use std::fs;

use clap::Parser;
use mural::Args;
use mural_config::{ConfigError, MuralConfig};
use tempfile::tempdir;

use crate::common::{journaled_shell, memory_shell, run_script};

#[test]
fn ten_by_ten_session() {
    let shell = memory_shell(10, 10);
    let lines = run_script(
        &shell,
        "# fresh board\n\
         tokens\n\
         set 0 0 111111\n\
         set 10 0 abcdef\n\
         get 0 0\n\
         get 9 9\n\
         stats\n",
    );

    let initial: Vec<String> = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(initial.len(), 100);
    assert!(initial.iter().all(String::is_empty));

    assert_eq!(lines[1], "ok");
    assert_eq!(lines[2], "error: coordinate (10, 0) is outside the 10x10 board");
    assert_eq!(lines[3], "111111");
    assert_eq!(lines[4], "(unset)");
    assert_eq!(lines[5], "10x10 board, 1 painted, revision 1");
}

#[test]
fn journaled_session_restores_on_next_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("board.db");

    let first = journaled_shell(&path, 4, 4);
    assert_eq!(run_script(&first, "set 3 3 ffffff\nset 0 2 123abc\n"), ["ok", "ok"]);
    drop(first);

    let second = journaled_shell(&path, 4, 4);
    let lines = run_script(&second, "board\n");
    assert_eq!(lines, [". . 123abc .", ". . . .", ". . . .", ". . . ffffff"]);
}

#[test]
fn export_then_reload_json() {
    let dir = tempdir().unwrap();
    let export = dir.path().join("board.json");
    let shell = memory_shell(2, 3);

    let script = format!("set 1 2 a1b2c3\nexport {}\n", export.display());
    let lines = run_script(&shell, &script);
    assert_eq!(lines[0], "ok");
    assert!(lines[1].starts_with("exported 1 painted cells"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&export).unwrap()).unwrap();
    assert_eq!(json["rows"], 2);
    assert_eq!(json["cols"], 3);
    assert_eq!(json["cells"][5], "a1b2c3");
}

#[test]
fn config_file_drives_dimensions_and_journal() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    let journal_path = dir.path().join("journal.db");
    fs::write(
        &config_path,
        format!(
            "[board]\nrows = 3\ncols = 2\n\n[storage]\njournal = \"{}\"\n",
            journal_path.display()
        ),
    )
    .unwrap();

    let config = MuralConfig::load_from(&config_path).unwrap().unwrap();
    let dims = config.dimensions().unwrap();
    assert_eq!((dims.rows(), dims.cols()), (3, 2));
    assert_eq!(config.journal_path(), Some(journal_path.clone()));

    let shell = journaled_shell(&journal_path, dims.rows(), dims.cols());
    let lines = run_script(&shell, "set 2 1 fff\nset 3 0 000\n");
    assert_eq!(lines[0], "ok");
    assert!(lines[1].starts_with("error: coordinate (3, 0)"));
}

#[test]
fn misspelled_config_path_fails_instead_of_running_in_memory() {
    let dir = tempdir().unwrap();
    let real = dir.path().join("mural.toml");
    fs::write(&real, "[storage]\njournal = \"/tmp/never-opened.db\"\n").unwrap();
    let typo = dir.path().join("mrual.toml");

    let args = Args::try_parse_from(["mural", "--config", typo.to_str().unwrap()]).unwrap();
    let err = args.load_config().unwrap_err();
    assert!(matches!(err, ConfigError::Missing { ref path } if *path == typo));

    let args = Args::try_parse_from(["mural", "--config", real.to_str().unwrap()]).unwrap();
    assert!(args.load_config().unwrap().journal_path().is_some());
}
