//! Shell command table and parsing.

#[derive(Debug, Clone, Copy)]
struct CommandSpec {
    usage: &'static str,
    description: &'static str,
}

const COMMAND_SPECS: &[CommandSpec] = &[
    CommandSpec {
        usage: "set <row> <col> <color>",
        description: "Paint one cell",
    },
    CommandSpec {
        usage: "get <row> <col>",
        description: "Show one cell",
    },
    CommandSpec {
        usage: "board",
        description: "Show the whole board, '.' for unset cells",
    },
    CommandSpec {
        usage: "tokens",
        description: "Print the board as a row-major JSON array",
    },
    CommandSpec {
        usage: "export <path>",
        description: "Write the board to a JSON file",
    },
    CommandSpec {
        usage: "stats",
        description: "Show board size and painted cell count",
    },
    CommandSpec {
        usage: "help",
        description: "Show available commands",
    },
    CommandSpec {
        usage: "q, quit",
        description: "Exit",
    },
];

#[must_use]
pub fn command_help() -> String {
    let width = COMMAND_SPECS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    COMMAND_SPECS
        .iter()
        .map(|spec| format!("  {:width$}  {}", spec.usage, spec.description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parsed command. Arguments stay raw; the shell validates them.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Set {
        row: Option<&'a str>,
        col: Option<&'a str>,
        color: Option<&'a str>,
    },
    Get {
        row: Option<&'a str>,
        col: Option<&'a str>,
    },
    Board,
    Tokens,
    Export(Option<&'a str>),
    Stats,
    Help,
    Quit,
    Unknown(&'a str),
    Empty,
}

impl<'a> Command<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let parts: Vec<&str> = raw.split_whitespace().collect();
        let arg = |index: usize| parts.get(index).copied();

        match parts.first().copied() {
            Some("set" | "s") => Command::Set {
                row: arg(1),
                col: arg(2),
                color: arg(3),
            },
            Some("get" | "g") => Command::Get {
                row: arg(1),
                col: arg(2),
            },
            Some("board" | "b") => Command::Board,
            Some("tokens") => Command::Tokens,
            Some("export") => Command::Export(arg(1)),
            Some("stats") => Command::Stats,
            Some("help" | "?") => Command::Help,
            Some("q" | "quit" | "exit") => Command::Quit,
            Some(cmd) if cmd.starts_with('#') => Command::Empty,
            Some(cmd) => Command::Unknown(cmd),
            None => Command::Empty,
        }
    }
}
