//! Line-oriented text front end over the engine.
//!
//! Each input line is one command. Output is plain text meant for a
//! terminal; the engine itself never prints.

use derive_more::{Display, Error};
use gambit_engine::{
    Color, Game, GameState, MoveReport, PieceId, RuleSet, Square, SquareOutcome, UpgradeResponse,
    catalog,
};
use std::io::{BufRead, Write};
use std::str::FromStr;
use strum::{EnumMessage, IntoEnumIterator};
use tracing::{debug, instrument};

/// Command keywords.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
    strum::EnumMessage,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
enum Verb {
    #[strum(message = "board", detailed_message = "show the board with the selection's moves")]
    Board,
    #[strum(message = "select ROW COL", detailed_message = "click a square (select, move or deselect)")]
    Select,
    #[strum(message = "teleport ROW COL", detailed_message = "teleport the selected piece to an empty square")]
    Teleport,
    #[strum(message = "upgrade PIECE UPGRADE", detailed_message = "buy an upgrade, e.g. `upgrade #3 shield`")]
    Upgrade,
    #[strum(message = "pieces [white|black]", detailed_message = "list pieces with ids and abilities")]
    Pieces,
    #[strum(message = "shop", detailed_message = "list the upgrade catalog")]
    Shop,
    #[strum(message = "status", detailed_message = "show phase, turn and points")]
    Status,
    #[strum(message = "start", detailed_message = "finish setup and begin play")]
    Start,
    #[strum(message = "reset", detailed_message = "start over from the opening layout")]
    Reset,
    #[strum(message = "dump", detailed_message = "print the game snapshot as JSON")]
    Dump,
    #[strum(message = "help", detailed_message = "show this list")]
    Help,
    #[strum(message = "quit", detailed_message = "leave the console")]
    Quit,
}

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Print the board.
    Board,
    /// Click a square.
    Select(Square),
    /// Teleport the selection.
    Teleport(Square),
    /// Buy an upgrade.
    Upgrade {
        /// Target piece.
        piece: PieceId,
        /// Catalog id, validated by the engine.
        upgrade: String,
    },
    /// List pieces, optionally of one side.
    Pieces(Option<Color>),
    /// Print the catalog.
    Shop,
    /// Print phase, turn and points.
    Status,
    /// Start the game.
    Start,
    /// Reset the session.
    Reset,
    /// Print the snapshot as JSON.
    Dump,
    /// Print the command list.
    Help,
    /// Stop reading input.
    Quit,
}

/// Error parsing a console line.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{message}")]
pub struct ParseCommandError {
    /// Human-readable reason.
    pub message: String,
}

impl ParseCommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses `ROW COL` or `ROW,COL`.
fn parse_square(args: &[&str]) -> Result<Square, ParseCommandError> {
    let numbers = args
        .iter()
        .flat_map(|arg| arg.split(','))
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i32>()
                .map_err(|_| ParseCommandError::new(format!("Not a number: {}", part)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match numbers.as_slice() {
        [row, col] => {
            Square::checked(*row, *col).map_err(|e| ParseCommandError::new(e.to_string()))
        }
        _ => Err(ParseCommandError::new("Expected a square as ROW COL")),
    }
}

impl FromStr for ConsoleCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((first, args)) = words.split_first() else {
            return Err(ParseCommandError::new("Empty command"));
        };
        let verb = Verb::from_str(first)
            .map_err(|_| ParseCommandError::new(format!("Unknown command: {} (try `help`)", first)))?;

        let command = match verb {
            Verb::Board => ConsoleCommand::Board,
            Verb::Select => ConsoleCommand::Select(parse_square(args)?),
            Verb::Teleport => ConsoleCommand::Teleport(parse_square(args)?),
            Verb::Upgrade => match args {
                [piece, upgrade] => ConsoleCommand::Upgrade {
                    piece: piece
                        .parse()
                        .map_err(|_| ParseCommandError::new(format!("Not a piece id: {}", piece)))?,
                    upgrade: upgrade.to_string(),
                },
                _ => return Err(ParseCommandError::new("Expected: upgrade PIECE UPGRADE")),
            },
            Verb::Pieces => match args {
                [] => ConsoleCommand::Pieces(None),
                [color] => ConsoleCommand::Pieces(Some(
                    color
                        .parse()
                        .map_err(|_| ParseCommandError::new(format!("Not a color: {}", color)))?,
                )),
                _ => return Err(ParseCommandError::new("Expected: pieces [white|black]")),
            },
            Verb::Shop => ConsoleCommand::Shop,
            Verb::Status => ConsoleCommand::Status,
            Verb::Start => ConsoleCommand::Start,
            Verb::Reset => ConsoleCommand::Reset,
            Verb::Dump => ConsoleCommand::Dump,
            Verb::Help => ConsoleCommand::Help,
            Verb::Quit => ConsoleCommand::Quit,
        };
        Ok(command)
    }
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Print the text and keep reading.
    Continue(String),
    /// Stop.
    Quit,
}

/// Text console driving one game session.
#[derive(Debug, Clone)]
pub struct Console {
    game: Game,
}

impl Console {
    /// Creates a console over a fresh session.
    #[instrument]
    pub fn new(rules: RuleSet) -> Self {
        Self {
            game: Game::with_rules(rules),
        }
    }

    /// The underlying session.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs one command against the session.
    #[instrument(skip(self))]
    pub fn execute(&mut self, command: ConsoleCommand) -> Step {
        let text = match command {
            ConsoleCommand::Board => render_board(self.game.state()),
            ConsoleCommand::Select(square) => self.click(square),
            ConsoleCommand::Teleport(square) => match self.game.teleport(square) {
                Some(report) => describe_move("Teleported", &report),
                None => "Teleport not possible".to_string(),
            },
            ConsoleCommand::Upgrade { piece, upgrade } => {
                let response = UpgradeResponse::from(self.game.apply_upgrade(piece, &upgrade));
                match response.message {
                    None => "Upgrade applied!".to_string(),
                    Some(message) => message,
                }
            }
            ConsoleCommand::Pieces(color) => render_pieces(self.game.state(), color),
            ConsoleCommand::Shop => render_shop(),
            ConsoleCommand::Status => render_status(&self.game),
            ConsoleCommand::Start => {
                if self.game.start_game() {
                    "Game started. White to move.".to_string()
                } else {
                    "The game has already started".to_string()
                }
            }
            ConsoleCommand::Reset => {
                self.game.reset_game();
                "Board reset".to_string()
            }
            ConsoleCommand::Dump => match serde_json::to_string_pretty(self.game.state()) {
                Ok(json) => json,
                Err(e) => format!("Could not serialize state: {}", e),
            },
            ConsoleCommand::Help => render_help(),
            ConsoleCommand::Quit => return Step::Quit,
        };
        Step::Continue(text)
    }

    fn click(&mut self, square: Square) -> String {
        match self.game.select_square(square) {
            SquareOutcome::Ignored => "Nothing happened".to_string(),
            SquareOutcome::Selected(id) => {
                let state = self.game.state();
                format!(
                    "Selected {} ({} moves)\n{}",
                    id,
                    state.legal_moves().len(),
                    render_board(state)
                )
            }
            SquareOutcome::Cleared => "Selection cleared".to_string(),
            SquareOutcome::Moved(report) => describe_move("Moved", &report),
            SquareOutcome::Shielded { attacker, defender } => format!(
                "{}'s shield absorbed the attack by {}. Nothing moved.",
                defender, attacker
            ),
        }
    }

    /// Reads commands until end of input or `quit`.
    ///
    /// Blank lines and `#` comments are skipped. Lines that do not parse
    /// print their error and the loop continues.
    #[instrument(skip_all)]
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line.parse::<ConsoleCommand>() {
                Ok(command) => match self.execute(command) {
                    Step::Continue(text) => writeln!(output, "{}", text)?,
                    Step::Quit => break,
                },
                Err(e) => {
                    debug!(%line, error = %e, "Unparsable command");
                    writeln!(output, "{}", e)?;
                }
            }
        }
        output.flush()
    }
}

fn describe_move(verb: &str, report: &MoveReport) -> String {
    let mut text = format!("{} {} {} -> {}", verb, report.piece, report.from, report.to);
    if let Some(captured) = &report.captured {
        text.push_str(&format!(", captured {} {}", captured.color(), captured.kind()));
    }
    if report.awarded > 0 {
        text.push_str(&format!(" (+{} pts)", report.awarded));
    }
    if let Some(winner) = report.winner {
        text.push_str(&format!("\n{} wins! Win bonus awarded. Reset to play again.", winner));
    }
    text
}

/// Board text with the selection's destinations highlighted.
pub fn render_board(state: &GameState) -> String {
    state.board().display(state.legal_moves())
}

/// One line per piece: id, color, kind, square and ability badges.
pub fn render_pieces(state: &GameState, color: Option<Color>) -> String {
    state
        .pieces()
        .iter()
        .filter(|p| color.is_none_or(|c| p.color() == c))
        .map(|p| {
            let badges = p.abilities().badges();
            if badges.is_empty() {
                p.to_string()
            } else {
                format!("{} [{}]", p, badges.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The upgrade catalog as a table.
pub fn render_shop() -> String {
    catalog()
        .iter()
        .map(|spec| {
            format!(
                "{:<14} {:<26} {:>3} pts  {}",
                spec.id().to_string(),
                spec.name(),
                spec.cost(),
                spec.description()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_status(game: &Game) -> String {
    let state = game.state();
    let mut text = format!(
        "{} | white: {} pts | black: {} pts",
        state.status(),
        state.points().get(Color::White),
        state.points().get(Color::Black)
    );
    if let Some(piece) = state.selected_piece() {
        text.push_str(&format!(" | selected: {}", piece));
        if game.can_teleport() {
            text.push_str(" (teleport ready)");
        }
    }
    text
}

fn render_help() -> String {
    Verb::iter()
        .map(|verb| {
            format!(
                "{:<24} {}",
                verb.get_message().unwrap_or_default(),
                verb.get_detailed_message().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
