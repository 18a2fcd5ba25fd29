//! Assembles tag pairs and movetext into [`Game`]s.

use super::scanner::{PgnError, Scanner, TextPosition, Token};
use crate::config::PgnConfig;
use crate::game::{Game, GameResult, MoveToken};
use chess_core::Color;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

/// Reads games one at a time from a game-record text.
///
/// As an iterator it yields each game in order. After the first error it
/// yields that error once and then stops, so games read before the error
/// remain usable.
#[derive(Debug, Clone)]
pub struct GameReader {
    scanner: Scanner,
    config: PgnConfig,
    /// A fragment split off a fused token, read before the scanner.
    pending: Option<Token>,
    games_read: usize,
    failed: bool,
}

impl GameReader {
    /// Creates a reader over `text` with the default configuration.
    pub fn new(text: &str) -> Self {
        Self::with_config(text, PgnConfig::default())
    }

    pub fn with_config(text: &str, config: PgnConfig) -> Self {
        GameReader {
            scanner: Scanner::new(text),
            config,
            pending: None,
            games_read: 0,
            failed: false,
        }
    }

    /// Reads all of `reader` into memory and creates a reader over it.
    ///
    /// The input is buffered in full before the first game is scanned.
    pub fn from_reader<R: Read>(mut reader: R, config: PgnConfig) -> Result<Self, PgnError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::with_config(&text, config))
    }

    /// Returns the number of games read so far.
    pub fn games_read(&self) -> usize {
        self.games_read
    }

    /// Reads the next game, or `None` once the input is exhausted.
    pub fn next_game(&mut self) -> Result<Option<Game>, PgnError> {
        if self
            .config
            .max_games
            .is_some_and(|max| self.games_read >= max)
        {
            return Ok(None);
        }

        let Some(tags) = self.read_tags()? else {
            return Ok(None);
        };
        let (moves, result) = self.read_movetext()?;

        self.games_read += 1;
        debug!(
            game = self.games_read,
            tags = tags.len(),
            plies = moves.len(),
            %result,
            "parsed game"
        );
        Ok(Some(Game::new(tags, moves).with_result(result)))
    }

    /// Reads the tag section. Returns `None` if the input ends cleanly
    /// before any tag or movetext.
    fn read_tags(&mut self) -> Result<Option<HashMap<String, String>>, PgnError> {
        let mut tags = HashMap::new();
        loop {
            self.scanner.skip_whitespace();
            let at = self.scanner.position();
            match self.scanner.peek() {
                None if tags.is_empty() => return Ok(None),
                None => return Err(PgnError::UnexpectedEof { at }),
                Some(';') => self.scanner.skip_line(),
                Some('[') => {
                    let (name, value) = self.read_tag()?;
                    tags.insert(name, value);
                }
                Some(c) if c.is_ascii_digit() || c == '*' => return Ok(Some(tags)),
                Some(_) => {
                    return Err(PgnError::MalformedTag {
                        at,
                        reason: "expected '[' or the start of movetext",
                    })
                }
            }
        }
    }

    /// Reads one `[Name "Value"]` pair. The scanner is on the `[`.
    fn read_tag(&mut self) -> Result<(String, String), PgnError> {
        self.scanner.bump();
        self.scanner.skip_whitespace();

        let at = self.scanner.position();
        let name = self.read_tag_name_at(at)?;

        self.scanner.skip_whitespace();
        let value = self.scanner.read_quoted(self.config.allow_single_quotes)?;

        self.scanner.skip_whitespace();
        let at = self.scanner.position();
        match self.scanner.bump() {
            Some(']') => Ok((name, value)),
            Some(_) => Err(PgnError::MalformedTag {
                at,
                reason: "missing ']'",
            }),
            None => Err(PgnError::UnexpectedEof { at }),
        }
    }

    fn read_tag_name_at(&mut self, at: TextPosition) -> Result<String, PgnError> {
        let name = self.scanner.read_tag_name();
        if !name.is_empty() {
            return Ok(name);
        }
        if self.scanner.is_eof() {
            Err(PgnError::UnexpectedEof { at })
        } else {
            Err(PgnError::MalformedTag {
                at,
                reason: "missing tag name",
            })
        }
    }

    /// Reads movetext up to and including the result token.
    fn read_movetext(&mut self) -> Result<(Vec<MoveToken>, GameResult), PgnError> {
        let mut moves = Vec::new();
        loop {
            let Some(token) = self.next_token()? else {
                return Err(PgnError::UnexpectedEof {
                    at: self.scanner.position(),
                });
            };
            let text = token.text.as_str();

            if let Some(result) = GameResult::from_token(text) {
                return Ok((moves, result));
            }
            // A result glued to the next turn number does not end the game;
            // the turn number is read again as the next token.
            if let Some(rest) = fused_result_remainder(text) {
                self.push_back(&token, rest);
                continue;
            }
            if let Some(rest) = strip_turn_marker(text) {
                if !rest.is_empty() {
                    self.push_back(&token, rest);
                }
                continue;
            }
            if text.starts_with(['[', ']', '}']) {
                return Err(PgnError::UnexpectedToken {
                    at: token.at,
                    token: token.text,
                });
            }

            let color = if moves.len() % 2 == 0 {
                Color::White
            } else {
                Color::Black
            };
            moves.push(MoveToken::new(color, token.text));
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, PgnError> {
        if let Some(token) = self.pending.take() {
            return Ok(Some(token));
        }
        self.scanner.movetext_token(self.config.skip_variations)
    }

    /// Holds back the trailing `rest` of `token` as the next token.
    fn push_back(&mut self, token: &Token, rest: &str) {
        let consumed = token.text[..token.text.len() - rest.len()].chars().count();
        self.pending = Some(Token {
            text: rest.to_string(),
            at: token.at.advanced(consumed),
        });
    }
}

impl Iterator for GameReader {
    type Item = Result<Game, PgnError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_game() {
            Ok(game) => game.map(Ok),
            Err(e) => {
                self.failed = true;
                warn!(error = %e, games = self.games_read, "stopped reading game records");
                Some(Err(e))
            }
        }
    }
}

/// Strips a turn marker (`12.`, `12...`, `...` or a bare `12`) from the
/// front of `text` and returns what follows it.
fn strip_turn_marker(text: &str) -> Option<&str> {
    let after_number = text.trim_start_matches(|c: char| c.is_ascii_digit());
    let after_dots = after_number.trim_start_matches('.');
    if after_dots.len() < after_number.len() {
        Some(after_dots)
    } else if after_number.is_empty() && !text.is_empty() {
        Some("")
    } else {
        None
    }
}

/// For a token like `1-02.` returns `2.`: a result immediately followed
/// by a turn marker.
fn fused_result_remainder(text: &str) -> Option<&str> {
    GameResult::TOKENS.iter().find_map(|result| {
        let rest = text.strip_prefix(result)?;
        (!rest.is_empty() && strip_turn_marker(rest).is_some()).then_some(rest)
    })
}

/// Parses every game in `text` with the default configuration.
///
/// Fails on the first error; use [`GameReader`] or [`parse_partial`] to
/// keep the games read before it.
pub fn parse_str(text: &str) -> Result<Vec<Game>, PgnError> {
    GameReader::new(text).collect()
}

/// Parses every game from an [`io::Read`](std::io::Read) source.
///
/// This is not streaming: the whole input is read into memory first, so an
/// I/O error surfaces before any game is returned.
pub fn parse_reader<R: Read>(reader: R, config: PgnConfig) -> Result<Vec<Game>, PgnError> {
    GameReader::from_reader(reader, config)?.collect()
}

/// Parses as many games as possible, returning them along with the error
/// that stopped the reader, if any.
pub fn parse_partial(text: &str, config: PgnConfig) -> (Vec<Game>, Option<PgnError>) {
    let mut games = Vec::new();
    for item in GameReader::with_config(text, config) {
        match item {
            Ok(game) => games.push(game),
            Err(e) => return (games, Some(e)),
        }
    }
    (games, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_GAMES: &str = r#"[Event "Casual"]
[White "Anderssen"]
[Black "Kieseritzky"]
[Result "1-0"]

1. e4 e5 2. f4 exf4 1-0

[Event "Second"]
[Result "*"]

1. d4 d5 *
"#;

    fn texts(game: &Game) -> Vec<&str> {
        game.moves().iter().map(|m| m.text.as_str()).collect()
    }

    #[test]
    fn reads_tags_moves_and_result() {
        let games = parse_str(TWO_GAMES).unwrap();
        assert_eq!(games.len(), 2);

        let first = &games[0];
        assert_eq!(first.tag("White"), Some("Anderssen"));
        assert_eq!(first.tags().len(), 4);
        assert_eq!(texts(first), vec!["e4", "e5", "f4", "exf4"]);
        assert_eq!(first.result(), Some(GameResult::WhiteWins));
        assert_eq!(first.moves()[0].color, Color::White);
        assert_eq!(first.moves()[3].color, Color::Black);
        assert_eq!(first.moves()[3].player_label(), "B");
        assert_eq!(first.cursor(), 0);

        assert_eq!(games[1].tag("Event"), Some("Second"));
        assert_eq!(games[1].result(), Some(GameResult::Unfinished));
    }

    #[test]
    fn empty_input_has_no_games() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("  \n\n ").unwrap().is_empty());
        assert!(parse_str("; only a comment\n").unwrap().is_empty());
    }

    #[test]
    fn game_without_tags() {
        let games = parse_str("1. e4 c5 2. Nf3 1/2-1/2").unwrap();
        assert_eq!(texts(&games[0]), vec!["e4", "c5", "Nf3"]);
        assert_eq!(games[0].result(), Some(GameResult::Draw));
        assert!(games[0].tags().is_empty());
    }

    #[test]
    fn game_without_moves() {
        let games = parse_str("[Event \"Forfeit\"]\n*").unwrap();
        assert!(games[0].moves().is_empty());
        assert!(games[0].is_finished());
    }

    #[test]
    fn escaped_tag_values() {
        let games = parse_str(r#"[Annotator "A \"quoted\" \\ name"] 1. e4 *"#).unwrap();
        assert_eq!(games[0].tag("Annotator"), Some(r#"A "quoted" \ name"#));
    }

    #[test]
    fn tag_comments_are_skipped() {
        let games = parse_str("; header note\n[Event \"x\"]\n; another\n1. e4 *").unwrap();
        assert_eq!(games[0].tags().len(), 1);
    }

    #[test]
    fn fused_turn_numbers() {
        let games = parse_str("1.e4 e5 2.Nf3 Nc6 3.Bb5 *").unwrap();
        assert_eq!(texts(&games[0]), vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]);
    }

    #[test]
    fn result_fused_to_next_turn_is_held_back() {
        let games = parse_str("1. e4 e5 1-02. Nf3 Nc6 0-13.Bb5 a6 *").unwrap();
        assert_eq!(texts(&games[0]), vec!["e4", "e5", "Nf3", "Nc6", "Bb5", "a6"]);
        assert_eq!(games[0].result(), Some(GameResult::Unfinished));
    }

    #[test]
    fn castling_is_not_a_turn_number() {
        let games = parse_str("1. O-O 0-0 2. 0-0-0 O-O-O 0-1").unwrap();
        assert_eq!(texts(&games[0]), vec!["O-O", "0-0", "0-0-0", "O-O-O"]);
        assert_eq!(games[0].result(), Some(GameResult::BlackWins));
    }

    #[test]
    fn annotations_are_skipped() {
        let text = "1. e4 {best by test} e5 $1 2. Nf3 (2. f4 exf4) 2... Nc6 ; aside\n3. Bb5 1-0";
        let games = parse_str(text).unwrap();
        assert_eq!(texts(&games[0]), vec!["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!(games[0].moves()[3].color, Color::Black);
    }

    #[test]
    fn variations_rejected_by_config() {
        let config = PgnConfig {
            skip_variations: false,
            ..PgnConfig::default()
        };
        let (games, err) = parse_partial("1. e4 (1. d4) e5 *", config);
        assert!(games.is_empty());
        assert!(matches!(err, Some(PgnError::UnexpectedToken { ref token, .. }) if token == "("));
    }

    #[test]
    fn single_quotes_follow_config() {
        assert_eq!(
            parse_str("[Site 'Paris'] 1. e4 *").unwrap()[0].tag("Site"),
            Some("Paris")
        );
        let config = PgnConfig {
            allow_single_quotes: false,
            ..PgnConfig::default()
        };
        let (_, err) = parse_partial("[Site 'Paris'] 1. e4 *", config);
        assert!(matches!(err, Some(PgnError::MalformedTag { .. })));
    }

    #[test]
    fn max_games_stops_early() {
        let config = PgnConfig {
            max_games: Some(1),
            ..PgnConfig::default()
        };
        let mut reader = GameReader::with_config(TWO_GAMES, config);
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().is_none());
        assert_eq!(reader.games_read(), 1);
    }

    #[test]
    fn unterminated_tag_value() {
        let err = parse_str("[Event \"never closed\n1. e4 *").unwrap_err();
        match err {
            PgnError::UnterminatedTagValue { at } => {
                assert_eq!(at, TextPosition { line: 1, column: 8 })
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_close_bracket() {
        let err = parse_str("[Event \"x\" 1. e4 *").unwrap_err();
        assert!(matches!(err, PgnError::MalformedTag { at, .. } if at.column == 12));
    }

    #[test]
    fn missing_tag_name() {
        let err = parse_str("[ \"x\"] 1. e4 *").unwrap_err();
        assert!(matches!(err, PgnError::MalformedTag { reason: "missing tag name", .. }));
    }

    #[test]
    fn garbage_before_movetext() {
        let err = parse_str("Event \"x\"\n1. e4 *").unwrap_err();
        assert!(matches!(err, PgnError::MalformedTag { at, .. } if at == TextPosition::START));
    }

    #[test]
    fn eof_mid_movetext_and_mid_tags() {
        let err = parse_str("[Event \"x\"]\n1. e4 e5").unwrap_err();
        assert!(matches!(err, PgnError::UnexpectedEof { at } if at.line == 2));

        let err = parse_str("[Event \"x\"]\n").unwrap_err();
        assert!(matches!(err, PgnError::UnexpectedEof { .. }));

        let err = parse_str("[Event").unwrap_err();
        assert!(matches!(err, PgnError::UnexpectedEof { .. }));
    }

    #[test]
    fn tag_inside_movetext_is_rejected() {
        let err = parse_str("1. e4 e5\n[Event \"next\"]\n1. d4 *").unwrap_err();
        match err {
            PgnError::UnexpectedToken { at, token } => {
                assert_eq!(token, "[Event");
                assert_eq!(at, TextPosition { line: 2, column: 1 });
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn earlier_games_survive_a_later_error() {
        let text = format!("{}\n[Event \"broken\"]\n1. e4 {{oops", TWO_GAMES);
        let mut reader = GameReader::new(&text);
        assert!(reader.next().unwrap().is_ok());
        assert!(reader.next().unwrap().is_ok());
        assert!(matches!(
            reader.next(),
            Some(Err(PgnError::UnterminatedComment { .. }))
        ));
        assert!(reader.next().is_none());

        let (games, err) = parse_partial(&text, PgnConfig::default());
        assert_eq!(games.len(), 2);
        assert!(err.is_some());
        assert!(parse_str(&text).is_err());
    }

    #[test]
    fn reads_from_io() {
        let games = parse_reader(TWO_GAMES.as_bytes(), PgnConfig::default()).unwrap();
        assert_eq!(games.len(), 2);
    }

    #[test]
    fn io_errors_are_reported() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"))
            }
        }
        let err = parse_reader(Failing, PgnConfig::default()).unwrap_err();
        assert!(matches!(err, PgnError::Io(_)));
        assert_eq!(err.position(), None);
    }

    #[test]
    fn turn_marker_shapes() {
        assert_eq!(strip_turn_marker("12."), Some(""));
        assert_eq!(strip_turn_marker("12...Nf6"), Some("Nf6"));
        assert_eq!(strip_turn_marker("..."), Some(""));
        assert_eq!(strip_turn_marker("7"), Some(""));
        assert_eq!(strip_turn_marker("0-0"), None);
        assert_eq!(strip_turn_marker("e4"), None);
        assert_eq!(fused_result_remainder("1/2-1/24."), Some("4."));
        assert_eq!(fused_result_remainder("1-0"), None);
        assert_eq!(fused_result_remainder("0-0-0"), None);
    }
}
