//! Direction registry
//!
//! The closed set of movement directions, their reciprocals and the phrase
//! used when narrating an arrival. Exits additionally carry the region
//! hierarchy markers `ascend`/`descend`, modelled by [`ExitDirection`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A direction an actor can travel in.
///
/// Declaration order is the canonical listing order (compass clockwise from
/// north, then vertical, then in/out).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
    Up,
    Down,
    In,
    Out,
}

impl Direction {
    /// Every direction, in canonical order.
    pub const ALL: [Direction; 12] = [
        Direction::North,
        Direction::Northeast,
        Direction::East,
        Direction::Southeast,
        Direction::South,
        Direction::Southwest,
        Direction::West,
        Direction::Northwest,
        Direction::Up,
        Direction::Down,
        Direction::In,
        Direction::Out,
    ];

    /// Get the string representation for storage and narration
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
            Self::Up => "up",
            Self::Down => "down",
            Self::In => "in",
            Self::Out => "out",
        }
    }

    /// The direction that leads back to where the traveller came from.
    ///
    /// `In` and `Out` have no reciprocal: they are not assumed to undo each
    /// other, so `None` is returned rather than a guess.
    pub fn reciprocal(&self) -> Option<Direction> {
        match self {
            Self::North => Some(Self::South),
            Self::Northeast => Some(Self::Southwest),
            Self::East => Some(Self::West),
            Self::Southeast => Some(Self::Northwest),
            Self::South => Some(Self::North),
            Self::Southwest => Some(Self::Northeast),
            Self::West => Some(Self::East),
            Self::Northwest => Some(Self::Southeast),
            Self::Up => Some(Self::Down),
            Self::Down => Some(Self::Up),
            Self::In | Self::Out => None,
        }
    }

    /// Phrase describing where an actor who travelled in this direction
    /// arrives from.
    pub fn arrival_phrase(&self) -> ArrivalPhrase {
        match self {
            Self::North => ArrivalPhrase::compass("south"),
            Self::Northeast => ArrivalPhrase::compass("southwest"),
            Self::East => ArrivalPhrase::compass("west"),
            Self::Southeast => ArrivalPhrase::compass("northwest"),
            Self::South => ArrivalPhrase::compass("north"),
            Self::Southwest => ArrivalPhrase::compass("northeast"),
            Self::West => ArrivalPhrase::compass("east"),
            Self::Northwest => ArrivalPhrase::compass("southeast"),
            Self::Up => ArrivalPhrase::vertical("below", "(down)"),
            Self::Down => ArrivalPhrase::vertical("above", "(up)"),
            Self::In => ArrivalPhrase {
                article: None,
                word: "outside",
                emphasized: true,
                hint: None,
            },
            Self::Out => ArrivalPhrase {
                article: None,
                word: "within",
                emphasized: false,
                hint: None,
            },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "north" => Ok(Self::North),
            "northeast" => Ok(Self::Northeast),
            "east" => Ok(Self::East),
            "southeast" => Ok(Self::Southeast),
            "south" => Ok(Self::South),
            "southwest" => Ok(Self::Southwest),
            "west" => Ok(Self::West),
            "northwest" => Ok(Self::Northwest),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "in" => Ok(Self::In),
            "out" => Ok(Self::Out),
            _ => Err(DomainError::unknown_direction(s)),
        }
    }
}

/// String-level reciprocal lookup.
///
/// Fails with `UnknownDirection` for strings outside the canonical set and
/// returns `Ok(None)` for directions without a reciprocal.
pub fn reciprocal_of(direction: &str) -> Result<Option<Direction>, DomainError> {
    Ok(direction.parse::<Direction>()?.reciprocal())
}

/// String-level arrival phrase lookup.
pub fn arrival_phrase_of(direction: &str) -> Result<ArrivalPhrase, DomainError> {
    Ok(direction.parse::<Direction>()?.arrival_phrase())
}

/// Markup used when rendering narration text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Markup {
    /// Plain text, no emphasis markers
    #[default]
    Plain,
    /// Forum-style `[b]…[/b]` emphasis
    BbCode,
}

impl Markup {
    /// Wrap `text` in this markup's emphasis marker.
    pub fn emphasize(&self, text: &str) -> String {
        match self {
            Self::Plain => text.to_string(),
            Self::BbCode => format!("[b]{}[/b]", text),
        }
    }
}

impl FromStr for Markup {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "" => Ok(Self::Plain),
            "bbcode" => Ok(Self::BbCode),
            _ => Err(DomainError::parse(format!("Invalid markup: {}", s))),
        }
    }
}

/// Structured arrival phrase: an optional article, the word that carries
/// emphasis, and an optional trailing hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalPhrase {
    pub article: Option<&'static str>,
    pub word: &'static str,
    pub emphasized: bool,
    pub hint: Option<&'static str>,
}

impl ArrivalPhrase {
    const fn compass(word: &'static str) -> Self {
        Self {
            article: Some("the"),
            word,
            emphasized: true,
            hint: None,
        }
    }

    const fn vertical(word: &'static str, hint: &'static str) -> Self {
        Self {
            article: None,
            word,
            emphasized: true,
            hint: Some(hint),
        }
    }

    /// Render the phrase with the given markup.
    pub fn render(&self, markup: Markup) -> String {
        let word = if self.emphasized {
            markup.emphasize(self.word)
        } else {
            self.word.to_string()
        };

        let mut out = String::new();
        if let Some(article) = self.article {
            out.push_str(article);
            out.push(' ');
        }
        out.push_str(&word);
        if let Some(hint) = self.hint {
            out.push(' ');
            out.push_str(hint);
        }
        out
    }

    /// Plain-text rendering.
    pub fn text(&self) -> String {
        self.render(Markup::Plain)
    }
}

impl fmt::Display for ArrivalPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Direction stored on an exit.
///
/// `Ascend`/`Descend` link a place to its region parent (and back); they are
/// never navigable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExitDirection {
    Navigable(Direction),
    Ascend,
    Descend,
}

impl ExitDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Navigable(direction) => direction.as_str(),
            Self::Ascend => "ascend",
            Self::Descend => "descend",
        }
    }

    pub fn is_hierarchy(&self) -> bool {
        matches!(self, Self::Ascend | Self::Descend)
    }

    /// The movement direction, if this exit can be travelled.
    pub fn navigable(&self) -> Option<Direction> {
        match self {
            Self::Navigable(direction) => Some(*direction),
            Self::Ascend | Self::Descend => None,
        }
    }
}

impl From<Direction> for ExitDirection {
    fn from(direction: Direction) -> Self {
        Self::Navigable(direction)
    }
}

impl fmt::Display for ExitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExitDirection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascend" => Ok(Self::Ascend),
            "descend" => Ok(Self::Descend),
            _ => s.parse::<Direction>().map(Self::Navigable),
        }
    }
}

impl TryFrom<String> for ExitDirection {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ExitDirection> for String {
    fn from(direction: ExitDirection) -> String {
        direction.as_str().to_string()
    }
}
