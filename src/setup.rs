use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_TABLES: u8 = 2;
pub const MAX_TABLES: u8 = 12;
pub const DEFAULT_TABLES: u8 = 5;

/// Highest times table to practice, always within [MIN_TABLES, MAX_TABLES]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TablesMax(u8);

impl TablesMax {
    /// Clamp an arbitrary value into the stepper range
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(MIN_TABLES, MAX_TABLES))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn can_increment(self) -> bool {
        self.0 < MAX_TABLES
    }

    pub fn can_decrement(self) -> bool {
        self.0 > MIN_TABLES
    }

    /// Returns false (and leaves the value alone) when already at the upper bound.
    pub fn increment(&mut self) -> bool {
        if !self.can_increment() {
            return false;
        }
        self.0 += 1;
        true
    }

    /// Returns false (and leaves the value alone) when already at the lower bound.
    pub fn decrement(&mut self) -> bool {
        if !self.can_decrement() {
            return false;
        }
        self.0 -= 1;
        true
    }
}

impl Default for TablesMax {
    fn default() -> Self {
        Self(DEFAULT_TABLES)
    }
}

impl fmt::Display for TablesMax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("question count must be one of 5, 10 or 20 (got {0})")]
pub struct QuestionCountError(pub String);

/// How many rounds a game runs for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum QuestionCount {
    Five,
    #[default]
    Ten,
    Twenty,
}

impl QuestionCount {
    pub const ALL: [QuestionCount; 3] = [Self::Five, Self::Ten, Self::Twenty];

    pub fn get(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Twenty => 20,
        }
    }

    /// Position within `ALL`, used by the segmented selector
    pub fn position(self) -> usize {
        match self {
            Self::Five => 0,
            Self::Ten => 1,
            Self::Twenty => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl From<QuestionCount> for u32 {
    fn from(qc: QuestionCount) -> Self {
        qc.get()
    }
}

impl TryFrom<u32> for QuestionCount {
    type Error = QuestionCountError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            20 => Ok(Self::Twenty),
            other => Err(QuestionCountError(other.to_string())),
        }
    }
}

impl FromStr for QuestionCount {
    type Err = QuestionCountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map_err(|_| QuestionCountError(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Snapshot handed from setup to a game. Copied, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Configuration {
    pub tables_max: TablesMax,
    pub question_count: QuestionCount,
}

/// The pre-game screen: a bounded stepper and a fixed selection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Setup {
    pub tables_max: TablesMax,
    pub question_count: QuestionCount,
}

impl Setup {
    pub fn new(config: Configuration) -> Self {
        Self {
            tables_max: config.tables_max,
            question_count: config.question_count,
        }
    }

    pub fn step_up(&mut self) -> bool {
        self.tables_max.increment()
    }

    pub fn step_down(&mut self) -> bool {
        self.tables_max.decrement()
    }

    pub fn select(&mut self, count: QuestionCount) {
        self.question_count = count;
    }

    pub fn select_next(&mut self) {
        self.question_count = self.question_count.next();
    }

    pub fn select_previous(&mut self) {
        self.question_count = self.question_count.previous();
    }

    pub fn confirm(&self) -> Configuration {
        Configuration {
            tables_max: self.tables_max,
            question_count: self.question_count,
        }
    }
}
