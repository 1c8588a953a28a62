//! Grade symbols, the grade-point scale and academic standing tiers.
//!
//! A submitted grade is one of three things: a known [`Grade`], the
//! "Not Selected" sentinel the input form shows before a choice is made, or
//! some other string. All three are valid [`GradeEntry`] values; only the first
//! carries grade points.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Shown by input forms for a module whose grade has not been picked yet.
pub const NOT_SELECTED: &str = "Not Selected";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    CMinus,
    D,
    F,
    IWe,
}

impl Grade {
    pub const COUNT: usize = 12;

    /// Symbols in the order input forms list them.
    pub const ALL: [Grade; Grade::COUNT] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::CMinus,
        Grade::D,
        Grade::IWe,
        Grade::F,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
            Grade::IWe => "I-we",
        }
    }

    /// Exact, case-sensitive match against the symbol set.
    pub fn from_symbol(symbol: &str) -> Option<Grade> {
        Grade::ALL.into_iter().find(|grade| grade.symbol() == symbol)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A grade as it arrives from the input collector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GradeEntry {
    Graded(Grade),
    NotSelected,
    Unrecognized(String),
}

impl GradeEntry {
    /// The grade taking part in aggregation, if any.
    pub fn grade(&self) -> Option<Grade> {
        match self {
            GradeEntry::Graded(grade) => Some(*grade),
            GradeEntry::NotSelected | GradeEntry::Unrecognized(_) => None,
        }
    }
    pub fn symbol(&self) -> &str {
        match self {
            GradeEntry::Graded(grade) => grade.symbol(),
            GradeEntry::NotSelected => NOT_SELECTED,
            GradeEntry::Unrecognized(raw) => raw,
        }
    }
    pub fn is_selected(&self) -> bool {
        !matches!(self, GradeEntry::NotSelected)
    }
}

impl From<&str> for GradeEntry {
    fn from(raw: &str) -> Self {
        if raw == NOT_SELECTED {
            return GradeEntry::NotSelected;
        }
        match Grade::from_symbol(raw) {
            Some(grade) => GradeEntry::Graded(grade),
            None => GradeEntry::Unrecognized(raw.to_string()),
        }
    }
}

impl From<String> for GradeEntry {
    fn from(raw: String) -> Self {
        match GradeEntry::from(raw.as_str()) {
            GradeEntry::Unrecognized(_) => GradeEntry::Unrecognized(raw),
            entry => entry,
        }
    }
}

impl From<Grade> for GradeEntry {
    fn from(grade: Grade) -> Self {
        GradeEntry::Graded(grade)
    }
}

impl From<GradeEntry> for String {
    fn from(entry: GradeEntry) -> Self {
        match entry {
            GradeEntry::Unrecognized(raw) => raw,
            other => other.symbol().to_string(),
        }
    }
}

impl fmt::Display for GradeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Grade points per symbol. Immutable once built; the calculator owns one.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeScale {
    points: [f64; Grade::COUNT],
}

impl GradeScale {
    pub fn points(&self, grade: Grade) -> f64 {
        self.points[grade as usize]
    }
    /// Returns a copy of the scale with one grade remapped.
    pub fn with_points(mut self, grade: Grade, points: f64) -> Self {
        self.points[grade as usize] = points;
        self
    }
}

impl Default for GradeScale {
    fn default() -> Self {
        let mut points = [0.0; Grade::COUNT];
        for grade in Grade::ALL {
            points[grade as usize] = match grade {
                Grade::APlus => 4.2,
                Grade::A => 4.0,
                Grade::AMinus => 3.7,
                Grade::BPlus => 3.3,
                Grade::B => 3.0,
                Grade::BMinus => 2.7,
                Grade::CPlus => 2.3,
                Grade::C => 2.0,
                Grade::CMinus => 1.5,
                Grade::D => 1.0,
                Grade::F | Grade::IWe => 0.0,
            };
        }
        Self { points }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standing {
    #[serde(rename = "First Class")]
    FirstClass,
    #[serde(rename = "Second Class - Upper Division")]
    SecondClassUpper,
    #[serde(rename = "Second Class - Lower Division")]
    SecondClassLower,
    #[serde(rename = "Pass")]
    Pass,
    #[serde(rename = "Fail")]
    Fail,
}

impl Standing {
    const TIERS: [(f64, Standing); 4] = [
        (3.7, Standing::FirstClass),
        (3.3, Standing::SecondClassUpper),
        (3.0, Standing::SecondClassLower),
        (2.0, Standing::Pass),
    ];

    /// First tier whose lower bound the gpa reaches; NaN falls through to Fail.
    pub fn from_gpa(gpa: f64) -> Standing {
        Standing::TIERS
            .iter()
            .find(|(lower, _)| gpa >= *lower)
            .map(|(_, standing)| *standing)
            .unwrap_or(Standing::Fail)
    }
    pub fn label(self) -> &'static str {
        match self {
            Standing::FirstClass => "First Class",
            Standing::SecondClassUpper => "Second Class - Upper Division",
            Standing::SecondClassLower => "Second Class - Lower Division",
            Standing::Pass => "Pass",
            Standing::Fail => "Fail",
        }
    }
    pub fn from_label(label: &str) -> Option<Standing> {
        [
            Standing::FirstClass,
            Standing::SecondClassUpper,
            Standing::SecondClassLower,
            Standing::Pass,
            Standing::Fail,
        ]
        .into_iter()
        .find(|standing| standing.label() == label)
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
