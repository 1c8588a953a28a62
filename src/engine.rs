//! The grade aggregation engine.
//!
//! A [`Calculator`] turns module records into a semester GPA and semester GPAs
//! into a cumulative GPA. It is pure: no I/O, no shared state, identical input
//! gives identical output, so one calculator can serve any number of callers.
//!
//! Cumulative GPA is a credit-weighted average of the *rounded* semester GPAs,
//! not a single pass over every module. Both averages are rounded with
//! [`round_to_cents`].

use serde::{Deserialize, Serialize};

use crate::grade::{GradeEntry, GradeScale, Standing};

fn default_is_gpa() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub code: String,
    pub title: String,
    pub grade: GradeEntry,
    pub credits: f64,
    #[serde(default = "default_is_gpa")]
    pub is_gpa: bool,
}

impl ModuleRecord {
    pub fn new(
        code: impl Into<String>,
        title: impl Into<String>,
        grade: impl Into<GradeEntry>,
        credits: f64,
        is_gpa: bool,
    ) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            grade: grade.into(),
            credits,
            is_gpa,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    pub name: String,
    pub modules: Vec<ModuleRecord>,
}

impl Semester {
    pub fn new(name: impl Into<String>, modules: Vec<ModuleRecord>) -> Self {
        Self { name: name.into(), modules }
    }
}

/// GPA and included credits of one set of modules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SemesterGpa {
    pub sgpa: f64,
    pub credits: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemesterResult {
    #[serde(rename = "semester")]
    pub name: String,
    pub sgpa: f64,
    pub credits: f64,
}

impl SemesterResult {
    pub fn gpa(&self) -> SemesterGpa {
        SemesterGpa { sgpa: self.sgpa, credits: self.credits }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinalResult {
    pub final_sgpa: f64,
    pub standing: Standing,
}

/// Rounds to two decimals, ties to even on the exact binary value.
///
/// `2.675` is stored as `2.67499…` and becomes `2.67`; `3.125` is an exact tie
/// and becomes `3.12`.
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

fn weighted_average(points: f64, credits: f64) -> f64 {
    if credits > 0.0 { round_to_cents(points / credits) } else { 0.0 }
}

#[derive(Debug, Clone, Default)]
pub struct Calculator {
    scale: GradeScale,
}

impl Calculator {
    pub fn new(scale: GradeScale) -> Self {
        Self { scale }
    }

    /// Skips modules that are not GPA modules or carry no known grade.
    pub fn semester_gpa<'m>(&self, modules: impl IntoIterator<Item = &'m ModuleRecord>) -> SemesterGpa {
        let mut total_credits = 0.0;
        let mut total_points = 0.0;
        for module in modules {
            if !module.is_gpa {
                continue;
            }
            if let Some(grade) = module.grade.grade() {
                total_credits += module.credits;
                total_points += self.scale.points(grade) * module.credits;
            }
        }
        SemesterGpa {
            sgpa: weighted_average(total_points, total_credits),
            credits: total_credits,
        }
    }

    pub fn semester(&self, semester: &Semester) -> SemesterResult {
        let SemesterGpa { sgpa, credits } = self.semester_gpa(&semester.modules);
        SemesterResult { name: semester.name.clone(), sgpa, credits }
    }

    /// Combines already computed semester results.
    pub fn combine(&self, semesters: impl IntoIterator<Item = SemesterGpa>) -> FinalResult {
        let mut total_credits = 0.0;
        let mut total_points = 0.0;
        for SemesterGpa { sgpa, credits } in semesters {
            total_credits += credits;
            total_points += sgpa * credits;
        }
        let final_sgpa = weighted_average(total_points, total_credits);
        FinalResult { final_sgpa, standing: Standing::from_gpa(final_sgpa) }
    }

    pub fn cumulative(&self, semesters: &[Semester]) -> FinalResult {
        self.combine(semesters.iter().map(|semester| self.semester_gpa(&semester.modules)))
    }
}
