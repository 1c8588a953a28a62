//! Request/response boundary between callers and the engine plus record store.
//!
//! The engine operations never fail. Submissions are validated before anything
//! is computed, and the store sits behind a mutex so saves are serialised.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{Calculator, FinalResult, ModuleRecord, Semester, SemesterResult};
use crate::error::{Result, SgpaError};
use crate::grade::{Grade, NOT_SELECTED};
use crate::persist::{RecordStore, SaveSummary, StudentProfile, Transcript};

pub const CREDIT_MIN: f64 = 0.0;
pub const CREDIT_MAX: f64 = 6.0;
pub const CREDIT_STEP: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(flatten)]
    pub student: StudentProfile,
    pub semesters: Vec<Semester>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub semesters: Vec<SemesterResult>,
    #[serde(flatten)]
    pub result: FinalResult,
    pub stored: SaveSummary,
}

/// What an input form needs to offer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vocabulary {
    pub grades: Vec<&'static str>,
    pub not_selected: &'static str,
    pub credit_min: f64,
    pub credit_max: f64,
    pub credit_step: f64,
}

/// Rejects credit values outside what an input form can offer.
pub fn validate_modules<'m>(modules: impl IntoIterator<Item = &'m ModuleRecord>) -> Result<()> {
    for module in modules {
        if !(CREDIT_MIN..=CREDIT_MAX).contains(&module.credits) {
            return Err(SgpaError::validation(format!(
                "module '{}' has invalid credits {}",
                module.code, module.credits
            )));
        }
    }
    Ok(())
}

pub fn validate_semesters(semesters: &[Semester]) -> Result<()> {
    semesters.iter().try_for_each(|semester| validate_modules(&semester.modules))
}

/// Trims every field so the stored registration number matches later lookups.
fn normalize_profile(profile: &StudentProfile) -> Result<StudentProfile> {
    let profile = StudentProfile {
        name: profile.name.trim().to_string(),
        registration_number: profile.registration_number.trim().to_string(),
        department: profile.department.trim().to_string(),
        batch: profile.batch.trim().to_string(),
    };
    if profile.name.is_empty() {
        return Err(SgpaError::validation("student name is empty"));
    }
    if profile.registration_number.is_empty() {
        return Err(SgpaError::validation("registration number is empty"));
    }
    Ok(profile)
}

pub struct GradeInterface {
    calculator: Calculator,
    store: Mutex<RecordStore>,
}

impl GradeInterface {
    pub fn new(calculator: Calculator, store: RecordStore) -> Self {
        Self { calculator, store: Mutex::new(store) }
    }

    pub fn compute_semester(&self, semester: &Semester) -> SemesterResult {
        self.calculator.semester(semester)
    }

    pub fn compute_final(&self, semesters: &[Semester]) -> FinalResult {
        self.calculator.cumulative(semesters)
    }

    /// Computes every semester and the final result, then stores the submission.
    pub fn submit(&self, submission: &Submission) -> Result<Evaluation> {
        let student = normalize_profile(&submission.student)?;
        validate_semesters(&submission.semesters)?;
        let semesters: Vec<SemesterResult> = submission
            .semesters
            .iter()
            .map(|semester| self.calculator.semester(semester))
            .collect();
        let result = self.calculator.combine(semesters.iter().map(SemesterResult::gpa));
        debug!(
            registration_number = %student.registration_number,
            final_sgpa = result.final_sgpa,
            standing = %result.standing,
            "submission evaluated"
        );
        let stored = self.store.lock()?.save(
            &student,
            &submission.semesters,
            &semesters,
            &result,
        )?;
        Ok(Evaluation { semesters, result, stored })
    }

    pub fn transcript(&self, registration_number: &str) -> Result<Option<Transcript>> {
        self.store.lock()?.load(registration_number.trim())
    }

    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary {
            grades: Grade::ALL.iter().map(|grade| grade.symbol()).collect(),
            not_selected: NOT_SELECTED,
            credit_min: CREDIT_MIN,
            credit_max: CREDIT_MAX,
            credit_step: CREDIT_STEP,
        }
    }
}
