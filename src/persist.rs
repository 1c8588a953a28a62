// used for persistence
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Connection, OptionalExtension, Row};
// used for timestamps in the database
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::{FinalResult, Semester, SemesterResult};
use crate::error::Result;
use crate::grade::{GradeEntry, Standing};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    InMemory,
    File(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    pub registration_number: String,
    pub department: String,
    pub batch: String,
}

/// One module row as kept by the store, with the results it was saved alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredModule {
    pub semester: String,
    pub module_code: String,
    pub module_title: String,
    pub grade: GradeEntry,
    pub credits: f64,
    pub is_gpa: bool,
    pub semester_sgpa: f64,
    pub semester_credits: f64,
    pub final_sgpa: f64,
    pub academic_standing: Standing,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub student: StudentProfile,
    pub sgpa_records: Vec<StoredModule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub student_id: i64,
    pub new_student: bool,
    pub rows: usize,
}

// ------------- SQL conversions -------------
impl ToSql for GradeEntry {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.symbol()))
    }
}
impl FromSql for GradeEntry {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str().map(GradeEntry::from)
    }
}
impl ToSql for Standing {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}
impl FromSql for Standing {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;
        Standing::from_label(label)
            .ok_or_else(|| FromSqlError::Other(format!("unknown standing '{label}'").into()))
    }
}

// A module is only kept when it was actually filled in.
fn is_storable(code: &str, title: &str, grade: &GradeEntry) -> bool {
    !code.trim().is_empty() && !title.trim().is_empty() && grade.is_selected()
}

fn stored_module(row: &Row<'_>) -> rusqlite::Result<StoredModule> {
    Ok(StoredModule {
        semester: row.get(0)?,
        module_code: row.get(1)?,
        module_title: row.get(2)?,
        grade: row.get(3)?,
        credits: row.get(4)?,
        is_gpa: row.get(5)?,
        semester_sgpa: row.get(6)?,
        semester_credits: row.get(7)?,
        final_sgpa: row.get(8)?,
        academic_standing: row.get(9)?,
        created_at: row.get(10)?,
    })
}

// ------------- Persistence -------------
#[derive(Debug)]
pub struct RecordStore {
    connection: Connection,
}

impl RecordStore {
    pub fn open(mode: PersistenceMode) -> Result<Self> {
        let connection = match &mode {
            PersistenceMode::InMemory => Connection::open_in_memory()?,
            PersistenceMode::File(path) => Connection::open(path)?,
        };
        // The "STRICT" keyword introduced in 3.37.0 breaks JDBC connections, which makes
        // debugging using an external tool like DBeaver impossible
        connection.execute_batch(
            "
            pragma foreign_keys = on;
            create table if not exists Student (
                Student_Identity integer not null,
                Name text not null,
                RegistrationNumber text not null,
                Department text not null,
                Batch text not null,
                CreatedAt text not null,
                constraint referenceable_Student_Identity primary key (
                    Student_Identity
                ),
                constraint unique_RegistrationNumber unique (
                    RegistrationNumber
                )
            );-- STRICT;
            create table if not exists ModuleRecord (
                ModuleRecord_Identity integer not null,
                Student_Identity integer not null,
                Semester text not null,
                ModuleCode text not null,
                ModuleTitle text not null,
                Grade text not null,
                Credits real not null,
                IsGpa integer not null,
                SemesterSgpa real not null,
                SemesterCredits real not null,
                FinalSgpa real not null,
                AcademicStanding text not null,
                CreatedAt text not null,
                constraint ModuleRecord_of_Student foreign key (
                    Student_Identity
                ) references Student(Student_Identity),
                constraint referenceable_ModuleRecord_Identity primary key (
                    ModuleRecord_Identity
                )
            );-- STRICT;
            ",
        )?;
        debug!(?mode, "record store opened");
        Ok(Self { connection })
    }

    /// Stores a submission in one transaction: the student is looked up by
    /// registration number (created on first sight) and every filled-in module
    /// is appended together with its semester and final results. `results`
    /// pairs with `semesters` by position.
    pub fn save(
        &mut self,
        profile: &StudentProfile,
        semesters: &[Semester],
        results: &[SemesterResult],
        final_result: &FinalResult,
    ) -> Result<SaveSummary> {
        let now = Utc::now();
        let tx = self.connection.transaction()?;
        let existing: Option<i64> = tx
            .query_row(
                "
                select Student_Identity
                    from Student
                    where RegistrationNumber = ?
                ",
                params![&profile.registration_number],
                |r| r.get(0),
            )
            .optional()?;
        let (student_id, new_student) = match existing {
            Some(id) => (id, false),
            None => {
                tx.execute(
                    "
                    insert into Student (
                        Name,
                        RegistrationNumber,
                        Department,
                        Batch,
                        CreatedAt
                    ) values (?, ?, ?, ?, ?)
                    ",
                    params![
                        &profile.name,
                        &profile.registration_number,
                        &profile.department,
                        &profile.batch,
                        &now
                    ],
                )?;
                (tx.last_insert_rowid(), true)
            }
        };
        if new_student {
            info!(registration_number = %profile.registration_number, student_id, "new student");
        }

        let mut rows = 0;
        {
            let mut add_module = tx.prepare_cached(
                "
                insert into ModuleRecord (
                    Student_Identity,
                    Semester,
                    ModuleCode,
                    ModuleTitle,
                    Grade,
                    Credits,
                    IsGpa,
                    SemesterSgpa,
                    SemesterCredits,
                    FinalSgpa,
                    AcademicStanding,
                    CreatedAt
                ) values (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )?;
            for (semester, result) in semesters.iter().zip(results) {
                for module in &semester.modules {
                    if !is_storable(&module.code, &module.title, &module.grade) {
                        continue;
                    }
                    add_module.execute(params![
                        student_id,
                        &semester.name,
                        &module.code,
                        &module.title,
                        &module.grade,
                        module.credits,
                        module.is_gpa,
                        result.sgpa,
                        result.credits,
                        final_result.final_sgpa,
                        &final_result.standing,
                        &now
                    ])?;
                    rows += 1;
                }
            }
        }
        tx.commit()?;
        debug!(student_id, rows, "submission stored");
        Ok(SaveSummary { student_id, new_student, rows })
    }

    pub fn load(&self, registration_number: &str) -> Result<Option<Transcript>> {
        let found = self
            .connection
            .query_row(
                "
                select Student_Identity, Name, RegistrationNumber, Department, Batch
                    from Student
                    where RegistrationNumber = ?
                ",
                params![registration_number],
                |r| {
                    Ok((
                        r.get::<_, i64>(0)?,
                        StudentProfile {
                            name: r.get(1)?,
                            registration_number: r.get(2)?,
                            department: r.get(3)?,
                            batch: r.get(4)?,
                        },
                    ))
                },
            )
            .optional()?;
        let Some((student_id, student)) = found else {
            debug!(registration_number, "no student found");
            return Ok(None);
        };
        let mut all_modules = self.connection.prepare_cached(
            "
            select Semester,
                    ModuleCode,
                    ModuleTitle,
                    Grade,
                    Credits,
                    IsGpa,
                    SemesterSgpa,
                    SemesterCredits,
                    FinalSgpa,
                    AcademicStanding,
                    CreatedAt
                from ModuleRecord
                where Student_Identity = ?
                order by ModuleRecord_Identity
            ",
        )?;
        let sgpa_records = all_modules
            .query_map(params![student_id], stored_module)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!(student_id, rows = sgpa_records.len(), "transcript loaded");
        Ok(Some(Transcript { student, sgpa_records }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_blank_modules_are_not_storable() {
        assert!(is_storable("MA101", "Maths", &GradeEntry::from("A")));
        assert!(is_storable("MA101", "Maths", &GradeEntry::from("Z")));
        assert!(!is_storable("MA101", "Maths", &GradeEntry::NotSelected));
        assert!(!is_storable("", "Maths", &GradeEntry::from("A")));
        assert!(!is_storable("MA101", "  ", &GradeEntry::from("A")));
    }
}
