use sgpa::engine::{Calculator, ModuleRecord, Semester, SemesterResult};
use sgpa::grade::{GradeEntry, Standing};
use sgpa::persist::{PersistenceMode, RecordStore, StudentProfile};

fn profile() -> StudentProfile {
    StudentProfile {
        name: "Kamala Silva".to_string(),
        registration_number: "204512K".to_string(),
        department: "Business".to_string(),
        batch: "2020".to_string(),
    }
}

fn semesters() -> Vec<Semester> {
    vec![
        Semester::new(
            "Semester 1",
            vec![
                ModuleRecord::new("BM1010", "Accounting", "A", 3.0, true),
                ModuleRecord::new("BM1020", "Economics", "B+", 2.0, true),
                ModuleRecord::new("", "", "Not Selected", 0.0, true),
                ModuleRecord::new("BM1030", "Seminar", "Not Selected", 1.0, true),
            ],
        ),
        Semester::new(
            "Internship",
            vec![ModuleRecord::new("BM4990", "Industrial Training", "A", 6.0, false)],
        ),
    ]
}

fn save(store: &mut RecordStore, semesters: &[Semester]) -> sgpa::persist::SaveSummary {
    let calculator = Calculator::default();
    let results: Vec<SemesterResult> = semesters.iter().map(|s| calculator.semester(s)).collect();
    let final_result = calculator.combine(results.iter().map(SemesterResult::gpa));
    store.save(&profile(), semesters, &results, &final_result).expect("save")
}

#[test]
fn in_memory_mode_saves_and_loads() {
    let mut store = RecordStore::open(PersistenceMode::InMemory).expect("store");
    let summary = save(&mut store, &semesters());
    assert!(summary.new_student);
    // blank and not-selected rows are dropped
    assert_eq!(summary.rows, 3);

    let transcript = store.load("204512K").expect("load").expect("student");
    assert_eq!(transcript.student, profile());
    let rows = &transcript.sgpa_records;
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].module_code, "BM1010");
    assert_eq!(rows[0].grade, GradeEntry::from("A"));
    assert_eq!(rows[0].semester_sgpa, 3.72);
    assert_eq!(rows[0].semester_credits, 5.0);
    assert_eq!(rows[2].semester, "Internship");
    assert!(!rows[2].is_gpa);
    assert_eq!(rows[2].semester_credits, 0.0);
    for row in rows {
        assert_eq!(row.final_sgpa, 3.72);
        assert_eq!(row.academic_standing, Standing::FirstClass);
    }
}

#[test]
fn unknown_registration_number_is_none() {
    let store = RecordStore::open(PersistenceMode::InMemory).expect("store");
    assert!(store.load("000000X").expect("load").is_none());
}

#[test]
fn repeated_saves_reuse_the_student_and_append_rows() {
    let mut store = RecordStore::open(PersistenceMode::InMemory).expect("store");
    let first = save(&mut store, &semesters());
    let second = save(&mut store, &semesters()[..1]);
    assert!(!second.new_student);
    assert_eq!(first.student_id, second.student_id);
    let transcript = store.load("204512K").expect("load").expect("student");
    assert_eq!(transcript.sgpa_records.len(), first.rows + second.rows);
}

#[test]
fn failed_save_leaves_no_student_behind() {
    let mut store = RecordStore::open(PersistenceMode::InMemory).expect("store");
    // SQLite binds NaN as NULL, so the second module row violates `Credits not null`
    let semesters = vec![Semester::new(
        "Semester 1",
        vec![
            ModuleRecord::new("BM1010", "Accounting", "A", 3.0, true),
            ModuleRecord::new("BM1020", "Economics", "B", f64::NAN, true),
        ],
    )];
    let calculator = Calculator::default();
    let results: Vec<SemesterResult> = semesters.iter().map(|s| calculator.semester(s)).collect();
    let final_result = calculator.combine(results.iter().map(SemesterResult::gpa));
    let err = store.save(&profile(), &semesters, &results, &final_result).unwrap_err();
    assert!(matches!(err, sgpa::error::SgpaError::Persistence(_)), "{err}");
    assert!(store.load("204512K").expect("load").is_none());

    // the store is still usable afterwards
    let summary = save(&mut store, &semesters[..0]);
    assert!(summary.new_student);
}

#[test]
fn file_mode_survives_reopening() {
    let path = "test_sgpa_temp.db".to_string();
    // Ensure clean start
    let _ = std::fs::remove_file(&path);
    {
        let mut store = RecordStore::open(PersistenceMode::File(path.clone())).expect("store");
        save(&mut store, &semesters());
    }
    let store = RecordStore::open(PersistenceMode::File(path.clone())).expect("reopen");
    let transcript = store.load("204512K").expect("load");
    assert_eq!(transcript.map(|t| t.sgpa_records.len()), Some(3));
    // Clean up
    let _ = std::fs::remove_file(&path);
}
