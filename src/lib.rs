//! SGPA – semester and cumulative grade-point averages with academic standing.
//!
//! The crate centers on a small, pure aggregation engine:
//! * A [`engine::ModuleRecord`] carries a grade, a credit weight and a flag
//!   saying whether the module counts toward GPA at all.
//! * A [`engine::Semester`] groups module records under a name.
//! * The [`engine::Calculator`] turns a semester into an SGPA plus the credits
//!   that took part, and a list of semesters into a final SGPA plus a
//!   [`grade::Standing`].
//!
//! Grades that are not in the grade-point table, including the
//! "Not Selected" sentinel of input forms, are excluded rather than rejected.
//!
//! ## Modules
//! * [`grade`] – Grade symbols, the grade-point scale and standing tiers.
//! * [`engine`] – The semester and cumulative calculators.
//! * [`persist`] – SQLite record store keyed by registration number.
//! * [`interface`] – Validation plus the operations callers use.
//! * [`server`] – HTTP routes over the interface.
//! * [`settings`] – Configuration loading.
//!
//! ## Quick Start
//! ```
//! use sgpa::engine::{Calculator, ModuleRecord, Semester};
//! use sgpa::grade::Standing;
//! let calculator = Calculator::default();
//! let semester = Semester::new("Semester 1", vec![
//!     ModuleRecord::new("BM1010", "Accounting", "A", 3.0, true),
//!     ModuleRecord::new("BM1020", "Economics", "B+", 2.0, true),
//!     ModuleRecord::new("BM1030", "Seminar", "F", 1.0, false),
//! ]);
//! assert_eq!(calculator.semester(&semester).sgpa, 3.72);
//! let result = calculator.cumulative(&[semester]);
//! assert_eq!(result.standing, Standing::FirstClass);
//! ```

pub mod engine;
pub mod error;
pub mod grade;
pub mod interface;
pub mod persist;
pub mod server;
pub mod settings;
