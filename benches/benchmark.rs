use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sgpa::engine::{Calculator, ModuleRecord, Semester};
use sgpa::grade::Grade;

// Eight semesters of eight modules each plus an internship, cycling through every grade
fn degree() -> Vec<Semester> {
    let mut semesters = Vec::new();
    for s in 0..9 {
        let modules = (0..8)
            .map(|m| {
                let grade = Grade::ALL[(s + m) % Grade::COUNT];
                let credits = 0.5 * ((s * 8 + m) % 13) as f64;
                ModuleRecord::new(format!("BM{s}{m:03}"), "Module", grade, credits, m % 5 != 0)
            })
            .collect();
        let name = if s == 8 { "Internship".to_string() } else { format!("Semester {}", s + 1) };
        semesters.push(Semester::new(name, modules));
    }
    semesters
}

fn bench_semester(c: &mut Criterion) {
    let calculator = Calculator::default();
    let semesters = degree();
    c.bench_function("semester_sgpa", |b| {
        b.iter(|| calculator.semester(black_box(&semesters[0])))
    });
}

fn bench_cumulative(c: &mut Criterion) {
    let calculator = Calculator::default();
    let semesters = degree();
    c.bench_function("final_sgpa", |b| {
        b.iter(|| calculator.cumulative(black_box(&semesters)))
    });
}

criterion_group!(benches, bench_semester, bench_cumulative);
criterion_main!(benches);
