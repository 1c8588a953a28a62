use sgpa::grade::Standing;

#[test]
fn lower_bounds_are_inclusive() {
    assert_eq!(Standing::from_gpa(3.7), Standing::FirstClass);
    assert_eq!(Standing::from_gpa(3.69), Standing::SecondClassUpper);
    assert_eq!(Standing::from_gpa(3.3), Standing::SecondClassUpper);
    assert_eq!(Standing::from_gpa(3.29), Standing::SecondClassLower);
    assert_eq!(Standing::from_gpa(3.0), Standing::SecondClassLower);
    assert_eq!(Standing::from_gpa(2.99), Standing::Pass);
    assert_eq!(Standing::from_gpa(2.0), Standing::Pass);
    assert_eq!(Standing::from_gpa(1.999), Standing::Fail);
}

#[test]
fn extremes() {
    assert_eq!(Standing::from_gpa(4.2), Standing::FirstClass);
    assert_eq!(Standing::from_gpa(0.0), Standing::Fail);
    assert_eq!(Standing::from_gpa(-1.0), Standing::Fail);
}

#[test]
fn labels() {
    assert_eq!(Standing::FirstClass.to_string(), "First Class");
    assert_eq!(Standing::SecondClassUpper.to_string(), "Second Class - Upper Division");
    assert_eq!(Standing::SecondClassLower.to_string(), "Second Class - Lower Division");
    assert_eq!(Standing::Pass.to_string(), "Pass");
    assert_eq!(Standing::Fail.to_string(), "Fail");
}
