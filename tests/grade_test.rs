use joluv::grade::{Grade, letter_to_point, point_to_letter};

#[test]
fn test_point_to_letter_boundaries() {
    assert_eq!(point_to_letter(4.3), "A+");
    assert_eq!(point_to_letter(4.0), "A0");
    assert_eq!(point_to_letter(3.7), "A-");
    assert_eq!(point_to_letter(2.3), "C+");
    assert_eq!(point_to_letter(2.0), "C0");
    assert_eq!(point_to_letter(0.7), "D-");
    assert_eq!(point_to_letter(0.0), "F");
}

#[test]
fn test_point_between_thresholds_takes_lower_letter() {
    assert_eq!(point_to_letter(4.29), "A0");
    assert_eq!(point_to_letter(2.5), "C+");
    assert_eq!(point_to_letter(0.5), "F");
    assert_eq!(point_to_letter(-1.0), "F");
    assert_eq!(point_to_letter(f64::NAN), "F");
    assert_eq!(point_to_letter(5.0), "A+");
}

#[test]
fn test_letter_round_trip_for_numeric_grades() {
    for grade in Grade::ALL {
        match grade.point() {
            Some(point) => {
                assert_eq!(point_to_letter(point), grade.label());
                assert_eq!(letter_to_point(grade.label()), Some(point));
            }
            None => assert!(matches!(grade, Grade::P | Grade::NP)),
        }
    }
}

#[test]
fn test_c_plus_uses_canonical_point() {
    assert_eq!(letter_to_point("C+"), Some(2.3));
    assert_eq!(Grade::CPlus.point(), Some(2.3));
}

#[test]
fn test_parse_accepts_short_and_pass_forms() {
    assert_eq!("a".parse::<Grade>().unwrap(), Grade::A);
    assert_eq!(" b+ ".parse::<Grade>().unwrap(), Grade::BPlus);
    assert_eq!("PASS".parse::<Grade>().unwrap(), Grade::P);
    assert_eq!("np".parse::<Grade>().unwrap(), Grade::NP);
    assert!("E".parse::<Grade>().is_err());
    assert_eq!(letter_to_point("P"), None);
    assert_eq!(letter_to_point("Z"), None);
}

#[test]
fn test_credit_and_gpa_flags() {
    assert!(Grade::DMinus.earns_credit());
    assert!(Grade::P.earns_credit());
    assert!(!Grade::F.earns_credit());
    assert!(!Grade::NP.earns_credit());

    assert!(Grade::F.counts_toward_gpa());
    assert!(!Grade::P.counts_toward_gpa());
}

#[test]
fn test_grade_serializes_as_label() {
    let json = serde_json::to_string(&Grade::APlus).unwrap();
    assert_eq!(json, "\"A+\"");
    let parsed: Grade = serde_json::from_str("\"B0\"").unwrap();
    assert_eq!(parsed, Grade::B);
    assert_eq!(Grade::CMinus.to_string(), "C-");
}
