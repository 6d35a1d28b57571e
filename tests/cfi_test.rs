//! Ordering and round-trip tests for the CFI parser and comparator.

use std::cmp::Ordering;

use ibk::books::cfi::EpubCfi;
use ibk::IbkError;

fn cfi(s: &str) -> EpubCfi {
    EpubCfi::parse(s).unwrap()
}

#[test]
fn round_trip_preserves_source() {
    // Including the text the scanner discards internally.
    let sources = [
        "epubcfi(/6/14[chap05]!/4/2:284)",
        "epubcfi(/6/14!/4/2,:1,:20)",
        "epubcfi()",
        "epubcfi(/2[intro] garbage /4)",
    ];
    for s in sources {
        assert_eq!(cfi(s).as_str(), s);
        assert_eq!(cfi(s).to_string(), s);
    }
}

#[test]
fn missing_envelope_is_a_format_error() {
    assert!(matches!(EpubCfi::parse("/4/2:5"), Err(IbkError::Cfi(_))));
}

#[test]
fn empty_body_is_the_minimum() {
    let empty = cfi("epubcfi()");
    assert!(empty.is_empty());
    for s in ["epubcfi(/2)", "epubcfi(/4/2:0)", "epubcfi(/6[x])"] {
        assert!(empty < cfi(s), "epubcfi() should sort before {s}");
    }
    assert_eq!(empty, cfi("epubcfi()"));
}

#[test]
fn index_dominates_identifier_and_offset() {
    assert!(cfi("epubcfi(/6)") > cfi("epubcfi(/4[chap01]:99)"));
    assert!(cfi("epubcfi(/4/2)") < cfi("epubcfi(/4/6)"));
}

#[test]
fn identifier_ordering_is_string_order_with_absent_as_empty() {
    assert!(cfi("epubcfi(/4[aaa])") < cfi("epubcfi(/4[bbb])"));
    assert!(cfi("epubcfi(/4)") < cfi("epubcfi(/4[aaa])"));
    // Same steps, different skipped text: equal.
    assert_eq!(cfi("epubcfi(/4[aaa])"), cfi("epubcfi(/4[aaa]!)"));
}

#[test]
fn missing_offset_sorts_before_any_present_offset() {
    assert!(cfi("epubcfi(/4/2:5)") > cfi("epubcfi(/4/2)"));
    assert!(cfi("epubcfi(/4/2)") < cfi("epubcfi(/4/2:0)"));
    assert!(cfi("epubcfi(/4/2:3)") < cfi("epubcfi(/4/2:10)"));
}

#[test]
fn proper_prefix_sorts_first() {
    assert!(cfi("epubcfi(/4/2)") < cfi("epubcfi(/4/2/8)"));
    assert!(cfi("epubcfi(/6)") < cfi("epubcfi(/6/2)"));
}

#[test]
fn comparison_is_total_and_antisymmetric() {
    let values = [
        cfi("epubcfi()"),
        cfi("epubcfi(/4)"),
        cfi("epubcfi(/4[aaa])"),
        cfi("epubcfi(/4[bbb])"),
        cfi("epubcfi(/4/2)"),
        cfi("epubcfi(/4/2:0)"),
        cfi("epubcfi(/4/2:9)"),
        cfi("epubcfi(/6/14[chap05]!/4/2:284)"),
        cfi("epubcfi(/6/14[chap05]!/4/2:284)"),
    ];
    for a in &values {
        for b in &values {
            // Exactly one of <, ==, > holds, and cmp is antisymmetric.
            let ord = a.cmp(b);
            assert_eq!(ord.reverse(), b.cmp(a));
            let relations = [a < b, a == b, a > b];
            assert_eq!(relations.iter().filter(|r| **r).count(), 1);
            match ord {
                Ordering::Less => assert!(a < b && a <= b),
                Ordering::Equal => assert!(a == b && a <= b && a >= b),
                Ordering::Greater => assert!(a > b && a >= b),
            }
        }
    }
}

#[test]
fn comparison_is_transitive() {
    let mut values = vec![
        cfi("epubcfi(/6/14[chap05]!/4/2:284)"),
        cfi("epubcfi(/4/2:0)"),
        cfi("epubcfi()"),
        cfi("epubcfi(/4/2)"),
        cfi("epubcfi(/6/2)"),
        cfi("epubcfi(/4[aaa])"),
        cfi("epubcfi(/4)"),
        cfi("epubcfi(/6)"),
    ];
    values.sort();
    for window in values.windows(3) {
        assert!(window[0] <= window[1]);
        assert!(window[1] <= window[2]);
        assert!(window[0] <= window[2]);
    }
}

#[test]
fn sorting_yields_reading_order() {
    let mut locations = vec![
        cfi("epubcfi(/6/8!/4/2:10)"),
        cfi("epubcfi(/6/4!/4/2:99)"),
        cfi("epubcfi(/6/8!/4/2)"),
        cfi("epubcfi(/6/4!/2)"),
    ];
    locations.sort();
    let order: Vec<&str> = locations.iter().map(|c| c.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "epubcfi(/6/4!/2)",
            "epubcfi(/6/4!/4/2:99)",
            "epubcfi(/6/8!/4/2)",
            "epubcfi(/6/8!/4/2:10)",
        ]
    );
}
