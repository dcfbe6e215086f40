//! Struct codec, enum and constant behaviour of generated code.

use ironidl_codegen_tests::tutorial::constants::*;
use ironidl_codegen_tests::tutorial::types::*;
use ironidl_core::{BinaryInput, BinaryOutput, Double, ProtocolErrorKind};
use std::collections::{BTreeMap, BTreeSet};

fn encode<F>(write: F) -> BinaryOutput
where
    F: FnOnce(&mut BinaryOutput) -> ironidl_core::Result<()>,
{
    let mut output = BinaryOutput::new();
    write(&mut output).unwrap();
    output
}

fn sample_containers() -> Containers {
    Containers {
        ints: Some(vec![3, -1, 7]),
        names: Some(BTreeSet::from(["b".to_string(), "a".to_string()])),
        groups: Some(BTreeMap::from([
            (
                "corners".to_string(),
                vec![
                    Point {
                        x: Some(0),
                        y: Some(0),
                    },
                    Point {
                        x: Some(10),
                        y: None,
                    },
                ],
            ),
            ("empty".to_string(), Vec::new()),
        ])),
        weights: Some(BTreeMap::from([(
            2,
            BTreeSet::from([Double(0.5), Double(-1.25)]),
        )])),
        matrix: Some(vec![vec![1, 2], vec![], vec![3]]),
        color: Some(Color::BLUE),
        flag: Some(true),
        small: Some(-8),
        big: Some(i64::MAX),
        ratio: Some(Double(2.5)),
        mood: Some("happy".to_string()),
        origin: None,
        palette: Some(vec![Color(42)]),
    }
}

#[test]
fn test_defaults_applied_on_construction() {
    let work = Work::default();
    assert_eq!(work.num1, Some(0));
    assert_eq!(work.num2, None);
    assert_eq!(work.op, None);

    let point = Point::default();
    assert_eq!(point.x, Some(0));
    assert_eq!(point.y, Some(0));

    let containers = Containers::default();
    assert_eq!(
        containers.origin,
        Some(Point {
            x: Some(1),
            y: Some(2)
        })
    );
    assert_eq!(containers.palette, Some(vec![Color::RED, Color::BLUE]));
    assert_eq!(containers.ints, None);
}

#[test]
fn test_point_wire_bytes() {
    let point = Point {
        x: Some(5),
        y: Some(7),
    };
    let output = encode(|out| point.write(out));
    assert_eq!(
        output.as_slice(),
        &[8, 0, 1, 0, 0, 0, 5, 8, 0, 2, 0, 0, 0, 7, 0]
    );
}

#[test]
fn test_absent_fields_are_not_written() {
    let point = Point { x: None, y: None };
    let output = encode(|out| point.write(out));
    assert_eq!(output.as_slice(), &[0]);
}

#[test]
fn test_containers_round_trip() {
    let original = sample_containers();
    let output = encode(|out| original.write(out));

    let mut input = BinaryInput::new(output.into_bytes());
    let decoded = Containers::read_new(&mut input).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(decoded.origin, None);
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_absent_field_stays_absent() {
    let original = Point {
        x: Some(5),
        y: None,
    };
    let output = encode(|out| original.write(out));
    let decoded = Point::read_new(&mut BinaryInput::new(output.into_bytes())).unwrap();
    assert_eq!(decoded, original);
    assert_eq!(Point::absent(), Point { x: None, y: None });
}

#[test]
fn test_read_keeps_values_missing_from_the_wire() {
    let output = encode(|out| {
        Point {
            x: Some(5),
            y: None,
        }
        .write(out)
    });

    let mut point = Point::default();
    point.read(&mut BinaryInput::new(output.into_bytes())).unwrap();
    assert_eq!(point.x, Some(5));
    assert_eq!(point.y, Some(0));
}

#[test]
fn test_unknown_fields_are_skipped() {
    let newer = PointV2 {
        x: Some(1),
        y: Some(2),
        extra: Some(vec![BTreeMap::from([(
            "w".to_string(),
            Work {
                num1: Some(1),
                num2: Some(2),
                op: Some(Operation::ADD),
                comment: Some("nested".to_string()),
            },
        )])]),
        label: Some("skip me".to_string()),
    };
    let output = encode(|out| newer.write(out));

    let mut input = BinaryInput::new(output.into_bytes());
    let point = Point::read_new(&mut input).unwrap();
    assert_eq!(point.x, Some(1));
    assert_eq!(point.y, Some(2));
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_mistyped_field_is_skipped() {
    let wide = PointWide {
        x: Some(1 << 40),
        y: Some(9),
    };
    let output = encode(|out| wide.write(out));

    let mut input = BinaryInput::new(output.into_bytes());
    let point = Point::read_new(&mut input).unwrap();
    assert_eq!(point.x, None);
    assert_eq!(point.y, Some(9));
    assert_eq!(input.remaining(), 0);
}

#[test]
fn test_truncated_input_is_a_protocol_error() {
    let output = encode(|out| sample_containers().write(out));
    let bytes = output.into_bytes();
    let truncated = bytes.slice(..bytes.len() / 2);

    let err = Containers::read_new(&mut BinaryInput::new(truncated)).unwrap_err();
    assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::UnexpectedEof));
}

#[test]
fn test_enum_constants_and_names() {
    assert_eq!(Color::RED.0, 0);
    assert_eq!(Color::GREEN.0, 5);
    assert_eq!(Color::BLUE.0, 6);
    assert_eq!(Color::GREEN.name(), Some("GREEN"));
    assert_eq!(Color(42).name(), None);
    assert_eq!(Color::default(), Color::RED);
    assert_eq!(i32::from(Operation::DIVIDE), 4);
    assert_eq!(Operation::from(2), Operation::SUBTRACT);
    assert_eq!(Operation::VALUES.len(), 4);
}

#[test]
fn test_constants() {
    assert_eq!(INT32CONSTANT, 9853);
    assert_eq!(GREETING, "hello \"world\"");
    assert_eq!(PI, Double(3.25));
    assert_eq!(DEFAULT_COLOR, Color::GREEN);
    assert_eq!(MAPCONSTANT.get("hello").map(String::as_str), Some("world"));
    assert_eq!(MAPCONSTANT.len(), 2);
    assert_eq!(ORIGIN.x, Some(3));
    assert_eq!(ORIGIN.y, Some(4));
    assert_eq!(*MATRIX, vec![vec![1, 2], Vec::new()]);
    assert_eq!(*PRIMES, BTreeSet::from([2, 3, 7]));
}

#[test]
fn test_exception_is_an_error() {
    let err = InvalidOperation {
        what_op: Some(4),
        why: Some("Cannot divide by 0".to_string()),
    };
    let message = err.to_string();
    assert!(message.starts_with("InvalidOperation: "));
    assert!(message.contains("Cannot divide by 0"));

    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(err);
    assert!(boxed.downcast_ref::<InvalidOperation>().is_some());
}

#[test]
fn test_struct_names() {
    assert_eq!(Work::NAME, "Work");
    assert_eq!(InvalidOperation::NAME, "InvalidOperation");
}
