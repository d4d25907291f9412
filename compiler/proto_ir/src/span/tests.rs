use proptest::prelude::*;

use super::*;

#[test]
fn test_span_basic() {
    let span = Span::new(10, 20);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(span.contains(15));
    assert!(!span.contains(20));
}

#[test]
fn test_span_join_overlapping() {
    let a = Span::new(10, 20);
    let b = Span::new(15, 30);
    assert_eq!(a.join(b), Span::new(10, 30));
}

#[test]
fn test_span_join_disjoint_is_hull() {
    let a = Span::new(0, 10);
    let b = Span::new(20, 30);
    assert_eq!(a.join(b), Span::new(0, 30));
    assert_eq!(b.join(a), Span::new(0, 30));
}

#[test]
fn test_span_join_none_is_identity() {
    let a = Span::new(4, 9);
    assert_eq!(a.join(Span::NONE), a);
    assert_eq!(Span::NONE.join(a), a);
    assert!(Span::NONE.join(Span::NONE).is_none());
}

#[test]
fn test_span_join_all() {
    let joined = Span::join_all([Span::NONE, Span::new(5, 6), Span::NONE, Span::new(1, 2)]);
    assert_eq!(joined, Span::new(1, 6));
    assert!(Span::join_all([]).is_none());
}

#[test]
fn test_span_none_properties() {
    assert!(Span::NONE.is_none());
    assert!(!Span::NONE.is_some());
    assert_eq!(Span::NONE.len(), 0);
    assert!(Span::NONE.is_empty());
    assert_eq!(Span::NONE.get(), None);
    assert_eq!(Span::NONE.to_range(), 0..0);
    assert_eq!(Span::default(), Span::NONE);
    assert_eq!(format!("{:?}", Span::NONE), "<none>");
}

#[test]
fn test_span_point_is_not_none() {
    let point = Span::point(42);
    assert!(point.is_some());
    assert!(point.is_empty());
    assert_eq!(point.len(), 0);
}

#[test]
fn test_span_text() {
    let src = "message Foo {}";
    assert_eq!(Span::new(8, 11).text(src), "Foo");
    assert_eq!(Span::NONE.text(src), "");
    assert_eq!(Span::new(100, 200).text(src), "");
}

#[test]
fn test_span_try_from_range_errors() {
    let large = u32::MAX as usize + 1;
    assert!(matches!(
        Span::try_from_range(large..large + 1),
        Err(SpanError::StartTooLarge(_))
    ));
    assert!(matches!(
        Span::try_from_range(0..large),
        Err(SpanError::EndTooLarge(_))
    ));
    assert!(matches!(
        Span::try_from_range(5..2),
        Err(SpanError::Inverted { start: 5, end: 2 })
    ));
}

#[test]
fn test_span_error_display() {
    let msg = SpanError::StartTooLarge(0x1_0000_0000).to_string();
    assert!(msg.contains("start"));
    assert!(msg.contains("0x100000000"));
}

#[test]
fn test_span_extend_and_points() {
    let span = Span::new(10, 20);
    assert_eq!(span.extend_to(30), Span::new(10, 30));
    assert_eq!(span.extend_to(15), span);
    assert_eq!(Span::NONE.extend_to(7), Span::point(7));
    assert_eq!(span.start_point(), Span::point(10));
    assert_eq!(span.end_point(), Span::point(20));
}

#[test]
fn test_spanned_option() {
    let some: Option<Span> = Some(Span::new(1, 2));
    let none: Option<Span> = None;
    assert_eq!(some.span(), Span::new(1, 2));
    assert!(none.span().is_none());
}

fn any_span() -> impl Strategy<Value = Span> {
    prop_oneof![
        1 => Just(Span::NONE),
        8 => (0u32..1000, 0u32..1000).prop_map(|(a, b)| Span::new(a.min(b), a.max(b))),
    ]
}

proptest! {
    #[test]
    fn join_is_associative(a in any_span(), b in any_span(), c in any_span()) {
        prop_assert_eq!(a.join(b).join(c), a.join(b.join(c)));
    }

    #[test]
    fn join_is_commutative(a in any_span(), b in any_span()) {
        prop_assert_eq!(a.join(b), b.join(a));
    }

    #[test]
    fn join_with_none_is_identity(a in any_span()) {
        prop_assert_eq!(a.join(Span::NONE), a);
    }

    #[test]
    fn join_contains_both(a in any_span(), b in any_span()) {
        let hull = a.join(b);
        if a.is_some() {
            prop_assert!(hull.contains_span(a));
        }
        if b.is_some() {
            prop_assert!(hull.contains_span(b));
        }
    }
}
