use super::*;

#[test]
fn negative_sentinel_is_unbounded() {
    for raw in [UNBOUNDED, -2, i64::MIN] {
        let limit = Limit::<usize>::from_sentinel(raw).unwrap();
        assert!(limit.is_unbounded(), "{raw} should be unbounded");
    }
}

#[test]
fn zero_length_is_a_valid_text_bound() {
    let limit = Limit::<usize>::from_sentinel(0).unwrap();
    assert_eq!(limit, Limit::Max(0));
}

#[test]
fn zero_dimension_is_rejected() {
    let result = Limit::<Dimension>::from_sentinel(0);
    assert!(matches!(result, Err(LimitError::Dimension(_))));
}

#[test]
fn dimension_out_of_u32_range_is_rejected() {
    let raw = i64::from(u32::MAX) + 1;
    let result = Limit::<Dimension>::from_sentinel(raw);
    assert!(matches!(result, Err(LimitError::OutOfRange(_))));
}

#[test]
fn sentinel_survives_conversion() {
    let limit = Limit::<Dimension>::from_sentinel(480).unwrap();
    assert_eq!(limit.to_sentinel(), 480);
    assert_eq!(Limit::<Dimension>::Unbounded.to_sentinel(), UNBOUNDED);
}

#[test]
fn resolve_falls_back_to_extent_when_unbounded() {
    let bounded = Limit::Max(Dimension::try_new(64).unwrap());
    assert_eq!(bounded.resolve(300), 64);
    assert_eq!(Limit::<Dimension>::Unbounded.resolve(300), 300);
}

#[test]
fn default_is_unbounded() {
    assert!(Limit::<usize>::default().is_unbounded());
    assert_eq!(Limit::<usize>::default().value(), None);
}
