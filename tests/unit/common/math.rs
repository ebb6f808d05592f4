//! Unit tests for numeric helpers

use dipwatch::common::math::{sma, standard_deviation};

#[test]
fn test_sma_uses_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 2), Some(4.5));
    assert_eq!(sma(&values, 5), Some(3.0));
}

#[test]
fn test_sma_insufficient_data() {
    assert!(sma(&[1.0, 2.0], 3).is_none());
    assert!(sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn test_standard_deviation_is_population() {
    // Population variance of [2,4,4,4,5,5,7,9] is 4.
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let std = standard_deviation(&values, 8).unwrap();
    assert!((std - 2.0).abs() < 1e-12);
}
