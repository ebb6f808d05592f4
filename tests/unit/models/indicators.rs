//! Unit tests for indicator snapshots

use dipwatch::indicators::IndicatorError;
use dipwatch::models::indicators::{IndicatorParams, IndicatorSnapshot};

#[test]
fn test_required_closes() {
    let params = IndicatorParams::default();
    assert_eq!(params.required_closes(), 20);

    let params = IndicatorParams {
        rsi_period: 30,
        bb_window: 20,
        bb_k: 2.0,
    };
    assert_eq!(params.required_closes(), 31);
}

#[test]
fn test_snapshot_insufficient_data() {
    let closes = vec![100.0; 19];
    let err = IndicatorSnapshot::from_closes(&closes, &IndicatorParams::default()).unwrap_err();
    assert_eq!(
        err,
        IndicatorError::InsufficientData {
            required: 20,
            actual: 19
        }
    );

    assert!(IndicatorSnapshot::from_closes(&[], &IndicatorParams::default()).is_err());
}

#[test]
fn test_snapshot_flat_series() {
    let closes = vec![250.0; 20];
    let snapshot = IndicatorSnapshot::from_closes(&closes, &IndicatorParams::default()).unwrap();
    assert_eq!(snapshot.rsi, Some(100.0));
    assert!(snapshot.percent_b.is_none());
    assert_eq!(snapshot.last_price, 250.0);
}

#[test]
fn test_snapshot_uses_last_close() {
    let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64 * 0.5).collect();
    let snapshot = IndicatorSnapshot::from_closes(&closes, &IndicatorParams::default()).unwrap();
    assert_eq!(snapshot.last_price, 90.5);
    assert!(snapshot.rsi.unwrap() < 1e-9);
    assert!(snapshot.percent_b.unwrap() < 0.5);
}
