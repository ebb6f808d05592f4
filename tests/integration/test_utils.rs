use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// RSI(14) ~ 27.8 and %B ~ 0.15 on the last close of 98.2.
pub const OVERSOLD: [f64; 20] = [
    100.0, 100.5, 101.0, 101.5, 102.0, 102.5, 101.5, 101.55, 100.55, 100.95, 99.95, 100.35, 99.35,
    99.75, 98.75, 99.15, 98.15, 98.6, 97.6, 98.2,
];

/// Binance kline arrays with the given closes, five minutes apart.
pub fn klines_body(closes: &[f64]) -> Value {
    let klines: Vec<Value> = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let open_time = 1_700_000_000_000i64 + i as i64 * 300_000;
            json!([
                open_time,
                format!("{:.8}", close),
                format!("{:.8}", close + 0.5),
                format!("{:.8}", close - 0.5),
                format!("{:.8}", close),
                "12.5",
                open_time + 299_999,
                "1250.0",
                42,
                "6.0",
                "600.0",
                "0"
            ])
        })
        .collect();
    Value::Array(klines)
}

pub async fn mock_binance_klines(server: &MockServer, symbol: &str, closes: &[f64]) {
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", symbol))
        .respond_with(ResponseTemplate::new(200).set_body_json(klines_body(closes)))
        .mount(server)
        .await;
}

pub async fn mock_binance_error(server: &MockServer, symbol: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v3/klines"))
        .and(query_param("symbol", symbol))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"code": -1121, "msg": "Invalid symbol."})),
        )
        .mount(server)
        .await;
}

pub async fn mock_telegram_ok(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", token)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(server)
        .await;
}
