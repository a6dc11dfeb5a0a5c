use crate::error::ModelResult;
use serde_json::{Number, Value};
use url::Url;

/// Join a base URL and an endpoint path, keeping any path prefix on the base.
///
/// `https://api.blackbox.ai` + `chat/completions` and
/// `http://127.0.0.1:4010/` + `/chat/completions` both resolve as expected.
pub fn endpoint(base: &str, path: &str) -> ModelResult<Url> {
    let base = Url::parse(&format!("{}/", base.trim_end_matches('/')))?;
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Extract a JSON number without narrowing or range checks.
///
/// Whole-valued floats (`500.0`) come back as integers so they go out on the
/// wire as `500`; everything else, negative or fractional, is kept as given.
pub fn as_number(value: &Value) -> Option<Number> {
    let number = match value {
        Value::Number(number) => number,
        _ => return None,
    };
    if number.is_f64() {
        if let Some(n) = number.as_f64() {
            if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
                return Some(Number::from(n as i64));
            }
        }
    }
    Some(number.clone())
}
