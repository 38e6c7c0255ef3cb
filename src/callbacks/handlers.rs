use axum::body::Bytes;
use axum::extract::{RawQuery, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode};
use serde_json::{Map, Value};

use super::events::CallbackEvent;
use super::server::AppState;

#[cfg(feature = "tracing")]
use tracing::debug;

/// Acknowledge the callback and publish its body.
///
/// The gateway only needs the acknowledgement, so the answer is 200 whatever
/// the body holds.
pub(crate) async fn callback_handler(
    State(state): State<AppState>,
    method: Method,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let body = parse_body(&headers, query.as_deref(), &body);
    let _subscribers = state.events.publish(CallbackEvent::new(method, body));

    #[cfg(feature = "tracing")]
    debug!(subscribers = _subscribers, "Callback received");

    StatusCode::OK
}

/// Turn a raw callback request into a JSON value.
///
/// JSON bodies are kept as they are. URL-encoded forms become an object of
/// strings. A blank body falls back to the query string, and to `null` when
/// there is none. Anything else is kept as a string.
pub(crate) fn parse_body(headers: &HeaderMap, query: Option<&str>, body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return match query {
            Some(query) if !query.is_empty() => {
                parse_form(query.as_bytes()).unwrap_or_else(|| Value::String(query.to_string()))
            }
            _ => Value::Null,
        };
    }

    if is_form(headers)
        && let Some(form) = parse_form(body)
    {
        return form;
    }

    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(_) => Value::String(String::from_utf8_lossy(body).into_owned()),
    }
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/x-www-form-urlencoded"))
}

fn parse_form(raw: &[u8]) -> Option<Value> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(raw).ok()?;
    let object: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();
    Some(Value::Object(object))
}
