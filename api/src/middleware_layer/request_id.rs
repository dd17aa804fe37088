//! Tags each request with an id (`X-Request-Id`, generated when absent) and
//! runs the handler inside a span carrying it, so every log line of the
//! request can be correlated.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info, info_span};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

fn ensure_request_id(headers: &mut HeaderMap) -> String {
    if let Some(v) = headers.get(REQUEST_ID_HEADER).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(v) = HeaderValue::from_str(&id) {
        headers.insert(REQUEST_ID_HEADER, v);
    }
    id
}

pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = ensure_request_id(req.headers_mut());
    let span = info_span!(
        "request",
        request_id = %id,
        method = %req.method(),
        path = %req.uri().path()
    );

    async move {
        info!("request started");
        let mut res = next.run(req).await;
        info!(status = res.status().as_u16(), "request finished");
        if let Ok(v) = HeaderValue::from_str(&id) {
            res.headers_mut().insert(REQUEST_ID_HEADER, v);
        }
        res
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_caller_id_and_generates_missing_one() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("abc-1"));
        assert_eq!(ensure_request_id(&mut headers), "abc-1");

        let mut empty = HeaderMap::new();
        let id = ensure_request_id(&mut empty);
        assert!(id.starts_with("req-"));
        assert_eq!(empty.get(REQUEST_ID_HEADER).unwrap(), id.as_str());
    }
}
