//! Network fetching utilities with timeout support.
//!
//! Thin JSON helpers over `gloo-net`. Every request is raced against
//! `FETCH_TIMEOUT_MS`; non-2xx responses keep their body so callers can
//! decode backend error payloads.

use std::future::Future;
use std::pin::pin;

use futures::future::{Either, select};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::{Serialize, de::DeserializeOwned};

use crate::config::FETCH_TIMEOUT_MS;
use crate::core::error::FetchError;

/// Race a future against a timeout.
pub async fn with_timeout<F: Future>(fut: F, timeout_ms: u32) -> Result<F::Output, FetchError> {
    let fut = pin!(fut);
    let timer = pin!(TimeoutFuture::new(timeout_ms));
    match select(fut, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(FetchError::Timeout),
    }
}

/// Parse a JSON body.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T, FetchError> {
    serde_json::from_str(text).map_err(|e| FetchError::JsonParseError(e.to_string()))
}

fn with_bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send(request: Request) -> Result<Response, FetchError> {
    with_timeout(request.send(), FETCH_TIMEOUT_MS)
        .await?
        .map_err(|e| FetchError::NetworkError(e.to_string()))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, FetchError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| FetchError::NetworkError(e.to_string()))?;

    if !(200..300).contains(&status) {
        return Err(FetchError::HttpError { status, body });
    }
    parse_json(&body)
}

/// `GET` a JSON document, optionally with a bearer token.
pub async fn get_json<T: DeserializeOwned>(url: &str, token: Option<&str>) -> Result<T, FetchError> {
    let request = with_bearer(Request::get(url), token)
        .build()
        .map_err(|e| FetchError::RequestCreationFailed(e.to_string()))?;
    read_json(send(request).await?).await
}

/// `POST` a JSON body and decode the JSON response.
pub async fn post_json<B, T>(url: &str, body: &B) -> Result<T, FetchError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let request = Request::post(url)
        .json(body)
        .map_err(|e| FetchError::RequestCreationFailed(e.to_string()))?;
    read_json(send(request).await?).await
}

/// `POST` an `application/x-www-form-urlencoded` body and decode the JSON response.
pub async fn post_form<T: DeserializeOwned>(url: &str, form: &str) -> Result<T, FetchError> {
    let request = Request::post(url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form)
        .map_err(|e| FetchError::RequestCreationFailed(e.to_string()))?;
    read_json(send(request).await?).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Deserialize, Debug, PartialEq)]
    struct Payload {
        ok: bool,
    }

    #[test]
    fn test_parse_json() {
        assert_eq!(parse_json::<Payload>(r#"{"ok": true}"#), Ok(Payload { ok: true }));
        assert!(matches!(
            parse_json::<Payload>("not json"),
            Err(FetchError::JsonParseError(_))
        ));
    }
}
