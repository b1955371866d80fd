//! HTTP Client Wrapper
//!
//! Every request goes through `send`: it resolves the URL against the
//! configured base, attaches the bearer token, and turns non-2xx responses
//! into classified `ApiError`s.

use gloo_net::http::{Request, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

use super::ApiError;
use crate::config::AppConfig;
use crate::logging;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

fn builder(verb: Verb, path: &str) -> RequestBuilder {
    let config = AppConfig::load();
    let url = config.endpoint(path);
    let builder = match verb {
        Verb::Get => Request::get(&url),
        Verb::Post => Request::post(&url),
        Verb::Put => Request::put(&url),
        Verb::Patch => Request::patch(&url),
        Verb::Delete => Request::delete(&url),
    }
    .header("Accept", "application/json");

    match config.auth_token {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn send<B: Serialize>(verb: Verb, path: &str, body: Option<&B>) -> Result<Value, ApiError> {
    logging::info("API", format!("{} {}", verb.as_str(), path));
    let builder = builder(verb, path);
    let request = match body {
        Some(body) => builder.json(body)?,
        None => builder.build()?,
    };

    let response = request.send().await?;
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await?;
    if !ok {
        logging::error("API", format!("{} {} -> {}", verb.as_str(), path, status));
        return Err(ApiError::from_status(status, &text));
    }
    parse_body(&text)
}

/// Empty bodies (204, bare 200) decode to `null`
pub fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

pub async fn get(path: &str) -> Result<Value, ApiError> {
    send::<()>(Verb::Get, path, None).await
}

pub async fn post<B: Serialize>(path: &str, body: &B) -> Result<Value, ApiError> {
    send(Verb::Post, path, Some(body)).await
}

/// POST with no body, used by action endpoints (`/invoices/4/send`)
pub async fn post_empty(path: &str) -> Result<Value, ApiError> {
    send::<()>(Verb::Post, path, None).await
}

pub async fn put<B: Serialize>(path: &str, body: &B) -> Result<Value, ApiError> {
    send(Verb::Put, path, Some(body)).await
}

pub async fn patch<B: Serialize>(path: &str, body: &B) -> Result<Value, ApiError> {
    send(Verb::Patch, path, Some(body)).await
}

pub async fn delete(path: &str) -> Result<Value, ApiError> {
    send::<()>(Verb::Delete, path, None).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body("").unwrap(), Value::Null);
        assert_eq!(parse_body("  \n").unwrap(), Value::Null);
        assert_eq!(parse_body(r#"{"ok":true}"#).unwrap()["ok"], Value::Bool(true));
        assert!(matches!(parse_body("<html>"), Err(ApiError::Decode(_))));
    }
}
