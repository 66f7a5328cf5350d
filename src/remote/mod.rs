pub mod github;
pub mod http;
pub mod travis;

#[cfg(test)]
pub(crate) mod fake;

use log::trace;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::Credentials;
use crate::error::{Error, Result, TransportError};

/// A form-encoded POST authenticated with basic auth
#[derive(Debug)]
pub struct FormPost<'a> {
    pub url: &'a str,
    pub credentials: &'a Credentials,
    pub headers: &'a [(&'a str, &'a str)],
    pub fields: &'a [(&'a str, &'a str)],
}

/// What came back from a successful POST
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostResponse {
    pub status: u16,
    pub body: String,
}

/// The two HTTP exchanges a ping is made of. Non-2xx statuses are errors.
pub trait Transport {
    fn get(&self, url: &str) -> core::result::Result<String, TransportError>;
    fn post_form(&self, request: &FormPost<'_>) -> core::result::Result<PostResponse, TransportError>;
}

/// GET `url` and parse the body as JSON
pub fn fetch_value<T: Transport + ?Sized>(
    transport: &T,
    step: &'static str,
    url: &str,
) -> Result<Value> {
    trace!("{} request url={}", step, url);
    let body = transport.get(url).map_err(|source| Error::Fetch {
        step,
        url: url.to_string(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| Error::Parse {
        step,
        url: url.to_string(),
        source,
    })
}

/// Validate an already parsed JSON value into a typed record
pub fn extract<R: DeserializeOwned>(step: &'static str, value: Value) -> Result<R> {
    serde_json::from_value(value).map_err(|e| Error::PayloadShape {
        step,
        reason: e.to_string(),
    })
}

/// GET `url` and validate the JSON body into `R`, looking inside `envelope`
/// when the record is wrapped in a single top level key
pub fn fetch_record<T: Transport + ?Sized, R: DeserializeOwned>(
    transport: &T,
    step: &'static str,
    url: &str,
    envelope: Option<&str>,
) -> Result<R> {
    let value = fetch_value(transport, step, url)?;
    let value = match envelope {
        Some(key) => unwrap_envelope(value, key),
        None => value,
    };
    extract(step, value)
}

fn unwrap_envelope(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.len() == 1 && map.get(key).is_some_and(Value::is_object) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}
