use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use crate::error::TransportError;
use crate::remote::{FormPost, PostResponse, Transport};

/// A POST captured by [`FakeTransport`]
#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub url: String,
    pub username: String,
    pub token: String,
    pub headers: Vec<(String, String)>,
    pub fields: Vec<(String, String)>,
}

impl RecordedPost {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory transport serving canned responses and recording every call.
/// Unknown GET urls answer 404.
#[derive(Debug)]
pub struct FakeTransport {
    routes: HashMap<String, Result<String, u16>>,
    post_status: u16,
    gets: RefCell<Vec<String>>,
    posts: RefCell<Vec<RecordedPost>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            post_status: 200,
            gets: RefCell::new(Vec::new()),
            posts: RefCell::new(Vec::new()),
        }
    }

    pub fn with_json(self, url: &str, value: Value) -> Self {
        self.with_body(url, &value.to_string())
    }

    pub fn with_body(mut self, url: &str, body: &str) -> Self {
        self.routes.insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_status(mut self, url: &str, status: u16) -> Self {
        self.routes.insert(url.to_string(), Err(status));
        self
    }

    pub fn with_post_status(mut self, status: u16) -> Self {
        self.post_status = status;
        self
    }

    pub fn gets(&self) -> Vec<String> {
        self.gets.borrow().clone()
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.borrow().clone()
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for FakeTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self.gets.borrow_mut().push(url.to_string());
        match self.routes.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(TransportError::Status(*status)),
            None => Err(TransportError::Status(404)),
        }
    }

    fn post_form(&self, request: &FormPost<'_>) -> Result<PostResponse, TransportError> {
        let owned = |pairs: &[(&str, &str)]| {
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<Vec<_>>()
        };
        self.posts.borrow_mut().push(RecordedPost {
            url: request.url.to_string(),
            username: request.credentials.username.clone(),
            token: request.credentials.token.clone(),
            headers: owned(request.headers),
            fields: owned(request.fields),
        });

        if (200..300).contains(&self.post_status) {
            Ok(PostResponse {
                status: self.post_status,
                body: String::from("OK"),
            })
        } else {
            Err(TransportError::Status(self.post_status))
        }
    }
}
