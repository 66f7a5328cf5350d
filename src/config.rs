use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const DEFAULT_TRAVIS_URL: &str = "http://travis-ci.org";
pub const DEFAULT_GITHUB_URL: &str = "http://github.com/api/v2/json";
pub const DEFAULT_NOTIFY_URL: &str = "http://notify.travis-ci.org";
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Settings for the HTTP client shared by every request of a run
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    /// Travis' notify endpoint has historically been reached without
    /// certificate verification, so this is off unless asked for.
    pub verify_tls: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            verify_tls: false,
        }
    }
}

/// Base URLs of the services involved in a ping
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub travis: String,
    pub github: String,
    pub notify: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_TRAVIS_URL, DEFAULT_GITHUB_URL, DEFAULT_NOTIFY_URL)
    }
}

impl Endpoints {
    pub fn new(travis: &str, github: &str, notify: &str) -> Self {
        Self {
            travis: travis.trim_end_matches('/').to_string(),
            github: github.trim_end_matches('/').to_string(),
            notify: notify.to_string(),
        }
    }

    pub fn build_summary(&self, repo: &RepoSlug) -> String {
        format!("{}/{}/{}.json", self.travis, repo.owner, repo.name)
    }

    pub fn build(&self, build_id: u64) -> String {
        format!("{}/builds/{}.json", self.travis, build_id)
    }

    pub fn user(&self, owner: &str) -> String {
        format!("{}/user/show/{}", self.github, owner)
    }

    pub fn repository(&self, repo: &RepoSlug) -> String {
        format!("{}/repos/show/{}/{}", self.github, repo.owner, repo.name)
    }

    pub fn commit(&self, repo: &RepoSlug, sha: &str) -> String {
        format!(
            "{}/commits/show/{}/{}/{}",
            self.github, repo.owner, repo.name, sha
        )
    }
}

/// Basic auth credentials for the notify endpoint
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// A repository on the hosting service, identified as `owner/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    /// The name of the account that owns the repository
    pub owner: String,
    /// The name of the repository
    pub name: String,
}

impl RepoSlug {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl FromStr for RepoSlug {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Self::new(owner, name))
            }
            _ => Err(Error::InvalidRepository(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
