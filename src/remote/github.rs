use log::debug;
use serde::Deserialize;

use crate::commit::RawCommitInfo;
use crate::config::{Endpoints, RepoSlug};
use crate::error::Result;
use crate::remote::{fetch_record, Transport};

/// `GET /user/show/{owner}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawUserInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub login: String,
    pub email: Option<String>,
}

/// `GET /repos/show/{owner}/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct RawRepositoryInfo {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
}

pub fn user<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    owner: &str,
) -> Result<RawUserInfo> {
    let user: RawUserInfo = fetch_record(transport, "user", &endpoints.user(owner), Some("user"))?;
    debug!("{} is a {}", user.login, user.kind);
    Ok(user)
}

pub fn repository<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    repo: &RepoSlug,
) -> Result<RawRepositoryInfo> {
    fetch_record(
        transport,
        "repository",
        &endpoints.repository(repo),
        Some("repository"),
    )
}

pub fn commit<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    repo: &RepoSlug,
    sha: &str,
) -> Result<RawCommitInfo> {
    fetch_record(
        transport,
        "commit",
        &endpoints.commit(repo, sha),
        Some("commit"),
    )
}
