//! Forging of GitHub style push payloads from Travis and GitHub API data.
//!
//! Travis decides what to build by reading a push event. Nothing here comes
//! from a real event: the payload is reassembled from the last build and the
//! commit it points at, with a few fields fixed to their usual values.

use log::debug;
use serde::Serialize;

use crate::commit::{Person, RawCommitInfo};
use crate::config::{Endpoints, RepoSlug};
use crate::error::Result;
use crate::remote::github::{self, RawRepositoryInfo, RawUserInfo};
use crate::remote::travis::{self, RawBuildInfo};
use crate::remote::Transport;

/// Always reported as the pushed ref
pub const PUSHED_REF: &str = "refs/heads/master";

const COMMIT_PAGE_HOST: &str = "https://github.com";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForgedPayload {
    pub after: String,
    /// Abbreviated, as found in the compare url
    pub before: String,
    pub commits: Vec<HeadCommit>,
    pub compare: String,
    pub created: bool,
    pub deleted: bool,
    pub forced: bool,
    pub head_commit: HeadCommit,
    pub pusher: Person,
    #[serde(rename = "ref")]
    pub reference: String,
    pub repository: Repository,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadCommit {
    pub sha: String,
    pub message: String,
    pub date: String,
    pub committer: Person,
    pub author: Person,
    pub compare: String,
    pub distinct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
    pub modified: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "_links")]
    pub links: Links,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Links {
    pub html: Link,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Owner {
    #[serde(rename = "type")]
    pub kind: String,
    pub login: String,
    pub email: Option<String>,
}

impl HeadCommit {
    fn new(commit: &RawCommitInfo, compare_url: &str) -> Self {
        Self {
            sha: commit.id.clone(),
            message: commit.message.clone(),
            date: commit.authored_date.clone(),
            committer: commit.committer.clone(),
            author: commit.author.clone(),
            compare: compare_url.to_string(),
            distinct: true,
            url: commit.url.as_deref().map(commit_page_url),
            added: commit.added.clone(),
            removed: commit.removed.clone(),
            modified: commit.modified_files(),
        }
    }
}

fn commit_page_url(path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        path.to_string()
    } else {
        format!("{}{}", COMMIT_PAGE_HOST, path)
    }
}

impl From<&RawUserInfo> for Owner {
    fn from(user: &RawUserInfo) -> Self {
        Self {
            kind: user.kind.clone(),
            login: user.login.clone(),
            email: user.email.clone(),
        }
    }
}

impl Repository {
    fn new(repo: RawRepositoryInfo, owner: &RawUserInfo) -> Self {
        Self {
            links: Links {
                html: Link {
                    href: repo.url.clone(),
                },
            },
            name: repo.name,
            description: repo.description,
            url: repo.url,
            owner: owner.into(),
        }
    }
}

impl ForgedPayload {
    /// Assemble a payload from already fetched records
    pub fn assemble(
        build: &RawBuildInfo,
        user: &RawUserInfo,
        repository: RawRepositoryInfo,
        commit: &RawCommitInfo,
    ) -> Result<Self> {
        let before = build.before()?;
        let head_commit = HeadCommit::new(commit, &build.compare_url);

        Ok(Self {
            after: build.commit.clone(),
            before,
            commits: vec![head_commit.clone()],
            compare: build.compare_url.clone(),
            created: false,
            deleted: false,
            forced: false,
            head_commit,
            pusher: commit.committer.clone(),
            reference: PUSHED_REF.to_string(),
            repository: Repository::new(repository, user),
        })
    }
}

/// Fetch everything needed about the last build of `repo` and forge the push
/// payload that would have triggered it
pub fn forge<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    repo: &RepoSlug,
) -> Result<ForgedPayload> {
    let build_id = travis::last_build_id(transport, endpoints, repo)?;
    let build = travis::build(transport, endpoints, build_id)?;
    // Checked before any GitHub request is made
    build.before()?;

    let user = github::user(transport, endpoints, &repo.owner)?;
    let repository = github::repository(transport, endpoints, repo)?;
    let commit = github::commit(transport, endpoints, repo, &build.commit)?;
    debug!("forging push of {} to {}", commit.id, repo);

    ForgedPayload::assemble(&build, &user, repository, &commit)
}
