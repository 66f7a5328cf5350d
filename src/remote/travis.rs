use std::sync::OnceLock;

use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::config::{Endpoints, RepoSlug};
use crate::error::{Error, Result};
use crate::remote::{fetch_record, Transport};

/// `GET /{owner}/{name}.json`
#[derive(Debug, Deserialize)]
pub struct RawBuildSummary {
    pub last_build_id: u64,
}

/// `GET /builds/{id}.json`
#[derive(Debug, Clone, Deserialize)]
pub struct RawBuildInfo {
    pub commit: String,
    pub compare_url: String,
}

impl RawBuildInfo {
    /// The SHA before the push, as abbreviated in the compare url
    pub fn before(&self) -> Result<String> {
        before_sha(&self.compare_url)
    }
}

fn compare_range() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-f0-9]+)\.\.\.").expect("the compare pattern to be valid"))
}

/// Extract the hex digits immediately preceding `...` in a compare url
pub fn before_sha(compare_url: &str) -> Result<String> {
    compare_range()
        .captures(compare_url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::PayloadShape {
            step: "build",
            reason: format!("no `<sha>...` range in compare_url {:?}", compare_url),
        })
}

pub fn last_build_id<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    repo: &RepoSlug,
) -> Result<u64> {
    let summary: RawBuildSummary =
        fetch_record(transport, "build summary", &endpoints.build_summary(repo), None)?;
    debug!("last build of {} is {}", repo, summary.last_build_id);
    Ok(summary.last_build_id)
}

pub fn build<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    build_id: u64,
) -> Result<RawBuildInfo> {
    let build: RawBuildInfo = fetch_record(transport, "build", &endpoints.build(build_id), None)?;
    debug!("build {} is for commit {}", build_id, build.commit);
    Ok(build)
}
