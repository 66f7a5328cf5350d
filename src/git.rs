use std::process::{Command, Output};

use log::debug;

use crate::config::RepoSlug;
use crate::error::{Error, Result};

/// Guess the repository to ping from the upstream of the checked out branch
pub(crate) fn detect_repository() -> Result<RepoSlug> {
    let branch = git_head()?;
    let url = git_upstream_url(&branch)?;
    debug!("branch {} tracks {}", branch, url);
    parse_remote_url(&url).ok_or(Error::GitBadRemoteURL(url))
}

fn stderr_of(output: &Output) -> (i32, String) {
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stderr).trim().to_string(),
    )
}

fn git_head() -> Result<String> {
    let output = Command::new("git")
        .arg("rev-parse")
        .arg("--abbrev-ref")
        .arg("HEAD")
        .output()?;

    if !output.status.success() {
        let (code, stderr) = stderr_of(&output);
        return Err(Error::GitNoHead(code, stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn git_upstream_url(branch: &str) -> Result<String> {
    let output = Command::new("git")
        .arg("rev-parse")
        .arg("--abbrev-ref")
        .arg("--symbolic-full-name")
        .arg(format!("{}@{{upstream}}", branch))
        .output()?;

    if !output.status.success() {
        let (code, stderr) = stderr_of(&output);
        return Err(Error::GitNoUpstream(code, stderr));
    }

    let upstream = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let remote = upstream_remote(&upstream).ok_or(Error::GitBadRemote(upstream.clone()))?;

    let output = Command::new("git")
        .arg("remote")
        .arg("get-url")
        .arg(remote)
        .output()?;

    if !output.status.success() {
        let (code, stderr) = stderr_of(&output);
        return Err(Error::GitNoUpstreamURL(code, stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// `origin/main` -> `origin`
fn upstream_remote(upstream: &str) -> Option<&str> {
    upstream
        .split_once('/')
        .map(|(remote, _)| remote)
        .filter(|remote| !remote.is_empty())
}

/// Read `owner/name` out of an SSH (`git@host:owner/name.git`) or HTTP(S)
/// (`https://host/owner/name.git`) remote url
pub(crate) fn parse_remote_url(url: &str) -> Option<RepoSlug> {
    let url = url.trim().trim_end_matches('/');
    let path = if let Some(rest) = url.split_once("://").map(|(_, rest)| rest) {
        // Drop the host, along with any credentials in front of it
        rest.split_once('/')?.1
    } else {
        // scp-like syntax
        url.rsplit_once(':')?.1
    };

    let mut parts = path.rsplit('/');
    let name = parts.next()?;
    let owner = parts.next()?;
    let name = name.strip_suffix(".git").unwrap_or(name);

    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some(RepoSlug::new(owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ssh_remotes() {
        assert_eq!(
            parse_remote_url("git@github.com:acme/widget.git"),
            Some(RepoSlug::new("acme", "widget"))
        );
        assert_eq!(
            parse_remote_url("ssh://git@github.com/acme/widget"),
            Some(RepoSlug::new("acme", "widget"))
        );
    }

    #[test]
    fn parses_http_remotes() {
        assert_eq!(
            parse_remote_url("https://github.com/acme/widget.git\n"),
            Some(RepoSlug::new("acme", "widget"))
        );
        assert_eq!(
            parse_remote_url("https://user:pw@github.com/acme/widget/"),
            Some(RepoSlug::new("acme", "widget"))
        );
    }

    #[test]
    fn rejects_remotes_without_owner() {
        assert_eq!(parse_remote_url("https://github.com/widget"), None);
        assert_eq!(parse_remote_url("/srv/git/widget.git"), None);
        assert_eq!(parse_remote_url("widget"), None);
    }

    #[test]
    fn remote_name_is_the_first_upstream_component() {
        assert_eq!(upstream_remote("origin/main"), Some("origin"));
        assert_eq!(upstream_remote("origin/feature/x"), Some("origin"));
        assert_eq!(upstream_remote("main"), None);
    }
}
