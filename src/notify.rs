use log::{debug, info};

use crate::config::{Credentials, Endpoints, RepoSlug};
use crate::error::{Error, Result};
use crate::payload::{self, ForgedPayload};
use crate::remote::{FormPost, PostResponse, Transport};

pub const EVENT_HEADER: &str = "X-GitHub-Event";
pub const PUSH_EVENT: &str = "push";

/// Send an already forged payload to the notify endpoint
pub fn deliver<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    credentials: &Credentials,
    payload: &ForgedPayload,
) -> Result<PostResponse> {
    let json = serde_json::to_string(payload).map_err(Error::Serialize)?;
    let request = FormPost {
        url: &endpoints.notify,
        credentials,
        headers: &[(EVENT_HEADER, PUSH_EVENT)],
        fields: &[("payload", json.as_str())],
    };
    debug!("posting {} byte payload to {}", json.len(), endpoints.notify);

    transport.post_form(&request).map_err(|source| Error::Notify {
        url: endpoints.notify.clone(),
        source,
    })
}

/// Forge the push payload for `repo` and notify Travis with it
pub fn ping<T: Transport + ?Sized>(
    transport: &T,
    endpoints: &Endpoints,
    credentials: &Credentials,
    repo: &RepoSlug,
) -> Result<PostResponse> {
    let payload = payload::forge(transport, endpoints, repo)?;
    let response = deliver(transport, endpoints, credentials, &payload)?;
    info!(
        "notified {} of push {}...{} to {} (status={})",
        endpoints.notify, payload.before, payload.after, repo, response.status
    );
    Ok(response)
}
