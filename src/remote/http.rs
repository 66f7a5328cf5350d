use log::{trace, warn};

use crate::config::ClientConfig;
use crate::error::{Error, Result, TransportError};
use crate::remote::{FormPost, PostResponse, Transport};

/// [`Transport`] backed by a blocking reqwest client
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if !config.verify_tls {
            warn!("TLS certificate verification is disabled");
        }
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> core::result::Result<String, TransportError> {
        let body = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()?
            .error_for_status()?
            .text()?;
        trace!("GET {} returned {} bytes", url, body.len());
        Ok(body)
    }

    fn post_form(&self, request: &FormPost<'_>) -> core::result::Result<PostResponse, TransportError> {
        let mut builder = self
            .client
            .post(request.url)
            .basic_auth(&request.credentials.username, Some(&request.credentials.token))
            .form(&request.fields);
        for (name, value) in request.headers {
            builder = builder.header(*name, *value);
        }

        let response = builder.send()?.error_for_status()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        trace!("POST {} returned status={}", request.url, status);
        Ok(PostResponse { status, body })
    }
}
