// HTTP client for the identity endpoints.
//
// Wraps `reqwest::Client` with URL construction, multipart body assembly and
// reply interpretation. A reply is either a `Verdict` (the server answered)
// or an `Error` (the request never completed or the body was unreadable).

use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{FailureBody, SuccessBody, Verdict};
use crate::transport::TransportConfig;
use crate::upload::ImageUpload;

pub const REGISTER_PATH: &str = "register-user/";
pub const SIGN_IN_PATH: &str = "sign-in-user/";

/// Raw HTTP client for the face registration backend.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IdentityClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the backend root (e.g. `http://127.0.0.1:8000`).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Parse `base_url` and wrap a pre-built `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self::with_client(http, Url::parse(base_url)?))
    }

    /// The backend base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/{path}`, tolerating a base with or without a trailing
    /// slash or a path prefix.
    pub(crate) fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Ok(Url::parse(&full)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `POST /register-user/` with multipart fields `name` and `file`.
    pub async fn register_user(&self, name: &str, image: ImageUpload) -> Result<Verdict, Error> {
        let form = Form::new()
            .text("name", name.to_owned())
            .part("file", image.into_part()?);
        self.post_form(self.endpoint_url(REGISTER_PATH)?, form).await
    }

    /// `POST /sign-in-user/` with multipart field `file`.
    pub async fn sign_in_user(&self, image: ImageUpload) -> Result<Verdict, Error> {
        let form = Form::new().part("file", image.into_part()?);
        self.post_form(self.endpoint_url(SIGN_IN_PATH)?, form).await
    }

    // ── Request helpers ──────────────────────────────────────────────

    async fn post_form(&self, url: Url, form: Form) -> Result<Verdict, Error> {
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::interpret(resp).await
    }

    /// Turn a response into a `Verdict`. Both success and failure bodies
    /// must be JSON; anything else is a `Deserialization` error.
    async fn interpret(resp: reqwest::Response) -> Result<Verdict, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        debug!(status = status.as_u16(), len = body.len(), "reply received");

        if status.is_success() {
            let parsed: SuccessBody = parse_body(&body)?;
            Ok(Verdict::Accepted {
                message: parsed.message,
            })
        } else {
            let parsed: FailureBody = parse_body(&body)?;
            Ok(Verdict::Rejected {
                status: status.as_u16(),
                detail: parsed.detail_text(),
            })
        }
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_handles_trailing_slash_and_prefix() {
        let plain = IdentityClient::from_reqwest("http://localhost:8000", reqwest::Client::new())
            .unwrap();
        assert_eq!(
            plain.endpoint_url(REGISTER_PATH).unwrap().as_str(),
            "http://localhost:8000/register-user/"
        );

        let prefixed =
            IdentityClient::from_reqwest("http://localhost:8000/faces/", reqwest::Client::new())
                .unwrap();
        assert_eq!(
            prefixed.endpoint_url(SIGN_IN_PATH).unwrap().as_str(),
            "http://localhost:8000/faces/sign-in-user/"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = IdentityClient::from_reqwest("not a url", reqwest::Client::new());
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }
}
