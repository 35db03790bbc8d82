//! Threat Response HTTP client.

use std::cell::OnceCell;
use std::fmt;
use std::str::FromStr;

use relay_core::{ModuleRegistry, RegistryError, RemoteModule};
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::credentials::Credentials;
use crate::error::{ClientError, ClientResult};

const TOKEN_PATH: &str = "/iroh/oauth2/token";
const MODULE_INSTANCE_PATH: &str = "/iroh/iroh-int/module-instance";

/// Threat Response deployment region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Us,
    Eu,
    Apjc,
}

impl Region {
    /// Base URL of the region's API.
    pub fn base_url(&self) -> &'static str {
        match self {
            Region::Us => "https://visibility.amp.cisco.com",
            Region::Eu => "https://visibility.eu.amp.cisco.com",
            Region::Apjc => "https://visibility.apjc.amp.cisco.com",
        }
    }
}

impl FromStr for Region {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "us" => Ok(Region::Us),
            "eu" => Ok(Region::Eu),
            "apjc" => Ok(Region::Apjc),
            _ => Err(ClientError::InvalidRegion(s.to_string())),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Us => write!(f, "us"),
            Region::Eu => write!(f, "eu"),
            Region::Apjc => write!(f, "apjc"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the Threat Response module instance API.
///
/// Construction does no I/O. The access token is requested on the first
/// registry call and reused for the lifetime of the client.
pub struct ThreatResponseClient {
    /// HTTP client.
    http: Client,
    /// Base URL (e.g., "https://visibility.amp.cisco.com").
    base_url: String,
    credentials: Credentials,
    token: OnceCell<String>,
}

impl ThreatResponseClient {
    /// Create a client for `region`.
    pub fn new(credentials: Credentials, region: Region) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: region.base_url().to_string(),
            credentials,
            token: OnceCell::new(),
        })
    }

    /// Point the client at another deployment.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn module_instances_url(&self) -> String {
        format!("{}{}", self.base_url, MODULE_INSTANCE_PATH)
    }

    fn module_instance_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, MODULE_INSTANCE_PATH, id)
    }

    /// Bearer token for API calls, fetched once.
    fn token(&self) -> ClientResult<&str> {
        if let Some(token) = self.token.get() {
            return Ok(token);
        }

        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        tracing::debug!(%url, client_id = %self.credentials.client_id, "Requesting access token");

        let response = self
            .http
            .post(&url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[("grant_type", "client_credentials")])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(match status {
                StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    ClientError::Unauthorized {
                        status: status.as_u16(),
                        body,
                    }
                }
                _ => api_error(status, body),
            });
        }

        let token: TokenResponse = response.json()?;
        Ok(self.token.get_or_init(|| token.access_token))
    }

    fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let token = self.token()?;
        let response = request
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().unwrap_or_default();
            Err(api_error(status, body))
        }
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        Ok(self.send(request)?.json()?)
    }
}

impl fmt::Debug for ThreatResponseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreatResponseClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("authenticated", &self.token.get().is_some())
            .finish()
    }
}

fn api_error(status: StatusCode, body: String) -> ClientError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ClientError::Unauthorized {
            status: status.as_u16(),
            body,
        },
        _ => ClientError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

impl ModuleRegistry for ThreatResponseClient {
    fn list(&self) -> Result<Vec<RemoteModule>, RegistryError> {
        let url = self.module_instances_url();
        tracing::debug!(%url, "GET module instances");
        Ok(self.send_json(self.http.get(&url))?)
    }

    fn create(&self, payload: &Map<String, Value>) -> Result<RemoteModule, RegistryError> {
        let url = self.module_instances_url();
        tracing::debug!(%url, "POST module instance");
        Ok(self.send_json(self.http.post(&url).json(payload))?)
    }

    fn update(
        &self,
        id: &str,
        patch: &Map<String, Value>,
    ) -> Result<RemoteModule, RegistryError> {
        let url = self.module_instance_url(id);
        tracing::debug!(%url, keys = ?patch.keys().collect::<Vec<_>>(), "PATCH module instance");
        Ok(self.send_json(self.http.patch(&url).json(patch))?)
    }

    fn delete(&self, id: &str) -> Result<(), RegistryError> {
        let url = self.module_instance_url(id);
        tracing::debug!(%url, "DELETE module instance");
        self.send(self.http.delete(&url))?;
        Ok(())
    }
}
