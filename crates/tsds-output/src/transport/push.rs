use std::fmt;

use bytes::Bytes;

use crate::batch::Batch;
use crate::config::OutputSection;

/// Push service path on a TSDS host.
pub const PUSH_PATH: &str = "/tsds-basic/services/push.cgi";

/// Web service method that stores measurement records.
pub const ADD_DATA_METHOD: &str = "add_data";

/// Basic-auth credentials. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where and as whom batches are pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub credentials: Option<Credentials>,
}

impl Endpoint {
    /// Credentials are only attached when both username and password are set.
    pub fn from_config(section: &OutputSection) -> Self {
        let credentials = if section.username.is_empty() || section.password.is_empty() {
            None
        } else {
            Some(Credentials {
                username: section.username.clone(),
                password: section.password.clone(),
            })
        };

        Self {
            url: format!("https://{}{}", section.hostname, PUSH_PATH),
            credentials,
        }
    }
}

/// One `add_data` call carrying a single batch.
#[derive(Debug, Clone)]
pub struct PushRequest {
    pub url: String,
    pub method: &'static str,
    /// JSON array of records (the `data` form field).
    pub data: Bytes,
    pub records: usize,
    pub credentials: Option<Credentials>,
}

impl PushRequest {
    pub fn add_data(endpoint: &Endpoint, batch: &Batch) -> Self {
        Self {
            url: endpoint.url.clone(),
            method: ADD_DATA_METHOD,
            data: batch.to_data(),
            records: batch.len(),
            credentials: endpoint.credentials.clone(),
        }
    }
}
