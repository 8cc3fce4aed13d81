use crate::models::common::Session;
use crate::models::requests::SignRequest;
use crate::models::responses::{SignatureData, SignerEnvelope, TokenData};
use log::{debug, info, warn};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("signing service refused to issue a token")]
    Rejected,
}

/// Per-request signing failure. The cause is logged, not carried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Signature Failed")]
pub struct SignError;

/// Client for the remote service that issues session tokens and signs
/// vendor payloads on our behalf.
#[derive(Clone)]
pub struct SignerClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl SignerClient {
    pub fn new(http: Client, base_url: impl Into<String>, timeout: Duration) -> Self {
        SignerClient {
            http,
            base_url: base_url.into(),
            timeout,
        }
    }

    /// One attempt at `GET /generate-token`. Callers treat any error as fatal.
    pub async fn bootstrap_session(&self) -> Result<Session, AuthError> {
        let url = format!("{}/generate-token", self.base_url);
        info!("Requesting session token from {}", url);

        let envelope = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .json::<SignerEnvelope<TokenData>>()
            .await?;

        let data = match envelope {
            SignerEnvelope {
                status: true,
                data: Some(data),
            } => data,
            _ => return Err(AuthError::Rejected),
        };

        let session = Session::new(data.sn, data.device_id, data.android_id);
        if !session.is_authenticated() {
            return Err(AuthError::Rejected);
        }

        info!("Session established for device {}", session.device_id());
        Ok(session)
    }

    /// Ask the signing service for the `sn` header of `payload`.
    pub async fn sign(&self, session: &Session, payload: &Value) -> Result<String, SignError> {
        match self.request_signature(session, payload).await {
            Ok(Some(signature)) => Ok(signature),
            Ok(None) => {
                warn!("Signing service returned a failure envelope");
                Err(SignError)
            }
            Err(e) => {
                warn!("Signing request failed: {}", e);
                Err(SignError)
            }
        }
    }

    async fn request_signature(
        &self,
        session: &Session,
        payload: &Value,
    ) -> Result<Option<String>, reqwest::Error> {
        let url = format!("{}/sign", self.base_url);
        let request = SignRequest {
            body: payload,
            device_id: session.device_id(),
            android_id: session.install_id(),
            token: session.token(),
        };

        let envelope = self
            .http
            .post(&url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await?
            .json::<SignerEnvelope<SignatureData>>()
            .await?;

        debug!("Sign envelope status: {}", envelope.status);

        Ok(envelope
            .data
            .filter(|_| envelope.status)
            .map(|d| d.sn)
            .filter(|sn| !sn.is_empty()))
    }
}
