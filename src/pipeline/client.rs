//! The authenticated request pipeline.
//!
//! # Responsibilities
//! - Issue HTTP requests with the stored bearer credential attached
//! - On a first 401, renew the credential exactly once per failure wave
//! - Replay queued requests FIFO with the renewed credential, trigger last
//! - Tear down the session when renewal fails
//!
//! # Design Decisions
//! - Renewal talks to the refresh endpoint with the bare HTTP client,
//!   so its own 401 cannot recurse into the pipeline
//! - Renewal failure is fatal to the session and is not retried; a
//!   rejected refresh credential cannot be recovered without a new login
//! - Renewal errors travel as plain strings so every queued caller can
//!   receive its own copy

use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use url::Url;
use uuid::Uuid;

use crate::auth::events::SessionEvents;
use crate::auth::store::TokenStore;
use crate::config::ClientConfig;
use crate::observability::metrics;
use crate::pipeline::error::ClientError;
use crate::pipeline::renewal::{QueuedCall, RenewalState};
use crate::pipeline::request::{ApiRequest, ApiResponse};

/// HTTP client wrapper implementing the authenticated request pipeline.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    refresh_url: Url,
    store: Arc<dyn TokenStore>,
    events: SessionEvents,
    renewal: Mutex<RenewalState>,
}

#[derive(Deserialize)]
struct RenewedCredential {
    access: String,
}

impl ApiClient {
    /// Build a client over the given credential store.
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let base = config.base_url.trim_end_matches('/');
        let base_url = Url::parse(base)
            .map_err(|e| ClientError::Config(format!("invalid base_url `{}`: {e}", config.base_url)))?;
        let refresh_url = Url::parse(&format!("{base}{}", config.refresh_path))
            .map_err(|e| ClientError::Config(format!("invalid refresh_path `{}`: {e}", config.refresh_path)))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            refresh_url,
            store,
            events: SessionEvents::new(),
            renewal: Mutex::new(RenewalState::default()),
        })
    }

    /// Session lifecycle events (forced logouts) emitted by this client.
    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// Issue a request, transparently renewing the credential on a 401.
    ///
    /// Non-401 responses (including other error statuses) come back as
    /// plain [`ApiResponse`] values for caller-level handling. A 401 that
    /// survives the single renewal attempt surfaces as
    /// [`ClientError::Unauthorized`]; a failed renewal as
    /// [`ClientError::SessionExpired`] alongside a full session teardown.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        let access = self.store.access();
        let response = self.attempt(&request, access.as_deref(), &request_id).await?;

        if response.status != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        tracing::debug!(
            request_id = %request_id,
            path = %request.path,
            "Unauthorized response, entering credential renewal"
        );
        self.recover(request).await
    }

    /// One wire attempt. No retry logic lives here.
    async fn attempt(
        &self,
        request: &ApiRequest,
        access: Option<&str>,
        request_id: &str,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.request_url(&request.path)?;

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .headers(request.headers.clone())
            .header("x-request-id", request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = access {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        metrics::record_request(request.method.as_str(), status.as_u16());
        tracing::debug!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            status = %status,
            "Request completed"
        );

        Ok(ApiResponse::new(status, headers, body))
    }

    /// Paths concatenate onto the base URL; `Url::join` would discard the
    /// base path segment for absolute paths.
    fn request_url(&self, path: &str) -> Result<Url, ClientError> {
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|_| ClientError::InvalidPath(path.to_string()))
    }

    /// Handle the first 401 of a request: join the wave in progress, or
    /// open one and own it to completion.
    async fn recover(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let waiter = {
            let mut wave = self.renewal.lock().expect("renewal state mutex poisoned");
            if wave.in_progress {
                let (tx, rx) = oneshot::channel();
                wave.queue.push_back(QueuedCall {
                    request: request.clone(),
                    responder: tx,
                });
                Some(rx)
            } else {
                wave.in_progress = true;
                None
            }
        };

        if let Some(rx) = waiter {
            tracing::debug!(path = %request.path, "Renewal already in progress, queued for replay");
            return match rx.await {
                Ok(result) => result,
                // The wave owner never drops a continuation; this arm only
                // fires if its task was killed outright.
                Err(_) => Err(ClientError::SessionExpired(
                    "renewal wave abandoned".to_string(),
                )),
            };
        }

        match self.renew().await {
            Ok(access) => {
                self.store.store_access(&access);
                metrics::record_renewal("success");
                tracing::info!("Credential renewed, replaying suspended requests");

                self.drain(Ok(&access)).await;

                // The triggering request replays last.
                let replay_id = Uuid::new_v4().to_string();
                metrics::record_replay();
                let response = self.attempt(&request, Some(&access), &replay_id).await?;
                if response.status == StatusCode::UNAUTHORIZED {
                    tracing::warn!(path = %request.path, "Still unauthorized after renewal");
                    Err(ClientError::Unauthorized)
                } else {
                    Ok(response)
                }
            }
            Err(reason) => {
                tracing::warn!(error = %reason, "Credential renewal failed, tearing down session");
                metrics::record_renewal("failure");

                self.drain(Err(&reason)).await;
                self.store.clear_all();
                self.events.terminated(&reason);
                metrics::record_session_teardown();

                Err(ClientError::SessionExpired(reason))
            }
        }
    }

    /// Exchange the refresh credential for a new access credential.
    /// Goes through the bare HTTP client: its own 401 must not recurse.
    async fn renew(&self) -> Result<String, String> {
        let refresh = match self.store.refresh() {
            Some(token) => token,
            None => return Err("no refresh credential in store".to_string()),
        };

        let response = self
            .http
            .post(self.refresh_url.clone())
            .json(&serde_json::json!({ "refresh": refresh }))
            .send()
            .await
            .map_err(|e| format!("renewal request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("renewal rejected with status {status}"));
        }

        let renewed: RenewedCredential = response
            .json()
            .await
            .map_err(|e| format!("malformed renewal response: {e}"))?;
        Ok(renewed.access)
    }

    /// Drain the wave queue in FIFO order, then close the wave.
    ///
    /// Loops because continuations can arrive while earlier ones are
    /// replaying; they belong to this wave and reuse its outcome. The
    /// in-progress flag clears only once the queue is observed empty.
    async fn drain(&self, outcome: Result<&str, &str>) {
        loop {
            let batch = {
                let mut wave = self.renewal.lock().expect("renewal state mutex poisoned");
                if wave.queue.is_empty() {
                    wave.in_progress = false;
                    break;
                }
                std::mem::take(&mut wave.queue)
            };

            for call in batch {
                let result = match outcome {
                    Ok(access) => {
                        let replay_id = Uuid::new_v4().to_string();
                        metrics::record_replay();
                        match self.attempt(&call.request, Some(access), &replay_id).await {
                            Ok(response) if response.status == StatusCode::UNAUTHORIZED => {
                                // Already retried once; terminal.
                                Err(ClientError::Unauthorized)
                            }
                            other => other,
                        }
                    }
                    Err(reason) => Err(ClientError::SessionExpired(reason.to_string())),
                };

                // The caller may have lost interest; the replay still ran.
                let _ = call.responder.send(result);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryTokenStore;

    fn client() -> ApiClient {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9/api_backend".to_string(),
            ..Default::default()
        };
        ApiClient::new(&config, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn paths_concatenate_after_the_base_path() {
        let client = client();
        let url = client.request_url("/student/answers/").unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9/api_backend/student/answers/"
        );
    }

    #[test]
    fn refresh_endpoint_sits_under_the_base() {
        let client = client();
        assert_eq!(
            client.refresh_url.as_str(),
            "http://127.0.0.1:9/api_backend/token/refresh/"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        let result = ApiClient::new(&config, Arc::new(MemoryTokenStore::new()));
        assert!(matches!(result, Err(ClientError::Config(_))));
    }
}
