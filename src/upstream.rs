//! Upstream identity-graph query executor
//!
//! Issues the fixed `QUERY_PROFILE` GraphQL document against the configured
//! endpoint and maps transport and application failures into the
//! [`LookupError`] taxonomy. Single attempt per call, hard deadline enforced
//! by reqwest's per-request timeout (the in-flight connection is dropped when
//! the deadline passes, not merely abandoned).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::lookup::IdentityFetcher;
use crate::normalize::NormalizedKey;

/// User-agent sent on every upstream request
pub const USER_AGENT: &str = "relate-account-mcp/3.0";

/// Full profile query: the identity record plus its resolved graph vertices
const IDENTITY_QUERY: &str = r#"
  query QUERY_PROFILE($platform: Platform!, $identity: String!) {
    identity(platform: $platform, identity: $identity) {
      id
      status
      aliases
      identity
      platform
      network
      isPrimary
      primaryName
      resolvedAddress {
        address
        network
      }
      ownerAddress {
        address
        network
      }
      managerAddress {
        address
        network
      }
      updatedAt
      profile {
        identity
        platform
        network
        address
        displayName
        avatar
        description
        addresses {
          address
          network
        }
      }
      identityGraph {
        graphId
        vertices {
          identity
          platform
          network
          isPrimary
          primaryName
          registeredAt
          managerAddress {
            address
            network
          }
          ownerAddress {
            address
            network
          }
          resolvedAddress {
            address
            network
          }
          updatedAt
          expiredAt
          profile {
            uid
            identity
            platform
            network
            address
            displayName
            avatar
            description
            texts
            addresses {
              address
              network
            }
          }
        }
      }
    }
  }
"#;

/// GraphQL response wrapper
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// HTTP client for the identity-graph GraphQL API
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    endpoint: String,
    auth_token: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    /// Create a client from config
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .default_headers({
                let mut headers = header::HeaderMap::new();
                headers.insert(
                    header::USER_AGENT,
                    header::HeaderValue::from_static(USER_AGENT),
                );
                headers.insert(
                    header::CONTENT_TYPE,
                    header::HeaderValue::from_static("application/json"),
                );
                headers
            })
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            auth_token: config.access_token.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Execute the profile query for a normalized key
    ///
    /// Returns the GraphQL `data` payload verbatim; its structure is opaque
    /// to the rest of the gateway.
    pub async fn execute(&self, key: &NormalizedKey) -> Result<Value> {
        let body = serde_json::json!({
            "query": IDENTITY_QUERY,
            "variables": {
                "platform": key.platform,
                "identity": key.identity,
            },
        });

        debug!(key = %key, endpoint = %self.endpoint, "querying identity graph");

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(ref token) = self.auth_token {
            request = request.header(header::AUTHORIZATION, token);
        }

        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Http {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown").to_string(),
            });
        }

        let result: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        if let Some(errors) = result.errors {
            if !errors.is_empty() {
                let joined = errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(LookupError::Upstream(joined));
            }
        }

        result
            .data
            .ok_or_else(|| LookupError::Upstream("no data in response".to_string()))
    }

    fn map_transport_error(&self, err: reqwest::Error) -> LookupError {
        if err.is_timeout() {
            LookupError::Timeout(self.timeout)
        } else {
            LookupError::Network(err)
        }
    }
}

#[async_trait]
impl IdentityFetcher for UpstreamClient {
    async fn fetch(&self, key: &NormalizedKey) -> Result<Value> {
        self.execute(key).await
    }
}
