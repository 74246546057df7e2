// Shared HTTP plumbing for the vendor adapters.
//
// Both vendors take a bearer token and a JSON body on `{base}/moderations`,
// so the request/response handling lives here and the adapters only own
// their wire types and field mapping.

use std::collections::BTreeMap;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Credential;
use crate::error::{ModerationError, Result, TransportError};

const USER_AGENT: &str = concat!("modgate/", env!("CARGO_PKG_VERSION"));

/// Build the long-lived client an adapter holds for its lifetime.
pub(crate) fn build_client() -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ModerationError::Configuration(format!("failed to build HTTP client: {e}")))
}

/// `{base}/moderations`, tolerating a trailing slash or a base that already
/// points at the endpoint.
pub(crate) fn moderations_url(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.ends_with("/moderations") {
        base.to_string()
    } else {
        format!("{base}/moderations")
    }
}

/// POST a moderation body and decode the vendor response.
pub(crate) async fn post_json<B, R>(
    client: &Client,
    provider: &'static str,
    url: &str,
    credential: &Credential,
    body: &B,
) -> Result<R>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    let response = client
        .post(url)
        .bearer_auth(credential.expose())
        .json(body)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::Api {
            provider,
            status,
            body,
        }
        .into());
    }

    Ok(response.json::<R>().await?)
}

/// Vendors must answer one result per input, in order.
pub(crate) fn ensure_result_count(provider: &'static str, expected: usize, got: usize) -> Result<()> {
    if expected != got {
        return Err(TransportError::MalformedResponse {
            provider,
            message: format!("expected {expected} results, got {got}"),
        }
        .into());
    }
    Ok(())
}

/// Drop categories the vendor reported as `null`.
pub(crate) fn present<T>(map: BTreeMap<String, Option<T>>) -> BTreeMap<String, T> {
    map.into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
}
