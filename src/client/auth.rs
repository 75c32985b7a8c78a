//! Bearer tokens for the grid store.
//!
//! A pre-issued token is used as-is. A service account signs a short-lived
//! RS256 assertion and exchanges it at the token URL; the resulting access
//! token is cached until shortly before it expires.

use crate::client::GridError;
use crate::config::Credentials;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use secrecy::ExposeSecret;
use secrecy::SecretString;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_BUFFER_SECS: i64 = 60;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

/// An access token with its refresh deadline (None = never refreshed).
#[derive(Clone, Debug)]
struct AccessToken {
    value: SecretString,
    refresh_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.refresh_at.map(|refresh_at| now < refresh_at).unwrap_or(true)
    }
}

/// Signs the service account assertion sent to the token URL.
pub fn sign_assertion(
    email: &str,
    private_key: &SecretString,
    token_url: &str,
    now: DateTime<Utc>,
) -> Result<String, GridError> {
    let claims = Claims {
        iss: email.to_owned(),
        scope: SPREADSHEETS_SCOPE.to_owned(),
        aud: token_url.to_owned(),
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ASSERTION_LIFETIME_SECS)).timestamp(),
    };
    let key = EncodingKey::from_rsa_pem(private_key.expose_secret().as_bytes())?;
    Ok(jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &key)?)
}

/// Supplies bearer tokens for requests, fetching and caching them as needed.
pub struct TokenSource {
    credentials: Credentials,
    token_url: String,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    pub fn new(credentials: Credentials, token_url: &str) -> Self {
        Self {
            credentials,
            token_url: token_url.to_owned(),
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, exchanging a new assertion when the cached one is stale.
    pub async fn bearer(&self, http: &reqwest::Client) -> Result<SecretString, GridError> {
        let (email, private_key) = match &self.credentials {
            Credentials::AccessToken(token) => return Ok(token.clone()),
            Credentials::ServiceAccount { email, private_key } => (email, private_key),
        };

        let mut cached = self.cached.lock().await;
        let now = Utc::now();
        if let Some(token) = cached.as_ref().filter(|token| token.is_fresh(now)) {
            return Ok(token.value.clone());
        }

        let assertion = sign_assertion(email, private_key, &self.token_url, now)?;
        let token = self.exchange(http, &assertion, now).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    #[tracing::instrument(skip_all, fields(token_url = %self.token_url))]
    async fn exchange(
        &self,
        http: &reqwest::Client,
        assertion: &str,
        now: DateTime<Utc>,
    ) -> Result<AccessToken, GridError> {
        let response = http
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GridError::Auth {
                status: status.as_u16(),
                message,
            });
        }

        let data: TokenResponse = response.json().await?;
        debug!(expires_in = ?data.expires_in, "obtained access token");
        Ok(AccessToken {
            value: SecretString::from(data.access_token),
            refresh_at: data
                .expires_in
                .map(|seconds| now + Duration::seconds(seconds - EXPIRY_BUFFER_SECS)),
        })
    }
}
