//! Spotify Web API cover lookup.
//!
//! Authenticates with the client-credentials flow, caches the access token
//! until shortly before it expires, and searches for
//! `track:<title> artist:<artist>`. The first hit's largest album image is
//! the cover.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tokio::sync::Mutex;

use super::CoverArtLookup;
use crate::error::{EnrichError, EnrichResult};
use crate::resilience::RateLimiter;

const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const SPOTIFY_SEARCH_URL: &str = "https://api.spotify.com/v1/search";
const SOURCE_NAME: &str = "Spotify";

/// Tokens are refreshed this long before Spotify says they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// API response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Tracks,
}

#[derive(Debug, Deserialize)]
struct Tracks {
    #[serde(default)]
    items: Vec<Track>,
}

#[derive(Debug, Deserialize)]
struct Track {
    album: Album,
}

#[derive(Debug, Deserialize)]
struct Album {
    #[serde(default)]
    images: Vec<Image>,
}

#[derive(Debug, Deserialize)]
struct Image {
    url: String,
}

impl SearchResponse {
    fn first_cover(self) -> Option<String> {
        self.tracks
            .items
            .into_iter()
            .next()?
            .album
            .images
            .into_iter()
            .next()
            .map(|image| image.url)
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

/// Spotify Web API client for album covers.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    client_id: String,
    client_secret: String,
    token: Arc<Mutex<Option<CachedToken>>>,
    rate_limiter: RateLimiter,
}

impl SpotifyClient {
    /// Create a client from application credentials obtained at
    /// <https://developer.spotify.com/dashboard>.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> EnrichResult<Self> {
        let http = Client::builder()
            .user_agent("cantus/0.1.0 (https://github.com/oxur/cantus)")
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            token: Arc::new(Mutex::new(None)),
            rate_limiter: RateLimiter::new(5),
        })
    }

    /// A valid access token, fetching a new one when the cached token is
    /// missing or about to expire.
    async fn access_token(&self) -> EnrichResult<String> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() + TOKEN_EXPIRY_MARGIN {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http
            .post(SPOTIFY_TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(EnrichError::Auth {
                source_name: SOURCE_NAME.to_string(),
                message: response.text().await.unwrap_or_else(|_| status.to_string()),
            });
        }
        let response = check_status(response)?;

        let token: TokenResponse = response.json().await.map_err(|e| EnrichError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        log::debug!("Obtained Spotify token valid for {}s", token.expires_in);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + Duration::from_secs(token.expires_in),
        });
        Ok(token.access_token)
    }

    async fn search_cover(&self, query: &str) -> EnrichResult<Option<String>> {
        self.rate_limiter.acquire().await;
        let token = self.access_token().await?;

        let response = self
            .http
            .get(SPOTIFY_SEARCH_URL)
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            // Token revoked early; drop it so the next attempt re-authenticates.
            *self.token.lock().await = None;
        }
        let response = check_status(response)?;

        let result: SearchResponse = response.json().await.map_err(|e| EnrichError::Parse {
            source_name: SOURCE_NAME.to_string(),
            message: e.to_string(),
        })?;

        Ok(result.first_cover())
    }
}

#[async_trait]
impl CoverArtLookup for SpotifyClient {
    fn name(&self) -> &str {
        SOURCE_NAME
    }

    async fn lookup_cover_art(&self, song_title: &str, artist: &str)
        -> EnrichResult<Option<String>> {
        let query = search_query(song_title, artist);

        (|| self.search_cover(&query))
            .retry(ExponentialBuilder::default().with_max_times(3))
            .when(EnrichError::is_transient)
            .await
    }
}

fn search_query(song_title: &str, artist: &str) -> String {
    format!("track:{} artist:{}", song_title, artist)
}

fn check_status(response: reqwest::Response) -> EnrichResult<reqwest::Response> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(EnrichError::RateLimited {
            source_name: SOURCE_NAME.to_string(),
        });
    }
    if status == StatusCode::UNAUTHORIZED {
        // Retried once the cached token has been cleared.
        return Err(EnrichError::Http {
            source_name: SOURCE_NAME.to_string(),
            message: status.to_string(),
        });
    }
    if status.is_client_error() {
        return Err(EnrichError::Rejected {
            source_name: SOURCE_NAME.to_string(),
            status: status.as_u16(),
        });
    }
    response.error_for_status().map_err(|e| EnrichError::Http {
        source_name: SOURCE_NAME.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_format() {
        assert_eq!(search_query("Angel", "ABBA"), "track:Angel artist:ABBA");
    }

    #[test]
    fn test_client_creation() {
        let client = SpotifyClient::new("id", "secret").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("SpotifyClient"));
        assert!(debug.contains("RateLimiter"));
        assert_eq!(client.name(), "Spotify");
    }

    #[test]
    fn test_token_deserialize() {
        let json = r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#;
        let token: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.expires_in, 3600);
    }

    #[test]
    fn test_first_cover_picks_first_image() {
        let json = r#"{
            "tracks": {
                "items": [
                    {"album": {"images": [
                        {"url": "https://i.scdn.co/image/large", "height": 640, "width": 640},
                        {"url": "https://i.scdn.co/image/small", "height": 64, "width": 64}
                    ]}},
                    {"album": {"images": [{"url": "https://i.scdn.co/image/other"}]}}
                ]
            }
        }"#;
        let result: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            result.first_cover().as_deref(),
            Some("https://i.scdn.co/image/large")
        );
    }

    #[test]
    fn test_first_cover_no_items() {
        let result: SearchResponse = serde_json::from_str(r#"{"tracks": {"items": []}}"#).unwrap();
        assert!(result.first_cover().is_none());
    }

    #[test]
    fn test_first_cover_album_without_images() {
        let json = r#"{"tracks": {"items": [{"album": {}}]}}"#;
        let result: SearchResponse = serde_json::from_str(json).unwrap();
        assert!(result.first_cover().is_none());
    }
}
