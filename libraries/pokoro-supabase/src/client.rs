//! Supabase REST client.

use crate::error::{Result, SupabaseError};
use crate::types::{FavoriteRow, NewFavorite, SupabaseConfig};
use pokoro_core::{RawTrack, TrackId, UserId};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

const TRACKS_TABLE: &str = "tracks";
const FAVORITES_TABLE: &str = "favorites";

/// Client for the `tracks` and `favorites` tables of a Supabase project.
///
/// Every request carries the anon key both as `apikey` and as a bearer
/// token, which is what PostgREST behind Supabase expects for public data.
///
/// # Example
///
/// ```ignore
/// use pokoro_supabase::{SupabaseClient, SupabaseConfig};
///
/// let client = SupabaseClient::new(SupabaseConfig::new("https://abcd.supabase.co", "anon-key"))?;
/// let tracks = client.fetch_tracks().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SupabaseConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(SupabaseError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(SupabaseError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| SupabaseError::InvalidUrl(e.to_string()))?;

        if config.anon_key.trim().is_empty() {
            return Err(SupabaseError::Unauthorized("anon key cannot be empty".into()));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Pokoro/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            anon_key: config.anon_key,
        })
    }

    /// Project URL without trailing slash.
    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every row of the `tracks` table.
    pub async fn fetch_tracks(&self) -> Result<Vec<RawTrack>> {
        let response = self
            .request(Method::GET, TRACKS_TABLE)
            .query(&[("select", "*")])
            .send()
            .await
            .map_err(SupabaseError::from_send)?;

        let response = check_status(response).await?;
        let rows: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            SupabaseError::ParseError(format!("Failed to parse tracks response: {}", e))
        })?;

        // Decoded per row; undecodable rows are skipped
        let total = rows.len();
        let tracks: Vec<RawTrack> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(index, row)| match serde_json::from_value(row) {
                Ok(track) => Some(track),
                Err(e) => {
                    warn!(index, error = %e, "Skipping malformed track row");
                    None
                }
            })
            .collect();

        info!(count = tracks.len(), skipped = total - tracks.len(), "Fetched tracks");
        Ok(tracks)
    }

    /// Fetch the favorited track ids of a user.
    pub async fn fetch_favorites(&self, user: &UserId) -> Result<Vec<TrackId>> {
        let response = self
            .request(Method::GET, FAVORITES_TABLE)
            .query(&[
                ("select", "track_id".to_string()),
                ("user_id", format!("eq.{}", user)),
            ])
            .send()
            .await
            .map_err(SupabaseError::from_send)?;

        let response = check_status(response).await?;
        let rows: Vec<FavoriteRow> = response.json().await.map_err(|e| {
            SupabaseError::ParseError(format!("Failed to parse favorites response: {}", e))
        })?;

        debug!(user = %user, count = rows.len(), "Fetched favorites");
        Ok(rows.into_iter().map(FavoriteRow::into_track_id).collect())
    }

    /// Insert a (user, track) favorite row.
    ///
    /// A 409 for an existing row counts as success.
    pub async fn insert_favorite(&self, user: &UserId, track: &TrackId) -> Result<()> {
        debug!(user = %user, track_id = %track, "Inserting favorite");

        let response = self
            .request(Method::POST, FAVORITES_TABLE)
            .header("Prefer", "return=minimal")
            .json(&NewFavorite {
                user_id: user,
                track_id: track,
            })
            .send()
            .await
            .map_err(SupabaseError::from_send)?;

        if response.status() == StatusCode::CONFLICT {
            debug!(user = %user, track_id = %track, "Favorite already present");
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }

    /// Delete a (user, track) favorite row.
    pub async fn delete_favorite(&self, user: &UserId, track: &TrackId) -> Result<()> {
        debug!(user = %user, track_id = %track, "Deleting favorite");

        let response = self
            .request(Method::DELETE, FAVORITES_TABLE)
            .query(&[
                ("user_id", format!("eq.{}", user)),
                ("track_id", format!("eq.{}", track)),
            ])
            .send()
            .await
            .map_err(SupabaseError::from_send)?;

        check_status(response).await?;
        Ok(())
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{}", self.base_url, table);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        Err(SupabaseError::Unauthorized(message))
    } else {
        Err(SupabaseError::ServerError {
            status: status.as_u16(),
            message,
        })
    }
}
