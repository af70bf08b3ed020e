//! Live adapter for the remote store catalog API.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::catalog::{CatalogEntry, Rarity, StoreSnapshot};
use crate::error::StoreError;
use crate::ports::catalog_source::{CatalogSource, FetchFuture};

/// Live catalog source that polls the configured listing endpoint.
pub struct LiveCatalog {
    client: Client,
    url: String,
    token: Option<String>,
}

impl LiveCatalog {
    /// Create a new live catalog source.
    #[must_use]
    pub fn new(client: Client, url: String, token: Option<String>) -> Self {
        Self { client, url, token }
    }

    async fn fetch_listing(&self) -> Result<StoreSnapshot, StoreError> {
        let mut request = self.client.get(&self.url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Api { status: status.as_u16(), message: response_text });
        }

        let parsed: ListingResponse = serde_json::from_str(&response_text).map_err(|e| {
            StoreError::Api { status: 200, message: format!("Failed to parse listing: {e}") }
        })?;

        let mut entries = Vec::with_capacity(parsed.items.len());
        for item in parsed.items {
            let thumbnail = match &item.thumbnail_url {
                Some(url) => self.download_thumbnail(url).await,
                None => None,
            };
            entries.push(CatalogEntry {
                id: item.id,
                name: item.name,
                category: item.category,
                price_cents: item.price_cents,
                rarity: item.rarity.unwrap_or_default(),
                thumbnail,
            });
        }

        let snapshot =
            StoreSnapshot { fetched_at: parsed.last_updated, entries }.into_grouped();
        Ok(snapshot)
    }

    /// Download one thumbnail; failures degrade to `None` so the entry is
    /// rendered with a placeholder instead of aborting the run.
    async fn download_thumbnail(&self, url: &str) -> Option<Vec<u8>> {
        let result = async {
            let response = self.client.get(url).send().await?;
            let response = response.error_for_status()?;
            response.bytes().await
        }
        .await;

        match result {
            Ok(bytes) => Some(bytes.to_vec()),
            Err(e) => {
                tracing::warn!("failed to download thumbnail {url}: {e}");
                None
            }
        }
    }
}

impl CatalogSource for LiveCatalog {
    fn fetch(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch_listing())
    }
}

// --- Listing API response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingResponse {
    last_updated: DateTime<Utc>,
    items: Vec<ListingItem>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingItem {
    id: String,
    name: String,
    category: String,
    price_cents: u32,
    rarity: Option<Rarity>,
    thumbnail_url: Option<String>,
}
