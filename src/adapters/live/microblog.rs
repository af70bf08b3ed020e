//! Live adapter for a Mastodon-style microblog API.
//!
//! Publishing is two calls: upload the media, then post a status that
//! references it.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::error::StoreError;
use crate::output::shrink_to_limit;
use crate::ports::publisher::{Post, PublishFuture, Publisher};

/// Live microblog publisher.
pub struct MicroblogPublisher {
    client: Client,
    base_url: String,
    access_token: String,
    media_limit_bytes: usize,
}

impl MicroblogPublisher {
    /// Create a new microblog publisher.
    #[must_use]
    pub fn new(
        client: Client,
        base_url: String,
        access_token: String,
        media_limit_bytes: usize,
    ) -> Self {
        Self { client, base_url, access_token, media_limit_bytes }
    }

    async fn upload_media(&self, png: Vec<u8>) -> Result<String, StoreError> {
        let part = Part::bytes(png).file_name("store.png").mime_str("image/png")?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/api/v2/media", self.base_url))
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        // 202 means the instance is still processing the attachment; the id
        // is already usable for a status post.
        if !status.is_success() {
            return Err(StoreError::Api { status: status.as_u16(), message: response_text });
        }

        let parsed: MediaResponse = serde_json::from_str(&response_text).map_err(|e| {
            StoreError::Api { status: 200, message: format!("Failed to parse media upload: {e}") }
        })?;
        Ok(parsed.id)
    }

    async fn post_status(&self, caption: String, media_id: String) -> Result<(), StoreError> {
        let body = serde_json::json!({
            "status": caption,
            "media_ids": [media_id],
        });

        let response = self
            .client
            .post(format!("{}/api/v1/statuses", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            return Err(StoreError::Api { status: status.as_u16(), message });
        }
        Ok(())
    }
}

impl Publisher for MicroblogPublisher {
    fn name(&self) -> &'static str {
        "microblog"
    }

    fn publish(&self, post: &Post) -> PublishFuture<'_> {
        let caption = post.caption.clone();
        let png = post.image_png.clone();
        Box::pin(async move {
            let png = shrink_to_limit(&png, self.media_limit_bytes)?;
            let media_id = self.upload_media(png).await?;
            self.post_status(caption, media_id).await
        })
    }
}

// --- Microblog API response types ---

#[derive(Deserialize)]
struct MediaResponse {
    id: String,
}
