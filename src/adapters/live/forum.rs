//! Live adapter for a Discourse-style forum API.
//!
//! Publishing is two calls: upload the image, then create a topic whose
//! markdown body embeds the uploaded URL above the per-category listing.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;

use crate::error::StoreError;
use crate::ports::publisher::{Post, PublishFuture, Publisher};

/// Live forum publisher.
pub struct ForumPublisher {
    client: Client,
    base_url: String,
    api_key: String,
    api_username: String,
    category_id: Option<u32>,
}

impl ForumPublisher {
    /// Create a new forum publisher.
    #[must_use]
    pub fn new(
        client: Client,
        base_url: String,
        api_key: String,
        api_username: String,
        category_id: Option<u32>,
    ) -> Self {
        Self { client, base_url, api_key, api_username, category_id }
    }

    async fn upload_image(&self, png: Vec<u8>) -> Result<String, StoreError> {
        let part = Part::bytes(png).file_name("store.png").mime_str("image/png")?;
        let form = Form::new().text("type", "composer").text("synchronous", "true").part("files[]", part);

        let response = self
            .client
            .post(format!("{}/uploads.json", self.base_url))
            .header("Api-Key", &self.api_key)
            .header("Api-Username", &self.api_username)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Api { status: status.as_u16(), message: response_text });
        }

        let parsed: UploadResponse = serde_json::from_str(&response_text).map_err(|e| {
            StoreError::Api { status: 200, message: format!("Failed to parse upload: {e}") }
        })?;
        Ok(parsed.url)
    }

    async fn create_topic(&self, title: String, raw: String) -> Result<(), StoreError> {
        let mut body = serde_json::json!({
            "title": title,
            "raw": raw,
        });
        if let Some(category) = self.category_id {
            body["category"] = serde_json::json!(category);
        }

        let response = self
            .client
            .post(format!("{}/posts.json", self.base_url))
            .header("Api-Key", &self.api_key)
            .header("Api-Username", &self.api_username)
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

impl Publisher for ForumPublisher {
    fn name(&self) -> &'static str {
        "forum"
    }

    fn publish(&self, post: &Post) -> PublishFuture<'_> {
        let title = post.title.clone();
        let body = post.body.clone();
        let png = post.image_png.clone();
        Box::pin(async move {
            let image_url = self.upload_image(png).await?;
            let raw = format!("![store]({image_url})\n\n{body}");
            self.create_topic(title, raw).await
        })
    }
}

// --- Forum API response types ---

#[derive(Deserialize)]
struct UploadResponse {
    url: String,
}
