//! Live adapter for Discord-style chat webhooks.
//!
//! The image is attached as a multipart file part and referenced from the
//! embed via `attachment://`, so no separate image host is involved. Every
//! configured webhook URL is attempted before the publisher reports.

use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::error::StoreError;
use crate::ports::publisher::{Post, PublishFuture, Publisher};

const EMBED_COLOR: u32 = 0x1DA1F2;

/// Live chat-webhook publisher.
pub struct ChatWebhookPublisher {
    client: Client,
    webhook_urls: Vec<String>,
    username: Option<String>,
    avatar_url: Option<String>,
}

impl ChatWebhookPublisher {
    /// Create a new chat-webhook publisher.
    #[must_use]
    pub fn new(
        client: Client,
        webhook_urls: Vec<String>,
        username: Option<String>,
        avatar_url: Option<String>,
    ) -> Self {
        Self { client, webhook_urls, username, avatar_url }
    }

    fn payload_json(&self, description: &str) -> String {
        let embed = serde_json::json!({
            "description": description,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "color": EMBED_COLOR,
            "image": {"url": "attachment://store.png"},
        });
        serde_json::json!({
            "username": self.username,
            "avatar_url": self.avatar_url,
            "embeds": [embed],
        })
        .to_string()
    }

    async fn post_one(&self, url: &str, payload: String, png: Vec<u8>) -> Result<(), StoreError> {
        let part = Part::bytes(png).file_name("store.png").mime_str("image/png")?;
        let form = Form::new().text("payload_json", payload).part("files[0]", part);

        let response = self.client.post(url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            return Err(StoreError::Api { status: status.as_u16(), message });
        }
        Ok(())
    }
}

impl Publisher for ChatWebhookPublisher {
    fn name(&self) -> &'static str {
        "chat-webhook"
    }

    fn publish(&self, post: &Post) -> PublishFuture<'_> {
        let payload = self.payload_json(&post.caption);
        let png = post.image_png.clone();
        Box::pin(async move {
            let mut failures = Vec::new();
            for url in &self.webhook_urls {
                if let Err(e) = self.post_one(url, payload.clone(), png.clone()).await {
                    tracing::warn!("webhook delivery failed for {url}: {e}");
                    failures.push(e);
                } else {
                    tracing::debug!("delivered to webhook {url}");
                }
            }
            let failed = failures.len();
            match failures.into_iter().next() {
                None => Ok(()),
                Some(first) => Err(StoreError::Publish {
                    publisher: "chat-webhook".into(),
                    message: format!(
                        "{failed} of {} webhooks failed, first error: {first}",
                        self.webhook_urls.len()
                    ),
                }),
            }
        })
    }
}
