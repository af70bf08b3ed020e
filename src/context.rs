//! Service context that bundles the catalog source and enabled publishers.

use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;

use crate::adapters::live::catalog::LiveCatalog;
use crate::adapters::live::chat_webhook::ChatWebhookPublisher;
use crate::adapters::live::forum::ForumPublisher;
use crate::adapters::live::microblog::MicroblogPublisher;
use crate::adapters::snapshot_file::SnapshotFile;
use crate::config::Config;
use crate::error::StoreError;
use crate::ports::{CatalogSource, Publisher};

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Bundles the port trait objects for one run.
pub struct ServiceContext {
    /// Catalog source port.
    pub source: Box<dyn CatalogSource>,
    /// Enabled publishers, in configuration order.
    pub publishers: Vec<Box<dyn Publisher>>,
}

impl ServiceContext {
    /// Create a live context: HTTP catalog source plus every enabled
    /// publisher, sharing one pooled HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingCredential`] if an enabled publisher has
    /// no credential configured, surfacing the problem before any fetch.
    pub fn live(config: &Config) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;

        let source: Box<dyn CatalogSource> = Box::new(LiveCatalog::new(
            client.clone(),
            config.catalog.url.clone(),
            config.catalog.token(),
        ));
        let publishers = build_publishers(config, &client)?;

        Ok(Self { source, publishers })
    }

    /// Create a replaying context backed by a recorded snapshot file.
    /// Publisher wiring is identical to a live run.
    ///
    /// # Errors
    ///
    /// Returns an error if an enabled publisher has no credential configured.
    pub fn replaying(config: &Config, snapshot_path: PathBuf) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;

        let source: Box<dyn CatalogSource> = Box::new(SnapshotFile::new(snapshot_path));
        let publishers = build_publishers(config, &client)?;

        Ok(Self { source, publishers })
    }
}

fn build_publishers(
    config: &Config,
    client: &Client,
) -> Result<Vec<Box<dyn Publisher>>, StoreError> {
    let mut publishers: Vec<Box<dyn Publisher>> = Vec::new();

    if let Some(microblog) = &config.publishers.microblog {
        if microblog.enabled {
            let token = microblog.access_token().ok_or(StoreError::MissingCredential {
                publisher: "microblog".into(),
                key: "access_token".into(),
            })?;
            publishers.push(Box::new(MicroblogPublisher::new(
                client.clone(),
                microblog.base_url.trim_end_matches('/').to_string(),
                token,
                microblog.media_limit_bytes,
            )));
        }
    }

    if let Some(webhook) = &config.publishers.chat_webhook {
        if webhook.enabled {
            if webhook.webhook_urls.is_empty() {
                return Err(StoreError::MissingCredential {
                    publisher: "chat-webhook".into(),
                    key: "webhook_urls".into(),
                });
            }
            publishers.push(Box::new(ChatWebhookPublisher::new(
                client.clone(),
                webhook.webhook_urls.clone(),
                webhook.username.clone(),
                webhook.avatar_url.clone(),
            )));
        }
    }

    if let Some(forum) = &config.publishers.forum {
        if forum.enabled {
            let api_key = forum.api_key().ok_or(StoreError::MissingCredential {
                publisher: "forum".into(),
                key: "api_key".into(),
            })?;
            publishers.push(Box::new(ForumPublisher::new(
                client.clone(),
                forum.base_url.trim_end_matches('/').to_string(),
                api_key,
                forum.api_username.clone(),
                forum.category_id,
            )));
        }
    }

    Ok(publishers)
}
