//! Storefront - store listing image generator and social publisher.

mod adapters;
mod assets;
mod caption;
mod catalog;
mod cli;
mod compose;
mod config;
mod context;
mod error;
mod output;
mod ports;

use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::assets::Assets;
use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::error::StoreError;
use crate::ports::{Post, Publisher};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "storefront=debug" } else { "storefront=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(cli: Cli) -> Result<(), StoreError> {
    // Load and validate config before touching the network.
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    config.validate()?;
    tracing::info!("Loaded configuration from {}", config_path.display());

    let assets = Assets::load(&config.layout)?;

    let ctx = match &cli.snapshot {
        Some(path) => {
            tracing::info!("Replaying snapshot from {}", path.display());
            ServiceContext::replaying(&config, path.clone())?
        }
        None => ServiceContext::live(&config)?,
    };

    let snapshot = ctx.source.fetch().await?;
    tracing::info!(
        "Fetched the store listing for {} ({} entries)",
        snapshot.human_date(),
        snapshot.entries.len()
    );

    if let Some(path) = &cli.record_snapshot {
        adapters::snapshot_file::record_snapshot(&snapshot, path)?;
        tracing::info!("Recorded snapshot to {}", path.display());
    }

    let image = compose::compose(&snapshot, &config.layout, &config.store, &assets);
    tracing::info!("Composed the store image ({}x{})", image.width(), image.height());

    let png = image.encode_png()?;
    let out_path = cli.output.as_ref().unwrap_or(&config.output.path);
    output::save_image(&png, out_path)?;
    tracing::info!("Saved the store image to {}", out_path.display());

    if cli.no_publish {
        tracing::info!("Skipping publishers (--no-publish)");
        return Ok(());
    }

    let character_limit = config
        .publishers
        .microblog
        .as_ref()
        .map_or(500, |m| m.character_limit);
    let post = Post {
        image_png: png,
        caption: caption::microblog_caption(&config.store, &snapshot, character_limit),
        title: caption::forum_title(&config.store, &snapshot),
        body: caption::forum_body(&config.store, &snapshot),
    };

    let outcomes = publish_all(&ctx.publishers, &post).await;
    let failures = outcomes.iter().filter(|(_, r)| r.is_err()).count();
    for (name, result) in &outcomes {
        match result {
            Ok(()) => tracing::info!("Shared the store to {name}"),
            Err(e) => tracing::error!("Failed to share the store to {name}: {e}"),
        }
    }
    tracing::info!("Run complete: {} published, {failures} failed", outcomes.len() - failures);

    Ok(())
}

/// Attempt every publisher in order, collecting per-publisher outcomes.
///
/// A failure in one publisher never prevents the remaining ones from being
/// attempted.
async fn publish_all(
    publishers: &[Box<dyn Publisher>],
    post: &Post,
) -> Vec<(&'static str, Result<(), StoreError>)> {
    let mut outcomes = Vec::with_capacity(publishers.len());
    for publisher in publishers {
        let result = publisher.publish(post).await;
        outcomes.push((publisher.name(), result));
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::publisher::PublishFuture;

    struct StubPublisher {
        name: &'static str,
        fail: bool,
    }

    impl Publisher for StubPublisher {
        fn name(&self) -> &'static str {
            self.name
        }

        fn publish(&self, _post: &Post) -> PublishFuture<'_> {
            let fail = self.fail;
            let name = self.name;
            Box::pin(async move {
                if fail {
                    Err(StoreError::Publish { publisher: name.into(), message: "boom".into() })
                } else {
                    Ok(())
                }
            })
        }
    }

    fn post() -> Post {
        Post {
            image_png: vec![1, 2, 3],
            caption: "caption".into(),
            title: "title".into(),
            body: "body".into(),
        }
    }

    #[tokio::test]
    async fn one_failing_publisher_does_not_block_the_rest() {
        let publishers: Vec<Box<dyn Publisher>> = vec![
            Box::new(StubPublisher { name: "first", fail: false }),
            Box::new(StubPublisher { name: "second", fail: true }),
            Box::new(StubPublisher { name: "third", fail: false }),
        ];

        let outcomes = publish_all(&publishers, &post()).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].1.is_ok());
        assert!(outcomes[1].1.is_err());
        assert!(outcomes[2].1.is_ok());

        let failures = outcomes.iter().filter(|(_, r)| r.is_err()).count();
        assert_eq!(failures, 1);
    }

    #[tokio::test]
    async fn no_publishers_yields_no_outcomes() {
        let outcomes = publish_all(&[], &post()).await;
        assert!(outcomes.is_empty());
    }
}
