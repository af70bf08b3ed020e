//! Caption and post-body builders shared by the publishers.

use crate::catalog::{format_price, StoreSnapshot};
use crate::config::StoreConfig;

/// Build the microblog caption, truncated to the platform character limit.
#[must_use]
pub fn microblog_caption(store: &StoreConfig, snapshot: &StoreSnapshot, limit: usize) -> String {
    truncate_chars(&summary_text(store, snapshot), limit)
}

/// Build the forum topic title.
#[must_use]
pub fn forum_title(store: &StoreConfig, snapshot: &StoreSnapshot) -> String {
    format!("{} Item Shop for {}", store.name, snapshot.human_date())
}

/// Build the forum markdown body: the support line plus every entry grouped
/// by category with its price. The image link is prepended by the forum
/// adapter once the upload URL is known.
#[must_use]
pub fn forum_body(store: &StoreConfig, snapshot: &StoreSnapshot) -> String {
    let mut body = String::new();

    if let Some(code) = &store.support_code {
        body.push_str(&format!(
            "Consider supporting us! Use the code `{code}` in the store to do so.\n\n"
        ));
    }

    for (category, members) in snapshot.categories() {
        body.push_str(&format!("## {category}\n"));
        for entry in members {
            body.push_str(&format!("* **{}** — {}\n", entry.name, format_price(entry.price_cents)));
        }
        body.push('\n');
    }

    if let Some(url) = &store.details_url {
        body.push_str(&format!("Full details: {url}\n"));
    }

    body
}

fn summary_text(store: &StoreConfig, snapshot: &StoreSnapshot) -> String {
    let mut text = format!("{} Item Shop for {}", store.name, snapshot.human_date());

    if let Some(code) = &store.support_code {
        text.push_str(&format!("\n\nConsider supporting us! Use the code {code} in the store."));
    }

    if let Some(url) = &store.details_url {
        text.push_str(&format!("\n\nFull details: {url}"));
    }

    text
}

/// Truncate to at most `limit` characters, replacing the tail with an
/// ellipsis when anything is cut. Safe at multi-byte boundaries.
#[must_use]
pub fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let kept: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}
