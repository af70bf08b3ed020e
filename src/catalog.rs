//! Store catalog data model: entries, snapshots, rarity tiers, price text.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rarity tier of a catalog entry, mapped to an accent color in the
/// composed image. Sources that don't report a tier fall into `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    /// Baseline tier.
    Common,
    /// Uncommon tier.
    Uncommon,
    /// Rare tier.
    Rare,
    /// Epic tier.
    Epic,
    /// Legendary tier.
    Legendary,
    /// Anything the source reports that we don't recognize.
    #[serde(other)]
    Unknown,
}

impl Default for Rarity {
    fn default() -> Self {
        Self::Unknown
    }
}

impl Rarity {
    /// Accent color (RGB) used for the cell frame of entries in this tier.
    #[must_use]
    pub fn accent(self) -> [u8; 3] {
        match self {
            Self::Common => [176, 176, 176],
            Self::Uncommon => [96, 170, 58],
            Self::Rare => [73, 172, 242],
            Self::Epic => [177, 91, 226],
            Self::Legendary => [211, 120, 65],
            Self::Unknown => [110, 118, 129],
        }
    }
}

/// One purchasable item in the store listing.
///
/// Produced fresh on every run by the catalog source and never persisted
/// across runs. `thumbnail` is `None` when the source image could not be
/// downloaded; the composer substitutes a placeholder tile for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Source identifier for the item.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Source category key (e.g. `"Featured"`).
    pub category: String,
    /// Price in cents. Zero renders as `"FREE"`.
    pub price_cents: u32,
    /// Rarity tier.
    #[serde(default)]
    pub rarity: Rarity,
    /// Raw thumbnail bytes, base64-encoded in snapshot files.
    #[serde(default, with = "base64_bytes_opt")]
    pub thumbnail: Option<Vec<u8>>,
}

/// The full store listing at a point in time.
///
/// Entries are an ordered sequence grouped by category: categories appear in
/// first-seen source order and entries keep their intra-category source
/// order. That order drives grid placement in the composed image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    /// When the source last updated the listing.
    pub fetched_at: DateTime<Utc>,
    /// Catalog entries in presentation order.
    pub entries: Vec<CatalogEntry>,
}

impl StoreSnapshot {
    /// Reorder entries so that categories form contiguous runs, keeping the
    /// first-seen category order and the source order within each category.
    #[must_use]
    pub fn into_grouped(mut self) -> Self {
        let mut order: Vec<String> = Vec::new();
        for entry in &self.entries {
            if !order.iter().any(|c| c == &entry.category) {
                order.push(entry.category.clone());
            }
        }
        let mut grouped = Vec::with_capacity(self.entries.len());
        for category in &order {
            grouped.extend(self.entries.iter().filter(|e| &e.category == category).cloned());
        }
        self.entries = grouped;
        self
    }

    /// Entries grouped into `(category, members)` runs in presentation order.
    #[must_use]
    pub fn categories(&self) -> Vec<(&str, Vec<&CatalogEntry>)> {
        let mut runs: Vec<(&str, Vec<&CatalogEntry>)> = Vec::new();
        for entry in &self.entries {
            match runs.iter_mut().find(|(c, _)| *c == entry.category) {
                Some((_, members)) => members.push(entry),
                None => runs.push((&entry.category, vec![entry])),
            }
        }
        runs
    }

    /// Human-readable date of the listing, e.g. `"Thursday, August 6, 2026"`.
    #[must_use]
    pub fn human_date(&self) -> String {
        self.fetched_at.format("%A, %B %-d, %Y").to_string()
    }
}

/// Render a price in cents as display text.
///
/// Zero-cost items render as `"FREE"`; otherwise whole currency units with
/// thousands separators, with a cents suffix only when the remainder is
/// nonzero (`249900` → `"$2,499"`, `2450` → `"$24.50"`).
#[must_use]
pub fn format_price(cents: u32) -> String {
    if cents == 0 {
        return "FREE".to_string();
    }
    let units = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("${units}"),
        rem => format!("${units}.{rem:02}"),
    }
}

/// Insert comma separators into a whole number.
fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Serde helper for serializing `Option<Vec<u8>>` as base64 strings in
/// snapshot files.
mod base64_bytes_opt {
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize optional bytes as an optional base64 string.
    pub fn serialize<S: Serializer>(data: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => {
                let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
                serializer.serialize_some(&encoded)
            }
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize an optional base64 string to bytes.
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let s: Option<String> = Option::deserialize(deserializer)?;
        match s {
            Some(s) => base64::engine::general_purpose::STANDARD
                .decode(&s)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, category: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.into(),
            name: format!("Item {id}"),
            category: category.into(),
            price_cents: 1200,
            rarity: Rarity::Rare,
            thumbnail: None,
        }
    }

    fn snapshot(entries: Vec<CatalogEntry>) -> StoreSnapshot {
        StoreSnapshot { fetched_at: "2026-08-06T08:00:00Z".parse().unwrap(), entries }
    }

    #[test]
    fn grouping_preserves_first_seen_category_order() {
        let snap = snapshot(vec![
            entry("a", "Featured"),
            entry("b", "Gear"),
            entry("c", "Featured"),
            entry("d", "Emotes"),
            entry("e", "Gear"),
        ])
        .into_grouped();

        let ids: Vec<&str> = snap.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b", "e", "d"]);
    }

    #[test]
    fn grouping_is_stable_within_category() {
        let snap =
            snapshot(vec![entry("1", "X"), entry("2", "X"), entry("3", "X")]).into_grouped();
        let ids: Vec<&str> = snap.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn categories_returns_runs_in_order() {
        let snap = snapshot(vec![
            entry("a", "Featured"),
            entry("b", "Featured"),
            entry("c", "Gear"),
        ])
        .into_grouped();

        let runs = snap.categories();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].0, "Featured");
        assert_eq!(runs[0].1.len(), 2);
        assert_eq!(runs[1].0, "Gear");
    }

    #[test]
    fn price_zero_is_free() {
        assert_eq!(format_price(0), "FREE");
    }

    #[test]
    fn price_whole_units() {
        assert_eq!(format_price(2400), "$24");
        assert_eq!(format_price(249_900), "$2,499");
        assert_eq!(format_price(100_000_000), "$1,000,000");
    }

    #[test]
    fn price_with_cents_remainder() {
        assert_eq!(format_price(2450), "$24.50");
        assert_eq!(format_price(99), "$0.99");
        assert_eq!(format_price(100_005), "$1,000.05");
    }

    #[test]
    fn rarity_parses_lowercase_and_unknowns() {
        let r: Rarity = serde_json::from_str("\"legendary\"").unwrap();
        assert_eq!(r, Rarity::Legendary);
        let r: Rarity = serde_json::from_str("\"mythic\"").unwrap();
        assert_eq!(r, Rarity::Unknown);
    }

    #[test]
    fn snapshot_round_trips_with_base64_thumbnail() {
        let mut e = entry("a", "Featured");
        e.thumbnail = Some(vec![0x89, 0x50, 0x4E, 0x47]);
        let snap = snapshot(vec![e]);

        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("iVBORw"), "thumbnail should be base64 in the file: {json}");

        let back: StoreSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entries[0].thumbnail.as_deref(), Some(&[0x89, 0x50, 0x4E, 0x47][..]));
        assert_eq!(back.fetched_at, snap.fetched_at);
    }

    #[test]
    fn snapshot_entry_without_thumbnail_round_trips() {
        let snap = snapshot(vec![entry("a", "Featured")]);
        let json = serde_json::to_string(&snap).unwrap();
        let back: StoreSnapshot = serde_json::from_str(&json).unwrap();
        assert!(back.entries[0].thumbnail.is_none());
    }
}
