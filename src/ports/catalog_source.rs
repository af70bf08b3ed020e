//! Catalog source port for the remote store listing.

use std::future::Future;
use std::pin::Pin;

use crate::catalog::StoreSnapshot;
use crate::error::StoreError;

/// Boxed future type returned by [`CatalogSource::fetch`].
pub type FetchFuture<'a> =
    Pin<Box<dyn Future<Output = Result<StoreSnapshot, StoreError>> + Send + 'a>>;

/// Produces the current store listing.
///
/// Any failure here is fatal for the run: no partial snapshot is ever
/// composed.
pub trait CatalogSource: Send + Sync {
    /// Fetch the current store snapshot.
    fn fetch(&self) -> FetchFuture<'_>;
}
