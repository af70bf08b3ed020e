//! Publisher port for social platforms that accept the finished image.

use std::future::Future;
use std::pin::Pin;

use crate::error::StoreError;

/// A finished post: the encoded image plus the text each platform needs.
///
/// Built once by the orchestrator and shared read-only by every publisher.
#[derive(Debug, Clone)]
pub struct Post {
    /// PNG-encoded composed image.
    pub image_png: Vec<u8>,
    /// Short caption for the microblog and webhook description.
    pub caption: String,
    /// Forum topic title.
    pub title: String,
    /// Forum markdown body (image link is added by the forum adapter).
    pub body: String,
}

/// Boxed future type returned by [`Publisher::publish`].
pub type PublishFuture<'a> = Pin<Box<dyn Future<Output = Result<(), StoreError>> + Send + 'a>>;

/// Posts the finished image to one social platform.
///
/// Publishers are attempted independently: one failing must never prevent
/// the others from being tried.
pub trait Publisher: Send + Sync {
    /// Short platform name used in logs and outcome reports.
    fn name(&self) -> &'static str;

    /// Deliver the post.
    fn publish(&self, post: &Post) -> PublishFuture<'_>;
}
