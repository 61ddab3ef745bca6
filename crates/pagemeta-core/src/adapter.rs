//! Framework adapters.
//!
//! An adapter composes a [`MetadataClient`] with a conversion into the
//! framework's output shape, a merge strategy for that shape and a
//! [`RevalidateHook`]. The client owns resolution, caching and credentials;
//! adapters carry no state of their own beyond the hook.

use std::sync::Arc;

use async_trait::async_trait;

use crate::convert::{to_head_tags, to_metadata_object};
use crate::document::MetadataDocument;
use crate::head_tag::HeadTag;
use crate::merge::{merge_objects, merge_tags};
use crate::metadata_object::MetadataObject;
use crate::resolver::MetadataClient;
use crate::revalidate::{NoopRevalidateHook, RevalidateHook};

/// Per-framework conversion, merge and revalidation on top of a shared
/// client.
#[async_trait]
pub trait FrameworkAdapter: Send + Sync {
    /// Framework-native metadata representation.
    type Output: Clone + Default + Send + Sync;

    fn client(&self) -> &MetadataClient;

    fn revalidate_hook(&self) -> Arc<dyn RevalidateHook>;

    fn convert(&self, document: &MetadataDocument) -> Self::Output;

    fn merge(
        &self,
        fallback: &Self::Output,
        generated: &Self::Output,
        overrides: &Self::Output,
    ) -> Self::Output;

    /// Resolve `path` and merge the result between `fallback` and
    /// `overrides`.
    ///
    /// When the service has nothing to offer, the generated layer is empty
    /// and the result is fallback merged with overrides.
    async fn resolve(
        &self,
        path: Option<&str>,
        fallback: &Self::Output,
        overrides: &Self::Output,
        auth_token: Option<&str>,
    ) -> Self::Output {
        let generated = self
            .client()
            .resolve(path, auth_token)
            .await
            .map(|document| self.convert(&document))
            .unwrap_or_default();
        self.merge(fallback, &generated, overrides)
    }
}

/// Adapter producing an ordered list of head tag records.
#[derive(Clone)]
pub struct HeadTagsAdapter {
    client: MetadataClient,
    hook: Arc<dyn RevalidateHook>,
}

impl HeadTagsAdapter {
    pub fn new(client: MetadataClient) -> Self {
        Self {
            client,
            hook: Arc::new(NoopRevalidateHook),
        }
    }

    pub fn with_revalidate_hook(mut self, hook: Arc<dyn RevalidateHook>) -> Self {
        self.hook = hook;
        self
    }
}

#[async_trait]
impl FrameworkAdapter for HeadTagsAdapter {
    type Output = Vec<HeadTag>;

    fn client(&self) -> &MetadataClient {
        &self.client
    }

    fn revalidate_hook(&self) -> Arc<dyn RevalidateHook> {
        Arc::clone(&self.hook)
    }

    fn convert(&self, document: &MetadataDocument) -> Vec<HeadTag> {
        to_head_tags(document)
    }

    fn merge(
        &self,
        fallback: &Vec<HeadTag>,
        generated: &Vec<HeadTag>,
        overrides: &Vec<HeadTag>,
    ) -> Vec<HeadTag> {
        merge_tags(fallback, generated, overrides)
    }
}

impl std::fmt::Debug for HeadTagsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadTagsAdapter")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

/// Adapter producing a nested metadata object.
#[derive(Clone)]
pub struct MetadataObjectAdapter {
    client: MetadataClient,
    hook: Arc<dyn RevalidateHook>,
}

impl MetadataObjectAdapter {
    pub fn new(client: MetadataClient) -> Self {
        Self {
            client,
            hook: Arc::new(NoopRevalidateHook),
        }
    }

    pub fn with_revalidate_hook(mut self, hook: Arc<dyn RevalidateHook>) -> Self {
        self.hook = hook;
        self
    }
}

#[async_trait]
impl FrameworkAdapter for MetadataObjectAdapter {
    type Output = MetadataObject;

    fn client(&self) -> &MetadataClient {
        &self.client
    }

    fn revalidate_hook(&self) -> Arc<dyn RevalidateHook> {
        Arc::clone(&self.hook)
    }

    fn convert(&self, document: &MetadataDocument) -> MetadataObject {
        to_metadata_object(document)
    }

    fn merge(
        &self,
        fallback: &MetadataObject,
        generated: &MetadataObject,
        overrides: &MetadataObject,
    ) -> MetadataObject {
        merge_objects(fallback, generated, overrides)
    }
}

impl std::fmt::Debug for MetadataObjectAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataObjectAdapter")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
