//! # PageMeta Core
//!
//! Client-side core for fetching page-level SEO metadata from the PageMeta
//! service and turning it into framework-native head representations.
//!
//! This crate provides:
//! - Path normalization shared by cache keys, outbound requests and webhooks
//! - HMAC-SHA256 signing and verification for revalidation webhooks
//! - An in-memory metadata cache owned by each client instance
//! - A resolver with development-mode short-circuit and graceful degradation
//! - Merge strategies for nested metadata objects and ordered head tag lists
//! - Framework adapters composing the client with a conversion and a
//!   revalidation hook
//!
//! ## Architecture
//!
//! The resolver depends only on the [`MetadataTransport`] capability. The
//! direct HTTP implementation ([`HttpTransport`]) and the proxied one
//! ([`ProxyTransport`]) are chosen at construction time.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pagemeta_core::{ClientConfig, FrameworkAdapter, HeadTag, HeadTagsAdapter, MetadataClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MetadataClient::new(ClientConfig::default().with_dsn("site_123"))?;
//! let adapter = HeadTagsAdapter::new(client);
//!
//! let fallback = vec![HeadTag::title("My Site")];
//! let tags = adapter.resolve(Some("/blog/hello/"), &fallback, &Vec::new(), None).await;
//! # Ok(())
//! # }
//! ```

// Public modules
pub mod adapter;
pub mod cache;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod head_tag;
pub mod merge;
pub mod metadata_object;
pub mod path;
pub mod resolver;
pub mod revalidate;
pub mod signature;
pub mod transport;

// Re-export commonly used types at crate root for convenience
pub use adapter::{FrameworkAdapter, HeadTagsAdapter, MetadataObjectAdapter};
pub use cache::{CacheKey, MetadataCache};
pub use config::ClientConfig;
pub use document::{CustomTag, MetadataDocument, MetadataImage, OpenGraph, TwitterCard};
pub use error::{RevalidateError, SignatureError, TransportError};
pub use head_tag::{DedupKey, HeadTag};
pub use metadata_object::MetadataObject;
pub use path::normalize_path;
pub use resolver::MetadataClient;
pub use revalidate::{NoopRevalidateHook, RevalidateHook};
pub use transport::{FetchRequest, HttpTransport, MetadataTransport, ProxyTransport};
