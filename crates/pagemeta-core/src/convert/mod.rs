//! Conversion from [`MetadataDocument`](crate::MetadataDocument) into the
//! framework output shapes.
//!
//! Both converters destructure the document without a rest pattern, so a new
//! document field fails to compile until each converter handles it.

mod head_tags;
mod metadata_object;

pub use head_tags::{to_head_tags, ROBOTS_NOINDEX};
pub use metadata_object::to_metadata_object;
