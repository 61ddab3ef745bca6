//! Tag-list merge strategy.

use std::collections::HashMap;

use crate::head_tag::{DedupKey, HeadTag};

/// Merge fallback, generated and override tag lists.
///
/// A keyed record survives only if it comes from the highest-priority
/// source that defines its [`DedupKey`]. A key that a higher source
/// redefines therefore moves to that source's position in the output.
/// Records without a key always survive.
///
/// Inside the owning source, `name` and title keys keep only their last
/// record, so a custom `description` tag replaces the converted one.
/// Repeated `property` keys are all kept, which preserves multiple
/// `og:image` entries from one document.
///
/// # Examples
///
/// ```rust
/// use pagemeta_core::merge::merge_tags;
/// use pagemeta_core::HeadTag;
///
/// let fallback = vec![HeadTag::meta_name("title", "F"), HeadTag::meta_name("author", "A")];
/// let generated = vec![HeadTag::meta_name("title", "G"), HeadTag::meta_name("description", "D")];
/// let overrides = vec![HeadTag::meta_name("title", "O")];
///
/// let merged = merge_tags(&fallback, &generated, &overrides);
///
/// assert_eq!(
///     merged,
///     vec![
///         HeadTag::meta_name("author", "A"),
///         HeadTag::meta_name("description", "D"),
///         HeadTag::meta_name("title", "O"),
///     ]
/// );
/// ```
pub fn merge_tags(fallback: &[HeadTag], generated: &[HeadTag], overrides: &[HeadTag]) -> Vec<HeadTag> {
    let sources = [fallback, generated, overrides];

    // Last (source, position) defining each key.
    let mut owner: HashMap<DedupKey, (usize, usize)> = HashMap::new();
    for (rank, source) in sources.iter().enumerate() {
        for (position, tag) in source.iter().enumerate() {
            if let Some(key) = tag.dedup_key() {
                owner.insert(key, (rank, position));
            }
        }
    }

    sources
        .iter()
        .enumerate()
        .flat_map(|(rank, source)| {
            source
                .iter()
                .enumerate()
                .map(move |(position, tag)| (rank, position, tag))
        })
        .filter(|&(rank, position, tag)| {
            let Some(key) = tag.dedup_key() else {
                return true;
            };
            match owner.get(&key) {
                Some(&(owner_rank, _)) if key.is_repeatable() => owner_rank == rank,
                Some(&winner) => winner == (rank, position),
                None => false,
            }
        })
        .map(|(_, _, tag)| tag.clone())
        .collect()
}

#[cfg(test)]
#[path = "tags_tests.rs"]
mod tests;
