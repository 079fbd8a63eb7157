//! Reconcile a freshly synthesized comment with the one already on the
//! element, preserving user-written text while tracking the current
//! signature.
//!
//! The merge is idempotent: `merge(merge(e, s), s) == merge(e, s)` for any
//! existing comment and any synthesized skeleton of the same signature.

use indexmap::IndexMap;

use crate::model::{DocTag, JavaDoc, TagKind};

/// Merges an existing comment into the synthesized skeleton.
///
/// - With no existing comment the skeleton is returned unchanged.
/// - The existing description wins when non-empty.
/// - Name-keyed tags (params, type-params, throws) are unioned by name:
///   names in both keep the existing body, names only in the skeleton get
///   the placeholder, and names no longer in the signature are dropped.
/// - Unkeyed tags (return, author) keep the existing body when the skeleton
///   carries the tag at all.
/// - Custom tags from the existing comment are preserved after the
///   structural block, in their original relative order.
///
/// The result's tag order is always canonical, never the existing comment's.
pub fn merge(existing: Option<&JavaDoc>, synthesized: JavaDoc) -> JavaDoc {
    let Some(existing) = existing else {
        return synthesized;
    };

    let description = if existing.description.trim().is_empty() {
        synthesized.description
    } else {
        existing.description.clone()
    };

    let mut keyed_bodies: IndexMap<(u8, String), String> = IndexMap::new();
    let mut return_body: Option<&str> = None;
    let mut author_body: Option<&str> = None;
    let mut custom_tags: Vec<DocTag> = Vec::new();
    for tag in &existing.tags {
        match &tag.kind {
            kind if kind.is_keyed() => {
                if let Some(key) = tag_key(tag) {
                    keyed_bodies.insert(key, tag.body.clone());
                }
            }
            TagKind::Return => return_body = Some(&tag.body),
            TagKind::Author => author_body = Some(&tag.body),
            TagKind::Custom(_) => custom_tags.push(tag.clone()),
            _ => {}
        }
    }

    let mut tags: Vec<DocTag> = Vec::new();
    for mut tag in synthesized.tags {
        match &tag.kind {
            kind if kind.is_keyed() => {
                if let Some(body) = tag_key(&tag).and_then(|key| keyed_bodies.get(&key)) {
                    tag.body = body.clone();
                }
            }
            TagKind::Return => {
                if let Some(body) = return_body {
                    tag.body = body.to_string();
                }
            }
            TagKind::Author => {
                if let Some(body) = author_body {
                    tag.body = body.to_string();
                }
            }
            _ => {}
        }
        tags.push(tag);
    }
    tags.extend(custom_tags);

    JavaDoc { description, tags }
}

/// Union key for a name-keyed tag. Exception names compare by their
/// unqualified trailing segment, so `java.io.IOException` in an old comment
/// still matches `IOException` in the signature.
fn tag_key(tag: &DocTag) -> Option<(u8, String)> {
    let name = tag.name.as_deref()?;
    let name = match tag.kind {
        TagKind::Throws => name.rsplit('.').next().unwrap_or(name),
        _ => name,
    };
    Some((tag.kind.rank(), name.to_string()))
}
