//! Structured documentation model: a description plus an ordered tag list.

use serde::{Deserialize, Serialize};

/// Kind of a documentation tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// `@author`.
    Author,
    /// `@param <T>`, keyed by type parameter name.
    TypeParam,
    /// `@param name`, keyed by parameter name.
    Param,
    /// `@return`.
    Return,
    /// `@throws Name`, keyed by exception type name.
    Throws,
    /// Any tag the model does not interpret, preserved verbatim.
    Custom(String),
}

impl TagKind {
    /// Position of this kind in the canonical tag order. Custom tags always
    /// sort after the structural kinds, keeping their relative order.
    pub fn rank(&self) -> u8 {
        match self {
            TagKind::Author => 0,
            TagKind::TypeParam => 1,
            TagKind::Param => 2,
            TagKind::Return => 3,
            TagKind::Throws => 4,
            TagKind::Custom(_) => 5,
        }
    }

    /// Whether tags of this kind are keyed by their name.
    pub fn is_keyed(&self) -> bool {
        matches!(self, TagKind::Param | TagKind::TypeParam | TagKind::Throws)
    }
}

/// One structured annotation within a doc comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTag {
    /// Tag kind.
    pub kind: TagKind,
    /// Identifier for keyed kinds (parameter, exception or type-param name).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    /// Free text after the tag and name.
    pub body: String,
}

impl DocTag {
    /// Creates a `@param` tag.
    pub fn param(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: TagKind::Param,
            name: Some(name.into()),
            body: body.into(),
        }
    }

    /// Creates a `@param <T>` type-parameter tag.
    pub fn type_param(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: TagKind::TypeParam,
            name: Some(name.into()),
            body: body.into(),
        }
    }

    /// Creates a `@return` tag.
    pub fn returns(body: impl Into<String>) -> Self {
        Self {
            kind: TagKind::Return,
            name: None,
            body: body.into(),
        }
    }

    /// Creates a `@throws` tag.
    pub fn throws(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: TagKind::Throws,
            name: Some(name.into()),
            body: body.into(),
        }
    }

    /// Creates an `@author` tag.
    pub fn author(body: impl Into<String>) -> Self {
        Self {
            kind: TagKind::Author,
            name: None,
            body: body.into(),
        }
    }

    /// Creates a custom tag preserved verbatim.
    pub fn custom(tag: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind: TagKind::Custom(tag.into()),
            name: None,
            body: body.into(),
        }
    }

    fn render_line(&self) -> String {
        let mut line = match &self.kind {
            TagKind::Author => "@author".to_string(),
            TagKind::TypeParam => format!("@param <{}>", self.name.as_deref().unwrap_or("")),
            TagKind::Param => format!("@param {}", self.name.as_deref().unwrap_or("")),
            TagKind::Return => "@return".to_string(),
            TagKind::Throws => format!("@throws {}", self.name.as_deref().unwrap_or("")),
            TagKind::Custom(tag) => format!("@{tag}"),
        };
        if !self.body.is_empty() {
            line.push(' ');
            line.push_str(&self.body);
        }
        line
    }
}

/// Structured representation of a documentation comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JavaDoc {
    /// Free-text description preceding the tag block.
    pub description: String,
    /// Tags in canonical order once [`sort_tags`] has run.
    ///
    /// [`sort_tags`]: JavaDoc::sort_tags
    pub tags: Vec<DocTag>,
}

impl JavaDoc {
    /// Returns `true` when the comment carries no content at all.
    pub fn is_empty(&self) -> bool {
        self.description.trim().is_empty() && self.tags.is_empty()
    }

    /// Sorts tags into canonical order: author, type-params, params, return,
    /// throws, then custom tags. The sort is stable, so declaration order is
    /// preserved within each kind.
    pub fn sort_tags(&mut self) {
        self.tags.sort_by_key(|tag| tag.kind.rank());
    }

    /// Renders the comment's literal textual form.
    ///
    /// One line per tag; a blank separator line between description and tags;
    /// the description block is omitted entirely when empty.
    pub fn render(&self) -> String {
        let mut out = String::from("/**\n");
        let has_description = !self.description.trim().is_empty();
        if has_description {
            for line in self.description.lines() {
                if line.trim().is_empty() {
                    out.push_str(" *\n");
                } else {
                    out.push_str(" * ");
                    out.push_str(line.trim());
                    out.push('\n');
                }
            }
        }
        if has_description && !self.tags.is_empty() {
            out.push_str(" *\n");
        }
        for tag in &self.tags {
            out.push_str(" * ");
            out.push_str(&tag.render_line());
            out.push('\n');
        }
        out.push_str(" */");
        out
    }
}
