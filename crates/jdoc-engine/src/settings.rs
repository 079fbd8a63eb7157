//! Project-scoped generation settings, injected by the host.

use serde::{Deserialize, Serialize};

/// How generation treats an element that already has a doc comment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Merge the synthesized skeleton with the existing comment, preserving
    /// user-written text while tracking the current signature.
    #[default]
    Update,
    /// Discard the existing comment and write the synthesized one.
    Replace,
    /// Leave elements that already have a comment untouched.
    Keep,
}

/// Settings consumed by synthesis and dispatch.
///
/// Passed in explicitly at construction; the engine never looks settings up
/// from ambient state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JavaDocSettings {
    /// Author name for class-level `@author` tags. No tag when unset.
    #[serde(default)]
    pub author: Option<String>,

    /// Existing-comment handling.
    #[serde(default)]
    pub mode: GenerationMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_mode_is_update() {
        let settings = JavaDocSettings::default();
        assert_eq!(settings.mode, GenerationMode::Update);
        assert!(settings.author.is_none());
    }

    #[test]
    fn deserializes_from_project_config() {
        let value = json!({ "author": "jdoc", "mode": "keep" });
        let settings: JavaDocSettings = serde_json::from_value(value).unwrap();
        assert_eq!(settings.author.as_deref(), Some("jdoc"));
        assert_eq!(settings.mode, GenerationMode::Keep);
    }
}
