//! Localized labels consumed by the field toolkit.
//!
//! The editor shell owns translation; this catalog carries the handful of
//! strings the context-menu augmenter matches against and inserts. Defaults
//! are the English catalog so tests and the smoke binary work standalone.

use serde::{Deserialize, Serialize};

/// Default label for the collapse-block menu entry (the insertion anchor)
pub const DEFAULT_COLLAPSE_BLOCK: &str = "Collapse Block";

/// Default label for the inline-inputs menu entry (removed when present)
pub const DEFAULT_INLINE_INPUTS: &str = "Inline Inputs";

/// Default label offering a switch to horizontal parameter layout
pub const DEFAULT_HORIZONTAL_PARAMETERS: &str = "Arrange Parameters Horizontally";

/// Default label offering a switch to vertical parameter layout
pub const DEFAULT_VERTICAL_PARAMETERS: &str = "Arrange Parameters Vertically";

/// Menu label catalog. Hosts deserialize their locale's catalog at startup;
/// missing entries fall back to English.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Messages {
    #[serde(default = "default_collapse_block")]
    pub collapse_block: String,
    #[serde(default = "default_inline_inputs")]
    pub inline_inputs: String,
    #[serde(default = "default_horizontal_parameters")]
    pub horizontal_parameters: String,
    #[serde(default = "default_vertical_parameters")]
    pub vertical_parameters: String,
}

fn default_collapse_block() -> String {
    DEFAULT_COLLAPSE_BLOCK.to_string()
}
fn default_inline_inputs() -> String {
    DEFAULT_INLINE_INPUTS.to_string()
}
fn default_horizontal_parameters() -> String {
    DEFAULT_HORIZONTAL_PARAMETERS.to_string()
}
fn default_vertical_parameters() -> String {
    DEFAULT_VERTICAL_PARAMETERS.to_string()
}

impl Default for Messages {
    fn default() -> Self {
        Messages {
            collapse_block: default_collapse_block(),
            inline_inputs: default_inline_inputs(),
            horizontal_parameters: default_horizontal_parameters(),
            vertical_parameters: default_vertical_parameters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_labels() {
        let messages = Messages::default();
        assert_eq!(messages.collapse_block, "Collapse Block");
        assert_eq!(messages.inline_inputs, "Inline Inputs");
        assert_eq!(
            messages.horizontal_parameters,
            "Arrange Parameters Horizontally"
        );
        assert_eq!(
            messages.vertical_parameters,
            "Arrange Parameters Vertically"
        );
    }

    #[test]
    fn test_partial_catalog_falls_back_to_english() {
        let messages: Messages =
            serde_json::from_str(r#"{"collapse_block": "Blok einklappen"}"#).unwrap();
        assert_eq!(messages.collapse_block, "Blok einklappen");
        assert_eq!(messages.inline_inputs, DEFAULT_INLINE_INPUTS);
        assert_eq!(
            messages.vertical_parameters,
            DEFAULT_VERTICAL_PARAMETERS
        );
    }
}
