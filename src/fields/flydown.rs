//! Flydown content for parameter fields.
//!
//! Hovering a parameter name opens a flydown offering two ready-made blocks:
//! a getter and a setter for that parameter. The descriptors here are pure
//! data; the host editor renders them from the XML form. Content is
//! recomputed on every open, so a rename between hovers is always reflected.

use serde::{Deserialize, Serialize};

use crate::blocks::VariableScope;

/// Block type the renderer instantiates for a variable getter.
pub const GETTER_BLOCK_TYPE: &str = "lexical_variable_get";
/// Block type the renderer instantiates for a variable setter.
pub const SETTER_BLOCK_TYPE: &str = "lexical_variable_set";

/// Separator between the display name and its qualifying scope suffix.
const SCOPE_SEPARATOR: &str = "@@";
/// Separator between the scope name and the scope-local variable name.
const SCOPE_QUALIFIER: &str = "::";

/// Compose the scoped variable name a getter/setter block refers to.
///
/// With a scope the result is `text@@scope::text`; without one the display
/// text doubles as the variable name. The display half stays first so the
/// rendered block reads naturally even before the editor resolves the scope.
pub fn scoped_variable_name(text: &str, scope: Option<&dyn VariableScope>) -> String {
    match scope {
        Some(scope) => format!(
            "{}{}{}{}{}",
            text,
            SCOPE_SEPARATOR,
            scope.name(),
            SCOPE_QUALIFIER,
            text
        ),
        None => text.to_string(),
    }
}

/// Build the getter/setter pair for a field's current text under the given
/// scope. This is the whole of flydown content generation; fields call it
/// through [`crate::fields::ParameterField::flydown_blocks`].
pub fn flydown_blocks(text: &str, scope: Option<&dyn VariableScope>) -> BlockDescriptorPair {
    BlockDescriptorPair::new(scoped_variable_name(text, scope))
}

/// One ready-made block offered by a flydown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Block type the renderer instantiates
    #[serde(rename = "type")]
    pub block_type: String,
    /// Scoped variable name the block refers to
    pub var: String,
}

impl BlockDescriptor {
    pub fn getter(var: impl Into<String>) -> Self {
        BlockDescriptor {
            block_type: GETTER_BLOCK_TYPE.to_string(),
            var: var.into(),
        }
    }

    pub fn setter(var: impl Into<String>) -> Self {
        BlockDescriptor {
            block_type: SETTER_BLOCK_TYPE.to_string(),
            var: var.into(),
        }
    }
}

/// The getter/setter pair a flydown offers for one parameter name.
///
/// Not cached anywhere: built fresh for each flydown open and discarded when
/// it closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDescriptorPair {
    pub getter: BlockDescriptor,
    pub setter: BlockDescriptor,
}

impl BlockDescriptorPair {
    /// Pair for an already-composed scoped variable name.
    pub fn new(var: impl Into<String>) -> Self {
        let var = var.into();
        BlockDescriptorPair {
            getter: BlockDescriptor::getter(var.clone()),
            setter: BlockDescriptor::setter(var),
        }
    }

    /// Serialized form the flydown renderer consumes, getter first.
    pub fn to_flydown_xml(&self) -> String {
        format!(
            "<xml><block type=\"{}\"><title name=\"VAR\">{}</title></block><block type=\"{}\"><title name=\"VAR\">{}</title></block></xml>",
            self.getter.block_type,
            escape_xml(&self.getter.var),
            self.setter.block_type,
            escape_xml(&self.setter.var),
        )
    }
}

/// Escape text for use in XML content. Variable names are user input and may
/// carry any of the five reserved characters.
fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubScope(&'static str);

    impl VariableScope for StubScope {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_scoped_name_with_scope() {
        let scope = StubScope("do_something");
        assert_eq!(
            scoped_variable_name("x", Some(&scope)),
            "x@@do_something::x"
        );
    }

    #[test]
    fn test_scoped_name_without_scope() {
        assert_eq!(scoped_variable_name("x", None), "x");
    }

    #[test]
    fn test_pair_carries_both_block_types() {
        let pair = flydown_blocks("count", None);
        assert_eq!(pair.getter.block_type, GETTER_BLOCK_TYPE);
        assert_eq!(pair.setter.block_type, SETTER_BLOCK_TYPE);
        assert_eq!(pair.getter.var, "count");
        assert_eq!(pair.setter.var, "count");
    }

    #[test]
    fn test_flydown_xml_getter_first() {
        let scope = StubScope("loop");
        let xml = flydown_blocks("i", Some(&scope)).to_flydown_xml();
        assert_eq!(
            xml,
            "<xml>\
             <block type=\"lexical_variable_get\"><title name=\"VAR\">i@@loop::i</title></block>\
             <block type=\"lexical_variable_set\"><title name=\"VAR\">i@@loop::i</title></block>\
             </xml>"
        );
    }

    #[test]
    fn test_flydown_xml_escapes_reserved_characters() {
        let xml = flydown_blocks("a<b&\"c\"", None).to_flydown_xml();
        assert!(xml.contains("a&lt;b&amp;&quot;c&quot;"));
        assert!(!xml.contains("a<b"));
    }

    #[test]
    fn test_descriptor_serializes_with_type_key() {
        let json = serde_json::to_string(&BlockDescriptor::getter("x")).unwrap();
        assert_eq!(json, r#"{"type":"lexical_variable_get","var":"x"}"#);
    }
}
