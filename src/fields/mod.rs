//! Editable fields for block parameter names.
//!
//! # Modules
//!
//! - [`parameter`]: the parameter-name field with reentrancy guard and gated
//!   rename propagation
//! - [`flydown`]: getter/setter block descriptors offered by a field's hover
//!   flydown
//!
//! The [`EditableField`] trait is the seam to the rendering layer: it is the
//! capability set the canvas needs from any text-bearing field (read, write,
//! styling class), with [`TextField`] as the plain variant and
//! [`parameter::ParameterField`] as the guarded one.

pub mod flydown;
pub mod parameter;

pub use flydown::{flydown_blocks, BlockDescriptor, BlockDescriptorPair};
pub use parameter::{MutationState, ParameterField, RenameHandler};

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Capability set of an editable text field.
///
/// `set_text(None)` is the disposal call: the surrounding framework issues it
/// while tearing a field down, and implementations must treat it as a no-op
/// with respect to both storage and change propagation.
pub trait EditableField {
    /// Current field text.
    fn text(&self) -> String;

    /// Replace the field text, running whatever validation or propagation the
    /// implementation wires in. `None` must be a safe no-op.
    fn set_text(&self, text: Option<&str>) -> Result<()>;

    /// Whether user edits are allowed in the UI. Programmatic `set_text` is
    /// not gated by this.
    fn is_editable(&self) -> bool;

    /// Styling class the renderer applies to this field.
    fn field_css_class(&self) -> &'static str;
}

/// Where a field's flydown opens, relative to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlydownLocation {
    /// Below the field (the usual spot for parameter declarations)
    #[default]
    Below,
    /// To the right of the field
    Right,
}

/// Validator run by [`TextField::set_text`]. May transform the text before it
/// is stored, or reject the edit entirely.
pub type FieldValidator = Rc<dyn Fn(&str) -> Result<String>>;

/// Plain editable text field: storage plus an optional validator.
///
/// This is the baseline variant of [`EditableField`]; it carries none of the
/// parameter field's guard or propagation machinery.
pub struct TextField {
    text: RefCell<String>,
    editable: bool,
    validator: Option<FieldValidator>,
}

impl TextField {
    /// Styling class the renderer applies to plain text fields.
    pub const CSS_CLASS: &'static str = "fieldTextInput";

    pub fn new(text: impl Into<String>) -> Self {
        TextField {
            text: RefCell::new(text.into()),
            editable: true,
            validator: None,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    pub fn with_validator(mut self, validator: impl Fn(&str) -> Result<String> + 'static) -> Self {
        self.validator = Some(Rc::new(validator));
        self
    }
}

impl EditableField for TextField {
    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: Option<&str>) -> Result<()> {
        let Some(new_text) = text else {
            return Ok(());
        };
        let validated = match &self.validator {
            Some(validator) => validator(new_text)?,
            None => new_text.to_string(),
        };
        *self.text.borrow_mut() = validated;
        Ok(())
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn field_css_class(&self) -> &'static str {
        Self::CSS_CLASS
    }
}
