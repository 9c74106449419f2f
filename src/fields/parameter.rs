//! The parameter-name field.
//!
//! A [`ParameterField`] sits on a declaration block (procedure parameter,
//! loop index, local variable) and owns the name's mutation path. Renaming a
//! parameter must update every block that refers to the old name, and that
//! propagation is driven by a handler the declaration block installs on the
//! field. Two pieces of machinery keep the loop shut:
//!
//! - a per-field mutation guard, so a handler that writes back to the field
//!   mid-rename is dropped instead of recursing, and
//! - the shared [`ChangeGate`], which the editor closes around bulk rebuilds
//!   so a cascade of field churn does not fan out into repeated workspace
//!   renames.
//!
//! # Examples
//!
//! ```rust,ignore
//! let gate = ChangeGate::new();
//! let field = ParameterField::new("x", gate.clone())
//!     .with_rename_handler(|field, new_name| {
//!         // propagate: field.text() is still the old name here
//!         new_name.to_string()
//!     });
//! field.set_text(Some("y"))?;
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::blocks::ParameterBlock;
use crate::change_gate::ChangeGate;
use crate::error::Result;
use crate::fields::flydown::{flydown_blocks, BlockDescriptorPair};
use crate::fields::{EditableField, FlydownLocation};

/// Styling class the renderer applies to parameter fields.
pub const FIELD_CSS_CLASS: &str = "fieldParameter";
/// Styling class the renderer applies to a parameter field's flydown.
pub const FLYDOWN_CSS_CLASS: &str = "fieldParameterFlydown";

/// Rename propagation callback.
///
/// Invoked from [`ParameterField::set_text`] before the new text is stored,
/// so `field.text()` still reads the old name while the argument carries the
/// new one. The returned string is discarded; propagation through the
/// workspace is the handler's only effect, and the field always stores the
/// caller-supplied text.
pub type RenameHandler = Rc<dyn Fn(&ParameterField, &str) -> String>;

/// Mutation state of a field. `Mutating` is only ever observable from code
/// running inside [`ParameterField::set_text`], such as a rename handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Idle,
    Mutating,
}

/// Editable field holding one parameter name.
///
/// Interior mutability keeps the whole API on `&self`: rename handlers
/// receive the field they hang off and may call back into it, and the guard
/// machinery decides what such reentrant calls mean.
pub struct ParameterField {
    text: RefCell<String>,
    editable: bool,
    location: FlydownLocation,
    gate: ChangeGate,
    rename_handler: Option<RenameHandler>,
    state: Cell<MutationState>,
}

impl ParameterField {
    pub fn new(text: impl Into<String>, gate: ChangeGate) -> Self {
        ParameterField {
            text: RefCell::new(text.into()),
            editable: true,
            location: FlydownLocation::default(),
            gate,
            rename_handler: None,
            state: Cell::new(MutationState::Idle),
        }
    }

    pub fn with_location(mut self, location: FlydownLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_rename_handler(
        mut self,
        handler: impl Fn(&ParameterField, &str) -> String + 'static,
    ) -> Self {
        self.rename_handler = Some(Rc::new(handler));
        self
    }

    /// Field whose name is shown but not editable in the flydown, e.g. a
    /// loop index the block manages itself.
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Change the field text.
    ///
    /// A reentrant call, meaning a rename handler writing back to the field
    /// that is mid-mutation, is dropped silently so a set → rename → set
    /// chain cannot recurse. `None` is the disposal call and leaves the field
    /// untouched; callers tear fields down inside a
    /// [`ChangeGate::suppress`] scope so no propagation runs either way.
    pub fn set_text(&self, text: Option<&str>) -> Result<()> {
        if self.state.get() == MutationState::Mutating {
            debug!(dropped = text.unwrap_or(""), "Reentrant set_text dropped");
            return Ok(());
        }
        let _guard = MutationGuard::enter(&self.state);
        self.apply_text(text)
    }

    /// The single text-set path. Runs under the mutation guard.
    fn apply_text(&self, text: Option<&str>) -> Result<()> {
        let Some(new_text) = text else {
            return Ok(());
        };
        let stored = self.run_change_handler(new_text);
        *self.text.borrow_mut() = stored;
        Ok(())
    }

    /// Gated rename propagation. Inert while the gate is closed. Returns the
    /// text to store, which is always the input text: a handler proposing a
    /// different name is a side effect gone wrong, not a veto.
    fn run_change_handler(&self, new_text: &str) -> String {
        if self.gate.is_enabled() {
            if let Some(handler) = self.rename_handler.clone() {
                let proposed = handler(self, new_text);
                if proposed != new_text {
                    debug!(
                        proposed = %proposed,
                        kept = %new_text,
                        "Rename handler proposal discarded"
                    );
                }
            }
        }
        new_text.to_string()
    }

    pub fn is_mutating(&self) -> bool {
        self.state.get() == MutationState::Mutating
    }

    pub fn location(&self) -> FlydownLocation {
        self.location
    }

    pub fn gate(&self) -> &ChangeGate {
        &self.gate
    }

    /// Current field text.
    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    /// Getter/setter descriptors for this field's flydown, composed from the
    /// current text and the declaration block's scope.
    pub fn flydown_blocks(&self, block: &dyn ParameterBlock) -> BlockDescriptorPair {
        flydown_blocks(&self.text(), block.variable_scope())
    }

    pub fn flydown_css_class(&self) -> &'static str {
        FLYDOWN_CSS_CLASS
    }
}

impl EditableField for ParameterField {
    fn text(&self) -> String {
        ParameterField::text(self)
    }

    fn set_text(&self, text: Option<&str>) -> Result<()> {
        ParameterField::set_text(self, text)
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn field_css_class(&self) -> &'static str {
        FIELD_CSS_CLASS
    }
}

/// RAII scope for the mutation state machine: enters `Mutating`, restores
/// `Idle` on drop, unwinding included.
struct MutationGuard<'a> {
    state: &'a Cell<MutationState>,
}

impl<'a> MutationGuard<'a> {
    fn enter(state: &'a Cell<MutationState>) -> Self {
        if state.replace(MutationState::Mutating) == MutationState::Mutating {
            crate::debug_panic!("mutation guard entered while already mutating");
        }
        MutationGuard { state }
    }
}

impl Drop for MutationGuard<'_> {
    fn drop(&mut self) {
        self.state.set(MutationState::Idle);
    }
}

#[cfg(test)]
#[path = "parameter_tests.rs"]
mod tests;
