//! Context-menu plumbing for parameter-bearing blocks.
//!
//! The host editor builds each block's context menu as an ordered option
//! list and hands it to customizers before showing it. [`MenuOptions`] is
//! that list with the two edits customizers need, anchored insertion and
//! first-match removal, and [`add_orientation_option`] is the customizer for
//! parameter declaration blocks: it offers the horizontal/vertical parameter
//! layout toggle and retires the inline-inputs entry, which vertical
//! parameter display cannot honor.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::blocks::ParameterBlock;
use crate::config::EditorSettings;
use crate::messages::Messages;

/// Callback run when a menu option is chosen.
pub type MenuCallback = Rc<dyn Fn()>;

/// One entry in a block's context menu.
#[derive(Clone)]
pub struct MenuOption {
    pub text: String,
    pub enabled: bool,
    pub callback: MenuCallback,
}

impl MenuOption {
    pub fn new(text: impl Into<String>, callback: impl Fn() + 'static) -> Self {
        MenuOption {
            text: text.into(),
            enabled: true,
            callback: Rc::new(callback),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Run the option's callback, as the menu does on click.
    pub fn invoke(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuOption")
            .field("text", &self.text)
            .field("enabled", &self.enabled)
            .finish()
    }
}

/// Ordered context-menu option list.
///
/// Options keep the order they were added in; both edit operations act on
/// the first match only and leave the list untouched when nothing matches.
#[derive(Debug, Clone, Default)]
pub struct MenuOptions {
    options: Vec<MenuOption>,
}

impl MenuOptions {
    pub fn new() -> Self {
        MenuOptions::default()
    }

    pub fn push(&mut self, option: MenuOption) {
        self.options.push(option);
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MenuOption> {
        self.options.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MenuOption> {
        self.options.iter()
    }

    /// Option texts in order, mostly for logging and assertions.
    pub fn texts(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.text.as_str()).collect()
    }

    /// Insert `option` immediately before the first option matching
    /// `anchor`. Returns whether an anchor was found; on `false` the list is
    /// unchanged.
    pub fn insert_before(
        &mut self,
        anchor: impl Fn(&MenuOption) -> bool,
        option: MenuOption,
    ) -> bool {
        match self.options.iter().position(anchor) {
            Some(index) => {
                self.options.insert(index, option);
                true
            }
            None => false,
        }
    }

    /// Remove and return the first option matching `predicate`.
    pub fn remove_first(
        &mut self,
        predicate: impl Fn(&MenuOption) -> bool,
    ) -> Option<MenuOption> {
        let index = self.options.iter().position(predicate)?;
        Some(self.options.remove(index))
    }
}

impl From<Vec<MenuOption>> for MenuOptions {
    fn from(options: Vec<MenuOption>) -> Self {
        MenuOptions { options }
    }
}

/// Add the parameter layout toggle to a declaration block's context menu.
///
/// The toggle is labeled with the layout it switches *to* and lands directly
/// before the collapse entry. Adding it also removes the inline-inputs
/// entry. Nothing happens for parameterless blocks, while collapsing UI is
/// switched off, or while the block is collapsed; a menu with no collapse
/// anchor keeps its options as they are, minus inline-inputs.
pub fn add_orientation_option(
    block: &Rc<dyn ParameterBlock>,
    options: &mut MenuOptions,
    settings: &EditorSettings,
    messages: &Messages,
) {
    if block.parameters().is_empty() || !settings.collapse_enabled || block.is_collapsed() {
        return;
    }

    let text = if block.horizontal_parameters() {
        messages.vertical_parameters.clone()
    } else {
        messages.horizontal_parameters.clone()
    };
    let toggle = {
        let block = Rc::clone(block);
        // Orientation is read at click time, not at menu-build time
        MenuOption::new(text, move || {
            block.set_parameter_orientation(!block.horizontal_parameters());
        })
    };

    let inserted = options.insert_before(|o| o.text == messages.collapse_block, toggle);
    if !inserted {
        warn!(
            anchor = %messages.collapse_block,
            "No collapse option in context menu, skipping layout toggle"
        );
    }

    if options.remove_first(|o| o.text == messages.inline_inputs).is_some() {
        debug!("Removed inline-inputs option, incompatible with vertical parameters");
    }
}

#[cfg(test)]
#[path = "context_menu_tests.rs"]
mod tests;
