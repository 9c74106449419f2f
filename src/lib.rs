//! Blockpad Fields - parameter-name field core for the Blockpad editor
//!
//! This library provides the mutation, propagation, and menu plumbing
//! behind editable parameter names on declaration blocks: the guarded
//! field itself, the rename-suppression gate, flydown getter/setter
//! content, and the context-menu layout toggle.

pub mod blocks;
pub mod change_gate;
pub mod config;
pub mod context_menu;
pub mod error;
pub mod fields;
pub mod logging;
pub mod messages;
