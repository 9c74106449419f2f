//! Capabilities a block must expose to the field layer.
//!
//! The canvas engine owns blocks; this crate only consumes them. These traits
//! are the whole surface the field toolkit needs: the lexical scope a
//! declaration lives in, the declared parameters, and the presentation state
//! the context menu toggles.

/// The enclosing declaration context of a parameter, as computed by the
/// editor's scope resolver. Scopes are owned and updated elsewhere; the field
/// layer only reads the name used to disambiguate same-named parameters
/// across nested procedures.
pub trait VariableScope {
    fn name(&self) -> &str;
}

/// A block that declares parameters.
///
/// `set_parameter_orientation` takes `&self`: menu callbacks hold a shared
/// handle to the block, and the editor runs on a single-threaded cooperative
/// event model, so implementors flip the flag through interior mutability.
pub trait ParameterBlock {
    /// The lexical scope the block's parameters belong to, or `None` when the
    /// declaration is global.
    fn variable_scope(&self) -> Option<&dyn VariableScope>;

    /// Declared parameter names. Only the length matters to the menu
    /// augmenter; the flydown reads the individual field texts instead.
    fn parameters(&self) -> Vec<String>;

    /// Whether the block is currently collapsed on the canvas.
    fn is_collapsed(&self) -> bool;

    /// Current parameter layout: `true` for horizontal, `false` for vertical.
    fn horizontal_parameters(&self) -> bool;

    /// Switch the parameter layout.
    fn set_parameter_orientation(&self, horizontal: bool);
}
