use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use super::*;
use crate::blocks::VariableScope;

fn make_field(text: &str) -> ParameterField {
    ParameterField::new(text, ChangeGate::new())
}

struct StubScope(String);

impl VariableScope for StubScope {
    fn name(&self) -> &str {
        &self.0
    }
}

struct StubBlock {
    scope: Option<StubScope>,
}

impl ParameterBlock for StubBlock {
    fn variable_scope(&self) -> Option<&dyn VariableScope> {
        self.scope.as_ref().map(|s| s as &dyn VariableScope)
    }

    fn parameters(&self) -> Vec<String> {
        Vec::new()
    }

    fn is_collapsed(&self) -> bool {
        false
    }

    fn horizontal_parameters(&self) -> bool {
        true
    }

    fn set_parameter_orientation(&self, _horizontal: bool) {}
}

#[test]
fn test_set_text_stores_text() {
    let field = make_field("x");
    field.set_text(Some("y")).unwrap();
    assert_eq!(field.text(), "y");
}

#[test]
fn test_disposal_leaves_field_untouched() {
    let calls = Rc::new(Cell::new(0));
    let field = ParameterField::new("kept", ChangeGate::new()).with_rename_handler({
        let calls = calls.clone();
        move |_field, new_text| {
            calls.set(calls.get() + 1);
            new_text.to_string()
        }
    });
    field.set_text(None).unwrap();
    assert_eq!(field.text(), "kept");
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_handler_sees_old_text_and_new_text() {
    let seen = Rc::new(RefCell::new((String::new(), String::new())));
    let field = ParameterField::new("old", ChangeGate::new()).with_rename_handler({
        let seen = seen.clone();
        move |field, new_text| {
            *seen.borrow_mut() = (field.text(), new_text.to_string());
            new_text.to_string()
        }
    });
    field.set_text(Some("new")).unwrap();
    assert_eq!(*seen.borrow(), ("old".to_string(), "new".to_string()));
    assert_eq!(field.text(), "new");
}

#[test]
fn test_handler_return_value_is_discarded() {
    let field = ParameterField::new("x", ChangeGate::new())
        .with_rename_handler(|_field, _new_text| "something_else".to_string());
    field.set_text(Some("y")).unwrap();
    assert_eq!(field.text(), "y");
}

#[test]
fn test_reentrant_set_text_is_dropped() {
    let calls = Rc::new(Cell::new(0));
    let field = ParameterField::new("x", ChangeGate::new()).with_rename_handler({
        let calls = calls.clone();
        move |field, new_text| {
            calls.set(calls.get() + 1);
            // Hostile handler writing back to the field mid-rename
            field.set_text(Some("hijacked")).unwrap();
            new_text.to_string()
        }
    });
    field.set_text(Some("renamed")).unwrap();
    assert_eq!(field.text(), "renamed");
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_gate_disabled_updates_text_without_propagation() {
    let calls = Rc::new(Cell::new(0));
    let gate = ChangeGate::new();
    let field = ParameterField::new("x", gate.clone()).with_rename_handler({
        let calls = calls.clone();
        move |_field, new_text| {
            calls.set(calls.get() + 1);
            new_text.to_string()
        }
    });

    gate.with_disabled(|| field.set_text(Some("quiet"))).unwrap();
    assert_eq!(field.text(), "quiet");
    assert_eq!(calls.get(), 0);

    // Propagation resumes once the gate reopens
    field.set_text(Some("loud")).unwrap();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_cross_field_cascade_terminates() {
    type FieldSlot = Rc<RefCell<Option<Rc<ParameterField>>>>;

    fn cascading_field(
        name: &str,
        gate: &ChangeGate,
        peer: FieldSlot,
        calls: Rc<Cell<u32>>,
    ) -> Rc<ParameterField> {
        Rc::new(
            ParameterField::new(name, gate.clone()).with_rename_handler(move |_field, new_text| {
                calls.set(calls.get() + 1);
                if let Some(peer) = peer.borrow().as_ref() {
                    peer.set_text(Some(new_text)).unwrap();
                }
                new_text.to_string()
            }),
        )
    }

    let gate = ChangeGate::new();
    let a_slot: FieldSlot = Rc::new(RefCell::new(None));
    let b_slot: FieldSlot = Rc::new(RefCell::new(None));
    let a_calls = Rc::new(Cell::new(0));
    let b_calls = Rc::new(Cell::new(0));

    let a = cascading_field("a", &gate, b_slot.clone(), a_calls.clone());
    let b = cascading_field("b", &gate, a_slot.clone(), b_calls.clone());
    *a_slot.borrow_mut() = Some(a.clone());
    *b_slot.borrow_mut() = Some(b.clone());

    // a renames, a's handler renames b, b's handler tries to rename a again;
    // a is still mutating, so the cycle stops there.
    a.set_text(Some("shared")).unwrap();

    assert_eq!(a.text(), "shared");
    assert_eq!(b.text(), "shared");
    assert_eq!(a_calls.get(), 1);
    assert_eq!(b_calls.get(), 1);
}

#[test]
fn test_handler_panic_restores_idle_state() {
    let calls = Rc::new(Cell::new(0));
    let field = ParameterField::new("old", ChangeGate::new()).with_rename_handler({
        let calls = calls.clone();
        move |_field, new_text| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                panic!("propagation blew up");
            }
            new_text.to_string()
        }
    });

    let result = catch_unwind(AssertUnwindSafe(|| field.set_text(Some("boom"))));
    assert!(result.is_err());
    assert!(!field.is_mutating());
    assert_eq!(field.text(), "old");

    // The field still works after the unwind
    field.set_text(Some("recovered")).unwrap();
    assert_eq!(field.text(), "recovered");
}

#[test]
fn test_is_mutating_only_inside_set_text() {
    let observed = Rc::new(Cell::new(false));
    let field = ParameterField::new("x", ChangeGate::new()).with_rename_handler({
        let observed = observed.clone();
        move |field, new_text| {
            observed.set(field.is_mutating());
            new_text.to_string()
        }
    });

    assert!(!field.is_mutating());
    field.set_text(Some("y")).unwrap();
    assert!(observed.get());
    assert!(!field.is_mutating());
}

#[test]
fn test_read_only_field() {
    let field = make_field("i").read_only();
    assert!(!field.is_editable());
}

#[test]
fn test_flydown_location_builder() {
    let field = make_field("x");
    assert_eq!(field.location(), FlydownLocation::Below);
    let field = make_field("x").with_location(FlydownLocation::Right);
    assert_eq!(field.location(), FlydownLocation::Right);
}

#[test]
fn test_css_classes() {
    let field = make_field("x");
    assert_eq!(field.field_css_class(), "fieldParameter");
    assert_eq!(field.flydown_css_class(), "fieldParameterFlydown");
}

#[test]
fn test_flydown_blocks_use_block_scope() {
    let field = make_field("x");
    let scoped = StubBlock {
        scope: Some(StubScope("do_something".to_string())),
    };
    let pair = field.flydown_blocks(&scoped);
    assert_eq!(pair.getter.var, "x@@do_something::x");
    assert_eq!(pair.setter.var, "x@@do_something::x");

    let global = StubBlock { scope: None };
    let pair = field.flydown_blocks(&global);
    assert_eq!(pair.getter.var, "x");
}

#[test]
fn test_flydown_blocks_reflect_current_text() {
    let field = make_field("before");
    let block = StubBlock { scope: None };
    assert_eq!(field.flydown_blocks(&block).getter.var, "before");
    field.set_text(Some("after")).unwrap();
    assert_eq!(field.flydown_blocks(&block).getter.var, "after");
}
