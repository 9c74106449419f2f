//! Smoke test binary for exercising the field toolkit end to end
//!
//! Run with: cargo run --bin smoke-test
//!
//! This tests:
//! 1. Change gate suppression and restore
//! 2. Rename propagation into dependent references
//! 3. Reentrancy guard on the parameter field
//! 4. Cross-field rename cascade termination
//! 5. Flydown getter/setter content
//! 6. Context menu augmentation

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use blockpad_fields::blocks::{ParameterBlock, VariableScope};
use blockpad_fields::change_gate::ChangeGate;
use blockpad_fields::config::load_settings;
use blockpad_fields::context_menu::{add_orientation_option, MenuOption, MenuOptions};
use blockpad_fields::error::ResultExt;
use blockpad_fields::fields::{flydown_blocks, ParameterField};
use blockpad_fields::logging;
use blockpad_fields::messages::Messages;

fn main() {
    let _logging = logging::init();

    println!("=== Blockpad Fields Smoke Test ===\n");

    // Test 1: gate suppression
    println!("1. Testing change gate suppression...");
    let gate = ChangeGate::new();
    println!("   at start        -> enabled: {}", gate.is_enabled());
    {
        let _outer = gate.suppress();
        println!("   inside suppress -> enabled: {}", gate.is_enabled());
        let _nested = gate.suppress();
        println!("   nested suppress -> enabled: {}", gate.is_enabled());
    }
    if gate.is_enabled() {
        println!("   ✓ SUCCESS: gate restored after scope exit");
    } else {
        println!("   ✗ FAILED: gate still disabled");
    }
    println!();

    // Test 2: rename propagation
    println!("2. Testing rename propagation...");
    let gate = ChangeGate::new();
    let references = Rc::new(RefCell::new(vec![
        "x".to_string(),
        "x".to_string(),
        "other".to_string(),
    ]));
    let field = ParameterField::new("x", gate.clone()).with_rename_handler({
        let references = references.clone();
        move |field, new_name| {
            let old_name = field.text();
            let mut renamed = 0;
            for reference in references.borrow_mut().iter_mut() {
                if *reference == old_name {
                    *reference = new_name.to_string();
                    renamed += 1;
                }
            }
            tracing::info!(old = %old_name, new = %new_name, renamed, "Propagated rename");
            new_name.to_string()
        }
    });
    println!("   references before -> {:?}", references.borrow());
    match field.set_text(Some("total")) {
        Ok(()) => {
            let refs = references.borrow();
            let renamed = refs.iter().filter(|r| r.as_str() == "total").count();
            if renamed == 2 && refs[2] == "other" {
                println!("   ✓ SUCCESS: references now {:?}", *refs);
            } else {
                println!("   ✗ FAILED: unexpected references {:?}", *refs);
            }
        }
        Err(e) => println!("   ✗ FAILED: {}", e),
    }

    // Bulk-rebuild simulation: same field, gate closed
    gate.with_disabled(|| field.set_text(Some("temp")).log_err());
    if references.borrow().iter().all(|r| r != "temp") && field.text() == "temp" {
        println!("   ✓ SUCCESS: suppressed rename changed the field only");
    } else {
        println!(
            "   ✗ FAILED: field={} references={:?}",
            field.text(),
            references.borrow()
        );
    }
    println!();

    // Test 3: reentrancy guard
    println!("3. Testing reentrancy guard...");
    let calls = Rc::new(Cell::new(0u32));
    let field = ParameterField::new("x", ChangeGate::new()).with_rename_handler({
        let calls = calls.clone();
        move |field, _new_name| {
            calls.set(calls.get() + 1);
            // Hostile handler writing back mid-rename
            let _ = field.set_text(Some("hijacked"));
            String::new()
        }
    });
    match field.set_text(Some("renamed")) {
        Ok(()) if field.text() == "renamed" && calls.get() == 1 => {
            println!("   ✓ SUCCESS: nested write dropped, handler ran once");
        }
        Ok(()) => println!(
            "   ✗ FAILED: text={} handler_calls={}",
            field.text(),
            calls.get()
        ),
        Err(e) => println!("   ✗ FAILED: {}", e),
    }
    println!();

    // Test 4: two fields renaming each other
    println!("4. Testing cross-field rename cascade...");
    let gate = ChangeGate::new();
    let a_slot: FieldSlot = Rc::new(RefCell::new(None));
    let b_slot: FieldSlot = Rc::new(RefCell::new(None));
    let a = cascading_field("alpha", &gate, b_slot.clone());
    let b = cascading_field("beta", &gate, a_slot.clone());
    *a_slot.borrow_mut() = Some(a.clone());
    *b_slot.borrow_mut() = Some(b.clone());

    match a.set_text(Some("shared")) {
        Ok(()) if a.text() == "shared" && b.text() == "shared" => {
            println!("   ✓ SUCCESS: cascade converged, both fields -> shared");
        }
        Ok(()) => println!("   ✗ FAILED: a={} b={}", a.text(), b.text()),
        Err(e) => println!("   ✗ FAILED: {}", e),
    }
    println!();

    // Test 5: flydown content
    println!("5. Testing flydown content generation...");
    let block = DemoBlock::procedure("compute_area", &["width", "height"]);
    let field = ParameterField::new("width", ChangeGate::new());
    let pair = field.flydown_blocks(block.as_ref());
    println!("   XML  -> {}", pair.to_flydown_xml());
    match serde_json::to_string(&pair) {
        Ok(json) => println!("   JSON -> {}", json),
        Err(e) => println!("   ✗ FAILED to serialize: {}", e),
    }
    if pair.getter.var == "width@@compute_area::width" {
        println!("   ✓ SUCCESS: scoped variable name composed");
    } else {
        println!("   ✗ FAILED: got {}", pair.getter.var);
    }
    let global = flydown_blocks("score", None);
    if global.setter.var == "score" {
        println!("   ✓ SUCCESS: top-level name passes through unscoped");
    } else {
        println!("   ✗ FAILED: got {}", global.setter.var);
    }
    println!();

    // Test 6: context menu
    println!("6. Testing context menu augmentation...");
    let settings = load_settings(std::env::temp_dir().join("blockpad-settings.json"));
    println!("   collapse_enabled -> {}", settings.collapse_enabled);
    let dyn_block: Rc<dyn ParameterBlock> = block.clone();
    let mut options = MenuOptions::new();
    for text in ["Duplicate", "Inline Inputs", "Collapse Block", "Delete Block"] {
        options.push(MenuOption::new(text, || {}));
    }
    println!("   before -> {:?}", options.texts());
    add_orientation_option(&dyn_block, &mut options, &settings, &Messages::default());
    println!("   after  -> {:?}", options.texts());
    let expected = vec![
        "Duplicate",
        "Arrange Parameters Horizontally",
        "Collapse Block",
        "Delete Block",
    ];
    if options.texts() == expected {
        println!("   ✓ SUCCESS: toggle added before collapse, inline-inputs removed");
    } else {
        println!("   ✗ FAILED: unexpected menu layout");
    }
    if let Some(toggle) = options.get(1) {
        toggle.invoke();
        println!(
            "   after click, horizontal -> {}",
            block.horizontal_parameters()
        );
        if block.horizontal_parameters() {
            println!("   ✓ SUCCESS: toggle flipped the block orientation");
        } else {
            println!("   ✗ FAILED: orientation unchanged");
        }
    }
    println!();

    println!("=== Smoke Test Complete ===");
}

type FieldSlot = Rc<RefCell<Option<Rc<ParameterField>>>>;

/// Field whose rename handler pushes the new name into a peer field, the way
/// workspace-wide renames touch every declaration holding the old name.
fn cascading_field(name: &str, gate: &ChangeGate, peer: FieldSlot) -> Rc<ParameterField> {
    Rc::new(
        ParameterField::new(name, gate.clone()).with_rename_handler(move |_field, new_name| {
            if let Some(peer) = peer.borrow().as_ref() {
                let _ = peer.set_text(Some(new_name));
            }
            new_name.to_string()
        }),
    )
}

struct DemoScope(String);

impl VariableScope for DemoScope {
    fn name(&self) -> &str {
        &self.0
    }
}

/// Stand-in for a procedure declaration block.
struct DemoBlock {
    scope: DemoScope,
    params: Vec<String>,
    horizontal: Cell<bool>,
}

impl DemoBlock {
    fn procedure(name: &str, params: &[&str]) -> Rc<Self> {
        Rc::new(DemoBlock {
            scope: DemoScope(name.to_string()),
            params: params.iter().map(|p| p.to_string()).collect(),
            horizontal: Cell::new(false),
        })
    }
}

impl ParameterBlock for DemoBlock {
    fn variable_scope(&self) -> Option<&dyn VariableScope> {
        Some(&self.scope)
    }

    fn parameters(&self) -> Vec<String> {
        self.params.clone()
    }

    fn is_collapsed(&self) -> bool {
        false
    }

    fn horizontal_parameters(&self) -> bool {
        self.horizontal.get()
    }

    fn set_parameter_orientation(&self, horizontal: bool) {
        tracing::info!(horizontal, "Parameter orientation changed");
        self.horizontal.set(horizontal);
    }
}
