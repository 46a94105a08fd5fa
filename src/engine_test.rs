#![allow(clippy::float_cmp)]

use super::*;
use crate::geometry::{Canvas, Point, ResizeHandle};
use crate::layout::{ElementDef, ElementKind};

// =============================================================
// Helpers
// =============================================================

fn element(key: &str, kind: ElementKind, x: f64, y: f64, w: f64, h: f64, z: i64) -> ElementDef {
    ElementDef {
        key: key.to_string(),
        kind,
        x,
        y,
        width: w,
        height: h,
        z_index: z,
        rotation: 0.0,
    }
}

fn registry() -> LayoutRegistry {
    let mut r = LayoutRegistry::new();
    r.register(LayoutSpec {
        layout_type: "comparison".to_string(),
        canvas: Canvas::default(),
        elements: vec![
            element("background", ElementKind::Rectangle, 0.0, 0.0, 1080.0, 1080.0, 0),
            element("headline", ElementKind::Text, 540.0, 384.0, 200.0, 80.0, 10),
            element("cta", ElementKind::Text, 100.0, 900.0, 300.0, 120.0, 20),
        ],
    });
    r
}

fn engine() -> EditorEngine {
    EditorEngine::open(&registry(), "comparison", OverrideDoc::new()).unwrap()
}

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn no_mods() -> Modifiers {
    Modifiers::default()
}

fn shift() -> Modifiers {
    Modifiers { shift: true, alt: false }
}

fn body(key: &str) -> PointerTarget {
    PointerTarget::Element(key.to_string())
}

fn resolved_of(engine: &EditorEngine, key: &str) -> crate::resolve::ResolvedElement {
    engine.resolve().into_iter().find(|e| e.key == key).unwrap()
}

/// Select `key` and start dragging its body from `start`.
fn start_drag(engine: &mut EditorEngine, key: &str, start: Point) {
    engine.pointer_down(start, body(key), no_mods());
    engine.pointer_down(start, body(key), no_mods());
    assert_eq!(engine.session().gesture().key(), Some(key));
}

fn added_id(action: Action) -> String {
    match action {
        Action::ElementAdded { id } => id,
        other => panic!("expected ElementAdded, got {other:?}"),
    }
}

// =============================================================
// Open
// =============================================================

#[test]
fn open_unknown_layout_type_fails() {
    let err = EditorEngine::open(&registry(), "carousel", OverrideDoc::new()).unwrap_err();
    assert!(matches!(err, crate::layout::LayoutError::NotFound(_)));
}

#[test]
fn open_starts_clean_and_idle() {
    let e = engine();
    assert!(!e.is_dirty());
    assert!(e.session().gesture().is_idle());
    assert!(e.session().selected().is_empty());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn click_selects_single_element() {
    let mut e = engine();
    let action = e.pointer_down(pt(600.0, 400.0), body("headline"), no_mods());
    assert_eq!(action, Action::SelectionChanged);
    assert!(e.session().is_selected("headline"));
    assert_eq!(e.session().sole_selection(), Some("headline"));
}

#[test]
fn click_replaces_previous_selection() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(0.0, 0.0), body("cta"), no_mods());
    assert!(!e.session().is_selected("headline"));
    assert!(e.session().is_selected("cta"));
}

#[test]
fn click_empty_canvas_clears_selection() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    let action = e.pointer_down(pt(50.0, 50.0), PointerTarget::Empty, no_mods());
    assert_eq!(action, Action::SelectionChanged);
    assert!(e.session().selected().is_empty());
}

#[test]
fn click_empty_with_nothing_selected_is_noop() {
    let mut e = engine();
    assert_eq!(e.pointer_down(pt(50.0, 50.0), PointerTarget::Empty, no_mods()), Action::None);
}

#[test]
fn shift_click_toggles_membership() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), shift());
    e.pointer_up();
    e.pointer_down(pt(0.0, 0.0), body("cta"), shift());
    e.pointer_up();
    assert_eq!(e.session().selected().len(), 2);

    e.pointer_down(pt(0.0, 0.0), body("headline"), shift());
    e.pointer_up();
    assert!(!e.session().is_selected("headline"));
    assert!(e.session().is_selected("cta"));
}

#[test]
fn click_vanished_key_silently_clears_it() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Badge));
    assert!(e.session().is_selected(&id));

    // External reset removes the custom element while it is selected.
    e.load(OverrideDoc::new());
    assert!(e.session().selected().is_empty());

    // A stale hit on the vanished id is a harmless no-op.
    let action = e.pointer_down(pt(0.0, 0.0), body(&id), no_mods());
    assert_eq!(action, Action::None);
    assert!(e.session().gesture().is_idle());
}

// =============================================================
// Drag
// =============================================================

#[test]
fn drag_starts_only_on_selected_body() {
    let mut e = engine();
    // First press selects; no gesture yet.
    e.pointer_down(pt(600.0, 400.0), body("headline"), no_mods());
    assert!(e.session().gesture().is_idle());
    e.pointer_up();
    // Second press on the now-selected body starts the drag.
    e.pointer_down(pt(600.0, 400.0), body("headline"), no_mods());
    assert_eq!(e.session().gesture().key(), Some("headline"));
}

#[test]
fn drag_move_scenario_without_snap() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(600.0, 600.0));

    let action = e.pointer_move(pt(650.0, 580.0), no_mods());
    assert_eq!(action, Action::ElementChanged { key: "headline".to_string() });
    e.pointer_up();

    let entry = &e.doc().position_overrides["headline"];
    assert_eq!(entry.x, Some(590.0));
    assert_eq!(entry.y, Some(364.0));
    // Untouched fields stay sparse and keep tracking the spec default.
    assert_eq!(entry.width, None);
    assert_eq!(entry.height, None);

    let headline = resolved_of(&e, "headline");
    assert_eq!(headline.x, 590.0);
    assert_eq!(headline.y, 364.0);
    assert_eq!(headline.width, 200.0);
    assert!(headline.has_override);
}

#[test]
fn drag_snap_scenario_grid_5() {
    let mut e = engine();
    e.set_grid_size(5.0);
    start_drag(&mut e, "headline", pt(0.0, 0.0));

    // Raw end position (542, 387) snaps to (540, 385).
    e.pointer_move(pt(2.0, 3.0), no_mods());
    e.pointer_up();

    let headline = resolved_of(&e, "headline");
    assert_eq!(headline.x, 540.0);
    assert_eq!(headline.y, 385.0);
}

#[test]
fn drag_alt_bypasses_snap_for_the_gesture() {
    let mut e = engine();
    e.set_grid_size(10.0);
    start_drag(&mut e, "headline", pt(0.0, 0.0));

    e.pointer_move(pt(2.0, 3.0), Modifiers { shift: false, alt: true });
    e.pointer_up();

    let headline = resolved_of(&e, "headline");
    assert_eq!(headline.x, 542.0);
    assert_eq!(headline.y, 387.0);
}

#[test]
fn drag_is_clamped_to_canvas() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(0.0, 0.0));

    e.pointer_move(pt(5000.0, -5000.0), no_mods());
    e.pointer_up();

    let headline = resolved_of(&e, "headline");
    assert_eq!(headline.x, 1080.0);
    assert_eq!(headline.y, 0.0);
}

#[test]
fn drag_back_to_default_leaves_no_override() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(50.0, 0.0), no_mods());
    e.pointer_move(pt(0.0, 0.0), no_mods());
    e.pointer_up();

    assert!(!e.doc().position_overrides.contains_key("headline"));
    assert!(!resolved_of(&e, "headline").has_override);
}

#[test]
fn second_pointer_down_during_drag_is_ignored() {
    let mut e = engine();
    start_drag(&mut e, "headline", pt(0.0, 0.0));

    let action = e.pointer_down(pt(10.0, 10.0), body("cta"), no_mods());
    assert_eq!(action, Action::None);
    // The in-progress gesture continues uninterrupted.
    assert_eq!(e.session().gesture().key(), Some("headline"));
    assert!(!e.session().is_selected("cta"));
}

#[test]
fn commit_without_movement_records_no_undo() {
    let mut e = engine();
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_up();
    assert!(!e.session().can_undo());
}

// =============================================================
// Resize
// =============================================================

#[test]
fn resize_requires_sole_selection() {
    let mut e = engine();
    let action = e.pointer_down(pt(0.0, 0.0), PointerTarget::ResizeHandle(ResizeHandle::E), no_mods());
    assert_eq!(action, Action::None);
    assert!(e.session().gesture().is_idle());
}

#[test]
fn resize_east_grows_width_never_moves_x() {
    let mut e = engine();
    e.set_snap_enabled(false);
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(740.0, 424.0), PointerTarget::ResizeHandle(ResizeHandle::E), no_mods());
    e.pointer_move(pt(770.0, 424.0), no_mods());
    e.pointer_up();

    let entry = &e.doc().position_overrides["headline"];
    assert_eq!(entry.width, Some(230.0));
    // x never changed, so it is not recorded.
    assert_eq!(entry.x, None);
    assert_eq!(entry.height, None);
}

#[test]
fn resize_west_keeps_right_edge_fixed() {
    let mut e = engine();
    e.set_snap_enabled(false);
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(540.0, 424.0), PointerTarget::ResizeHandle(ResizeHandle::W), no_mods());
    e.pointer_move(pt(500.0, 424.0), no_mods());
    e.pointer_up();

    let headline = resolved_of(&e, "headline");
    assert_eq!(headline.width, 240.0);
    assert_eq!(headline.x, 500.0);
    // Right edge invariant across the gesture: 540 + 200 == 500 + 240.
    assert_eq!(headline.x + headline.width, 740.0);
}

#[test]
fn resize_clamps_to_minimum_floor() {
    let mut e = engine();
    e.set_snap_enabled(false);
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(0.0, 0.0), PointerTarget::ResizeHandle(ResizeHandle::Se), no_mods());
    e.pointer_move(pt(-1000.0, -1000.0), no_mods());
    e.pointer_up();

    let headline = resolved_of(&e, "headline");
    assert_eq!(headline.width, 50.0);
    assert_eq!(headline.height, 20.0);
}

// =============================================================
// Rotate
// =============================================================

#[test]
fn rotate_tracks_pointer_angle() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(640.0, 300.0), PointerTarget::RotateHandle, no_mods());

    // Headline center is (640, 424); pointer straight right of it.
    e.pointer_move(pt(740.0, 424.0), no_mods());
    e.pointer_up();

    assert_eq!(resolved_of(&e, "headline").rotation, 90.0);
    assert_eq!(e.doc().position_overrides["headline"].rotation, Some(90.0));
}

#[test]
fn rotate_to_upright_clears_rotation_override() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(640.0, 300.0), PointerTarget::RotateHandle, no_mods());
    e.pointer_move(pt(740.0, 424.0), no_mods());
    // Swing back to straight up: rotation equals the default again.
    e.pointer_move(pt(640.0, 300.0), no_mods());
    e.pointer_up();

    assert!(!e.doc().position_overrides.contains_key("headline"));
}

#[test]
fn rotate_with_shift_snaps_to_15_degrees() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.pointer_down(pt(640.0, 300.0), PointerTarget::RotateHandle, no_mods());

    // ~46.5° from center (640, 424): snaps to 45 with shift held.
    e.pointer_move(pt(740.0, 329.0), shift());
    e.pointer_up();

    assert_eq!(resolved_of(&e, "headline").rotation, 45.0);
}

#[test]
fn rotate_center_follows_live_position() {
    let mut e = engine();
    e.set_snap_enabled(false);
    // Move the headline 100 to the right first.
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(100.0, 0.0), no_mods());
    e.pointer_up();

    // Center is now (740, 424); pointer straight right of the live
    // center must read 90°.
    e.pointer_down(pt(740.0, 300.0), PointerTarget::RotateHandle, no_mods());
    e.pointer_move(pt(840.0, 424.0), no_mods());
    e.pointer_up();

    assert_eq!(resolved_of(&e, "headline").rotation, 90.0);
}

// =============================================================
// Cancel
// =============================================================

#[test]
fn cancel_restores_pre_gesture_state() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(300.0, 300.0), no_mods());

    let action = e.cancel_gesture();
    assert_eq!(action, Action::StateReplaced);
    assert!(e.session().gesture().is_idle());
    assert!(!e.doc().position_overrides.contains_key("headline"));
    assert!(!e.session().can_undo());
}

#[test]
fn cancel_when_idle_is_noop() {
    let mut e = engine();
    assert_eq!(e.cancel_gesture(), Action::None);
}

// =============================================================
// Nudge
// =============================================================

#[test]
fn nudge_moves_one_unit() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();

    let action = e.nudge(NudgeDirection::Right, no_mods());
    assert_eq!(action, Action::ElementChanged { key: "headline".to_string() });
    assert_eq!(resolved_of(&e, "headline").x, 541.0);
}

#[test]
fn nudge_with_shift_moves_ten_units() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();
    e.nudge(NudgeDirection::Up, shift());
    assert_eq!(resolved_of(&e, "headline").y, 374.0);
}

#[test]
fn nudge_clamps_at_canvas_edge() {
    let mut e = engine();
    let mut doc = OverrideDoc::new();
    doc.position_overrides.insert(
        "headline".to_string(),
        PositionOverride { x: Some(5.0), ..Default::default() },
    );
    e.load(doc);
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();

    e.nudge(NudgeDirection::Left, shift());
    assert_eq!(resolved_of(&e, "headline").x, 0.0);
}

#[test]
fn each_nudge_is_its_own_undo_step() {
    let mut e = engine();
    e.pointer_down(pt(0.0, 0.0), body("headline"), no_mods());
    e.pointer_up();

    e.nudge(NudgeDirection::Right, no_mods());
    e.nudge(NudgeDirection::Right, no_mods());
    assert_eq!(resolved_of(&e, "headline").x, 542.0);

    e.undo();
    assert_eq!(resolved_of(&e, "headline").x, 541.0);
    e.undo();
    assert_eq!(resolved_of(&e, "headline").x, 540.0);
}

#[test]
fn nudge_requires_sole_selection_and_idle() {
    let mut e = engine();
    assert_eq!(e.nudge(NudgeDirection::Up, no_mods()), Action::None);

    e.pointer_down(pt(0.0, 0.0), body("headline"), shift());
    e.pointer_up();
    e.pointer_down(pt(0.0, 0.0), body("cta"), shift());
    e.pointer_up();
    // Two elements selected: nudge is ignored.
    assert_eq!(e.nudge(NudgeDirection::Up, no_mods()), Action::None);
}

// =============================================================
// Custom elements
// =============================================================

#[test]
fn add_custom_centers_and_stacks_on_top() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Badge));

    let badge = resolved_of(&e, &id);
    assert_eq!(badge.x, 460.0); // (1080 - 160) / 2
    assert_eq!(badge.y, 510.0); // (1080 - 60) / 2
    assert_eq!(badge.z_index, 30); // one step above the topmost spec z of 20
    assert!(badge.has_override);
    assert_eq!(e.session().sole_selection(), Some(id.as_str()));
    assert!(e.is_dirty());
}

#[test]
fn add_custom_is_undoable() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Text));
    e.undo();
    assert!(e.doc().custom(&id).is_none());
    assert!(e.session().selected().is_empty());
}

#[test]
fn drag_custom_element_writes_its_own_geometry() {
    let mut e = engine();
    e.set_snap_enabled(false);
    let id = added_id(e.add_custom_element(CustomKind::Shape));

    // The new element is already selected; press its body and drag.
    e.pointer_down(pt(0.0, 0.0), body(&id), no_mods());
    e.pointer_move(pt(60.0, -40.0), no_mods());
    e.pointer_up();

    let shape = e.doc().custom(&id).unwrap();
    assert_eq!(shape.x, 500.0); // 440 + 60
    assert_eq!(shape.y, 400.0); // 440 - 40
    // No override entry is created for custom elements.
    assert!(e.doc().position_overrides.is_empty());
}

#[test]
fn delete_custom_clears_selection_and_layers() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Badge));

    let action = e.delete_custom_element(&id);
    assert_eq!(action, Action::ElementDeleted { id: id.clone() });
    assert!(e.resolve().iter().all(|el| el.key != id));
    assert!(e.layer_list().iter().all(|l| l.key != id));
    assert!(e.session().selected().is_empty());
}

#[test]
fn delete_unknown_or_spec_key_is_refused() {
    let mut e = engine();
    assert_eq!(e.delete_custom_element("headline"), Action::None);
    assert_eq!(e.delete_custom_element("custom-nope"), Action::None);
    assert_eq!(e.resolve().len(), 3);
}

#[test]
fn delete_is_undoable() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Image));
    e.delete_custom_element(&id);
    e.undo();
    assert!(e.doc().custom(&id).is_some());
}

// =============================================================
// Layer reorder
// =============================================================

#[test]
fn reorder_assigns_spaced_overrides_to_every_key() {
    let mut e = engine();
    // Panel order, topmost first: background above everything.
    let action = e.reorder_layers(&["background", "cta", "headline"]);
    assert_eq!(action, Action::StateReplaced);

    let overrides = &e.doc().position_overrides;
    assert_eq!(overrides["headline"].z_index, Some(10));
    assert_eq!(overrides["cta"].z_index, Some(20));
    assert_eq!(overrides["background"].z_index, Some(30));
    // Explicit entries even where nothing else changed.
    assert_eq!(overrides.len(), 3);

    let keys: Vec<String> = e.resolve().into_iter().map(|el| el.key).collect();
    assert_eq!(keys, vec!["headline", "cta", "background"]);
}

#[test]
fn reorder_writes_custom_z_directly() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Badge));

    e.reorder_layers(&[
        "background".to_string(),
        "cta".to_string(),
        "headline".to_string(),
        id.clone(),
    ]);
    // Bottom of the panel list → lowest z.
    assert_eq!(e.doc().custom(&id).unwrap().z_index, 10);
    assert!(!e.doc().position_overrides.contains_key(&id));
}

#[test]
fn reorder_skips_stale_keys() {
    let mut e = engine();
    e.reorder_layers(&["cta", "ghost", "headline", "background"]);
    assert!(!e.doc().position_overrides.contains_key("ghost"));
    // Surviving keys still get the full spaced sequence.
    assert_eq!(e.doc().position_overrides["background"].z_index, Some(10));
    assert_eq!(e.doc().position_overrides["headline"].z_index, Some(20));
    assert_eq!(e.doc().position_overrides["cta"].z_index, Some(30));
}

#[test]
fn reorder_is_one_undo_step() {
    let mut e = engine();
    e.reorder_layers(&["background", "cta", "headline"]);
    e.undo();
    assert!(e.doc().position_overrides.is_empty());
    let keys: Vec<String> = e.resolve().into_iter().map(|el| el.key).collect();
    assert_eq!(keys, vec!["background", "headline", "cta"]);
}

// =============================================================
// Undo / redo symmetry
// =============================================================

#[test]
fn n_gestures_undo_n_returns_to_origin() {
    let mut e = engine();
    e.set_snap_enabled(false);
    let initial = e.resolve();

    for i in 1..=3 {
        start_drag(&mut e, "headline", pt(0.0, 0.0));
        e.pointer_move(pt(f64::from(i) * 10.0, 0.0), no_mods());
        e.pointer_up();
    }
    let final_state = e.resolve();
    assert_ne!(initial, final_state);

    for _ in 0..3 {
        assert_eq!(e.undo(), Action::StateReplaced);
    }
    assert_eq!(e.resolve(), initial);

    for _ in 0..3 {
        assert_eq!(e.redo(), Action::StateReplaced);
    }
    assert_eq!(e.resolve(), final_state);
}

#[test]
fn undo_empty_history_is_noop() {
    let mut e = engine();
    assert_eq!(e.undo(), Action::None);
    assert_eq!(e.redo(), Action::None);
}

#[test]
fn new_gesture_clears_redo() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(50.0, 0.0), no_mods());
    e.pointer_up();

    e.undo();
    assert!(e.session().can_redo());

    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(0.0, 30.0), no_mods());
    e.pointer_up();
    assert!(!e.session().can_redo());
}

// =============================================================
// Save / discard / load
// =============================================================

#[test]
fn save_marks_clean_and_emits_current_state() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(50.0, 0.0), no_mods());
    e.pointer_up();
    assert!(e.is_dirty());

    let saved = e.save();
    assert!(!e.is_dirty());
    assert_eq!(&saved, e.doc());
    assert_eq!(saved.position_overrides["headline"].x, Some(590.0));
}

#[test]
fn discard_resets_to_baseline_not_undo_bottom() {
    let mut e = engine();
    e.set_snap_enabled(false);
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(50.0, 0.0), no_mods());
    e.pointer_up();
    e.save();

    // More unsaved edits on top of the saved state.
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.pointer_move(pt(0.0, 80.0), no_mods());
    e.pointer_up();
    assert!(e.is_dirty());

    assert_eq!(e.discard_changes(), Action::StateReplaced);
    assert!(!e.is_dirty());
    // Back to the *saved* snapshot, not the pristine spec defaults.
    assert_eq!(resolved_of(&e, "headline").x, 590.0);
    // Undo history is discarded with the session changes.
    assert!(!e.session().can_undo());
}

#[test]
fn discard_when_clean_is_noop() {
    let mut e = engine();
    assert_eq!(e.discard_changes(), Action::None);
}

#[test]
fn load_replaces_state_and_prunes_selection() {
    let mut e = engine();
    let id = added_id(e.add_custom_element(CustomKind::Text));
    assert!(e.session().is_selected(&id));

    let mut incoming = OverrideDoc::new();
    incoming.position_overrides.insert(
        "cta".to_string(),
        PositionOverride { y: Some(800.0), ..Default::default() },
    );
    e.load(incoming);

    assert!(!e.is_dirty());
    assert!(e.session().selected().is_empty());
    assert!(!e.session().can_undo());
    assert_eq!(resolved_of(&e, "cta").y, 800.0);
}

#[test]
fn load_mid_gesture_aborts_it() {
    let mut e = engine();
    start_drag(&mut e, "headline", pt(0.0, 0.0));
    e.load(OverrideDoc::new());
    assert!(e.session().gesture().is_idle());
}
