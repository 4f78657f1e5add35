//! Children reconciliation through the public API.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;
use spark_inflate::engine::arrays::{constraint::ConstraintTarget, text};
use spark_inflate::types::Side;
use spark_inflate::{
    InflateContext, InflateError, Layout, Manager, ObjectValue, ParserRegistry, engine,
};

fn setup() -> Rc<InflateContext> {
    engine::reset_engine();
    InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build()
}

fn data(json: serde_json::Value) -> ObjectValue {
    ObjectValue::from(json)
}

fn rows(names: &[&str]) -> ObjectValue {
    data(json!({ "rows": names }))
}

/// A LinearLayout whose children repeat over `rows`.
fn list_layout(context: &Rc<InflateContext>) -> Rc<Layout> {
    context
        .compile_layout(&json!({
            "type": "LinearLayout",
            "orientation": "vertical",
            "children": {"@": {
                "collection": "@{rows}",
                "layout": {"type": "TextView", "text": "@{rows[$index]}"}
            }}
        }))
        .unwrap()
}

fn texts(container: usize) -> Vec<String> {
    engine::children(container).into_iter().map(text::get_text).collect()
}

fn manager(view: usize) -> Rc<Manager> {
    engine::get_manager(view).unwrap()
}

#[test]
fn test_static_children_keep_source_order_and_container_data() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "LinearLayout",
            "children": [
                {"type": "TextView", "text": "@{a}"},
                {"type": "TextView", "text": "@{b}"},
                {"type": "TextView", "text": "@{$index}"}
            ]
        }))
        .unwrap();
    let root = context
        .inflate(&layout, &data(json!({"a": "first", "b": "second"})), None, Some(7))
        .unwrap();

    assert_eq!(texts(root), vec!["first", "second", "7"]);
    for child in engine::children(root) {
        assert_eq!(manager(child).index(), Some(7));
    }
}

#[test]
fn test_reconcile_twice_keeps_identities() {
    let context = setup();
    let root = context.inflate(&list_layout(&context), &rows(&["a", "b", "c"]), None, None).unwrap();
    let before = engine::children(root);
    let destroyed = Rc::new(Cell::new(0));
    for child in &before {
        let destroyed = destroyed.clone();
        engine::on_destroy(*child, move || destroyed.set(destroyed.get() + 1));
    }
    let allocated = engine::get_allocated_count();

    manager(root).update(Some(&rows(&["a", "b", "c"]))).unwrap();

    assert_eq!(engine::children(root), before);
    assert_eq!(engine::get_allocated_count(), allocated);
    assert_eq!(destroyed.get(), 0);
}

#[test]
fn test_shrink_keeps_leading_children() {
    let context = setup();
    let root = context.inflate(&list_layout(&context), &rows(&["a", "b", "c"]), None, None).unwrap();
    let before = engine::children(root);

    manager(root).update(Some(&rows(&["z"]))).unwrap();

    assert_eq!(engine::children(root), vec![before[0]]);
    assert_eq!(texts(root), vec!["z"]);
    assert_eq!(manager(before[0]).index(), Some(0));
    assert!(!engine::is_allocated(before[1]));
    assert!(!engine::is_allocated(before[2]));
}

#[test]
fn test_grow_appends_with_new_indices() {
    let context = setup();
    let root = context.inflate(&list_layout(&context), &rows(&["a"]), None, None).unwrap();
    let first = engine::child_at(root, 0).unwrap();

    manager(root).update(Some(&rows(&["a", "b", "c"]))).unwrap();

    let after = engine::children(root);
    assert_eq!(after.len(), 3);
    assert_eq!(after[0], first);
    assert_eq!(texts(root), vec!["a", "b", "c"]);
    assert_eq!(manager(after[1]).index(), Some(1));
    assert_eq!(manager(after[2]).index(), Some(2));
}

#[test]
fn test_shrink_to_zero_removes_everything() {
    let context = setup();
    let root = context.inflate(&list_layout(&context), &rows(&["a", "b"]), None, None).unwrap();

    manager(root).update(Some(&rows(&[]))).unwrap();

    assert_eq!(engine::child_count(root), 0);
    assert_eq!(engine::get_allocated_count(), 1);
}

#[test]
fn test_null_collection_is_a_no_op() {
    let context = setup();
    let root = context.inflate(&list_layout(&context), &rows(&["a", "b"]), None, None).unwrap();
    let before = engine::children(root);

    manager(root).update(Some(&data(json!({})))).unwrap();
    manager(root).update(Some(&data(json!({"rows": null})))).unwrap();

    assert_eq!(engine::children(root), before);
}

#[test]
fn test_non_array_collection_is_type_mismatch() {
    let context = setup();
    let root = context.inflate(&list_layout(&context), &rows(&["a", "b"]), None, None).unwrap();
    let before = engine::children(root);

    let err = manager(root).update(Some(&data(json!({"rows": "a,b"})))).unwrap_err();

    assert!(matches!(err, InflateError::TypeMismatch { .. }));
    assert_eq!(engine::children(root), before);
    assert_eq!(texts(root), vec!["a", "b"]);
}

#[test]
fn test_missing_layout_is_reported_before_children_change() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "ViewGroup",
            "children": {"@": {"collection": "@{rows}"}}
        }))
        .unwrap();

    let err = context.inflate(&layout, &rows(&["a"]), None, None).unwrap_err();

    assert!(matches!(
        err,
        InflateError::MissingRequiredField { field: "layout", .. }
    ));
    assert_eq!(engine::get_allocated_count(), 0);
}

#[test]
fn test_missing_collection_is_reported_before_children_change() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "ViewGroup",
            "children": {"@": {"layout": {"type": "View"}}}
        }))
        .unwrap();

    let err = context.inflate(&layout, &rows(&["a"]), None, None).unwrap_err();

    assert!(matches!(
        err,
        InflateError::MissingRequiredField { field: "collection", .. }
    ));
    assert_eq!(engine::get_allocated_count(), 0);
}

#[test]
fn test_non_layout_template_counts_as_missing() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "ViewGroup",
            "children": {"@": {"collection": "@{rows}", "layout": "row"}}
        }))
        .unwrap();

    for rows in [data(json!({})), data(json!({"rows": [1]}))] {
        let err = context.inflate(&layout, &rows, None, None).unwrap_err();
        assert!(matches!(
            err,
            InflateError::MissingRequiredField { field: "layout", .. }
        ));
        assert_eq!(engine::get_allocated_count(), 0);
    }
}

#[test]
fn test_resource_children_are_invalid_attribute_type() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({"type": "ViewGroup", "children": "@string/rows"}))
        .unwrap();

    let err = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap_err();

    assert!(matches!(err, InflateError::InvalidAttributeType { .. }));
}

#[test]
fn test_nested_lists_reconcile_recursively() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "LinearLayout",
            "children": {"@": {
                "collection": "@{groups}",
                "layout": {
                    "type": "LinearLayout",
                    "data": {"items": "@{groups[$index].items}"},
                    "children": {"@": {
                        "collection": "@{items}",
                        "layout": {"type": "TextView", "text": "@{items[$index]}"}
                    }}
                }
            }}
        }))
        .unwrap();
    let root = context
        .inflate(
            &layout,
            &data(json!({"groups": [{"items": ["a", "b"]}, {"items": ["c"]}]})),
            None,
            None,
        )
        .unwrap();
    let groups = engine::children(root);
    assert_eq!(texts(groups[0]), vec!["a", "b"]);
    assert_eq!(texts(groups[1]), vec!["c"]);

    manager(root)
        .update(Some(&data(json!({"groups": [{"items": ["x"]}, {"items": ["y", "z"]}]}))))
        .unwrap();

    assert_eq!(engine::children(root), groups);
    assert_eq!(texts(groups[0]), vec!["x"]);
    assert_eq!(texts(groups[1]), vec!["y", "z"]);
}

#[test]
fn test_constraints_resolve_siblings_after_layout() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "ConstraintLayout",
            "children": [
                {"type": "TextView", "id": "avatar", "text": "A"},
                {
                    "type": "TextView",
                    "id": "name",
                    "layout_constraintLeft_toRightOf": "avatar",
                    "layout_constraintTop_toTopOf": "parent",
                    "layout_constraintBottom_toBottomOf": "nobody"
                }
            ]
        }))
        .unwrap();
    let root = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap();
    let avatar = engine::find_view_by_id(root, "avatar").unwrap();
    let name = engine::find_view_by_id(root, "name").unwrap();

    assert_eq!(engine::dispatch_layout_pass(), 3);
    assert_eq!(engine::dispatch_layout_pass(), 0);

    let set = spark_inflate::engine::arrays::constraint::get_constraint_set(root);
    assert_eq!(set.connection(name, Side::Left).unwrap().target, ConstraintTarget::View(avatar));
    assert_eq!(set.connection(name, Side::Top).unwrap().target, ConstraintTarget::Parent);
    assert_eq!(set.connection(name, Side::Bottom).unwrap().target, ConstraintTarget::Parent);
}

#[test]
fn test_constraints_match_authored_sibling_text() {
    let context = setup();
    let layout = context
        .compile_layout(&json!({
            "type": "ConstraintLayout",
            "children": [
                {"type": "View", "background": "#f00"},
                {"type": "View", "layout_constraintTop_toBottomOf": "#f00"}
            ]
        }))
        .unwrap();
    let root = context.inflate(&layout, &ObjectValue::new(), None, None).unwrap();
    let children = engine::children(root);
    let (red, below) = (children[0], children[1]);

    engine::dispatch_layout_pass();

    let set = spark_inflate::engine::arrays::constraint::get_constraint_set(root);
    assert_eq!(set.connection(below, Side::Top).unwrap().target, ConstraintTarget::View(red));
}
