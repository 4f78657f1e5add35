//! Core Arrays
//!
//! Identity and tree structure:
//! - viewType: registered type name that created the widget
//! - capabilities: what the widget can do (container, text, ...)
//! - parentIndex / children: the widget tree, children in order
//! - viewId: author-assigned id
//! - visibility, enabled, tag, contentDescription

use crate::types::{Capabilities, Visibility};

property_arrays! {
    /// Type name of the widget ("" when unallocated).
    VIEW_TYPE: String = String::new() => get_view_type, set_view_type;

    CAPABILITIES: Capabilities = Capabilities::NONE => get_capabilities, set_capabilities;

    /// Parent index (None for roots and detached widgets).
    PARENT_INDEX: Option<usize> = None => get_parent_index, set_parent_index;

    /// Children in order. Edit through the registry's tree functions.
    CHILDREN: Vec<usize> = Vec::new() => get_children, set_children;

    VIEW_ID: Option<String> = None => get_view_id, set_view_id;

    VISIBILITY: Visibility = Visibility::Visible => get_visibility, set_visibility;

    ENABLED: bool = true => get_enabled, set_enabled;

    TAG: Option<String> = None => get_tag, set_tag;

    CONTENT_DESCRIPTION: Option<String> = None => get_content_description, set_content_description;
}

pub fn get_child_count(index: usize) -> usize {
    CHILDREN.with(|arr| arr.read(index, Vec::len))
}

pub fn get_child_at(index: usize, position: usize) -> Option<usize> {
    CHILDREN.with(|arr| arr.read(index, |children| children.get(position).copied()))
}

pub(crate) fn push_child(index: usize, child: usize) {
    CHILDREN.with(|arr| arr.update(index, |children| children.push(child)));
}

/// Remove `child` from the list of `index`. Returns its former position.
pub(crate) fn remove_child(index: usize, child: usize) -> Option<usize> {
    CHILDREN.with(|arr| {
        arr.update(index, |children| {
            let position = children.iter().position(|&c| c == child)?;
            children.remove(position);
            Some(position)
        })
    })
}

pub fn has_capability(index: usize, capability: Capabilities) -> bool {
    get_capabilities(index).contains(capability)
}
