//! Constraint Arrays
//!
//! Each constraint container owns a [`ConstraintSet`]: the relations and
//! biases of its children. Relations are added by deferred layout-pass
//! callbacks once sibling references can be resolved.

use std::collections::HashMap;

use crate::types::Side;

/// The other end of a relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintTarget {
    /// The container itself.
    Parent,
    View(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub view: usize,
    pub start_side: Side,
    pub target: ConstraintTarget,
    pub end_side: Side,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    connections: Vec<Connection>,
    horizontal_bias: HashMap<usize, f32>,
    vertical_bias: HashMap<usize, f32>,
}

impl ConstraintSet {
    /// Connect `start_side` of `view` to `end_side` of `target`, replacing
    /// any earlier relation on the same side of `view`.
    pub fn connect(&mut self, view: usize, start_side: Side, target: ConstraintTarget, end_side: Side) {
        let connection = Connection {
            view,
            start_side,
            target,
            end_side,
        };
        match self
            .connections
            .iter_mut()
            .find(|c| c.view == view && c.start_side == start_side)
        {
            Some(existing) => *existing = connection,
            None => self.connections.push(connection),
        }
    }

    pub fn connection(&self, view: usize, start_side: Side) -> Option<Connection> {
        self.connections
            .iter()
            .find(|c| c.view == view && c.start_side == start_side)
            .copied()
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn set_horizontal_bias(&mut self, view: usize, bias: f32) {
        self.horizontal_bias.insert(view, bias);
    }

    pub fn set_vertical_bias(&mut self, view: usize, bias: f32) {
        self.vertical_bias.insert(view, bias);
    }

    pub fn horizontal_bias(&self, view: usize) -> Option<f32> {
        self.horizontal_bias.get(&view).copied()
    }

    pub fn vertical_bias(&self, view: usize) -> Option<f32> {
        self.vertical_bias.get(&view).copied()
    }

    /// Drop every relation and bias involving `view`.
    pub fn forget(&mut self, view: usize) {
        self.connections
            .retain(|c| c.view != view && c.target != ConstraintTarget::View(view));
        self.horizontal_bias.remove(&view);
        self.vertical_bias.remove(&view);
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty() && self.horizontal_bias.is_empty() && self.vertical_bias.is_empty()
    }
}

property_arrays! {
    CONSTRAINT_SET: ConstraintSet = ConstraintSet::default() => get_constraint_set, set_constraint_set;
}

/// Edit the constraint set of container `index` in place.
pub fn update_constraint_set<R>(index: usize, f: impl FnOnce(&mut ConstraintSet) -> R) -> R {
    CONSTRAINT_SET.with(|arr| arr.update(index, f))
}
