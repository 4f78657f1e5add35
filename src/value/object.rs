//! String-keyed mapping of values. Entry order carries no meaning.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use super::{Binding, Layout, Value};

/// Reference-counted object. Cloning shares the entries; mutation copies on
/// write, so a DataContext can hand its data to every child cheaply.
#[derive(Clone, Default, PartialEq)]
pub struct ObjectValue {
    entries: Rc<HashMap<String, Value>>,
}

impl ObjectValue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn get_binding(&self, key: &str) -> Option<&Rc<Binding>> {
        self.get(key).and_then(Value::as_binding)
    }

    pub fn get_layout(&self, key: &str) -> Option<&Rc<Layout>> {
        self.get(key).and_then(Value::as_layout)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        Rc::make_mut(&mut self.entries).insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        Rc::make_mut(&mut self.entries).remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True when both handles share the same entries.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ObjectValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: Rc::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}
