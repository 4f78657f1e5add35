//! Widget Engine - the headless widget store.
//!
//! The engine stands in for the host toolkit's widget tree:
//! - Registry: index allocation, ordered children, ids, destroy callbacks
//! - Arrays: parallel property arrays written by attribute processors
//! - ManagerRegistry: the [`Manager`](crate::manager::Manager) of each widget
//! - LayoutPass: one-shot callbacks fired after the next layout pass
//!
//! # Architecture
//!
//! Widgets are NOT objects. They are indices into parallel arrays:
//!
//! ```text
//! Index 0: LinearLayout (parent=None, children=[1, 2], orientation=vertical)
//! Index 1: TextView     (parent=0, text="Orders", textSize=16)
//! Index 2: TextView     (parent=0, text="3 items")
//! ```
//!
//! All state is thread-local: widgets are created, updated and released on
//! the one thread that owns the UI.

mod layout_pass;
mod manager_registry;
mod registry;
pub mod arrays;

pub use layout_pass::*;
pub use manager_registry::*;
pub use registry::*;
