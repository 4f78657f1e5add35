//! # spark-inflate
//!
//! Server-driven layout inflation for Rust.
//!
//! A server sends a layout tree (JSON) and a data object. This crate turns
//! them into live widgets, applies every attribute, and keeps the widgets in
//! step with new data: bound attributes are re-applied and data-bound child
//! lists are reconciled against their collection.
//!
//! ## Architecture
//!
//! Widgets are indices into columnar arrays, not objects. Attribute
//! processors write into those arrays; the host reads them back.
//!
//! ```text
//! JSON ─► compile_layout ─► Layout ─► inflate ─► widget index + Manager
//!                                                     │
//!                    new data ─► Manager::update ◄────┘
//!                                  ├─ bound attributes re-applied
//!                                  └─ children updated or reconciled
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Host-facing values (Rgba, Dimension, Gravity, ...)
//! - [`value`] - The Value model, bindings, resources and layouts
//! - [`engine`] - Widget registry, parallel arrays, managers, layout pass
//! - [`processor`] - Attribute processors
//! - [`parser`] - View type parsers, registry and the children reconciler
//! - [`manager`] - Per-widget data context and update
//! - [`inflater`] - Inflation context, inflation and layout compilation
//! - [`adapter`] - List adapters
//! - [`resource`] - Resource lookup
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use spark_inflate::{InflateContext, ObjectValue, ParserRegistry, engine};
//!
//! let context = InflateContext::builder(ParserRegistry::with_defaults().unwrap()).build();
//! let layout = context
//!     .compile_layout(&json!({
//!         "type": "LinearLayout",
//!         "children": {"@": {"collection": "@{items}", "layout": {"type": "TextView", "text": "@{items[$index]}"}}}
//!     }))
//!     .unwrap();
//!
//! let list = context
//!     .inflate(&layout, &ObjectValue::from(json!({"items": ["a", "b"]})), None, None)
//!     .unwrap();
//! assert_eq!(engine::child_count(list), 2);
//!
//! let manager = engine::get_manager(list).unwrap();
//! manager.update(Some(&ObjectValue::from(json!({"items": ["a"]})))).unwrap();
//! assert_eq!(engine::child_count(list), 1);
//! ```

pub mod adapter;
pub mod config;
pub mod engine;
pub mod error;
pub mod inflater;
pub mod manager;
pub mod parser;
pub mod processor;
pub mod resource;
pub mod types;
pub mod value;

// Re-export commonly used items
pub use adapter::{AdapterProvider, LayoutAdapterProvider, LayoutListAdapter, ListAdapter};
pub use config::{DisplayMetrics, InflateConfig, UnknownAttributePolicy};
pub use error::{InflateError, Result};
pub use inflater::{InflateContext, InflateContextBuilder};
pub use manager::{BoundAttribute, DataContext, Manager};
pub use parser::{ListModule, Module, ParserRegistry, RegistryBuilder, ViewType, ViewTypeParser};
pub use processor::{AttributeProcessor, ProcessorMap, Target};
pub use resource::{NoResources, ResourceProvider, ResourceTable};
pub use value::{Binding, Layout, ObjectValue, Value, ValueKind, parse_literal};

pub use engine::{
    allocate_index, child_at, child_count, children, dispatch_layout_pass, find_view_by_id,
    get_manager, on_next_layout, parent_of, release_index, reset_engine,
};
