//! Parser registry - view types, their parent chain and their processors.
//!
//! Built once by [`RegistryBuilder::build`] and read-only afterwards.
//! Attribute names are interned to [`AttributeId`]s at build time; a type's
//! processor table holds only the attributes it declares itself, so lookups
//! walk the parent chain.

use std::collections::HashMap;
use std::rc::Rc;

use tracing::debug;

use super::module::Module;
use super::{
    ConstraintLayoutParser, LinearLayoutParser, RecyclerViewParser, TextViewParser,
    ViewGroupParser, ViewParser, ViewTypeParser,
};
use crate::error::{InflateError, Result};
use crate::inflater::InflateContext;
use crate::manager::{DataContext, Manager};
use crate::processor::{AttributeProcessor, ProcessorMap, Target};
use crate::types::Capabilities;
use crate::value::{AttributeId, Layout, Value};

/// Handle of a registered view type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewType(usize);

struct TypeEntry {
    parser: Rc<dyn ViewTypeParser>,
    parent: Option<ViewType>,
    /// Own capabilities plus every ancestor's.
    capabilities: Capabilities,
    processors: HashMap<AttributeId, Rc<dyn AttributeProcessor>>,
}

pub struct ParserRegistry {
    types: Vec<TypeEntry>,
    by_name: HashMap<String, ViewType>,
    attribute_ids: HashMap<Rc<str>, AttributeId>,
    attribute_names: Vec<Rc<str>>,
}

impl ParserRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Registry with the built-in types and no list adapter provider.
    pub fn with_defaults() -> Result<Self> {
        RegistryBuilder::new().with_defaults().build()
    }

    pub fn view_type(&self, name: &str) -> Option<ViewType> {
        self.by_name.get(name).copied()
    }

    pub fn type_name(&self, ty: ViewType) -> &str {
        self.types[ty.0].parser.type_name()
    }

    pub fn parser(&self, ty: ViewType) -> &Rc<dyn ViewTypeParser> {
        &self.types[ty.0].parser
    }

    pub fn parent(&self, ty: ViewType) -> Option<ViewType> {
        self.types[ty.0].parent
    }

    /// `ty` followed by its ancestors, nearest first.
    pub fn chain(&self, ty: ViewType) -> impl Iterator<Item = ViewType> + '_ {
        std::iter::successors(Some(ty), move |current| self.parent(*current))
    }

    pub fn capabilities(&self, ty: ViewType) -> Capabilities {
        self.types[ty.0].capabilities
    }

    /// Does `ty` equal or descend from the type named `ancestor`?
    pub fn is_subtype(&self, ty: ViewType, ancestor: &str) -> bool {
        self.chain(ty).any(|t| self.type_name(t) == ancestor)
    }

    pub fn attribute_id(&self, name: &str) -> Option<AttributeId> {
        self.attribute_ids.get(name).copied()
    }

    pub fn attribute_name(&self, id: AttributeId) -> Option<&Rc<str>> {
        self.attribute_names.get(id.index())
    }

    /// Processor for `id` on `ty`: the type's own, else the nearest ancestor's.
    pub fn processor(&self, ty: ViewType, id: AttributeId) -> Option<&Rc<dyn AttributeProcessor>> {
        self.chain(ty)
            .find_map(|t| self.types[t.0].processors.get(&id))
    }

    /// Resolve an attribute name for `ty`.
    pub fn resolve(&self, ty: ViewType, name: &str) -> Option<(AttributeId, &Rc<dyn AttributeProcessor>)> {
        let id = self.attribute_id(name)?;
        self.processor(ty, id).map(|processor| (id, processor))
    }

    pub(crate) fn create_manager(
        &self,
        context: &Rc<InflateContext>,
        ty: ViewType,
        view: usize,
        layout: &Rc<Layout>,
        data_context: DataContext,
    ) -> Manager {
        self.chain(ty)
            .find_map(|t| self.parser(t).create_manager(context, ty, view, layout, &data_context))
            .unwrap_or_else(|| Manager::new(context.clone(), ty, view, layout.clone(), data_context))
    }

    /// Let the nearest type in the chain that handles children build them.
    pub fn handle_children(&self, ty: ViewType, target: &Target<'_>, children: &Value) -> Result<bool> {
        for t in self.chain(ty) {
            if self.parser(t).handle_children(target, children)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn add_view(&self, ty: ViewType, parent: usize, child: usize) -> bool {
        self.chain(ty).any(|t| self.parser(t).add_view(parent, child))
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.types.iter().map(|entry| entry.parser.type_name())
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParserRegistry")
            .field("types", &self.type_names().collect::<Vec<_>>())
            .field("attributes", &self.attribute_names.len())
            .finish()
    }
}

// =============================================================================
// Builder
// =============================================================================

#[derive(Default)]
pub struct RegistryBuilder {
    parsers: Vec<Rc<dyn ViewTypeParser>>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parser. A parser with the same type name replaces the
    /// earlier one.
    pub fn register(&mut self, parser: impl ViewTypeParser + 'static) -> &mut Self {
        let parser: Rc<dyn ViewTypeParser> = Rc::new(parser);
        match self
            .parsers
            .iter_mut()
            .find(|existing| existing.type_name() == parser.type_name())
        {
            Some(existing) => *existing = parser,
            None => self.parsers.push(parser),
        }
        self
    }

    pub fn register_module(&mut self, module: &dyn Module) -> &mut Self {
        module.register_with(self);
        self
    }

    /// View, TextView, ViewGroup, LinearLayout, ConstraintLayout and
    /// RecyclerView (without an adapter provider).
    pub fn with_defaults(&mut self) -> &mut Self {
        self.register(ViewParser)
            .register(TextViewParser)
            .register(ViewGroupParser)
            .register(LinearLayoutParser)
            .register(ConstraintLayoutParser)
            .register(RecyclerViewParser::new(None))
    }

    pub fn build(&self) -> Result<ParserRegistry> {
        let by_name: HashMap<String, ViewType> = self
            .parsers
            .iter()
            .enumerate()
            .map(|(i, parser)| (parser.type_name().to_string(), ViewType(i)))
            .collect();

        let mut parents = Vec::with_capacity(self.parsers.len());
        for parser in &self.parsers {
            let parent = match parser.parent_type() {
                None => None,
                Some(name) => Some(*by_name.get(name).ok_or_else(|| {
                    InflateError::InvalidRegistry(format!(
                        "type '{}' names unknown parent type '{name}'",
                        parser.type_name()
                    ))
                })?),
            };
            parents.push(parent);
        }

        // A chain longer than the number of types revisits one of them.
        let mut capabilities = Vec::with_capacity(self.parsers.len());
        for (i, parser) in self.parsers.iter().enumerate() {
            let mut caps = Capabilities::NONE;
            let mut current = Some(i);
            let mut steps = 0;
            while let Some(t) = current {
                if steps > self.parsers.len() {
                    return Err(InflateError::InvalidRegistry(format!(
                        "parent chain of type '{}' is cyclic",
                        parser.type_name()
                    )));
                }
                caps |= self.parsers[t].capabilities();
                current = parents[t].map(|ViewType(p)| p);
                steps += 1;
            }
            capabilities.push(caps);
        }

        let mut attribute_ids: HashMap<Rc<str>, AttributeId> = HashMap::new();
        let mut attribute_names: Vec<Rc<str>> = Vec::new();
        let mut types = Vec::with_capacity(self.parsers.len());
        for ((parser, parent), capabilities) in self.parsers.iter().zip(parents).zip(capabilities) {
            let mut declared = ProcessorMap::new();
            parser.add_attribute_processors(&mut declared);

            let mut processors = HashMap::with_capacity(declared.len());
            for (name, processor) in declared.into_entries() {
                let id = match attribute_ids.get(name.as_str()) {
                    Some(id) => *id,
                    None => {
                        let id = AttributeId(attribute_names.len() as u32);
                        let name: Rc<str> = name.into();
                        attribute_names.push(name.clone());
                        attribute_ids.insert(name, id);
                        id
                    }
                };
                processors.insert(id, processor);
            }

            types.push(TypeEntry {
                parser: parser.clone(),
                parent,
                capabilities,
                processors,
            });
        }

        debug!(
            types = types.len(),
            attributes = attribute_names.len(),
            "parser registry built"
        );
        Ok(ParserRegistry {
            types,
            by_name,
            attribute_ids,
            attribute_names,
        })
    }
}
