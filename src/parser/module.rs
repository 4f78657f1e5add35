//! Modules - bundles of parsers registered together.

use std::rc::Rc;

use super::{RecyclerViewParser, RegistryBuilder};
use crate::adapter::AdapterProvider;

pub trait Module {
    fn register_with(&self, builder: &mut RegistryBuilder);
}

/// Registers a `RecyclerView` whose lists get their adapters from `provider`.
pub struct ListModule {
    provider: Rc<dyn AdapterProvider>,
}

impl ListModule {
    pub fn new(provider: impl AdapterProvider + 'static) -> Self {
        Self {
            provider: Rc::new(provider),
        }
    }
}

impl Module for ListModule {
    fn register_with(&self, builder: &mut RegistryBuilder) {
        builder.register(RecyclerViewParser::new(Some(self.provider.clone())));
    }
}
