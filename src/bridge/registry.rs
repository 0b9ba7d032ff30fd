use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::bridge::module::NativeModule;
use crate::bridge::package::Package;
use crate::bridge::promise::{PendingResult, Promise};
use crate::config::BridgeConfig;
use crate::error::BridgeError;

/// Name and callable methods of one registered module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDescriptor {
    pub name: &'static str,
    pub methods: Vec<&'static str>,
}

/// Immutable name -> module table, built once from a package list.
#[derive(Clone, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<&'static str, Arc<dyn NativeModule>>,
}

impl ModuleRegistry {
    pub fn from_packages(
        packages: &[Box<dyn Package>],
        config: &BridgeConfig,
    ) -> Result<ModuleRegistry, BridgeError> {
        let mut registry = ModuleRegistry::default();
        for package in packages {
            for module in package.create_native_modules(config) {
                registry.register(module)?;
            }
        }
        Ok(registry)
    }

    pub fn register(&mut self, module: Arc<dyn NativeModule>) -> Result<(), BridgeError> {
        let name = module.name();
        if self.modules.contains_key(name) {
            return Err(BridgeError::DuplicateModule(name.to_string()));
        }
        log::debug!("registered native module {name}");
        self.modules.insert(name, module);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn NativeModule>> {
        self.modules.get(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules sorted by name.
    pub fn describe(&self) -> Vec<ModuleDescriptor> {
        self.modules
            .values()
            .map(|m| ModuleDescriptor { name: m.name(), methods: m.methods().to_vec() })
            .collect()
    }

    /// Runs `module.method(args)` on its own thread.
    ///
    /// Unknown modules and methods are rejected before any thread is spawned.
    pub fn invoke(&self, module: &str, method: &str, args: Vec<Value>) -> PendingResult {
        let (promise, pending) = Promise::channel();

        let target = match self.lookup(module, method) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("rejected call {module}.{method}: {e}");
                promise.reject(e);
                return pending;
            }
        };

        let method = method.to_string();
        std::thread::spawn(move || target.invoke(&method, &args, promise));
        pending
    }

    fn lookup(&self, module: &str, method: &str) -> Result<Arc<dyn NativeModule>, BridgeError> {
        let target = self
            .get(module)
            .ok_or_else(|| BridgeError::UnknownModule(module.to_string()))?;
        if !target.methods().iter().any(|m| *m == method) {
            return Err(BridgeError::UnknownMethod {
                module: module.to_string(),
                method: method.to_string(),
            });
        }
        Ok(Arc::clone(target))
    }
}
