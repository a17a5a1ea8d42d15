//! Module type catalog
//!
//! The codec does not know the G2 module types by itself. Port, parameter and
//! mode layouts are supplied by a read-only [`ModuleCatalog`] keyed by the
//! numeric type ID stored in the ModuleList section.
//!
//! # TOML layout
//!
//! ```toml
//! [[module]]
//! id = 7
//! name = "OscB"
//! height = 5
//! inputs = [{ name = "Pitch", rate = "control" }, { name = "Sync", rate = "audio" }]
//! outputs = [{ name = "Out", rate = "audio" }]
//! params = [{ name = "Coarse", default = 64 }, { name = "Fine", default = 64 }]
//! modes = []
//! ```

use std::path::Path;
use std::sync::Arc;

use hashbrown::HashMap;
use serde::Deserialize;

use crate::error::{G2Error, Result};

/// Signal classification of a port (drives cable compatibility and colors)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalRate {
    /// Red connectors
    #[default]
    Audio,
    /// Blue connectors
    Control,
    /// Yellow connectors
    Logic,
}

/// Port declaration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PortType {
    pub name: String,
    #[serde(default)]
    pub rate: SignalRate,
}

/// Parameter or mode declaration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueType {
    pub name: String,
    #[serde(default)]
    pub default: u8,
}

/// Static description of one module type
#[derive(Debug, Clone, Deserialize)]
pub struct ModuleType {
    pub id: u8,
    /// Short name as shown on the module
    pub name: String,
    #[serde(default)]
    pub height: u8,
    #[serde(default)]
    pub inputs: Vec<PortType>,
    #[serde(default)]
    pub outputs: Vec<PortType>,
    #[serde(default)]
    pub params: Vec<ValueType>,
    #[serde(default)]
    pub modes: Vec<ValueType>,

    #[serde(skip)]
    slots: Slots,
}

/// Name -> index lookups, built once when the type enters a catalog
#[derive(Debug, Clone, Default)]
struct Slots {
    inputs: HashMap<String, usize>,
    outputs: HashMap<String, usize>,
    params: HashMap<String, usize>,
}

impl ModuleType {
    pub fn new(id: u8, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            height: 1,
            inputs: Vec::new(),
            outputs: Vec::new(),
            params: Vec::new(),
            modes: Vec::new(),
            slots: Slots::default(),
        }
    }

    pub fn height(mut self, height: u8) -> Self {
        self.height = height;
        self
    }

    pub fn input(mut self, name: impl Into<String>, rate: SignalRate) -> Self {
        self.inputs.push(PortType {
            name: name.into(),
            rate,
        });
        self
    }

    pub fn output(mut self, name: impl Into<String>, rate: SignalRate) -> Self {
        self.outputs.push(PortType {
            name: name.into(),
            rate,
        });
        self
    }

    pub fn param(mut self, name: impl Into<String>, default: u8) -> Self {
        self.params.push(ValueType {
            name: name.into(),
            default,
        });
        self
    }

    pub fn mode(mut self, name: impl Into<String>, default: u8) -> Self {
        self.modes.push(ValueType {
            name: name.into(),
            default,
        });
        self
    }

    /// Index of the named parameter
    pub fn param_index(&self, name: &str) -> Option<usize> {
        self.slots.params.get(name).copied()
    }

    /// Index of the named input port
    pub fn input_index(&self, name: &str) -> Option<usize> {
        self.slots.inputs.get(name).copied()
    }

    /// Index of the named output port
    pub fn output_index(&self, name: &str) -> Option<usize> {
        self.slots.outputs.get(name).copied()
    }

    fn build_slots(&mut self) {
        fn index<'a>(names: impl Iterator<Item = &'a String>) -> HashMap<String, usize> {
            names.enumerate().map(|(i, n)| (n.clone(), i)).collect()
        }
        self.slots = Slots {
            inputs: index(self.inputs.iter().map(|p| &p.name)),
            outputs: index(self.outputs.iter().map(|p| &p.name)),
            params: index(self.params.iter().map(|p| &p.name)),
        };
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "module")]
    modules: Vec<ModuleType>,
}

/// Read-only table of module types keyed by type ID
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    by_id: HashMap<u8, Arc<ModuleType>>,
    by_name: HashMap<String, u8>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from type declarations
    pub fn from_types(types: impl IntoIterator<Item = ModuleType>) -> Self {
        let mut catalog = Self::new();
        for module_type in types {
            catalog.insert(module_type);
        }
        catalog
    }

    /// Parse a catalog from its TOML representation
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Ok(Self::from_types(file.modules))
    }

    /// Load a catalog from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        std::fs::read_to_string(path)
            .map_err(G2Error::from)
            .and_then(|text| Self::from_toml_str(&text))
            .map_err(|e| e.in_file(path))
    }

    /// Add a type, replacing any previous type with the same ID
    pub fn insert(&mut self, mut module_type: ModuleType) {
        module_type.build_slots();
        if let Some(old) = self.by_id.get(&module_type.id) {
            self.by_name.remove(&old.name);
        }
        self.by_name.insert(module_type.name.clone(), module_type.id);
        self.by_id.insert(module_type.id, Arc::new(module_type));
    }

    /// Look up a type by numeric ID
    pub fn get(&self, id: u8) -> Option<&Arc<ModuleType>> {
        self.by_id.get(&id)
    }

    /// Look up a type by ID, failing for IDs the catalog does not know
    pub fn require(&self, id: u8) -> Result<Arc<ModuleType>> {
        self.get(id).cloned().ok_or(G2Error::UnknownModuleType(id))
    }

    /// Look up a type by short name
    pub fn by_name(&self, name: &str) -> Option<&Arc<ModuleType>> {
        self.by_name.get(name).and_then(|id| self.by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"
[[module]]
id = 7
name = "OscB"
height = 5
inputs = [{ name = "Pitch", rate = "control" }, { name = "Sync" }]
outputs = [{ name = "Out", rate = "audio" }]
params = [{ name = "Coarse", default = 64 }, { name = "Fine", default = 64 }, { name = "Kbt" }]
modes = [{ name = "Waveform", default = 2 }]

[[module]]
id = 4
name = "2-Out"
inputs = [{ name = "InL" }, { name = "InR" }]
"#;

    #[test]
    fn test_load_toml() {
        let catalog = ModuleCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let osc = catalog.get(7).unwrap();
        assert_eq!(osc.name, "OscB");
        assert_eq!(osc.height, 5);
        assert_eq!(osc.inputs[0].rate, SignalRate::Control);
        assert_eq!(osc.inputs[1].rate, SignalRate::Audio);
        assert_eq!(osc.params[2].default, 0);
        assert_eq!(osc.modes[0].default, 2);
        assert_eq!(osc.param_index("Fine"), Some(1));
        assert_eq!(osc.input_index("Sync"), Some(1));
        assert_eq!(osc.output_index("Out"), Some(0));
        assert_eq!(osc.param_index("Nope"), None);

        assert_eq!(catalog.by_name("2-Out").unwrap().id, 4);
        assert!(matches!(catalog.require(99), Err(G2Error::UnknownModuleType(99))));
    }

    #[test]
    fn test_bad_toml() {
        let err = ModuleCatalog::from_toml_str("[[module]]\nname = 3").unwrap_err();
        assert!(matches!(err, G2Error::Catalog(_)));
    }

    #[test]
    fn test_insert_replaces_by_id() {
        let mut catalog = ModuleCatalog::from_types([ModuleType::new(1, "Keyboard")]);
        catalog.insert(ModuleType::new(1, "Keyb").param("Mode", 0));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.by_name("Keyboard").is_none());
        assert_eq!(catalog.by_name("Keyb").unwrap().param_index("Mode"), Some(0));
    }
}
