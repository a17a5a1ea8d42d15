//! Module instances

use std::sync::Arc;

use crate::catalog::ModuleType;
use crate::model::{Parameter, Port, PortDirection, PortRef};

/// One module placed in an FX or VOICE area
#[derive(Debug, Clone)]
pub struct Module {
    module_type: Arc<ModuleType>,
    index: u8,
    pub horiz: u8,
    pub vert: u8,
    pub color: u8,
    pub uprate: bool,
    /// Mode settings (6-bit each)
    pub modes: Vec<u8>,
    pub name: String,
    pub params: Vec<Parameter>,
    /// Raw editor bytes stored in place of labels by the SeqNote module
    pub edit_modes: Option<Vec<u8>>,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
}

impl Module {
    /// Fresh module with ports, parameters and modes taken from its type
    pub fn new(module_type: Arc<ModuleType>, index: u8) -> Self {
        let inputs = module_type
            .inputs
            .iter()
            .enumerate()
            .map(|(i, p)| Port::new(PortDirection::Input, i as u8, p.rate))
            .collect();
        let outputs = module_type
            .outputs
            .iter()
            .enumerate()
            .map(|(i, p)| Port::new(PortDirection::Output, i as u8, p.rate))
            .collect();
        let params = module_type
            .params
            .iter()
            .enumerate()
            .map(|(i, p)| Parameter::new(i as u8, p.default))
            .collect();
        let modes = module_type.modes.iter().map(|m| m.default).collect();

        Self {
            name: module_type.name.clone(),
            module_type,
            index,
            horiz: 0,
            vert: 0,
            color: 0,
            uprate: false,
            modes,
            params,
            edit_modes: None,
            inputs,
            outputs,
        }
    }

    pub fn module_type(&self) -> &Arc<ModuleType> {
        &self.module_type
    }

    pub fn type_id(&self) -> u8 {
        self.module_type.id
    }

    /// Index within the area; the key every other section refers to
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    /// Port on either side, if the index exists
    pub fn port(&self, direction: PortDirection, index: u8) -> Option<&Port> {
        match direction {
            PortDirection::Input => self.inputs.get(index as usize),
            PortDirection::Output => self.outputs.get(index as usize),
        }
    }

    pub(crate) fn port_mut(&mut self, direction: PortDirection, index: u8) -> Option<&mut Port> {
        match direction {
            PortDirection::Input => self.inputs.get_mut(index as usize),
            PortDirection::Output => self.outputs.get_mut(index as usize),
        }
    }

    /// Reference to the named input port
    pub fn input(&self, name: &str) -> Option<PortRef> {
        let i = self.module_type.input_index(name)?;
        Some(PortRef::input(self.index, i as u8))
    }

    /// Reference to the named output port
    pub fn output(&self, name: &str) -> Option<PortRef> {
        let i = self.module_type.output_index(name)?;
        Some(PortRef::output(self.index, i as u8))
    }

    /// Parameter by name
    pub fn param(&self, name: &str) -> Option<&Parameter> {
        let i = self.module_type.param_index(name)?;
        self.params.get(i)
    }

    pub fn param_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        let i = self.module_type.param_index(name)?;
        self.params.get_mut(i)
    }
}
