//! FX and VOICE areas: modules, cables and the derived netlist

use std::fmt;
use std::sync::Arc;

use crate::catalog::ModuleType;
use crate::error::{G2Error, Result};
use crate::model::{Module, NetList, PortRef};

/// Area selector as stored in the 2-bit area fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AreaId {
    Fx = 0,
    Voice = 1,
    Settings = 2,
}

impl AreaId {
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            0 => Ok(AreaId::Fx),
            1 => Ok(AreaId::Voice),
            2 => Ok(AreaId::Settings),
            other => Err(G2Error::InvalidArea(other)),
        }
    }

    pub fn bits(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AreaId::Fx => "fx",
            AreaId::Voice => "voice",
            AreaId::Settings => "settings",
        })
    }
}

/// A cable as stored in the CableList section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cable {
    /// 3-bit display color
    pub color: u8,
    /// Output port, or an input port when two inputs are tied together
    pub source: PortRef,
    /// Always an input port
    pub dest: PortRef,
}

/// Why a cable does not fit the modules it names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CableFault {
    MissingSourceModule,
    MissingDestModule,
    BadSourceOutput,
    BadSourceInput,
    BadDestInput,
}

impl CableFault {
    pub fn reason(self) -> &'static str {
        match self {
            CableFault::MissingSourceModule => "source module does not exist",
            CableFault::MissingDestModule => "destination module does not exist",
            CableFault::BadSourceOutput => "source output index out of range",
            CableFault::BadSourceInput => "source input index out of range",
            CableFault::BadDestInput => "destination is not a valid input",
        }
    }
}

/// Modules and cables of one signal path
#[derive(Debug, Clone)]
pub struct Area {
    id: AreaId,
    modules: Vec<Module>,
    cables: Vec<Cable>,
    netlist: NetList,
}

impl Area {
    pub fn new(id: AreaId) -> Self {
        Self {
            id,
            modules: Vec::new(),
            cables: Vec::new(),
            netlist: NetList::new(),
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    /// Modules in stored order
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn modules_mut(&mut self) -> impl Iterator<Item = &mut Module> {
        self.modules.iter_mut()
    }

    pub fn cables(&self) -> &[Cable] {
        &self.cables
    }

    pub fn netlist(&self) -> &NetList {
        &self.netlist
    }

    pub fn find_module(&self, index: u8) -> Option<&Module> {
        self.modules.iter().find(|m| m.index() == index)
    }

    pub fn find_module_mut(&mut self, index: u8) -> Option<&mut Module> {
        self.modules.iter_mut().find(|m| m.index() == index)
    }

    /// First module carrying the given display name
    pub fn module_by_name(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name == name)
    }

    /// Place a new module at the lowest free index (indices start at 1)
    pub fn add_module(&mut self, module_type: Arc<ModuleType>) -> Result<&mut Module> {
        let index = (1..=u8::MAX)
            .find(|&i| self.find_module(i).is_none())
            .ok_or(G2Error::AreaFull)?;
        let slot = self.modules.len();
        self.modules.push(Module::new(module_type, index));
        Ok(&mut self.modules[slot])
    }

    /// Append a module exactly as decoded from a ModuleList section
    pub(crate) fn push_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    /// Check that a cable addresses existing ports
    pub fn check_cable(&self, source: PortRef, dest: PortRef) -> Result<(), CableFault> {
        let src_module = self
            .find_module(source.module)
            .ok_or(CableFault::MissingSourceModule)?;
        let dest_module = self
            .find_module(dest.module)
            .ok_or(CableFault::MissingDestModule)?;
        if src_module.port(source.direction, source.index).is_none() {
            return Err(if source.is_output() {
                CableFault::BadSourceOutput
            } else {
                CableFault::BadSourceInput
            });
        }
        if dest.is_output() || dest_module.port(dest.direction, dest.index).is_none() {
            return Err(CableFault::BadDestInput);
        }
        Ok(())
    }

    /// Add a validated cable and fold it into the netlist
    pub fn connect(&mut self, source: PortRef, dest: PortRef, color: u8) -> Result<()> {
        self.check_cable(source, dest)
            .map_err(|fault| G2Error::InvalidCable {
                source_port: source,
                dest,
                reason: fault.reason(),
            })?;
        self.push_cable(Cable {
            color,
            source,
            dest,
        })
    }

    /// Add a cable whose endpoints were already checked
    pub(crate) fn push_cable(&mut self, cable: Cable) -> Result<()> {
        self.netlist.add_connection(cable.source, cable.dest)?;
        let id = self.cables.len();
        for end in [cable.source, cable.dest] {
            if let Some(port) = self
                .find_module_mut(end.module)
                .and_then(|m| m.port_mut(end.direction, end.index))
            {
                port.attach(id);
            }
        }
        self.cables.push(cable);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ModuleCatalog, SignalRate};

    fn catalog() -> ModuleCatalog {
        ModuleCatalog::from_types([
            ModuleType::new(1, "Keyboard")
                .output("Pitch", SignalRate::Control)
                .output("Gate", SignalRate::Logic),
            ModuleType::new(2, "Mix2-1B")
                .input("In1", SignalRate::Audio)
                .input("In2", SignalRate::Audio)
                .output("Out", SignalRate::Audio)
                .param("Lev1", 100)
                .param("Lev2", 100),
        ])
    }

    #[test]
    fn test_area_bits() {
        assert_eq!(AreaId::from_bits(1).unwrap(), AreaId::Voice);
        assert_eq!(AreaId::Settings.bits(), 2);
        assert!(matches!(AreaId::from_bits(3), Err(G2Error::InvalidArea(3))));
    }

    #[test]
    fn test_add_module_indices() {
        let catalog = catalog();
        let mut area = Area::new(AreaId::Voice);
        let a = area.add_module(catalog.require(1).unwrap()).unwrap().index();
        let b = area.add_module(catalog.require(2).unwrap()).unwrap().index();
        assert_eq!((a, b), (1, 2));
        area.find_module_mut(2).unwrap().name = "Kbt".to_string();
        assert_eq!(area.module_by_name("Kbt").unwrap().type_id(), 2);
        assert!(area.module_by_name("Mix2-1B").is_none());
    }

    #[test]
    fn test_connect_builds_nets() {
        let catalog = catalog();
        let mut area = Area::new(AreaId::Voice);
        area.add_module(catalog.require(1).unwrap()).unwrap();
        area.add_module(catalog.require(2).unwrap()).unwrap();

        let kb = area.find_module(1).unwrap();
        let pitch = kb.output("Pitch").unwrap();
        let mix = area.find_module(2).unwrap();
        let (in1, in2) = (mix.input("In1").unwrap(), mix.input("In2").unwrap());

        area.connect(pitch, in1, 1).unwrap();
        area.connect(in1, in2, 1).unwrap();

        assert_eq!(area.cables().len(), 2);
        assert_eq!(area.netlist().len(), 1);
        let net = area.netlist().net_of(&in2).unwrap();
        assert_eq!(net.output, Some(pitch));
        assert_eq!(area.find_module(2).unwrap().inputs()[0].cables(), &[0, 1]);
        assert!(area.find_module(1).unwrap().outputs()[0].is_connected());
        assert!(!area.find_module(1).unwrap().outputs()[1].is_connected());
    }

    #[test]
    fn test_connect_rejects_bad_ports() {
        let catalog = catalog();
        let mut area = Area::new(AreaId::Fx);
        area.add_module(catalog.require(1).unwrap()).unwrap();
        area.add_module(catalog.require(2).unwrap()).unwrap();

        assert_eq!(
            area.check_cable(PortRef::output(1, 0), PortRef::input(2, 2)),
            Err(CableFault::BadDestInput)
        );
        assert_eq!(
            area.check_cable(PortRef::output(1, 5), PortRef::input(2, 0)),
            Err(CableFault::BadSourceOutput)
        );
        assert_eq!(
            area.check_cable(PortRef::input(1, 0), PortRef::input(2, 0)),
            Err(CableFault::BadSourceInput)
        );
        assert_eq!(
            area.check_cable(PortRef::output(9, 0), PortRef::input(2, 0)),
            Err(CableFault::MissingSourceModule)
        );
        assert!(matches!(
            area.connect(PortRef::output(1, 0), PortRef::output(2, 0), 0),
            Err(G2Error::InvalidCable { .. })
        ));
        assert!(area.cables().is_empty());
        assert!(area.netlist().is_empty());
    }
}
