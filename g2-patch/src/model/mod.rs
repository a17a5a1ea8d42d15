//! In-memory patch graph
//!
//! Ownership is a strict tree: a [`Patch`] owns its areas and settings, an
//! [`Area`] owns its modules and cables, a [`Module`] owns its ports and
//! parameters. Everything that points back up or across the tree (cables,
//! nets, knob/controller/morph bindings) does so by value through
//! [`PortRef`] and [`ParamRef`].

mod area;
mod module;
mod net;
mod param;
mod patch;
mod performance;
mod port;
mod settings;

pub use area::{Area, AreaId, Cable, CableFault};
pub use module::Module;
pub use net::{Net, NetList};
pub use param::{ParamRef, Parameter};
pub use patch::{Ctrl, Knob, Note, Patch, PatchDescription};
pub use performance::{NSLOTS, Performance, PerformanceDescription, Slot, SlotDescription};
pub use port::{Port, PortDirection, PortRef};
pub use settings::{
    DEFAULT_MORPH_LABELS, FIRST_GROUP_MODULE, MORPH_MODULE, Morph, MorphMap, Settings,
    SettingsParam,
};
