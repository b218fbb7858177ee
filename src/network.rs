//! Representation and handling of logic networks

mod gates;
pub mod generators;
mod handle;
mod network;
pub mod stats;
mod wire;

pub use gates::{Gate, GateKind};
pub use handle::{GateId, WireId};
pub use network::{Network, Undone};
pub use wire::Wire;
