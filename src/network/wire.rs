use std::fmt;

use crate::network::handle::{GateId, WireId};

/// A connection from the output of a gate to an input slot of another gate
///
/// Wires are immutable: they are created by connecting two gates and only disappear when removed.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Wire {
    id: WireId,
    source: GateId,
    destination: GateId,
    slot: usize,
}

impl Wire {
    pub(crate) fn new(id: WireId, source: GateId, destination: GateId, slot: usize) -> Wire {
        Wire {
            id,
            source,
            destination,
            slot,
        }
    }

    /// Identifier of the wire
    pub fn id(&self) -> WireId {
        self.id
    }

    /// Gate whose output feeds the wire
    pub fn source(&self) -> GateId {
        self.source
    }

    /// Gate receiving the value
    pub fn destination(&self) -> GateId {
        self.destination
    }

    /// Input slot of the destination filled by the wire
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Returns whether the gate is one of the endpoints
    pub fn touches(&self, gate: GateId) -> bool {
        self.source == gate || self.destination == gate
    }
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}[{}]",
            self.id, self.source, self.destination, self.slot
        )
    }
}
