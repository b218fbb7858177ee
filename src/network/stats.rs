//! Compute gate statistics
//!
//! ```
//! # use gatesim::Network;
//! # let net = Network::new();
//! use gatesim::network::stats::stats;
//! let stats = stats(&net);
//!
//! // Check that there is no Xor gate
//! assert_eq!(stats.nb_of(gatesim::GateKind::Xor), 0);
//!
//! // Show the statistics
//! println!("{}", stats);
//! ```

use std::fmt;

use crate::{GateKind, Network};

/// Number of gates of each kind, wires and free slots in a network
#[derive(Clone, Debug)]
pub struct NetworkStats {
    /// Number of gates of each kind, in palette order
    pub nb_by_kind: [usize; GateKind::NB_KINDS],
    /// Number of wires
    pub nb_wires: usize,
    /// Number of unconnected input slots, inputs excluded
    pub nb_free_slots: usize,
}

impl NetworkStats {
    /// Number of gates of a given kind
    pub fn nb_of(&self, kind: GateKind) -> usize {
        GateKind::ALL
            .iter()
            .position(|k| *k == kind)
            .map_or(0, |i| self.nb_by_kind[i])
    }

    /// Number of primary inputs
    pub fn nb_inputs(&self) -> usize {
        self.nb_of(GateKind::Input)
    }

    /// Number of primary outputs
    pub fn nb_outputs(&self) -> usize {
        self.nb_of(GateKind::Output)
    }

    /// Total number of gates, including inputs and outputs
    pub fn nb_gates(&self) -> usize {
        self.nb_by_kind.iter().sum()
    }
}

impl fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Stats:")?;
        writeln!(f, "  Inputs: {}", self.nb_inputs())?;
        writeln!(f, "  Outputs: {}", self.nb_outputs())?;
        writeln!(f, "  Gates: {}", self.nb_gates())?;
        for (kind, nb) in GateKind::ALL.iter().zip(self.nb_by_kind) {
            if nb != 0 && !kind.is_input() && !kind.is_output() {
                writeln!(f, "      {}: {}", kind, nb)?;
            }
        }
        writeln!(f, "  Wires: {}", self.nb_wires)?;
        if self.nb_free_slots != 0 {
            writeln!(f, "  Free slots: {}", self.nb_free_slots)?;
        }
        fmt::Result::Ok(())
    }
}

/// Compute the statistics of the network
pub fn stats(a: &Network) -> NetworkStats {
    let mut ret = NetworkStats {
        nb_by_kind: [0; GateKind::NB_KINDS],
        nb_wires: a.nb_wires(),
        nb_free_slots: 0,
    };
    for (_, g) in a.gates() {
        if let Some(i) = GateKind::ALL.iter().position(|k| *k == g.kind()) {
            ret.nb_by_kind[i] += 1;
        }
        if !g.kind().is_input() {
            ret.nb_free_slots += g.inputs().iter().filter(|s| s.is_none()).count();
        }
    }
    ret
}

#[cfg(test)]
mod tests {
    use super::stats;
    use crate::network::generators;
    use crate::GateKind;

    #[test]
    fn test_full_adder() {
        let s = stats(&generators::full_adder());
        assert_eq!(s.nb_inputs(), 3);
        assert_eq!(s.nb_outputs(), 2);
        assert_eq!(s.nb_of(GateKind::Xor), 2);
        assert_eq!(s.nb_of(GateKind::And), 2);
        assert_eq!(s.nb_of(GateKind::Or), 1);
        assert_eq!(s.nb_of(GateKind::Not), 0);
        assert_eq!(s.nb_gates(), 10);
        assert_eq!(s.nb_wires, 12);
        assert_eq!(s.nb_free_slots, 0);
        let txt = format!("{s}");
        assert!(txt.contains("  Inputs: 3\n"));
        assert!(txt.contains("      XOR: 2\n"));
        assert!(!txt.contains("Free slots"));
    }
}
