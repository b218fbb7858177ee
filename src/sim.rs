//! Evaluation of a logic network
//!
//! Evaluation is not topological: every gate is evaluated in creation order, with a fresh depth-first
//! traversal of the gates driving it. This is quadratic in the worst case, which is fine for small
//! interactive circuits, and always terminates even when the wiring contains cycles.

mod recursive_sim;

use log::trace;

use crate::{GateId, Network};

pub use recursive_sim::RecursiveSimulator;

/// Evaluate every gate of the network, in creation order
pub fn evaluate_all(net: &mut Network) {
    let order = net.gate_ids().to_vec();
    let mut sim = RecursiveSimulator::new(net);
    for id in order {
        sim.reset();
        let v = sim.run(id);
        trace!("Evaluated {id} to {}", v as u8);
    }
}

/// Evaluate a gate and the gates driving it; return its value, or None if it doesn't exist
pub fn evaluate_from(net: &mut Network, id: GateId) -> Option<bool> {
    if !net.contains(id) {
        return None;
    }
    let mut sim = RecursiveSimulator::new(net);
    Some(sim.run(id))
}

/// Simulate the network for the given input values; return the output values
///
/// Input and output values are given in creation order. The network itself is left untouched.
/// Panics if the number of values doesn't match the number of inputs.
pub fn simulate(net: &Network, input_values: &[bool]) -> Vec<bool> {
    let inputs = net.inputs();
    assert_eq!(inputs.len(), input_values.len());
    let mut n = net.clone();
    for (id, v) in inputs.iter().zip(input_values) {
        n.set_input(*id, *v);
    }
    n.evaluate_all();
    n.outputs()
        .iter()
        .map(|o| n.value(*o).unwrap_or(false))
        .collect()
}
