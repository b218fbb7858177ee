//! Network generators and templates
//!
//! All circuits are built through the regular network operations, so they are labeled and ordered
//! exactly as if a user had built them.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{GateId, GateKind, Network};

/// Connect two gates, which must have a free slot
fn wire(net: &mut Network, source: GateId, destination: GateId) {
    let w = net.connect(source, destination);
    assert!(w.is_some(), "Unable to connect {source} to {destination}");
}

/// Add a 2-input gate fed by two existing gates
fn gate2(net: &mut Network, kind: GateKind, a: GateId, b: GateId) -> GateId {
    let g = net.add_gate(kind);
    wire(net, a, g);
    wire(net, b, g);
    g
}

/// Add an output fed by an existing gate
fn output(net: &mut Network, a: GateId) -> GateId {
    let o = net.add_gate(GateKind::Output);
    wire(net, a, o);
    o
}

/// Names of the templates available through [`template`]
pub const TEMPLATES: [&str; 5] = [
    "half_adder",
    "full_adder",
    "xor_from_nand",
    "sr_latch",
    "adder4",
];

/// Build a template by name
pub fn template(name: &str) -> Option<Network> {
    match name {
        "half_adder" => Some(half_adder()),
        "full_adder" => Some(full_adder()),
        "xor_from_nand" => Some(xor_from_nand()),
        "sr_latch" => Some(sr_latch()),
        "adder4" => Some(ripple_carry_adder(4)),
        _ => None,
    }
}

/// Half adder: OUT1 is the sum, OUT2 the carry
pub fn half_adder() -> Network {
    let mut ret = Network::new();
    let a = ret.add_gate(GateKind::Input);
    let b = ret.add_gate(GateKind::Input);
    let s = gate2(&mut ret, GateKind::Xor, a, b);
    let c = gate2(&mut ret, GateKind::And, a, b);
    output(&mut ret, s);
    output(&mut ret, c);
    ret.check();
    ret
}

/// Full adder: IN3 is the carry in, OUT1 the sum, OUT2 the carry out
pub fn full_adder() -> Network {
    let mut ret = Network::new();
    let a = ret.add_gate(GateKind::Input);
    let b = ret.add_gate(GateKind::Input);
    let c = ret.add_gate(GateKind::Input);
    let x = gate2(&mut ret, GateKind::Xor, a, b);
    let s = gate2(&mut ret, GateKind::Xor, x, c);
    let g = gate2(&mut ret, GateKind::And, a, b);
    let p = gate2(&mut ret, GateKind::And, x, c);
    let co = gate2(&mut ret, GateKind::Or, g, p);
    output(&mut ret, s);
    output(&mut ret, co);
    ret.check();
    ret
}

/// Xor built from four Nand gates
pub fn xor_from_nand() -> Network {
    let mut ret = Network::new();
    let a = ret.add_gate(GateKind::Input);
    let b = ret.add_gate(GateKind::Input);
    let n = gate2(&mut ret, GateKind::Nand, a, b);
    let na = gate2(&mut ret, GateKind::Nand, a, n);
    let nb = gate2(&mut ret, GateKind::Nand, n, b);
    let x = gate2(&mut ret, GateKind::Nand, na, nb);
    output(&mut ret, x);
    ret.check();
    ret
}

/// Set-reset latch made of two cross-coupled Nor gates
///
/// IN1 is set, IN2 is reset, OUT1 is Q and OUT2 is !Q. The wiring contains a cycle.
pub fn sr_latch() -> Network {
    let mut ret = Network::new();
    let set = ret.add_gate(GateKind::Input);
    let reset = ret.add_gate(GateKind::Input);
    let q = ret.add_gate(GateKind::Nor);
    let qn = ret.add_gate(GateKind::Nor);
    wire(&mut ret, reset, q);
    wire(&mut ret, qn, q);
    wire(&mut ret, set, qn);
    wire(&mut ret, q, qn);
    output(&mut ret, q);
    output(&mut ret, qn);
    ret.check();
    ret
}

/// A simple ripple-carry adder
///
/// Inputs are the bits of the first operand, then the bits of the second, least significant first.
/// Outputs are the sum bits, least significant first, then the carry out.
pub fn ripple_carry_adder(len: usize) -> Network {
    assert!(len > 0);
    let mut ret = Network::new();
    let a: Vec<GateId> = (0..len).map(|_| ret.add_gate(GateKind::Input)).collect();
    let b: Vec<GateId> = (0..len).map(|_| ret.add_gate(GateKind::Input)).collect();
    let mut carry = None;
    for i in 0..len {
        let x = gate2(&mut ret, GateKind::Xor, a[i], b[i]);
        let g = gate2(&mut ret, GateKind::And, a[i], b[i]);
        match carry {
            None => {
                output(&mut ret, x);
                carry = Some(g);
            }
            Some(c) => {
                let s = gate2(&mut ret, GateKind::Xor, x, c);
                let p = gate2(&mut ret, GateKind::And, x, c);
                output(&mut ret, s);
                carry = Some(gate2(&mut ret, GateKind::Or, g, p));
            }
        }
    }
    if let Some(c) = carry {
        output(&mut ret, c);
    }
    ret.check();
    ret
}

/// A random network, for testing purposes
///
/// Inputs are created first, then the internal gates, then the outputs. Each internal gate slot
/// is connected to a random gate created before it, or to any gate if cycles are allowed.
pub fn random(
    nb_inputs: usize,
    nb_gates: usize,
    nb_outputs: usize,
    allow_cycles: bool,
    seed: u64,
) -> Network {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut ret = Network::new();
    let kinds = &GateKind::ALL[2..];
    for _ in 0..nb_inputs {
        ret.add_gate(GateKind::Input);
    }
    for _ in 0..nb_gates {
        ret.add_gate(kinds[rng.gen_range(0..kinds.len())]);
    }
    let ids = ret.gate_ids().to_vec();
    for (i, g) in ids.iter().enumerate().skip(nb_inputs) {
        let nb_candidates = if allow_cycles { ids.len() } else { i };
        if nb_candidates == 0 {
            continue;
        }
        for _ in 0..ret.gate(*g).arity() {
            let s = ids[rng.gen_range(0..nb_candidates)];
            // Self-connections are rejected and simply leave the slot free
            ret.connect(s, *g);
        }
    }
    for _ in 0..nb_outputs {
        let o = ret.add_gate(GateKind::Output);
        if !ids.is_empty() {
            let s = ids[rng.gen_range(0..ids.len())];
            ret.connect(s, o);
        }
    }
    ret.check();
    ret
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::simulate;
    use crate::truth_table::truth_table;

    #[test]
    fn test_half_adder() {
        let net = half_adder();
        for i in 0..4 {
            let a = i & 2 != 0;
            let b = i & 1 != 0;
            assert_eq!(simulate(&net, &[a, b]), vec![a ^ b, a & b]);
        }
    }

    #[test]
    fn test_full_adder() {
        let mut net = full_adder();
        let t = truth_table(&mut net).unwrap();
        assert_eq!(t.headers(), &["IN1", "IN2", "IN3", "OUT1", "OUT2"]);
        for (r, row) in t.rows().iter().enumerate() {
            let total = r.count_ones() as usize;
            assert_eq!(row[3], total & 1 != 0);
            assert_eq!(row[4], total >= 2);
        }
    }

    #[test]
    fn test_xor_from_nand() {
        let mut net = xor_from_nand();
        let t = truth_table(&mut net).unwrap();
        let outs: Vec<bool> = t.rows().iter().map(|r| r[2]).collect();
        assert_eq!(outs, vec![false, true, true, false]);
    }

    #[test]
    fn test_sr_latch() {
        let mut net = sr_latch();
        let ins = net.inputs();
        let outs = net.outputs();
        let (set, reset) = (ins[0], ins[1]);
        let (q, qn) = (outs[0], outs[1]);

        net.toggle(set);
        assert_eq!(net.value(q), Some(true));
        assert_eq!(net.value(qn), Some(false));
        net.toggle(set);
        // Memorized
        assert_eq!(net.value(q), Some(true));
        assert_eq!(net.value(qn), Some(false));
        net.toggle(reset);
        assert_eq!(net.value(q), Some(false));
        assert_eq!(net.value(qn), Some(true));
        net.toggle(reset);
        assert_eq!(net.value(q), Some(false));
        assert_eq!(net.value(qn), Some(true));
    }

    #[test]
    fn test_ripple_carry_adder() {
        for len in 1..4 {
            let net = ripple_carry_adder(len);
            assert_eq!(net.inputs().len(), 2 * len);
            assert_eq!(net.outputs().len(), len + 1);
            for a in 0..(1usize << len) {
                for b in 0..(1usize << len) {
                    let mut pattern = Vec::new();
                    for i in 0..len {
                        pattern.push(a >> i & 1 != 0);
                    }
                    for i in 0..len {
                        pattern.push(b >> i & 1 != 0);
                    }
                    let res = simulate(&net, &pattern)
                        .iter()
                        .enumerate()
                        .fold(0usize, |acc, (i, v)| acc | (*v as usize) << i);
                    assert_eq!(res, a + b);
                }
            }
        }
    }

    #[test]
    fn test_templates() {
        for name in TEMPLATES {
            let net = template(name).unwrap();
            net.check();
            assert!(!net.inputs().is_empty());
            assert!(!net.outputs().is_empty());
        }
        assert!(template("mux").is_none());
    }

    #[test]
    fn test_random() {
        for seed in 0..10 {
            let net = random(3, 10, 2, seed % 2 == 0, seed);
            assert_eq!(net.inputs().len(), 3);
            assert_eq!(net.outputs().len(), 2);
            assert_eq!(net.nb_gates(), 15);
            let other = random(3, 10, 2, seed % 2 == 0, seed);
            assert_eq!(format!("{net}"), format!("{other}"));
        }
    }
}
