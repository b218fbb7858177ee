use std::fmt;
use std::str::FromStr;

/// Stable identifier of a gate in a [`Network`](crate::Network)
///
/// Identifiers are never reused by a network, so a handle to a deleted gate stays invalid.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct GateId {
    a: u32,
}

/// Stable identifier of a connection (wire) in a [`Network`](crate::Network)
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct WireId {
    a: u32,
}

impl GateId {
    /// Create a gate identifier from its raw index
    pub fn from_raw(a: u32) -> GateId {
        GateId { a }
    }

    /// Return the internal representation of the identifier
    pub fn raw(&self) -> u32 {
        self.a
    }
}

impl WireId {
    /// Create a wire identifier from its raw index
    pub fn from_raw(a: u32) -> WireId {
        WireId { a }
    }

    /// Return the internal representation of the identifier
    pub fn raw(&self) -> u32 {
        self.a
    }
}

/// Parse "g3", "G3" or "3" alike
fn parse_prefixed(s: &str, prefix: char) -> Result<u32, String> {
    let t = s.trim();
    let digits = t
        .strip_prefix(prefix)
        .or_else(|| t.strip_prefix(prefix.to_ascii_uppercase()))
        .unwrap_or(t);
    digits
        .parse::<u32>()
        .map_err(|_| format!("Invalid identifier {s:?}, expected {prefix}<number>"))
}

impl FromStr for GateId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, 'g').map(GateId::from_raw)
    }
}

impl FromStr for WireId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_prefixed(s, 'w').map(WireId::from_raw)
    }
}

impl fmt::Display for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.a)
    }
}

impl fmt::Debug for GateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.a)
    }
}

impl fmt::Debug for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        for v in 0u32..10u32 {
            assert_eq!(format!("{}", GateId::from_raw(v)), format!("g{v}"));
            assert_eq!(format!("{}", WireId::from_raw(v)), format!("w{v}"));
            assert_eq!(GateId::from_raw(v).raw(), v);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("g3".parse::<GateId>(), Ok(GateId::from_raw(3)));
        assert_eq!("G12".parse::<GateId>(), Ok(GateId::from_raw(12)));
        assert_eq!(" 7 ".parse::<GateId>(), Ok(GateId::from_raw(7)));
        assert_eq!("w4".parse::<WireId>(), Ok(WireId::from_raw(4)));
        assert!("w4".parse::<GateId>().is_err());
        assert!("gx".parse::<GateId>().is_err());
        assert!("".parse::<WireId>().is_err());
    }

    #[test]
    fn test_comparison() {
        assert_ne!(GateId::from_raw(0), GateId::from_raw(1));
        assert!(GateId::from_raw(0) < GateId::from_raw(1));
        assert_eq!(WireId::from_raw(2), WireId::from_raw(2));
    }
}
