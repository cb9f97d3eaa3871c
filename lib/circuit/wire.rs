use std::fmt;
use rustc_hash::FxHashMap;
use serde::{ Deserialize, Serialize };

/// Whether a wire carries a qubit or a classical bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireKind {
    Quantum,
    Classical,
}

/// Identifies a wire in a circuit.
///
/// Indices are circuit-global within each kind: `Qubit(3)` is the fourth qubit
/// counting across all quantum registers in declaration order.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum WireId {
    Qubit(usize),
    Clbit(usize),
}

impl WireId {
    /// Return `true` if `self` is `Qubit`.
    pub fn is_qubit(&self) -> bool { matches!(self, Self::Qubit(_)) }

    /// Return `true` if `self` is `Clbit`.
    pub fn is_clbit(&self) -> bool { matches!(self, Self::Clbit(_)) }

    /// Return the kind of wire.
    pub fn kind(&self) -> WireKind {
        match self {
            Self::Qubit(_) => WireKind::Quantum,
            Self::Clbit(_) => WireKind::Classical,
        }
    }

    /// Return the inner index.
    pub fn index(&self) -> usize {
        match self {
            Self::Qubit(k) | Self::Clbit(k) => *k,
        }
    }
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Qubit(k) => write!(f, "qubit {}", k),
            Self::Clbit(k) => write!(f, "clbit {}", k),
        }
    }
}

/// A named, sized group of wires of a single kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    pub name: String,
    pub size: usize,
}

impl Register {
    pub fn new<S>(name: S, size: usize) -> Self
    where S: Into<String>
    {
        Self { name: name.into(), size }
    }
}

/// A single wire in canonical order, along with its register membership.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Wire<'a> {
    /// Circuit-global identifier.
    pub id: WireId,
    /// Register holding the wire.
    pub register: &'a Register,
    /// Position of the wire inside `register`.
    pub index: usize,
    /// Absolute position of the wire in the diagram, from the top.
    pub abs: usize,
}

impl<'a> Wire<'a> {
    pub fn kind(&self) -> WireKind { self.id.kind() }
}

/// Maps wires to their absolute positions in a diagram.
///
/// All qubits come first, in register order, followed by all classical bits.
#[derive(Clone, Debug, Default)]
pub struct WireIndex {
    pub(crate) num_qubits: usize,
    pub(crate) num_clbits: usize,
    // position of each classical bit inside its own register
    pub(crate) clbit_pos: Vec<usize>,
    // classical register name -> (first clbit, size)
    pub(crate) cregs: FxHashMap<String, (usize, usize)>,
}

impl WireIndex {
    pub(crate) fn new<'a, I>(num_qubits: usize, cregs: I) -> Self
    where I: IntoIterator<Item = &'a Register>
    {
        let mut clbit_pos: Vec<usize> = Vec::new();
        let mut creg_map: FxHashMap<String, (usize, usize)> =
            FxHashMap::default();
        for reg in cregs.into_iter() {
            creg_map.entry(reg.name.clone())
                .or_insert((clbit_pos.len(), reg.size));
            clbit_pos.extend(0..reg.size);
        }
        Self {
            num_qubits,
            num_clbits: clbit_pos.len(),
            clbit_pos,
            cregs: creg_map,
        }
    }

    /// Return the number of wires.
    pub fn len(&self) -> usize { self.num_qubits + self.num_clbits }

    /// Return `true` if there are no wires.
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Return the number of qubit wires.
    pub fn num_qubits(&self) -> usize { self.num_qubits }

    /// Return the number of classical wires.
    pub fn num_clbits(&self) -> usize { self.num_clbits }

    /// Return the absolute position of a wire, if it exists.
    pub fn abs(&self, id: WireId) -> Option<usize> {
        match id {
            WireId::Qubit(k) if k < self.num_qubits => Some(k),
            WireId::Clbit(k) if k < self.num_clbits => Some(self.num_qubits + k),
            _ => None,
        }
    }

    /// Return the wire at an absolute position, if it exists.
    pub fn id_at(&self, abs: usize) -> Option<WireId> {
        if abs < self.num_qubits {
            Some(WireId::Qubit(abs))
        } else if abs < self.len() {
            Some(WireId::Clbit(abs - self.num_qubits))
        } else {
            None
        }
    }

    /// Iterate over all wires in canonical order.
    pub fn ids(&self) -> impl Iterator<Item = WireId> + '_ {
        (0..self.len()).filter_map(|abs| self.id_at(abs))
    }

    /// Return the position of a classical bit inside its own register.
    pub fn clbit_position(&self, clbit: usize) -> Option<usize> {
        self.clbit_pos.get(clbit).copied()
    }

    /// Return the first classical bit and size of a classical register.
    pub fn creg(&self, name: &str) -> Option<(usize, usize)> {
        self.cregs.get(name).copied()
    }
}
