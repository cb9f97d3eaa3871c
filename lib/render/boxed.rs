//! Rectangular gate boxes, spanning one or more wires.

use itertools::Itertools;
use crate::quilldefs::{ BOX_WIDTH, BOX_WIDTH_WIDE };

/// A labeled input on the left edge of a multi-wire box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Port {
    /// The `k`-th target, at a position relative to the top of the box.
    Target(usize, usize),
    /// A control line passing through the box.
    Control(usize),
}

impl Port {
    fn rel(&self) -> usize {
        match self {
            Self::Target(rel, _) | Self::Control(rel) => *rel,
        }
    }

    fn to_typst(&self) -> String {
        match self {
            Self::Target(rel, k) => format!("(qubit: {}, label: \"{}\")", rel, k),
            Self::Control(rel) => format!("(qubit: {}, label: $bullet$)", rel),
        }
    }
}

/// Write a box spanning `n` wires.
///
/// A single-wire box is just its content. Otherwise the box is an `mqgate`
/// listing its ports, made wider when a port lands on the middle wire so that
/// the port label does not run into the content.
pub(crate) fn gate_box(content: &str, n: usize, ports: &[Port]) -> String {
    if n <= 1 { return content.to_string(); }
    let width =
        if n % 2 == 1 && ports.iter().any(|p| p.rel() == n / 2) {
            BOX_WIDTH_WIDE
        } else {
            BOX_WIDTH
        };
    format!(
        "mqgate({}, n: {}, inputs: ({}), width: {:.1}em)",
        content,
        n,
        ports.iter().map(Port::to_typst).join(", "),
        width,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_wire() {
        assert_eq!(gate_box("$H$", 1, &[Port::Target(0, 0)]), "$H$");
    }

    #[test]
    fn widths() {
        let ports = [Port::Target(0, 0), Port::Target(1, 1)];
        assert_eq!(
            gate_box("$R_(X X) (pi)$", 2, &ports),
            r#"mqgate($R_(X X) (pi)$, n: 2, inputs: ((qubit: 0, label: "0"), (qubit: 1, label: "1")), width: 5.0em)"#,
        );
        let ports = [Port::Target(0, 0), Port::Target(2, 1)];
        assert_eq!(
            gate_box("\"U\"", 3, &ports),
            r#"mqgate("U", n: 3, inputs: ((qubit: 0, label: "0"), (qubit: 2, label: "1")), width: 5.0em)"#,
        );
        let ports = [Port::Target(0, 0), Port::Target(2, 1), Port::Control(1)];
        assert_eq!(
            gate_box("\"U\"", 3, &ports),
            r#"mqgate("U", n: 3, inputs: ((qubit: 0, label: "0"), (qubit: 2, label: "1"), (qubit: 1, label: $bullet$)), width: 6.5em)"#,
        );
    }
}
