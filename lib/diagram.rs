//! Full drawing pipeline: validation, column packing, per-operation rendering,
//! and assembly into a grid.
//!
//! ```
//! # use quill_draw::{ Circuit, DrawOptions };
//! let mut circuit = Circuit::with_size(2, 0);
//! circuit.h(0).cx(0, 1);
//! let typst = circuit.draw(&DrawOptions::default()).unwrap();
//! assert_eq!(
//!     typst,
//!     r"#quantum-circuit(lstick($ket(q_(0))$),$H$,ctrl(1),1,[\ ],lstick($ket(q_(1))$),1,targ(),1)",
//! );
//! ```

use thiserror::Error;
use tracing::{ debug, instrument };
use crate::{
    circuit::{ Circuit, CircuitError, Condition, Operation, WireId, WireIndex },
    grid::{ Grid, Markup },
    layer::{ Layers, Span },
    render::{ Fragments, RenderError, Renderer, SymbolTable },
};

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("invalid circuit: {0}")]
    Circuit(#[from] CircuitError),

    #[error("rendering error: {0}")]
    Render(#[from] RenderError),
}
pub type DrawResult<T> = Result<T, DrawError>;

/// Settings for [`draw`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawOptions {
    /// Write `#quantum-circuit(...)` rather than `quantum-circuit(...)`.
    pub leading_hash: bool,
    /// Prepend `#import` lines for the `physica` and `quill` packages.
    ///
    /// Independent of `leading_hash`.
    pub imports: bool,
    /// Gate symbols.
    pub symbols: SymbolTable,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self { leading_hash: true, imports: false, symbols: SymbolTable::default() }
    }
}

impl DrawOptions {
    /// Set `leading_hash`.
    pub fn leading_hash(mut self, leading_hash: bool) -> Self {
        self.leading_hash = leading_hash;
        self
    }

    /// Set `imports`.
    pub fn imports(mut self, imports: bool) -> Self {
        self.imports = imports;
        self
    }

    /// Replace the symbol table.
    pub fn symbols(mut self, symbols: SymbolTable) -> Self {
        self.symbols = symbols;
        self
    }

    pub fn markup(&self) -> Markup {
        Markup { leading_hash: self.leading_hash, imports: self.imports }
    }
}

/// Range of wire positions occupied by an operation in its column.
///
/// This covers every operand and, for a conditioned operation, the classical
/// wire its condition is drawn on. A barrier writes to every wire and so
/// covers the whole diagram.
pub fn footprint(index: &WireIndex, op: &Operation) -> Option<Span> {
    if op.is_barrier() {
        return (!index.is_empty()).then(|| Span::new(0, index.len() - 1));
    }
    let anchor =
        op.condition.as_ref()
        .and_then(|cond| match cond {
            Condition::Bit { clbit, .. } => Some(*clbit),
            Condition::Register { register, .. } => {
                index.creg(register).map(|(first, _)| first)
            },
        })
        .and_then(|clbit| index.abs(WireId::Clbit(clbit)));
    Span::covering(
        op.operands.iter()
            .filter_map(|id| index.abs(*id))
            .chain(anchor)
    )
}

/// A fully laid-out circuit diagram.
#[derive(Clone, Debug)]
pub struct Diagram {
    layers: Layers,
    fragments: Vec<Fragments>,
    grid: Grid,
}

impl Diagram {
    /// Lay out a circuit.
    pub fn build(circuit: &Circuit, symbols: &SymbolTable) -> DrawResult<Self> {
        circuit.validate()?;
        let index = circuit.wire_index();
        let spans: Vec<Span> =
            circuit.ops().iter().enumerate()
            .map(|(k, op)| {
                footprint(&index, op)
                    .ok_or_else(|| CircuitError::EmptyOperands(op.at(k)))
            })
            .collect::<Result<_, _>>()?;
        let layers = Layers::build(&spans);

        let renderer = Renderer::new(&index, symbols);
        let fragments: Vec<Fragments> =
            circuit.ops().iter().enumerate()
            .map(|(k, op)| renderer.render(k, op))
            .collect::<Result<_, _>>()?;

        let mut grid = Grid::new(circuit.wires(), layers.num_layers());
        for (frags, d) in fragments.iter().zip(layers.depths()) {
            for (id, instr) in frags.iter() {
                if let Some(w) = index.abs(*id) {
                    grid.place(w, *d, instr.as_str());
                }
            }
        }
        debug!(
            "laid out {} wires x {} columns",
            grid.num_wires(), grid.depth(),
        );
        Ok(Self { layers, fragments, grid })
    }

    /// Return the column assignment of every operation.
    pub fn layers(&self) -> &Layers { &self.layers }

    /// Return the instructions produced by each operation, in circuit order.
    pub fn fragments(&self) -> &[Fragments] { &self.fragments }

    /// Return the assembled instruction grid.
    pub fn grid(&self) -> &Grid { &self.grid }

    /// Return the number of columns.
    pub fn depth(&self) -> usize { self.grid.depth() }

    /// Render the final Typst text.
    pub fn to_typst(&self, markup: Markup) -> String {
        self.grid.to_typst(markup)
    }
}

/// Draw a circuit as a call to `quill`'s `quantum-circuit`.
#[instrument(skip_all, fields(wires = circuit.num_wires(), ops = circuit.num_ops()))]
pub fn draw(circuit: &Circuit, opts: &DrawOptions) -> DrawResult<String> {
    let diagram = Diagram::build(circuit, &opts.symbols)?;
    Ok(diagram.to_typst(opts.markup()))
}

impl Circuit {
    /// Draw `self` as a call to `quill`'s `quantum-circuit`.
    ///
    /// See [`draw`].
    pub fn draw(&self, opts: &DrawOptions) -> DrawResult<String> {
        draw(self, opts)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use rand::{ Rng, SeedableRng, rngs::StdRng, seq::{ SliceRandom, index::sample } };
    use super::*;

    fn default_draw(circuit: &Circuit) -> String {
        circuit.draw(&DrawOptions::default()).unwrap()
    }

    fn row(diagram: &Diagram, wire: usize) -> Vec<String> {
        diagram.grid().row(wire).unwrap().to_vec()
    }

    #[test]
    fn two_cnots() {
        let mut circuit = Circuit::with_size(3, 0);
        circuit.h(0).cx(0, 1).h(1).cx(1, 0);
        let diagram = Diagram::build(&circuit, &SymbolTable::default()).unwrap();
        assert_eq!(diagram.depth(), 4);
        assert_eq!(row(&diagram, 0), ["$H$", "ctrl(1)", "1",   "targ()"  ]);
        assert_eq!(row(&diagram, 1), ["1",   "targ()",  "$H$", "ctrl(-1)"]);
        assert_eq!(row(&diagram, 2), ["1",   "1",       "1",   "1"       ]);
        assert_eq!(
            default_draw(&circuit),
            r"#quantum-circuit(lstick($ket(q_(0))$),$H$,ctrl(1),1,targ(),1,[\ ],lstick($ket(q_(1))$),1,targ(),$H$,ctrl(-1),1,[\ ],lstick($ket(q_(2))$),1,1,1,1,1)",
        );
    }

    #[test]
    fn control_inside_target_span() {
        let mut circuit = Circuit::with_size(5, 0);
        circuit.append(
            Operation::new(
                "c3rxx",
                [0, 2, 4, 1, 3].into_iter().map(WireId::Qubit),
            )
            .with_params([PI])
        );
        let diagram = Diagram::build(&circuit, &SymbolTable::default()).unwrap();
        assert_eq!(diagram.depth(), 1);
        let column: Vec<String> = diagram.grid().column(0).unwrap().to_vec();
        assert_eq!(
            column,
            [
                "ctrl(1)",
                r#"mqgate($R_(X X) (pi)$, n: 3, inputs: ((qubit: 0, label: "0"), (qubit: 2, label: "1"), (qubit: 1, label: $bullet$)), width: 6.5em)"#,
                "1",
                "1",
                "ctrl(-1)",
            ],
        );
        assert!(!diagram.fragments()[0].contains_key(&WireId::Qubit(2)));
    }

    #[test]
    fn options() {
        let mut circuit = Circuit::with_size(1, 0);
        circuit.x(0);
        let opts = DrawOptions::default();
        assert_eq!(
            circuit.draw(&opts).unwrap(),
            "#quantum-circuit(lstick($ket(q)$),$X$,1)",
        );
        let opts = DrawOptions::default().leading_hash(false);
        assert_eq!(
            circuit.draw(&opts).unwrap(),
            "quantum-circuit(lstick($ket(q)$),$X$,1)",
        );
        let opts = DrawOptions::default().imports(true);
        assert_eq!(
            circuit.draw(&opts).unwrap(),
            "#import \"@preview/physica:0.9.3\": *\n\
            #import \"@preview/quill:0.3.0\": *\n\
            #quantum-circuit(lstick($ket(q)$),$X$,1)",
        );
        let mut symbols = SymbolTable::default();
        symbols.insert("x", "$sigma_x$");
        let opts = DrawOptions::default().symbols(symbols);
        assert_eq!(
            circuit.draw(&opts).unwrap(),
            "#quantum-circuit(lstick($ket(q)$),$sigma_x$,1)",
        );
    }

    #[test]
    fn empty_circuit() {
        let circuit = Circuit::with_size(2, 0);
        assert_eq!(
            default_draw(&circuit),
            r"#quantum-circuit(lstick($ket(q_(0))$),1,[\ ],lstick($ket(q_(1))$),1)",
        );
        assert_eq!(default_draw(&Circuit::new()), "#quantum-circuit()");
    }

    #[test]
    fn measure_then_condition() {
        let mut circuit = Circuit::with_size(1, 1);
        circuit.h(0).measure(0, 0).x(0).c_if(Condition::bit(0, true));
        assert_eq!(
            default_draw(&circuit),
            "#quantum-circuit(\
            lstick($ket(q)$),$H$,meter(target: 1),$X$,1,[\\ ],\
            lstick($c$),setwire(2),1,\
            ctrl(0, label: ((content: $0$, pos: bottom))),\
            ctrl(-1, label: ((content: $1$, pos: bottom)), wire-count: 2),1)",
        );
    }

    #[test]
    fn condition_anchor_blocks_column() {
        // the condition line from c0 up to q0 crosses the measurement on q1
        let mut circuit = Circuit::with_size(2, 2);
        circuit.measure(1, 0);
        circuit.z(0).c_if(Condition::register("c", 1));
        let diagram = Diagram::build(&circuit, &SymbolTable::default()).unwrap();
        assert_eq!(diagram.layers().depths(), &[0, 1]);
        assert_eq!(
            diagram.grid().get(2, 1),
            Some("ctrl(-2, label: ((content: $1$, pos: bottom)), wire-count: 2)"),
        );
    }

    #[test]
    fn measure_all() {
        let mut circuit = Circuit::with_size(2, 0);
        circuit.h(0).cx(0, 1).measure_all();
        let diagram = Diagram::build(&circuit, &SymbolTable::default()).unwrap();
        assert_eq!(diagram.layers().depths(), &[0, 1, 2, 3, 4]);
        assert_eq!(
            diagram.grid().column(2).unwrap().to_vec(),
            [
                r#"slice(n: 2, stroke: (paint: black, dash: "dashed"))"#,
                "0",
                "0",
                "0",
            ],
        );
        assert_eq!(row(&diagram, 1)[4], "meter(target: 2)");
        assert_eq!(
            row(&diagram, 3)[4],
            "ctrl(0, label: ((content: $1$, pos: bottom)))",
        );
        assert_eq!(
            diagram.grid().labels(),
            ["$ket(q_(0))$", "$ket(q_(1))$", "$\"meas\"_(0)$", "$\"meas\"_(1)$"],
        );
    }

    #[test]
    fn evolution_label() {
        let mut circuit = Circuit::with_size(2, 0);
        circuit.evolution("exp(-i t H)", 0.5, [0, 1]);
        let diagram = Diagram::build(&circuit, &SymbolTable::default()).unwrap();
        assert_eq!(
            diagram.grid().get(0, 0),
            Some(r#"mqgate("exp(-i t H) (0.5)", n: 2, inputs: ((qubit: 0, label: "0"), (qubit: 1, label: "1")), width: 5.0em)"#),
        );
    }

    #[test]
    fn errors_name_the_operation() {
        let mut circuit = Circuit::with_size(2, 0);
        circuit.h(0).cx(0, 5);
        let err = circuit.draw(&DrawOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DrawError::Circuit(CircuitError::MissingWire(ref op, WireId::Qubit(5)))
                if op.position == 1 && op.name == "cx"
        ));

        let mut circuit = Circuit::with_size(2, 0);
        circuit.h(0).h(1).gate("c0x", [0, 1], []);
        let err = circuit.draw(&DrawOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DrawError::Render(RenderError::ControlPrefix { ref op, .. })
                if op.position == 2
        ));

        let mut circuit = Circuit::with_size(1, 0);
        circuit.gate("rx", [0], []);
        let err = circuit.draw(&DrawOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "rendering error: operation 0 (`rx`): missing parameter 0",
        );

        let mut circuit = Circuit::with_size(1, 1);
        circuit.h(0).measure(0, 0).c_if(Condition::bit(0, true));
        let err = circuit.draw(&DrawOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid circuit: operation 1 (`measure`): condition is drawn on clbit 0, which is also an operand",
        );
    }

    #[test]
    fn huge_parameters() {
        let mut circuit = Circuit::with_size(2, 0);
        circuit.rz(-1e20, 0).cp(1e300, 0, 1);
        let diagram = Diagram::build(&circuit, &SymbolTable::default()).unwrap();
        assert_eq!(
            diagram.grid().get(0, 0),
            Some(format!("$R_Z ({})$", -1e20).as_str()),
        );
        let upper = format!(
            "ctrl(1, wire-label: (content: ${}$, pos: top, dy: -0.75em))", 1e300);
        assert_eq!(diagram.grid().get(0, 1), Some(upper.as_str()));
        assert_eq!(diagram.grid().get(1, 1), Some("ctrl(0)"));
    }

    const NAMES: &[(&str, usize, usize)] = &[
        // name, operands, params
        ("h",       1, 0),
        ("x",       1, 0),
        ("rz",      1, 1),
        ("p",       1, 1),
        ("cx",      2, 0),
        ("cz",      2, 0),
        ("cp",      2, 1),
        ("rzz",     2, 1),
        ("swap",    2, 0),
        ("iswap",   2, 0),
        ("ccx",     3, 0),
        ("cswap",   3, 0),
        ("c3sx",    4, 0),
        ("foo",     3, 0),
        ("barrier", 2, 0),
    ];

    fn random_circuit(rng: &mut StdRng) -> Circuit {
        let nq = rng.gen_range(4..7);
        let nc = rng.gen_range(1..3);
        let mut circuit = Circuit::with_size(nq, nc);
        for _ in 0..rng.gen_range(0..30) {
            if rng.gen_bool(0.1) {
                let q = rng.gen_range(0..nq);
                let c = rng.gen_range(0..nc);
                circuit.measure(q, c);
                continue;
            }
            let (name, n, np) = *NAMES.choose(rng).unwrap();
            let qubits = sample(rng, nq, n).into_vec();
            let params: Vec<f64> = (0..np).map(|_| rng.gen_range(-PI..PI)).collect();
            circuit.gate(name, qubits, params);
            if rng.gen_bool(0.1) && name != "barrier" {
                circuit.c_if(Condition::bit(rng.gen_range(0..nc), true));
            }
        }
        circuit
    }

    #[test]
    fn random_circuits() {
        let mut rng = StdRng::seed_from_u64(10546);
        let symbols = SymbolTable::default();
        for _ in 0..100 {
            let circuit = random_circuit(&mut rng);
            let diagram = Diagram::build(&circuit, &symbols).unwrap();
            let index = circuit.wire_index();

            // deterministic output
            let again = Diagram::build(&circuit, &symbols).unwrap();
            assert_eq!(
                diagram.to_typst(Markup::default()),
                again.to_typst(Markup::default()),
            );

            // one column per layer
            assert_eq!(diagram.depth(), diagram.layers().num_layers());

            // regrouping fragments by column gives back the grid
            let mut rebuilt = Grid::new(circuit.wires(), diagram.depth());
            for (frags, d) in diagram.fragments().iter().zip(diagram.layers().depths()) {
                for (id, instr) in frags.iter() {
                    let w = index.abs(*id).unwrap();
                    let prev = rebuilt.place(w, *d, instr.as_str());
                    assert_eq!(prev.as_deref(), Some("1"), "cell written twice");
                }
            }
            assert_eq!(&rebuilt, diagram.grid());

            // every fragment lies inside its operation's footprint
            for (op, frags) in circuit.ops().iter().zip(diagram.fragments()) {
                let span = footprint(&index, op).unwrap();
                assert!(frags.keys().all(|id| span.contains(index.abs(*id).unwrap())));
            }
        }
    }
}
