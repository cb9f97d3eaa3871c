//! Conversion of single operations into per-wire `quill` instructions.
//!
//! Every operation is first sorted into one [`OpKind`], after which it is
//! rendered by a single `match`. Controlled and conditioned operations are
//! rendered in two passes: the control (or condition) markers are drawn, and
//! then the operation is rendered again as its base gate under an updated
//! [`RenderCtx`].
//!
//! All instructions are relative: a control marker on wire *i* pointing at
//! wire *j* is written as `ctrl(j - i)`.

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;
use crate::{
    angle::as_fraction_of_pi,
    circuit::{ Condition, OpRef, Operation, WireId, WireIndex },
    layer::Span,
    quilldefs::{ BARRIER_FILL, LABEL_DY },
};

pub(crate) mod boxed;
use boxed::{ Port, gate_box };

pub mod symbols;
pub use symbols::{ ParamStyle, Symbol, SymbolTable };

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{op}: cannot read a control count from `{name}`")]
    ControlPrefix { op: OpRef, name: String },

    #[error("{op}: missing parameter {index}")]
    MissingParameter { op: OpRef, index: usize },

    #[error("{0}: operation has no operands")]
    NoOperands(OpRef),

    #[error("{0}: {1} does not exist")]
    UnknownWire(OpRef, WireId),

    #[error("{0}: classical register `{1}` does not exist")]
    UnknownRegister(OpRef, String),
}
pub type RenderResult<T> = Result<T, RenderError>;
use RenderError::*;

/// Instructions produced by one operation, keyed by wire.
pub type Fragments = FxHashMap<WireId, String>;

/// Gates with fixed, hand-written renderings.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Builtin {
    /// `cz`: two control dots.
    Cz,
    /// `cp`: two control dots with the phase written above the upper one.
    Cp,
    /// `rzz`: two control dots joined by a labeled wire.
    Rzz,
    /// `swap`: two crosses.
    Swap,
    /// `p`: a single phase dot.
    Phase,
    /// `x` as the target of a controlled gate: ⊕.
    Targ,
}

/// Rendering category of an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OpKind<'a> {
    Barrier,
    /// Carries a classical condition that has not been drawn yet.
    Conditioned,
    Builtin(Builtin),
    /// Controlled gate: the first `controls` operands are controls, and the
    /// remaining ones are the targets of `base`.
    Controlled { controls: usize, base: &'a str },
    Measure,
    /// Anything else, drawn as a box.
    Boxed,
}

/// State carried between rendering passes of a single operation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderCtx<'a> {
    /// Number of leading operands that are controls already drawn.
    pub controls: usize,
    /// Name to use instead of the operation's own.
    pub name: Option<&'a str>,
    /// Whether the operation's condition has already been drawn.
    pub condition_applied: bool,
}

/// Read the number of controls encoded at the front of a gate name, returning
/// it with the remaining base name.
///
/// `cc<base>` has two controls, `c<n><base>` has *n*, and `c<base>` has one.
///
/// ```
/// # use quill_draw::render::control_prefix;
/// assert_eq!(control_prefix("cx"),    Some((1, "x")));
/// assert_eq!(control_prefix("ccx"),   Some((2, "x")));
/// assert_eq!(control_prefix("c3sx"),  Some((3, "sx")));
/// assert_eq!(control_prefix("c0x"),   None);
/// assert_eq!(control_prefix("c"),     None);
/// assert_eq!(control_prefix("h"),     None);
/// ```
pub fn control_prefix(name: &str) -> Option<(usize, &str)> {
    let rest = name.strip_prefix('c')?;
    let (n, base) =
        if let Some(base) = rest.strip_prefix('c') {
            (2, base)
        } else {
            let digits_end =
                rest.find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len());
            if digits_end == 0 {
                (1, rest)
            } else {
                (rest[..digits_end].parse::<usize>().ok()?, &rest[digits_end..])
            }
        };
    (n > 0 && !base.is_empty()).then_some((n, base))
}

/// Return the symbol-table key for a gate name.
///
/// Global rotations arrive with their parameters baked into the name, as in
/// `GR(0.79, 1.57)`; these map to `grx` (φ = 0), `gry` (φ = π/2), or `gr`.
/// Every other name is its own key.
///
/// ```
/// # use quill_draw::render::symbol_name;
/// assert_eq!(symbol_name("GR(0.79, 0.00)"), "grx");
/// assert_eq!(symbol_name("GR(0.79, 1.57)"), "gry");
/// assert_eq!(symbol_name("GR(0.79, 0.50)"), "gr");
/// assert_eq!(symbol_name("rx"),             "rx");
/// ```
pub fn symbol_name(name: &str) -> &str {
    if !name.starts_with("GR(") { return name; }
    if name.ends_with("0.00)") {
        "grx"
    } else if name.ends_with("1.57)") {
        "gry"
    } else {
        "gr"
    }
}

/// Signed distance from wire position `from` to `to`.
fn offset(from: usize, to: usize) -> isize { to as isize - from as isize }

/// Renders operations, given the wire layout of their circuit.
#[derive(Copy, Clone, Debug)]
pub struct Renderer<'a> {
    index: &'a WireIndex,
    symbols: &'a SymbolTable,
}

impl<'a> Renderer<'a> {
    pub fn new(index: &'a WireIndex, symbols: &'a SymbolTable) -> Self {
        Self { index, symbols }
    }

    /// Render an operation sitting at `position` in its circuit.
    pub fn render(&self, position: usize, op: &Operation)
        -> RenderResult<Fragments>
    {
        self.render_with(position, op, RenderCtx::default())
    }

    /// Sort an operation into its rendering category.
    pub fn classify<'o>(&self, position: usize, op: &'o Operation, ctx: RenderCtx<'o>)
        -> RenderResult<OpKind<'o>>
    {
        let name = ctx.name.unwrap_or(op.name.as_str());
        let targets = op.operands.len().saturating_sub(ctx.controls);
        if name == "barrier" && ctx.controls == 0 {
            return Ok(OpKind::Barrier);
        }
        if op.condition.is_some() && !ctx.condition_applied {
            return Ok(OpKind::Conditioned);
        }
        let builtin =
            match (name, targets) {
                ("cz", 2) => Some(Builtin::Cz),
                ("cp", 2) => Some(Builtin::Cp),
                ("rzz", 2) => Some(Builtin::Rzz),
                ("swap", 2) => Some(Builtin::Swap),
                ("p", 1) => Some(Builtin::Phase),
                ("x", 1) if ctx.controls > 0 => Some(Builtin::Targ),
                _ => None,
            };
        if let Some(b) = builtin { return Ok(OpKind::Builtin(b)); }
        if name.starts_with('c') && targets >= 2 && ctx.controls == 0 {
            return control_prefix(name)
                .filter(|(n, _)| *n < op.operands.len())
                .map(|(controls, base)| OpKind::Controlled { controls, base })
                .ok_or_else(|| {
                    ControlPrefix { op: op.at(position), name: name.to_string() }
                });
        }
        if name == "measure"
            && ctx.controls == 0
            && matches!(op.operands[..], [WireId::Qubit(_), WireId::Clbit(_)])
        {
            return Ok(OpKind::Measure);
        }
        Ok(OpKind::Boxed)
    }

    fn abs(&self, position: usize, op: &Operation, id: WireId)
        -> RenderResult<usize>
    {
        self.index.abs(id).ok_or_else(|| UnknownWire(op.at(position), id))
    }

    fn param(&self, position: usize, op: &Operation, k: usize)
        -> RenderResult<String>
    {
        op.params.get(k)
            .map(|theta| as_fraction_of_pi(*theta))
            .ok_or_else(|| MissingParameter { op: op.at(position), index: k })
    }

    fn render_with(&self, position: usize, op: &Operation, ctx: RenderCtx<'_>)
        -> RenderResult<Fragments>
    {
        if op.operands.len() <= ctx.controls {
            return Err(NoOperands(op.at(position)));
        }
        match self.classify(position, op, ctx)? {
            OpKind::Barrier => self.render_barrier(position, op),
            OpKind::Conditioned => self.render_conditioned(position, op, ctx),
            OpKind::Builtin(b) => self.render_builtin(position, op, ctx, b),
            OpKind::Controlled { controls, base } => {
                let ctx = RenderCtx { controls, name: Some(base), ..ctx };
                self.render_controlled(position, op, ctx)
            },
            OpKind::Measure => self.render_measure(position, op),
            OpKind::Boxed => self.render_boxed(position, op, ctx),
        }
    }

    fn render_barrier(&self, position: usize, op: &Operation)
        -> RenderResult<Fragments>
    {
        let positions: Vec<usize> =
            op.operands.iter()
            .map(|id| self.abs(position, op, *id))
            .collect::<RenderResult<_>>()?;
        let span =
            Span::covering(positions)
            .ok_or_else(|| NoOperands(op.at(position)))?;
        let mut frags: Fragments =
            self.index.ids()
            .map(|id| (id, BARRIER_FILL.to_string()))
            .collect();
        if let Some(top) = self.index.id_at(span.lo) {
            frags.insert(
                top,
                format!(
                    "slice(n: {}, stroke: (paint: black, dash: \"dashed\"))",
                    span.len(),
                ),
            );
        }
        Ok(frags)
    }

    fn render_conditioned(&self, position: usize, op: &Operation, ctx: RenderCtx<'_>)
        -> RenderResult<Fragments>
    {
        let Some(condition) = op.condition.as_ref() else {
            return self.render_boxed(position, op, ctx);
        };
        let anchor =
            match condition {
                Condition::Bit { clbit, .. } => WireId::Clbit(*clbit),
                Condition::Register { register, .. } => {
                    let (first, _) =
                        self.index.creg(register)
                        .ok_or_else(|| {
                            UnknownRegister(op.at(position), register.clone())
                        })?;
                    WireId::Clbit(first)
                },
            };
        let anchor_abs = self.abs(position, op, anchor)?;
        let quantum: Vec<WireId> =
            op.operands.iter().copied().filter(WireId::is_qubit).collect();
        let operands: &[WireId] =
            if quantum.is_empty() { &op.operands } else { &quantum };
        let top =
            operands.iter()
            .map(|id| self.abs(position, op, *id))
            .try_fold(0, |acc, k| k.map(|k| acc.max(k)))?;
        let mut frags = Fragments::default();
        frags.insert(
            anchor,
            format!(
                "ctrl({}, label: ((content: ${}$, pos: bottom)), wire-count: 2)",
                offset(anchor_abs, top),
                condition.value(),
            ),
        );
        let ctx = RenderCtx { condition_applied: true, ..ctx };
        frags.extend(self.render_with(position, op, ctx)?);
        Ok(frags)
    }

    fn render_builtin(
        &self,
        position: usize,
        op: &Operation,
        ctx: RenderCtx<'_>,
        builtin: Builtin,
    ) -> RenderResult<Fragments>
    {
        let targets = &op.operands[ctx.controls..];
        let mut frags = Fragments::default();
        match builtin {
            Builtin::Cz | Builtin::Rzz | Builtin::Swap | Builtin::Cp => {
                let (mut a, mut b) = (targets[0], targets[1]);
                let (mut ia, mut ib) =
                    (self.abs(position, op, a)?, self.abs(position, op, b)?);
                if builtin == Builtin::Cp && ib < ia {
                    std::mem::swap(&mut a, &mut b);
                    std::mem::swap(&mut ia, &mut ib);
                }
                let ri = offset(ia, ib);
                let (upper, lower) =
                    match builtin {
                        Builtin::Cz => (format!("ctrl({})", ri), "ctrl(0)"),
                        Builtin::Cp => {
                            let theta = self.param(position, op, 0)?;
                            let upper = format!(
                                "ctrl({}, wire-label: (content: ${}$, pos: top, dy: {}))",
                                ri, theta, LABEL_DY,
                            );
                            (upper, "ctrl(0)")
                        },
                        Builtin::Rzz => {
                            let theta = self.param(position, op, 0)?;
                            let upper = format!(
                                "ctrl({}, wire-label: $Z Z ({})$)", ri, theta);
                            (upper, "ctrl(0)")
                        },
                        _ => (format!("swap({})", ri), "targX()"),
                    };
                frags.insert(a, upper);
                frags.insert(b, lower.to_string());
            },
            Builtin::Phase => {
                let theta = self.param(position, op, 0)?;
                frags.insert(
                    targets[0],
                    format!(
                        "phase((content: ${}$, pos: top, dy: {}))",
                        theta, LABEL_DY,
                    ),
                );
            },
            Builtin::Targ => {
                frags.insert(targets[0], "targ()".to_string());
            },
        }
        Ok(frags)
    }

    fn render_controlled(&self, position: usize, op: &Operation, ctx: RenderCtx<'_>)
        -> RenderResult<Fragments>
    {
        let (controls, targets) = op.operands.split_at(ctx.controls);
        let span = self.target_span(position, op, targets)?;
        // a box takes inner controls as ports; other bases get a plain dot
        let boxed = self.classify(position, op, ctx)? == OpKind::Boxed;
        let mut frags = Fragments::default();
        for id in controls.iter() {
            let i = self.abs(position, op, *id)?;
            if i < span.lo {
                frags.insert(*id, format!("ctrl({})", offset(i, span.lo)));
            } else if i > span.hi {
                frags.insert(*id, format!("ctrl({})", offset(i, span.hi)));
            } else if !boxed {
                frags.insert(*id, "ctrl(0)".to_string());
            }
        }
        frags.extend(self.render_with(position, op, ctx)?);
        Ok(frags)
    }

    fn render_measure(&self, position: usize, op: &Operation)
        -> RenderResult<Fragments>
    {
        let (q, c) = (op.operands[0], op.operands[1]);
        let iq = self.abs(position, op, q)?;
        let ic = self.abs(position, op, c)?;
        let bit =
            self.index.clbit_position(c.index())
            .ok_or_else(|| UnknownWire(op.at(position), c))?;
        let mut frags = Fragments::default();
        frags.insert(q, format!("meter(target: {})", offset(iq, ic)));
        frags.insert(
            c, format!("ctrl(0, label: ((content: ${}$, pos: bottom)))", bit));
        Ok(frags)
    }

    fn box_content(&self, position: usize, op: &Operation, name: &str)
        -> RenderResult<String>
    {
        if let Some(label) = op.label.as_ref() {
            return Ok(format!("\"{}\"", label));
        }
        match self.symbols.get(name) {
            Some(symbol) => {
                symbol.fill(&op.params)
                    .map_err(|index| MissingParameter { op: op.at(position), index })
            },
            None => {
                debug!("{}: no symbol for `{}`; drawing it as a plain box", op.at(position), name);
                Ok(symbols::fallback_symbol(name))
            },
        }
    }

    fn target_span(&self, position: usize, op: &Operation, targets: &[WireId])
        -> RenderResult<Span>
    {
        let positions: Vec<usize> =
            targets.iter()
            .map(|id| self.abs(position, op, *id))
            .collect::<RenderResult<_>>()?;
        Span::covering(positions).ok_or_else(|| NoOperands(op.at(position)))
    }

    fn render_boxed(&self, position: usize, op: &Operation, ctx: RenderCtx<'_>)
        -> RenderResult<Fragments>
    {
        let name = symbol_name(ctx.name.unwrap_or(op.name.as_str()));
        let content = self.box_content(position, op, name)?;
        let (controls, targets) = op.operands.split_at(ctx.controls);
        let span = self.target_span(position, op, targets)?;
        let mut ports: Vec<Port> = Vec::with_capacity(op.operands.len());
        for (k, id) in targets.iter().enumerate() {
            ports.push(Port::Target(self.abs(position, op, *id)? - span.lo, k));
        }
        for id in controls.iter() {
            let i = self.abs(position, op, *id)?;
            if span.lo < i && i < span.hi {
                ports.push(Port::Control(i - span.lo));
            }
        }
        let top =
            self.index.id_at(span.lo)
            .ok_or_else(|| NoOperands(op.at(position)))?;
        let mut frags = Fragments::default();
        frags.insert(top, gate_box(&content, span.len(), &ports));
        Ok(frags)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;
    use crate::circuit::{ Circuit, Register };
    use super::*;

    fn q(k: usize) -> WireId { WireId::Qubit(k) }
    fn c(k: usize) -> WireId { WireId::Clbit(k) }

    fn render(index: &WireIndex, op: &Operation) -> RenderResult<Fragments> {
        let symbols = SymbolTable::default();
        Renderer::new(index, &symbols).render(0, op)
    }

    fn frags<const N: usize>(items: [(WireId, &str); N]) -> Fragments {
        items.into_iter().map(|(id, s)| (id, s.to_string())).collect()
    }

    fn index(nq: usize, nc: usize) -> WireIndex {
        WireIndex::new(nq, [Register::new("c", nc)].iter())
    }

    #[test]
    fn classification() {
        let idx = index(4, 2);
        let symbols = SymbolTable::default();
        let r = Renderer::new(&idx, &symbols);
        let kind = |op: &Operation| {
            r.classify(0, op, RenderCtx::default()).map(|k| format!("{:?}", k))
        };
        assert_eq!(kind(&Operation::new("barrier", [q(0)])).unwrap(), "Barrier");
        assert_eq!(
            kind(&Operation::new("h", [q(0)]).with_condition(Condition::bit(0, true))).unwrap(),
            "Conditioned",
        );
        assert_eq!(kind(&Operation::new("cz", [q(0), q(1)])).unwrap(), "Builtin(Cz)");
        assert_eq!(kind(&Operation::new("x", [q(0)])).unwrap(), "Boxed");
        assert_eq!(
            kind(&Operation::new("ccx", [q(0), q(1), q(2)])).unwrap(),
            r#"Controlled { controls: 2, base: "x" }"#,
        );
        assert_eq!(
            kind(&Operation::new("c12h", [q(0), q(1)])).map_err(|e| e.to_string()),
            Err("operation 0 (`c12h`): cannot read a control count from `c12h`".to_string()),
        );
        assert_eq!(kind(&Operation::new("measure", [q(0), c(0)])).unwrap(), "Measure");
        assert_eq!(kind(&Operation::new("cx", [q(0)])).unwrap(), "Boxed");
    }

    #[test]
    fn two_wire_builtins() {
        let idx = index(3, 0);
        assert_eq!(
            render(&idx, &Operation::new("cz", [q(2), q(0)])).unwrap(),
            frags([(q(2), "ctrl(-2)"), (q(0), "ctrl(0)")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("swap", [q(0), q(1)])).unwrap(),
            frags([(q(0), "swap(1)"), (q(1), "targX()")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("cp", [q(2), q(0)]).with_params([PI / 4.0])).unwrap(),
            frags([
                (q(0), "ctrl(2, wire-label: (content: $pi / 4$, pos: top, dy: -0.75em))"),
                (q(2), "ctrl(0)"),
            ]),
        );
        assert_eq!(
            render(&idx, &Operation::new("rzz", [q(1), q(2)]).with_params([PI])).unwrap(),
            frags([(q(1), "ctrl(1, wire-label: $Z Z (pi)$)"), (q(2), "ctrl(0)")]),
        );
        assert!(matches!(
            render(&idx, &Operation::new("cp", [q(0), q(1)])),
            Err(MissingParameter { index: 0, .. })
        ));
    }

    #[test]
    fn phase() {
        let idx = index(1, 0);
        assert_eq!(
            render(&idx, &Operation::new("p", [q(0)]).with_params([-PI / 2.0])).unwrap(),
            frags([(q(0), "phase((content: $-pi / 2$, pos: top, dy: -0.75em))")]),
        );
    }

    #[test]
    fn controlled() {
        let idx = index(4, 0);
        assert_eq!(
            render(&idx, &Operation::new("cx", [q(3), q(1)])).unwrap(),
            frags([(q(3), "ctrl(-2)"), (q(1), "targ()")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("ccx", [q(0), q(3), q(2)])).unwrap(),
            frags([(q(0), "ctrl(2)"), (q(3), "ctrl(-1)"), (q(2), "targ()")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("ch", [q(0), q(1)])).unwrap(),
            frags([(q(0), "ctrl(1)"), (q(1), "$H$")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("crz", [q(1), q(0)]).with_params([PI])).unwrap(),
            frags([(q(1), "ctrl(-1)"), (q(0), "$R_Z (pi)$")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("cswap", [q(0), q(1), q(3)])).unwrap(),
            frags([(q(0), "ctrl(1)"), (q(1), "swap(2)"), (q(3), "targX()")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("cp", [q(0), q(1), q(2)]).with_params([PI])).unwrap(),
            frags([
                (q(0), "ctrl(1)"),
                (q(1), r#"mqgate($P(pi)$, n: 2, inputs: ((qubit: 0, label: "0"), (qubit: 1, label: "1")), width: 5.0em)"#),
            ]),
        );
    }

    #[test]
    fn controls_inside_box() {
        let idx = index(5, 0);
        let op =
            Operation::new("c3rxx", [q(0), q(2), q(4), q(1), q(3)])
            .with_params([PI]);
        assert_eq!(
            render(&idx, &op).unwrap(),
            frags([
                (q(0), "ctrl(1)"),
                (q(4), "ctrl(-1)"),
                (q(1), r#"mqgate($R_(X X) (pi)$, n: 3, inputs: ((qubit: 0, label: "0"), (qubit: 2, label: "1"), (qubit: 1, label: $bullet$)), width: 6.5em)"#),
            ]),
        );
    }

    #[test]
    fn controls_between_builtin_targets() {
        let idx = index(5, 0);
        assert_eq!(
            render(&idx, &Operation::new("cswap", [q(1), q(0), q(2)])).unwrap(),
            frags([(q(1), "ctrl(0)"), (q(0), "swap(2)"), (q(2), "targX()")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("c2cz", [q(2), q(4), q(1), q(3)])).unwrap(),
            frags([
                (q(2), "ctrl(0)"),
                (q(4), "ctrl(-1)"),
                (q(1), "ctrl(2)"),
                (q(3), "ctrl(0)"),
            ]),
        );
        assert_eq!(
            render(&idx, &Operation::new("crzz", [q(1), q(0), q(2)]).with_params([PI])).unwrap(),
            frags([
                (q(1), "ctrl(0)"),
                (q(0), "ctrl(2, wire-label: $Z Z (pi)$)"),
                (q(2), "ctrl(0)"),
            ]),
        );
    }

    #[test]
    fn base_names_are_not_reparsed() {
        let idx = index(3, 0);
        // base `cy` keeps its leading `c`
        let op = Operation::new("cccy", [q(0), q(1), q(2)]);
        assert_eq!(
            render(&idx, &op).unwrap(),
            frags([(q(0), "ctrl(2)"), (q(1), "ctrl(1)"), (q(2), "\"CY\"")]),
        );
    }

    #[test]
    fn bad_control_prefix() {
        let idx = index(3, 0);
        for name in ["c", "cc", "c0x", "c3x", "c2"] {
            let op = Operation::new(name, [q(0), q(1), q(2)]);
            let err = render(&idx, &op).unwrap_err();
            assert!(matches!(err, ControlPrefix { .. }), "{}", name);
        }
    }

    #[test]
    fn measure() {
        let mut circuit = Circuit::with_size(2, 0);
        circuit.add_creg("a", 1);
        circuit.add_creg("b", 2);
        let idx = circuit.wire_index();
        assert_eq!(
            render(&idx, &Operation::new("measure", [q(0), c(2)])).unwrap(),
            frags([
                (q(0), "meter(target: 4)"),
                (c(2), "ctrl(0, label: ((content: $1$, pos: bottom)))"),
            ]),
        );
    }

    #[test]
    fn barrier() {
        let idx = index(4, 1);
        assert_eq!(
            render(&idx, &Operation::new("barrier", [q(3), q(1)])).unwrap(),
            frags([
                (q(0), "0"),
                (q(1), r#"slice(n: 3, stroke: (paint: black, dash: "dashed"))"#),
                (q(2), "0"),
                (q(3), "0"),
                (c(0), "0"),
            ]),
        );
    }

    #[test]
    fn conditioned() {
        let mut circuit = Circuit::with_size(2, 0);
        circuit.add_creg("a", 1);
        circuit.add_creg("b", 2);
        let idx = circuit.wire_index();
        let op =
            Operation::new("x", [q(0)])
            .with_condition(Condition::register("b", 2));
        assert_eq!(
            render(&idx, &op).unwrap(),
            frags([
                (c(1), "ctrl(-3, label: ((content: $2$, pos: bottom)), wire-count: 2)"),
                (q(0), "$X$"),
            ]),
        );
        let op =
            Operation::new("cx", [q(1), q(0)])
            .with_condition(Condition::bit(0, true));
        assert_eq!(
            render(&idx, &op).unwrap(),
            frags([
                (c(0), "ctrl(-1, label: ((content: $1$, pos: bottom)), wire-count: 2)"),
                (q(1), "ctrl(-1)"),
                (q(0), "targ()"),
            ]),
        );
    }

    #[test]
    fn boxes() {
        let idx = index(3, 0);
        assert_eq!(
            render(&idx, &Operation::new("foo", [q(1)])).unwrap(),
            frags([(q(1), "\"FOO\"")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("$W$", [q(1)])).unwrap(),
            frags([(q(1), "$W$")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("x", [q(1)]).with_label("NOT")).unwrap(),
            frags([(q(1), "\"NOT\"")]),
        );
        assert_eq!(
            render(&idx, &Operation::new("iswap", [q(2), q(0)])).unwrap(),
            frags([(q(0), r#"mqgate("iSWAP", n: 3, inputs: ((qubit: 2, label: "0"), (qubit: 0, label: "1")), width: 5.0em)"#)]),
        );
        assert!(matches!(
            render(&idx, &Operation::new("rx", [q(0)])),
            Err(MissingParameter { index: 0, .. })
        ));
    }

    #[test]
    fn global_rotations() {
        let idx = index(2, 0);
        let gr = |name: &str, params: [f64; 2]| {
            render(&idx, &Operation::new(name, [q(0), q(1)]).with_params(params)).unwrap()
        };
        let boxed = |content: &str| {
            frags([(
                q(0),
                format!(r#"mqgate({}, n: 2, inputs: ((qubit: 0, label: "0"), (qubit: 1, label: "1")), width: 5.0em)"#, content).as_str(),
            )])
        };
        assert_eq!(gr("GR(0.79, 0.00)", [PI / 4.0, 0.0]),       boxed("$G R_X (pi / 4)$"));
        assert_eq!(gr("GR(0.79, 1.57)", [PI / 4.0, PI / 2.0]),  boxed("$G R_Y (pi / 4)$"));
        assert_eq!(
            gr("GR(0.79, 0.79)", [PI / 4.0, PI / 4.0]),
            boxed("$G R (pi / 4, pi / 4)$"),
        );

        // the alias still falls back to a word when the table lacks it
        let symbols = SymbolTable::empty();
        let op = Operation::new("GR(0.50, 0.00)", [q(0)]).with_params([0.5, 0.0]);
        assert_eq!(
            Renderer::new(&idx, &symbols).render(0, &op).unwrap(),
            frags([(q(0), "\"GRX\"")]),
        );
    }

    #[test]
    fn unknown_wires() {
        let idx = index(1, 0);
        assert!(matches!(
            render(&idx, &Operation::new("h", [q(1)])),
            Err(UnknownWire(_, WireId::Qubit(1)))
        ));
        assert!(matches!(
            render(&idx, &Operation::new("h", [])),
            Err(NoOperands(_))
        ));
    }
}
