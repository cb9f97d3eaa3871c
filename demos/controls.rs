use std::f64::consts::PI;
use quill_draw::{ Circuit, DrawOptions, Operation, SymbolTable, WireId };

// controlled gates of various shapes: dots outside a target box are joined
// to it by a wire, dots inside become `bullet` inputs, and dots between two
// swap crosses sit on the line joining them
fn main() -> anyhow::Result<()> {
    let mut circuit = Circuit::with_size(5, 0);
    circuit.ccx(0, 4, 2);
    circuit.cswap(2, 0, 4);
    circuit.cp(PI / 4.0, 3, 1);
    circuit.rzz(-PI / 2.0, 0, 1);
    circuit.append(
        Operation::new("c3rxx", [0, 2, 4, 1, 3].into_iter().map(WireId::Qubit))
            .with_params([3.0 * PI / 4.0])
    );
    circuit.gate("c2grx", [4, 0, 2, 3], [PI / 3.0]);
    circuit.cswap(1, 0, 2);
    circuit.gate("GR(0.79, 1.57)", [1, 2, 3], [PI / 4.0, PI / 2.0]);
    circuit.gate("ms", [0, 1, 2, 3, 4], [PI / 2.0]);

    // custom symbols may be added for gates without one
    let mut symbols = SymbolTable::default();
    symbols.insert("ms", "$G M S ({0})$");
    let opts = DrawOptions::default().symbols(symbols);

    println!("{}", circuit.draw(&opts)?);
    Ok(())
}
