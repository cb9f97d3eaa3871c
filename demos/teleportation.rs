use std::time::Instant;
use quill_draw::{ Circuit, Condition, DrawOptions, Diagram };

fn timeit<F, T>(mut f: F) -> (T, f64)
where F: FnMut() -> T
{
    let t0 = Instant::now();
    let out: T = f();
    (out, (Instant::now() - t0).as_secs_f64())
}

// standard state teleportation circuit, with classically controlled
// corrections
//
//         ∣ψ⟩ ------*--H--M(a)
//                   |
//              / ---X-----M(b)
// ∣00⟩ + ∣11⟩ |
//              \ ---------------(X if b)--(Z if a)--- ∣ψ⟩
//
fn main() -> anyhow::Result<()> {
    let mut circuit = Circuit::new();
    circuit.add_qreg("psi", 1);
    circuit.add_qreg("q", 2);
    circuit.add_creg("a", 1);
    circuit.add_creg("b", 1);

    // bell pair on q
    circuit.h(1).cx(1, 2);
    circuit.barrier_all();
    // bell measurement
    circuit.cx(0, 1).h(0);
    circuit.measure(0, 0).measure(1, 1);
    // corrections
    circuit.x(2).c_if(Condition::register("b", 1));
    circuit.z(2).c_if(Condition::register("a", 1));

    let opts = DrawOptions::default().imports(true);
    let (diagram, time) = timeit(|| Diagram::build(&circuit, &opts.symbols));
    let diagram = diagram?;
    println!("laid out {} columns in {:.3e} s", diagram.depth(), time);
    println!("{}", diagram.to_typst(opts.markup()));

    Ok(())
}
