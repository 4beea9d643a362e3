//! Backward liveness analysis driven by `BitVec` change flags

use compact_bitvec::BitVec;

struct Block {
    name: &'static str,
    uses: BitVec,
    defs: BitVec,
    succs: &'static [usize],
}

fn block(name: &'static str, uses: &[usize], defs: &[usize], succs: &'static [usize]) -> Block {
    Block {
        name,
        uses: uses.iter().copied().collect(),
        defs: defs.iter().copied().collect(),
        succs,
    }
}

fn main() {
    println!("=== Liveness over a loop ===\n");

    // Register 200 forces the heap path for every set that mentions it.
    let cfg = [
        block("entry", &[], &[0, 1, 200], &[1]),
        block("header", &[0, 1], &[2], &[2, 3]),
        block("body", &[2, 200], &[0], &[1]),
        block("exit", &[0], &[], &[]),
    ];

    let mut live_in = vec![BitVec::new(); cfg.len()];
    let mut round = 0;
    loop {
        round += 1;
        let mut changed = false;
        for (i, b) in cfg.iter().enumerate().rev() {
            let mut out = BitVec::new();
            for &s in b.succs {
                out |= &live_in[s];
            }
            let input = (out - &b.defs) | &b.uses;
            changed |= live_in[i].union_with(&input);
        }
        println!("round {round}: changed = {changed}");
        if !changed {
            break;
        }
    }

    println!();
    for (b, live) in cfg.iter().zip(&live_in) {
        println!(
            "{:>6}: live-in {:?} (heap: {}, hex: {:#x})",
            b.name,
            live,
            live.is_spilled(),
            live
        );
    }
}
