use crate::*;
use crate::replay::{Op, Outcome};

/// Renders `m` as a table with `P<i>` row labels and `R<j>` headers,
/// every column right-aligned to the widest cell.
pub fn render_matrix(title: &str, m: &Matrix) -> String {
    let cols = m.first().map_or(0, |r| r.len());
    let label_w = format!("P{}", m.len().saturating_sub(1)).len();
    let cell_w = m.iter()
        .flatten()
        .map(|v| v.to_string().len())
        .chain((0..cols).map(|j| format!("R{}", j).len()))
        .max()
        .unwrap_or(1);

    let mut res = format!("{}:\n", title);
    res.push_str(&format!("{:label_w$}", ""));
    for j in 0..cols {
        res.push_str(&format!(" {:>cell_w$}", format!("R{}", j)));
    }
    res.push('\n');
    for (i, row) in m.iter().enumerate() {
        res.push_str(&format!("{:<label_w$}", format!("P{}", i)));
        for v in row {
            res.push_str(&format!(" {:>cell_w$}", v));
        }
        res.push('\n');
    }

    res
}

pub fn render_vector(title: &str, v: &[Units]) -> String {
    format!("{}: {}", title, v.iter().join(" "))
}

/// Available, then the Allocation, Max and Need tables.
pub fn render_state(state: &State) -> String {
    [
        render_vector("Available", state.available()),
        render_matrix("Allocation", state.allocation()),
        render_matrix("Max", state.max()),
        render_matrix("Need", state.need()),
    ].join("\n")
}

pub fn render_sequence(seq: &[ProcessId]) -> String {
    seq.iter()
        .map(|p| format!("P{}", p))
        .join(" -> ")
}

pub fn render_safety(verdict: &Safety) -> String {
    match verdict.sequence() {
        Some(seq)   => { format!("System is SAFE.\nSafe sequence: {}", render_sequence(seq)) },
        None        => { String::from("System is NOT SAFE.") },
    }
}

pub fn render_grant(g: &Grant) -> String {
    format!(
        "Request of P{} granted. System remains SAFE.\nSafe sequence: {}",
        g.process,
        render_sequence(&g.sequence)
    )
}

pub fn render_denial(d: &Denial) -> String {
    let verdict = if d.is_retryable() { "Request denied" } else { "Request rejected" };
    format!("{}: {}.", verdict, d)
}

/// One line per replayed trace entry.
pub fn render_outcome(o: &Outcome) -> String {
    let what = match o.op {
        Op::Request => { "request" },
        Op::Release => { "release" },
    };
    let head = format!("#{:<4} P{} {} [{}]", o.line, o.process, what, o.vector.iter().join(" "));
    match &o.result {
        Ok(Some(g)) => { format!("{} -> granted, safe sequence {}", head, render_sequence(&g.sequence)) },
        Ok(None)    => { format!("{} -> released", head) },
        Err(d)      => { format!("{} -> {} ({})", head, d.kind(), d) },
    }
}
