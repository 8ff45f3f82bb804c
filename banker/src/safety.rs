use crate::utils::*;

/// How the admission scan walks the process list.
///
/// Work only ever grows during a scan, so a process that is runnable at
/// some point stays runnable. Both orders therefore agree on *whether* a
/// state is safe; they only differ in the sequence they report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScanOrder {
    /// Walk `0..P` once per pass and admit everybody runnable on the way,
    /// then start the next pass from the top. At most `P` passes.
    #[default]
    Sweep,
    /// Admit the lowest-indexed runnable process, then start over from
    /// the top.
    Restart,
}

/// The verdict of a safety check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Safety {
    /// Every process can finish, in this order.
    Safe(Vec<ProcessId>),
    Unsafe,
}

impl Safety {
    pub fn is_safe(&self) -> bool {
        matches!(self, Safety::Safe(_))
    }

    pub fn sequence(&self) -> Option<&[ProcessId]> {
        match self {
            Safety::Safe(seq)   => { Some(seq) },
            Safety::Unsafe      => { None },
        }
    }

    pub fn into_parts(self) -> (bool, Option<Vec<ProcessId>>) {
        match self {
            Safety::Safe(seq)   => { (true, Some(seq)) },
            Safety::Unsafe      => { (false, None) },
        }
    }
}

/// Runs the Banker's safety algorithm on `state`. Does not touch it.
///
/// `O(P²·R)` in the worst case.
pub fn check(state: &State, order: ScanOrder) -> Safety {
    let processes = state.processes();
    let mut work: Vector = state.available().clone();
    let mut finish = vec![false; processes];
    let mut sequence: Vec<ProcessId> = Vec::with_capacity(processes);

    let runnable = |i: ProcessId, finish: &[bool], work: &[Units]| {
        !finish[i] && fits(&state.need()[i], work)
    };

    match order {
        ScanOrder::Sweep    => {
            for _ in 0..processes {
                let mut found = false;
                for i in 0..processes {
                    if runnable(i, &finish, &work) {
                        admit(state, i, &mut work, &mut finish, &mut sequence);
                        found = true;
                    }
                }
                if !found { break; }
            }
        },
        ScanOrder::Restart  => {
            while let Some(i) = (0..processes).find(|&i| runnable(i, &finish, &work)) {
                admit(state, i, &mut work, &mut finish, &mut sequence);
            }
        },
    }

    if sequence.len() == processes {
        Safety::Safe(sequence)
    } else {
        trace!("no admissible process left, {} of {} finished", sequence.len(), processes);
        Safety::Unsafe
    }
}

// Process `i` runs to completion and hands back everything it holds.
fn admit(
    state:      &State,
    i:          ProcessId,
    work:       &mut Vector,
    finish:     &mut [bool],
    sequence:   &mut Vec<ProcessId>,
) {
    for (w, held) in work.iter_mut().zip(&state.allocation()[i]) {
        *w += held;
    }
    finish[i] = true;
    sequence.push(i);
    trace!("admitted P{}, work now {:?}", i, work);
}
