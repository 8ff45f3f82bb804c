use crate::utils::*;

/// What the allocation matrix and the available vector currently add
/// up to, per resource. Saturates instead of overflowing, so that a
/// corrupted state shows up as a mismatch rather than a panic.
pub fn current_totals(state: &State) -> Vector {
    let mut res = state.available().clone();
    for row in state.allocation() {
        for (t, held) in res.iter_mut().zip(row) {
            *t = t.saturating_add(*held);
        }
    }

    res
}

/// Realizes if no units have been created or destroyed since `state`
/// was loaded.
pub fn conserves(state: &State) -> bool {
    &current_totals(state) == state.totals()
}

/// Realizes if every `need` entry equals `max - allocation` and none
/// of them is negative.
pub fn need_is_consistent(state: &State) -> bool {
    state.need()
        .iter()
        .zip(state.max())
        .zip(state.allocation())
        .all(|((need, max), held)| {
            need.iter()
                .zip(max)
                .zip(held)
                .all(|((n, m), a)| *n >= 0 && *n == m - a)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_consistent() {
        let s = State::init(2, 2, Snapshot {
            allocation: vec![vec![1, 2], vec![0, 1]],
            max:        vec![vec![4, 2], vec![1, 1]],
            available:  vec![3, 0],
        }).unwrap();
        assert!(conserves(&s));
        assert!(need_is_consistent(&s));
        assert_eq!(current_totals(&s), vec![4, 3]);
    }
}
