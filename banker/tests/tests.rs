use banker::*;
use banker::analyze::{conserves, need_is_consistent};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// The classic five-process, three-resource example found in
/// most operating systems textbooks.
fn textbook() -> Snapshot {
    Snapshot {
        allocation: vec![vec![0, 1, 0], vec![2, 0, 0], vec![3, 0, 2], vec![2, 1, 1], vec![0, 0, 2]],
        max:        vec![vec![7, 5, 3], vec![3, 2, 2], vec![9, 0, 2], vec![2, 2, 2], vec![4, 3, 3]],
        available:  vec![3, 3, 2],
    }
}

fn loaded(snap: Snapshot) -> Engine {
    let p = snap.allocation.len();
    let r = snap.available.len();
    let mut e = Engine::new(p, r).unwrap();
    e.load_state(snap).unwrap();
    e
}

#[test]
fn textbook_is_safe() {
    let e = loaded(textbook());
    assert_eq!(e.is_safe().unwrap().into_parts(), (true, Some(vec![1, 3, 4, 0, 2])));
}

#[test]
fn textbook_grant_to_p1() {
    let mut e = loaded(textbook());
    let g = e.request_resources(1, &[1, 0, 2]).unwrap();
    assert_eq!(g.process, 1);
    assert_eq!(g.sequence, vec![1, 3, 4, 0, 2]);

    let s = e.state().unwrap();
    assert_eq!(s.available(), &vec![2, 3, 0]);
    assert_eq!(s.allocation()[1], vec![3, 0, 2]);
    assert_eq!(s.need()[1], vec![0, 2, 0]);
}

#[test]
fn textbook_p0_denied_after_p1_grant() {
    let mut e = loaded(textbook());
    e.request_resources(1, &[1, 0, 2]).unwrap();
    let before = e.state().cloned();

    assert_eq!(
        e.request_resources(0, &[0, 2, 0]).unwrap_err(),
        Denial::WouldBeUnsafe { process: 0 }
    );
    assert_eq!(e.state().cloned(), before);
}

#[test]
fn textbook_p0_granted_on_initial_state() {
    // Before P1's grant there is enough slack for P0's request.
    let mut e = loaded(textbook());
    let g = e.request_resources(0, &[0, 2, 0]).unwrap();
    assert_eq!(g.sequence, vec![3, 1, 2, 0, 4]);
    assert_eq!(e.state().unwrap().available(), &vec![3, 1, 2]);
}

#[test]
fn textbook_p4_must_wait() {
    let mut e = loaded(textbook());
    e.request_resources(1, &[1, 0, 2]).unwrap();
    let err = e.request_resources(4, &[3, 3, 0]).unwrap_err();
    assert_eq!(
        err,
        Denial::InsufficientResources { process: 4, resource: 0, requested: 3, available: 2 }
    );
    assert!(err.is_retryable());
}

#[test]
fn exceeding_need_never_touches_available() {
    let mut e = loaded(textbook());
    let before = e.state().cloned();
    // P2 declared no need at all for resource 1.
    assert_eq!(
        e.request_resources(2, &[0, 1, 0]).unwrap_err(),
        Denial::ExceedsMaximumDemand { process: 2, resource: 1, requested: 1, need: 0 }
    );
    assert_eq!(e.state().cloned(), before);
}

#[test]
fn no_safe_sequence() {
    let e = loaded(Snapshot {
        allocation: vec![vec![1, 0], vec![0, 1], vec![1, 1]],
        max:        vec![vec![3, 1], vec![1, 3], vec![3, 3]],
        available:  vec![0, 0],
    });
    assert_eq!(e.is_safe().unwrap().into_parts(), (false, None));
}

#[test]
fn safety_query_is_idempotent() {
    let e = loaded(textbook());
    let before = e.state().cloned();
    let first = e.is_safe().unwrap();
    let second = e.is_safe().unwrap();
    assert_eq!(first, second);
    assert_eq!(e.state().cloned(), before);
}

#[test]
fn scan_orders_agree_on_safety() {
    let mut rng = StdRng::seed_from_u64(0x5afe);
    for _ in 0..200 {
        let snap = random_snapshot(&mut rng, 6, 3);
        let sweep = loaded(snap.clone()).is_safe().unwrap();
        let mut restart = Engine::with_config(6, 3, Config::new(ScanOrder::Restart)).unwrap();
        restart.load_state(snap).unwrap();
        assert_eq!(sweep.is_safe(), restart.is_safe().unwrap().is_safe());
    }
}

#[test]
fn random_traffic_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let (p, r) = (rng.gen_range(1..=6), rng.gen_range(1..=4));
        let mut e = loaded(random_snapshot(&mut rng, p, r));
        let totals = e.state().unwrap().totals().clone();

        for _ in 0..100 {
            let process = rng.gen_range(0..p);
            let v: Vec<Units> = (0..r).map(|_| rng.gen_range(0..=3)).collect();
            let before = e.state().cloned().unwrap();
            let outcome = if rng.gen_bool(0.7) {
                e.request_resources(process, &v).map(|_| ())
            } else {
                e.release_resources(process, &v)
            };

            let after = e.state().unwrap();
            if outcome.is_err() {
                assert_eq!(after, &before);
            }
            assert!(conserves(after));
            assert!(need_is_consistent(after));
            assert_eq!(after.totals(), &totals);
            assert!(after.available().iter().all(|a| *a >= 0));
        }
    }
}

#[test]
fn granted_states_stay_safe() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let mut e = loaded(random_snapshot(&mut rng, 4, 2));
        let started_safe = e.is_safe().unwrap().is_safe();
        for _ in 0..40 {
            let process = rng.gen_range(0..4);
            let v: Vec<Units> = (0..2).map(|_| rng.gen_range(0..=2)).collect();
            if let Ok(g) = e.request_resources(process, &v) {
                assert_eq!(e.is_safe().unwrap().sequence(), Some(&g.sequence[..]));
            }
        }
        if started_safe {
            assert!(e.is_safe().unwrap().is_safe());
        }
    }
}

fn random_snapshot(rng: &mut StdRng, p: usize, r: usize) -> Snapshot {
    let max: Matrix = (0..p)
        .map(|_| (0..r).map(|_| rng.gen_range(0..=6)).collect())
        .collect();
    let allocation: Matrix = max.iter()
        .map(|row| row.iter().map(|m| rng.gen_range(0..=*m)).collect())
        .collect();
    let available: Vector = (0..r).map(|_| rng.gen_range(0..=4)).collect();

    Snapshot { allocation, max, available }
}
