use crate::{analyze, safety, utils::*};

/// A granted request. Carries the safe sequence that justified it,
/// computed on the state that has just been committed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub process:    ProcessId,
    pub sequence:   Vec<ProcessId>,
}

// Requesting and releasing are considered parts of the algorithm, so
// they're put here instead of the file hosting the rest of the impls.
impl Engine {
    /// Asks for `request[j]` more units of each resource `j` on behalf of
    /// `process`. Checks run in this order, and the first one to trip
    /// decides the [`Denial`]:
    ///
    /// 1. the request is well formed ([`Denial::InvalidRequest`]);
    /// 2. it fits the process's remaining need ([`Denial::ExceedsMaximumDemand`]);
    /// 3. it fits what is available right now ([`Denial::InsufficientResources`]);
    /// 4. the state after granting it is safe ([`Denial::WouldBeUnsafe`]).
    ///
    /// Only a request that passes all four changes the engine.
    pub fn request_resources(
        &mut self,
        process:    ProcessId,
        request:    &[Units],
    ) -> Result<Grant, Denial> {
        let state = self.state.as_ref().ok_or(Denial::NotLoaded)?;
        state.check_vector(process, request)
            .map_err(|m| denied(Denial::InvalidRequest(m)))?;

        let need = &state.need()[process];
        if let Some(resource) = (0..self.resources).find(|&j| request[j] > need[j]) {
            return Err(denied(Denial::ExceedsMaximumDemand {
                process,
                resource,
                requested:  request[resource],
                need:       need[resource],
            }));
        }

        let available = state.available();
        if let Some(resource) = (0..self.resources).find(|&j| request[j] > available[j]) {
            return Err(denied(Denial::InsufficientResources {
                process,
                resource,
                requested:  request[resource],
                available:  available[resource],
            }));
        }

        // Pretend it's granted and see whether everybody can still finish.
        let mut tentative = state.clone();
        tentative.acquire(process, request);
        match safety::check(&tentative, self.config.scan) {
            Safety::Safe(sequence)  => {
                debug_assert!(analyze::conserves(&tentative));
                debug_assert!(analyze::need_is_consistent(&tentative));
                self.state = Some(tentative);
                debug!("granted {:?} to P{}, safe sequence {:?}", request, process, sequence);
                Ok(Grant { process, sequence })
            },
            Safety::Unsafe          => {
                Err(denied(Denial::WouldBeUnsafe { process }))
            }
        }
    }

    /// Hands `release[j]` units of each resource `j` back from `process`
    /// to the shelf. Releasing can only make the system safer, so no
    /// safety check runs; the vector must be well formed and may not
    /// exceed what the process holds.
    pub fn release_resources(
        &mut self,
        process:    ProcessId,
        release:    &[Units],
    ) -> Result<(), Denial> {
        let state = self.state.as_ref().ok_or(Denial::NotLoaded)?;
        state.check_vector(process, release)
            .map_err(|m| denied(Denial::InvalidRequest(m)))?;

        let held = &state.allocation()[process];
        if let Some(resource) = (0..self.resources).find(|&j| release[j] > held[j]) {
            return Err(denied(Denial::ExceedsAllocation {
                process,
                resource,
                released:   release[resource],
                held:       held[resource],
            }));
        }

        let mut next = state.clone();
        next.relinquish(process, release);
        debug_assert!(analyze::conserves(&next));
        debug_assert!(analyze::need_is_consistent(&next));
        self.state = Some(next);
        debug!("P{} released {:?}", process, release);

        Ok(())
    }
}

#[inline]
fn denied(d: Denial) -> Denial {
    debug!("denied: {}", d);
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Engine {
        let mut e = Engine::new(2, 2).unwrap();
        e.load_state(Snapshot {
            allocation: vec![vec![1, 0], vec![0, 1]],
            max:        vec![vec![2, 2], vec![1, 2]],
            available:  vec![1, 1],
        }).unwrap();
        e
    }

    #[test]
    fn malformed_requests_come_first() {
        let mut e = engine();
        assert_eq!(
            e.request_resources(0, &[1]).unwrap_err(),
            Denial::InvalidRequest(Malformed::WrongLength { expected: 2, found: 1 })
        );
        assert_eq!(
            e.request_resources(0, &[0, -1]).unwrap_err(),
            Denial::InvalidRequest(Malformed::Negative { resource: 1, value: -1 })
        );
        assert_eq!(
            e.request_resources(7, &[0, 0]).unwrap_err(),
            Denial::InvalidRequest(Malformed::UnknownProcess { process: 7, processes: 2 })
        );
    }

    #[test]
    fn need_is_checked_before_availability() {
        let mut e = engine();
        // Both bounds are exceeded; the need check wins.
        assert_eq!(
            e.request_resources(1, &[5, 0]).unwrap_err(),
            Denial::ExceedsMaximumDemand { process: 1, resource: 0, requested: 5, need: 1 }
        );
        assert_eq!(
            e.request_resources(0, &[0, 2]).unwrap_err(),
            Denial::InsufficientResources { process: 0, resource: 1, requested: 2, available: 1 }
        );
    }

    #[test]
    fn empty_request_is_granted() {
        let mut e = engine();
        let before = e.state().cloned();
        let g = e.request_resources(0, &[0, 0]).unwrap();
        assert_eq!(g.process, 0);
        assert_eq!(e.state().cloned(), before);
    }

    #[test]
    fn release_returns_units() {
        let mut e = engine();
        e.release_resources(0, &[1, 0]).unwrap();
        let s = e.state().unwrap();
        assert_eq!(s.available(), &vec![2, 1]);
        assert_eq!(s.need()[0], vec![2, 2]);
        assert_eq!(
            e.release_resources(1, &[0, 2]).unwrap_err(),
            Denial::ExceedsAllocation { process: 1, resource: 1, released: 2, held: 1 }
        );
    }

    #[test]
    fn nothing_works_unloaded() {
        let mut e = Engine::new(1, 1).unwrap();
        assert_eq!(e.request_resources(0, &[0]).unwrap_err(), Denial::NotLoaded);
        assert_eq!(e.release_resources(0, &[0]).unwrap_err(), Denial::NotLoaded);
    }
}
