use crate::utils::*;

/// The caller-supplied picture of the system: what everybody holds,
/// what everybody may ever hold, and what is left on the shelf.
///
/// A snapshot is raw input. It becomes a [`State`] only after passing
/// through [`State::init`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub allocation: Matrix,
    pub max:        Matrix,
    pub available:  Vector,
}

/// A committed, validated state. Owned by an [`Engine`], which is the
/// only thing allowed to move units around in it.
///
/// Two invariants hold for every value of this type:
///
/// 1. `need[i][j] == max[i][j] - allocation[i][j] >= 0`
/// 2. `available[j] + Σ_i allocation[i][j] == totals[j]`
///
/// `totals` is fixed when the state is built; units are only ever moved
/// between `available` and some row of `allocation`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    allocation: Matrix,
    max:        Matrix,
    need:       Matrix,
    available:  Vector,
    totals:     Vector,
}

impl State {
    /// Initializes a [`State`] of `processes` rows by `resources` columns.
    /// A successfully returned state is guaranteed to satisfy:
    /// - every matrix has one row per process, every row one entry per resource
    /// - the available vector has one entry per resource
    /// - no entry anywhere is negative
    /// - no process holds more than it declared as its maximum
    /// - per-resource totals fit in [`Units`]
    ///
    /// This function is the gatekeeper to the rest of the library.
    pub fn init(
        processes:  usize,
        resources:  usize,
        snap:       Snapshot,
    ) -> Result<Self, StateError> {
        let Snapshot { allocation, max, available } = snap;

        //---START SHAPES---
        check_shape(Part::Allocation, &allocation, processes, resources)?;
        check_shape(Part::Max, &max, processes, resources)?;
        if available.len() != resources {
            return Err(StateError::Length {
                part:       Part::Available,
                expected:   resources,
                found:      available.len(),
            });
        }
        //---END SHAPES---

        //---START SIGNS---
        for (part, m) in [(Part::Allocation, &allocation), (Part::Max, &max)] {
            for (process, row) in m.iter().enumerate() {
                if let Some((resource, &value)) = row.iter().find_position(|v| **v < 0) {
                    return Err(StateError::NegativeEntry { part, process, resource, value });
                }
            }
        }
        if let Some((resource, &value)) = available.iter().find_position(|v| **v < 0) {
            return Err(StateError::NegativeAvailable { resource, value });
        }
        //---END SIGNS---

        for (process, (held, declared)) in allocation.iter().zip(&max).enumerate() {
            for (resource, (&allocated, &cap)) in held.iter().zip(declared).enumerate() {
                if allocated > cap {
                    return Err(StateError::AllocationExceedsMax { process, resource, allocated, max: cap });
                }
            }
        }

        let mut totals = available.clone();
        for row in &allocation {
            for resource in 0..resources {
                totals[resource] = totals[resource]
                    .checked_add(row[resource])
                    .ok_or(StateError::Overflow { resource })?;
            }
        }

        let need = max.iter()
            .zip(&allocation)
            .map(|(declared, held)| {
                declared.iter()
                    .zip(held)
                    .map(|(m, a)| m - a)
                    .collect()
            })
            .collect();

        Ok(Self { allocation, max, need, available, totals })
    }

    #[inline]
    pub fn processes(&self) -> usize { self.allocation.len() }

    #[inline]
    pub fn resources(&self) -> usize { self.available.len() }

    pub fn allocation(&self) -> &Matrix { &self.allocation }

    pub fn max(&self) -> &Matrix { &self.max }

    pub fn need(&self) -> &Matrix { &self.need }

    pub fn available(&self) -> &Vector { &self.available }

    /// Units of each resource in the whole system, as of loading.
    pub fn totals(&self) -> &Vector { &self.totals }

    /// Validates a request or release vector against this state's shape.
    /// Runs before any of the state is inspected.
    pub(crate) fn check_vector(
        &self,
        process:    ProcessId,
        v:          &[Units],
    ) -> Result<(), Malformed> {
        if process >= self.processes() {
            return Err(Malformed::UnknownProcess { process, processes: self.processes() });
        }
        if v.len() != self.resources() {
            return Err(Malformed::WrongLength { expected: self.resources(), found: v.len() });
        }
        if let Some((resource, &value)) = v.iter().find_position(|x| **x < 0) {
            return Err(Malformed::Negative { resource, value });
        }

        Ok(())
    }

    /// Moves `request` from the shelf to `process`. Callers have already
    /// checked that it fits both the process's need and what is available.
    pub(crate) fn acquire(&mut self, process: ProcessId, request: &[Units]) {
        for resource in 0..self.resources() {
            self.available[resource] -= request[resource];
            self.allocation[process][resource] += request[resource];
        }
        self.refresh_need(process);
    }

    /// The opposite of [`State::acquire`]. `release` must fit what
    /// `process` currently holds.
    pub(crate) fn relinquish(&mut self, process: ProcessId, release: &[Units]) {
        for resource in 0..self.resources() {
            self.allocation[process][resource] -= release[resource];
            self.available[resource] += release[resource];
        }
        self.refresh_need(process);
    }

    // Only the touched row can have changed.
    fn refresh_need(&mut self, process: ProcessId) {
        for resource in 0..self.resources() {
            self.need[process][resource] =
                self.max[process][resource] - self.allocation[process][resource];
        }
    }
}

fn check_shape(
    part:       Part,
    m:          &Matrix,
    processes:  usize,
    resources:  usize,
) -> Result<(), StateError> {
    if m.len() != processes {
        return Err(StateError::Rows { part, expected: processes, found: m.len() });
    }
    if let Some((row, r)) = m.iter().find_position(|r| r.len() != resources) {
        return Err(StateError::Columns { part, row, expected: resources, found: r.len() });
    }

    Ok(())
}
