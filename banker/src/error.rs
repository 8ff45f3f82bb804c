use crate::utils::*;

/// Names the part of a [`Snapshot`] an offending entry was found in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    Allocation,
    Max,
    Available,
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::Allocation    => { write!(f, "allocation") },
            Part::Max           => { write!(f, "max") },
            Part::Available     => { write!(f, "available") },
        }
    }
}

/// Appears while turning a [`Snapshot`] into a [`State`]. An engine
/// that ran into one of these refuses to answer anything until a
/// valid snapshot is loaded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{part} matrix has {found} rows, expected one per process ({expected})")]
    Rows { part: Part, expected: usize, found: usize },

    #[error("row {row} of the {part} matrix has {found} entries, expected {expected}")]
    Columns { part: Part, row: usize, expected: usize, found: usize },

    #[error("{part} vector has {found} entries, expected {expected}")]
    Length { part: Part, expected: usize, found: usize },

    #[error("{part}[{process}][{resource}] is negative ({value})")]
    NegativeEntry { part: Part, process: ProcessId, resource: ResourceId, value: Units },

    #[error("available[{resource}] is negative ({value})")]
    NegativeAvailable { resource: ResourceId, value: Units },

    #[error("process {process} holds {allocated} units of resource {resource} but declared at most {max}")]
    AllocationExceedsMax { process: ProcessId, resource: ResourceId, allocated: Units, max: Units },

    #[error("total units of resource {resource} do not fit in {} bits", Units::BITS)]
    Overflow { resource: ResourceId },
}

/// Why a request (or release) vector was rejected before the
/// engine even looked at its state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    #[error("expected {expected} entries, got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("entry for resource {resource} is negative ({value})")]
    Negative { resource: ResourceId, value: Units },

    #[error("process {process} does not exist (there are {processes})")]
    UnknownProcess { process: ProcessId, processes: usize },
}

/// The ways a request or release can be turned down. None of them
/// leaves a trace on the engine's state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    #[error("no valid state has been loaded")]
    NotLoaded,

    #[error("invalid request: {0}")]
    InvalidRequest(Malformed),

    #[error("process {process} asked for {requested} units of resource {resource}, but may only need {need} more")]
    ExceedsMaximumDemand { process: ProcessId, resource: ResourceId, requested: Units, need: Units },

    #[error("process {process} asked for {requested} units of resource {resource}, only {available} available; it must wait")]
    InsufficientResources { process: ProcessId, resource: ResourceId, requested: Units, available: Units },

    #[error("granting the request of process {process} would leave the system unsafe")]
    WouldBeUnsafe { process: ProcessId },

    #[error("process {process} tried to release {released} units of resource {resource} while holding {held}")]
    ExceedsAllocation { process: ProcessId, resource: ResourceId, released: Units, held: Units },
}

impl Denial {
    /// `true` for outcomes a caller may recover from by asking
    /// again later or asking for less.
    pub fn is_retryable(&self) -> bool {
        matches!(self,
            Denial::ExceedsMaximumDemand { .. } |
            Denial::InsufficientResources { .. } |
            Denial::WouldBeUnsafe { .. }
        )
    }

    /// A stable, short name for the kind of denial.
    pub fn kind(&self) -> &'static str {
        match self {
            Denial::NotLoaded                       => { "not-loaded" },
            Denial::InvalidRequest(_)               => { "invalid-request" },
            Denial::ExceedsMaximumDemand { .. }     => { "exceeds-maximum-demand" },
            Denial::InsufficientResources { .. }    => { "insufficient-resources" },
            Denial::WouldBeUnsafe { .. }            => { "would-be-unsafe" },
            Denial::ExceedsAllocation { .. }        => { "exceeds-allocation" },
        }
    }
}

/// Failures of construction, loading and queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("need at least one process and one resource type, got {processes}x{resources}")]
    EmptyDimensions { processes: usize, resources: usize },

    #[error("invalid state: {0}")]
    InvalidState(#[from] StateError),

    #[error("no valid state has been loaded")]
    NotLoaded,
}
