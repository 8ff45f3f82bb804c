//! Welcome to `banker`!
//!
//! A decision engine for deadlock avoidance. Given `P` processes competing
//! for `R` types of interchangeable resources, it keeps track of who holds
//! what and who may still ask for what, and tells whether a request can be
//! granted without ever risking a deadlock.
//!
//! The engine does no I/O. Reading input and printing results is left to
//! callers (see the `teller` crate for a console front end).

mod engine;
mod request;
pub mod analyze;
pub mod config;
pub mod error;
pub mod safety;
pub mod shared;
pub mod state;
pub mod utils;

pub use crate::{
    config::Config,
    error::{Denial, EngineError, Malformed, Part, StateError},
    request::Grant,
    safety::{Safety, ScanOrder},
    shared::SharedEngine,
    state::{Snapshot, State},
    utils::{Matrix, ProcessId, ResourceId, Units, Vector},
};

/// Our fundamental unit of interest: the Resource State Engine.
///
/// An engine is built for a fixed number of processes and resource types,
/// and is then loaded with a [`Snapshot`] of the system. From then on it
/// answers two questions:
///
/// 1. [`is_safe`](Engine::is_safe): can every process still run to
///    completion, and in what order?
/// 2. [`request_resources`](Engine::request_resources): may process `p`
///    have these extra units right now?
///
/// > ***ATTENTION:*** a request is either granted *and committed*, or it
/// > is denied and the engine is left exactly as it was. There is no
/// > "pending" state in between. Evaluation happens on a copy of the
/// > committed [`State`] which either replaces it or is thrown away.
///
/// Units may be handed back through
/// [`release_resources`](Engine::release_resources).
#[derive(Clone, Debug)]
pub struct Engine {
    processes:  usize,
    resources:  usize,
    config:     Config,
    // `None` until a snapshot passes validation, and again after one fails.
    state:      Option<State>,
}
