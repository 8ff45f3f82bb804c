//! Everything around the engine that talks to people: reading initial
//! states and requests, printing matrices and verdicts, the interactive
//! menu and the trace replayer.

pub use std::io::{self, BufRead, BufReader, BufWriter, Write};
pub use std::fs::File;
pub use std::path::{Path, PathBuf};
pub use anyhow::{anyhow, bail, Context, Result};
pub use clap::{Parser, ValueEnum};
pub use itertools::Itertools;
pub use banker::{Config, Denial, Engine, Grant, Matrix, ProcessId, Safety, ScanOrder,
    Snapshot, State, Units, Vector};

pub mod display;
pub mod input;
pub mod menu;
pub mod replay;

pub use crate::input::{Console, JsonSource, Loaded, StateFile, StateSource};

/// Admission order of the safety check, as picked on the command line.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Scan {
    /// Admit every runnable process per pass over the list
    Sweep,
    /// Restart from the first process after every admission
    Restart,
}

impl From<Scan> for ScanOrder {
    fn from(s: Scan) -> Self {
        match s {
            Scan::Sweep     => { ScanOrder::Sweep },
            Scan::Restart   => { ScanOrder::Restart },
        }
    }
}

/// Installs the process-wide logger. Verbosity grows with each `-v`;
/// `RUST_LOG`, if set, has the last word.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0   => { log::LevelFilter::Warn },
        1   => { log::LevelFilter::Info },
        2   => { log::LevelFilter::Debug },
        _   => { log::LevelFilter::Trace },
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Builds an engine from whatever `source` produces.
pub fn load_engine<S: StateSource>(source: &mut S, config: Config) -> Result<Engine> {
    let Loaded { processes, resources, snapshot } = source.read_snapshot()?;
    let mut engine = Engine::with_config(processes, resources, config)?;
    engine.load_state(snapshot)
        .context("Initial state rejected")?;
    log::info!("engine ready: {} processes, {} resource types", processes, resources);

    Ok(engine)
}
