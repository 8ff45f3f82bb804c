use crate::{safety, utils::*};

impl Engine {
    /// Builds an engine for `processes` processes and `resources`
    /// resource types, with the default [`Config`]. Nothing can be asked
    /// of it before [`load_state`](Engine::load_state) succeeds.
    pub fn new(processes: usize, resources: usize) -> Result<Self, EngineError> {
        Self::with_config(processes, resources, Config::default())
    }

    pub fn with_config(
        processes:  usize,
        resources:  usize,
        config:     Config,
    ) -> Result<Self, EngineError> {
        if processes == 0 || resources == 0 {
            return Err(EngineError::EmptyDimensions { processes, resources });
        }

        Ok(Self { processes, resources, config, state: None })
    }

    /// Validates and installs `snap` as the committed state.
    ///
    /// On failure any previously loaded state is dropped as well: the
    /// caller meant to replace it, so it is no longer what they believe
    /// the engine holds.
    pub fn load_state(&mut self, snap: Snapshot) -> Result<(), EngineError> {
        self.state = None;
        match State::init(self.processes, self.resources, snap) {
            Ok(s)   => {
                debug!("loaded {}x{} state, totals {:?}", self.processes, self.resources, s.totals());
                self.state = Some(s);
                Ok(())
            },
            Err(e)  => {
                warn!("rejected initial state: {}", e);
                Err(e.into())
            }
        }
    }

    #[inline]
    pub fn processes(&self) -> usize { self.processes }

    #[inline]
    pub fn resources(&self) -> usize { self.resources }

    pub fn config(&self) -> &Config { &self.config }

    pub fn is_loaded(&self) -> bool { self.state.is_some() }

    /// The committed state, for display purposes.
    pub fn state(&self) -> Option<&State> {
        self.state.as_ref()
    }

    pub fn need(&self) -> Result<&Matrix, EngineError> {
        Ok(self.loaded()?.need())
    }

    /// Checks whether the committed state is safe. Read-only, and thus
    /// idempotent: asking twice gives the same verdict and sequence.
    pub fn is_safe(&self) -> Result<Safety, EngineError> {
        let verdict = safety::check(self.loaded()?, self.config.scan);
        debug!("safety check: {:?}", verdict);

        Ok(verdict)
    }

    fn loaded(&self) -> Result<&State, EngineError> {
        self.state
            .as_ref()
            .ok_or(EngineError::NotLoaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> Snapshot {
        Snapshot {
            allocation: vec![vec![1]],
            max:        vec![vec![2]],
            available:  vec![1],
        }
    }

    #[test]
    fn refuses_empty_dimensions() {
        assert_eq!(
            Engine::new(0, 3).unwrap_err(),
            EngineError::EmptyDimensions { processes: 0, resources: 3 }
        );
        assert!(Engine::new(3, 0).is_err());
    }

    #[test]
    fn unloaded_engine_answers_nothing() {
        let e = Engine::new(1, 1).unwrap();
        assert_eq!(e.is_safe().unwrap_err(), EngineError::NotLoaded);
        assert_eq!(e.need().unwrap_err(), EngineError::NotLoaded);
    }

    #[test]
    fn failed_load_drops_previous_state() {
        let mut e = Engine::new(1, 1).unwrap();
        e.load_state(tiny()).unwrap();
        assert!(e.is_loaded());

        let mut bad = tiny();
        bad.allocation[0][0] = 3;
        assert!(matches!(
            e.load_state(bad),
            Err(EngineError::InvalidState(StateError::AllocationExceedsMax { .. }))
        ));
        assert!(!e.is_loaded());
        assert_eq!(e.is_safe().unwrap_err(), EngineError::NotLoaded);

        e.load_state(tiny()).unwrap();
        assert_eq!(e.is_safe().unwrap(), Safety::Safe(vec![0]));
    }
}
