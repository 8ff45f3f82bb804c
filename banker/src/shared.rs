use crate::utils::*;

/// An [`Engine`] that can be handed to several threads.
///
/// Queries take a shared lock and may overlap. Requests, releases and
/// loads take the exclusive lock for their whole check-then-commit span,
/// so each one is evaluated against a state nobody else is changing.
///
/// A panicking holder cannot leave the engine half-updated (commits are a
/// single assignment), so a poisoned lock is simply taken over.
#[derive(Clone, Debug)]
pub struct SharedEngine {
    inner: Arc<RwLock<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self { inner: Arc::new(RwLock::new(engine)) }
    }

    fn read(&self) -> RwLockReadGuard<'_, Engine> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Engine> {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn load_state(&self, snap: Snapshot) -> Result<(), EngineError> {
        self.write().load_state(snap)
    }

    pub fn is_safe(&self) -> Result<Safety, EngineError> {
        self.read().is_safe()
    }

    pub fn request_resources(
        &self,
        process:    ProcessId,
        request:    &[Units],
    ) -> Result<crate::Grant, Denial> {
        self.write().request_resources(process, request)
    }

    pub fn release_resources(
        &self,
        process:    ProcessId,
        release:    &[Units],
    ) -> Result<(), Denial> {
        self.write().release_resources(process, release)
    }

    /// A copy of the committed state, if any.
    pub fn state(&self) -> Option<State> {
        self.read().state().cloned()
    }

    /// Runs `f` under the shared lock.
    pub fn with<T>(&self, f: impl FnOnce(&Engine) -> T) -> T {
        f(&self.read())
    }
}
