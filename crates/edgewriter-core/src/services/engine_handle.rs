//! Lazy, single-flight ownership of the inference engine.
//!
//! The model is loaded on first use, never at startup. However many callers
//! race on the first [`EngineHandle::acquire`], exactly one load runs; the
//! rest wait for its outcome. A failed load is remembered and returned to
//! every later caller until the process restarts.
//!
//! State lives in a `tokio::sync::watch` channel:
//!
//! - readers (`status`, the health endpoint) peek without blocking
//! - the `Uninitialized -> Loading` transition happens inside
//!   `send_if_modified`, so only one caller can win it
//! - the load itself runs on a spawned task, so a caller that is cancelled
//!   while waiting cannot strand the handle in `Loading`

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;
use tracing::{error, info};

use crate::ports::{EngineLoadError, EngineLoader, InferenceEngine};

/// Lifecycle of the engine.
#[derive(Clone)]
pub enum EngineState {
    Uninitialized,
    Loading,
    Ready(Arc<dyn InferenceEngine>),
    Failed(EngineLoadError),
}

impl EngineState {
    pub const fn status(&self) -> EngineStatus {
        match self {
            Self::Uninitialized => EngineStatus::Uninitialized,
            Self::Loading => EngineStatus::Loading,
            Self::Ready(_) => EngineStatus::Ready,
            Self::Failed(_) => EngineStatus::Failed,
        }
    }

    const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready(_) | Self::Failed(_))
    }

    fn outcome(&self) -> Option<Result<Arc<dyn InferenceEngine>, EngineLoadError>> {
        match self {
            Self::Ready(engine) => Some(Ok(Arc::clone(engine))),
            Self::Failed(err) => Some(Err(err.clone())),
            Self::Uninitialized | Self::Loading => None,
        }
    }
}

impl fmt::Debug for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(err) => f.debug_tuple("Failed").field(err).finish(),
            other => write!(f, "{}", other.status()),
        }
    }
}

/// Payload-free view of [`EngineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

impl fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Process-wide owner of the engine.
pub struct EngineHandle {
    loader: Arc<dyn EngineLoader>,
    state: Arc<watch::Sender<EngineState>>,
    model_id: String,
}

impl EngineHandle {
    pub fn new(loader: Arc<dyn EngineLoader>) -> Self {
        let model_id = loader.model_id();
        let (state, _) = watch::channel(EngineState::Uninitialized);
        Self {
            loader,
            state: Arc::new(state),
            model_id,
        }
    }

    /// Model identifier reported by the loader.
    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    /// Current status. Never blocks and never triggers a load.
    pub fn status(&self) -> EngineStatus {
        self.state.borrow().status()
    }

    pub fn is_loaded(&self) -> bool {
        self.status() == EngineStatus::Ready
    }

    /// Get the engine, loading it first if nobody has yet.
    ///
    /// Concurrent callers during the first load all observe the same
    /// outcome. Once `Failed`, every call returns the stored error without
    /// retrying.
    pub async fn acquire(&self) -> Result<Arc<dyn InferenceEngine>, EngineLoadError> {
        if let Some(outcome) = self.state.borrow().outcome() {
            return outcome;
        }

        let mut rx = self.state.subscribe();
        let claimed = self.state.send_if_modified(|state| {
            if matches!(state, EngineState::Uninitialized) {
                *state = EngineState::Loading;
                true
            } else {
                false
            }
        });
        if claimed {
            self.spawn_load();
        }

        let state = rx
            .wait_for(EngineState::is_terminal)
            .await
            .map_err(|_| EngineLoadError::Aborted)?;
        state.outcome().unwrap_or(Err(EngineLoadError::Aborted))
    }

    fn spawn_load(&self) {
        let loader = Arc::clone(&self.loader);
        let state = Arc::clone(&self.state);
        let model_id = self.model_id.clone();

        tokio::spawn(async move {
            info!(target: "edgewriter.engine", model = %model_id, "Loading model");
            let started = Instant::now();

            // Inner task so a panicking loader still resolves the waiters.
            let joined = tokio::spawn(async move { loader.load().await }).await;
            let next = match joined {
                Ok(Ok(engine)) => {
                    info!(
                        target: "edgewriter.engine",
                        model = %model_id,
                        elapsed = ?started.elapsed(),
                        "Model loaded"
                    );
                    EngineState::Ready(engine)
                }
                Ok(Err(err)) => {
                    error!(target: "edgewriter.engine", model = %model_id, error = %err, "Model load failed");
                    EngineState::Failed(err)
                }
                Err(join_err) => {
                    error!(target: "edgewriter.engine", model = %model_id, error = %join_err, "Model load task died");
                    EngineState::Failed(EngineLoadError::Aborted)
                }
            };
            state.send_replace(next);
        });
    }
}

impl fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHandle")
            .field("model_id", &self.model_id)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Completion, CompletionRequest, InferenceError};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct EchoEngine;

    #[async_trait]
    impl InferenceEngine for EchoEngine {
        async fn complete(&self, request: CompletionRequest) -> Result<Completion, InferenceError> {
            Ok(Completion {
                text: request.prompt,
                usage: None,
            })
        }
    }

    struct SlowLoader {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl EngineLoader for SlowLoader {
        fn model_id(&self) -> String {
            "test-model".into()
        }

        async fn load(&self) -> Result<Arc<dyn InferenceEngine>, EngineLoadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if self.fail {
                Err(EngineLoadError::Rejected("corrupt".into()))
            } else {
                Ok(Arc::new(EchoEngine))
            }
        }
    }

    fn handle(fail: bool) -> (Arc<SlowLoader>, EngineHandle) {
        let loader = Arc::new(SlowLoader {
            calls: AtomicUsize::new(0),
            fail,
        });
        let handle = EngineHandle::new(Arc::clone(&loader) as Arc<dyn EngineLoader>);
        (loader, handle)
    }

    #[tokio::test]
    async fn test_starts_uninitialized() {
        let (loader, handle) = handle(false);
        assert_eq!(handle.status(), EngineStatus::Uninitialized);
        assert!(!handle.is_loaded());
        assert_eq!(handle.model_id(), "test-model");
        assert_eq!(loader.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_acquire_loads_once() {
        let (loader, handle) = handle(false);
        handle.acquire().await.unwrap();
        handle.acquire().await.unwrap();
        assert!(handle.is_loaded());
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_is_sticky() {
        let (loader, handle) = handle(true);
        let first = handle.acquire().await.err().expect("load should fail");
        let second = handle.acquire().await.err().expect("failure is remembered");
        assert_eq!(first, EngineLoadError::Rejected("corrupt".into()));
        assert_eq!(first, second);
        assert_eq!(handle.status(), EngineStatus::Failed);
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_strand_load() {
        let (loader, handle) = handle(false);
        let handle = Arc::new(handle);

        let waiter = {
            let handle = Arc::clone(&handle);
            tokio::spawn(async move { handle.acquire().await.map(|_| ()) })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        waiter.abort();

        handle.acquire().await.unwrap();
        assert_eq!(loader.calls.load(Ordering::SeqCst), 1);
    }
}
