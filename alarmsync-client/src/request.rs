use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// An in-flight request that can be cancelled. Once cancelled, `join`
/// reports `Cancelled` even if a response already arrived.
pub struct RequestHandle<T> {
    cancel: CancellationToken,
    task: JoinHandle<Result<T>>,
}

impl<T: Send + 'static> RequestHandle<T> {
    pub fn spawn<F>(cancel: CancellationToken, future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => Err(Error::Cancelled),
                result = future => result,
            }
        });

        Self { cancel, task }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub async fn join(self) -> Result<T> {
        let Self { cancel, task } = self;

        let result = match task.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Err(Error::Cancelled),
        };

        if cancel.is_cancelled() {
            tracing::debug!("discarding result of cancelled request");
            return Err(Error::Cancelled);
        }

        result
    }
}

/// Liveness of one screen. Requests spawned through it are cancelled when
/// the scope is closed or dropped.
#[derive(Debug, Default)]
pub struct ScreenScope {
    token: CancellationToken,
}

impl ScreenScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn<T, F>(&self, future: F) -> RequestHandle<T>
    where
        T: Send + 'static,
        F: Future<Output = Result<T>> + Send + 'static,
    {
        RequestHandle::spawn(self.token.child_token(), future)
    }

    pub fn is_active(&self) -> bool {
        !self.token.is_cancelled()
    }

    pub fn close(&self) {
        self.token.cancel();
    }
}

impl Drop for ScreenScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
