use super::message::{AppMessage, MessageSender};
use crate::kernel::error::ReaderError;
use crate::kernel::services::ports::{
    AsyncExecutor, BoxFuture, Clock, DocumentExtractor, ExtractionError,
};
use crate::kernel::tokenizer::tokenize;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub struct AsyncRuntime {
    runtime: Option<tokio::runtime::Runtime>,
    handle: tokio::runtime::Handle,
    tx: MessageSender,
}

impl AsyncRuntime {
    pub fn new(tx: MessageSender) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .or_else(|e| {
                tracing::error!(
                    error = %e,
                    "Failed to create multi-thread tokio runtime, falling back to current-thread"
                );
                tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
            })?;
        let handle = runtime.handle().clone();
        Ok(Self {
            runtime: Some(runtime),
            handle,
            tx,
        })
    }

    pub fn tokio_handle(&self) -> tokio::runtime::Handle {
        self.handle.clone()
    }

    pub fn sender(&self) -> &MessageSender {
        &self.tx
    }

    /// Extract and tokenize `path` in the background. Exactly one of `DocumentLoaded` or
    /// `DocumentFailed` is sent back.
    pub fn load_document(&self, path: PathBuf, extractor: Arc<dyn DocumentExtractor>) {
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let msg = load_document_task(path, extractor).await;
            let _ = tx.send(msg);
        });
    }
}

impl AsyncExecutor for AsyncRuntime {
    fn spawn(&self, task: BoxFuture) {
        self.handle.spawn(task);
    }
}

impl Drop for AsyncRuntime {
    fn drop(&mut self) {
        // A PDF parse may still be running on the blocking pool; do not wait for it.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

pub(crate) async fn load_document_task(
    path: PathBuf,
    extractor: Arc<dyn DocumentExtractor>,
) -> AppMessage {
    let started = std::time::Instant::now();
    let path_for_extract = path.clone();
    let result =
        tokio::task::spawn_blocking(move || extractor.extract(&path_for_extract)).await;

    let text = match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!(path = %path.display(), error = %e, "document extraction failed");
            return AppMessage::DocumentFailed {
                path,
                error: e.into(),
            };
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "extraction task aborted");
            let error = ExtractionError::Io {
                path: path.clone(),
                source: io::Error::other(e.to_string()),
            };
            return AppMessage::DocumentFailed {
                path,
                error: error.into(),
            };
        }
    };

    let tokens = tokenize(&text);
    if tokens.is_empty() {
        return AppMessage::DocumentFailed {
            path,
            error: ReaderError::EmptyDocument,
        };
    }

    tracing::info!(
        path = %path.display(),
        words = tokens.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "document tokenized"
    );
    AppMessage::DocumentLoaded { path, tokens }
}

impl AsyncExecutor for tokio::runtime::Handle {
    fn spawn(&self, task: BoxFuture) {
        tokio::runtime::Handle::spawn(self, task);
    }
}

/// Wall clock backed by `tokio::time`; honours paused time in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    fn sleep(&self, duration: Duration) -> BoxFuture {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/runtime/runtime.rs"]
mod tests;
