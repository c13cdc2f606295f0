//! After-response tasks
//!
//! Handlers push work onto a [`Deferred`] queue taken from request extensions.
//! Once the handler has produced its response, [`run_after_response`] spawns
//! everything that was queued. Failures are logged and never reach the client.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use axum::{
    async_trait,
    body::Body,
    extract::FromRequestParts,
    http::{request::Parts, Request},
    middleware::Next,
    response::Response,
};

use crate::error::{AppError, DomainError};

type DeferredTask = Pin<Box<dyn Future<Output = Result<(), DomainError>> + Send + 'static>>;

struct QueuedTask {
    label: &'static str,
    task: DeferredTask,
}

/// Queue of work to run once the response is ready
#[derive(Clone, Default)]
pub struct Deferred {
    tasks: Arc<Mutex<Vec<QueuedTask>>>,
}

impl Deferred {
    /// Schedule `task` to run after the response; `label` names it in logs
    pub fn after<F>(&self, label: &'static str, task: F)
    where
        F: Future<Output = Result<(), DomainError>> + Send + 'static,
    {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        tasks.push(QueuedTask {
            label,
            task: Box::pin(task),
        });
    }

    fn take(&self) -> Vec<QueuedTask> {
        let mut tasks = self.tasks.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *tasks)
    }

    /// Spawn every queued task, detached
    fn spawn_all(&self) -> usize {
        let tasks = self.take();
        let count = tasks.len();
        for QueuedTask { label, task } in tasks {
            tokio::spawn(async move {
                if let Err(e) = task.await {
                    tracing::warn!(error = %e, task = label, "Deferred task failed");
                }
            });
        }
        count
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Deferred
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Deferred>().cloned().ok_or_else(|| {
            AppError::Internal("deferred task layer is not installed".to_string())
        })
    }
}

/// Middleware that provides a [`Deferred`] queue and drains it after the handler
pub async fn run_after_response(mut request: Request<Body>, next: Next) -> Response {
    let deferred = Deferred::default();
    request.extensions_mut().insert(deferred.clone());

    let response = next.run(request).await;

    let spawned = deferred.spawn_all();
    if spawned > 0 {
        tracing::debug!(spawned, status = %response.status(), "Spawned deferred tasks");
    }

    response
}
