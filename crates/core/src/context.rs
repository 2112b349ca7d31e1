//! Per-request context passed through every collaborator call.
//!
//! The domain and use-case layers never inspect it; they hand the same
//! reference to each repository call. Collaborators decide how to honour the
//! cancellation flag and deadline.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Why a context is no longer usable.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("request cancelled")]
    Cancelled,
    #[error("request deadline exceeded")]
    DeadlineExceeded,
}

/// Request-scoped cancellation and deadline.
///
/// Clones share the cancellation flag, so cancelling any clone cancels all.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    deadline: Option<DateTime<Utc>>,
    cancellation: Arc<AtomicBool>,
}

impl RequestContext {
    /// A context with no deadline.
    pub fn background() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            deadline: None,
            cancellation: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns a copy bound to `deadline`, sharing the cancellation flag.
    pub fn with_deadline(&self, deadline: DateTime<Utc>) -> Self {
        Self {
            request_id: self.request_id,
            deadline: Some(deadline),
            cancellation: self.cancellation.clone(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Cancel this context and every clone of it.
    pub fn cancel(&self) {
        self.cancellation.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.load(Ordering::Relaxed)
    }

    /// Checks cancellation first, then whether `now` has reached the deadline.
    pub fn check_at(&self, now: DateTime<Utc>) -> Result<(), ContextError> {
        if self.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if now >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn background_is_always_live() {
        let ctx = RequestContext::background();
        assert_eq!(ctx.check_at(Utc::now()), Ok(()));
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn cancel_propagates_to_clones() {
        let ctx = RequestContext::background();
        let child = ctx.with_deadline(Utc::now() + Duration::hours(1));
        ctx.cancel();
        assert!(child.is_cancelled());
        assert_eq!(child.check_at(Utc::now()), Err(ContextError::Cancelled));
        assert_eq!(child.request_id(), ctx.request_id());
    }

    #[test]
    fn deadline_is_inclusive() {
        let now = Utc::now();
        let ctx = RequestContext::background().with_deadline(now);
        assert_eq!(ctx.check_at(now - Duration::milliseconds(1)), Ok(()));
        assert_eq!(ctx.check_at(now), Err(ContextError::DeadlineExceeded));
    }
}
