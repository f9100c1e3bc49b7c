//! Scripted response queues.

use std::collections::VecDeque;

use crate::error::ApiError;
use crate::port::{HeaderCode, Response};

/// One scripted outcome of a remote call.
pub type Scripted<T> = Result<Response<T>, ApiError>;

/// Responses handed out in order. The last one repeats once the rest are
/// used up, so a single entry scripts every call.
#[derive(Debug, Clone)]
pub struct Script<T> {
    queue: VecDeque<Scripted<T>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<T: Clone> Script<T> {
    pub fn new(responses: Vec<Scripted<T>>) -> Self {
        Self {
            queue: responses.into(),
        }
    }

    /// The next response, or `None` if nothing was scripted.
    pub fn next(&mut self) -> Option<Scripted<T>> {
        if self.queue.len() > 1 {
            self.queue.pop_front()
        } else {
            self.queue.front().cloned()
        }
    }
}

/// A successful response.
pub fn ok<T>(body: T) -> Scripted<T> {
    Ok(Response::ok(body))
}

/// A response whose header reports an expired session.
pub fn no_session<T: Default>() -> Scripted<T> {
    Ok(Response::failed("API_ERROR", HeaderCode::NoSession))
}

/// A response whose header reports the request throttle was exceeded.
pub fn throttled<T: Default>() -> Scripted<T> {
    Ok(Response::failed("API_ERROR", HeaderCode::ExceededThrottle))
}

/// A response with a non-OK operation status and an OK header.
pub fn failed<T: Default>(status: &str) -> Scripted<T> {
    Ok(Response::failed(status, HeaderCode::Ok))
}

/// A transport-level failure before any response arrived.
pub fn unreachable<T>(operation: &'static str) -> Scripted<T> {
    Err(ApiError::Transport {
        operation,
        reason: "connection refused".into(),
    })
}
