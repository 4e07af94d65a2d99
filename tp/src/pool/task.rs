//! Task, key, and outcome types for the pool

use std::collections::HashMap;
use std::fmt;

use futures::FutureExt;
use futures::future::BoxFuture;

/// Boxed task action: one unit of asynchronous work
pub(crate) type TaskAction<T> = Box<dyn FnOnce() -> BoxFuture<'static, eyre::Result<T>> + Send>;

/// Result slot identifier
///
/// Explicit string keys and auto-assigned positional indexes live in the
/// same map but are distinct key values: `Name("0")` never collides with
/// `Index(0)`. Presence of an explicit key is what decides which variant a
/// task gets - a key of `"0"` or `""` is still an explicit key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskKey {
    /// Auto-assigned dequeue-order index
    Index(u64),
    /// Caller-supplied name
    Name(String),
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskKey::Index(i) => write!(f, "{i}"),
            TaskKey::Name(name) => write!(f, "{name}"),
        }
    }
}

impl From<u64> for TaskKey {
    fn from(index: u64) -> Self {
        TaskKey::Index(index)
    }
}

impl From<&str> for TaskKey {
    fn from(name: &str) -> Self {
        TaskKey::Name(name.to_string())
    }
}

impl From<String> for TaskKey {
    fn from(name: String) -> Self {
        TaskKey::Name(name)
    }
}

/// Outcome of a single task, stored in the result map
///
/// Failures are regular values here: one failing task never aborts its
/// siblings or the pool.
#[derive(Debug)]
pub enum TaskOutcome<T> {
    /// The action resolved with a value
    Success(T),
    /// The action failed; the error is the stored result
    Failure(eyre::Report),
    /// A no-op entry that reserved a result slot without running
    Empty,
}

impl<T> TaskOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TaskOutcome::Failure(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, TaskOutcome::Empty)
    }

    /// The success value, if any
    pub fn value(&self) -> Option<&T> {
        match self {
            TaskOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// The captured error, if any
    pub fn error(&self) -> Option<&eyre::Report> {
        match self {
            TaskOutcome::Failure(report) => Some(report),
            _ => None,
        }
    }

    /// Consume the outcome, yielding the success value
    pub fn into_value(self) -> Option<T> {
        match self {
            TaskOutcome::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// Accumulated results for a pool's lifetime, keyed by [`TaskKey`]
pub type ResultMap<T> = HashMap<TaskKey, TaskOutcome<T>>;

/// A unit of submittable work: an asynchronous action plus an optional
/// explicit result key
pub struct Task<T> {
    pub(crate) key: Option<TaskKey>,
    pub(crate) action: Option<TaskAction<T>>,
}

impl<T> Task<T> {
    /// Create a task whose result slot is its dequeue-order index
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = eyre::Result<T>> + Send + 'static,
    {
        Self {
            key: None,
            action: Some(Box::new(move || action().boxed())),
        }
    }

    /// Create a task with an explicit result key
    pub fn keyed<K, F, Fut>(key: K, action: F) -> Self
    where
        K: Into<TaskKey>,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = eyre::Result<T>> + Send + 'static,
    {
        Self {
            key: Some(key.into()),
            action: Some(Box::new(move || action().boxed())),
        }
    }

    /// Create a no-op entry that reserves a result slot under its
    /// dequeue-order index without performing any work
    pub fn noop() -> Self {
        Self { key: None, action: None }
    }

    /// Create a no-op entry under an explicit key
    pub fn noop_keyed<K: Into<TaskKey>>(key: K) -> Self {
        Self {
            key: Some(key.into()),
            action: None,
        }
    }

    /// The explicit key, if one was supplied
    pub fn key(&self) -> Option<&TaskKey> {
        self.key.as_ref()
    }
}

impl<T> fmt::Debug for Task<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("key", &self.key)
            .field("noop", &self.action.is_none())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_namespaces_are_distinct() {
        // An integer-valued string key is not the same slot as the index
        assert_ne!(TaskKey::from("0"), TaskKey::from(0u64));
        assert_eq!(TaskKey::from("x"), TaskKey::Name("x".to_string()));
        assert_eq!(TaskKey::from(3u64), TaskKey::Index(3));
    }

    #[test]
    fn test_key_display() {
        assert_eq!(TaskKey::Index(7).to_string(), "7");
        assert_eq!(TaskKey::Name("alpha".to_string()).to_string(), "alpha");
    }

    #[test]
    fn test_falsy_keys_are_still_keys() {
        let task: Task<u32> = Task::keyed("", || async { Ok(1) });
        assert_eq!(task.key(), Some(&TaskKey::Name(String::new())));

        let task: Task<u32> = Task::keyed("0", || async { Ok(1) });
        assert_eq!(task.key(), Some(&TaskKey::Name("0".to_string())));
    }

    #[test]
    fn test_outcome_accessors() {
        let ok: TaskOutcome<u32> = TaskOutcome::Success(5);
        assert!(ok.is_success());
        assert_eq!(ok.value(), Some(&5));
        assert!(ok.error().is_none());

        let err: TaskOutcome<u32> = TaskOutcome::Failure(eyre::eyre!("boom"));
        assert!(err.is_failure());
        assert_eq!(err.error().unwrap().to_string(), "boom");

        let empty: TaskOutcome<u32> = TaskOutcome::Empty;
        assert!(empty.is_empty());
        assert!(empty.value().is_none());
    }
}
