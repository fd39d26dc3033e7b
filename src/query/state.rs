use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

/// Identifies one logical query. Subscribers with equal keys share a cache
/// entry and a poller.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueryKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Result of a query as seen by the rendering layer.
///
/// Exactly one of pending, error or success. `T` may be unsized so the cache
/// can hold type-erased values.
#[derive(Debug)]
pub enum QueryState<T: ?Sized> {
    /// No response has arrived yet.
    Pending,
    /// The latest attempt failed; carries the error message.
    Error(String),
    /// The latest attempt produced validated data.
    Success(Arc<T>),
}

impl<T: ?Sized> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        match self {
            QueryState::Pending => QueryState::Pending,
            QueryState::Error(msg) => QueryState::Error(msg.clone()),
            QueryState::Success(data) => QueryState::Success(Arc::clone(data)),
        }
    }
}

impl<T: ?Sized> QueryState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Lower-case label used in exports and the detail overlay.
    pub fn label(&self) -> &'static str {
        match self {
            QueryState::Pending => "pending",
            QueryState::Error(_) => "error",
            QueryState::Success(_) => "success",
        }
    }
}

/// Value stored in the cache for any query type.
pub(crate) type ErasedData = dyn Any + Send + Sync;

impl QueryState<ErasedData> {
    /// Recover the concrete type. A mismatch means two queries with the same
    /// key were registered with different response types.
    pub(crate) fn downcast<T: Any + Send + Sync>(self) -> QueryState<T> {
        match self {
            QueryState::Pending => QueryState::Pending,
            QueryState::Error(msg) => QueryState::Error(msg),
            QueryState::Success(data) => match data.downcast::<T>() {
                Ok(data) => QueryState::Success(data),
                Err(_) => QueryState::Error(format!(
                    "cached value is not a {}",
                    std::any::type_name::<T>()
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_match_variant() {
        let ok: QueryState<u32> = QueryState::Success(Arc::new(7));
        assert_eq!(ok.data(), Some(&7));
        assert_eq!(ok.error(), None);
        assert_eq!(ok.label(), "success");

        let err: QueryState<u32> = QueryState::Error("boom".into());
        assert!(err.is_error());
        assert_eq!(err.data(), None);
        assert_eq!(err.error(), Some("boom"));

        assert!(QueryState::<u32>::Pending.is_pending());
    }

    #[test]
    fn downcast_checks_type() {
        let erased: QueryState<ErasedData> = QueryState::Success(Arc::new(5u64));
        assert_eq!(erased.clone().downcast::<u64>().data(), Some(&5));
        assert!(erased.downcast::<String>().is_error());
    }
}
