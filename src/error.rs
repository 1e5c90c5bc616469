use ::core::fmt;

use thiserror::Error;

/// Which family of container rejected an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Queue,
    Stack,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queue => f.write_str("queue"),
            Self::Stack => f.write_str("stack"),
        }
    }
}

/// Tag of a [`CollectionError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Insert into a full fixed-capacity container.
    Overflow,
    /// Remove or peek on an empty container.
    Underflow,
    /// Construction with an unusable capacity.
    InvalidArgument,
}

/// Error returned by queue and stack operations.
///
/// Errors are raised before any mutation, so a container that returned one
/// is in the same state as before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError<T> {
    /// The container is at capacity. `value` is the rejected element.
    #[error("{kind} is full, cannot insert element")]
    Overflow { kind: Collection, value: T },
    /// The container holds no elements.
    #[error("{kind} is empty")]
    Underflow { kind: Collection },
    /// The requested capacity is below 1.
    #[error("{kind} capacity must be at least 1, got {capacity}")]
    InvalidArgument { kind: Collection, capacity: usize },
}

impl<T> CollectionError<T> {
    pub(crate) fn overflow(kind: Collection, value: T, capacity: usize) -> Self {
        tracing::trace!(%kind, capacity, "rejected insert into full container");
        Self::Overflow { kind, value }
    }

    pub(crate) fn underflow(kind: Collection) -> Self {
        tracing::trace!(%kind, "rejected access to empty container");
        Self::Underflow { kind }
    }

    pub(crate) fn invalid_capacity(kind: Collection, capacity: usize) -> Self {
        tracing::debug!(%kind, capacity, "rejected container capacity");
        Self::InvalidArgument { kind, capacity }
    }

    /// Returns the tag of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Overflow { .. } => ErrorKind::Overflow,
            Self::Underflow { .. } => ErrorKind::Underflow,
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
        }
    }

    /// Returns the container family that raised this error.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Overflow { kind, .. } | Self::Underflow { kind } | Self::InvalidArgument { kind, .. } => *kind,
        }
    }

    /// Gives back the element rejected by an overflowing insert.
    ///
    /// # Examples
    ///
    /// ```
    /// use fifo_lifo::ArrayStack;
    ///
    /// let mut stack = ArrayStack::new(1).unwrap();
    /// stack.push(String::from("kept")).unwrap();
    ///
    /// let err = stack.push(String::from("rejected")).unwrap_err();
    ///
    /// assert_eq!(err.into_value().as_deref(), Some("rejected"));
    /// ```
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Overflow { value, .. } => Some(value),
            _ => None,
        }
    }
}
