use crate::io::store::{EntityKind, StoreError};

/// Broad classification used when reporting a failed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An index or id did not resolve to a record
    NotFound,
    /// The command needs a selection that is absent
    PreconditionFailed,
    /// The store rejected or failed the operation
    StoreFailure,
}

/// Error raised by a session command
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid {0} index")]
    InvalidIndex(EntityKind),
    #[error("{0} not found")]
    NotFound(EntityKind),
    #[error("no {0} selected")]
    NoSelection(EntityKind),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::InvalidIndex(_) | SessionError::NotFound(_) => ErrorKind::NotFound,
            SessionError::NoSelection(_) => ErrorKind::PreconditionFailed,
            SessionError::Store(_) => ErrorKind::StoreFailure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SessionError::InvalidIndex(EntityKind::Project).to_string(),
            "invalid project index"
        );
        assert_eq!(
            SessionError::NotFound(EntityKind::Task).to_string(),
            "task not found"
        );
        assert_eq!(
            SessionError::NoSelection(EntityKind::Log).to_string(),
            "no log selected"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            SessionError::InvalidIndex(EntityKind::Task).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            SessionError::NoSelection(EntityKind::Project).kind(),
            ErrorKind::PreconditionFailed
        );
        assert_eq!(
            SessionError::from(StoreError::Invalid("name is required".into())).kind(),
            ErrorKind::StoreFailure
        );
    }
}
