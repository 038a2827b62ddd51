use thiserror::Error;

/// Closed outcome taxonomy shared by every index and the resolver.
///
/// Control flow branches on the kind, never on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed domain name or argument. Never retried.
    BadParam,
    /// Key absent from an index.
    NotFound,
    /// An index held a value of an unexpected shape.
    TypeMismatch,
    /// Cached answer is an alias; follow the target.
    Cname,
    /// Backend reached but nothing usable came back.
    NoResult,
    /// A result was obtained but it redirects to another name.
    NotValid,
    /// Anything else, including transport and database failures.
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadParam => "bad_param",
            ErrorKind::NotFound => "not_found",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::Cname => "cname",
            ErrorKind::NoResult => "no_result",
            ErrorKind::NotValid => "not_valid",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid parameter: {0}")]
    BadParam(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    #[error("CNAME redirect to {0}")]
    CnameRedirect(String),

    #[error("No usable result: {0}")]
    NoResult(String),

    #[error("Result is a redirect: {0}")]
    NotValid(String),

    #[error("CNAME chain longer than {0} hops")]
    ChainTooLong(usize),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Transport timeout: {0}")]
    TransportTimeout(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::BadParam(_) => ErrorKind::BadParam,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::TypeMismatch(_) => ErrorKind::TypeMismatch,
            DomainError::CnameRedirect(_) => ErrorKind::Cname,
            DomainError::NoResult(_) => ErrorKind::NoResult,
            DomainError::NotValid(_) => ErrorKind::NotValid,
            DomainError::ChainTooLong(_)
            | DomainError::Transport(_)
            | DomainError::TransportTimeout(_)
            | DomainError::DatabaseError(_)
            | DomainError::Unknown(_) => ErrorKind::Unknown,
        }
    }

    /// Cache-layer misses that drive fallback to the next source.
    pub fn is_miss(&self) -> bool {
        matches!(self.kind(), ErrorKind::NotFound | ErrorKind::NoResult)
    }

    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            DomainError::Transport(_) | DomainError::TransportTimeout(_)
        )
    }
}
