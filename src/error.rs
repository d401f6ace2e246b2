/// Failure of the snapshot collaborator. The UI treats this as "cannot
/// validate right now", never as "no conflict".
#[derive(Debug)]
pub enum SourceError {
    /// The backing store could not be reached or answered with an error.
    Unavailable(String),
    /// The payload was not decodable at all (row-level problems are
    /// skipped leniently instead).
    Malformed(String),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::Unavailable(e) => write!(f, "snapshot source unavailable: {e}"),
            SourceError::Malformed(e) => write!(f, "malformed snapshot payload: {e}"),
        }
    }
}

impl std::error::Error for SourceError {}
