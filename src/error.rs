/// Error type for package resolution and metadata handling.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// A `category/package` atom that is malformed or not present in the tree.
    #[error("invalid atom: {0}")]
    InvalidAtom(String),

    /// A bare package name matching no category and no `virtual/` package.
    #[error("no package named {0} in the tree")]
    UnresolvablePackage(String),

    /// A bare package name present in more than one category.
    #[error("{name} is ambiguous, use one of: {}", .candidates.join(" "))]
    AmbiguousPackage {
        /// The bare name that was looked up.
        name: String,
        /// Matching `category/package` atoms.
        candidates: Vec<String>,
    },

    /// A glob pattern could not be built from the tree root.
    #[error("invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Metadata markup that the tokenizer could not consume.
    #[error("malformed markup: {0}")]
    Markup(String),

    /// Reading a metadata file failed.
    #[error("i/o error: {0}")]
    Io(String),
}

/// Result type for metainfo operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e.to_string())
    }
}
