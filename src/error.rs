/// Errors reported by [`BstMap`](crate::BstMap) accessors.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key has never been inserted into the map.
    #[error("no such key exists in the map")]
    KeyNotFound,
}

/// Result type returned by fallible map accessors.
pub type Result<T> = std::result::Result<T, Error>;
