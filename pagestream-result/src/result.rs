use crate::error::Error;

/// Result type alias used throughout the pagestream crates.
///
/// Shorthand for `std::result::Result<T, Error>`; every fallible pagestream
/// operation returns this type.
pub type Result<T> = std::result::Result<T, Error>;
