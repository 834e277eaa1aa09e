mod error;
pub(crate) mod utils;

pub use error::{ConstructionError, Error, ResourceKind};

pub type Result<T> = std::result::Result<T, Error>;
