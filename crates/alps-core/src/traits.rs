use crate::error::Result;

/// Validate structural integrity of a derived geometric entity.
pub trait Validate {
    fn validate(&self) -> Result<()>;
}
