pub mod error;
pub mod storage;
pub mod tolerance;
pub mod traits;

pub use error::{AlpsError, Result};
pub use storage::{HeapStorage, Storage};
pub use tolerance::Tolerance;
pub use traits::Validate;
