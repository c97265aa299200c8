mod clock;
mod e2e;
mod error;
mod header_encoding;

pub use clock::*;
pub use e2e::*;
pub use error::*;
pub use header_encoding::*;
