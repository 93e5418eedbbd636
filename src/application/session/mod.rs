mod errors;
mod registry;

pub use errors::{Result, SessionError};
pub use registry::{SessionInfo, SessionRegistry};
