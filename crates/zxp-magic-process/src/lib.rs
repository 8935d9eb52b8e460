pub mod backend;
pub mod protocol;

pub use backend::{DEFAULT_TIMEOUT, ProcessBackend, ProcessBackendConfig};
pub use protocol::{ProcessError, Verb};
