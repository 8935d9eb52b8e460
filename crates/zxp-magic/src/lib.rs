pub mod backend;
pub mod gateway;
pub mod package;
pub mod record;

pub use backend::{Backend, BackendError};
pub use gateway::{CommandGateway, GatewayError};
pub use package::{ACCEPTED_SUFFIXES, PackageError, PackageKind, validate_package_path};
pub use record::{ExtensionId, ExtensionRecord, HostCompatibility, InstallOutcome};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
