pub mod errors;
pub mod shutdown;

pub use errors::{AppError, DomainError, InfraError};
pub use shutdown::{ShutdownCoordinator, ShutdownSignal};
