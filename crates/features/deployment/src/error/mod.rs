mod deployment;
mod parameter;
mod registry;

pub use deployment::{DeploymentError, DeploymentErrorExt};
pub use parameter::{ParameterError, ParameterErrorExt};
pub use registry::{RegistryError, RegistryErrorExt};
