//! # Contract Deployment
//!
//! Decides which optional contract features may be combined and explains why a combination is
//! rejected.
//!
//! ## Architecture
//!
//! 1.  **Registry ([`registry`]):** the immutable feature catalog and its builder checks.
//! 2.  **Resolver ([`resolver`]):** the features that can still be added to a selection.
//! 3.  **Validator ([`validator`]):** errors and advisory warnings for a complete selection.
//! 4.  **Wizard ([`session`]):** a configuration run over a [`FeatureSelection`], seeded from a
//!     [`templates`] entry or built up feature by feature, with typed [`parameters`].
//!
//! Resolver and validator never fail: problems with a selection are returned as data. Unknown
//! feature ids are ignored everywhere a selection is read.

mod catalog;
mod error;
pub mod parameters;
pub mod registry;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod summary;
pub mod templates;
pub mod validator;

pub use crate::error::{
    DeploymentError, DeploymentErrorExt, ParameterError, ParameterErrorExt, RegistryError,
    RegistryErrorExt,
};
pub use crate::parameters::parse_parameter;
pub use crate::registry::{Registry, RegistryBuilder};
pub use crate::resolver::{is_addable, resolve};
pub use crate::selection::FeatureSelection;
pub use crate::session::{FinalizedSelection, ResolvedParameter, SessionSnapshot, WizardSession};
pub use crate::summary::SelectionSummary;
pub use crate::templates::{ContractTemplate, EvmVersion, TemplateCatalog, TemplateComplexity};
pub use crate::validator::{HIGH_COMPLEXITY_THRESHOLD, ValidationResult, validate};
