//! Core recruiting domain primitives and contracts.
//!
//! The module defines validated value objects, the recruiter aggregate root
//! and the service orchestrating creations and updates, independently from
//! persistence or transport concerns. Stores are described by traits so that
//! infrastructure adapters stay swappable behind the service.

pub mod entities;
pub mod repositories;
pub mod service;
pub mod value_objects;

pub use entities::{Company, Job, Recruiter, RecruiterError, Study, StudyStatus, Tenure};
pub use repositories::{CompanyStore, RecruiterStore, RecruiterSummary};
pub use service::{CompanyStoreHandle, RecruiterService, RecruiterStoreHandle, ServiceError};
pub use value_objects::{CompanyIdentity, IdentityError, JobKey, RecruiterIdentity};
