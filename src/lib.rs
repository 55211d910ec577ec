//! Recruiter and client-company management for staffing back offices.
//!
//! The crate models recruiters as aggregate roots owning their employment
//! history and education records while referencing independently persisted
//! client companies. [`recruiting::RecruiterService`] orchestrates creations,
//! lookups and the job history reconciliation applied during updates;
//! persistence sits behind the [`recruiting::CompanyStore`] and
//! [`recruiting::RecruiterStore`] traits.
//!
//! ```
//! use staffing::config::StaffingSettings;
//! use staffing::recruiting::{Company, RecruiterService};
//!
//! # async fn demo() -> Result<(), staffing::recruiting::ServiceError> {
//! let service = RecruiterService::from_config(&StaffingSettings::default());
//! let acme = Company::new("Acme", "Software")?;
//! service.create_company(acme).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod recruiting;

pub use config::{StaffingSettings, StoreBackend};
pub use recruiting::{
    Company, CompanyIdentity, CompanyStore, IdentityError, Job, JobKey, Recruiter, RecruiterError,
    RecruiterIdentity, RecruiterService, RecruiterStore, RecruiterSummary, ServiceError, Study,
    StudyStatus, Tenure,
};
