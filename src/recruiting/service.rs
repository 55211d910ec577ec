use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    config::{StaffingSettings, StoreBackend},
    recruiting::{
        entities::{Company, Recruiter, RecruiterError},
        repositories::{CompanyStore, RecruiterStore, RecruiterSummary},
        value_objects::{CompanyIdentity, IdentityError, RecruiterIdentity},
    },
};

/// Type alias simplifying company store trait object usage inside the service.
pub type CompanyStoreHandle = dyn CompanyStore<Error = ServiceError> + Send + Sync + 'static;
/// Type alias simplifying recruiter store trait object usage inside the service.
pub type RecruiterStoreHandle = dyn RecruiterStore<Error = ServiceError> + Send + Sync + 'static;

/// High level staffing service wiring company and recruiter stores together.
///
/// Each operation works on exactly one aggregate and holds no state between
/// calls; the stores are the only shared infrastructure and remain the
/// authority for uniqueness under concurrent creations.
#[derive(Clone)]
pub struct RecruiterService {
    companies: Arc<CompanyStoreHandle>,
    recruiters: Arc<RecruiterStoreHandle>,
}

impl RecruiterService {
    /// Creates a new [`RecruiterService`] from trait object handles.
    pub fn new(companies: Arc<CompanyStoreHandle>, recruiters: Arc<RecruiterStoreHandle>) -> Self {
        Self {
            companies,
            recruiters,
        }
    }

    /// Builds a service instance from configuration settings.
    #[must_use]
    pub fn from_config(settings: &StaffingSettings) -> Self {
        let directory = match settings.backend {
            StoreBackend::InMemory => Arc::new(InMemoryDirectory::default()),
        };
        Self::new(
            Arc::new(InMemoryCompanyStore::new(Arc::clone(&directory))),
            Arc::new(InMemoryRecruiterStore::new(directory)),
        )
    }

    /// Returns a clone of the company store handle.
    pub fn companies(&self) -> Arc<CompanyStoreHandle> {
        Arc::clone(&self.companies)
    }

    /// Returns a clone of the recruiter store handle.
    pub fn recruiters(&self) -> Arc<RecruiterStoreHandle> {
        Arc::clone(&self.recruiters)
    }

    /// Registers a new client company.
    ///
    /// Fails with [`ServiceError::CompanyExists`] when a company with the
    /// same `(name, activity)` pair is already stored. The store re-checks
    /// uniqueness inside its own transactional boundary, so a concurrent
    /// creation racing past this lookup still cannot produce a duplicate.
    pub async fn create_company(&self, company: Company) -> Result<Company, ServiceError> {
        if self.companies.find(company.identity()).await?.is_some() {
            return Err(ServiceError::company_exists(company.identity()));
        }
        let stored = self.companies.insert(company).await?;
        tracing::debug!(company = %stored.identity(), "company_created");
        Ok(stored)
    }

    /// Retrieves a company by its unique identity.
    pub async fn get_company(&self, identity: &CompanyIdentity) -> Result<Company, ServiceError> {
        self.companies
            .find(identity)
            .await?
            .ok_or_else(|| ServiceError::company_not_found(identity))
    }

    /// Registers a new recruiter together with its owned collections.
    ///
    /// The aggregate is validated before any persistence attempt; referenced
    /// client companies must already exist and are never created implicitly.
    pub async fn create_recruiter(&self, recruiter: Recruiter) -> Result<Recruiter, ServiceError> {
        recruiter.validate()?;
        for company in recruiter.client_companies() {
            if self.companies.find(company.identity()).await?.is_none() {
                return Err(ServiceError::unknown_company(company.identity()));
            }
        }
        if self.recruiters.find(recruiter.identity()).await?.is_some() {
            return Err(ServiceError::recruiter_exists(recruiter.identity()));
        }
        let stored = self.recruiters.insert(recruiter).await?;
        tracing::debug!(recruiter = %stored.identity(), "recruiter_created");
        Ok(stored)
    }

    /// Retrieves the full recruiter aggregate by natural identity.
    pub async fn get_recruiter(
        &self,
        identity: &RecruiterIdentity,
    ) -> Result<Recruiter, ServiceError> {
        self.recruiters
            .find(identity)
            .await?
            .ok_or_else(|| ServiceError::recruiter_not_found(identity))
    }

    /// Applies the pending job updates recorded on `recruiter` onto the
    /// persisted aggregate and stores the merged result.
    ///
    /// The merge is validated in full before the single store write, so an
    /// invariant violation aborts the update without partial persistence.
    /// Studies and client company references are not altered by this
    /// operation.
    pub async fn update_recruiter(&self, recruiter: Recruiter) -> Result<Recruiter, ServiceError> {
        let persisted = self
            .recruiters
            .find(recruiter.identity())
            .await?
            .ok_or_else(|| ServiceError::recruiter_not_found(recruiter.identity()))?;
        let merged = recruiter.reconcile(&persisted)?;
        let stored = self.recruiters.update(merged).await?;
        tracing::debug!(recruiter = %stored.identity(), "recruiter_updated");
        Ok(stored)
    }
}

/// Errors raised by staffing service operations.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Attempted to create a company that already exists.
    #[error("company `{identity}` already exists")]
    CompanyExists { identity: CompanyIdentity },
    /// Attempted to create a recruiter whose identity is already taken.
    #[error("recruiter `{identity}` already exists")]
    RecruiterExists { identity: RecruiterIdentity },
    /// A recruiter referenced a client company that is not registered.
    #[error("client company `{identity}` is not registered")]
    UnknownCompany { identity: CompanyIdentity },
    /// Requested company was not found.
    #[error("company `{identity}` not found")]
    CompanyNotFound { identity: CompanyIdentity },
    /// Requested recruiter was not found.
    #[error("recruiter `{identity}` not found")]
    RecruiterNotFound { identity: RecruiterIdentity },
    /// Domain validation failed before or during persistence.
    #[error("validation failed: {0}")]
    Validation(#[from] RecruiterError),
}

impl From<IdentityError> for ServiceError {
    fn from(err: IdentityError) -> Self {
        Self::Validation(err.into())
    }
}

impl ServiceError {
    fn company_exists(identity: &CompanyIdentity) -> Self {
        Self::CompanyExists {
            identity: identity.clone(),
        }
    }

    fn recruiter_exists(identity: &RecruiterIdentity) -> Self {
        Self::RecruiterExists {
            identity: identity.clone(),
        }
    }

    fn unknown_company(identity: &CompanyIdentity) -> Self {
        Self::UnknownCompany {
            identity: identity.clone(),
        }
    }

    fn company_not_found(identity: &CompanyIdentity) -> Self {
        Self::CompanyNotFound {
            identity: identity.clone(),
        }
    }

    fn recruiter_not_found(identity: &RecruiterIdentity) -> Self {
        Self::RecruiterNotFound {
            identity: identity.clone(),
        }
    }
}

#[derive(Default)]
struct InMemoryDirectory {
    companies: Mutex<BTreeMap<CompanyIdentity, Company>>,
    recruiters: Mutex<BTreeMap<RecruiterIdentity, Recruiter>>,
}

impl InMemoryDirectory {
    fn companies(&self) -> std::sync::MutexGuard<'_, BTreeMap<CompanyIdentity, Company>> {
        self.companies
            .lock()
            .expect("in-memory company store poisoned")
    }

    fn recruiters(&self) -> std::sync::MutexGuard<'_, BTreeMap<RecruiterIdentity, Recruiter>> {
        self.recruiters
            .lock()
            .expect("in-memory recruiter store poisoned")
    }
}

#[derive(Clone)]
struct InMemoryCompanyStore {
    directory: Arc<InMemoryDirectory>,
}

impl InMemoryCompanyStore {
    fn new(directory: Arc<InMemoryDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl CompanyStore for InMemoryCompanyStore {
    type Error = ServiceError;

    async fn find(&self, identity: &CompanyIdentity) -> Result<Option<Company>, Self::Error> {
        Ok(self.directory.companies().get(identity).cloned())
    }

    async fn insert(&self, company: Company) -> Result<Company, Self::Error> {
        let mut guard = self.directory.companies();
        if guard.contains_key(company.identity()) {
            return Err(ServiceError::company_exists(company.identity()));
        }
        guard.insert(company.identity().clone(), company.clone());
        Ok(company)
    }

    async fn list(&self) -> Result<Vec<Company>, Self::Error> {
        Ok(self.directory.companies().values().cloned().collect())
    }
}

#[derive(Clone)]
struct InMemoryRecruiterStore {
    directory: Arc<InMemoryDirectory>,
}

impl InMemoryRecruiterStore {
    fn new(directory: Arc<InMemoryDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl RecruiterStore for InMemoryRecruiterStore {
    type Error = ServiceError;

    async fn find(&self, identity: &RecruiterIdentity) -> Result<Option<Recruiter>, Self::Error> {
        Ok(self.directory.recruiters().get(identity).cloned())
    }

    async fn insert(&self, recruiter: Recruiter) -> Result<Recruiter, Self::Error> {
        let mut guard = self.directory.recruiters();
        if guard.contains_key(recruiter.identity()) {
            return Err(ServiceError::recruiter_exists(recruiter.identity()));
        }
        guard.insert(recruiter.identity().clone(), recruiter.clone());
        Ok(recruiter)
    }

    async fn update(&self, recruiter: Recruiter) -> Result<Recruiter, Self::Error> {
        let mut guard = self.directory.recruiters();
        if !guard.contains_key(recruiter.identity()) {
            return Err(ServiceError::recruiter_not_found(recruiter.identity()));
        }
        guard.insert(recruiter.identity().clone(), recruiter.clone());
        Ok(recruiter)
    }

    async fn list(&self) -> Result<Vec<RecruiterSummary>, Self::Error> {
        Ok(self
            .directory
            .recruiters()
            .values()
            .map(RecruiterSummary::from)
            .collect())
    }
}
