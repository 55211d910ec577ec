use async_trait::async_trait;

use super::entities::{Company, Recruiter};
use super::value_objects::{CompanyIdentity, RecruiterIdentity};

/// Summary DTO for listing recruiters without walking the full aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecruiterSummary {
    /// Natural identity of the recruiter.
    pub identity: RecruiterIdentity,
    /// Number of employment history entries.
    pub job_count: usize,
    /// Number of education records.
    pub study_count: usize,
    /// Number of referenced client companies.
    pub client_company_count: usize,
}

impl From<&Recruiter> for RecruiterSummary {
    fn from(recruiter: &Recruiter) -> Self {
        Self {
            identity: recruiter.identity().clone(),
            job_count: recruiter.job_history().len(),
            study_count: recruiter.studies().len(),
            client_company_count: recruiter.client_companies().len(),
        }
    }
}

/// Contract describing persistence responsibilities for companies.
#[async_trait]
pub trait CompanyStore {
    /// Associated error type allowing infrastructure specific failures.
    type Error;

    /// Retrieves a stored company by identity.
    ///
    /// Implementors must return `Ok(None)` when the company is missing.
    async fn find(&self, identity: &CompanyIdentity) -> Result<Option<Company>, Self::Error>;

    /// Persists a brand new company and returns the stored record.
    ///
    /// Implementors are the authority for identity uniqueness: a conflicting
    /// insert must fail with a distinguishable error even when the caller's
    /// own existence check raced with a concurrent creation.
    async fn insert(&self, company: Company) -> Result<Company, Self::Error>;

    /// Lists all stored companies in identity order.
    async fn list(&self) -> Result<Vec<Company>, Self::Error>;
}

/// Contract describing persistence responsibilities for recruiter aggregates.
#[async_trait]
pub trait RecruiterStore {
    /// Associated error type allowing infrastructure specific failures.
    type Error;

    /// Retrieves a full aggregate by identity, nested collections included.
    ///
    /// Implementors must return `Ok(None)` when the recruiter is missing.
    async fn find(&self, identity: &RecruiterIdentity) -> Result<Option<Recruiter>, Self::Error>;

    /// Persists a brand new aggregate together with its owned collections.
    ///
    /// Implementors must reject duplicate identities atomically, as with
    /// [`CompanyStore::insert`].
    async fn insert(&self, recruiter: Recruiter) -> Result<Recruiter, Self::Error>;

    /// Replaces the full aggregate state for the matched identity.
    async fn update(&self, recruiter: Recruiter) -> Result<Recruiter, Self::Error>;

    /// Lists all stored recruiters without loading the entire aggregates.
    async fn list(&self) -> Result<Vec<RecruiterSummary>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::{CompanyStore, RecruiterSummary};
    use crate::recruiting::entities::{Company, Job, Recruiter, Study, StudyStatus, Tenure};
    use crate::recruiting::value_objects::{CompanyIdentity, RecruiterIdentity};

    #[derive(Default)]
    struct CompanyStoreStub {
        companies: Mutex<BTreeMap<CompanyIdentity, Company>>,
    }

    #[derive(Debug, thiserror::Error)]
    enum StubError {
        #[error("company already exists")]
        Duplicate,
    }

    #[async_trait]
    impl CompanyStore for CompanyStoreStub {
        type Error = StubError;

        async fn find(&self, identity: &CompanyIdentity) -> Result<Option<Company>, Self::Error> {
            Ok(self.companies.lock().unwrap().get(identity).cloned())
        }

        async fn insert(&self, company: Company) -> Result<Company, Self::Error> {
            let mut guard = self.companies.lock().unwrap();
            if guard.contains_key(company.identity()) {
                return Err(StubError::Duplicate);
            }
            guard.insert(company.identity().clone(), company.clone());
            Ok(company)
        }

        async fn list(&self) -> Result<Vec<Company>, Self::Error> {
            Ok(self.companies.lock().unwrap().values().cloned().collect())
        }
    }

    #[tokio::test]
    async fn company_store_contract_round_trips() {
        let store = CompanyStoreStub::default();
        let acme = Company::new("Acme", "Software").expect("valid company");

        assert!(store.find(acme.identity()).await.expect("find").is_none());
        store.insert(acme.clone()).await.expect("insert");
        assert_eq!(
            store.find(acme.identity()).await.expect("find"),
            Some(acme.clone())
        );
        assert!(matches!(
            store.insert(acme.clone()).await,
            Err(StubError::Duplicate)
        ));
        assert_eq!(store.list().await.expect("list"), vec![acme]);
    }

    #[test]
    fn summary_counts_collections() {
        let identity =
            RecruiterIdentity::new("Patricia", "Maidana", "28123456").expect("valid identity");
        let mut recruiter = Recruiter::new(identity.clone());
        let start = NaiveDate::from_ymd_opt(2015, 5, 1).expect("valid date");
        recruiter.add_job_history(
            Job::new("Accenture", "Recruiter", start, Tenure::Current).expect("valid job"),
        );
        recruiter.add_study(Study::new("UBA", "RRHH", StudyStatus::InProgress));
        recruiter.add_client_company(Company::new("Acme", "Software").expect("valid company"));

        let summary = RecruiterSummary::from(&recruiter);
        assert_eq!(summary.identity, identity);
        assert_eq!(summary.job_count, 1);
        assert_eq!(summary.study_count, 1);
        assert_eq!(summary.client_company_count, 1);
    }
}
