use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use thiserror::Error;

use super::value_objects::{CompanyIdentity, IdentityError, JobKey, RecruiterIdentity};

/// A client company referenced by recruiters.
///
/// Companies are immutable once created and are shared between recruiters;
/// the aggregate only holds references to them, never owns them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Company {
    identity: CompanyIdentity,
}

impl Company {
    /// Validates and constructs a new [`Company`].
    pub fn new(name: impl Into<String>, activity: impl Into<String>) -> Result<Self, IdentityError> {
        Ok(Self {
            identity: CompanyIdentity::new(name, activity)?,
        })
    }

    /// Returns the unique identity of the company.
    #[must_use]
    pub fn identity(&self) -> &CompanyIdentity {
        &self.identity
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.identity.name()
    }

    /// Returns the company's line of business.
    #[must_use]
    pub fn activity(&self) -> &str {
        self.identity.activity()
    }
}

/// Whether a position is still held, and when it ended otherwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tenure {
    /// The recruiter currently holds this position.
    Current,
    /// The position ended on the given date.
    Ended(NaiveDate),
}

/// One entry of a recruiter's employment history.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    company_name: String,
    title: String,
    start_date: NaiveDate,
    tenure: Tenure,
}

impl Job {
    /// Validates and constructs a new [`Job`].
    ///
    /// An [`Tenure::Ended`] date earlier than the start date is rejected.
    pub fn new(
        company_name: impl Into<String>,
        title: impl Into<String>,
        start_date: NaiveDate,
        tenure: Tenure,
    ) -> Result<Self, RecruiterError> {
        let company_name = company_name.into();
        if company_name.trim().is_empty() {
            return Err(IdentityError::EmptyField {
                field: "company name",
            }
            .into());
        }
        if let Tenure::Ended(end_date) = tenure {
            if end_date < start_date {
                return Err(RecruiterError::EndsBeforeStart {
                    company: company_name,
                    start: start_date,
                    end: end_date,
                });
            }
        }
        Ok(Self {
            company_name,
            title: title.into(),
            start_date,
            tenure,
        })
    }

    /// Returns the name of the employing company.
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Returns the position title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the date the position started.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Returns the tenure state of the position.
    #[must_use]
    pub fn tenure(&self) -> Tenure {
        self.tenure
    }

    /// Returns `true` while the position is still held.
    #[must_use]
    pub fn is_current(&self) -> bool {
        matches!(self.tenure, Tenure::Current)
    }

    /// Returns the end date for positions that are no longer held.
    #[must_use]
    pub fn end_date(&self) -> Option<NaiveDate> {
        match self.tenure {
            Tenure::Current => None,
            Tenure::Ended(end_date) => Some(end_date),
        }
    }

    /// Returns the reconciliation identity derived from the current fields.
    #[must_use]
    pub fn key(&self) -> JobKey {
        JobKey::new(self.company_name.clone(), self.start_date)
    }
}

/// Completion state of an education record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyStatus {
    /// The program is still being attended.
    InProgress,
    /// The program was completed.
    Completed,
    /// The program was abandoned before completion.
    Interrupted,
}

/// One entry of a recruiter's educational background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Study {
    institution: String,
    program: String,
    status: StudyStatus,
}

impl Study {
    /// Creates a new [`Study`] record.
    #[must_use]
    pub fn new(
        institution: impl Into<String>,
        program: impl Into<String>,
        status: StudyStatus,
    ) -> Self {
        Self {
            institution: institution.into(),
            program: program.into(),
            status,
        }
    }

    /// Returns the teaching institution.
    #[must_use]
    pub fn institution(&self) -> &str {
        &self.institution
    }

    /// Returns the program or degree name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Returns the completion status.
    #[must_use]
    pub fn status(&self) -> StudyStatus {
        self.status
    }
}

/// Aggregate root owning a recruiter's job history and studies and holding
/// references to their client companies.
///
/// Add-operations append without checking aggregate invariants; callers run
/// [`Recruiter::validate`] (the service does so before persisting) so that an
/// inconsistent in-memory aggregate is rejected at the boundary rather than
/// half-built. Pending job updates recorded through
/// [`Recruiter::update_job_history`] are local bookkeeping only and are
/// excluded from equality.
#[derive(Clone, Debug)]
pub struct Recruiter {
    identity: RecruiterIdentity,
    job_history: Vec<Job>,
    studies: Vec<Study>,
    client_companies: Vec<Company>,
    pending_jobs: BTreeMap<JobKey, Job>,
}

impl Recruiter {
    /// Creates an empty aggregate for the given identity.
    #[must_use]
    pub fn new(identity: RecruiterIdentity) -> Self {
        Self {
            identity,
            job_history: Vec::new(),
            studies: Vec::new(),
            client_companies: Vec::new(),
            pending_jobs: BTreeMap::new(),
        }
    }

    /// Returns the recruiter's natural identity.
    #[must_use]
    pub fn identity(&self) -> &RecruiterIdentity {
        &self.identity
    }

    /// Returns the employment history in insertion order.
    #[must_use]
    pub fn job_history(&self) -> &[Job] {
        &self.job_history
    }

    /// Returns the education records in insertion order.
    #[must_use]
    pub fn studies(&self) -> &[Study] {
        &self.studies
    }

    /// Returns the referenced client companies in insertion order.
    #[must_use]
    pub fn client_companies(&self) -> &[Company] {
        &self.client_companies
    }

    /// Looks up a job history entry by its reconciliation identity.
    #[must_use]
    pub fn job(&self, key: &JobKey) -> Option<&Job> {
        self.job_history.iter().find(|job| &job.key() == key)
    }

    /// Appends an employment history entry.
    pub fn add_job_history(&mut self, job: Job) {
        self.job_history.push(job);
    }

    /// Appends an education record.
    pub fn add_study(&mut self, study: Study) {
        self.studies.push(study);
    }

    /// References a client company, ignoring companies already referenced.
    ///
    /// Returns `false` when the company was already part of the set.
    pub fn add_client_company(&mut self, company: Company) -> bool {
        if self
            .client_companies
            .iter()
            .any(|existing| existing.identity() == company.identity())
        {
            return false;
        }
        self.client_companies.push(company);
        true
    }

    /// Records a replacement for the job history entry matching `target`.
    ///
    /// The target key is the entry's identity as persisted; the replacement
    /// may rename the company, in which case the entry answers to its new
    /// key only after reconciliation succeeds. Marking touches no persisted
    /// state and is validated when [`Recruiter::reconcile`] runs.
    pub fn update_job_history(&mut self, target: JobKey, replacement: Job) {
        self.pending_jobs.insert(target, replacement);
    }

    /// Returns the replacements recorded so far, keyed by the identity they
    /// will be matched against.
    #[must_use]
    pub fn pending_job_updates(&self) -> &BTreeMap<JobKey, Job> {
        &self.pending_jobs
    }

    /// Checks the aggregate-level invariants of the job history.
    pub fn validate(&self) -> Result<(), RecruiterError> {
        let mut seen = BTreeSet::new();
        let mut current_positions = 0usize;
        for job in &self.job_history {
            if !seen.insert(job.key()) {
                return Err(RecruiterError::DuplicateJob(job.key()));
            }
            if job.is_current() {
                current_positions += 1;
            }
        }
        if current_positions > 1 {
            return Err(RecruiterError::MultipleCurrentJobs);
        }
        Ok(())
    }

    /// Merges the pending job updates of this aggregate onto the persisted
    /// snapshot and returns the reconciled aggregate.
    ///
    /// Each persisted entry whose key matches a pending replacement takes the
    /// replacement's company name, title and tenure while keeping the
    /// persisted start date, so the identity used for matching survives the
    /// merge even when the company is renamed. Studies and client companies
    /// pass through unchanged. A replacement matching no persisted entry, or
    /// a merged history violating an invariant, aborts the whole merge.
    pub fn reconcile(&self, persisted: &Recruiter) -> Result<Recruiter, RecruiterError> {
        let mut pending = self.pending_jobs.clone();
        let mut merged = persisted.clone();
        for job in &mut merged.job_history {
            if let Some(replacement) = pending.remove(&job.key()) {
                *job = Job::new(
                    replacement.company_name,
                    replacement.title,
                    job.start_date,
                    replacement.tenure,
                )?;
            }
        }
        if let Some(key) = pending.into_keys().next() {
            return Err(RecruiterError::UnknownJob(key));
        }
        merged.pending_jobs.clear();
        merged.validate()?;
        Ok(merged)
    }
}

impl PartialEq for Recruiter {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
            && self.job_history == other.job_history
            && self.studies == other.studies
            && self.client_companies == other.client_companies
    }
}

impl Eq for Recruiter {}

/// Errors raised when building or reconciling a recruiter aggregate.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RecruiterError {
    /// A required field was missing or blank.
    #[error(transparent)]
    Identity(#[from] IdentityError),
    /// A finished job ended before it started.
    #[error("job at `{company}` ends {end} before it starts {start}")]
    EndsBeforeStart {
        company: String,
        start: NaiveDate,
        end: NaiveDate,
    },
    /// Two job history entries share a reconciliation identity.
    #[error("job history already contains `{0}`")]
    DuplicateJob(JobKey),
    /// More than one job history entry is marked as current.
    #[error("job history lists more than one current position")]
    MultipleCurrentJobs,
    /// A pending update matched no persisted job history entry.
    #[error("no job history entry matches `{0}`")]
    UnknownJob(JobKey),
}
