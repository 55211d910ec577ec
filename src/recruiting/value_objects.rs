use std::fmt::{self, Display, Formatter};

use chrono::NaiveDate;
use thiserror::Error;

/// Value object naming a company by its unique `(name, activity)` pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CompanyIdentity {
    name: String,
    activity: String,
}

impl CompanyIdentity {
    /// Validates and constructs a new [`CompanyIdentity`].
    ///
    /// Both components must contain at least one non-whitespace character so
    /// that every stored company has a meaningful unique key.
    pub fn new(name: impl Into<String>, activity: impl Into<String>) -> Result<Self, IdentityError> {
        let name = name.into();
        let activity = activity.into();
        require_non_empty("company name", &name)?;
        require_non_empty("company activity", &activity)?;
        Ok(Self { name, activity })
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the company's line of business.
    #[must_use]
    pub fn activity(&self) -> &str {
        &self.activity
    }
}

impl Display for CompanyIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.activity)
    }
}

/// Value object naming a recruiter by their natural identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecruiterIdentity {
    first_name: String,
    last_name: String,
    identity_card: String,
}

impl RecruiterIdentity {
    /// Validates and constructs a new [`RecruiterIdentity`].
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        identity_card: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        let identity_card = identity_card.into();
        require_non_empty("first name", &first_name)?;
        require_non_empty("last name", &last_name)?;
        require_non_empty("identity card", &identity_card)?;
        Ok(Self {
            first_name,
            last_name,
            identity_card,
        })
    }

    /// Returns the recruiter's first name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Returns the recruiter's last name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Returns the recruiter's identity card number.
    #[must_use]
    pub fn identity_card(&self) -> &str {
        &self.identity_card
    }
}

impl Display for RecruiterIdentity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.first_name, self.last_name, self.identity_card
        )
    }
}

/// Reconciliation identity of a job history entry.
///
/// Two job entries describe the same position when they share the company
/// name and the start date; updates are matched against their persisted
/// counterpart through this key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobKey {
    company_name: String,
    start_date: NaiveDate,
}

impl JobKey {
    /// Creates a new [`JobKey`] from its components.
    #[must_use]
    pub fn new(company_name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            company_name: company_name.into(),
            start_date,
        }
    }

    /// Returns the company name component.
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Returns the start date component.
    #[must_use]
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }
}

impl Display for JobKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.company_name, self.start_date)
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), IdentityError> {
    if value.trim().is_empty() {
        return Err(IdentityError::EmptyField { field });
    }
    Ok(())
}

/// Errors produced when validating identity value objects.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// A required identity component was missing or blank.
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}
