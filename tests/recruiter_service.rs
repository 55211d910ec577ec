use chrono::NaiveDate;

use staffing::config::StaffingSettings;
use staffing::recruiting::{
    Company, Job, JobKey, Recruiter, RecruiterIdentity, RecruiterService, ServiceError, Study,
    StudyStatus, Tenure,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn service() -> RecruiterService {
    RecruiterService::from_config(&StaffingSettings::default())
}

fn patricia() -> RecruiterIdentity {
    RecruiterIdentity::new("Patricia", "Maidana", "28123456").expect("valid identity")
}

async fn seed_patricia(service: &RecruiterService) -> Recruiter {
    let acme = Company::new("Acme", "Software").expect("valid company");
    service
        .create_company(acme.clone())
        .await
        .expect("company created");

    let mut recruiter = Recruiter::new(patricia());
    recruiter.add_client_company(acme);
    recruiter.add_job_history(
        Job::new(
            "Accenture",
            "Sr. Talent Acquisition",
            date(2015, 5, 1),
            Tenure::Current,
        )
        .expect("valid job"),
    );
    recruiter.add_job_history(
        Job::new(
            "Accenture",
            "Sr. Talent Acquisition",
            date(2014, 1, 1),
            Tenure::Ended(date(2015, 4, 30)),
        )
        .expect("valid job"),
    );
    recruiter.add_study(Study::new(
        "UBA",
        "Lic. Relaciones del Trabajo",
        StudyStatus::Completed,
    ));

    service
        .create_recruiter(recruiter.clone())
        .await
        .expect("recruiter created");
    recruiter
}

#[tokio::test]
async fn created_recruiter_round_trips_structurally() {
    let service = service();
    let recruiter = seed_patricia(&service).await;

    let fetched = service
        .get_recruiter(recruiter.identity())
        .await
        .expect("recruiter found");
    assert_eq!(fetched, recruiter);
    assert_eq!(fetched.job_history().len(), 2);
    assert_eq!(fetched.studies().len(), 1);
    assert_eq!(fetched.client_companies().len(), 1);
}

#[tokio::test]
async fn duplicate_recruiter_identity_is_a_conflict() {
    let service = service();
    seed_patricia(&service).await;

    let err = service
        .create_recruiter(Recruiter::new(patricia()))
        .await
        .expect_err("identity already taken");
    assert_eq!(
        err,
        ServiceError::RecruiterExists {
            identity: patricia()
        }
    );
    assert_eq!(service.recruiters().list().await.expect("list").len(), 1);
}

#[tokio::test]
async fn duplicate_company_retains_a_single_record() {
    let service = service();
    let acme = Company::new("Acme", "Software").expect("valid company");
    service
        .create_company(acme.clone())
        .await
        .expect("first creation");

    let err = service
        .create_company(Company::new("Acme", "Software").expect("valid company"))
        .await
        .expect_err("second creation conflicts");
    assert!(matches!(err, ServiceError::CompanyExists { .. }));
    assert_eq!(service.companies().list().await.expect("list"), vec![acme]);
}

#[tokio::test]
async fn updating_one_job_leaves_the_rest_of_the_aggregate_untouched() {
    let service = service();
    let mut recruiter = seed_patricia(&service).await;

    let target = JobKey::new("Accenture", date(2014, 1, 1));
    let prior = recruiter.job(&target).expect("target job exists").clone();
    recruiter.update_job_history(
        target.clone(),
        Job::new("Globant", prior.title(), prior.start_date(), prior.tenure())
            .expect("valid replacement"),
    );

    service
        .update_recruiter(recruiter.clone())
        .await
        .expect("update succeeds");

    let updated = service
        .get_recruiter(recruiter.identity())
        .await
        .expect("recruiter found");

    let renamed = updated
        .job(&JobKey::new("Globant", date(2014, 1, 1)))
        .expect("renamed job answers to its new identity");
    assert_eq!(renamed.company_name(), "Globant");
    assert_eq!(renamed.title(), "Sr. Talent Acquisition");
    assert_eq!(renamed.end_date(), Some(date(2015, 4, 30)));
    assert!(updated.job(&target).is_none(), "old identity must be gone");

    // Everything else survives the merge untouched.
    assert_eq!(updated.job_history()[0], recruiter.job_history()[0]);
    assert_eq!(updated.studies(), recruiter.studies());
    assert_eq!(updated.client_companies(), recruiter.client_companies());
}

#[tokio::test]
async fn update_against_unknown_identity_is_not_found() {
    let service = service();
    let ghost = RecruiterIdentity::new("Juan", "Perez", "30111222").expect("valid identity");

    let err = service
        .update_recruiter(Recruiter::new(ghost.clone()))
        .await
        .expect_err("nothing persisted under this identity");
    assert_eq!(err, ServiceError::RecruiterNotFound { identity: ghost });
    assert!(service.recruiters().list().await.expect("list").is_empty());
}

#[tokio::test]
async fn update_breaking_invariants_persists_nothing() {
    let service = service();
    let mut recruiter = seed_patricia(&service).await;
    let before = service
        .get_recruiter(recruiter.identity())
        .await
        .expect("recruiter found");

    // Promoting the ended job to current would leave two current entries.
    recruiter.update_job_history(
        JobKey::new("Accenture", date(2014, 1, 1)),
        Job::new(
            "Accenture",
            "Sr. Talent Acquisition",
            date(2014, 1, 1),
            Tenure::Current,
        )
        .expect("valid job"),
    );

    let err = service
        .update_recruiter(recruiter.clone())
        .await
        .expect_err("merge breaks the single-current invariant");
    assert!(matches!(err, ServiceError::Validation(_)));

    let after = service
        .get_recruiter(recruiter.identity())
        .await
        .expect("recruiter found");
    assert_eq!(after, before, "failed update must not persist partially");
}
