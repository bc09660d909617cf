//! Loads employers and their salaried vacancies from the job board into the
//! analysis database.

use api_client::JobBoardClient;
use database::DbRepository;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;

pub mod error;

pub use error::IngestError;

/// What a completed ingestion run stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub employers: usize,
    pub vacancies: usize,
}

/// Orchestrates the fetch-then-insert pipeline.
pub struct Ingestor {
    client: Arc<dyn JobBoardClient>,
    repo: DbRepository,
}

impl Ingestor {
    pub fn new(client: Arc<dyn JobBoardClient>, repo: DbRepository) -> Self {
        Self { client, repo }
    }

    /// Fetches every employer in `employer_ids`, then stores each one followed
    /// by its vacancies, linked through the generated employer key.
    ///
    /// Everything is written in a single transaction that is committed once
    /// at the end. Any fetch or insert failure aborts the run and the
    /// uncommitted transaction is rolled back, so a run is all-or-nothing.
    pub async fn save_data_to_database(
        &self,
        employer_ids: &[String],
    ) -> Result<IngestSummary, IngestError> {
        tracing::info!(count = employer_ids.len(), "Fetching employers.");
        let employers = self.client.fetch_employers(employer_ids).await?;

        let progress_bar = ProgressBar::new(employers.len() as u64);
        progress_bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );

        let mut tx = self.repo.begin().await?;
        let mut summary = IngestSummary::default();

        for employer in &employers {
            progress_bar.set_message(employer.name.clone());
            let employer_key = self.repo.insert_employer(&mut tx, employer).await?;

            let vacancies = self.client.fetch_vacancies(&employer.employer_id).await?;
            for vacancy in &vacancies {
                self.repo.insert_vacancy(&mut tx, employer_key, vacancy).await?;
            }

            tracing::info!(
                employer_id = %employer.employer_id,
                employer_key,
                name = %employer.name,
                vacancies = vacancies.len(),
                "Employer stored."
            );
            summary.employers += 1;
            summary.vacancies += vacancies.len();
            progress_bar.inc(1);
        }

        self.repo.commit(tx).await?;
        progress_bar.finish_with_message("Ingestion complete!");
        tracing::info!(
            employers = summary.employers,
            vacancies = summary.vacancies,
            "Ingestion committed."
        );

        Ok(summary)
    }
}
