use crate::error::ApiError;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::{Employer, Vacancy};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

pub mod error;
pub mod responses;

// --- Public API ---
pub use responses::{RawEmployer, RawSalary, RawVacancy, VacancySearchResponse};

/// The abstract interface for the job board the employers and vacancies come from.
/// The ingestion pipeline only talks to this trait, so tests can swap in a mock.
#[async_trait]
pub trait JobBoardClient: Send + Sync {
    /// Fetches one employer by its job-board id.
    async fn fetch_employer(&self, employer_id: &str) -> Result<Employer, ApiError>;

    /// Fetches the employers in input order, one request each.
    /// The first failure aborts the batch.
    async fn fetch_employers(&self, employer_ids: &[String]) -> Result<Vec<Employer>, ApiError> {
        let mut employers = Vec::with_capacity(employer_ids.len());
        for employer_id in employer_ids {
            employers.push(self.fetch_employer(employer_id).await?);
        }
        Ok(employers)
    }

    /// Fetches the salaried vacancies an employer currently publishes.
    async fn fetch_vacancies(&self, employer_id: &str) -> Result<Vec<Vacancy>, ApiError>;
}

/// A concrete implementation of the `JobBoardClient` for the hh.ru API.
#[derive(Clone)]
pub struct HeadHunterClient {
    client: reqwest::Client,
    employers_url: String,
    vacancies_url: String,
    per_page: u32,
    fetch_all_pages: bool,
}

impl HeadHunterClient {
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&api_config.user_agent)
            .map_err(|e| ApiError::InvalidData(format!("Invalid User-Agent: {}", e)))?;
        headers.insert(USER_AGENT, user_agent);

        Ok(Self {
            client: reqwest::Client::builder().default_headers(headers).build()?,
            employers_url: api_config.employers_url.clone(),
            vacancies_url: api_config.vacancies_url.clone(),
            per_page: api_config.per_page,
            fetch_all_pages: api_config.fetch_all_pages,
        })
    }

    /// Requests one page of the salaried vacancies of `employer_id`.
    async fn search_page(
        &self,
        employer_id: &str,
        page: u32,
    ) -> Result<VacancySearchResponse, ApiError> {
        tracing::debug!(employer_id, page, "Requesting vacancy page.");
        let response = self
            .client
            .get(&self.vacancies_url)
            .query(&[
                ("page", page.to_string().as_str()),
                ("per_page", self.per_page.to_string().as_str()),
                ("only_with_salary", "true"),
                ("employer_id", employer_id),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body: text });
        }
        parse_body(&text)
    }
}

fn parse_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str::<T>(text).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Turns a raw employer body into an `Employer`, failing if any field is missing.
pub fn map_employer(raw: RawEmployer) -> Result<Employer, ApiError> {
    let employer = Employer::try_new(raw.id, raw.name, raw.open_vacancies, raw.alternate_url)?;
    Ok(employer)
}

/// Turns one page of search results into vacancies owned by `employer_id`, in response order.
pub fn map_vacancies(
    employer_id: &str,
    response: VacancySearchResponse,
) -> Result<Vec<Vacancy>, ApiError> {
    let items = response.items.ok_or_else(|| {
        ApiError::InvalidData("vacancy search response has no `items`".to_string())
    })?;

    items
        .into_iter()
        .map(|item| {
            let salary = item.salary.ok_or_else(|| {
                ApiError::InvalidData(format!("vacancy {} has no salary", item.id))
            })?;
            Ok(Vacancy::new(
                employer_id,
                item.id,
                item.name,
                salary.from,
                salary.to,
                salary.currency.unwrap_or_default(),
                item.alternate_url,
            ))
        })
        .collect()
}

#[async_trait]
impl JobBoardClient for HeadHunterClient {
    async fn fetch_employer(&self, employer_id: &str) -> Result<Employer, ApiError> {
        let url = format!("{}{}", self.employers_url, employer_id);
        tracing::debug!(%url, "Requesting employer.");

        // Error statuses are not checked: their bodies lack `id` and surface
        // as lookup faults.
        let text = self.client.get(&url).send().await?.text().await?;
        map_employer(parse_body::<RawEmployer>(&text)?)
    }

    async fn fetch_vacancies(&self, employer_id: &str) -> Result<Vec<Vacancy>, ApiError> {
        let first = self.search_page(employer_id, 0).await?;
        let pages = first.pages;
        let found = first.found;
        let mut vacancies = map_vacancies(employer_id, first)?;

        if pages > 1 {
            if self.fetch_all_pages {
                for page in 1..pages {
                    let response = self.search_page(employer_id, page).await?;
                    vacancies.extend(map_vacancies(employer_id, response)?);
                }
            } else {
                tracing::warn!(
                    employer_id,
                    found,
                    kept = vacancies.len(),
                    "Only the first page of vacancies is ingested."
                );
            }
        }

        Ok(vacancies)
    }
}
