use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// A company as published by the job board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employer {
    /// The job board's identifier. Replaced by a generated key once stored.
    pub employer_id: String,
    pub name: String,
    /// Informational only; the stored vacancies are counted separately.
    pub open_vacancies: i32,
    pub profile_url: String,
}

impl Employer {
    /// Builds an employer from the optional fields of an API record.
    ///
    /// Every field is required. The first missing one is reported as
    /// `CoreError::IdNotFound`, which aborts the whole ingestion batch.
    pub fn try_new(
        employer_id: Option<String>,
        name: Option<String>,
        open_vacancies: Option<i32>,
        profile_url: Option<String>,
    ) -> Result<Self, CoreError> {
        Ok(Self {
            employer_id: employer_id.ok_or(CoreError::IdNotFound { field: "id" })?,
            name: name.ok_or(CoreError::IdNotFound { field: "name" })?,
            open_vacancies: open_vacancies
                .ok_or(CoreError::IdNotFound { field: "open_vacancies" })?,
            profile_url: profile_url.ok_or(CoreError::IdNotFound { field: "alternate_url" })?,
        })
    }
}

/// A single salaried job posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    /// External id of the owning employer.
    pub employer_id: String,
    pub vacancy_id: String,
    pub name: String,
    pub salary_from: i32,
    pub salary_to: i32,
    pub currency: String,
    pub url: String,
}

impl Vacancy {
    /// Creates a vacancy, normalising the raw salary bounds.
    ///
    /// A missing (or zero) lower bound becomes 0. A missing (or zero) upper
    /// bound takes the *raw* lower bound, so `(Some(x), None)` yields
    /// `x..x` and `(None, None)` yields `0..0`.
    pub fn new(
        employer_id: impl Into<String>,
        vacancy_id: impl Into<String>,
        name: impl Into<String>,
        salary_from: Option<i32>,
        salary_to: Option<i32>,
        currency: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            employer_id: employer_id.into(),
            vacancy_id: vacancy_id.into(),
            name: name.into(),
            salary_from: normalize_salary_from(salary_from),
            salary_to: normalize_salary_to(salary_from, salary_to),
            currency: currency.into(),
            url: url.into(),
        }
    }

    /// `(salary_from + salary_to) / 2` with truncating integer division,
    /// the same midpoint the reports compute in SQL.
    pub fn midpoint(&self) -> i64 {
        (i64::from(self.salary_from) + i64::from(self.salary_to)) / 2
    }
}

fn normalize_salary_from(salary_from: Option<i32>) -> i32 {
    match salary_from {
        Some(value) if value != 0 => value,
        _ => 0,
    }
}

fn normalize_salary_to(salary_from: Option<i32>, salary_to: Option<i32>) -> i32 {
    match salary_to {
        Some(value) if value != 0 => value,
        _ => salary_from.unwrap_or(0),
    }
}
