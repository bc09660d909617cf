use serde::Deserialize;

// Every field the hh.ru API might omit is an `Option`, so a missing field
// surfaces as a domain error instead of a deserialization failure.

/// The body of `GET /employers/{id}`.
///
/// Error bodies (e.g. for an unknown id) deserialize too, just without `id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmployer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub open_vacancies: Option<i32>,
    pub alternate_url: Option<String>,
}

/// The body of `GET /vacancies`.
#[derive(Debug, Clone, Deserialize)]
pub struct VacancySearchResponse {
    pub items: Option<Vec<RawVacancy>>,
    /// Total number of matches across all pages.
    #[serde(default)]
    pub found: u64,
    /// Total number of pages for the requested page size.
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub page: u32,
}

/// A single element of `VacancySearchResponse::items`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVacancy {
    pub id: String,
    pub name: String,
    pub salary: Option<RawSalary>,
    pub alternate_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSalary {
    pub from: Option<i32>,
    pub to: Option<i32>,
    pub currency: Option<String>,
}
