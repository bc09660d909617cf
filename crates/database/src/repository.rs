use crate::DbError;
use core_types::{Employer, Vacancy};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use sqlx::postgres::{PgPool, Postgres};
use sqlx::{FromRow, Transaction};

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// One line of the "companies and vacancy counts" report.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct CompanyVacancyCount {
    pub employer_name: String,
    pub vacancy_count: i64,
}

/// A vacancy joined with its employer's name, as shown by the listing reports.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct VacancyListing {
    pub employer_name: String,
    pub vacancy_name: String,
    pub salary_from: i32,
    pub salary_to: i32,
    pub url: String,
}

const LISTING_COLUMNS: &str = r#"
    SELECT
        e.employer_name,
        v.vacancy_name,
        v.salary_from,
        v.salary_to,
        v.vacancy_url AS url
    FROM employers AS e
    JOIN vacancies AS v USING (employer_id)
"#;

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Starts the transaction an ingestion run writes through.
    pub async fn begin(&self) -> Result<Transaction<'static, Postgres>, DbError> {
        Ok(self.pool.begin().await?)
    }

    /// Commits a transaction started with `begin`.
    pub async fn commit(&self, tx: Transaction<'static, Postgres>) -> Result<(), DbError> {
        tx.commit().await?;
        Ok(())
    }

    /// Inserts an employer and returns its generated key.
    pub async fn insert_employer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employer: &Employer,
    ) -> Result<i32, DbError> {
        let employer_key = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO employers (employer_name, employer_vacancies, employer_url)
            VALUES ($1, $2, $3)
            RETURNING employer_id
            "#,
        )
        .bind(&employer.name)
        .bind(employer.open_vacancies)
        .bind(&employer.profile_url)
        .fetch_one(&mut **tx)
        .await?;
        Ok(employer_key)
    }

    /// Inserts a vacancy owned by the employer row `employer_key`.
    pub async fn insert_vacancy(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        employer_key: i32,
        vacancy: &Vacancy,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO vacancies (employer_id, vacancy_name, salary_from, salary_to, currency, vacancy_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(employer_key)
        .bind(&vacancy.name)
        .bind(vacancy.salary_from)
        .bind(vacancy.salary_to)
        .bind(&vacancy.currency)
        .bind(&vacancy.url)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }

    /// Every employer with the number of vacancies stored for it.
    /// Employers without vacancies are reported with a count of 0.
    pub async fn get_companies_and_vacancies_count(
        &self,
    ) -> Result<Vec<CompanyVacancyCount>, DbError> {
        let rows = sqlx::query_as::<_, CompanyVacancyCount>(
            r#"
            SELECT e.employer_name, COUNT(v.vacancy_id) AS vacancy_count
            FROM employers AS e
            LEFT JOIN vacancies AS v USING (employer_id)
            GROUP BY e.employer_id, e.employer_name
            ORDER BY e.employer_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All vacancies with their employer's name, salary range and link.
    pub async fn get_all_vacancies(&self) -> Result<Vec<VacancyListing>, DbError> {
        let sql = format!("{LISTING_COLUMNS} ORDER BY v.vacancy_id");
        let rows = sqlx::query_as::<_, VacancyListing>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// The mean salary midpoint over all vacancies, rounded half-to-even.
    /// `None` when no vacancies are stored.
    pub async fn get_avg_salary(&self) -> Result<Option<i64>, DbError> {
        let average = sqlx::query_scalar::<_, Option<Decimal>>(
            "SELECT AVG((salary_from + salary_to) / 2) FROM vacancies",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(average.and_then(round_half_even))
    }

    /// Vacancies whose salary midpoint is strictly above the (unrounded) average midpoint.
    pub async fn get_vacancies_with_higher_salary(&self) -> Result<Vec<VacancyListing>, DbError> {
        let sql = format!(
            r#"{LISTING_COLUMNS}
            WHERE (v.salary_from + v.salary_to) / 2 >
                (SELECT AVG((salary_from + salary_to) / 2) FROM vacancies)
            ORDER BY v.vacancy_id"#
        );
        let rows = sqlx::query_as::<_, VacancyListing>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Vacancies whose name contains `keyword`, ignoring case.
    /// The keyword is bound as a parameter and matched literally.
    pub async fn get_vacancies_with_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<VacancyListing>, DbError> {
        let sql = format!(
            r#"{LISTING_COLUMNS}
            WHERE LOWER(v.vacancy_name) LIKE $1 ESCAPE '\'
            ORDER BY v.vacancy_id"#
        );
        let rows = sqlx::query_as::<_, VacancyListing>(&sql)
            .bind(contains_pattern(keyword))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn round_half_even(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
        .to_i64()
}

/// A lower-cased `LIKE` pattern matching `keyword` anywhere, with the
/// wildcard and escape characters taken literally.
fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
