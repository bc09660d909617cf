mod common;

use common::TestDb;
use core_types::{Employer, Vacancy};
use database::{CompanyVacancyCount, DbRepository, VacancyListing};

fn employer(id: &str, name: &str) -> Employer {
    Employer {
        employer_id: id.to_string(),
        name: name.to_string(),
        open_vacancies: 3,
        profile_url: format!("https://hh.ru/employer/{id}"),
    }
}

fn vacancy(id: &str, name: &str, from: Option<i32>, to: Option<i32>) -> Vacancy {
    Vacancy::new("e", id, name, from, to, "RUR", format!("https://hh.ru/vacancy/{id}"))
}

/// Stores `employer` and its vacancies in one committed transaction.
async fn seed(repo: &DbRepository, employer: &Employer, vacancies: &[Vacancy]) {
    let mut tx = repo.begin().await.unwrap();
    let key = repo.insert_employer(&mut tx, employer).await.unwrap();
    for v in vacancies {
        repo.insert_vacancy(&mut tx, key, v).await.unwrap();
    }
    tx.commit().await.unwrap();
}

fn names(rows: &[VacancyListing]) -> Vec<&str> {
    rows.iter().map(|r| r.vacancy_name.as_str()).collect()
}

#[tokio::test]
async fn inserted_rows_read_back_unchanged() {
    let Some(db) = TestDb::create().await else { return };
    let acme = employer("1", "Acme");
    let vacancies = vec![
        vacancy("10", "Rust Developer", Some(200_000), Some(250_000)),
        vacancy("11", "Tester", Some(70_000), None),
        vacancy("12", "Intern", None, None),
    ];
    seed(&db.repo, &acme, &vacancies).await;

    let rows = db.repo.get_all_vacancies().await.unwrap();
    let expected: Vec<VacancyListing> = vacancies
        .iter()
        .map(|v| VacancyListing {
            employer_name: acme.name.clone(),
            vacancy_name: v.name.clone(),
            salary_from: v.salary_from,
            salary_to: v.salary_to,
            url: v.url.clone(),
        })
        .collect();
    assert_eq!(rows, expected);
    assert_eq!((rows[1].salary_from, rows[1].salary_to), (70_000, 70_000));

    db.cleanup().await;
}

#[tokio::test]
async fn insert_employer_returns_generated_keys() {
    let Some(db) = TestDb::create().await else { return };
    let mut tx = db.repo.begin().await.unwrap();
    let first = db.repo.insert_employer(&mut tx, &employer("1", "A")).await.unwrap();
    let second = db.repo.insert_employer(&mut tx, &employer("2", "B")).await.unwrap();
    tx.commit().await.unwrap();
    assert_eq!(second, first + 1);

    db.cleanup().await;
}

#[tokio::test]
async fn vacancy_must_reference_an_existing_employer() {
    let Some(db) = TestDb::create().await else { return };
    let mut tx = db.repo.begin().await.unwrap();
    let result = db
        .repo
        .insert_vacancy(&mut tx, 9_999, &vacancy("1", "Orphan", Some(1), Some(2)))
        .await;
    assert!(result.is_err());

    db.cleanup().await;
}

#[tokio::test]
async fn uncommitted_transaction_leaves_nothing_behind() {
    let Some(db) = TestDb::create().await else { return };
    {
        let mut tx = db.repo.begin().await.unwrap();
        db.repo.insert_employer(&mut tx, &employer("1", "Ghost")).await.unwrap();
    }
    assert!(db.repo.get_companies_and_vacancies_count().await.unwrap().is_empty());

    db.cleanup().await;
}

#[tokio::test]
async fn counts_include_employers_without_vacancies() {
    let Some(db) = TestDb::create().await else { return };
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[
            vacancy("10", "A", Some(1), Some(1)),
            vacancy("11", "B", Some(1), Some(1)),
        ],
    )
    .await;
    seed(&db.repo, &employer("2", "Empty Inc"), &[]).await;

    let counts = db.repo.get_companies_and_vacancies_count().await.unwrap();
    assert_eq!(
        counts,
        vec![
            CompanyVacancyCount { employer_name: "Acme".into(), vacancy_count: 2 },
            CompanyVacancyCount { employer_name: "Empty Inc".into(), vacancy_count: 0 },
        ]
    );

    db.cleanup().await;
}

#[tokio::test]
async fn average_is_none_without_vacancies() {
    let Some(db) = TestDb::create().await else { return };
    assert_eq!(db.repo.get_avg_salary().await.unwrap(), None);
    db.cleanup().await;
}

#[tokio::test]
async fn average_rounds_half_to_even() {
    let Some(db) = TestDb::create().await else { return };
    // Midpoints 1 and 2: mean 1.5 rounds up to 2.
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[vacancy("1", "a", Some(1), None), vacancy("2", "b", Some(2), None)],
    )
    .await;
    assert_eq!(db.repo.get_avg_salary().await.unwrap(), Some(2));
    db.cleanup().await;

    let Some(db) = TestDb::create().await else { return };
    // Midpoints 2 and 3: mean 2.5 rounds down to 2.
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[vacancy("1", "a", Some(2), None), vacancy("2", "b", Some(3), None)],
    )
    .await;
    assert_eq!(db.repo.get_avg_salary().await.unwrap(), Some(2));
    db.cleanup().await;
}

#[tokio::test]
async fn average_uses_truncated_integer_midpoints() {
    let Some(db) = TestDb::create().await else { return };
    // Midpoints (1+2)/2 = 1 and (4+5)/2 = 4: mean 2.5 -> 2.
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[vacancy("1", "a", Some(1), Some(2)), vacancy("2", "b", Some(4), Some(5))],
    )
    .await;
    assert_eq!(db.repo.get_avg_salary().await.unwrap(), Some(2));
    db.cleanup().await;
}

#[tokio::test]
async fn higher_salary_is_strictly_above_average() {
    let Some(db) = TestDb::create().await else { return };
    // Midpoints 100, 200, 300: average exactly 200.
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[
            vacancy("1", "below", Some(100), None),
            vacancy("2", "at", Some(150), Some(250)),
            vacancy("3", "above", Some(300), None),
        ],
    )
    .await;

    assert_eq!(db.repo.get_avg_salary().await.unwrap(), Some(200));
    let rows = db.repo.get_vacancies_with_higher_salary().await.unwrap();
    assert_eq!(names(&rows), vec!["above"]);

    db.cleanup().await;
}

#[tokio::test]
async fn higher_salary_compares_against_unrounded_average() {
    let Some(db) = TestDb::create().await else { return };
    // Midpoints 10, 10, 11: average 10.33, rounded 10. Only 11 is above.
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[
            vacancy("1", "x", Some(10), None),
            vacancy("2", "y", Some(10), None),
            vacancy("3", "z", Some(11), None),
        ],
    )
    .await;
    let rows = db.repo.get_vacancies_with_higher_salary().await.unwrap();
    assert_eq!(names(&rows), vec!["z"]);

    db.cleanup().await;
}

#[tokio::test]
async fn keyword_search_ignores_case() {
    let Some(db) = TestDb::create().await else { return };
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[
            vacancy("1", "Senior Backend Engineer", Some(1), None),
            vacancy("2", "Frontend Developer", Some(1), None),
        ],
    )
    .await;

    for keyword in ["backend", "BACKEND", "ack", "Senior Backend Engineer"] {
        let rows = db.repo.get_vacancies_with_keyword(keyword).await.unwrap();
        assert_eq!(names(&rows), vec!["Senior Backend Engineer"], "{keyword}");
    }
    let rows = db.repo.get_vacancies_with_keyword("end").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(db.repo.get_vacancies_with_keyword("golang").await.unwrap().is_empty());

    db.cleanup().await;
}

#[tokio::test]
async fn keyword_with_quotes_and_wildcards_is_literal() {
    let Some(db) = TestDb::create().await else { return };
    seed(
        &db.repo,
        &employer("1", "Acme"),
        &[
            vacancy("1", "O'Reilly Editor", Some(1), None),
            vacancy("2", "Sales 100% remote", Some(1), None),
            vacancy("3", "Plain Job", Some(1), None),
        ],
    )
    .await;

    let rows = db.repo.get_vacancies_with_keyword("o'reilly").await.unwrap();
    assert_eq!(names(&rows), vec!["O'Reilly Editor"]);

    let rows = db.repo.get_vacancies_with_keyword("'").await.unwrap();
    assert_eq!(names(&rows), vec!["O'Reilly Editor"]);

    let rows = db
        .repo
        .get_vacancies_with_keyword("' OR '1'='1")
        .await
        .unwrap();
    assert!(rows.is_empty());

    let rows = db.repo.get_vacancies_with_keyword("%").await.unwrap();
    assert_eq!(names(&rows), vec!["Sales 100% remote"]);

    let rows = db.repo.get_vacancies_with_keyword("_").await.unwrap();
    assert!(rows.is_empty());

    db.cleanup().await;
}
