use crate::menu::Selection;
use comfy_table::Table;
use database::{CompanyVacancyCount, DbRepository, VacancyListing};
use std::io::Write;

/// Runs the report behind `selection` and prints it to `output`.
pub async fn run_selection<W: Write>(
    selection: &Selection,
    repo: &DbRepository,
    output: &mut W,
) -> anyhow::Result<()> {
    match selection {
        Selection::CompaniesAndVacancyCounts => {
            let counts = repo.get_companies_and_vacancies_count().await?;
            writeln!(output, "{}", counts_table(&counts))?;
        }
        Selection::AllVacancies => {
            let rows = repo.get_all_vacancies().await?;
            writeln!(output, "{}", listing_table(&rows))?;
        }
        Selection::AverageSalary => {
            print_average(repo, output).await?;
        }
        Selection::HigherThanAverage => {
            let rows = repo.get_vacancies_with_higher_salary().await?;
            print_average(repo, output).await?;
            writeln!(output, "\nThese vacancies pay above the database average:\n")?;
            writeln!(output, "{}", listing_table(&rows))?;
        }
        Selection::Keyword(keyword) => {
            let rows = repo.get_vacancies_with_keyword(keyword).await?;
            if rows.is_empty() {
                writeln!(output, "\nNothing matches your query\n")?;
            } else {
                writeln!(output, "\nVacancies matching your query:\n")?;
                writeln!(output, "{}", listing_table(&rows))?;
            }
        }
        Selection::Exit => writeln!(output, "Goodbye!")?,
    }
    Ok(())
}

async fn print_average<W: Write>(repo: &DbRepository, output: &mut W) -> anyhow::Result<()> {
    match repo.get_avg_salary().await? {
        Some(average) => writeln!(
            output,
            "Average salary across all vacancies in the database: {average} RUR"
        )?,
        None => writeln!(output, "There are no vacancies in the database")?,
    }
    Ok(())
}

fn counts_table(counts: &[CompanyVacancyCount]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Employer", "Vacancies"]);
    for row in counts {
        table.add_row(vec![row.employer_name.clone(), row.vacancy_count.to_string()]);
    }
    table
}

fn listing_table(rows: &[VacancyListing]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Employer", "Vacancy", "Salary", "Link"]);
    for row in rows {
        table.add_row(vec![
            row.employer_name.clone(),
            row.vacancy_name.clone(),
            format!("{}-{} RUR", row.salary_from, row.salary_to),
            row.url.clone(),
        ]);
    }
    table
}
