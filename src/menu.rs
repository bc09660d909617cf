use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    #[error("Menu choice must be a number, got `{0}`")]
    NotANumber(String),

    #[error("Failed to read from the console: {0}")]
    Io(#[from] io::Error),
}

/// The single action a run performs after ingestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    CompaniesAndVacancyCounts,
    AllVacancies,
    AverageSalary,
    HigherThanAverage,
    Keyword(String),
    Exit,
}

const MENU: &str = "\
1. List employers with their vacancy counts
2. List all vacancies
3. Show the average salary across all vacancies
4. List vacancies paying above the average
5. Search vacancies by a keyword in the title
0. Exit";

/// Shows the menu until a valid choice is entered.
///
/// Numbers outside 0-5 re-prompt; anything that is not a number is an
/// error. For option 5 the keyword is asked for until it is non-empty.
/// End of input counts as `Exit`.
pub fn prompt_selection<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Selection, MenuError> {
    loop {
        writeln!(output, "{MENU}")?;
        let Some(line) = prompt_line(input, output, "Enter your choice: ")? else {
            return Ok(Selection::Exit);
        };

        let choice = line.trim();
        let number = match choice.parse::<i64>() {
            Ok(number) => Some(number),
            // Integers too long for i64 are still numbers, just out of range.
            Err(_) if is_integer(choice) => None,
            Err(_) => return Err(MenuError::NotANumber(choice.to_string())),
        };

        let selection = match number {
            Some(1) => Selection::CompaniesAndVacancyCounts,
            Some(2) => Selection::AllVacancies,
            Some(3) => Selection::AverageSalary,
            Some(4) => Selection::HigherThanAverage,
            Some(5) => match prompt_keyword(input, output)? {
                Some(keyword) => Selection::Keyword(keyword),
                None => Selection::Exit,
            },
            Some(0) => Selection::Exit,
            _ => {
                writeln!(output, "Enter a number from 0 to 5")?;
                continue;
            }
        };
        return Ok(selection);
    }
}

/// An optional sign followed by ASCII digits, of any length.
fn is_integer(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn prompt_keyword<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>, MenuError> {
    loop {
        match prompt_line(input, output, "Enter a keyword: ")? {
            None => return Ok(None),
            Some(keyword) if keyword.is_empty() => writeln!(output, "The query is empty")?,
            Some(keyword) => return Ok(Some(keyword)),
        }
    }
}

/// Prints `prompt` and reads one line without its terminator; `None` at end of input.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>, MenuError> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(Some(line))
}
