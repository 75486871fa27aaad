// Readers for the CSV question and answer files.

use std::collections::HashMap;

use csv::StringRecord;
use log::{debug, warn};
use snafu::prelude::*;

use quiz_scoring::*;

use crate::app::io_common::{default_prompt, is_artifact_column, read_decoded, single_letter};
use crate::app::*;

const REQUIRED_FLAT: [&str; 7] = [
    "id",
    "dimension_pair",
    "question",
    "option_a_text",
    "option_a_code",
    "option_b_text",
    "option_b_code",
];

const REQUIRED_INTEREST: [&str; 3] = ["id", "category", "question"];

/// Loads a pre-flattened question file (one row per question).
pub fn read_flat_questions(path: &str) -> AppResult<Vec<Question>> {
    let text = read_decoded(path)?;
    parse_flat_questions(text.as_str())
}

pub fn parse_flat_questions(text: &str) -> AppResult<Vec<Question>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers().context(CsvParseSnafu {})?.clone();
    let columns = header_map(&headers, &REQUIRED_FLAT)?;

    let mut res: Vec<Question> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        // Line 1 is the header.
        let lineno = idx + 2;
        let record = record_r.context(CsvParseSnafu {})?;
        debug!("parse_flat_questions: {:?} {:?}", lineno, record);

        let id = parse_id(field(&record, columns["id"], lineno)?, lineno)?;
        let tag = field(&record, columns["dimension_pair"], lineno)?;
        let pair = DimensionPair::from_tag(tag).context(BadDimensionTagSnafu {
            lineno,
            tag: tag.to_string(),
        })?;

        let option_a = read_option(&record, &columns, "option_a", lineno)?;
        let option_b = read_option(&record, &columns, "option_b", lineno)?;

        let raw_prompt = field(&record, columns["question"], lineno)?.trim();
        let prompt = match raw_prompt {
            "" | "nan" | "None" => default_prompt(id),
            p => p.to_string(),
        };

        let q = Question {
            id,
            pair,
            prompt,
            option_a,
            option_b,
        };
        if !q.options_consistent() {
            warn!(
                "parse_flat_questions: line {}: option codes {:?}/{:?} do not match pair {:?}",
                lineno, q.option_a.code, q.option_b.code, q.pair
            );
        }
        res.push(q);
    }
    Ok(res)
}

/// Loads the statements of the interest model (columns id, category, question).
pub fn read_interest_questions(path: &str) -> AppResult<Vec<RatedQuestion>> {
    let text = read_decoded(path)?;
    parse_interest_questions(text.as_str())
}

pub fn parse_interest_questions(text: &str) -> AppResult<Vec<RatedQuestion>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());
    let headers = rdr.headers().context(CsvParseSnafu {})?.clone();
    let columns = header_map(&headers, &REQUIRED_INTEREST)?;

    let mut res: Vec<RatedQuestion> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let record = record_r.context(CsvParseSnafu {})?;
        let id = parse_id(field(&record, columns["id"], lineno)?, lineno)?;
        let cat_cell = field(&record, columns["category"], lineno)?.trim();
        let category = cat_cell
            .chars()
            .next()
            .and_then(InterestCategory::from_letter)
            .context(BadCellSnafu {
                lineno,
                content: cat_cell.to_string(),
            })?;
        let raw_prompt = field(&record, columns["question"], lineno)?.trim();
        let prompt = match raw_prompt {
            "" | "nan" | "None" => default_prompt(id),
            p => p.to_string(),
        };
        res.push(RatedQuestion {
            id,
            category,
            prompt,
        });
    }
    Ok(res)
}

/// Reads a recorded answer file of the paired model (columns id, code).
pub fn read_recorded_codes(path: &str) -> AppResult<AnswerSet> {
    let mut answers: AnswerSet = AnswerSet::new();
    for (lineno, (id, value)) in read_two_columns(path)?.into_iter() {
        match single_letter(&value) {
            Some(code) => {
                answers.insert(id, code);
            }
            None => {
                warn!(
                    "read_recorded_codes: line {}: {:?} is not a single-letter code, skipping",
                    lineno, value
                );
            }
        }
    }
    Ok(answers)
}

/// Reads a recorded rating file of the interest model (columns id, rating).
pub fn read_recorded_ratings(path: &str) -> AppResult<RatingSet> {
    let mut ratings: RatingSet = RatingSet::new();
    for (lineno, (id, value)) in read_two_columns(path)?.into_iter() {
        match value.trim().parse::<u32>() {
            Ok(v) => {
                ratings.insert(id, v);
            }
            Err(_) => {
                warn!(
                    "read_recorded_ratings: line {}: {:?} is not a rating, skipping",
                    lineno, value
                );
            }
        }
    }
    Ok(ratings)
}

// (lineno, (id, second column)) for every row of a two-column file. The
// header row is detected by its non-numeric id cell and skipped.
fn read_two_columns(path: &str) -> AppResult<Vec<(usize, (u32, String))>> {
    let text = read_decoded(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(text.as_bytes());
    let mut res: Vec<(usize, (u32, String))> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let lineno = idx + 1;
        let record = record_r.context(CsvParseSnafu {})?;
        let id_cell = field(&record, 0, lineno)?.trim();
        if lineno == 1 && id_cell.parse::<u32>().is_err() {
            debug!("read_two_columns: skipping header row {:?}", record);
            continue;
        }
        let id = parse_id(id_cell, lineno)?;
        let value = field(&record, 1, lineno)?.to_string();
        res.push((lineno, (id, value)));
    }
    Ok(res)
}

// Builds the name -> index mapping from the header, dropping artifact
// columns, and fails with the full list of missing required columns.
pub fn header_map(headers: &StringRecord, required: &[&str]) -> AppResult<HashMap<String, usize>> {
    let columns: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| !is_artifact_column(name))
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect();
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !columns.contains_key(**c))
        .map(|c| c.to_string())
        .collect();
    ensure!(missing.is_empty(), MissingColumnsSnafu { columns: missing });
    Ok(columns)
}

fn field<'a>(record: &'a StringRecord, idx: usize, lineno: usize) -> AppResult<&'a str> {
    record.get(idx).context(BadCellSnafu {
        lineno,
        content: format!("missing column {}", idx),
    })
}

fn parse_id(cell: &str, lineno: usize) -> AppResult<u32> {
    cell.trim().parse::<u32>().ok().context(BadCellSnafu {
        lineno,
        content: cell.to_string(),
    })
}

fn read_option(
    record: &StringRecord,
    columns: &HashMap<String, usize>,
    prefix: &str,
    lineno: usize,
) -> AppResult<QuestionOption> {
    let text = field(record, columns[&format!("{}_text", prefix)], lineno)?.to_string();
    let code_cell = field(record, columns[&format!("{}_code", prefix)], lineno)?;
    let code = single_letter(code_cell).context(BadCellSnafu {
        lineno,
        content: code_cell.to_string(),
    })?;
    Ok(QuestionOption { text, code })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAT: &str = "\
id,dimension_pair,question,option_a_text,option_a_code,option_b_text,option_b_code
1,EI,After a long week you would rather,meet people,E,stay in,I
2,SN,When learning something new you prefer,worked examples,S,the big picture,N
3,JP,,plan each day,J,decide on the spot,P
";

    #[test]
    fn flat_rows_load_in_order_with_ids() {
        let questions = parse_flat_questions(FLAT).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(questions[0].pair, DimensionPair::EI);
        assert_eq!(questions[0].option_a.code, 'E');
        assert_eq!(questions[0].option_b.text, "stay in");
    }

    #[test]
    fn blank_prompts_get_a_placeholder() {
        let questions = parse_flat_questions(FLAT).unwrap();
        assert_eq!(questions[2].prompt, "Question 3");
    }

    #[test]
    fn missing_columns_are_named() {
        let text = "id,question,option_a_text\n1,hello,world\n";
        let err = parse_flat_questions(text).unwrap_err();
        match err {
            QuizError::MissingColumns { columns } => {
                assert!(columns.contains(&"dimension_pair".to_string()));
                assert!(columns.contains(&"option_b_code".to_string()));
                assert!(!columns.contains(&"question".to_string()));
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn artifact_columns_are_ignored() {
        let text = "\
id,dimension_pair,question,option_a_text,option_a_code,option_b_text,option_b_code,Unnamed: 7
4,TF,When a friend is upset you first,look for a fix,T,listen,F,
";
        let questions = parse_flat_questions(text).unwrap();
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].pair, DimensionPair::TF);
    }

    #[test]
    fn unknown_pair_tag_is_an_error() {
        let text = "\
id,dimension_pair,question,option_a_text,option_a_code,option_b_text,option_b_code
1,XY,who knows,a,X,b,Y
";
        let err = parse_flat_questions(text).unwrap_err();
        assert!(matches!(err, QuizError::BadDimensionTag { lineno: 2, .. }));
    }

    #[test]
    fn interest_statements_load() {
        let text = "\
id,category,question
1,R,I enjoy repairing machines
2,Artistic,I enjoy sketching
";
        let questions = parse_interest_questions(text).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category, InterestCategory::Realistic);
        assert_eq!(questions[1].category, InterestCategory::Artistic);
    }

    #[test]
    fn recorded_codes_skip_bad_cells() {
        let dir = std::env::temp_dir().join("typetally_io_csv_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let p = dir.join("answers.csv");
        std::fs::write(&p, "id,code\n1,E\n2,EI\n3,i\n").unwrap();
        let answers = read_recorded_codes(p.to_str().unwrap()).unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.get(&1), Some(&'E'));
        assert_eq!(answers.get(&3), Some(&'I'));
    }

    #[test]
    fn recorded_ratings_parse() {
        let dir = std::env::temp_dir().join("typetally_io_csv_tests");
        std::fs::create_dir_all(&dir).unwrap();
        let p = dir.join("ratings.csv");
        std::fs::write(&p, "id,rating\n1,5\n2,three\n3,1\n").unwrap();
        let ratings = read_recorded_ratings(p.to_str().unwrap()).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings.get(&1), Some(&5));
    }
}
