// Readers for the wide question format: one column per letter, one row per
// pair group, flattened into one question per pair.

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::{debug, warn};
use snafu::prelude::*;

use quiz_scoring::*;

use crate::app::io_common::{default_prompt, read_decoded};
use crate::app::*;

pub fn read_wide_questions_csv(path: &str) -> AppResult<Vec<Question>> {
    let text = read_decoded(path)?;
    parse_wide_questions_csv(text.as_str())
}

pub fn parse_wide_questions_csv(text: &str) -> AppResult<Vec<Question>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record_r in rdr.records() {
        let record = record_r.context(CsvParseSnafu {})?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    match rows.split_first() {
        Some((header, body)) => flatten_wide(header, body),
        None => MissingColumnsSnafu {
            columns: TYPE_CODES.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
        }
        .fail(),
    }
}

pub fn read_wide_questions_xlsx(
    path: &str,
    worksheet_name: &Option<String>,
) -> AppResult<Vec<Question>> {
    let wrange = get_range(path, worksheet_name)?;
    let mut rows = wrange.rows();
    let header: Vec<String> = rows
        .next()
        .context(EmptyWorkbookSnafu {})?
        .iter()
        .map(cell_to_string)
        .collect::<AppResult<Vec<String>>>()?;
    debug!("read_wide_questions_xlsx: header: {:?}", header);

    let mut body: Vec<Vec<String>> = Vec::new();
    for row in rows {
        body.push(
            row.iter()
                .map(cell_to_string)
                .collect::<AppResult<Vec<String>>>()?,
        );
    }
    flatten_wide(&header, &body)
}

// One row of the wide format is a group of up to four questions, one per
// pair. A pair with an empty cell on either side yields no question from
// that row. Ids are assigned sequentially in flattening order.
pub fn flatten_wide(header: &[String], rows: &[Vec<String>]) -> AppResult<Vec<Question>> {
    let mut letter_columns: Vec<(char, usize)> = Vec::new();
    for &letter in TYPE_CODES.iter() {
        let found = header
            .iter()
            .position(|name| name.trim().to_uppercase() == letter.to_string());
        if let Some(idx) = found {
            letter_columns.push((letter, idx));
        }
    }
    let missing: Vec<String> = TYPE_CODES
        .iter()
        .filter(|letter| !letter_columns.iter().any(|(l, _)| l == *letter))
        .map(|l| l.to_string())
        .collect();
    ensure!(missing.is_empty(), MissingColumnsSnafu { columns: missing });

    let column_of = |letter: char| -> usize {
        letter_columns
            .iter()
            .find(|(l, _)| *l == letter)
            .map(|(_, idx)| *idx)
            .unwrap_or(usize::MAX)
    };

    let mut res: Vec<Question> = Vec::new();
    let mut next_id: u32 = 1;
    for (row_idx, row) in rows.iter().enumerate() {
        for pair in DimensionPair::ALL.iter() {
            let (a, b) = pair.letters();
            let cell_a = row.get(column_of(a)).map(|s| s.trim()).unwrap_or("");
            let cell_b = row.get(column_of(b)).map(|s| s.trim()).unwrap_or("");
            if cell_a.is_empty() || cell_b.is_empty() {
                debug!(
                    "flatten_wide: row {}: pair {:?} has an empty side, skipping",
                    row_idx + 2,
                    pair
                );
                continue;
            }
            let id = next_id;
            next_id += 1;
            res.push(Question {
                id,
                pair: *pair,
                prompt: default_prompt(id),
                option_a: QuestionOption {
                    text: cell_a.to_string(),
                    code: a,
                },
                option_b: QuestionOption {
                    text: cell_b.to_string(),
                    code: b,
                },
            });
        }
    }
    if res.is_empty() {
        warn!("flatten_wide: the wide file produced no questions");
    }
    Ok(res)
}

fn cell_to_string(cell: &DataType) -> AppResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok("".to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        _ => whatever!("cell_to_string: could not understand cell {:?}", cell),
    }
}

fn get_range(path: &str, worksheet_name: &Option<String>) -> AppResult<calamine::Range<DataType>> {
    debug!(
        "get_range: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningWorkbookSnafu {
        path: path.to_string(),
    })?;

    // A worksheet name was provided, use it.
    if let Some(name) = worksheet_name {
        let wrange = workbook
            .worksheet_range(name)
            .context(EmptyWorkbookSnafu {})?
            .context(OpeningWorkbookSnafu {
                path: path.to_string(),
            })?;
        Ok(wrange)
    } else {
        let wrange = workbook
            .worksheet_range_at(0)
            .context(EmptyWorkbookSnafu {})?
            .context(OpeningWorkbookSnafu {
                path: path.to_string(),
            })?;
        Ok(wrange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<String> {
        "E,I,S,N,T,F,J,P"
            .split(',')
            .map(|s| s.to_string())
            .collect()
    }

    fn full_row() -> Vec<String> {
        vec![
            "meet people".to_string(),
            "stay in".to_string(),
            "worked examples".to_string(),
            "the big picture".to_string(),
            "look for a fix".to_string(),
            "listen".to_string(),
            "plan each day".to_string(),
            "decide on the spot".to_string(),
        ]
    }

    #[test]
    fn full_row_yields_four_questions() {
        let questions = flatten_wide(&header(), &[full_row()]).unwrap();
        assert_eq!(questions.len(), 4);
        assert_eq!(
            questions.iter().map(|q| q.pair).collect::<Vec<_>>(),
            DimensionPair::ALL.to_vec()
        );
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
        assert!(questions.iter().all(|q| q.options_consistent()));
    }

    #[test]
    fn empty_cell_drops_the_pair() {
        let mut row = full_row();
        row[1] = " ".to_string();
        let questions = flatten_wide(&header(), &[row]).unwrap();
        assert_eq!(questions.len(), 3);
        assert!(questions.iter().all(|q| q.pair != DimensionPair::EI));
        // Ids stay sequential across the gap.
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn ids_keep_counting_across_rows() {
        let questions = flatten_wide(&header(), &[full_row(), full_row()]).unwrap();
        assert_eq!(questions.len(), 8);
        assert_eq!(questions[7].id, 8);
    }

    #[test]
    fn missing_letter_columns_are_named() {
        let short: Vec<String> = "E,I,S,N".split(',').map(|s| s.to_string()).collect();
        let err = flatten_wide(&short, &[]).unwrap_err();
        match err {
            QuizError::MissingColumns { columns } => {
                assert_eq!(columns, vec!["T", "F", "J", "P"]);
            }
            e => panic!("unexpected error {:?}", e),
        }
    }

    #[test]
    fn csv_wide_parses_header_and_rows() {
        let text = "\
E,I,S,N,T,F,J,P
meet people,stay in,worked examples,the big picture,look for a fix,listen,plan each day,decide on the spot
";
        let questions = parse_wide_questions_csv(text).unwrap();
        assert_eq!(questions.len(), 4);
        assert_eq!(questions[0].option_a.text, "meet people");
        assert_eq!(questions[0].option_b.code, 'I');
    }
}
