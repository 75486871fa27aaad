use log::{info, warn};

use quiz_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::app::descriptors::{Descriptor, DescriptorBook};
use crate::args::Args;

pub mod descriptors;
pub mod io_common;
pub mod io_csv;
pub mod io_wide;
pub mod render;
pub mod session;

#[derive(Debug, Snafu)]
pub enum QuizError {
    #[snafu(display("Error opening file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook has no readable worksheet"))]
    EmptyWorkbook {},
    #[snafu(display("Could not decode {path} as utf-8 or euc-kr text"))]
    BadEncoding { path: String },
    #[snafu(display("Error reading delimited data"))]
    CsvParse { source: csv::Error },
    #[snafu(display("The question file is missing required columns: {columns:?}"))]
    MissingColumns { columns: Vec<String> },
    #[snafu(display("Line {lineno}: could not understand cell {content:?}"))]
    BadCell { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: unknown dimension pair tag {tag:?}"))]
    BadDimensionTag { lineno: usize, tag: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error with JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error talking to the terminal"))]
    TerminalIo { source: std::io::Error },
    #[snafu(display("Error rendering the summary chart: {message}"))]
    Render { message: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type AppResult<T> = Result<T, QuizError>;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub model: String,
    pub questions: usize,
    #[serde(rename = "tieBreak")]
    pub tie_break: Option<String>,
    #[serde(rename = "topN")]
    pub top_n: Option<usize>,
}

pub fn run_app(args: &Args) -> AppResult<()> {
    let model = args.model.clone().unwrap_or_else(|| "type".to_string());
    let book = DescriptorBook::with_supplement(&args.descriptors)?;
    match model.as_str() {
        "type" => run_type_model(args, &book),
        "interest" => run_interest_model(args, &book),
        x => whatever!("Unknown scoring model {:?} (expected 'type' or 'interest')", x),
    }
}

fn validate_rules(args: &Args) -> AppResult<ScoringRules> {
    let tie_break = match args.tie_break.as_deref() {
        None | Some("first") => TieBreakMode::FavorFirst,
        Some("second") => TieBreakMode::FavorSecond,
        Some(x) => {
            whatever!("Cannot use tie-break mode {:?} (expected 'first' or 'second')", x)
        }
    };
    Ok(ScoringRules { tie_break })
}

fn load_type_questions(args: &Args) -> AppResult<Vec<Question>> {
    let input_type = args.input_type.clone().unwrap_or_else(|| "csv".to_string());
    match input_type.as_str() {
        "csv" => io_csv::read_flat_questions(&args.questions),
        "csv_wide" => io_wide::read_wide_questions_csv(&args.questions),
        "xlsx_wide" => {
            io_wide::read_wide_questions_xlsx(&args.questions, &args.excel_worksheet_name)
        }
        x => whatever!("Input type not implemented for the paired model: {:?}", x),
    }
}

fn run_type_model(args: &Args, book: &DescriptorBook) -> AppResult<()> {
    let rules = validate_rules(args)?;
    let questions = load_type_questions(args)?;
    info!(
        "Loaded {} questions from {:?}",
        questions.len(),
        args.questions
    );

    match &args.answers {
        Some(path) => {
            let answers = io_csv::read_recorded_codes(path)?;
            let result = run_type_scoring(&questions, &answers, &rules);
            if result.unanswered > 0 {
                warn!(
                    "{} of {} questions have no usable answer; the result is computed from the rest",
                    result.unanswered,
                    questions.len()
                );
            }
            let summary = type_summary_js(&result, book, questions.len(), &rules);
            finish_attempt(args, &summary, || render::render_type_chart(&result))
        }
        None => session::run_session(
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
            &questions,
            &rules,
            book,
            &args.image,
        ),
    }
}

fn run_interest_model(args: &Args, book: &DescriptorBook) -> AppResult<()> {
    let input_type = args
        .input_type
        .clone()
        .unwrap_or_else(|| "csv_interest".to_string());
    let questions = match input_type.as_str() {
        "csv_interest" => io_csv::read_interest_questions(&args.questions)?,
        x => whatever!("Input type not implemented for the interest model: {:?}", x),
    };
    info!(
        "Loaded {} statements from {:?}",
        questions.len(),
        args.questions
    );
    let top_n = args.top.unwrap_or(3);

    let answers_path = match &args.answers {
        Some(p) => p,
        None => {
            whatever!("The interest model requires a recorded answer file (--answers)")
        }
    };
    let ratings = io_csv::read_recorded_ratings(answers_path)?;
    let result = run_interest_ranking(&questions, &ratings, top_n);
    if result.unrated > 0 {
        warn!(
            "{} of {} statements have no rating; the ranking is computed from the rest",
            result.unrated,
            questions.len()
        );
    }
    let summary = interest_summary_js(&result, book, questions.len(), top_n);
    finish_attempt(args, &summary, || render::render_interest_chart(&result))
}

// Writes the summary, optionally the chart, and checks the reference if one
// was provided.
fn finish_attempt<F>(args: &Args, summary: &JSValue, render: F) -> AppResult<()>
where
    F: FnOnce() -> AppResult<Vec<u8>>,
{
    let pretty_js_stats = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(path) => {
            fs::write(path, &pretty_js_stats).context(OpeningFileSnafu {
                path: path.to_string(),
            })?;
            info!("Wrote summary to {:?}", path);
        }
    }

    if let Some(path) = &args.image {
        let png = render()?;
        fs::write(path, png).context(OpeningFileSnafu { path: path.clone() })?;
        info!("Wrote chart to {:?}", path);
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p.clone())?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary")
        }
    }
    Ok(())
}

pub fn read_summary(path: String) -> AppResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

// An array of pairs rather than an object: JSON object keys would sort
// alphabetically, and the tally must read in universe order.
fn tally_js(tally: &ScoreTally) -> JSValue {
    let buckets: Vec<JSValue> = tally
        .counts()
        .iter()
        .map(|(code, count)| json!({"code": code.to_string(), "count": count}))
        .collect();
    JSValue::Array(buckets)
}

fn descriptor_js(d: &Descriptor) -> JSValue {
    json!({
        "summary": d.summary,
        "majors": d.majors,
        "careers": d.careers,
        "notes": d.notes,
    })
}

pub fn type_summary_js(
    result: &TypeResult,
    book: &DescriptorBook,
    num_questions: usize,
    rules: &ScoringRules,
) -> JSValue {
    let c = SummaryConfig {
        model: "type".to_string(),
        questions: num_questions,
        tie_break: Some(
            match rules.tie_break {
                TieBreakMode::FavorFirst => "first",
                TieBreakMode::FavorSecond => "second",
            }
            .to_string(),
        ),
        top_n: None,
    };
    let d = book.lookup_type(&result.code);
    json!({
        "config": c,
        "result": {
            "code": result.code,
            "tally": tally_js(&result.tally),
            "answered": result.answered,
            "unanswered": result.unanswered,
        },
        "descriptor": descriptor_js(&d),
    })
}

pub fn interest_summary_js(
    result: &InterestResult,
    book: &DescriptorBook,
    num_questions: usize,
    top_n: usize,
) -> JSValue {
    let c = SummaryConfig {
        model: "interest".to_string(),
        questions: num_questions,
        tie_break: None,
        top_n: Some(top_n),
    };
    let ranking: Vec<JSValue> = result
        .ranking
        .iter()
        .map(|(letter, score)| {
            let name = InterestCategory::from_letter(*letter)
                .map(|cat| cat.name())
                .unwrap_or("?");
            json!({"category": letter.to_string(), "name": name, "score": score})
        })
        .collect();
    let descriptors: Vec<JSValue> = result
        .code
        .chars()
        .map(|letter| descriptor_js(&book.lookup_interest(letter)))
        .collect();
    json!({
        "config": c,
        "result": {
            "code": result.code,
            "ranking": ranking,
            "tally": tally_js(&result.tally),
            "rated": result.rated,
            "unrated": result.unrated,
        },
        "descriptors": descriptors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_args() -> Args {
        Args {
            questions: "questions.csv".to_string(),
            input_type: None,
            model: None,
            answers: None,
            descriptors: None,
            out: None,
            image: None,
            reference: None,
            tie_break: None,
            top: None,
            excel_worksheet_name: None,
            verbose: false,
        }
    }

    #[test]
    fn tie_break_defaults_to_first() {
        let rules = validate_rules(&base_args()).unwrap();
        assert_eq!(rules.tie_break, TieBreakMode::FavorFirst);
    }

    #[test]
    fn tie_break_second_is_accepted() {
        let mut args = base_args();
        args.tie_break = Some("second".to_string());
        let rules = validate_rules(&args).unwrap();
        assert_eq!(rules.tie_break, TieBreakMode::FavorSecond);
    }

    #[test]
    fn tie_break_rejects_unknown_modes() {
        let mut args = base_args();
        args.tie_break = Some("coin-flip".to_string());
        assert!(validate_rules(&args).is_err());
    }

    #[test]
    fn type_summary_carries_code_and_tally() {
        let questions: Vec<Question> = Vec::new();
        let answers: AnswerSet = HashMap::new();
        let result = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        let book = DescriptorBook::with_supplement(&None).unwrap();
        let js = type_summary_js(&result, &book, 0, &ScoringRules::DEFAULT_RULES);
        assert_eq!(js["result"]["code"], json!("ESTJ"));
        assert_eq!(js["result"]["tally"][0], json!({"code": "E", "count": 0}));
        assert_eq!(js["config"]["model"], json!("type"));
    }

    #[test]
    fn tally_serializes_in_universe_order() {
        let questions: Vec<Question> = Vec::new();
        let answers: AnswerSet = HashMap::new();
        let result = run_type_scoring(&questions, &answers, &ScoringRules::DEFAULT_RULES);
        let book = DescriptorBook::with_supplement(&None).unwrap();
        let js = type_summary_js(&result, &book, 0, &ScoringRules::DEFAULT_RULES);
        let codes: Vec<&str> = js["result"]["tally"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["code"].as_str().unwrap())
            .collect();
        assert_eq!(codes, vec!["E", "I", "S", "N", "T", "F", "J", "P"]);
    }
}
