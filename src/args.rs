use clap::Parser;

/// This is a scoring and reporting program for forced-choice type quizzes
/// and Likert-style interest inventories.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The file containing the question store. See the documentation
    /// for the supported formats.
    #[clap(short, long, value_parser)]
    pub questions: String,

    /// (default csv) The shape of the question file: csv, csv_wide, xlsx_wide or
    /// csv_interest. See the documentation for all the input types.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default type) The scoring model: 'type' for the paired forced-choice model,
    /// 'interest' for the ranked inventory.
    #[clap(long, value_parser)]
    pub model: Option<String>,

    /// (file path or empty) A recorded answer file (columns id,code for the paired
    /// model, id,rating for the ranked model). If provided, the interactive session
    /// is skipped and the attempt is scored directly.
    #[clap(short, long, value_parser)]
    pub answers: Option<String>,

    /// (file path or empty) An optional two-column supplement file (code,note) merged
    /// into the built-in descriptor table. A missing file is not an error.
    #[clap(short, long, value_parser)]
    pub descriptors: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the attempt will be
    /// written in JSON format to the given location.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, a PNG chart of the scores will be written to
    /// the given location.
    #[clap(long, value_parser)]
    pub image: Option<String>,

    /// (file path) A reference file containing the expected summary of an attempt in
    /// JSON format. If provided, typetally will check that the computed summary
    /// matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (default first) Which pole of a pair wins an exact tie: 'first' or 'second'.
    #[clap(long, value_parser)]
    pub tie_break: Option<String>,

    /// (default 3) The number of top categories kept in the interest result code.
    #[clap(long, value_parser)]
    pub top: Option<usize>,

    /// (optional) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
