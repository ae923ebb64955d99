use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct GradeArgs {
    /// Response sheet PDF
    pub response: PathBuf,

    /// Answer key PDF
    pub key: PathBuf,

    /// Report file (defaults to results_<timestamp>.csv)
    #[arg(long, short, value_name = "FILE", conflicts_with = "no_report")]
    pub output: Option<PathBuf>,

    /// Do not write the CSV report
    #[arg(long)]
    pub no_report: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ResponsesArgs {
    /// Response sheet PDF
    pub response: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct KeyArgs {
    /// Answer key PDF
    pub key: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Answer key PDF
    pub key: PathBuf,

    /// Response sheet PDFs or directories containing them
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Directory for the per-sheet reports
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}
