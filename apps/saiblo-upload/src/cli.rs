//! Command-line surface.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use saiblo_protocol::Language;

/// Upload an AI's source code to Saiblo and wait for it to compile.
///
/// The login token is read from the AUTH_TOKEN environment variable.
#[derive(Debug, Parser)]
#[command(name = "saiblo-upload", version)]
pub struct Cli {
    /// Game name
    #[arg(long)]
    pub game: String,

    /// AI name
    #[arg(long)]
    pub name: String,

    /// AI repository URL
    #[arg(long)]
    pub repo: String,

    /// Commit hash, recorded as the code version's remark
    #[arg(long)]
    pub commit: String,

    /// AI language
    #[arg(long, value_enum)]
    pub lang: LangArg,

    /// Source code directory
    #[arg(long)]
    pub path: PathBuf,

    /// Upload to the development site
    #[arg(long)]
    pub dev: bool,

    /// Give up waiting for the compile result after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Config file (default: ~/.config/saiblo-upload/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LangArg {
    #[value(name = "python_zip")]
    PythonZip,
    #[value(name = "cpp_zip")]
    CppZip,
    #[value(name = "auto")]
    Auto,
}

impl From<LangArg> for Language {
    fn from(arg: LangArg) -> Self {
        match arg {
            LangArg::PythonZip => Self::PythonZip,
            LangArg::CppZip => Self::CppZip,
            LangArg::Auto => Self::Auto,
        }
    }
}
