//! Command-line and environment configuration

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_LOG_DIR: &str = ".logs";

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Terminal manager for a songs REST API", long_about = None)]
pub struct Config {
    /// Base URL of the songs API; `/songs` is appended to it.
    #[arg(long, env = "SONGSHELF_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory for the rolling log files.
    #[arg(long, env = "SONGSHELF_LOG_DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_args() -> Self {
        Self::parse()
    }

    pub fn try_from_iter<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }
}
