//! Launch configuration: which sales file to open and how it is encoded.

use crate::data::{LoadOptions, SourceEncoding};
use std::path::PathBuf;
use tracing::warn;

pub const DEFAULT_DATA_FILE: &str = "sales_data_sample.csv";
pub const DATA_ENV: &str = "SALES_DASHBOARD_DATA";
pub const ENCODING_ENV: &str = "SALES_DASHBOARD_ENCODING";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub encoding: SourceEncoding,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            encoding: SourceEncoding::default(),
        }
    }
}

impl AppConfig {
    /// Read the first command-line argument and the environment.
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var(DATA_ENV).ok(),
            std::env::var(ENCODING_ENV).ok(),
        )
    }

    /// The argument wins over the environment; unknown encodings fall back to Latin-1.
    pub fn resolve(
        arg_path: Option<String>,
        env_path: Option<String>,
        env_encoding: Option<String>,
    ) -> Self {
        let data_path = arg_path
            .or(env_path)
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let encoding = match env_encoding.as_deref().map(str::parse::<SourceEncoding>) {
            Some(Ok(encoding)) => encoding,
            Some(Err(e)) => {
                warn!("{ENCODING_ENV}: {e}, using {}", SourceEncoding::default());
                SourceEncoding::default()
            }
            None => SourceEncoding::default(),
        };

        Self {
            data_path,
            encoding,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new(&self.data_path).with_encoding(self.encoding)
    }
}
