use std::error::Error;
use std::path::Path;

use rs_predict_core::ModelConfig;
use serde::{Deserialize, Serialize};

/// Configuration file read when no path is given on the command line.
pub const DEFAULT_CONFIG_PATH: &str = "./predict.toml";

/// Server settings, read from a TOML file.
///
/// Every field is optional in the file; missing ones take their default.
///
/// ```toml
/// port = 8080
/// corpus = "./data/books"
///
/// [model]
/// order = 4
/// tie_break = "lexical"
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Corpus file, or directory whose files are concatenated.
	pub corpus: String,
	pub model: ModelConfig,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "127.0.0.1".to_owned(),
			port: 5000,
			corpus: "./data".to_owned(),
			model: ModelConfig::default(),
		}
	}
}

impl ServerConfig {
	/// Parses a configuration file.
	pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)
			.map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
		let config = toml::from_str(&content)
			.map_err(|e| format!("Failed to parse config file {}: {e}", path.display()))?;
		Ok(config)
	}

	/// Loads the configuration.
	///
	/// - An explicit `path` must exist and parse
	/// - Otherwise `./predict.toml` is used when present
	/// - Otherwise defaults apply
	pub fn load(path: Option<&str>) -> Result<Self, Box<dyn Error>> {
		match path {
			Some(p) => Self::load_from_file(p),
			None if Path::new(DEFAULT_CONFIG_PATH).is_file() => Self::load_from_file(DEFAULT_CONFIG_PATH),
			None => Ok(Self::default()),
		}
	}
}
