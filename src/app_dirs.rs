//! Resolve configuration and data directories for `ctxmenu`.
//!
//! Environment overrides win; otherwise the platform locations from the
//! `directories` crate are used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "ctxmenu";

const CONFIG_DIR_ENV: &str = "CTXMENU_CONFIG_DIR";
const DATA_DIR_ENV: &str = "CTXMENU_DATA_DIR";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for ctxmenu"))
}

/// An empty override counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory for the log file.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Default location of the log file.
pub fn default_log_file() -> Result<PathBuf> {
	Ok(get_data_dir()?.join("ctxmenu.log"))
}
