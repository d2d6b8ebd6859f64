use crate::error::ProvisionError;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

pub const SQL_DIR_NAME: &str = "sql";
pub const SQL_EXTENSION: &str = ".sql";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlScript {
    pub file_name: String,
    pub contents: String,
}

/// The `sql` directory sitting next to the running executable.
pub fn default_sql_dir() -> Result<PathBuf, ProvisionError> {
    let exe = std::env::current_exe()?;
    let parent = exe.parent().ok_or(ProvisionError::SqlDirUnresolved)?;
    Ok(parent.join(SQL_DIR_NAME))
}

/// Read every `*.sql` file directly inside `dir`, in directory listing order.
pub fn load_scripts(dir: &Path) -> Result<Vec<SqlScript>, ProvisionError> {
    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(file_name) = script_name(&path) else {
            continue;
        };
        let contents = fs::read_to_string(&path)?;
        debug!(file = %file_name, bytes = contents.len(), "loaded sql script");
        scripts.push(SqlScript {
            file_name,
            contents,
        });
    }
    Ok(scripts)
}

/// Report name of a script entry. Non UTF-8 names are kept (lossily) so such
/// scripts still run; the file itself is read through the original path.
fn script_name(path: &Path) -> Option<String> {
    let raw = path.file_name()?;
    let name = raw.to_string_lossy();
    if raw.to_str().is_none() {
        warn!(path = %path.display(), "sql script name is not UTF-8; reporting it lossily");
    }
    (name.ends_with(SQL_EXTENSION) && path.is_file()).then(|| name.into_owned())
}
