use crate::errors::{AppError, AppResult};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// What [`save_json`] did with a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The file was written (or overwritten)
    Saved,
    /// There was no data, nothing was touched on disk
    Skipped,
}

/// Writes a fetched value to `file_path` as pretty-printed JSON.
///
/// # Behavior
///
/// - **No data**: `None` and JSON `null` are skipped with a log line and no
///   file is created.
/// - **Layout**: missing parent directories are created.
/// - **Format**: 2-space indentation, UTF-8, non-ASCII characters written as-is.
/// - **Atomic writes**: the JSON goes to a sibling `.part` file which is then
///   renamed over the target, so an existing file is replaced in one step.
///
/// # Errors
///
/// Returns `IoError` if directories cannot be created or the file cannot be
/// written or renamed.
///
/// # Example
///
/// ```no_run
/// use hslu_fetch::persister::{save_json, SaveOutcome};
/// use serde_json::json;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), hslu_fetch::errors::AppError> {
/// let data = json!({"data": ["25HS"]});
/// let outcome = save_json(Some(&data), Path::new("out/semesters.json")).await?;
/// assert_eq!(outcome, SaveOutcome::Saved);
/// # Ok(())
/// # }
/// ```
pub async fn save_json(data: Option<&Value>, file_path: &Path) -> AppResult<SaveOutcome> {
    let data = match data {
        Some(value) if !value.is_null() => value,
        _ => {
            info!("No data to save for {}. Skipping.", file_path.display());
            return Ok(SaveOutcome::Skipped);
        }
    };

    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(|e| {
            AppError::IoError(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let contents = serde_json::to_string_pretty(data)?;

    let tmp_path = part_path(file_path);
    fs::write(&tmp_path, contents.as_bytes()).await.map_err(|e| {
        AppError::IoError(format!(
            "Failed to write temp file {}: {}",
            tmp_path.display(),
            e
        ))
    })?;

    if let Err(e) = fs::rename(&tmp_path, file_path).await {
        // Remove the orphaned temp file (best-effort)
        if let Err(cleanup_err) = fs::remove_file(&tmp_path).await {
            warn!(
                file_path = %tmp_path.display(),
                error = %cleanup_err,
                "Failed to remove temp file"
            );
        }
        return Err(AppError::IoError(format!(
            "Failed to rename temp file {} to {}: {}",
            tmp_path.display(),
            file_path.display(),
            e
        )));
    }

    info!("Successfully saved data to {}", file_path.display());
    Ok(SaveOutcome::Saved)
}

/// `modules/25HS_modules.json` -> `modules/25HS_modules.json.part`
fn part_path(file_path: &Path) -> PathBuf {
    let mut name = file_path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
