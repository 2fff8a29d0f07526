use crate::constants::*;
use serde_json::Value;
use std::path::PathBuf;

/// One endpoint together with the file its response is stored in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path appended to the API base URL, e.g. `/semesters/25HS/modules`
    pub endpoint: String,
    /// Output path relative to the base directory
    pub relative_path: PathBuf,
}

impl Target {
    fn new(endpoint: impl Into<String>, relative_path: impl Into<PathBuf>) -> Self {
        Self {
            endpoint: endpoint.into(),
            relative_path: relative_path.into(),
        }
    }

    pub fn semesters() -> Self {
        Self::new(SEMESTERS_ENDPOINT, SEMESTERS_FILE)
    }

    pub fn study_programmes() -> Self {
        Self::new(STUDY_PROGRAMMES_ENDPOINT, STUDY_PROGRAMMES_FILE)
    }

    pub fn latest_semester() -> Self {
        Self::new(LATEST_SEMESTER_ENDPOINT, LATEST_SEMESTER_FILE)
    }

    /// Module list of one semester; the identifier is used verbatim in both places.
    pub fn semester_modules(semester: &str) -> Self {
        Self::new(
            format!("/semesters/{semester}/modules"),
            PathBuf::from(MODULES_DIR).join(format!("{semester}_modules.json")),
        )
    }

    /// Majors and minors of a programme. The endpoint takes the lower-cased
    /// short name, the file keeps the original case.
    pub fn majors_minors(short_name: &str) -> Self {
        Self::new(
            format!("/majors-minors/{}", short_name.to_lowercase()),
            PathBuf::from(MAJORS_MINORS_DIR).join(format!("{short_name}_majors_minors.json")),
        )
    }

    /// ECTS data of a programme, cased like [`Target::majors_minors`].
    pub fn ects(short_name: &str) -> Self {
        Self::new(
            format!("/ects/{}", short_name.to_lowercase()),
            PathBuf::from(ECTS_DIR).join(format!("{short_name}_ects.json")),
        )
    }
}

/// Finds the list of entries in a list-producing response.
///
/// An object yields its `"data"` array, a bare array yields itself, and
/// anything else (including an object whose `"data"` is not an array)
/// yields an empty slice.
///
/// # Example
///
/// ```
/// use hslu_fetch::models::extract_list;
/// use serde_json::json;
///
/// assert_eq!(extract_list(&json!({"data": ["25HS"]})).len(), 1);
/// assert_eq!(extract_list(&json!(["25HS", "25FS"])).len(), 2);
/// assert!(extract_list(&json!({"items": []})).is_empty());
/// ```
pub fn extract_list(payload: &Value) -> &[Value] {
    if let Some(Value::Array(items)) = payload.get(LIST_FIELD) {
        return items;
    }
    match payload {
        Value::Array(items) => items,
        _ => &[],
    }
}

/// Identifier of a semester entry as used in paths.
///
/// Strings are taken verbatim; other values use their compact JSON text, so a
/// numeric `2024` produces `/semesters/2024/modules`, `true` stays `true` and
/// `null` becomes `null`.
pub fn semester_slug(entry: &Value) -> String {
    match entry {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Short name of a study programme entry, if it has a usable one.
pub fn short_name(entry: &Value) -> Option<&str> {
    entry
        .as_object()?
        .get(SHORT_NAME_FIELD)?
        .as_str()
        .filter(|name| !name.is_empty())
}
