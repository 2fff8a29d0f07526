// Environment variables
pub const API_URL_VAR: &str = "API_URL";
pub const ACCESS_KEY_VAR: &str = "ACCESS_KEY";
pub const REQUEST_TIMEOUT_VAR: &str = "REQUEST_TIMEOUT_SECONDS";
pub const REQUEST_DELAY_VAR: &str = "REQUEST_DELAY_SECONDS";

// Defaults
pub const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 10.0;
pub const DEFAULT_REQUEST_DELAY_SECS: f64 = 0.1;
pub const DEFAULT_OUTPUT_DIR: &str = "frontend/static/hslu_data";

/// `.env` files tried in order when no `--env-file` is given; the first one found wins.
pub const ENV_FILE_CANDIDATES: &[&str] = &[".env", "scraper/.env"];

// Request header
pub const ACCESS_KEY_HEADER: &str = "X-Access-Key";

// Endpoints
pub const SEMESTERS_ENDPOINT: &str = "/semesters";
pub const STUDY_PROGRAMMES_ENDPOINT: &str = "/study-programmes";
pub const LATEST_SEMESTER_ENDPOINT: &str = "/semesters/latest";

// Output layout
pub const SEMESTERS_FILE: &str = "semesters.json";
pub const STUDY_PROGRAMMES_FILE: &str = "study_programmes.json";
pub const LATEST_SEMESTER_FILE: &str = "latest_semester.json";
pub const MODULES_DIR: &str = "modules";
pub const MAJORS_MINORS_DIR: &str = "majors_minors";
pub const ECTS_DIR: &str = "ects";

// Response fields
pub const LIST_FIELD: &str = "data";
pub const SHORT_NAME_FIELD: &str = "ShortName";
