//! Sequential fetch-and-persist driver.
//!
//! The run walks a fixed hierarchy: three top-level resources first, then one
//! request per semester and two per study programme, derived from the
//! top-level lists. Each request completes before the next one starts.

use crate::fetcher::JsonSource;
use crate::models::{extract_list, semester_slug, short_name, Target};
use crate::persister::{save_json, SaveOutcome};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tally of one run, logged at the end.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Requests issued
    pub requests: usize,
    /// Requests that returned no data
    pub failed_requests: usize,
    /// Files written
    pub saved: usize,
    /// Saves skipped for lack of data
    pub skipped: usize,
    /// Saves that hit an I/O error
    pub save_errors: usize,
}

/// Runs every fetch of the catalog export in order.
///
/// 1. Fetches the semester and study-programme lists and the latest semester.
/// 2. Fetches the module list of every semester in the semester list.
/// 3. Fetches majors/minors and ECTS data of every study programme.
///
/// A list that cannot be derived skips its dependent fetches; nothing here is
/// fatal, so the function always returns a summary.
pub async fn run<S: JsonSource>(source: &S, output_dir: &Path, delay: Duration) -> RunSummary {
    let mut runner = Runner {
        source,
        output_dir,
        delay,
        summary: RunSummary::default(),
    };

    info!("--- Starting HSLU data fetch ---");

    info!("Fetching primary lists...");
    let semesters = runner.fetch_and_save(&Target::semesters()).await;
    let study_programmes = runner.fetch_and_save(&Target::study_programmes()).await;

    info!("Fetching latest semester...");
    runner.fetch_and_save(&Target::latest_semester()).await;

    runner.fetch_semester_modules(semesters.as_ref()).await;
    runner.fetch_programme_details(study_programmes.as_ref()).await;

    let summary = runner.summary;
    info!(
        requests = summary.requests,
        failed_requests = summary.failed_requests,
        saved = summary.saved,
        skipped = summary.skipped,
        save_errors = summary.save_errors,
        "--- Fetch finished ---"
    );
    summary
}

struct Runner<'a, S> {
    source: &'a S,
    output_dir: &'a Path,
    delay: Duration,
    summary: RunSummary,
}

impl<S: JsonSource> Runner<'_, S> {
    /// One fetch/save cycle followed by the configured pause.
    ///
    /// Returns the fetched value so list responses can drive further requests.
    async fn fetch_and_save(&mut self, target: &Target) -> Option<Value> {
        self.summary.requests += 1;
        let data = self.source.fetch(&target.endpoint).await;
        if data.is_none() {
            self.summary.failed_requests += 1;
        }

        let file_path = self.output_dir.join(&target.relative_path);
        match save_json(data.as_ref(), &file_path).await {
            Ok(SaveOutcome::Saved) => self.summary.saved += 1,
            Ok(SaveOutcome::Skipped) => self.summary.skipped += 1,
            Err(e) => {
                self.summary.save_errors += 1;
                warn!(
                    file_path = %file_path.display(),
                    error = %e,
                    "Failed to save response"
                );
            }
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        data
    }

    async fn fetch_semester_modules(&mut self, semesters: Option<&Value>) {
        let list = semesters.map(extract_list).unwrap_or_default();
        if list.is_empty() {
            info!("Could not fetch semester list. Skipping module downloads.");
            return;
        }

        info!(semesters = list.len(), "Fetching modules for each semester...");
        for entry in list {
            let semester = semester_slug(entry);
            info!(semester = %semester, "  - Fetching modules for {semester}...");
            self.fetch_and_save(&Target::semester_modules(&semester))
                .await;
        }
    }

    async fn fetch_programme_details(&mut self, study_programmes: Option<&Value>) {
        let list = study_programmes.map(extract_list).unwrap_or_default();
        if list.is_empty() {
            info!("Could not fetch study programme list. Skipping related downloads.");
            return;
        }

        info!(
            programmes = list.len(),
            "Fetching data for each study programme..."
        );
        for entry in list {
            let Some(short_name) = short_name(entry) else {
                debug!(entry = %entry, "Study programme without ShortName, skipping");
                continue;
            };

            info!(programme = short_name, "  - Fetching majors and minors for {short_name}...");
            self.fetch_and_save(&Target::majors_minors(short_name))
                .await;

            info!(programme = short_name, "  - Fetching ECTS data for {short_name}...");
            self.fetch_and_save(&Target::ects(short_name)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serves canned values and records every endpoint asked for.
    #[derive(Default)]
    struct CannedSource {
        responses: HashMap<String, Value>,
        requested: Mutex<Vec<String>>,
    }

    impl CannedSource {
        fn with(mut self, endpoint: &str, value: Value) -> Self {
            self.responses.insert(endpoint.to_string(), value);
            self
        }
    }

    impl JsonSource for CannedSource {
        async fn fetch(&self, endpoint: &str) -> Option<Value> {
            self.requested.lock().unwrap().push(endpoint.to_string());
            self.responses.get(endpoint).cloned()
        }
    }

    #[tokio::test]
    async fn nothing_available_issues_only_top_level_requests() {
        let temp_dir = TempDir::new().unwrap();
        let source = CannedSource::default();

        let summary = run(&source, temp_dir.path(), Duration::ZERO).await;

        assert_eq!(
            *source.requested.lock().unwrap(),
            vec!["/semesters", "/study-programmes", "/semesters/latest"]
        );
        assert_eq!(
            summary,
            RunSummary {
                requests: 3,
                failed_requests: 3,
                saved: 0,
                skipped: 3,
                save_errors: 0,
            }
        );
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn save_errors_are_counted_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        // a regular file blocks the modules directory
        std::fs::write(temp_dir.path().join("modules"), "").unwrap();
        let source = CannedSource::default()
            .with("/semesters", json!(["25HS"]))
            .with("/semesters/25HS/modules", json!([]));

        let summary = run(&source, temp_dir.path(), Duration::ZERO).await;

        assert_eq!(summary.requests, 4);
        assert_eq!(summary.save_errors, 1);
        assert_eq!(summary.saved, 1);
    }

    #[tokio::test]
    async fn delay_is_applied_after_each_request() {
        let temp_dir = TempDir::new().unwrap();
        let source = CannedSource::default();

        let start = std::time::Instant::now();
        run(&source, temp_dir.path(), Duration::from_millis(20)).await;

        assert!(start.elapsed() >= Duration::from_millis(60));
    }
}
