use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::{Duration, SystemTime};

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::RunConfig;
use crate::helper::io::{file_stamp, read_run_data};
use crate::helper::run_helper::*;
use crate::pipelines::summary::write_summary_outputs;
use crate::pipelines::{LOG_FILE_NAME, PipelineError};

/// Re-summarizes the run whenever the snapshot file changes on disk.
pub struct Watcher {
    data_path: PathBuf,
    output_dir: PathBuf,
    config: RunConfig,
    // mtime and length of the last snapshot summarized
    last_seen: Option<(SystemTime, u64)>,
    summaries_written: usize,
}

impl Watcher {
    pub fn new(data_path: &Path, config: RunConfig, output_dir: &Path) -> Self {
        Watcher {
            data_path: data_path.to_path_buf(),
            output_dir: output_dir.to_path_buf(),
            config,
            last_seen: None,
            summaries_written: 0,
        }
    }

    pub fn summaries_written(&self) -> usize {
        self.summaries_written
    }

    /// Returns the new summary if the snapshot changed since the last poll,
    /// `None` if it is unchanged or not there yet.
    pub fn poll(&mut self) -> Result<Option<RunSummary>, PipelineError> {
        let stamp = match file_stamp(&self.data_path) {
            Ok(stamp) => stamp,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if self.last_seen == Some(stamp) {
            return Ok(None);
        }

        let data = read_run_data(&self.data_path)?;
        let summary = summarize(&data, &self.config);
        write_summary_outputs(&summary, &self.output_dir)?;

        self.last_seen = Some(stamp);
        self.summaries_written += 1;
        Ok(Some(summary))
    }
}

pub fn run_watch(
    data_path: &Path,
    config_path: &Path,
    output_dir: &Path,
    interval: Duration,
    max_polls: Option<usize>,
) -> Result<Watcher, PipelineError> {
    let config = RunConfig::from_path(config_path)?;
    let mut watcher = Watcher::new(data_path, config, output_dir);

    let running = Arc::new(AtomicBool::new(true));
    let running_input = running.clone();

    // Enter stops the loop; a closed stdin leaves it running
    thread::spawn(move || {
        if let Ok(n) = io::stdin().read(&mut [0u8]) {
            if n > 0 {
                running_input.store(false, Ordering::SeqCst);
            }
        }
    });

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} Watching run: {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("waiting for {}", data_path.display()));

    let mut polls = 0usize;
    while running.load(Ordering::SeqCst) {
        match watcher.poll() {
            Ok(Some(summary)) => spinner.set_message(format!(
                "{} samples, run time {} (press Enter to stop)",
                summary.sample_count(),
                format_elapsed(*summary.elapsed_time())
            )),
            Ok(None) => {}
            // the upstream writer may be half way through the file
            Err(PipelineError::RunDataError(e)) => {
                let log_path = watcher.output_dir.join(LOG_FILE_NAME);
                if let Ok(mut writer) = open_log(&log_path) {
                    log_line(&mut writer, &format!("Skipped snapshot: {}", e))?;
                }
                spinner.set_message(format!("skipped unreadable snapshot: {}", e));
            }
            Err(e) => {
                spinner.abandon_with_message(format!("stopped: {}", e));
                return Err(e);
            }
        }

        polls += 1;
        if max_polls.is_some_and(|max| polls >= max) {
            break;
        }
        thread::sleep(interval);
    }

    spinner.finish_with_message(format!(
        "Watch finished after {} summaries",
        watcher.summaries_written()
    ));
    Ok(watcher)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DATA: &str = "tests/data/run_data.json";
    const CONFIG: &str = "tests/data/run_config.json";

    #[test]
    fn test_watcher_only_recomputes_on_change() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("run_data.json");
        let output = dir.path().join("out");

        let config = RunConfig::from_path(Path::new(CONFIG)).unwrap();
        let mut watcher = Watcher::new(&data_path, config, &output);

        // nothing written by the pipeline yet
        assert!(watcher.poll().unwrap().is_none());

        fs::copy(DATA, &data_path).unwrap();
        let summary = watcher.poll().unwrap().unwrap();
        assert_eq!(summary.sample_count(), 3);
        assert!(output.join("run_summary.json").is_file());

        assert!(watcher.poll().unwrap().is_none());
        assert_eq!(watcher.summaries_written(), 1);
    }

    #[test]
    fn test_watcher_sees_rewrite_with_same_mtime() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("run_data.json");
        fs::write(&data_path, r#"{"BC01": {"demuxedCount": 10}}"#).unwrap();

        let mut watcher = Watcher::new(&data_path, RunConfig::default(), dir.path());
        assert_eq!(watcher.poll().unwrap().unwrap().sample_count(), 1);
        let modified = fs::metadata(&data_path).unwrap().modified().unwrap();

        // rewritten within the same mtime tick, only the length differs
        fs::write(&data_path, r#"{"BC01": {"demuxedCount": 10}, "BC02": {}}"#).unwrap();
        fs::File::options()
            .write(true)
            .open(&data_path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
        assert_eq!(fs::metadata(&data_path).unwrap().modified().unwrap(), modified);

        assert_eq!(watcher.poll().unwrap().unwrap().sample_count(), 2);
        assert_eq!(watcher.summaries_written(), 2);
    }

    #[test]
    fn test_watcher_reports_unreadable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let data_path = dir.path().join("run_data.json");
        fs::write(&data_path, "{\"BC01\": {").unwrap();

        let mut watcher = Watcher::new(&data_path, RunConfig::default(), dir.path());
        assert!(matches!(
            watcher.poll(),
            Err(PipelineError::RunDataError(RunDataError::Json(_)))
        ));
        assert_eq!(watcher.summaries_written(), 0);
    }

    #[test]
    fn test_run_watch_stops_after_max_polls() {
        let dir = tempfile::tempdir().unwrap();
        let watcher = run_watch(
            Path::new(DATA),
            Path::new(CONFIG),
            dir.path(),
            Duration::from_millis(1),
            Some(3),
        )
        .unwrap();
        assert_eq!(watcher.summaries_written(), 1);
        assert!(dir.path().join(LOG_FILE_NAME).is_file());
    }
}
