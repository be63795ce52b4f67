use crate::config::{DateFieldRule, DispatchConfig};
use crate::tools::{FileMetadata, MetadataSourceFactory};
use anyhow::{Context, Result, anyhow};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// A pending relocation decision: `source` goes into the `bucket`
/// subdirectory of the output root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationIntent {
    pub source: PathBuf,
    pub bucket: String,
}

/// Worker-pool stage turning file paths into relocation intents.
///
/// Each worker constructs one metadata source at start and keeps it for its
/// whole lifetime; the handle is released when the worker exits, whether on
/// queue closure or cancellation.
pub struct DateClassifier<'a> {
    config: &'a DispatchConfig,
    source_factory: &'a dyn MetadataSourceFactory,
    cancel: Arc<AtomicBool>,
}

impl<'a> DateClassifier<'a> {
    #[must_use]
    pub fn new(
        config: &'a DispatchConfig,
        source_factory: &'a dyn MetadataSourceFactory,
        cancel: Arc<AtomicBool>,
    ) -> Self {
        Self {
            config,
            source_factory,
            cancel,
        }
    }

    /// Runs the pool and blocks until every worker has exited. The intent
    /// queue closes exactly once: the scope joins all workers and the last
    /// dropped `Sender` clone disconnects the channel.
    pub fn run(&self, paths: Receiver<PathBuf>, intents: Sender<RelocationIntent>) {
        thread::scope(|s| {
            for worker_id in 0..self.config.thread_count {
                let paths = paths.clone();
                let intents = intents.clone();
                s.spawn(move || self.worker(worker_id, &paths, &intents));
            }
            drop(paths);
            drop(intents);
        });
    }

    fn worker(&self, worker_id: usize, paths: &Receiver<PathBuf>, intents: &Sender<RelocationIntent>) {
        let mut source = match self.source_factory.create() {
            Ok(source) => source,
            Err(e) => {
                error!("worker {worker_id}: error while initializing metadata source: {e:#}");
                return;
            }
        };

        loop {
            // not required to drain remaining queued paths once cancellation
            // is observed; the relocator still drains its own queue
            if self.cancel.load(Ordering::SeqCst) {
                return;
            }
            let Ok(path) = paths.recv() else {
                return;
            };

            let metadata = match source.extract(&path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!(
                        "worker {worker_id}: error while extracting metadata from {}: {e:#}",
                        path.display()
                    );
                    continue;
                }
            };

            match guess_date(&self.config.date_fields, &metadata) {
                Ok(Some(date)) => match format_bucket(date, &self.config.output_date_format) {
                    Ok(bucket) => {
                        if intents.send(RelocationIntent { source: path, bucket }).is_err() {
                            // relocator gone, nothing left to produce for
                            return;
                        }
                    }
                    Err(e) => error!("{}: {e:#}", path.display()),
                },
                Ok(None) => debug!("{}: no date field matched", path.display()),
                Err(e) => error!("{}: {e:#}", path.display()),
            }
        }
    }
}

/// Evaluates the configured rules in order. The first rule whose field is
/// present in `metadata` is selected; `Ok(None)` means no field matched. A
/// present but unparsable value is an error and does not fall through to
/// later rules.
fn guess_date(rules: &[DateFieldRule], metadata: &FileMetadata) -> Result<Option<NaiveDateTime>> {
    for rule in rules {
        let Some(value) = metadata.get(&rule.field) else {
            continue;
        };
        let parsed = NaiveDateTime::parse_from_str(value, &rule.pattern)
            .or_else(|_| {
                NaiveDate::parse_from_str(value, &rule.pattern)
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .with_context(|| {
                format!(
                    "error while parsing date {value:?} from field {} with pattern {:?}",
                    rule.field, rule.pattern
                )
            })?;
        return Ok(Some(parsed));
    }
    Ok(None)
}

fn format_bucket(date: NaiveDateTime, pattern: &str) -> Result<String> {
    use std::fmt::Write as _;
    let mut bucket = String::new();
    write!(bucket, "{}", date.format(pattern))
        .map_err(|_| anyhow!("invalid output date format {pattern:?}"))?;
    Ok(bucket)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(field: &str, pattern: &str) -> DateFieldRule {
        DateFieldRule {
            field: field.to_string(),
            pattern: pattern.to_string(),
        }
    }

    fn metadata(pairs: &[(&str, &str)]) -> FileMetadata {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_guess_date_matches_single_rule() {
        let rules = vec![rule("CreateDate", "%Y:%m:%d %H:%M:%S")];
        let fields = metadata(&[("CreateDate", "2019:04:04 13:18:04")]);

        let date = guess_date(&rules, &fields).unwrap().unwrap();
        assert_eq!(
            date,
            NaiveDate::from_ymd_opt(2019, 4, 4)
                .unwrap()
                .and_hms_opt(13, 18, 4)
                .unwrap()
        );
    }

    #[test]
    fn test_guess_date_earliest_rule_wins() {
        let rules = vec![
            rule("ModifyDate", "%Y:%m:%d %H:%M:%S"),
            rule("CreateDate", "%Y:%m:%d %H:%M:%S"),
        ];
        let fields = metadata(&[
            ("CreateDate", "2019:04:04 13:18:04"),
            ("ModifyDate", "2021:12:25 00:00:01"),
        ]);

        let date = guess_date(&rules, &fields).unwrap().unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2021, 12, 25).unwrap());
    }

    #[test]
    fn test_guess_date_no_field_present() {
        let rules = vec![rule("CreateDate", "%Y:%m:%d %H:%M:%S")];
        let fields = metadata(&[("FileType", "JPEG")]);

        assert_eq!(guess_date(&rules, &fields).unwrap(), None);
    }

    #[test]
    fn test_guess_date_malformed_value_is_error_without_fallthrough() {
        // CreateDate is present but malformed; the later matching rule must
        // not be consulted
        let rules = vec![
            rule("CreateDate", "%Y:%m:%d %H:%M:%S"),
            rule("ModifyDate", "%Y:%m:%d %H:%M:%S"),
        ];
        let fields = metadata(&[
            ("CreateDate", "not a date"),
            ("ModifyDate", "2021:12:25 00:00:01"),
        ]);

        assert!(guess_date(&rules, &fields).is_err());
    }

    #[test]
    fn test_guess_date_date_only_pattern() {
        let rules = vec![rule("Date", "%Y-%m-%d")];
        let fields = metadata(&[("Date", "2020-07-15")]);

        let date = guess_date(&rules, &fields).unwrap().unwrap();
        assert_eq!(date.date(), NaiveDate::from_ymd_opt(2020, 7, 15).unwrap());
        assert_eq!(date.time(), NaiveTime::MIN);
    }

    #[test]
    fn test_format_bucket_default_pattern() {
        let date = NaiveDate::from_ymd_opt(2019, 4, 4)
            .unwrap()
            .and_hms_opt(13, 18, 4)
            .unwrap();
        assert_eq!(format_bucket(date, "%Y_%m").unwrap(), "2019_04");
    }

    #[test]
    fn test_format_bucket_invalid_pattern() {
        let date = NaiveDate::from_ymd_opt(2019, 4, 4)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(format_bucket(date, "%Q").is_err());
    }
}
