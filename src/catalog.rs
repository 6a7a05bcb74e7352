// Lectura y escritura de los JSON de secciones (catálogo, horario final).
use crate::algorithm::section_selector::build_schedule_report;
use crate::error::{Result, ScheduleError};
use crate::models::{CourseSection, ScheduleReport};
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

fn sections_from_value(value: Value) -> serde_json::Result<Vec<CourseSection>> {
    match value {
        Value::Array(_) => serde_json::from_value(value),
        // a single listing object is accepted as a one-element array
        other => Ok(vec![serde_json::from_value(other)?]),
    }
}

/// Reads a JSON array of course sections (e.g. `all_unique_courses.json`).
pub fn load_sections<P: AsRef<Path>>(path: P) -> Result<Vec<CourseSection>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| ScheduleError::io(path, e))?;
    let value: Value = serde_json::from_str(&text).map_err(|e| ScheduleError::json(path, e))?;
    sections_from_value(value).map_err(|e| ScheduleError::json(path, e))
}

/// Like [`load_sections`] but a missing file is an empty catalog.
pub fn load_sections_or_empty<P: AsRef<Path>>(path: P) -> Result<Vec<CourseSection>> {
    let path = path.as_ref();
    if !path.exists() {
        warn!(path = %path.display(), "catalog file not found, starting with an empty catalog");
        return Ok(Vec::new());
    }
    load_sections(path)
}

/// Writes the schedule as a pretty-printed JSON array, creating parent dirs.
pub fn save_schedule<P: AsRef<Path>>(path: P, schedule: &[CourseSection]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ScheduleError::io(parent, e))?;
    }
    let text = serde_json::to_string_pretty(schedule).map_err(|e| ScheduleError::json(path, e))?;
    fs::write(path, text).map_err(|e| ScheduleError::io(path, e))?;
    info!(path = %path.display(), sections = schedule.len(), "schedule saved");
    Ok(())
}

/// Loads `input`, builds one schedule and saves it to `output`.
///
/// Courses left out because every section conflicts are logged. When no
/// schedule could be built nothing is written and `output` is left as is.
pub fn build_to_file<P, Q>(input: P, output: Q, max_classes: usize) -> Result<ScheduleReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input = input.as_ref();
    info!(input = %input.display(), "loading courses");
    let sections = load_sections(input)?;

    info!(max_classes, "building one valid, no-conflict schedule");
    let report = build_schedule_report(&sections, max_classes);
    for skipped in report.skipped() {
        warn!(course = %skipped.course, candidates = skipped.candidates, "every section conflicts, course left out");
    }

    if report.schedule.is_empty() {
        warn!("could not build any valid schedule");
    } else {
        save_schedule(output, &report.schedule)?;
    }
    Ok(report)
}

/// Flattens several listings keeping the first occurrence of each CRN (or
/// id). Entries with neither are dropped: they cannot be told apart.
pub fn merge_unique_sections<I>(batches: I) -> Vec<CourseSection>
where
    I: IntoIterator<Item = Vec<CourseSection>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<CourseSection> = Vec::new();
    for batch in batches {
        for section in batch {
            match section.dedup_key() {
                Some(key) if seen.insert(key.clone()) => out.push(section),
                _ => {}
            }
        }
    }
    out
}

/// Reads every `*.json` file of `dir` (by name order) and merges them with
/// [`merge_unique_sections`]. Files that are not valid listings are skipped.
pub fn load_sections_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<CourseSection>> {
    let dir = dir.as_ref();
    let mut files: Vec<_> = fs::read_dir(dir)
        .map_err(|e| ScheduleError::io(dir, e))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && p.extension().and_then(|x| x.to_str()) == Some("json"))
        .collect();
    files.sort();

    let mut batches: Vec<Vec<CourseSection>> = Vec::new();
    for file in files {
        match load_sections(&file) {
            Ok(batch) => batches.push(batch),
            Err(e) => warn!(error = %e, "skipping unreadable listing"),
        }
    }
    Ok(merge_unique_sections(batches))
}
