//! Extracción de preferencias desde texto libre ("CS 2413 and CS 2334 on MWF with Smith").
//!
//! Only the regular-expression extractor lives here; inputs it cannot read
//! produce empty [`Preferences`].

use crate::algorithm::filters::apply_filter;
use crate::algorithm::time::parse_clock_time;
use crate::catalog::merge_unique_sections;
use crate::error::Result;
use crate::models::{CourseFilter, CourseRef, CourseSection, Preferences};
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

struct Patterns {
    and_word: Regex,
    course_code: Regex,
    days: Regex,
    time: Regex,
    instructor: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        and_word: Regex::new(r"(?i)\band\b").expect("valid regex"),
        course_code: Regex::new(r"(?i)\bCS\s*\d{4}\b").expect("valid regex"),
        days: Regex::new(r"(?i)\b(MWF|TR|MW|WF|TTH|TH)\b").expect("valid regex"),
        time: Regex::new(r"(?i)\b(\d{1,2}:\d{2}\s*[ap]m)\b").expect("valid regex"),
        instructor: Regex::new(r"with ([A-Za-z\s]+)").expect("valid regex"),
    })
}

/// Splits "CS 2413 and CS 2334" into one request per conjunct, each keeping
/// the leading clause: `["CS 2413 and CS 2334"]` for two pieces, etc.
pub fn pre_split_user_input(user_input: &str) -> Vec<String> {
    let normalized = user_input.replace('&', "and");
    let pieces: Vec<&str> = patterns().and_word.split(&normalized).collect();
    if pieces.len() == 1 {
        return vec![normalized.trim().to_string()];
    }
    let prefix = pieces[0].trim();
    pieces[1..]
        .iter()
        .map(|suffix| format!("{} and {}", prefix, suffix.trim()))
        .collect()
}

/// Reads course codes, meeting days, a clock time, catalog titles and an
/// instructor ("with <name>") out of one piece of user input.
pub fn regex_parse_preferences(user_input: &str, catalog: &[CourseSection]) -> Preferences {
    let p = patterns();
    let mut prefs = Preferences::default();

    for m in p.course_code.find_iter(user_input) {
        let code: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
        prefs.courses.push(CourseRef::Number(code));
    }

    prefs.meeting_days = p.days.find(user_input).map(|m| m.as_str().to_uppercase());
    prefs.meeting_time = p
        .time
        .captures(user_input)
        .map(|c| c[1].to_lowercase());

    let lower = user_input.to_lowercase();
    let mut seen_titles: Vec<&str> = Vec::new();
    for entry in catalog {
        let title = entry.title.trim();
        if title.is_empty() || seen_titles.contains(&title) {
            continue;
        }
        if lower.contains(&title.to_lowercase()) {
            seen_titles.push(title);
            prefs.courses.push(CourseRef::Title(title.to_string()));
        }
    }

    prefs.instructor = p
        .instructor
        .captures(user_input)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());

    if prefs.is_empty() {
        debug!(input = user_input, "no preferences recognised");
    }
    prefs
}

fn merge_text(slot: &mut Option<String>, value: Option<String>) {
    let Some(value) = value else { return };
    if let Some(existing) = slot.as_mut() {
        if !existing.split(" and ").any(|part| part == value) {
            existing.push_str(" and ");
            existing.push_str(&value);
        }
        return;
    }
    *slot = Some(value);
}

/// Combina las preferencias de cada fragmento: course lists are
/// concatenated, text fields joined with " and " when a new value shows up.
pub fn merge_preferences(pieces: impl IntoIterator<Item = Preferences>) -> Preferences {
    let mut merged = Preferences::default();
    for piece in pieces {
        merged.courses.extend(piece.courses);
        merge_text(&mut merged.meeting_days, piece.meeting_days);
        merge_text(&mut merged.meeting_time, piece.meeting_time);
        merge_text(&mut merged.instructor, piece.instructor);
    }
    merged
}

/// Keeps only course references that exist in `catalog`, rewriting titles to
/// their course number. Text preferences pass through unchanged.
pub fn validate_preferences(prefs: &Preferences, catalog: &[CourseSection]) -> Preferences {
    let mut courses: Vec<CourseRef> = Vec::new();
    let mut push = |number: String| {
        let r = CourseRef::Number(number);
        if !courses.contains(&r) {
            courses.push(r);
        }
    };

    for course in prefs.courses.iter() {
        match course {
            CourseRef::Number(raw) => {
                let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
                if catalog.iter().any(|e| e.course == digits) {
                    push(digits);
                }
            }
            CourseRef::Title(title) => {
                let wanted = title.to_lowercase();
                if let Some(entry) = catalog.iter().find(|e| e.title.to_lowercase() == wanted) {
                    push(entry.course.clone());
                }
            }
        }
    }

    Preferences {
        courses,
        meeting_days: prefs.meeting_days.clone(),
        meeting_time: prefs.meeting_time.clone(),
        instructor: prefs.instructor.clone(),
    }
}

/// Full pipeline for one user request: split, extract, merge, validate.
pub fn parse_user_input(user_input: &str, catalog: &[CourseSection]) -> Preferences {
    let pieces = pre_split_user_input(user_input)
        .into_iter()
        .map(|piece| regex_parse_preferences(&piece, catalog));
    validate_preferences(&merge_preferences(pieces), catalog)
}

/// Sections of `catalog` that satisfy at least one preference, deduplicated
/// by CRN/id in the order the queries are run: each requested course first,
/// then instructor, meeting days and meeting time.
pub fn candidates_for(prefs: &Preferences, catalog: &[CourseSection]) -> Result<Vec<CourseSection>> {
    let mut batches: Vec<Vec<CourseSection>> = Vec::new();

    for course in prefs.courses.iter() {
        if let CourseRef::Number(n) = course {
            let f = CourseFilter { course: Some(n.clone()), ..Default::default() };
            batches.push(apply_filter(catalog, &f)?);
        }
    }
    if let Some(ref instructor) = prefs.instructor {
        for name in instructor.split(" and ") {
            let f = CourseFilter { instructor: Some(name.to_string()), ..Default::default() };
            batches.push(apply_filter(catalog, &f)?);
        }
    }
    if let Some(ref days) = prefs.meeting_days {
        for d in days.split(" and ") {
            let f = CourseFilter { meeting_days: Some(d.to_string()), ..Default::default() };
            batches.push(apply_filter(catalog, &f)?);
        }
    }
    if let Some(ref time) = prefs.meeting_time {
        for t in time.split(" and ") {
            if let Some(minutes) = parse_clock_time(t) {
                let hhmm = format!("{:02}:{:02}", minutes / 60, minutes % 60);
                let f = CourseFilter { start_time: Some(hhmm), ..Default::default() };
                batches.push(apply_filter(catalog, &f)?);
            }
        }
    }

    Ok(merge_unique_sections(batches))
}
