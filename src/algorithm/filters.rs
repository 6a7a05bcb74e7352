//! Filtros del listado de cursos.
//!
//! Mirrors the query parameters of the course listing: every field that is
//! set must match. Time filters compare against the parsed meeting time, so a
//! section with an unparseable `meeting_time` never matches one.
use crate::algorithm::time::{parse_24h, parse_optional_time_range};
use crate::error::{Result, ScheduleError};
use crate::models::{CourseFilter, CourseSection};

/// Filter already validated: times converted to minutes, text lowercased.
#[derive(Debug, Clone, Default)]
struct CompiledFilter {
    subject: Option<String>,
    course: Option<String>,
    meeting_days: Option<String>,
    instructor: Option<String>,
    start: Option<u16>,
    end: Option<u16>,
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn compile(filter: &CourseFilter) -> Result<CompiledFilter> {
    let time = |field: &'static str, v: &Option<String>| -> Result<Option<u16>> {
        match non_empty(v) {
            None => Ok(None),
            Some(t) => parse_24h(t)
                .map(Some)
                .ok_or_else(|| ScheduleError::InvalidFilter { field, value: t.to_string() }),
        }
    };
    Ok(CompiledFilter {
        subject: non_empty(&filter.subject).map(str::to_lowercase),
        course: non_empty(&filter.course).map(str::to_lowercase),
        meeting_days: non_empty(&filter.meeting_days).map(str::to_lowercase),
        instructor: non_empty(&filter.instructor).map(str::to_lowercase),
        start: time("start_time", &filter.start_time)?,
        end: time("end_time", &filter.end_time)?,
    })
}

impl CompiledFilter {
    fn matches(&self, s: &CourseSection) -> bool {
        if let Some(ref subject) = self.subject {
            if s.subject.to_lowercase() != *subject {
                return false;
            }
        }
        if let Some(ref course) = self.course {
            if !s.course.to_lowercase().contains(course.as_str()) {
                return false;
            }
        }
        if let Some(ref days) = self.meeting_days {
            match s.meeting_days.as_deref() {
                Some(d) if d.to_lowercase() == *days => {}
                _ => return false,
            }
        }
        if let Some(ref instructor) = self.instructor {
            if !s.instructor.to_lowercase().contains(instructor.as_str()) {
                return false;
            }
        }
        if self.start.is_some() || self.end.is_some() {
            let window = parse_optional_time_range(s.meeting_time.as_deref());
            if self.start.is_some() && window.start() != self.start {
                return false;
            }
            if self.end.is_some() && window.end() != self.end {
                return false;
            }
        }
        true
    }
}

/// Devuelve las secciones que cumplen `filter`, en el orden original.
pub fn apply_filter(sections: &[CourseSection], filter: &CourseFilter) -> Result<Vec<CourseSection>> {
    if filter.is_empty() {
        return Ok(sections.to_vec());
    }
    let compiled = compile(filter)?;
    Ok(sections.iter().filter(|s| compiled.matches(s)).cloned().collect())
}

/// Checks the filter values without running it.
pub fn validate_filter(filter: &CourseFilter) -> Result<()> {
    compile(filter).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<CourseSection> {
        let mk = |subject: &str, course: &str, instr: &str, days: Option<&str>, time: Option<&str>| CourseSection {
            subject: subject.into(),
            course: course.into(),
            instructor: instr.into(),
            meeting_days: days.map(String::from),
            meeting_time: time.map(String::from),
            ..Default::default()
        };
        vec![
            mk("C S", "2413", "Sridhar Radhakrishnan", Some("MWF"), Some("9:00 am - 9:50 am")),
            mk("C S", "2334", "Dean Hougen", Some("TR"), Some("1:30 pm - 2:45 pm")),
            mk("MATH", "2413", "Someone Else", Some("mwf"), Some("TBA")),
            mk("C S", "4013", "Sridhar Radhakrishnan", None, None),
        ]
    }

    #[test]
    fn empty_filter_returns_everything() {
        assert_eq!(apply_filter(&catalog(), &CourseFilter::default()).unwrap().len(), 4);
    }

    #[test]
    fn text_filters() {
        let f = CourseFilter { instructor: Some("  sridhar ".into()), ..Default::default() };
        assert_eq!(apply_filter(&catalog(), &f).unwrap().len(), 2);

        let f = CourseFilter { meeting_days: Some("MWF".into()), ..Default::default() };
        assert_eq!(apply_filter(&catalog(), &f).unwrap().len(), 2);

        let f = CourseFilter { course: Some("241".into()), subject: Some("c s".into()), ..Default::default() };
        let out = apply_filter(&catalog(), &f).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].course, "2413");
    }

    #[test]
    fn time_filters_use_parsed_window() {
        let f = CourseFilter { start_time: Some("13:30".into()), ..Default::default() };
        let out = apply_filter(&catalog(), &f).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].course, "2334");

        let f = CourseFilter { end_time: Some("09:50".into()), ..Default::default() };
        assert_eq!(apply_filter(&catalog(), &f).unwrap().len(), 1);
    }

    #[test]
    fn bad_time_value_is_an_error() {
        let f = CourseFilter { start_time: Some("9am".into()), ..Default::default() };
        assert!(matches!(
            apply_filter(&catalog(), &f),
            Err(ScheduleError::InvalidFilter { field: "start_time", .. })
        ));
        assert!(validate_filter(&f).is_err());
    }
}
