// Estructuras de datos principales
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fmt;

/// Accepts a string, a number or null and yields the text form.
/// Catalog dumps are not consistent about `crn` / `course` being strings.
fn opt_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(d)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!("expected text, found {}", other))),
    }
}

fn text<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_text(d)?.unwrap_or_default())
}

/// One offered instance of a course (a row of the course listing).
///
/// `meeting_days` / `meeting_time` are explicit `Option`s: `None` means the
/// listing had no value (absent key or `null`), which the conflict detector
/// treats as "cannot conflict". Keys this struct does not know about are kept
/// in `extra` so a saved schedule round-trips the original mapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseSection {
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub crn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, deserialize_with = "text")]
    pub subject: String,
    #[serde(default, deserialize_with = "text")]
    pub course: String,
    #[serde(default, deserialize_with = "text")]
    pub section: String,
    #[serde(default, deserialize_with = "text")]
    pub title: String,
    #[serde(default, deserialize_with = "text")]
    pub instructor: String,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub meeting_days: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub meeting_dates: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub meeting_location: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub final_days: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub final_time: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub final_date: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub final_location: Option<String>,

    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub seats: Option<String>,
    #[serde(default, deserialize_with = "opt_text", skip_serializing_if = "Option::is_none")]
    pub waitlist: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseSection {
    /// Clave de agrupación: `"{subject} {course}"`, p.ej. "C S 2413".
    pub fn group_key(&self) -> String {
        format!("{} {}", self.subject, self.course)
    }

    /// Identity used when merging several listings: the CRN when present,
    /// otherwise the synthetic `id`.
    pub fn dedup_key(&self) -> Option<String> {
        if let Some(crn) = self.crn.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            return Some(crn.to_string());
        }
        match &self.id {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(other) => Some(other.to_string()),
        }
    }

    /// Set of weekday letters the section meets on. Whitespace is ignored.
    pub fn day_set(&self) -> Option<BTreeSet<char>> {
        self.meeting_days
            .as_deref()
            .map(|d| d.chars().filter(|c| !c.is_whitespace()).collect())
    }

    /// "30 seats" -> Some(30). None if the field is missing or not numeric.
    pub fn seat_capacity(&self) -> Option<u32> {
        self.seats
            .as_deref()
            .and_then(|s| s.split_whitespace().next())
            .and_then(|tok| tok.parse().ok())
    }

    /// "4 Waiting" -> 4; anything without "Waiting" counts as an empty waitlist.
    pub fn waitlist_count(&self) -> u32 {
        match self.waitlist.as_deref() {
            Some(w) if w.contains("Waiting") => w
                .split_whitespace()
                .next()
                .and_then(|tok| tok.parse().ok())
                .unwrap_or(0),
            _ => 0,
        }
    }
}

impl fmt::Display for CourseSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} - {}", self.subject, self.course, self.title)
    }
}

/// A meeting-time range as minute-of-day offsets.
///
/// `Unknown` is the result of any parse failure and is never compared as a
/// number: it cannot overlap anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    Known { start: u16, end: u16 },
    Unknown,
}

impl TimeWindow {
    pub fn is_known(&self) -> bool {
        matches!(self, TimeWindow::Known { .. })
    }

    pub fn start(&self) -> Option<u16> {
        match self {
            TimeWindow::Known { start, .. } => Some(*start),
            TimeWindow::Unknown => None,
        }
    }

    pub fn end(&self) -> Option<u16> {
        match self {
            TimeWindow::Known { end, .. } => Some(*end),
            TimeWindow::Unknown => None,
        }
    }

    /// Half-open overlap test. Always false when either side is `Unknown`.
    pub fn overlaps(&self, other: &TimeWindow) -> bool {
        match (self, other) {
            (TimeWindow::Known { start: s1, end: e1 }, TimeWindow::Known { start: s2, end: e2 }) => {
                s1 < e2 && s2 < e1
            }
            _ => false,
        }
    }
}

/// All sections sharing one `"{subject} {course}"` key, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseGroup {
    pub key: String,
    pub sections: Vec<CourseSection>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    /// One section of the group made it into the schedule.
    Included,
    /// Every section overlapped something already selected.
    AllSectionsConflicted,
    /// The class cap was reached before this group was tried.
    NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub course: String,
    pub status: GroupStatus,
    pub candidates: usize,
    /// Section identifier of the chosen section, when `Included`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// Result of a schedule build plus what happened to each course group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleReport {
    pub schedule: Vec<CourseSection>,
    pub groups: Vec<GroupReport>,
}

impl ScheduleReport {
    pub fn skipped(&self) -> impl Iterator<Item = &GroupReport> {
        self.groups
            .iter()
            .filter(|g| g.status == GroupStatus::AllSectionsConflicted)
    }
}

/// Query filters of the course listing. All present fields must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseFilter {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub meeting_days: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    /// 24h "HH:MM"
    #[serde(default)]
    pub start_time: Option<String>,
    /// 24h "HH:MM"
    #[serde(default)]
    pub end_time: Option<String>,
}

impl CourseFilter {
    pub fn is_empty(&self) -> bool {
        self.subject.is_none()
            && self.course.is_none()
            && self.meeting_days.is_none()
            && self.instructor.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
    }
}

/// A course the user asked for, either by number ("2413") or by title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseRef {
    Number(String),
    Title(String),
}

/// Preferences extracted from the free-text user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub courses: Vec<CourseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_days: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
            && self.meeting_days.is_none()
            && self.meeting_time.is_none()
            && self.instructor.is_none()
    }
}
