use crate::algorithm::conflict::conflicts;
use crate::models::{CourseGroup, CourseSection, GroupReport, GroupStatus, ScheduleReport};
use std::collections::HashMap;
use tracing::debug;

/// Tamaño de horario por defecto cuando el usuario no indica otro.
pub const DEFAULT_MAX_CLASSES: usize = 5;

/// Agrupa secciones por `"{subject} {course}"`.
///
/// Groups come out in first-seen order and each group keeps the input order
/// of its sections; that order decides which section is preferred.
pub fn group_sections(sections: &[CourseSection]) -> Vec<CourseGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<CourseGroup> = Vec::new();
    for s in sections {
        let key = s.group_key();
        match index.get(&key) {
            Some(&i) => groups[i].sections.push(s.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(CourseGroup { key, sections: vec![s.clone()] });
            }
        }
    }
    groups
}

/// Greedy schedule: for each course group, in first-seen order, take the
/// first section that does not clash with what is already selected. Stops
/// as soon as `max_classes` sections are selected.
///
/// A group whose sections all clash contributes nothing; use
/// [`build_schedule_report`] to see which groups were dropped.
pub fn build_schedule(sections: &[CourseSection], max_classes: usize) -> Vec<CourseSection> {
    build_schedule_report(sections, max_classes).schedule
}

/// Same selection as [`build_schedule`], with a status per course group.
pub fn build_schedule_report(sections: &[CourseSection], max_classes: usize) -> ScheduleReport {
    let groups = group_sections(sections);
    let mut selected: Vec<CourseSection> = Vec::new();
    let mut reports: Vec<GroupReport> = Vec::with_capacity(groups.len());

    for group in groups.iter() {
        if selected.len() >= max_classes {
            reports.push(GroupReport {
                course: group.key.clone(),
                status: GroupStatus::NotAttempted,
                candidates: group.sections.len(),
                section: None,
            });
            continue;
        }

        // la copia evita que el horario comparta estado con el catálogo
        let pick = group.sections.iter().find(|s| !conflicts(&selected, s)).cloned();
        match pick {
            Some(section) => {
                debug!(course = %group.key, section = %section.section, "section selected");
                reports.push(GroupReport {
                    course: group.key.clone(),
                    status: GroupStatus::Included,
                    candidates: group.sections.len(),
                    section: Some(section.section.clone()),
                });
                selected.push(section);
            }
            None => {
                debug!(course = %group.key, candidates = group.sections.len(), "every section conflicts, group skipped");
                reports.push(GroupReport {
                    course: group.key.clone(),
                    status: GroupStatus::AllSectionsConflicted,
                    candidates: group.sections.len(),
                    section: None,
                });
            }
        }
    }

    ScheduleReport { schedule: selected, groups: reports }
}
