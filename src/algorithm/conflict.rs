// Funciones para detectar conflictos entre secciones.
use crate::algorithm::time::parse_optional_time_range;
use crate::models::CourseSection;

/// True si `candidate` choca con alguna de las secciones ya elegidas.
///
/// A clash needs at least one shared meeting day and overlapping half-open
/// time windows. Missing or unparseable day/time data never clashes, so bad
/// catalog rows can only ever be included, never block a schedule.
pub fn conflicts(existing: &[CourseSection], candidate: &CourseSection) -> bool {
    let (Some(cand_days), Some(_)) = (candidate.day_set(), candidate.meeting_time.as_deref()) else {
        return false;
    };

    let cand_window = parse_optional_time_range(candidate.meeting_time.as_deref());
    if !cand_window.is_known() {
        return false;
    }

    for section in existing {
        let shares_day = match section.day_set() {
            Some(days) => !days.is_disjoint(&cand_days),
            None => false,
        };
        if !shares_day {
            continue;
        }
        let window = parse_optional_time_range(section.meeting_time.as_deref());
        if window.overlaps(&cand_window) {
            return true;
        }
    }
    false
}

/// Pairwise form of [`conflicts`].
pub fn sections_conflict(a: &CourseSection, b: &CourseSection) -> bool {
    conflicts(std::slice::from_ref(a), b)
}
