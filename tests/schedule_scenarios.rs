use schedulesooner::algorithm::conflict::conflicts;
use schedulesooner::algorithm::section_selector::{build_schedule, build_schedule_report};
use schedulesooner::catalog::{build_to_file, load_sections, load_sections_dir, save_schedule};
use schedulesooner::models::{CourseSection, GroupStatus};
use serde_json::json;

fn sec(subject: &str, course: &str, section: &str, days: &str, time: &str) -> CourseSection {
    CourseSection {
        crn: Some(format!("{}-{}-{}", subject, course, section)),
        subject: subject.to_string(),
        course: course.to_string(),
        section: section.to_string(),
        meeting_days: Some(days.to_string()),
        meeting_time: Some(time.to_string()),
        ..Default::default()
    }
}

#[test]
fn overlapping_mwf_sections_conflict() {
    let a = sec("C S", "1313", "001", "MWF", "9:00 am - 9:50 am");
    let b = sec("C S", "2413", "001", "MWF", "9:30 am - 10:20 am");
    assert!(conflicts(&[a], &b));
}

#[test]
fn same_time_on_other_days_is_fine() {
    let a = sec("C S", "1313", "001", "MWF", "9:00 am - 9:50 am");
    let b = sec("C S", "2413", "001", "TR", "9:00 am - 9:50 am");
    assert!(!conflicts(&[a], &b));
}

#[test]
fn second_section_chosen_when_first_clashes() {
    let input = vec![
        sec("C S", "1313", "001", "MWF", "10:30 am - 11:20 am"),
        sec("C S", "2413", "001", "MWF", "10:30 am - 11:20 am"),
        sec("C S", "2413", "002", "TR", "10:30 am - 11:45 am"),
    ];
    let out = build_schedule(&input, 5);
    let picked: Vec<(&str, &str)> = out.iter().map(|s| (s.course.as_str(), s.section.as_str())).collect();
    assert_eq!(picked, vec![("1313", "001"), ("2413", "002")]);
}

#[test]
fn six_free_courses_capped_at_five() {
    let slots = [
        ("MWF", "8:30 am - 9:20 am"),
        ("MWF", "9:30 am - 10:20 am"),
        ("MWF", "10:30 am - 11:20 am"),
        ("TR", "9:00 am - 10:15 am"),
        ("TR", "10:30 am - 11:45 am"),
        ("TR", "1:30 pm - 2:45 pm"),
    ];
    let input: Vec<CourseSection> = slots
        .iter()
        .enumerate()
        .map(|(i, (days, time))| sec("C S", &format!("2{}13", i), "001", days, time))
        .collect();

    let report = build_schedule_report(&input, 5);
    assert_eq!(report.schedule.len(), 5);
    for (i, s) in report.schedule.iter().enumerate() {
        assert_eq!(s.course, format!("2{}13", i));
    }
    assert_eq!(report.groups[5].status, GroupStatus::NotAttempted);
    assert!(report.schedule.iter().all(|s| s.course != "2513"));
}

#[test]
fn garbled_time_is_never_excluded() {
    let busy = sec("C S", "1313", "001", "MWF", "9:00 am - 9:50 am");
    let garbled = sec("C S", "2413", "001", "MWF", "garbled");
    assert!(!conflicts(&[busy.clone()], &garbled));
    let out = build_schedule(&[busy, garbled], 5);
    assert_eq!(out.len(), 2);
}

#[test]
fn selected_sections_are_copies() {
    let catalog = vec![sec("C S", "1313", "001", "MWF", "9:00 am - 9:50 am")];
    let mut out = build_schedule(&catalog, 5);
    out[0].title = "changed".to_string();
    assert_eq!(catalog[0].title, "");
}

#[test]
fn schedule_artifact_round_trips_unknown_fields() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("all_unique_courses.json");
    std::fs::write(
        &input_path,
        serde_json::to_string(&json!([
            {"id": 1, "crn": "40001", "subject": "C S", "course": "2413", "section": "001",
             "title": "Programming Structures", "instructor": "Staff",
             "meeting_days": "MWF", "meeting_time": "9:00 am - 9:50 am",
             "meeting_location": "DEH 120", "seats": "12 of 40", "waitlist": "0 Waiting"},
            {"id": 2, "crn": "40002", "subject": "C S", "course": "2334", "section": "001",
             "title": "Discrete Structures", "instructor": "Staff",
             "meeting_days": null, "meeting_time": null, "campus": "Norman"}
        ]))
        .unwrap(),
    )
    .unwrap();

    let sections = load_sections(&input_path).unwrap();
    let schedule = build_schedule(&sections, 5);
    assert_eq!(schedule.len(), 2);

    let out_path = dir.path().join("out").join("final_schedule.json");
    save_schedule(&out_path, &schedule).unwrap();

    let text = std::fs::read_to_string(&out_path).unwrap();
    assert!(text.contains("\n  {"), "expected 2-space indented JSON");
    let saved: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(saved[0]["meeting_location"], json!("DEH 120"));
    assert_eq!(saved[1]["campus"], json!("Norman"));
    assert_eq!(load_sections(&out_path).unwrap(), schedule);
}

#[test]
fn listing_directory_is_merged_and_bad_files_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a_course_2413.json"), r#"[{"crn": "1", "course": "2413"}, {"crn": "2", "course": "2413"}]"#).unwrap();
    std::fs::write(dir.path().join("b_instructor.json"), r#"{"crn": "2", "course": "9999"}"#).unwrap();
    std::fs::write(dir.path().join("c_broken.json"), "not json").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "[]").unwrap();

    let merged = load_sections_dir(dir.path()).unwrap();
    let courses: Vec<&str> = merged.iter().map(|s| s.course.as_str()).collect();
    assert_eq!(courses, vec!["2413", "2413"]);
}

#[test]
fn missing_input_file_is_an_io_error() {
    let err = load_sections("does/not/exist.json").unwrap_err();
    assert!(matches!(err, schedulesooner::ScheduleError::Io { .. }));
}

#[test]
fn build_to_file_writes_only_a_non_empty_schedule() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("all_unique_courses.json");
    let listing = vec![
        sec("C S", "1313", "001", "MWF", "9:00 am - 9:50 am"),
        sec("C S", "2413", "001", "MWF", "9:30 am - 10:20 am"),
    ];
    std::fs::write(&input, serde_json::to_string(&listing).unwrap()).unwrap();

    let capped = dir.path().join("capped.json");
    let report = build_to_file(&input, &capped, 0).unwrap();
    assert!(report.schedule.is_empty());
    assert!(!capped.exists());

    let output = dir.path().join("final_schedule.json");
    let report = build_to_file(&input, &output, 5).unwrap();
    assert_eq!(report.schedule.len(), 1);
    assert_eq!(report.skipped().count(), 1);
    assert_eq!(load_sections(&output).unwrap(), report.schedule);
}

#[test]
fn build_to_file_with_empty_listing_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("empty.json");
    std::fs::write(&input, "[]").unwrap();
    let output = dir.path().join("final_schedule.json");

    let report = build_to_file(&input, &output, 5).unwrap();
    assert!(report.schedule.is_empty());
    assert!(report.groups.is_empty());
    assert!(!output.exists());
}
