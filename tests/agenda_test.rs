use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone, Utc};
use coursetrack::agenda::{
    Agenda, CalendarMarkers, UrgencyBucket, YearRange, day_label, days_until, filter_and_date,
    parse_due, select_day, sort_by_due,
};
use coursetrack::models::Assignment;

fn assignment(id: &str, due_at: Option<&str>) -> Assignment {
    Assignment {
        id: id.to_string(),
        course_id: "c1".to_string(),
        title: format!("Assignment {}", id),
        due_at: due_at.map(str::to_string),
        total_points: Some(10.0),
    }
}

fn in_course(id: &str, course_id: &str, due_at: &str) -> Assignment {
    Assignment {
        course_id: course_id.to_string(),
        ..assignment(id, Some(due_at))
    }
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn ids(dated: &[coursetrack::agenda::DatedAssignment]) -> Vec<&str> {
    dated.iter().map(|d| d.id()).collect()
}

#[test]
fn undated_and_unreadable_due_fields_are_excluded_everywhere() {
    let now = noon();
    let input = vec![
        assignment("none", None),
        assignment("empty", Some("")),
        assignment("blank", Some("   ")),
        assignment("garbage", Some("next tuesday")),
        assignment("bad-month", Some("2024-13-01")),
        assignment("ok", Some("2024-03-10T09:00:00Z")),
    ];

    let agenda = Agenda::build(input, &now);

    assert_eq!(ids(agenda.assignments()), vec!["ok"]);
    assert_eq!(agenda.markers().all_dates(), BTreeSet::from([date(2024, 3, 10)]));
    assert_eq!(agenda.feed().assignments.len(), 1);
    assert_eq!(agenda.select(Some(date(2024, 3, 10))).len(), 1);
}

#[test]
fn empty_input_produces_empty_views() {
    let agenda = Agenda::build(Vec::new(), &noon());

    assert!(agenda.is_empty());
    assert!(agenda.markers().is_empty());
    assert_eq!(agenda.feed().due_soon_count, 0);
    assert!(agenda.select(Some(date(2024, 3, 10))).is_empty());
    assert_eq!(agenda.years(), YearRange { min: 2024, max: 2024 });
}

#[test]
fn sort_by_due_is_ascending_and_stable() {
    let now = noon();
    let input = vec![
        assignment("late", Some("2024-03-20T08:00:00Z")),
        assignment("tie-a", Some("2024-03-11T08:00:00Z")),
        assignment("early", Some("2024-03-01T08:00:00Z")),
        // 17:00+09:00 is the same instant as 08:00Z
        assignment("tie-b", Some("2024-03-11T17:00:00+09:00")),
        assignment("tie-c", Some("2024-03-11T08:00:00Z")),
    ];

    let sorted = sort_by_due(filter_and_date(input, &now));

    assert_eq!(ids(&sorted), vec!["early", "tie-a", "tie-b", "tie-c", "late"]);
    assert!(sorted.windows(2).all(|w| w[0].due <= w[1].due));
}

#[test]
fn calendar_date_is_truncated_in_the_zone_of_now() {
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tokyo.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

    let dated = filter_and_date(
        vec![
            assignment("utc-evening", Some("2024-03-10T20:00:00Z")),
            assignment("local-wall", Some("2024-03-10T08:30:00")),
            assignment("date-only", Some("2024-03-12")),
        ],
        &now,
    );

    assert_eq!(dated[0].date, date(2024, 3, 11));
    assert_eq!(dated[1].date, date(2024, 3, 10));
    assert_eq!(dated[1].due, tokyo.with_ymd_and_hms(2024, 3, 10, 8, 30, 0).unwrap());
    assert_eq!(dated[2].date, date(2024, 3, 12));
    assert_eq!(dated[2].due, tokyo.with_ymd_and_hms(2024, 3, 12, 0, 0, 0).unwrap());
}

#[test]
fn parse_due_accepts_common_layouts() {
    let tz = Utc;
    assert!(parse_due("2024-03-10T23:59:00Z", &tz).is_some());
    assert!(parse_due("2024-03-10T23:59:00.250+02:00", &tz).is_some());
    assert!(parse_due("2024-03-10 23:59:00", &tz).is_some());
    assert!(parse_due("2024-03-10T23:59", &tz).is_some());
    assert!(parse_due(" 2024-03-10 ", &tz).is_some());

    assert!(parse_due("", &tz).is_none());
    assert!(parse_due("03/10/2024", &tz).is_none());
    assert!(parse_due("2024-02-30", &tz).is_none());
}

#[test]
fn days_until_uses_calendar_days_not_elapsed_time() {
    let now = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 0).unwrap();
    let dated = filter_and_date(
        vec![
            assignment("two-minutes", Some("2024-03-11T00:01:00Z")),
            assignment("this-morning", Some("2024-03-10T00:30:00Z")),
            assignment("last-night", Some("2024-03-09T23:59:00Z")),
        ],
        &now,
    );

    assert_eq!(days_until(&dated[0], &now), 1);
    assert_eq!(days_until(&dated[1], &now), 0);
    assert_eq!(days_until(&dated[2], &now), -1);
}

#[test]
fn day_labels() {
    assert_eq!(day_label(-4), "Overdue");
    assert_eq!(day_label(-1), "Overdue");
    assert_eq!(day_label(0), "Due Today");
    assert_eq!(day_label(1), "Due Tomorrow");
    assert_eq!(day_label(2), "2 days");
    assert_eq!(day_label(30), "30 days");
}

#[test]
fn bucket_boundaries() {
    assert_eq!(UrgencyBucket::from_diff_days(-1), UrgencyBucket::Overdue);
    assert_eq!(UrgencyBucket::from_diff_days(0), UrgencyBucket::DueToday);
    assert_eq!(UrgencyBucket::from_diff_days(1), UrgencyBucket::DueSoon);
    assert_eq!(UrgencyBucket::from_diff_days(3), UrgencyBucket::DueSoon);
    assert_eq!(UrgencyBucket::from_diff_days(4), UrgencyBucket::Later);
}

#[test]
fn marker_sets_partition_distinct_due_dates() {
    let now = noon();
    let input: Vec<Assignment> = (-6..12)
        .flat_map(|day| {
            [0, 11, 13].map(|hour| {
                let due = now + Duration::days(day) + Duration::hours(hour - 12);
                assignment(&format!("{}-{}", day, hour), Some(&rfc3339(due)))
            })
        })
        .collect();

    let dated = filter_and_date(input, &now);
    let markers = CalendarMarkers::build(&dated, &now);

    let expected: BTreeSet<NaiveDate> = dated.iter().map(|d| d.date).collect();
    assert_eq!(markers.all_dates(), expected);

    let total: usize = UrgencyBucket::ALL
        .into_iter()
        .map(|b| markers.bucket(b).len())
        .sum();
    assert_eq!(total, expected.len());
}

#[test]
fn days_until_agrees_with_marker_bucket() {
    let now = noon();
    let input: Vec<Assignment> = (-5..10)
        .flat_map(|day| {
            [-12, -1, 0, 11].map(|hours| {
                let due = now + Duration::days(day) + Duration::hours(hours);
                assignment(&format!("{}:{}", day, hours), Some(&rfc3339(due)))
            })
        })
        .collect();

    let agenda = Agenda::build(input, &now);
    let markers = agenda.markers();

    for dated in agenda.assignments() {
        let days = agenda.days_until(dated);
        let expected = match days {
            d if d < 0 => UrgencyBucket::Overdue,
            0 => UrgencyBucket::DueToday,
            1..=3 => UrgencyBucket::DueSoon,
            _ => UrgencyBucket::Later,
        };
        assert_eq!(markers.bucket_of(dated.date), Some(expected), "{}", dated.id());
    }
}

#[test]
fn selection_matches_calendar_day_regardless_of_time() {
    let now = noon();
    let dated = filter_and_date(
        vec![
            assignment("late-night", Some("2024-03-10T23:59:00Z")),
            assignment("next-day", Some("2024-03-11T00:00:00Z")),
        ],
        &now,
    );

    assert!(select_day(&dated, None).is_empty());

    let picked = select_day(&dated, Some(date(2024, 3, 10)));
    assert_eq!(picked.len(), 1);
    assert_eq!(picked[0].id(), "late-night");

    assert!(select_day(&dated, Some(date(2024, 3, 12))).is_empty());
}

#[test]
fn scenario_one_assignment_per_bucket() {
    let now = noon();
    let input = vec![
        assignment("past", Some(&rfc3339(now - Duration::days(2)))),
        assignment("today", Some(&rfc3339(now))),
        assignment("soon", Some(&rfc3339(now + Duration::days(2)))),
        assignment("later", Some(&rfc3339(now + Duration::days(10)))),
        assignment("undated", None),
    ];

    let agenda = Agenda::build(input, &now);
    let markers = agenda.markers();

    assert_eq!(markers.overdue, BTreeSet::from([date(2024, 3, 8)]));
    assert_eq!(markers.due_today, BTreeSet::from([date(2024, 3, 10)]));
    assert_eq!(markers.due_soon, BTreeSet::from([date(2024, 3, 12)]));
    assert_eq!(markers.later, BTreeSet::from([date(2024, 3, 20)]));

    let feed = agenda.feed();
    assert_eq!(feed.due_soon_count, 3);
    let labels: Vec<&str> = feed.assignments.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, vec!["Overdue", "Due Today", "2 days", "10 days"]);
    let buckets: Vec<UrgencyBucket> = feed.assignments.iter().map(|i| i.bucket).collect();
    assert_eq!(buckets, UrgencyBucket::ALL.to_vec());
}

#[test]
fn shared_due_date_is_marked_once() {
    let now = noon();
    let agenda = Agenda::build(
        vec![
            assignment("a", Some("2024-03-12T09:00:00Z")),
            assignment("b", Some("2024-03-12T17:00:00Z")),
        ],
        &now,
    );

    assert_eq!(agenda.markers().due_soon.len(), 1);
    assert_eq!(agenda.select(Some(date(2024, 3, 12))).len(), 2);
}

#[test]
fn year_range_spans_due_years() {
    let agenda = Agenda::build(
        vec![
            assignment("a", Some("2023-12-31T09:00:00Z")),
            assignment("b", Some("2025-01-02T09:00:00Z")),
            assignment("c", Some("2024-06-01T09:00:00Z")),
        ],
        &noon(),
    );

    assert_eq!(agenda.years(), YearRange { min: 2023, max: 2025 });
}

#[test]
fn restrict_to_courses_hides_other_courses() {
    let agenda = Agenda::build(
        vec![
            in_course("a", "math", "2024-03-11T09:00:00Z"),
            in_course("b", "art", "2024-03-11T10:00:00Z"),
            in_course("c", "math", "2024-03-30T10:00:00Z"),
        ],
        &noon(),
    );

    let visible = HashSet::from(["math".to_string()]);
    let agenda = agenda.restrict_to_courses(&visible);

    assert_eq!(ids(agenda.assignments()), vec!["a", "c"]);
    assert_eq!(
        agenda.markers().all_dates(),
        BTreeSet::from([date(2024, 3, 11), date(2024, 3, 30)])
    );
}

#[test]
fn upcoming_item_serializes_flat_camel_case() {
    let agenda = Agenda::build(vec![assignment("a", Some("2024-03-11T09:00:00Z"))], &noon());
    let json = serde_json::to_value(agenda.feed()).unwrap();

    assert_eq!(json["dueSoonCount"], 1);
    let item = &json["assignments"][0];
    assert_eq!(item["id"], "a");
    assert_eq!(item["courseId"], "c1");
    assert_eq!(item["date"], "2024-03-11");
    assert_eq!(item["daysUntil"], 1);
    assert_eq!(item["label"], "Due Tomorrow");
    assert_eq!(item["bucket"], "dueSoon");
}
