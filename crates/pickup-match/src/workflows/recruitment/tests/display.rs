use super::common::*;
use crate::workflows::recruitment::display::{
    classify_manner, fill_percent, is_fully_booked, remaining_slots, ApplicationView,
    MannerLevel, PostingView,
};
use crate::workflows::recruitment::domain::CapacityPolicy;

#[test]
fn classify_manner_buckets_sample_applicants() {
    assert_eq!(classify_manner(38.2), MannerLevel::VeryGood);
    assert_eq!(classify_manner(39.1), MannerLevel::VeryGood);
    assert_eq!(classify_manner(35.8), MannerLevel::Caution);
}

#[test]
fn classify_manner_thresholds_are_inclusive_on_the_upper_side() {
    assert_eq!(classify_manner(38.0), MannerLevel::VeryGood);
    assert_eq!(classify_manner(37.99), MannerLevel::Good);
    assert_eq!(classify_manner(37.0), MannerLevel::Good);
    assert_eq!(classify_manner(36.99), MannerLevel::Normal);
    assert_eq!(classify_manner(36.5), MannerLevel::Normal);
    assert_eq!(classify_manner(36.49), MannerLevel::Caution);
}

#[test]
fn readings_just_below_a_threshold_stay_in_the_lower_bucket() {
    let reading: f64 = "37.9999999".parse().expect("numeric reading");
    assert_eq!(classify_manner(reading), MannerLevel::Good);
    assert_eq!(classify_manner(36.4999999), MannerLevel::Caution);
}

#[test]
fn manner_labels_are_stable() {
    let labels: Vec<_> = [
        MannerLevel::VeryGood,
        MannerLevel::Good,
        MannerLevel::Normal,
        MannerLevel::Caution,
    ]
    .into_iter()
    .map(MannerLevel::label)
    .collect();
    assert_eq!(labels, vec!["very_good", "good", "normal", "caution"]);
}

#[test]
fn capacity_figures_follow_submissions() {
    let (service, _, _) = build_service(CapacityPolicy::Overbook);

    let (empty, _) = posting_with_applicants(&service, 0);
    assert_eq!(remaining_slots(&empty), 2);
    assert!(!is_fully_booked(&empty));
    assert_eq!(fill_percent(&empty), 0);

    let (half, _) = posting_with_applicants(&service, 1);
    assert_eq!(remaining_slots(&half), 1);
    assert_eq!(fill_percent(&half), 50);

    let (full, _) = posting_with_applicants(&service, 2);
    assert_eq!(remaining_slots(&full), 0);
    assert!(is_fully_booked(&full));
    assert_eq!(fill_percent(&full), 100);
}

#[test]
fn overbooked_posting_goes_negative_but_fill_is_capped() {
    let (service, _, _) = build_service(CapacityPolicy::Overbook);
    let (posting, _) = posting_with_applicants(&service, 3);

    let view = PostingView::from(&posting);
    assert_eq!(view.current_applications, 3);
    assert_eq!(view.remaining_slots, -1);
    assert!(view.is_fully_booked);
    assert_eq!(view.fill_percent, 100);
}

#[test]
fn application_view_carries_manner_level_and_status_label() {
    let (service, _, _) = build_service(CapacityPolicy::Overbook);
    let posting = service.create_posting(draft()).expect("valid draft");
    let record = service
        .submit_application(&posting.id, applicant("Park Jun-ho", 35.8))
        .expect("accepted");

    let view = ApplicationView::from(&record);
    assert_eq!(view.status, "pending");
    assert_eq!(view.manner_level, MannerLevel::Caution);

    let json = serde_json::to_value(&view).expect("view serializes");
    assert_eq!(json["manner_level"], "caution");
    assert_eq!(json["applicant"]["name"], "Park Jun-ho");
}
