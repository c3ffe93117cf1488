use pickup_match::workflows::recruitment::{
    ApplicationRecord, ApplicationView, CapacityPolicy, InMemoryMatchingService,
    InMemoryNotifications, Notification, PostingView,
};
use std::sync::Arc;

pub(crate) fn parse_policy(raw: &str) -> Result<CapacityPolicy, String> {
    raw.parse::<CapacityPolicy>().map_err(|err| err.to_string())
}

pub(crate) fn parse_temperature(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .trim_end_matches("°C")
        .trim_end_matches('C')
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a temperature ({err})"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{raw}' is not a finite temperature"))
    }
}

pub(crate) fn in_memory_service(
    policy: CapacityPolicy,
) -> (InMemoryMatchingService, Arc<InMemoryNotifications>) {
    InMemoryMatchingService::in_memory(policy)
}

pub(crate) fn print_posting(view: &PostingView) {
    println!("- [{}] {} ({})", view.id, view.title, view.team_name);
    println!(
        "  {} {} @ {}",
        view.date,
        view.time.format("%H:%M"),
        view.location
    );
    println!(
        "  {} / {} applied | {} slots left | {}% filled{}",
        view.current_applications,
        view.required_players,
        view.remaining_slots,
        view.fill_percent,
        if view.is_fully_booked { " | fully booked" } else { "" }
    );
    if !view.requirements.is_empty() {
        println!("  Requirements: {}", view.requirements.join(", "));
    }
}

pub(crate) fn print_application(record: &ApplicationRecord) {
    let view = ApplicationView::from(record);
    println!(
        "  - {} {} ({}, {}) {:.1}°C {} | {} matches | rating {:.1} -> {}",
        view.id,
        view.applicant.name,
        view.applicant.age,
        view.applicant.position,
        view.applicant.manner_temperature,
        view.manner_level.label(),
        view.applicant.total_matches,
        view.applicant.rating,
        view.status
    );
}

pub(crate) fn print_notifications(events: &[Notification]) {
    if events.is_empty() {
        println!("Notifications: none dispatched");
        return;
    }
    println!("Notifications:");
    for event in events {
        let details: Vec<String> = event
            .details
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        println!(
            "  - template={} -> {} ({})",
            event.template,
            event.subject_id,
            details.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_policy_accepts_both_spellings() {
        assert_eq!(parse_policy("overbook"), Ok(CapacityPolicy::Overbook));
        assert_eq!(parse_policy("HARD-CAP"), Ok(CapacityPolicy::HardCap));
        let err = parse_policy("sometimes").expect_err("unknown policy");
        assert!(err.contains("sometimes"));
    }

    #[test]
    fn parse_temperature_strips_units() {
        assert_eq!(parse_temperature("38.2"), Ok(38.2));
        assert_eq!(parse_temperature(" 36.5°C "), Ok(36.5));
        assert!(parse_temperature("warm").is_err());
        assert!(parse_temperature("NaN").is_err());
        assert_eq!(parse_temperature("37.9999999"), Ok(37.9999999));
        assert!(parse_temperature("37.9999999").expect("parses") < 38.0);
    }
}
