use pickup_match::workflows::recruitment::{
    CapacityPolicy, InMemoryMatchingService, PostingFilter,
};
use pickup_match::workflows::roster::RosterImporter;

#[test]
fn sample_roster_loads_valid_rows_and_reports_the_rest() {
    let data = include_bytes!("../fixtures/sample_roster.csv");
    let entries = RosterImporter::from_reader(&data[..]).expect("roster parses");
    assert_eq!(entries.len(), 4);

    let (service, notifications) = InMemoryMatchingService::in_memory(CapacityPolicy::Overbook);
    let report = RosterImporter::load_into(&service, entries);

    assert_eq!(report.created.len(), 3);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].line, 5);
    assert!(report.rejected[0].reason.contains("team_name"));
    assert!(report.rejected[0].reason.contains("time"));
    assert_eq!(notifications.events().len(), 3);

    let seolleung = service
        .list_postings(&PostingFilter::for_team("FC Seolleung United"))
        .expect("list succeeds");
    assert_eq!(seolleung.len(), 2);
    assert_eq!(
        seolleung[0].requirements,
        vec!["manner required", "beginners welcome", "19 or older"]
    );
    assert_eq!(seolleung[0].location, "Seolleung Futsal Park, 123 Seolleung-ro");

    let early_birds = service
        .list_postings(&PostingFilter::for_team("Yeoksam Early Birds"))
        .expect("list succeeds");
    assert_eq!(early_birds[0].required_players, 3);
    assert_eq!(early_birds[0].requirements.len(), 3);
}
