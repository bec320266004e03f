use quotebook_core::storage::{
    type_ids, ClientRecord, EstimateRecord, EstimateRelations, EstimateSnapshot, ProjectRecord,
    SettingsRecord, Snapshot, StorageRecord,
};
use quotebook_core::{Client, Estimate, LineItem, Project, Settings, ThemePreference};
use uuid::Uuid;

fn sample_estimate() -> (Estimate, Client) {
    let mut client = Client::new("Harbor Homes", 1_700_000_000_000);
    client.email = Some("ops@harbor.example".to_string());
    let mut estimate = Estimate::new(Uuid::new_v4(), "Garage conversion", 1_700_000_100_000)
        .with_line_item(LineItem::new(Uuid::nil(), "Drywall", 12.0, 18.5))
        .with_line_item(LineItem::new(Uuid::nil(), "Electrical", 1.0, 950.0))
        .with_line_item(LineItem::new(Uuid::nil(), "Paint", 3.0, 42.0));
    estimate.tax_rate = 8.25;
    estimate.client = Some(client.clone());
    (estimate, client)
}

#[test]
fn project_round_trips_through_its_record() {
    let project = Project::new("Lakeside cabin", 1_700_000_000_000);
    let record = ProjectRecord::to_snapshot(&project);
    assert_eq!(record.from_snapshot(()), project);
}

#[test]
fn estimate_round_trips_given_its_true_relations() {
    let (estimate, client) = sample_estimate();
    let snapshot = EstimateSnapshot::from_entity(&estimate);

    let mut items: Vec<_> = snapshot.line_items.clone();
    items.reverse();
    items.sort_by_key(|item| item.position);
    let relations = EstimateRelations {
        line_items: items.iter().map(|item| item.to_item()).collect(),
        client: Some(client),
    };

    let rebuilt = snapshot.estimate.from_snapshot(relations);
    assert_eq!(rebuilt, estimate);
    assert_eq!(rebuilt.total(), estimate.total());
}

#[test]
fn client_and_settings_round_trip() {
    let (_, client) = sample_estimate();
    assert_eq!(ClientRecord::to_snapshot(&client).from_snapshot(()), client);

    let settings = Settings {
        business_name: "Northwind Builders".to_string(),
        contact_email: Some("hi@northwind.example".to_string()),
        contact_phone: None,
        theme: ThemePreference::Dark,
        currency_symbol: "€".to_string(),
    };
    assert_eq!(SettingsRecord::to_snapshot(&settings).from_snapshot(()), settings);
}

#[test]
fn computed_totals_are_not_part_of_the_stored_shape() {
    let (estimate, _) = sample_estimate();
    let json = serde_json::to_value(EstimateRecord::to_snapshot(&estimate)).unwrap();
    let object = json.as_object().unwrap();

    for computed in ["subtotal", "tax", "total"] {
        assert!(!object.contains_key(computed), "{computed} must not be stored");
    }
    assert_eq!(json["client_id"], estimate.client_id().unwrap().to_string());
}

#[test]
fn schema_identifiers_are_distinct_and_stable() {
    let ids = [
        ProjectRecord::TYPE_ID,
        EstimateRecord::TYPE_ID,
        quotebook_core::storage::LineItemRecord::TYPE_ID,
        ClientRecord::TYPE_ID,
        SettingsRecord::TYPE_ID,
    ];
    assert_eq!(
        ids,
        [
            type_ids::PROJECT,
            type_ids::ESTIMATE,
            type_ids::LINE_ITEM,
            type_ids::CLIENT,
            type_ids::SETTINGS
        ]
    );
    assert_eq!(ids, [1, 2, 3, 4, 5]);
}
