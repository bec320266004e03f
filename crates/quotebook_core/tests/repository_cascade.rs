use quotebook_core::datasource::{
    ClientLocalDataSource, EstimateLocalDataSource, ProjectLocalDataSource,
};
use quotebook_core::db::{Database, DbError};
use quotebook_core::repo::client_repo::{ClientRepository, LocalClientRepository};
use quotebook_core::repo::estimate_repo::{EstimateRepository, LocalEstimateRepository};
use quotebook_core::repo::integrity_repo::{IntegrityRepository, LocalIntegrityRepository};
use quotebook_core::repo::project_repo::{LocalProjectRepository, ProjectRepository};
use quotebook_core::storage::{EstimateRecord, LineItemRecord, Snapshot};
use quotebook_core::{Client, Estimate, FailureKind, LineItem, Project};
use uuid::Uuid;

struct Fixture {
    db: Database,
    estimate_source: EstimateLocalDataSource,
    projects: LocalProjectRepository,
    estimates: LocalEstimateRepository,
    clients: LocalClientRepository,
    integrity: LocalIntegrityRepository,
}

fn fixture(max_projects: usize) -> Fixture {
    let db = Database::open_in_memory().unwrap();
    let clients = ClientLocalDataSource::open(db.clone()).unwrap();
    let projects = ProjectLocalDataSource::open(db.clone()).unwrap();
    let estimates = EstimateLocalDataSource::open(db.clone(), clients.clone()).unwrap();

    Fixture {
        db,
        estimate_source: estimates.clone(),
        projects: LocalProjectRepository::new(projects.clone(), estimates.clone(), max_projects),
        estimates: LocalEstimateRepository::new(
            projects.clone(),
            estimates.clone(),
            clients.clone(),
        ),
        clients: LocalClientRepository::new(clients.clone()),
        integrity: LocalIntegrityRepository::new(projects, estimates, clients),
    }
}

fn estimate_with_items(project_id: Uuid, name: &str, items: usize) -> Estimate {
    (0..items).fold(Estimate::new(project_id, name, 10), |acc, index| {
        acc.with_line_item(LineItem::new(
            Uuid::nil(),
            format!("item {index}"),
            1.0,
            10.0,
        ))
    })
}

#[test]
fn listing_an_empty_collection_is_ok_and_empty() {
    let fx = fixture(10);
    assert_eq!(fx.projects.list_projects().unwrap(), Vec::<Project>::new());
    assert!(fx.clients.list_clients().unwrap().is_empty());
}

#[test]
fn create_get_update_project() {
    let fx = fixture(10);
    let project = Project::new("Attic", 5);

    fx.projects.create_project(&project).unwrap();
    assert_eq!(fx.projects.get_project(project.id).unwrap(), project);

    let renamed = project.renamed("Loft");
    fx.projects.update_project(&renamed).unwrap();
    assert_eq!(fx.projects.get_project(project.id).unwrap().name, "Loft");
    assert_eq!(project.name, "Attic");
}

#[test]
fn missing_project_is_not_found() {
    let fx = fixture(10);
    let missing = Uuid::new_v4();

    assert_eq!(
        fx.projects.get_project(missing).unwrap_err().kind,
        FailureKind::NotFound
    );
    assert_eq!(
        fx.projects.delete_project(missing).unwrap_err().kind,
        FailureKind::NotFound
    );
    let ghost = Project::new("ghost", 0);
    assert_eq!(
        fx.projects.update_project(&ghost).unwrap_err().kind,
        FailureKind::NotFound
    );
}

#[test]
fn capacity_check_runs_before_create() {
    let fx = fixture(2);
    fx.projects.create_project(&Project::new("one", 0)).unwrap();
    fx.projects.create_project(&Project::new("two", 0)).unwrap();

    let err = fx
        .projects
        .create_project(&Project::new("three", 0))
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::BusinessLogic);
    assert_eq!(err.message, "Project limit reached (max 2)");
    assert_eq!(fx.projects.list_projects().unwrap().len(), 2);
}

#[test]
fn creating_the_same_project_twice_is_rejected() {
    let fx = fixture(10);
    let project = Project::new("dup", 0);
    fx.projects.create_project(&project).unwrap();

    let err = fx.projects.create_project(&project).unwrap_err();
    assert_eq!(err.kind, FailureKind::BusinessLogic);
}

#[test]
fn deleting_a_project_cascades_to_every_dependent() {
    let fx = fixture(10);
    let project = Project::new("Kitchen", 0);
    let other = Project::new("Bathroom", 0);
    fx.projects.create_project(&project).unwrap();
    fx.projects.create_project(&other).unwrap();

    let first = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "A", 2))
        .unwrap();
    let second = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "B", 3))
        .unwrap();
    let survivor = fx
        .estimates
        .create_estimate(&estimate_with_items(other.id, "C", 1))
        .unwrap();

    let report = fx.projects.delete_project(project.id).unwrap();
    assert_eq!(report.estimates_deleted, 2);
    assert_eq!(report.line_items_deleted, 5);

    assert!(fx.estimate_source.find_by_project(project.id).unwrap().is_empty());
    assert!(fx.estimate_source.find_line_items(first.id).unwrap().is_empty());
    assert!(fx.estimate_source.find_line_items(second.id).unwrap().is_empty());
    assert_eq!(
        fx.estimates.get_estimate(survivor.id).unwrap().line_items.len(),
        1
    );
    assert!(fx.integrity.scan().unwrap().is_clean());
}

#[test]
fn estimate_requires_existing_project_and_client() {
    let fx = fixture(10);
    let orphan = estimate_with_items(Uuid::new_v4(), "nowhere", 1);
    let err = fx.estimates.create_estimate(&orphan).unwrap_err();
    assert_eq!(err.kind, FailureKind::NotFound);
    assert!(fx.estimate_source.all().unwrap().is_empty());

    let project = Project::new("P", 0);
    fx.projects.create_project(&project).unwrap();
    let mut with_ghost_client = estimate_with_items(project.id, "ghost client", 0);
    with_ghost_client.client = Some(Client::new("never saved", 0));
    let err = fx.estimates.create_estimate(&with_ghost_client).unwrap_err();
    assert_eq!(err.kind, FailureKind::NotFound);
}

#[test]
fn deleted_client_resolves_to_none_without_failing() {
    let fx = fixture(10);
    let project = Project::new("P", 0);
    fx.projects.create_project(&project).unwrap();
    let client = fx.clients.save_client(&Client::new("Acme", 0)).unwrap();

    let mut estimate = estimate_with_items(project.id, "with client", 1);
    estimate.client = Some(client.clone());
    let saved = fx.estimates.create_estimate(&estimate).unwrap();
    assert_eq!(saved.client.as_ref(), Some(&client));

    fx.clients.delete_client(client.id).unwrap();

    let resolved = fx.estimates.get_estimate(saved.id).unwrap();
    assert!(resolved.client.is_none());
    let stored = fx.estimate_source.get(saved.id).unwrap();
    assert_eq!(stored.client_id, Some(client.id));
    assert_eq!(
        fx.integrity.scan().unwrap().dangling_client_refs,
        vec![saved.id]
    );
}

#[test]
fn update_keeps_item_order_and_removes_dropped_items() {
    let fx = fixture(10);
    let project = Project::new("P", 0);
    fx.projects.create_project(&project).unwrap();
    let saved = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "E", 3))
        .unwrap();
    let dropped = saved.line_items[1].id;

    let mut next = saved.clone();
    next.line_items.remove(1);
    next.line_items.reverse();
    let updated = fx.estimates.update_estimate(&next).unwrap();

    let descriptions: Vec<_> = updated
        .line_items
        .iter()
        .map(|item| item.description.as_str())
        .collect();
    assert_eq!(descriptions, vec!["item 2", "item 0"]);
    assert!(fx
        .estimate_source
        .find_line_items(saved.id)
        .unwrap()
        .iter()
        .all(|item| item.id != dropped));
}

#[test]
fn integrity_repair_removes_orphans_left_by_interrupted_writes() {
    let fx = fixture(10);
    let missing_project = Uuid::new_v4();
    let estimate = estimate_with_items(missing_project, "orphan", 2);
    fx.estimate_source
        .put(&EstimateRecord::to_snapshot(&estimate))
        .unwrap();
    for (position, item) in estimate.line_items.iter().enumerate() {
        fx.estimate_source
            .put_line_item(&LineItemRecord::from_item(item, position as u32))
            .unwrap();
    }
    let stray = LineItem::new(Uuid::new_v4(), "stray", 1.0, 1.0);
    fx.estimate_source
        .put_line_item(&LineItemRecord::from_item(&stray, 0))
        .unwrap();

    let report = fx.integrity.scan().unwrap();
    assert_eq!(report.orphan_estimates, vec![estimate.id]);
    assert_eq!(report.orphan_line_items, vec![stray.id]);

    fx.integrity.repair().unwrap();
    assert!(fx.estimate_source.all().unwrap().is_empty());
    assert!(fx.estimate_source.all_line_items().unwrap().is_empty());
    assert!(fx.integrity.scan().unwrap().is_clean());
}

#[test]
fn update_rejects_line_item_owned_by_another_estimate() {
    let fx = fixture(10);
    let project = Project::new("P", 0);
    fx.projects.create_project(&project).unwrap();
    let first = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "A", 1))
        .unwrap();
    let second = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "B", 1))
        .unwrap();

    let stolen = first.line_items[0].id;
    let next = second.with_line_item(first.line_items[0].clone());
    let err = fx.estimates.update_estimate(&next).unwrap_err();

    assert_eq!(err.kind, FailureKind::BusinessLogic);
    assert_eq!(
        err.message,
        format!("Line item belongs to another estimate: {stolen}")
    );
    let kept = fx.estimates.get_estimate(first.id).unwrap();
    assert_eq!(kept.line_items.len(), 1);
    assert_eq!(kept.line_items[0].id, stolen);
    assert_eq!(
        fx.estimates.get_estimate(second.id).unwrap().line_items,
        second.line_items
    );
}

#[test]
fn save_rejects_line_item_claiming_another_owner() {
    let fx = fixture(10);
    let project = Project::new("P", 0);
    fx.projects.create_project(&project).unwrap();

    let mut estimate = estimate_with_items(project.id, "A", 1);
    estimate.line_items[0].estimate_id = Uuid::new_v4();
    let err = fx.estimates.create_estimate(&estimate).unwrap_err();

    assert_eq!(err.kind, FailureKind::BusinessLogic);
    assert!(fx.estimate_source.find_by_project(project.id).unwrap().is_empty());
}

#[test]
fn save_rejects_duplicate_line_item_ids() {
    let fx = fixture(10);
    let project = Project::new("P", 0);
    fx.projects.create_project(&project).unwrap();
    let saved = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "A", 1))
        .unwrap();

    let repeated = saved.line_items[0].clone();
    let next = saved.with_line_item(repeated.clone());
    let err = fx.estimates.update_estimate(&next).unwrap_err();

    assert_eq!(err.kind, FailureKind::BusinessLogic);
    assert_eq!(
        err.message,
        format!("Duplicate line item in estimate: {}", repeated.id)
    );
    assert_eq!(
        fx.estimates.get_estimate(saved.id).unwrap().line_items,
        saved.line_items
    );
}

#[test]
fn interrupted_project_cascade_fails_and_can_be_retried() {
    let fx = fixture(10);
    let project = Project::new("Kitchen", 0);
    fx.projects.create_project(&project).unwrap();
    let first = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "A", 2))
        .unwrap();
    let second = fx
        .estimates
        .create_estimate(&estimate_with_items(project.id, "B", 3))
        .unwrap();

    fx.db
        .with_conn(|conn| {
            conn.execute_batch(&format!(
                "CREATE TRIGGER block_estimate_delete BEFORE DELETE ON estimates
                 WHEN old.id = '{}'
                 BEGIN SELECT RAISE(ABORT, 'estimate delete blocked'); END;",
                second.id
            ))
            .map_err(DbError::Sqlite)
        })
        .unwrap();

    let err = fx.projects.delete_project(project.id).unwrap_err();
    assert_eq!(err.kind, FailureKind::Database);
    assert!(err.message.starts_with("Storage error: "));

    // The first estimate finished; the second lost its items but not its record.
    assert!(fx.estimate_source.find(first.id).unwrap().is_none());
    assert!(fx.estimate_source.find_line_items(first.id).unwrap().is_empty());
    assert!(fx.estimate_source.find(second.id).unwrap().is_some());
    assert!(fx.estimate_source.find_line_items(second.id).unwrap().is_empty());
    assert!(fx.projects.get_project(project.id).is_ok());
    // Children go before parents, so nothing is orphaned.
    assert!(fx.integrity.scan().unwrap().is_clean());

    fx.db
        .with_conn(|conn| {
            conn.execute_batch("DROP TRIGGER block_estimate_delete;")
                .map_err(DbError::Sqlite)
        })
        .unwrap();

    let report = fx.projects.delete_project(project.id).unwrap();
    assert_eq!(report.estimates_deleted, 1);
    assert_eq!(report.line_items_deleted, 0);
    assert_eq!(
        fx.projects.get_project(project.id).unwrap_err().kind,
        FailureKind::NotFound
    );
    assert!(fx.integrity.scan().unwrap().is_clean());
}
