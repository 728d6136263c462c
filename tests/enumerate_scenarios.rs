//! Enumeration scenarios driven through scripted clients
//!
//! These tests exercise the region walk, degrade-to-empty error handling,
//! aggregation and session hand-off without any network access.

use enum_lightsail::resource::{
    self, aggregate, enumerate_regions, Category, Counts, LightsailData, RegionResources,
};
use enum_lightsail::session::{FileSession, Session};
use enum_lightsail::summary::format_summary;
use enum_lightsail::testing::{MemorySession, RecordingProgress, StubClient, StubFactory};
use serde_json::{json, Value};

fn regions(names: &[&str]) -> Vec<String> {
    names.iter().map(|r| r.to_string()).collect()
}

#[tokio::test]
async fn test_two_region_scenario() {
    let factory = StubFactory::new()
        .with_client(StubClient::new("us-east-1").with_pages(
            Category::Instances,
            vec![json!({"instances": [{"name": "r1"}, {"name": "r2"}]})],
        ))
        .with_client(StubClient::new("us-west-2").with_access_denied(Category::Instances));

    let mut session = MemorySession::default();
    let progress = RecordingProgress::default();

    let counts = resource::run(
        &factory,
        &mut session,
        &[Category::Instances],
        &regions(&["us-east-1", "us-west-2"]),
        &progress,
    )
    .await
    .unwrap();

    assert_eq!(counts, Counts::from([(Category::Instances, 2)]));
    assert_eq!(
        session.data["Lightsail"],
        json!({
            "us-east-1": {"instances": [{"name": "r1"}, {"name": "r2"}]},
            "us-west-2": {"instances": []}
        })
    );
    assert_eq!(
        progress.events(),
        vec![
            "region us-east-1",
            "start us-east-1 instances",
            "found us-east-1 instances 2",
            "region us-west-2",
            "start us-west-2 instances",
            "denied us-west-2 instances",
            "completed enum_lightsail",
        ]
    );
}

#[tokio::test]
async fn test_failures_do_not_stop_later_categories_or_regions() {
    let factory = StubFactory::new()
        .with_client(
            StubClient::new("eu-west-1")
                .with_access_denied(Category::KeyPairs)
                .with_error(Category::Disks, 500, "InternalFailure")
                .with_pages(Category::StaticIps, vec![json!({"staticIps": [1, 2]})]),
        )
        .with_client(
            StubClient::new("eu-west-2")
                .with_pages(Category::KeyPairs, vec![json!({"keyPairs": [1]})])
                .with_pages(Category::Disks, vec![json!({"disks": [1, 2, 3]})])
                .with_access_denied(Category::StaticIps),
        );

    let categories = [Category::KeyPairs, Category::StaticIps, Category::Disks];
    let progress = RecordingProgress::default();
    let data = enumerate_regions(
        &factory,
        &categories,
        &regions(&["eu-west-1", "eu-west-2"]),
        &progress,
    )
    .await;

    let first = data.region("eu-west-1").unwrap();
    assert!(first[&Category::KeyPairs].is_empty());
    assert!(first[&Category::Disks].is_empty());
    assert_eq!(first[&Category::StaticIps].len(), 2);

    let second = data.region("eu-west-2").unwrap();
    assert_eq!(second[&Category::KeyPairs].len(), 1);
    assert_eq!(second[&Category::Disks].len(), 3);
    assert!(second[&Category::StaticIps].is_empty());

    assert_eq!(
        aggregate(&data),
        Counts::from([
            (Category::KeyPairs, 1),
            (Category::StaticIps, 2),
            (Category::Disks, 3),
        ])
    );
    assert!(progress
        .events()
        .contains(&"failed eu-west-1 disks".to_string()));
}

#[tokio::test]
async fn test_categories_are_called_in_selection_order() {
    let client = StubClient::new("ap-south-1")
        .with_pages(Category::Blueprints, vec![json!({"blueprints": []})])
        .with_pages(Category::LoadBalancers, vec![json!({"loadBalancers": []})]);
    let factory = StubFactory::new().with_client(client);

    let progress = RecordingProgress::default();
    enumerate_regions(
        &factory,
        &[Category::Blueprints, Category::LoadBalancers],
        &regions(&["ap-south-1"]),
        &progress,
    )
    .await;

    let calls = factory.client("ap-south-1").unwrap().calls();
    assert_eq!(
        calls,
        vec![(Category::Blueprints, None), (Category::LoadBalancers, None)]
    );
}

#[tokio::test]
async fn test_repeated_region_counts_match_stored_records() {
    let factory = StubFactory::new().with_client(StubClient::new("us-east-1").with_pages(
        Category::Instances,
        vec![json!({"instances": [{"name": "r1"}, {"name": "r2"}]})],
    ));
    let mut session = MemorySession::default();
    let progress = RecordingProgress::default();

    let counts = resource::run(
        &factory,
        &mut session,
        &[Category::Instances],
        &regions(&["us-east-1", "us-west-2", "us-east-1"]),
        &progress,
    )
    .await
    .unwrap();

    let stored: usize = session.data["Lightsail"]
        .as_object()
        .unwrap()
        .values()
        .map(|region| region["instances"].as_array().unwrap().len())
        .sum();
    assert_eq!(counts[&Category::Instances], stored);
    assert_eq!(counts, Counts::from([(Category::Instances, 2)]));

    let regions_started: Vec<String> = progress
        .events()
        .into_iter()
        .filter(|e| e.starts_with("region "))
        .collect();
    assert_eq!(regions_started, vec!["region us-east-1", "region us-west-2"]);
    assert_eq!(factory.client("us-east-1").unwrap().calls().len(), 1);
}

#[test]
fn test_aggregate_three_regions() {
    let mut data = LightsailData::new(vec![Category::Instances, Category::Disks]);
    for (region, instances, disks) in [("r1", 1, 0), ("r2", 2, 0), ("r3", 0, 5)] {
        data.regions.push((
            region.to_string(),
            RegionResources::from([
                (Category::Instances, vec![Value::Null; instances]),
                (Category::Disks, vec![Value::Null; disks]),
            ]),
        ));
    }

    assert_eq!(
        aggregate(&data),
        Counts::from([(Category::Instances, 3), (Category::Disks, 5)])
    );
}

#[tokio::test]
async fn test_run_persists_to_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut session = FileSession::open(&path).unwrap();
    session.update("EC2", json!({"kept": true})).unwrap();

    let factory = StubFactory::new().with_client(
        StubClient::new("us-east-1")
            .with_pages(Category::Bundles, vec![json!({"bundles": [{"id": "nano"}]})]),
    );

    let counts = resource::run(
        &factory,
        &mut session,
        &[Category::Bundles],
        &regions(&["us-east-1"]),
        &RecordingProgress::default(),
    )
    .await
    .unwrap();

    assert_eq!(format_summary(&counts), "  1 bundle(s) enumerated\n");

    let reopened = FileSession::open(&path).unwrap();
    assert_eq!(reopened.get("EC2"), Some(&json!({"kept": true})));
    assert_eq!(
        reopened.get("Lightsail"),
        Some(&json!({"us-east-1": {"bundles": [{"id": "nano"}]}}))
    );
}

#[test]
fn test_run_with_blocking_runtime() {
    let factory = StubFactory::new();
    let mut session = MemorySession::default();

    // no regions: nothing is called, every selected category totals zero
    let counts = tokio_test::block_on(resource::run(
        &factory,
        &mut session,
        &Category::ALL,
        &[],
        &RecordingProgress::default(),
    ))
    .unwrap();

    assert_eq!(counts.len(), 10);
    assert!(counts.values().all(|c| *c == 0));
    assert_eq!(session.data["Lightsail"], json!({}));
}
