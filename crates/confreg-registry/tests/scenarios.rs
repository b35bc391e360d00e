//! End-to-end registry scenarios over the in-memory store

use std::sync::Arc;

use confreg_common::{EntityKind, RegistryError};
use confreg_persistence::{KvStore, MemoryKvStore};
use confreg_registry::{
    Configuration, ConfigurationInGroup, ConfigurationRepository, ConflictPolicy, Group,
    GroupRepository, keyspace,
};

fn repositories() -> (Arc<MemoryKvStore>, ConfigurationRepository, GroupRepository) {
    let store = Arc::new(MemoryKvStore::new());
    (
        store.clone(),
        ConfigurationRepository::new(store.clone()),
        GroupRepository::new(store),
    )
}

#[tokio::test]
async fn test_configuration_versions_accumulate() {
    let (_, configs, _) = repositories();

    let v1 = configs
        .create(Configuration::new("v1").with_entry("env", "prod"))
        .await
        .unwrap();
    configs
        .add_version(
            &v1.id,
            Configuration::new("v2")
                .with_entry("env", "prod")
                .with_entry("region", "eu"),
        )
        .await
        .unwrap();

    let versions = configs.get_all_versions_by_id(&v1.id).await.unwrap();
    let names: Vec<&str> = versions.iter().map(|c| c.version.as_str()).collect();
    assert_eq!(names, vec!["v1", "v2"]);
    assert!(versions.iter().all(|c| c.id == v1.id));

    let v2 = configs.get_by_id_and_version(&v1.id, "v2").await.unwrap();
    assert_eq!(v2.entries["env"], "prod");
    assert_eq!(v2.entries["region"], "eu");
}

#[tokio::test]
async fn test_label_query_returns_matching_member() {
    let (_, _, groups) = repositories();

    let group = groups
        .create(Group::new(
            "v1",
            vec![
                ConfigurationInGroup::default()
                    .with_label("env", "prod")
                    .with_entry("replicas", "5"),
                ConfigurationInGroup::default()
                    .with_label("env", "dev")
                    .with_entry("replicas", "1"),
            ],
        ))
        .await
        .unwrap();

    let selected = groups
        .find_by_labels(&group.id, "v1", "env:prod")
        .await
        .unwrap();
    assert_eq!(selected, vec![group.configs[0].clone()]);
}

#[tokio::test]
async fn test_conflict_asymmetry_between_kinds() {
    let (store, configs, groups) = repositories();

    // A configuration write over an existing key succeeds
    let config = configs.create(Configuration::new("v1")).await.unwrap();
    configs
        .add_version(&config.id, Configuration::new("v1").with_entry("k", "v"))
        .await
        .unwrap();
    assert_eq!(
        configs
            .get_by_id_and_version(&config.id, "v1")
            .await
            .unwrap()
            .entries["k"],
        "v"
    );

    // Groups default to the reject policy for creates; add_version stays unconditional
    assert_eq!(groups.conflict_policy(), ConflictPolicy::RejectOnConflict);
    let mut existing = Group::new("v1", vec![]);
    existing.id = "g".to_string();
    groups.add_version(existing.clone()).await.unwrap();
    groups
        .add_version(Group {
            configs: vec![ConfigurationInGroup::default().with_label("env", "qa")],
            ..existing
        })
        .await
        .unwrap();

    let key = keyspace::key_for_version(EntityKind::Group, "g", "v1");
    assert!(store.get(&key).await.unwrap().is_some());
    assert_eq!(
        groups
            .get_by_id_and_version("g", "v1")
            .await
            .unwrap()
            .configs
            .len(),
        1
    );
}

#[tokio::test]
async fn test_kinds_do_not_share_listings() {
    let (_, configs, groups) = repositories();

    configs.add_version("shared", Configuration::new("v1")).await.unwrap();
    let mut group = Group::new("v1", vec![]);
    group.id = "shared".to_string();
    groups.add_version(group).await.unwrap();

    assert_eq!(configs.get_all().await.unwrap().len(), 1);
    assert_eq!(groups.get_all().await.unwrap().len(), 1);

    configs.delete("shared", "v1").await.unwrap();
    assert!(groups.get_by_id_and_version("shared", "v1").await.is_ok());
}

#[tokio::test]
async fn test_delete_semantics() {
    let (_, configs, groups) = repositories();

    let result = configs.delete("missing", "v1").await;
    assert!(matches!(result, Err(RegistryError::NotFound { .. })));

    let result = groups.delete("missing", "v1").await;
    assert!(matches!(result, Err(RegistryError::NotFound { .. })));

    let config = configs.create(Configuration::new("v1")).await.unwrap();
    let confirmation = configs.delete(&config.id, "v1").await.unwrap();
    assert_eq!(
        serde_json::to_value(&confirmation).unwrap(),
        serde_json::json!({ "deleted": config.id })
    );
    assert!(configs.get_all_versions_by_id(&config.id).await.unwrap().is_empty());
}
