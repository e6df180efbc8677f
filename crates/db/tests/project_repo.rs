//! Integration tests for `ProjectRepo` against a real database.

use std::time::Duration;

use kanban_db::models::project::{CreateProject, UpdateProject};
use kanban_db::repositories::ProjectRepo;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_project(name: &str) -> CreateProject {
    CreateProject {
        name: Some(name.to_string()),
        description: None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_name_only_applies_defaults(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Launch")).await.unwrap();

    assert!(!project.id.is_empty());
    assert_eq!(project.name, "Launch");
    assert_eq!(project.description, "");
    assert_eq!(project.created_at, project.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_unique_ids(pool: PgPool) {
    let a = ProjectRepo::create(&pool, &new_project("A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("B")).await.unwrap();
    assert_ne!(a.id, b.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_by_id(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &CreateProject {
            name: Some("Find Me".into()),
            description: Some("with a description".into()),
        },
    )
    .await
    .unwrap();

    let found = ProjectRepo::find_by_id(&pool, &created.id)
        .await
        .unwrap()
        .expect("project should exist");
    assert_eq!(found, created);

    let missing = ProjectRepo::find_by_id(&pool, "no-such-id").await.unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_newest_first(pool: PgPool) {
    let first = ProjectRepo::create(&pool, &new_project("First")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let second = ProjectRepo::create(&pool, &new_project("Second")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let third = ProjectRepo::create(&pool, &new_project("Third")).await.unwrap();

    let ids: Vec<_> = ProjectRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_merges_supplied_fields(pool: PgPool) {
    let created = ProjectRepo::create(
        &pool,
        &CreateProject {
            name: Some("Original".into()),
            description: Some("keep me".into()),
        },
    )
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = ProjectRepo::update(
        &pool,
        &created.id,
        &UpdateProject {
            name: Some("Renamed".into()),
            description: None,
        },
    )
    .await
    .unwrap()
    .expect("project should exist");

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description, "keep me");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_update_still_refreshes_updated_at(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project("Touch")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = ProjectRepo::update(&pool, &created.id, &UpdateProject::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Touch");
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_id_returns_none(pool: PgPool) {
    let result = ProjectRepo::update(
        &pool,
        "no-such-id",
        &UpdateProject {
            name: Some("x".into()),
            description: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_then_find_returns_none(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project("Delete Me")).await.unwrap();

    assert!(ProjectRepo::delete(&pool, &created.id).await.unwrap());
    assert!(ProjectRepo::find_by_id(&pool, &created.id).await.unwrap().is_none());
    assert!(!ProjectRepo::delete(&pool, &created.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_exists(pool: PgPool) {
    let created = ProjectRepo::create(&pool, &new_project("Here")).await.unwrap();
    assert!(ProjectRepo::exists(&pool, &created.id).await.unwrap());
    assert!(!ProjectRepo::exists(&pool, "no-such-id").await.unwrap());
}
