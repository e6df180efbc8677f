//! Integration tests for `TicketRepo` against a real database.
//!
//! Covers defaults on create, partial updates, project filtering and
//! ordering, hard delete, and the project cascade.

use std::time::Duration;

use kanban_core::ticket::{TicketPriority, TicketStatus};
use kanban_db::models::project::{CreateProject, Project};
use kanban_db::models::ticket::{CreateTicket, UpdateTicket};
use kanban_db::repositories::{ProjectRepo, TicketRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_project(pool: &PgPool, name: &str) -> Project {
    ProjectRepo::create(
        pool,
        &CreateProject {
            name: Some(name.to_string()),
            description: None,
        },
    )
    .await
    .unwrap()
}

fn new_ticket(project_id: &str, title: &str) -> CreateTicket {
    CreateTicket {
        title: Some(title.to_string()),
        project_id: Some(project_id.to_string()),
        ..CreateTicket::default()
    }
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_applies_defaults(pool: PgPool) {
    let project = seed_project(&pool, "Launch").await;
    let ticket = TicketRepo::create(&pool, &new_ticket(&project.id, "Draft release notes"))
        .await
        .unwrap();

    assert_eq!(ticket.title, "Draft release notes");
    assert_eq!(ticket.description, "");
    assert_eq!(ticket.status, TicketStatus::Todo);
    assert_eq!(ticket.priority, TicketPriority::Medium);
    assert_eq!(ticket.project_id, project.id);
    assert_eq!(ticket.created_at, ticket.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_honours_supplied_enums(pool: PgPool) {
    let project = seed_project(&pool, "Launch").await;
    let ticket = TicketRepo::create(
        &pool,
        &CreateTicket {
            status: Some(TicketStatus::Done),
            priority: Some(TicketPriority::High),
            description: Some("already shipped".into()),
            ..new_ticket(&project.id, "Ship it")
        },
    )
    .await
    .unwrap();

    assert_eq!(ticket.status, TicketStatus::Done);
    assert_eq!(ticket.priority, TicketPriority::High);
    assert_eq!(ticket.description, "already shipped");

    let found = TicketRepo::find_by_id(&pool, &ticket.id).await.unwrap().unwrap();
    assert_eq!(found, ticket);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_for_unknown_project_violates_foreign_key(pool: PgPool) {
    let err = TicketRepo::create(&pool, &new_ticket("no-such-project", "Orphan"))
        .await
        .expect_err("foreign key should reject the insert");
    let db_err = err.as_database_error().expect("should be a database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_project_newest_first(pool: PgPool) {
    let alpha = seed_project(&pool, "Alpha").await;
    let beta = seed_project(&pool, "Beta").await;

    let a1 = TicketRepo::create(&pool, &new_ticket(&alpha.id, "a1")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let b1 = TicketRepo::create(&pool, &new_ticket(&beta.id, "b1")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let a2 = TicketRepo::create(&pool, &new_ticket(&alpha.id, "a2")).await.unwrap();

    let alpha_ids: Vec<_> = TicketRepo::list(&pool, Some(&alpha.id))
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(alpha_ids, vec![a2.id.clone(), a1.id.clone()]);

    let all_ids: Vec<_> = TicketRepo::list(&pool, None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(all_ids, vec![a2.id, b1.id, a1.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_unknown_project_is_empty(pool: PgPool) {
    let project = seed_project(&pool, "Alpha").await;
    TicketRepo::create(&pool, &new_ticket(&project.id, "t")).await.unwrap();

    let tickets = TicketRepo::list(&pool, Some("no-such-project")).await.unwrap();
    assert!(tickets.is_empty());
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_status_only_update_leaves_other_fields(pool: PgPool) {
    let project = seed_project(&pool, "Launch").await;
    let created = TicketRepo::create(
        &pool,
        &CreateTicket {
            description: Some("details".into()),
            priority: Some(TicketPriority::Low),
            ..new_ticket(&project.id, "Draft release notes")
        },
    )
    .await
    .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    let updated = TicketRepo::update(
        &pool,
        &created.id,
        &UpdateTicket {
            status: Some(TicketStatus::Done),
            ..UpdateTicket::default()
        },
    )
    .await
    .unwrap()
    .expect("ticket should exist");

    assert_eq!(updated.status, TicketStatus::Done);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.priority, created.priority);
    assert_eq!(updated.project_id, created.project_id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_can_move_ticket_between_projects(pool: PgPool) {
    let alpha = seed_project(&pool, "Alpha").await;
    let beta = seed_project(&pool, "Beta").await;
    let ticket = TicketRepo::create(&pool, &new_ticket(&alpha.id, "Move me"))
        .await
        .unwrap();

    let moved = TicketRepo::update(
        &pool,
        &ticket.id,
        &UpdateTicket {
            project_id: Some(beta.id.clone()),
            ..UpdateTicket::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.project_id, beta.id);
    assert!(TicketRepo::list(&pool, Some(&alpha.id)).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_id_returns_none(pool: PgPool) {
    let result = TicketRepo::update(
        &pool,
        "no-such-id",
        &UpdateTicket {
            status: Some(TicketStatus::Done),
            ..UpdateTicket::default()
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_ticket_lifecycle(pool: PgPool) {
    let project = seed_project(&pool, "Launch").await;
    let ticket = TicketRepo::create(&pool, &new_ticket(&project.id, "Draft release notes"))
        .await
        .unwrap();

    let moved = TicketRepo::update(
        &pool,
        &ticket.id,
        &UpdateTicket {
            status: Some(TicketStatus::InProgress),
            ..UpdateTicket::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(moved.status, TicketStatus::InProgress);
    assert_eq!(moved.title, "Draft release notes");

    assert!(TicketRepo::delete(&pool, &ticket.id).await.unwrap());
    assert!(TicketRepo::find_by_id(&pool, &ticket.id).await.unwrap().is_none());
    assert!(!TicketRepo::delete(&pool, &ticket.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_project_cascades_to_tickets(pool: PgPool) {
    let project = seed_project(&pool, "Doomed").await;
    let keep = seed_project(&pool, "Keep").await;
    let doomed = TicketRepo::create(&pool, &new_ticket(&project.id, "gone"))
        .await
        .unwrap();
    let kept = TicketRepo::create(&pool, &new_ticket(&keep.id, "stays"))
        .await
        .unwrap();

    assert!(ProjectRepo::delete(&pool, &project.id).await.unwrap());

    assert!(TicketRepo::find_by_id(&pool, &doomed.id).await.unwrap().is_none());
    assert!(TicketRepo::find_by_id(&pool, &kept.id).await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Row decoding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_row_with_unknown_status_fails_to_decode(pool: PgPool) {
    let project = seed_project(&pool, "Legacy").await;

    // Simulate a row written outside the application's constraints.
    sqlx::query("ALTER TABLE tickets DROP CONSTRAINT ck_tickets_status")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO tickets (id, title, status, project_id) VALUES ('bad', 'x', 'blocked', $1)",
    )
    .bind(&project.id)
    .execute(&pool)
    .await
    .unwrap();

    let err = TicketRepo::find_by_id(&pool, "bad")
        .await
        .expect_err("unknown status must not decode");
    assert!(
        matches!(err, sqlx::Error::ColumnDecode { .. }),
        "expected a status decode error, got {err:?}"
    );
}
