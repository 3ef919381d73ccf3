//! Diesel repositories against a real Postgres.
//!
//! Requires a container runtime (Docker or Podman):
//!
//!   cargo test --test repository_test -- --include-ignored

mod common;

use common::{insert_user, setup_db};
use order_service::domain::order::{OrderDraft, OrderSize, OrderStatus};
use order_service::domain::ports::{OrderRepository, UserRepository};
use order_service::infrastructure::order_repo::DieselOrderRepository;
use order_service::infrastructure::user_repo::DieselUserRepository;
use uuid::Uuid;

fn draft(quantity: i32) -> OrderDraft {
    OrderDraft {
        size: OrderSize::Medium,
        quantity,
    }
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn create_and_find_by_id_roundtrip() {
    let (_container, pool) = setup_db().await;
    let customer_id = insert_user(&pool, "alice", false);
    let repo = DieselOrderRepository::new(pool);

    let created = repo.create(customer_id, &draft(2)).expect("create failed");

    let order = repo
        .find_by_id(created.id)
        .expect("find failed")
        .expect("order should exist");

    assert_eq!(order, created);
    assert_eq!(order.customer_id, customer_id);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.quantity, 2);
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn create_for_unknown_customer_fails() {
    let (_container, pool) = setup_db().await;
    let repo = DieselOrderRepository::new(pool);

    let result = repo.create(Uuid::new_v4(), &draft(1));

    assert!(result.is_err(), "foreign key must reject unknown customers");
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn find_by_id_returns_none_for_unknown_id() {
    let (_container, pool) = setup_db().await;
    let repo = DieselOrderRepository::new(pool);

    let result = repo
        .find_by_id(Uuid::new_v4())
        .expect("find should not error");

    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn list_returns_empty_when_no_orders() {
    let (_container, pool) = setup_db().await;
    let repo = DieselOrderRepository::new(pool);

    assert!(repo.list().expect("list failed").is_empty());
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn list_by_customer_filters_on_owner() {
    let (_container, pool) = setup_db().await;
    let alice = insert_user(&pool, "alice", false);
    let bob = insert_user(&pool, "bob", false);
    let repo = DieselOrderRepository::new(pool);

    for _ in 0..3 {
        repo.create(alice, &draft(1)).expect("create failed");
    }
    repo.create(bob, &draft(1)).expect("create failed");

    assert_eq!(repo.list().expect("list failed").len(), 4);

    let alices = repo.list_by_customer(alice).expect("list failed");
    assert_eq!(alices.len(), 3);
    assert!(alices.iter().all(|o| o.customer_id == alice));

    let nobody = repo.list_by_customer(Uuid::new_v4()).expect("list failed");
    assert!(nobody.is_empty());
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn save_updates_mutable_fields_only() {
    let (_container, pool) = setup_db().await;
    let customer_id = insert_user(&pool, "alice", false);
    let repo = DieselOrderRepository::new(pool);
    let created = repo.create(customer_id, &draft(1)).expect("create failed");

    let mut changed = created.clone();
    changed.status = OrderStatus::Delivered;
    changed.quantity = 9;
    let saved = repo
        .save(&changed)
        .expect("save failed")
        .expect("order should exist");

    assert_eq!(saved.status, OrderStatus::Delivered);
    assert_eq!(saved.quantity, 9);
    assert_eq!(saved.customer_id, created.customer_id);
    assert_eq!(saved.created_at, created.created_at);
    assert!(saved.updated_at >= created.updated_at);
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn delete_reports_whether_a_row_was_removed() {
    let (_container, pool) = setup_db().await;
    let customer_id = insert_user(&pool, "alice", false);
    let repo = DieselOrderRepository::new(pool);
    let created = repo.create(customer_id, &draft(1)).expect("create failed");

    assert!(repo.delete(created.id).expect("delete failed"));
    assert!(!repo.delete(created.id).expect("delete failed"));
    assert!(repo.save(&created).expect("save failed").is_none());
}

// ── users ─────────────────────────────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn user_lookup_reads_staff_flag() {
    let (_container, pool) = setup_db().await;
    let admin = insert_user(&pool, "admin", true);
    let repo = DieselUserRepository::new(pool);

    let user = repo
        .find_by_id(admin)
        .expect("find failed")
        .expect("user should exist");

    assert_eq!(user.username, "admin");
    assert!(user.is_staff);
}

#[tokio::test]
#[ignore = "requires a container runtime for Postgres"]
async fn user_lookup_returns_none_for_unknown_id() {
    let (_container, pool) = setup_db().await;
    let repo = DieselUserRepository::new(pool);

    assert!(repo
        .find_by_id(Uuid::new_v4())
        .expect("find should not error")
        .is_none());
}
