#![cfg(test)]

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use support_desk::{
    Priority,
    base::{
        config::{Config, ConfigInner},
        types::{Actor, Res, Role},
    },
    classify,
    cli::{KbAction, KbArgs},
    interaction::knowledge_base::KnowledgeBase,
    runtime::Runtime,
    service::kb::{GenericKbStore, KbStore, NewQaPair, QaPair},
    triage::intake::{SupportRequest, sort_by_priority},
};

// Mocks.

// Mock store for checking the role boundary without a database.

mock! {
    pub Store {}

    #[async_trait]
    impl GenericKbStore for Store {
        async fn list_pairs(&self) -> Res<Vec<QaPair>>;
        async fn get_pair(&self, id: i64) -> Res<Option<QaPair>>;
        async fn create_pair(&self, pair: NewQaPair) -> Res<QaPair>;
        async fn update_pair(&self, id: i64, pair: NewQaPair) -> Res<Option<QaPair>>;
        async fn delete_pair(&self, id: i64) -> Res<bool>;
    }
}

fn admin() -> Actor {
    Actor::new("ana", Role::Admin)
}

fn user() -> Actor {
    Actor::new("bo", Role::User)
}

/// Helper function to setup a runtime over a fresh in-memory store.
async fn setup_test_runtime(role: Role) -> Runtime {
    let config = Config::from(ConfigInner {
        operator_name: "tester".to_string(),
        operator_role: role,
        ..Default::default()
    });

    let store = KbStore::surreal_memory().await.expect("Failed to create store");

    Runtime::with_store(config, store)
}

fn kb_args(action: KbAction) -> KbArgs {
    KbArgs { json: false, action }
}

#[test]
fn test_classifier_example_table() {
    assert_eq!(classify("The app is broken and urgent"), Priority::High);
    assert_eq!(classify("I need help with a question"), Priority::Medium);
    assert_eq!(classify("What are your business hours?"), Priority::Low);
    assert_eq!(classify(""), Priority::Low);
    assert_eq!(classify("CRITICAL: system down"), Priority::High);
    assert_eq!(classify("The system reissued the ticket"), Priority::Medium);
}

#[test]
fn test_classifier_is_shareable_across_threads() {
    let handles: Vec<_> = (0..4).map(|_| std::thread::spawn(|| classify("URGENT issue"))).collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), Priority::High);
    }
}

#[test]
fn test_intake_queue_ordering() {
    let mut queue: Vec<_> = ["Do you have gift cards?", "Small concern about my order", "Checkout crashed"]
        .into_iter()
        .map(SupportRequest::new)
        .collect();

    sort_by_priority(&mut queue);

    let priorities: Vec<_> = queue.iter().map(|r| r.priority).collect();
    assert_eq!(priorities, vec![Priority::High, Priority::Medium, Priority::Low]);
}

#[tokio::test]
async fn test_non_admin_never_reaches_store() {
    let mut mock = MockStore::new();
    mock.expect_list_pairs().never();
    mock.expect_get_pair().never();
    mock.expect_create_pair().never();
    mock.expect_update_pair().never();
    mock.expect_delete_pair().never();

    let kb = KnowledgeBase::new(KbStore::new(Arc::new(mock)));
    let actor = user();

    assert!(kb.list(&actor).await.is_err());
    assert!(kb.get(&actor, 1).await.is_err());
    assert!(kb.create(&actor, NewQaPair::new("q", "a")).await.is_err());
    assert!(kb.update(&actor, 1, NewQaPair::new("q", "a")).await.is_err());
    assert!(kb.delete(&actor, 1).await.is_err());

    let err = kb.search(&actor, "q").await.unwrap_err();
    assert_eq!(err.to_string(), "bo is not allowed to manage the knowledge base");
}

#[tokio::test]
async fn test_blank_fields_never_reach_store() {
    let mut mock = MockStore::new();
    mock.expect_create_pair().never();
    mock.expect_update_pair().never();

    let kb = KnowledgeBase::new(KbStore::new(Arc::new(mock)));

    assert!(kb.create(&admin(), NewQaPair::new("   ", "answer")).await.is_err());
    assert!(kb.update(&admin(), 1, NewQaPair::new("question", "")).await.is_err());
}

#[tokio::test]
async fn test_store_errors_propagate() {
    let mut mock = MockStore::new();
    mock.expect_list_pairs().returning(|| Err(anyhow::anyhow!("connection lost")));

    let kb = KnowledgeBase::new(KbStore::new(Arc::new(mock)));

    let err = kb.list(&admin()).await.unwrap_err();
    assert_eq!(err.to_string(), "connection lost");
}

#[tokio::test]
async fn test_knowledge_base_crud_round_trip() {
    let store = KbStore::surreal_memory().await.expect("Failed to create store");
    let kb = KnowledgeBase::new(store);
    let actor = admin();

    let created = kb.create(&actor, NewQaPair::new("  How do I track my order?  ", "Use the tracking link in your email.")).await.unwrap();
    assert_eq!(created.question, "How do I track my order?");

    let fetched = kb.get(&actor, created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = kb.update(&actor, created.id, NewQaPair::new("How do I track my parcel?", "See the Orders page.")).await.unwrap();
    assert_eq!(updated.answer, "See the Orders page.");

    kb.create(&actor, NewQaPair::new("What is your refund policy?", "30 days, no questions asked.")).await.unwrap();

    let found = kb.search(&actor, "ORDERS").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, created.id);

    kb.delete(&actor, created.id).await.unwrap();

    let err = kb.get(&actor, created.id).await.unwrap_err();
    assert_eq!(err.to_string(), format!("Q&A pair {} not found", created.id));
    assert!(kb.delete(&actor, created.id).await.is_err());
    assert!(kb.update(&actor, created.id, NewQaPair::new("q", "a")).await.is_err());
    assert_eq!(kb.list(&actor).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_runtime_executes_kb_commands_as_operator() {
    let runtime = setup_test_runtime(Role::Admin).await;

    let output = runtime
        .execute_kb(&kb_args(KbAction::Create {
            question: "Do you ship abroad?".to_string(),
            answer: "Yes, to most countries.".to_string(),
        }))
        .await
        .unwrap();
    assert_eq!(output, "#1 Q: Do you ship abroad?\n   A: Yes, to most countries.");

    let output = runtime.execute_kb(&kb_args(KbAction::Search { query: "abroad".to_string() })).await.unwrap();
    assert!(output.starts_with("#1 Q: Do you ship abroad?"));

    let json = runtime
        .execute_kb(&KbArgs {
            json: true,
            action: KbAction::List,
        })
        .await
        .unwrap();
    let pairs: Vec<QaPair> = serde_json::from_str(&json).unwrap();
    assert_eq!(pairs.len(), 1);

    let output = runtime.execute_kb(&kb_args(KbAction::Delete { id: 1 })).await.unwrap();
    assert_eq!(output, "Deleted Q&A pair 1.");

    let output = runtime.execute_kb(&kb_args(KbAction::List)).await.unwrap();
    assert_eq!(output, "No Q&A pairs.");
}

#[tokio::test]
async fn test_runtime_rejects_non_admin_operator() {
    let runtime = setup_test_runtime(Role::User).await;

    let err = runtime.execute_kb(&kb_args(KbAction::List)).await.unwrap_err();

    assert_eq!(err.to_string(), "tester is not allowed to manage the knowledge base");
}

#[tokio::test]
async fn test_kb_commands_persist_across_runtimes() {
    let dir = std::env::temp_dir().join(format!("support-desk-runtime-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let config = Config::from(ConfigInner {
        db_endpoint: format!("surrealkv://{}", dir.display()),
        operator_role: Role::Admin,
        ..Default::default()
    });

    let runtime = Runtime::new(config.clone()).await.expect("Failed to create runtime");
    runtime
        .execute_kb(&kb_args(KbAction::Create {
            question: "q".to_string(),
            answer: "a".to_string(),
        }))
        .await
        .unwrap();
    drop(runtime);

    // Let the embedded engine shut down before reopening the files.
    tokio::time::sleep(std::time::Duration::from_millis(250)).await;

    let runtime = Runtime::new(config).await.expect("Failed to reopen runtime");
    let output = runtime.execute_kb(&kb_args(KbAction::List)).await.unwrap();
    drop(runtime);

    let _ = std::fs::remove_dir_all(&dir);

    assert_eq!(output, "#1 Q: q\n   A: a");
}
