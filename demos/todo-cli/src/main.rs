//! CLI demo driving the store end-to-end.
//!
//! Creates a few todos, completes one, prints the derived statistics,
//! demonstrates user isolation and the route guards, and leaves its data
//! directory behind so a second run starts from the persisted mirror.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskstore_auth::guards::{admin_guard, auth_guard};
use taskstore_auth::{Role, Session, User};
use taskstore_core::environment::TodoEnvironment;
use taskstore_core::todo::{CreateTodoRequest, Priority, TodoPatch, TodoStatus, UserId};
use taskstore_runtime::TodoStore;
use taskstore_storage::JsonFileStore;

async fn print_todos(store: &TodoStore) {
    for todo in store.get_all_todos().await {
        let mark = match todo.status {
            TodoStatus::Done => "✓",
            TodoStatus::InProgress => "~",
            TodoStatus::Todo => " ",
        };
        println!("  [{mark}] {} ({})", todo.title, todo.priority);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let data_dir = std::env::temp_dir().join("taskstore-demo");
    info!(dir = %data_dir.display(), "using data directory");

    let storage = Arc::new(JsonFileStore::new(&data_dir));
    let store = TodoStore::new(storage, TodoEnvironment::system());
    store.init().await;

    let mut failures = store.subscribe_storage_failures();

    println!("=== Taskstore Demo ===\n");
    println!("Signed in as user {}\n", store.current_user());

    println!("Creating todos...");
    let milk = store
        .create_todo(
            CreateTodoRequest::new("Buy milk", Priority::Low, store.current_user())
                .with_description("2 liters, lactose free"),
        )
        .await;
    store
        .create_todo(CreateTodoRequest::new(
            "Write documentation",
            Priority::Medium,
            store.current_user(),
        ))
        .await;
    store
        .create_todo(CreateTodoRequest::new(
            "Fix the deploy pipeline",
            Priority::High,
            store.current_user(),
        ))
        .await;
    print_todos(&store).await;

    println!("\nCompleting 'Buy milk'...");
    let completed = store
        .update_todo(milk.id, TodoPatch::new().with_status(TodoStatus::Done))
        .await;
    info!(updated = completed.is_some(), "update applied");
    print_todos(&store).await;

    let stats = store.stats();
    println!(
        "\nStats: {}/{} done ({:.0}%), {} high priority",
        stats.completed, stats.total, stats.completion_rate, stats.high_priority
    );

    println!("\nSwitching to user 2...");
    store.set_current_user(UserId::new(2)).await;
    println!("User 2 sees {} todos", store.get_all_todos().await.len());

    println!("\nSwitching back to user 1...");
    store.set_current_user(UserId::new(1)).await;
    println!("User 1 sees {} todos", store.get_all_todos().await.len());

    println!("\nDeleting 'Buy milk'...");
    let deleted = store.delete_todo(milk.id).await;
    println!("Deleted: {deleted}");
    print_todos(&store).await;

    // Route guards, as the routing layer would consult them.
    let session = Session::signed_in(User::new(UserId::new(1), "alice", Role::User));
    let user = session.current_user();
    println!("\nGuards for {:?}:", user.as_ref().map(|u| u.username.clone()));
    println!("  auth:  {:?}", auth_guard(user.as_ref()));
    println!("  admin: {:?}", admin_guard(user.as_ref()));

    if failures.has_changed().unwrap_or(false) {
        if let Some(failure) = failures.borrow_and_update().clone() {
            println!("\nA persistence failure was reported: {failure}");
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
