// SPDX-FileCopyrightText: 2026 Nudge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end integration tests for the complete Nudge pipeline.
//!
//! Each test creates an isolated TestHarness with temp SQLite and mock
//! collaborators. Tests are independent and order-insensitive.

use chrono::{DateTime, Utc};
use nudge_core::types::{
    ConversationId, ExecutorKind, NewReminder, Reply, ReplyMessage, SourceKind, StatusKind,
};
use nudge_core::{NudgeError, Scheduler};
use nudge_test_utils::TestHarness;

fn conv(source_id: &str) -> ConversationId {
    ConversationId::from_source(SourceKind::User, source_id)
}

async fn status_of(harness: &TestHarness, source_id: &str) -> Option<StatusKind> {
    harness
        .status_store()
        .get_status(&conv(source_id))
        .await
        .unwrap()
        .map(|status| status.kind)
}

fn first_menu(reply: &Reply) -> (&String, &Vec<nudge_core::types::MenuChoice>) {
    reply
        .messages
        .iter()
        .find_map(|message| match message {
            ReplyMessage::Menu { title, choices } => Some((title, choices)),
            ReplyMessage::Text(_) => None,
        })
        .expect("reply should contain a menu")
}

// ---- Trigger keywords ----

#[tokio::test]
async fn shopping_trigger_on_neutral_enters_shopping_with_empty_menu() {
    let harness = TestHarness::builder().build().await.unwrap();

    assert_eq!(status_of(&harness, "c1").await, None);

    let reply = harness
        .send_text("c1", "shopping list")
        .await
        .unwrap()
        .expect("trigger should reply");

    assert_eq!(status_of(&harness, "c1").await, Some(StatusKind::Shopping));

    let (title, choices) = first_menu(&reply);
    assert_eq!(title, "Your shopping list is empty.");
    assert_eq!(choices.len(), 1, "empty list offers an add choice only");
    assert_eq!(choices[0].postback, "Shopping#add");
}

#[tokio::test]
async fn trigger_keyword_preempts_current_state() {
    let harness = TestHarness::builder().build().await.unwrap();

    // Get into ShoppingAdd, then hit the reminder trigger.
    harness.send_text("c1", "shopping").await.unwrap();
    harness.send_postback("c1", "Shopping#add").await.unwrap();
    assert_eq!(
        status_of(&harness, "c1").await,
        Some(StatusKind::ShoppingAdd)
    );

    let reply = harness
        .send_text("c1", "reminder please")
        .await
        .unwrap()
        .expect("trigger should reply");
    let (title, _) = first_menu(&reply);
    assert_eq!(title, "No reminders yet.");
    assert_eq!(status_of(&harness, "c1").await, Some(StatusKind::Neutral));
}

#[tokio::test]
async fn weather_trigger_replies_with_report() {
    let harness = TestHarness::builder().build().await.unwrap();

    let reply = harness
        .send_text("c1", "weather?")
        .await
        .unwrap()
        .expect("weather trigger should reply");
    match &reply.messages[0] {
        ReplyMessage::Text(text) => {
            assert!(text.contains("Testville"), "got: {text}");
        }
        other => panic!("expected text reply, got {other:?}"),
    }
}

#[tokio::test]
async fn non_trigger_text_on_neutral_is_a_noop() {
    let harness = TestHarness::builder().build().await.unwrap();
    let reply = harness.send_text("c1", "hello there").await.unwrap();
    assert!(reply.is_none());
    assert_eq!(status_of(&harness, "c1").await, None);
}

// ---- Shopping flows ----

#[tokio::test]
async fn shopping_add_splits_lines_in_order_and_reverts_status() {
    let harness = TestHarness::builder().build().await.unwrap();

    harness.send_text("c1", "shopping").await.unwrap();
    harness.send_postback("c1", "Shopping#add").await.unwrap();
    assert_eq!(
        status_of(&harness, "c1").await,
        Some(StatusKind::ShoppingAdd)
    );

    let reply = harness
        .send_text("c1", "apples\nbread\n")
        .await
        .unwrap()
        .expect("add should redisplay the menu");

    let items = harness.shopping_store().list_items(&conv("c1")).await.unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["apples", "bread"]);
    assert_eq!(status_of(&harness, "c1").await, Some(StatusKind::Shopping));

    let (title, _) = first_menu(&reply);
    assert_eq!(title, "1. apples\n2. bread");
}

#[tokio::test]
async fn blank_and_padded_lines_are_dropped_on_add() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_postback("c1", "Shopping#add").await.unwrap();
    harness
        .send_text("c1", "  milk  \n\n\n eggs\n   \n")
        .await
        .unwrap();

    let items = harness.shopping_store().list_items(&conv("c1")).await.unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["milk", "eggs"]);
}

#[tokio::test]
async fn delete_confirm_wipes_all_items() {
    let harness = TestHarness::builder().build().await.unwrap();

    harness.send_postback("c1", "Shopping#add").await.unwrap();
    harness.send_text("c1", "a\nb\nc").await.unwrap();
    assert_eq!(
        harness.shopping_store().list_items(&conv("c1")).await.unwrap().len(),
        3
    );

    // Confirmation menu first, no state change and no deletion yet.
    let reply = harness
        .send_postback("c1", "Shopping#delete")
        .await
        .unwrap()
        .unwrap();
    let (title, choices) = first_menu(&reply);
    assert_eq!(title, "Delete all 3 items?");
    assert_eq!(choices[0].postback, "Shopping#deleteConfirm");
    assert_eq!(choices[1].postback, "Shopping#deleteCancel");
    assert_eq!(
        harness.shopping_store().list_items(&conv("c1")).await.unwrap().len(),
        3
    );

    let reply = harness
        .send_postback("c1", "Shopping#deleteConfirm")
        .await
        .unwrap()
        .unwrap();
    assert!(harness.shopping_store().list_items(&conv("c1")).await.unwrap().is_empty());
    assert_eq!(status_of(&harness, "c1").await, Some(StatusKind::Shopping));
    let (title, _) = first_menu(&reply);
    assert_eq!(title, "Your shopping list is empty.");
}

#[tokio::test]
async fn delete_cancel_keeps_items() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_postback("c1", "Shopping#add").await.unwrap();
    harness.send_text("c1", "a\nb").await.unwrap();

    harness.send_postback("c1", "Shopping#delete").await.unwrap();
    harness
        .send_postback("c1", "Shopping#deleteCancel")
        .await
        .unwrap();

    assert_eq!(
        harness.shopping_store().list_items(&conv("c1")).await.unwrap().len(),
        2
    );
    assert_eq!(status_of(&harness, "c1").await, Some(StatusKind::Shopping));
}

#[tokio::test]
async fn tokenizer_delete_by_index_removes_listed_row() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_postback("c1", "Shopping#add").await.unwrap();
    harness.send_text("c1", "apples\nbread\nmilk").await.unwrap();

    // Status is Shopping again; free text goes through the tokenizer.
    let reply = harness
        .send_text("c1", "delete 2")
        .await
        .unwrap()
        .expect("delete should redisplay the menu");

    let items = harness.shopping_store().list_items(&conv("c1")).await.unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["apples", "milk"]);

    let (title, _) = first_menu(&reply);
    assert_eq!(title, "1. apples\n2. milk");
}

#[tokio::test]
async fn unrecognized_text_in_shopping_state_is_a_noop() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness.send_postback("c1", "Shopping#add").await.unwrap();
    harness.send_text("c1", "apples").await.unwrap();

    let reply = harness.send_text("c1", "what a nice day").await.unwrap();
    assert!(reply.is_none());
    assert_eq!(
        harness.shopping_store().list_items(&conv("c1")).await.unwrap().len(),
        1
    );
}

// ---- Reminder flows ----

#[tokio::test]
async fn reminder_add_flow_persists_daily_scheduler_in_presentation_offset() {
    let harness = TestHarness::builder()
        .with_presentation_offset_hours(9)
        .build()
        .await
        .unwrap();

    let reply = harness
        .send_postback("c1", "Reminder#add")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        status_of(&harness, "c1").await,
        Some(StatusKind::ReminderAdd)
    );
    let (_, choices) = first_menu(&reply);
    assert_eq!(choices[0].postback, "Reminder#add#shoppingList");

    let reply = harness
        .send_postback("c1", "Reminder#add#shoppingList")
        .await
        .unwrap()
        .unwrap();
    let (_, choices) = first_menu(&reply);
    assert_eq!(choices[0].postback, "Reminder#add#shoppingList#datetime");

    harness
        .send_postback("c1", "Reminder#add#shoppingList#2021-07-07T23:59")
        .await
        .unwrap()
        .unwrap();

    let reminders = harness.reminder_store().list_reminders(&conv("c1")).await.unwrap();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].executor, ExecutorKind::ShoppingList);
    assert_eq!(
        reminders[0].scheduler.to_string(),
        "d#2021-07-07T23:59:00+09:00"
    );
    assert_eq!(status_of(&harness, "c1").await, Some(StatusKind::Neutral));
}

#[tokio::test]
async fn unparsable_picked_time_fails_the_event() {
    let harness = TestHarness::builder().build().await.unwrap();
    let err = harness
        .send_postback("c1", "Reminder#add#shoppingList#datetime")
        .await
        .unwrap_err();
    assert!(matches!(err, NudgeError::Validation(_)));
    assert!(harness.reminder_store().list_reminders(&conv("c1")).await.unwrap().is_empty());
}

#[tokio::test]
async fn reminder_delete_flow_confirms_then_deletes() {
    let harness = TestHarness::builder().build().await.unwrap();
    harness
        .send_postback("c1", "Reminder#add#shoppingList#2021-07-07T08:00")
        .await
        .unwrap();
    let reminders = harness.reminder_store().list_reminders(&conv("c1")).await.unwrap();
    let id = reminders[0].id;

    let reply = harness
        .send_postback("c1", &format!("Reminder#delete#{id}"))
        .await
        .unwrap()
        .unwrap();
    let (_, choices) = first_menu(&reply);
    assert_eq!(choices[0].postback, format!("Reminder#delete#confirm#{id}"));
    // Confirmation alone deletes nothing.
    assert_eq!(
        harness.reminder_store().list_reminders(&conv("c1")).await.unwrap().len(),
        1
    );

    harness
        .send_postback("c1", &format!("Reminder#delete#confirm#{id}"))
        .await
        .unwrap()
        .unwrap();
    assert!(harness.reminder_store().list_reminders(&conv("c1")).await.unwrap().is_empty());

    // A second confirm falls back to the tagged not-found path.
    let reply = harness
        .send_postback("c1", &format!("Reminder#delete#confirm#{id}"))
        .await
        .unwrap()
        .unwrap();
    match &reply.messages[0] {
        ReplyMessage::Text(text) => assert_eq!(text, "That reminder is already gone."),
        other => panic!("expected text reply, got {other:?}"),
    }
}

// ---- Routing edges ----

#[tokio::test]
async fn allow_list_drops_unlisted_conversations() {
    let harness = TestHarness::builder()
        .with_allowed_conversations(vec!["user:allowed".to_string()])
        .build()
        .await
        .unwrap();

    let dropped = harness.send_text("outsider", "shopping").await.unwrap();
    assert!(dropped.is_none());
    assert_eq!(status_of(&harness, "outsider").await, None);

    let replied = harness.send_text("allowed", "shopping").await.unwrap();
    assert!(replied.is_some());
}

#[tokio::test]
async fn malformed_postback_fails_the_event() {
    let harness = TestHarness::builder().build().await.unwrap();
    let err = harness.send_postback("c1", "Shopping#").await.unwrap_err();
    assert!(matches!(err, NudgeError::Validation(_)));

    let err = harness
        .send_postback("c1", "Gardening#water")
        .await
        .unwrap_err();
    assert!(matches!(err, NudgeError::Validation(_)));
}

#[tokio::test]
async fn event_batch_is_processed_sequentially() {
    use nudge_core::types::InboundEvent;

    let harness = TestHarness::builder().build().await.unwrap();
    let events = vec![
        InboundEvent::postback(SourceKind::User, "c1", "Shopping#add"),
        InboundEvent::text(SourceKind::User, "c1", "apples\nbread"),
        InboundEvent::text(SourceKind::User, "c1", "delete 1"),
    ];
    let replies = harness.router.handle_events(&events).await.unwrap();
    assert_eq!(replies.len(), 3);

    let items = harness.shopping_store().list_items(&conv("c1")).await.unwrap();
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["bread"]);
}

// ---- Sync engine over real storage ----

#[tokio::test]
async fn sync_pass_groups_due_reminders_and_skips_exhausted() {
    let harness = TestHarness::builder().build().await.unwrap();
    let now: DateTime<Utc> = "2021-04-01T12:00:00Z".parse().unwrap();

    let fixed = |s: &str| chrono::DateTime::parse_from_rfc3339(s).unwrap();
    let store = harness.reminder_store();
    for (conversation, scheduler) in [
        // Due within the 2h window.
        ("a", Scheduler::Oneshot(fixed("2021-04-01T12:30:00Z"))),
        ("a", Scheduler::Daily(fixed("2000-01-01T13:00:00Z"))),
        ("b", Scheduler::Oneshot(fixed("2021-04-01T13:30:00Z"))),
        // Exhausted: silently dropped, never synced again.
        ("a", Scheduler::Oneshot(fixed("2021-03-01T00:00:00Z"))),
        // Beyond the window.
        ("b", Scheduler::Oneshot(fixed("2021-04-02T12:00:00Z"))),
    ] {
        store
            .create_reminder(&NewReminder {
                name: "shopping list".to_string(),
                conversation_id: conv(conversation),
                scheduler,
                executor: ExecutorKind::ShoppingList,
            })
            .await
            .unwrap();
    }

    let report = harness.engine.run_once(now).await.unwrap();
    assert_eq!(report.loaded, 5);
    assert_eq!(report.due, 3);
    assert_eq!(report.groups, 2);

    let calls = harness.synchronizer.calls().await;
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].conversation_id.as_str(), "user:a");
    assert_eq!(calls[0].task_ids.len(), 2);
    assert_eq!(calls[1].conversation_id.as_str(), "user:b");
    assert_eq!(calls[1].task_ids, vec!["nudge-user:b-3".to_string()]);

    // Re-running the same window yields the same desired task set.
    harness.synchronizer.clear().await;
    let second = harness.engine.run_once(now).await.unwrap();
    assert_eq!(second, report);
}

#[tokio::test]
async fn sync_failure_for_one_group_fails_the_run() {
    let harness = TestHarness::builder().build().await.unwrap();
    let now: DateTime<Utc> = "2021-04-01T12:00:00Z".parse().unwrap();

    let fixed = |s: &str| chrono::DateTime::parse_from_rfc3339(s).unwrap();
    for conversation in ["a", "b"] {
        harness
            .reminder_store()
            .create_reminder(&NewReminder {
                name: "shopping list".to_string(),
                conversation_id: conv(conversation),
                scheduler: Scheduler::Oneshot(fixed("2021-04-01T12:30:00Z")),
                executor: ExecutorKind::ShoppingList,
            })
            .await
            .unwrap();
    }

    harness.synchronizer.fail_for(conv("a")).await;
    let err = harness.engine.run_once(now).await.unwrap_err();
    assert!(matches!(err, NudgeError::TaskQueue { .. }));
}
