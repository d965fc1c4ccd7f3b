mod common;

use common::{GatedTransport, MemoryTable, ScriptedTransport};
use serde_json::json;
use smartsuite_relay::hooks::{self, records_key, HookState, RecordActions};
use smartsuite_relay::model::FieldDescriptor;
use smartsuite_relay::view::{delete_record, RecordEditor};
use smartsuite_relay::ResourceClient;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[tokio::test]
async fn records_without_table_stays_idle_and_silent() {
    let transport = ScriptedTransport::new();
    let client = ResourceClient::new(transport.clone());
    let query = hooks::records(&client, None, None);

    query.activate().await;
    query.refetch().await;

    assert_eq!(query.state(), HookState::idle());
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn record_query_needs_both_ids() {
    let transport = ScriptedTransport::new();
    let client = ResourceClient::new(transport.clone());
    let query = hooks::record(&client, Some("t1"), None);
    query.activate().await;
    assert_eq!(query.state(), HookState::idle());
    assert!(transport.calls().is_empty());

    transport.reply(200, json!({"id": "r1", "title": "A"}));
    query.set_key(hooks::record_key(Some("t1"), Some("r1"))).await;
    assert_eq!(query.data().unwrap().id, "r1");
    assert_eq!(transport.calls()[0].endpoint, "/applications/t1/records/r1/");
}

#[tokio::test]
async fn list_queries_start_loading_and_settle_with_data() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!([{"id": "s1", "name": "Ops"}]));
    let client = ResourceClient::new(transport);
    let query = hooks::solutions(&client);

    assert!(query.is_loading());
    query.activate().await;

    let state = query.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.data.unwrap()[0].id, "s1");
}

#[tokio::test]
async fn network_failure_settles_into_error_state() {
    let transport = ScriptedTransport::new();
    transport.fail("connection refused");
    let client = ResourceClient::new(transport);
    let query = hooks::records(&client, Some("t1"), None);

    query.activate().await;

    let state = query.state();
    assert!(state.data.is_none());
    assert!(!state.loading);
    assert_eq!(state.error.unwrap().status, 0);
}

#[tokio::test]
async fn failed_refetch_replaces_previous_data() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!([{"id": "t1", "name": "Tasks"}]));
    transport.reply(500, json!({}));
    let client = ResourceClient::new(transport);
    let query = hooks::tables(&client);

    query.activate().await;
    assert!(query.data().is_some());
    query.refetch().await;

    assert!(query.data().is_none());
    assert_eq!(query.error().unwrap().message, "SmartSuite server error. Please try again in a few minutes.");
}

#[tokio::test]
async fn key_changes_refetch_only_when_different() {
    let transport = ScriptedTransport::new();
    transport.reply(200, json!({"items": [{"id": "a"}]}));
    transport.reply(200, json!({"items": [{"id": "b"}]}));
    let client = ResourceClient::new(transport.clone());
    let query = hooks::records(&client, Some("t1"), None);

    query.activate().await;
    query.set_key(records_key(Some("t1"), None)).await;
    assert_eq!(transport.calls().len(), 1);

    query.set_key(records_key(Some("t2"), None)).await;
    assert_eq!(transport.calls().len(), 2);
    assert_eq!(transport.calls()[1].endpoint, "/applications/t2/records/list/");
    assert_eq!(query.data().unwrap()[0].id, "b");

    query.set_key(None).await;
    assert_eq!(query.state(), HookState::idle());
    assert_eq!(transport.calls().len(), 2);
}

#[tokio::test]
async fn key_changes_before_activation_do_not_fetch() {
    let transport = ScriptedTransport::new();
    let client = ResourceClient::new(transport.clone());
    let query = hooks::records(&client, None, None);
    query.set_key(records_key(Some("t1"), None)).await;
    assert!(transport.calls().is_empty());
}

#[tokio::test]
async fn stale_result_does_not_overwrite_newer_one() {
    let transport = GatedTransport::new(vec![json!([{"id": "old"}]), json!([{"id": "new"}])]);
    let client = ResourceClient::new(transport.clone());
    let query = Arc::new(hooks::records(&client, Some("t1"), None));

    let first = {
        let query = query.clone();
        tokio::spawn(async move { query.activate().await })
    };
    transport.started.notified().await;

    query.refetch().await;
    assert_eq!(query.data().unwrap()[0].id, "new");

    transport.release.notify_one();
    first.await.unwrap();

    assert_eq!(transport.call_count(), 2);
    assert_eq!(query.data().unwrap()[0].id, "new");
}

#[tokio::test]
async fn disposed_query_ignores_late_results() {
    let transport = GatedTransport::new(vec![json!([{"id": "late"}])]);
    let client = ResourceClient::new(transport.clone());
    let query = Arc::new(hooks::records(&client, Some("t1"), None));

    let pending = {
        let query = query.clone();
        tokio::spawn(async move { query.activate().await })
    };
    transport.started.notified().await;
    query.dispose();
    transport.release.notify_one();
    pending.await.unwrap();

    assert!(query.data().is_none());
    assert!(query.is_loading());
}

#[tokio::test]
async fn actions_record_failure_and_return_it() {
    let transport = ScriptedTransport::new();
    transport.reply(422, json!({"title": ["required"]}));
    transport.reply(200, json!({"id": "r1", "title": "A"}));
    let client = ResourceClient::new(transport);
    let actions = RecordActions::new(&client);

    let err = actions
        .create_record("t1", &serde_json::Map::new())
        .await
        .unwrap_err();
    assert_eq!(err.status, 422);
    let state = actions.state();
    assert!(!state.loading);
    assert_eq!(state.error, Some(err));

    let mut fields = serde_json::Map::new();
    fields.insert("title".into(), json!("A"));
    let record = actions.create_record("t1", &fields).await.unwrap();
    assert_eq!(record.id, "r1");
    assert!(actions.error().is_none());
    assert!(!actions.is_loading());
}

#[tokio::test]
async fn created_record_shows_up_after_refetch() {
    let table = MemoryTable::new();
    let client = ResourceClient::new(table.clone());
    let records = hooks::records(&client, Some("t1"), None);
    let actions = RecordActions::new(&client);
    let title: FieldDescriptor =
        serde_json::from_value(json!({"slug": "title", "label": "Title", "field_type": "recordtitlefield"})).unwrap();

    records.activate().await;
    assert_eq!(records.data().unwrap().len(), 0);

    let mut editor = RecordEditor::create("t1");
    editor.set_input(&title, "Write report");
    let created = editor.submit(&actions, &records).await.unwrap();

    assert!(!editor.is_open());
    let items = records.data().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, created.id);
    assert_eq!(items[0].get("title"), Some(&json!("Write report")));

    delete_record(&actions, &records, "t1", &created.id).await.unwrap();
    assert!(records.data().unwrap().is_empty());
}

#[tokio::test]
async fn failed_submit_keeps_editor_open_without_refetch() {
    let table = MemoryTable::new();
    let client = ResourceClient::new(table.clone());
    let records = hooks::records(&client, Some("t1"), None);
    let actions = RecordActions::new(&client);
    records.activate().await;
    let lists_before = table.list_calls.load(Ordering::SeqCst);

    let mut editor = RecordEditor::create("t1");
    let err = editor.submit(&actions, &records).await.unwrap_err();

    assert_eq!(err.status, 422);
    assert!(editor.is_open());
    assert_eq!(
        editor.error(),
        Some("Validation error. Please check your input data.\n\nField errors:\ntitle: This field is required.")
    );
    assert_eq!(table.list_calls.load(Ordering::SeqCst), lists_before);
    assert_eq!(actions.error().unwrap().status, 422);
}
