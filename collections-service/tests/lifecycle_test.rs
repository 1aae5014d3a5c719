mod common;

use collections_core::error::AppError;
use collections_service::models::{ActionLogType, DeactivationReason};
use collections_service::services::LifecycleService;
use collections_service::store::memory::FailurePoint;
use collections_service::store::RecordStore;
use uuid::Uuid;

#[tokio::test]
async fn test_deactivate_records_reason_and_audit_trail() {
    let store = common::store();
    let client = common::client("Rosa");
    let client_id = client.client_id;
    store.seed_client(client).await;
    let actor = Uuid::new_v4();

    LifecycleService::new(store.clone())
        .deactivate(client_id, "MOVED", Some("left the district"), actor)
        .await
        .unwrap();

    let client = store.get_client(client_id).await.unwrap().unwrap();
    assert!(!client.active);
    assert_eq!(client.deactivation_reason, Some(DeactivationReason::Moved));
    assert_eq!(client.deactivated_by, Some(actor));
    assert!(client.deactivated_at.is_some());

    let deactivations = store.deactivations().await;
    assert_eq!(deactivations.len(), 1);
    assert_eq!(deactivations[0].client_id, client_id);
    assert_eq!(deactivations[0].reason, DeactivationReason::Moved);
    assert_eq!(deactivations[0].notes.as_deref(), Some("left the district"));

    let audit = store.audit_entries().await;
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].operation, "DEACTIVATE_CLIENT");
    assert_eq!(audit[0].entity_id, client_id);
}

#[tokio::test]
async fn test_invalid_reason_leaves_client_untouched() {
    let store = common::store();
    let client = common::client("Intacto");
    let client_id = client.client_id;
    store.seed_client(client).await;

    let err = LifecycleService::new(store.clone())
        .deactivate(client_id, "XYZ", None, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let client = store.get_client(client_id).await.unwrap().unwrap();
    assert!(client.active);
    assert!(client.deactivation_reason.is_none());
    assert!(store.deactivations().await.is_empty());
}

#[tokio::test]
async fn test_deactivate_twice_conflicts() {
    let store = common::store();
    let client = common::client("Unica");
    let client_id = client.client_id;
    store.seed_client(client).await;

    let service = LifecycleService::new(store);
    service
        .deactivate(client_id, "OTHER", None, Uuid::new_v4())
        .await
        .unwrap();
    let err = service
        .deactivate(client_id, "OTHER", None, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_deactivate_missing_client_is_not_found() {
    let store = common::store();
    let err = LifecycleService::new(store)
        .deactivate(Uuid::new_v4(), "MOVED", None, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_failed_deactivation_record_rolls_back_activity() {
    let store = common::store();
    let client = common::client("Rollback");
    let client_id = client.client_id;
    store.seed_client(client).await;
    store.fail_once(FailurePoint::InsertDeactivation);

    let err = LifecycleService::new(store.clone())
        .deactivate(client_id, "DISAPPEARED", None, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PartialWrite { .. }));

    let client = store.get_client(client_id).await.unwrap().unwrap();
    assert!(client.active);
    assert!(client.deactivation_reason.is_none());
    assert!(client.deactivated_at.is_none());
    assert!(store.deactivations().await.is_empty());
}

#[tokio::test]
async fn test_audit_failure_does_not_fail_deactivation() {
    let store = common::store();
    let client = common::client("SinAuditoria");
    let client_id = client.client_id;
    store.seed_client(client).await;
    store.fail_once(FailurePoint::InsertAuditEntry);

    LifecycleService::new(store.clone())
        .deactivate(client_id, "DECEASED", None, Uuid::new_v4())
        .await
        .unwrap();

    let client = store.get_client(client_id).await.unwrap().unwrap();
    assert!(!client.active);
    assert_eq!(store.deactivations().await.len(), 1);
    assert!(store.audit_entries().await.is_empty());
}

#[tokio::test]
async fn test_reactivate_clears_metadata_and_logs_entry() {
    let store = common::store();
    let client = common::client("Retorno");
    let client_id = client.client_id;
    store.seed_client(client).await;
    let actor = Uuid::new_v4();

    let service = LifecycleService::new(store.clone());
    service
        .deactivate(client_id, "MOVED", None, actor)
        .await
        .unwrap();
    service
        .reactivate(client_id, "came back to the neighborhood", actor)
        .await
        .unwrap();

    let client = store.get_client(client_id).await.unwrap().unwrap();
    assert!(client.active);
    assert!(client.deactivation_reason.is_none());
    assert!(client.deactivated_at.is_none());
    assert!(client.deactivated_by.is_none());

    let logs = store.list_action_logs(client_id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action_type, ActionLogType::Reactivation);
    assert_eq!(logs[0].description, "came back to the neighborhood");
}

#[tokio::test]
async fn test_reactivate_active_client_conflicts() {
    let store = common::store();
    let client = common::client("YaActivo");
    let client_id = client.client_id;
    store.seed_client(client).await;

    let err = LifecycleService::new(store)
        .reactivate(client_id, "noop", Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_failed_reactivation_log_restores_flag_but_not_metadata() {
    let store = common::store();
    let client = common::client("Asimetria");
    let client_id = client.client_id;
    store.seed_client(client).await;

    let service = LifecycleService::new(store.clone());
    service
        .deactivate(client_id, "MOVED", None, Uuid::new_v4())
        .await
        .unwrap();

    store.fail_once(FailurePoint::InsertActionLog);
    let err = service
        .reactivate(client_id, "attempt", Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::PartialWrite { .. }));

    // The flag compensation lands; the metadata cleared by the first write
    // stays cleared.
    let client = store.get_client(client_id).await.unwrap().unwrap();
    assert!(!client.active);
    assert!(client.deactivation_reason.is_none());
    assert!(store.list_action_logs(client_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_lifecycle_round_trip_preserves_history() {
    let store = common::store();
    let client = common::client("Historial");
    let client_id = client.client_id;
    store.seed_client(client).await;
    store.seed_sale(common::sale(client_id, "S-0001", 700, 20)).await;
    let actor = Uuid::new_v4();

    let service = LifecycleService::new(store.clone());
    service
        .deactivate(client_id, "OTHER", Some("seasonal"), actor)
        .await
        .unwrap();
    service.reactivate(client_id, "back", actor).await.unwrap();

    let sales = store.list_sales(client_id).await.unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].sale_number, "S-0001");
    assert_eq!(store.deactivations().await.len(), 1);
}
