mod common;

use collections_core::error::AppError;
use collections_service::models::{
    ClientFilter, DeactivationReason, DebtStatus, InstallmentStatus, RatingCategory, StatusFilter,
};
use collections_service::services::ClientService;
use collections_service::store::RecordStore;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::test]
async fn test_invalid_birthday_month_is_rejected() {
    let store = common::store();
    let filter = ClientFilter {
        birthday_month: Some(13),
        ..Default::default()
    };
    let err = ClientService::new(store)
        .filter_clients(&filter)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_results_sort_case_insensitively_by_name() {
    let store = common::store();
    store.seed_client(common::client("bravo")).await;
    store.seed_client(common::client("Alpha")).await;
    store.seed_client(common::client("charlie")).await;

    let clients = ClientService::new(store)
        .filter_clients(&ClientFilter::default())
        .await
        .unwrap();
    let names: Vec<&str> = clients.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "bravo", "charlie"]);
}

#[tokio::test]
async fn test_status_filter_and_written_off_alias() {
    let store = common::store();
    store.seed_client(common::client("Activo")).await;
    let mut gone = common::client("Baja");
    gone.active = false;
    gone.deactivation_reason = Some(DeactivationReason::Moved);
    store.seed_client(gone).await;

    let service = ClientService::new(store);

    let active = service
        .filter_clients(&ClientFilter {
            status: Some(StatusFilter::Active),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].name, "Activo");

    for status in [StatusFilter::Inactive, StatusFilter::WrittenOff] {
        let inactive = service
            .filter_clients(&ClientFilter {
                status: Some(status),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(inactive.len(), 1);
        assert_eq!(inactive[0].name, "Baja");
    }
}

#[tokio::test]
async fn test_deactivation_reason_filter() {
    let store = common::store();
    let mut moved = common::client("Mudado");
    moved.active = false;
    moved.deactivation_reason = Some(DeactivationReason::Moved);
    store.seed_client(moved).await;
    let mut deceased = common::client("Fallecido");
    deceased.active = false;
    deceased.deactivation_reason = Some(DeactivationReason::Deceased);
    store.seed_client(deceased).await;
    store.seed_client(common::client("Activo")).await;

    let clients = ClientService::new(store)
        .filter_clients(&ClientFilter {
            deactivation_reason: Some(vec![DeactivationReason::Moved]),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Mudado");
}

#[tokio::test]
async fn test_birthday_month_filter() {
    let store = common::store();
    let mut march = common::client("Marzo");
    march.birthday = NaiveDate::from_ymd_opt(1990, 3, 14);
    store.seed_client(march).await;
    let mut july = common::client("Julio");
    july.birthday = NaiveDate::from_ymd_opt(1985, 7, 2);
    store.seed_client(july).await;
    store.seed_client(common::client("SinFecha")).await;

    let clients = ClientService::new(store)
        .filter_clients(&ClientFilter {
            birthday_month: Some(3),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Marzo");
}

#[tokio::test]
async fn test_days_since_last_purchase_is_strict() {
    let store = common::store();
    let mut recent = common::client("Reciente");
    recent.last_purchase_date = Some(common::days_from_today(-30));
    store.seed_client(recent).await;
    let mut exact = common::client("Exacto");
    exact.last_purchase_date = Some(common::days_from_today(-90));
    store.seed_client(exact).await;
    let mut dormant = common::client("Dormido");
    dormant.last_purchase_date = Some(common::days_from_today(-91));
    store.seed_client(dormant).await;
    store.seed_client(common::client("NuncaCompro")).await;

    let clients = ClientService::new(store)
        .filter_clients(&ClientFilter {
            days_since_last_purchase: Some(90),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Dormido");
}

async fn seed_debt_portfolio(store: &collections_service::store::InMemoryStore) -> (Uuid, Uuid, Uuid) {
    // Moroso: open installment past due.
    let mut moroso = common::client("Moroso");
    moroso.credit_used = Decimal::from(100);
    let moroso_id = moroso.client_id;
    store.seed_client(moroso).await;
    let plan = common::credit_plan(moroso_id, "S-0001", 40);
    let plan_id = plan.plan_id;
    store.seed_credit_plan(plan).await;
    store
        .seed_installment(common::installment(
            plan_id,
            1,
            100,
            0,
            common::days_from_today(-10),
            InstallmentStatus::Pending,
        ))
        .await;

    // Al dia: uses credit, nothing past due.
    let mut al_dia = common::client("AlDia");
    al_dia.credit_used = Decimal::from(50);
    let al_dia_id = al_dia.client_id;
    store.seed_client(al_dia).await;
    let plan = common::credit_plan(al_dia_id, "S-0002", 5);
    let plan_id = plan.plan_id;
    store.seed_credit_plan(plan).await;
    store
        .seed_installment(common::installment(
            plan_id,
            1,
            50,
            0,
            common::days_from_today(20),
            InstallmentStatus::Pending,
        ))
        .await;

    // No credit in use at all.
    let clean = common::client("Limpio");
    let clean_id = clean.client_id;
    store.seed_client(clean).await;

    (moroso_id, al_dia_id, clean_id)
}

#[tokio::test]
async fn test_debt_status_filters() {
    let store = common::store();
    let (moroso_id, al_dia_id, _clean_id) = seed_debt_portfolio(&store).await;
    let service = ClientService::new(store);

    let moroso = service
        .filter_clients(&ClientFilter {
            debt_status: Some(DebtStatus::Moroso),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(moroso.len(), 1);
    assert_eq!(moroso[0].client_id, moroso_id);

    let con_deuda = service
        .filter_clients(&ClientFilter {
            debt_status: Some(DebtStatus::ConDeuda),
            ..Default::default()
        })
        .await
        .unwrap();
    let ids: Vec<Uuid> = con_deuda.iter().map(|c| c.client_id).collect();
    assert_eq!(con_deuda.len(), 2);
    assert!(ids.contains(&moroso_id) && ids.contains(&al_dia_id));

    let al_dia = service
        .filter_clients(&ClientFilter {
            debt_status: Some(DebtStatus::AlDia),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(al_dia.len(), 1);
    assert_eq!(al_dia[0].client_id, al_dia_id);
}

#[tokio::test]
async fn test_filters_are_conjunctive() {
    let store = common::store();
    let (moroso_id, _al_dia_id, _clean_id) = seed_debt_portfolio(&store).await;

    // An unrelated A-rated client must not leak into a rating+debt query.
    let mut rated = common::client("Confiable");
    rated.rating = Some(RatingCategory::A);
    store.seed_client(rated).await;

    let clients = ClientService::new(store.clone())
        .filter_clients(&ClientFilter {
            rating: Some(vec![RatingCategory::A]),
            debt_status: Some(DebtStatus::Moroso),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(clients.is_empty());

    // Give the delinquent client the rating and the same query matches.
    let mut tables_fix = store.get_client(moroso_id).await.unwrap().unwrap();
    tables_fix.rating = Some(RatingCategory::A);
    store.seed_client(tables_fix).await;

    let clients = ClientService::new(store)
        .filter_clients(&ClientFilter {
            rating: Some(vec![RatingCategory::A]),
            debt_status: Some(DebtStatus::Moroso),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].client_id, moroso_id);
}
