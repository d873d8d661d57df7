use crate::{
    api::models::*,
    core::{
        analytics::{Dashboard, SpendingReport},
        errors::LedgerError,
        models::{
            AppLog, Expense, ExpenseAmounts, Group, MemberId, MemberSummary, NewExpense, PaymentStatus,
            SettlementId, SettlementView,
        },
        services::LedgerService,
    },
    infrastructure::{
        cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging,
        notifier::in_memory::InMemoryNotifier, storage::in_memory::InMemoryStorage,
    },
};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use std::sync::Arc;

pub type AppService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache, InMemoryNotifier>;

// Define API routes
pub fn api_routes(service: Arc<AppService>) -> Router {
    Router::new()
        .route("/groups", post(create_group))
        .route("/groups/{group_id}", get(get_group))
        .route("/groups/{group_id}/expenses", post(add_expense).get(list_expenses))
        .route("/groups/{group_id}/balances", get(get_balances))
        .route("/groups/{group_id}/settlements", get(get_settlements))
        .route("/groups/{group_id}/members/{member_id}/summary", get(get_member_summary))
        .route("/groups/{group_id}/analytics", get(get_spending_report))
        .route("/groups/{group_id}/payments/orphaned", get(get_orphaned_payments))
        .route("/payments/initiate", post(initiate_payment))
        .route("/payments/paid", post(mark_paid))
        .route("/payments/cancel", post(mark_cancelled))
        .route("/payments/fail", post(mark_failed))
        .route("/payments/{settlement_id}", get(get_payment_status))
        .route("/groups/{group_id}/logs", get(get_group_logs))
        .route("/members/{member_id}/dashboard", get(get_dashboard))
        .route("/logs", get(get_app_logs))
        .with_state(service)
}

#[utoipa::path(
    post,
    path = "/api/groups",
    request_body = CreateGroupRequest,
    responses(
        (status = 200, description = "Group created", body = Group),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 403, description = "Creator is not among the members", body = ErrorResponse)
    )
)]
pub async fn create_group(
    State(service): State<Arc<AppService>>,
    Json(req): Json<CreateGroupRequest>,
) -> Result<Json<Group>, ApiError> {
    let created_by = MemberId::new(req.created_by_id)?;
    let members = req
        .members
        .into_iter()
        .map(MemberInput::into_member)
        .collect::<Result<Vec<_>, _>>()?;
    let group = service
        .create_group(req.name, req.description, members, &created_by)
        .await?;
    Ok(Json(group))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses(
        (status = 200, description = "Group", body = Group),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn get_group(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Group>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    Ok(Json(service.get_group(&group_id, &actor).await?))
}

#[utoipa::path(
    post,
    path = "/api/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "Group ID")),
    request_body = AddExpenseRequest,
    responses(
        (status = 200, description = "Expense recorded", body = Expense),
        (status = 400, description = "Invalid expense", body = ErrorResponse),
        (status = 404, description = "Group not found", body = ErrorResponse)
    )
)]
pub async fn add_expense(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Json(req): Json<AddExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let created_by = MemberId::new(req.created_by_id)?;
    let participants = req
        .participant_ids
        .into_iter()
        .map(MemberId::new)
        .collect::<Result<Vec<_>, _>>()?;
    let new_expense = NewExpense {
        group_id,
        description: req.description,
        category: req.category,
        amounts: ExpenseAmounts::from_percentages(req.amount, req.tax_percent, req.tip_percent)?,
        payer: MemberId::new(req.payer_id)?,
        participants,
    };
    let expense = service.add_expense(new_expense, &created_by).await?;
    Ok(Json(expense))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/expenses",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses((status = 200, description = "Expense log in entry order", body = Vec<Expense>))
)]
pub async fn list_expenses(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    Ok(Json(service.list_expenses(&group_id, &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/balances",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses((status = 200, description = "Net balance per member", body = BalancesResponse))
)]
pub async fn get_balances(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<BalancesResponse>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    let group = service.get_group(&group_id, &actor).await?;
    let balances = service.get_balances(&group_id, &actor).await?;
    let balances = balances
        .iter()
        .map(|(member_id, amount)| BalanceEntry {
            member_id: member_id.to_string(),
            name: group
                .member(member_id)
                .map(|m| m.name.clone())
                .unwrap_or_default(),
            amount: *amount,
        })
        .collect();
    Ok(Json(BalancesResponse { group_id, balances }))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/settlements",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses((status = 200, description = "Transfers that settle the group, with payment status", body = Vec<SettlementView>))
)]
pub async fn get_settlements(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<SettlementView>>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    Ok(Json(service.get_settlements(&group_id, &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/members/{member_id}/summary",
    params(
        ("group_id" = String, Path, description = "Group ID"),
        ("member_id" = String, Path, description = "Member ID"),
        ActorQuery
    ),
    responses((status = 200, description = "Paid and share totals", body = MemberSummary))
)]
pub async fn get_member_summary(
    State(service): State<Arc<AppService>>,
    Path((group_id, member_id)): Path<(String, String)>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<MemberSummary>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    let member_id = MemberId::new(member_id)?;
    Ok(Json(service.get_member_summary(&group_id, &member_id, &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/analytics",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses((status = 200, description = "Spending by category, payer and month", body = SpendingReport))
)]
pub async fn get_spending_report(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<SpendingReport>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    Ok(Json(service.get_spending_report(&group_id, &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/payments/orphaned",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses((status = 200, description = "Payment records outside the current resolution", body = Vec<PaymentStatus>))
)]
pub async fn get_orphaned_payments(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<PaymentStatus>>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    Ok(Json(service.get_orphaned_payments(&group_id, &actor).await?))
}

#[utoipa::path(
    post,
    path = "/api/payments/initiate",
    request_body = PaymentActionRequest,
    responses(
        (status = 200, description = "Payment pending", body = PaymentStatus),
        (status = 404, description = "Settlement not in the current resolution", body = ErrorResponse)
    )
)]
pub async fn initiate_payment(
    State(service): State<Arc<AppService>>,
    Json(req): Json<PaymentActionRequest>,
) -> Result<Json<PaymentStatus>, ApiError> {
    let settlement_id: SettlementId = req.settlement_id.parse()?;
    let actor = MemberId::new(req.actor_id)?;
    Ok(Json(service.initiate_payment(&settlement_id, &actor).await?))
}

#[utoipa::path(
    post,
    path = "/api/payments/paid",
    request_body = MarkPaidRequest,
    responses(
        (status = 200, description = "Payment marked as paid", body = PaymentStatus),
        (status = 409, description = "Payment is not pending", body = ErrorResponse)
    )
)]
pub async fn mark_paid(
    State(service): State<Arc<AppService>>,
    Json(req): Json<MarkPaidRequest>,
) -> Result<Json<PaymentStatus>, ApiError> {
    let settlement_id: SettlementId = req.settlement_id.parse()?;
    let actor = MemberId::new(req.actor_id)?;
    Ok(Json(
        service
            .mark_paid(&settlement_id, req.external_reference, &actor)
            .await?,
    ))
}

#[utoipa::path(
    post,
    path = "/api/payments/cancel",
    request_body = PaymentActionRequest,
    responses(
        (status = 200, description = "Payment cancelled", body = PaymentStatus),
        (status = 409, description = "Payment is not pending", body = ErrorResponse)
    )
)]
pub async fn mark_cancelled(
    State(service): State<Arc<AppService>>,
    Json(req): Json<PaymentActionRequest>,
) -> Result<Json<PaymentStatus>, ApiError> {
    let settlement_id: SettlementId = req.settlement_id.parse()?;
    let actor = MemberId::new(req.actor_id)?;
    Ok(Json(service.mark_cancelled(&settlement_id, &actor).await?))
}

#[utoipa::path(
    post,
    path = "/api/payments/fail",
    request_body = PaymentActionRequest,
    responses(
        (status = 200, description = "Payment failed", body = PaymentStatus),
        (status = 409, description = "Payment is not pending", body = ErrorResponse)
    )
)]
pub async fn mark_failed(
    State(service): State<Arc<AppService>>,
    Json(req): Json<PaymentActionRequest>,
) -> Result<Json<PaymentStatus>, ApiError> {
    let settlement_id: SettlementId = req.settlement_id.parse()?;
    let actor = MemberId::new(req.actor_id)?;
    Ok(Json(service.mark_failed(&settlement_id, &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/payments/{settlement_id}",
    params(("settlement_id" = String, Path, description = "Settlement ID (group:run:debtor:creditor)")),
    responses(
        (status = 200, description = "Payment status", body = PaymentStatus),
        (status = 404, description = "No payment record", body = ErrorResponse)
    )
)]
pub async fn get_payment_status(
    State(service): State<Arc<AppService>>,
    Path(settlement_id): Path<String>,
) -> Result<Json<PaymentStatus>, ApiError> {
    let parsed: SettlementId = settlement_id.parse()?;
    let status = service
        .get_payment_status(&parsed)
        .await?
        .ok_or(LedgerError::SettlementNotFound(settlement_id))?;
    Ok(Json(status))
}

#[utoipa::path(
    get,
    path = "/api/members/{member_id}/dashboard",
    params(("member_id" = String, Path, description = "Member ID")),
    responses((status = 200, description = "Totals across the member's groups and recent activity", body = Dashboard))
)]
pub async fn get_dashboard(
    State(service): State<Arc<AppService>>,
    Path(member_id): Path<String>,
) -> Result<Json<Dashboard>, ApiError> {
    let member_id = MemberId::new(member_id)?;
    Ok(Json(service.get_dashboard(&member_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/groups/{group_id}/logs",
    params(("group_id" = String, Path, description = "Group ID"), ActorQuery),
    responses((status = 200, description = "Audit entries of the group", body = Vec<AppLog>))
)]
pub async fn get_group_logs(
    State(service): State<Arc<AppService>>,
    Path(group_id): Path<String>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<Vec<AppLog>>, ApiError> {
    let actor = MemberId::new(query.actor_id)?;
    Ok(Json(service.get_group_logs(&group_id, &actor).await?))
}

#[utoipa::path(
    get,
    path = "/api/logs",
    responses((status = 200, description = "Audit log", body = Vec<AppLog>))
)]
pub async fn get_app_logs(State(service): State<Arc<AppService>>) -> Result<Json<Vec<AppLog>>, ApiError> {
    Ok(Json(service.get_app_logs().await?))
}
