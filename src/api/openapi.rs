use utoipa::OpenApi;

use crate::{
    api::models::{
        AddExpenseRequest, BalanceEntry, BalancesResponse, CreateGroupRequest, ErrorResponse, MarkPaidRequest,
        MemberInput, PaymentActionRequest,
    },
    core::{
        analytics::{Dashboard, SpendingReport},
        models::{
            AppLog, AuditAction, Expense, ExpenseAmounts, ExpenseCategory, Group, Member, MemberSummary, PaymentState,
            PaymentStatus, Settlement, SettlementView,
        },
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::create_group,
        super::handlers::get_group,
        super::handlers::add_expense,
        super::handlers::list_expenses,
        super::handlers::get_balances,
        super::handlers::get_settlements,
        super::handlers::get_member_summary,
        super::handlers::get_spending_report,
        super::handlers::get_orphaned_payments,
        super::handlers::initiate_payment,
        super::handlers::mark_paid,
        super::handlers::mark_cancelled,
        super::handlers::mark_failed,
        super::handlers::get_payment_status,
        super::handlers::get_dashboard,
        super::handlers::get_group_logs,
        super::handlers::get_app_logs
    ),
    components(schemas(
        MemberInput,
        CreateGroupRequest,
        AddExpenseRequest,
        PaymentActionRequest,
        MarkPaidRequest,
        BalanceEntry,
        BalancesResponse,
        ErrorResponse,
        Member,
        Group,
        Expense,
        ExpenseAmounts,
        ExpenseCategory,
        MemberSummary,
        Settlement,
        SettlementView,
        PaymentState,
        PaymentStatus,
        SpendingReport,
        Dashboard,
        AuditAction,
        AppLog
    )),
    info(
        title = "Splitledger API",
        description = "Shared-expense balances, settlement resolution and payment tracking",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
