use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::core::errors::LedgerError;
use crate::core::models::{ExpenseCategory, Member, MemberId};

// Request structs for JSON payloads
#[derive(Deserialize, ToSchema)]
pub struct MemberInput {
    pub id: String,
    pub name: String,
}

impl MemberInput {
    pub fn into_member(self) -> Result<Member, LedgerError> {
        Member::new(MemberId::new(self.id)?, self.name)
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
    pub members: Vec<MemberInput>,
    pub created_by_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct AddExpenseRequest {
    pub description: String,
    #[serde(default)]
    pub category: ExpenseCategory,
    /// Base amount before tax and tip.
    pub amount: f64,
    #[serde(default)]
    pub tax_percent: f64,
    #[serde(default)]
    pub tip_percent: f64,
    pub payer_id: String,
    pub participant_ids: Vec<String>,
    pub created_by_id: String,
}

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActorQuery {
    pub actor_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct PaymentActionRequest {
    pub settlement_id: String,
    pub actor_id: String,
}

#[derive(Deserialize, ToSchema)]
pub struct MarkPaidRequest {
    pub settlement_id: String,
    pub external_reference: Option<String>,
    pub actor_id: String,
}

// Response structs
#[derive(Serialize, ToSchema)]
pub struct BalanceEntry {
    pub member_id: String,
    pub name: String,
    pub amount: f64,
}

#[derive(Serialize, ToSchema)]
pub struct BalancesResponse {
    pub group_id: String,
    pub balances: Vec<BalanceEntry>,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Newtype wrapper for LedgerError to implement IntoResponse
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            LedgerError::InvalidExpense(_) | LedgerError::InvalidInput(_, _) => StatusCode::BAD_REQUEST,
            LedgerError::GroupNotFound(_) | LedgerError::MemberNotFound(_) | LedgerError::SettlementNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            LedgerError::NotGroupMember(_) => StatusCode::FORBIDDEN,
            LedgerError::InvalidTransition { .. } => StatusCode::CONFLICT,
            LedgerError::StorageError(_) | LedgerError::LoggingError(_) | LedgerError::CacheError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self.0);
        }
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}
