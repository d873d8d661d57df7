use super::member::MemberId;
use crate::constants::{MAX_EXPENSE_AMOUNT, MAX_NAME_LENGTH};
use crate::core::errors::LedgerError;
use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseCategory {
    Food,
    Transport,
    Accommodation,
    Entertainment,
    Utilities,
    Shopping,
    #[default]
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExpenseCategory::Food => "food",
            ExpenseCategory::Transport => "transport",
            ExpenseCategory::Accommodation => "accommodation",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Shopping => "shopping",
            ExpenseCategory::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Base amount plus absolute tax and tip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExpenseAmounts {
    pub base: f64,
    pub tax: f64,
    pub tip: f64,
}

impl ExpenseAmounts {
    pub fn new(base: f64, tax: f64, tip: f64) -> Result<Self, LedgerError> {
        if !base.is_finite() || !tax.is_finite() || !tip.is_finite() {
            return Err(LedgerError::InvalidExpense("amounts must be finite numbers".to_string()));
        }
        if base <= 0.0 {
            return Err(LedgerError::InvalidExpense(format!("base amount must be positive, got {}", base)));
        }
        if tax < 0.0 || tip < 0.0 {
            return Err(LedgerError::InvalidExpense("tax and tip cannot be negative".to_string()));
        }
        let amounts = ExpenseAmounts { base, tax, tip };
        if amounts.total() > MAX_EXPENSE_AMOUNT {
            return Err(LedgerError::InvalidExpense(format!(
                "total amount cannot exceed {}",
                MAX_EXPENSE_AMOUNT
            )));
        }
        Ok(amounts)
    }

    /// Resolves tax and tip given as percentages of the base amount.
    pub fn from_percentages(base: f64, tax_percent: f64, tip_percent: f64) -> Result<Self, LedgerError> {
        if !tax_percent.is_finite() || !tip_percent.is_finite() || tax_percent < 0.0 || tip_percent < 0.0 {
            return Err(LedgerError::InvalidExpense(
                "tax and tip percentages must be non-negative numbers".to_string(),
            ));
        }
        ExpenseAmounts::new(base, base * (tax_percent / 100.0), base * (tip_percent / 100.0))
    }

    pub fn total(&self) -> f64 {
        self.base + self.tax + self.tip
    }
}

/// Input for [`Expense::new`], as supplied by the expense-entry side.
#[derive(Clone, Debug)]
pub struct NewExpense {
    pub group_id: String,
    pub description: String,
    pub category: ExpenseCategory,
    pub amounts: ExpenseAmounts,
    pub payer: MemberId,
    pub participants: Vec<MemberId>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub category: ExpenseCategory,
    pub amounts: ExpenseAmounts,
    pub total_amount: f64,
    #[schema(value_type = String)]
    pub payer: MemberId,
    #[schema(value_type = Vec<String>)]
    pub participants: IndexSet<MemberId>,
    #[schema(value_type = String, example = "2025-08-15T12:00:00Z")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Checks the shape of the expense. Group membership is checked by the caller,
    /// which owns the member list.
    pub fn new(input: NewExpense) -> Result<Self, LedgerError> {
        let description = input.description.trim().to_string();
        if description.is_empty() {
            return Err(LedgerError::InvalidExpense("description cannot be empty".to_string()));
        }
        if description.len() > MAX_NAME_LENGTH {
            return Err(LedgerError::InvalidExpense(format!(
                "description cannot exceed {} characters",
                MAX_NAME_LENGTH
            )));
        }
        let participants: IndexSet<MemberId> = input.participants.into_iter().collect();
        if participants.is_empty() {
            return Err(LedgerError::InvalidExpense("participants cannot be empty".to_string()));
        }

        Ok(Expense {
            id: Uuid::new_v4().to_string(),
            group_id: input.group_id,
            description,
            category: input.category,
            total_amount: input.amounts.total(),
            amounts: input.amounts,
            payer: input.payer,
            participants,
            created_at: Utc::now(),
        })
    }

    pub fn share(&self) -> f64 {
        self.total_amount / self.participants.len() as f64
    }
}
