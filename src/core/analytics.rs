use crate::constants::RECENT_ACTIVITY_LIMIT;
use crate::core::balance_calculator::member_summary;
use crate::core::models::{Expense, ExpenseCategory, MemberId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Grouped spending totals for dashboards and charts.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SpendingReport {
    pub total: f64,
    #[schema(value_type = Object)]
    pub by_category: IndexMap<ExpenseCategory, f64>,
    #[schema(value_type = Object)]
    pub by_payer: IndexMap<MemberId, f64>,
    /// Keyed by `YYYY-MM`, ascending.
    #[schema(value_type = Object)]
    pub by_month: BTreeMap<String, f64>,
}

impl SpendingReport {
    pub fn from_expenses(expenses: &[Expense]) -> Self {
        SpendingReport {
            total: expenses.iter().map(|e| e.total_amount).sum(),
            by_category: by_category(expenses),
            by_payer: by_payer(expenses),
            by_month: by_month(expenses),
        }
    }
}

/// One member's view across every group they belong to.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct Dashboard {
    #[schema(value_type = String)]
    pub member_id: MemberId,
    pub group_count: usize,
    /// Everything spent in the member's groups, whoever paid.
    pub total_spending: f64,
    pub paid: f64,
    pub share: f64,
    pub net: f64,
    /// Newest first.
    pub recent_expenses: Vec<Expense>,
}

impl Dashboard {
    /// `expenses` holds the logs of the member's `group_count` groups.
    pub fn build(member: &MemberId, group_count: usize, mut expenses: Vec<Expense>) -> Self {
        let summary = member_summary(member, &expenses);
        expenses.sort_by_key(|e| e.created_at);
        Dashboard {
            member_id: member.clone(),
            group_count,
            total_spending: expenses.iter().map(|e| e.total_amount).sum(),
            paid: summary.paid,
            share: summary.share,
            net: summary.net,
            recent_expenses: expenses.into_iter().rev().take(RECENT_ACTIVITY_LIMIT).collect(),
        }
    }
}

/// Categories in order of first appearance.
pub fn by_category(expenses: &[Expense]) -> IndexMap<ExpenseCategory, f64> {
    let mut totals = IndexMap::new();
    for expense in expenses {
        *totals.entry(expense.category).or_insert(0.0) += expense.total_amount;
    }
    totals
}

pub fn by_payer(expenses: &[Expense]) -> IndexMap<MemberId, f64> {
    let mut totals = IndexMap::new();
    for expense in expenses {
        *totals.entry(expense.payer.clone()).or_insert(0.0) += expense.total_amount;
    }
    totals
}

pub fn by_month(expenses: &[Expense]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();
    for expense in expenses {
        let month = expense.created_at.format("%Y-%m").to_string();
        *totals.entry(month).or_insert(0.0) += expense.total_amount;
    }
    totals
}
