use crate::constants::CONSERVATION_TOLERANCE;
use crate::core::errors::LedgerError;
use crate::core::models::{Balances, Expense, MemberId, MemberSummary};
use log::debug;

/// Reduces an expense log into per-member net balances.
///
/// Every member starts at zero and keeps its position from `members`. For each expense the
/// payer is credited the full total and every participant is debited an equal share. No
/// rounding is applied here.
pub fn compute_balances(members: &[MemberId], expenses: &[Expense]) -> Result<Balances, LedgerError> {
    let mut balances: Balances = members.iter().map(|m| (m.clone(), 0.0)).collect();

    for expense in expenses {
        check_expense(&balances, expense)?;
        let share = expense.share();
        if let Some(payer) = balances.get_mut(&expense.payer) {
            *payer += expense.total_amount;
        }
        for participant in &expense.participants {
            if let Some(balance) = balances.get_mut(participant) {
                *balance -= share;
            }
        }
    }

    debug!("Balances computed over {} expenses: {:?}", expenses.len(), balances);
    Ok(balances)
}

fn check_expense(balances: &Balances, expense: &Expense) -> Result<(), LedgerError> {
    if expense.participants.is_empty() {
        return Err(LedgerError::InvalidExpense(format!(
            "expense {} has no participants",
            expense.id
        )));
    }
    if !expense.total_amount.is_finite() || expense.total_amount < 0.0 {
        return Err(LedgerError::InvalidExpense(format!(
            "expense {} has invalid amount {}",
            expense.id, expense.total_amount
        )));
    }
    if !balances.contains(&expense.payer) {
        return Err(LedgerError::InvalidExpense(format!(
            "payer {} of expense {} is not a group member",
            expense.payer, expense.id
        )));
    }
    if let Some(unknown) = expense.participants.iter().find(|p| !balances.contains(p)) {
        return Err(LedgerError::InvalidExpense(format!(
            "participant {} of expense {} is not a group member",
            unknown, expense.id
        )));
    }
    Ok(())
}

/// What `member` paid, what their equal shares add up to, and the difference.
pub fn member_summary(member: &MemberId, expenses: &[Expense]) -> MemberSummary {
    let mut paid = 0.0;
    let mut share = 0.0;
    for expense in expenses {
        if &expense.payer == member {
            paid += expense.total_amount;
        }
        if expense.participants.contains(member) && !expense.participants.is_empty() {
            share += expense.share();
        }
    }
    MemberSummary {
        member_id: member.clone(),
        paid,
        share,
        net: paid - share,
    }
}

pub fn is_conserved(balances: &Balances) -> bool {
    balances.total().abs() <= CONSERVATION_TOLERANCE
}
