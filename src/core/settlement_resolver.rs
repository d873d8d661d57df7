use crate::constants::SETTLEMENT_EPSILON;
use crate::core::models::{Balances, MemberId, Settlement, SettlementId};
use log::debug;

/// Greedy two-cursor matching of debtors against creditors.
///
/// Debtors and creditors keep the iteration order of `balances`; they are not sorted by
/// amount. Members within [`SETTLEMENT_EPSILON`] of zero are treated as settled. Each step
/// moves `min(debt, credit)` and advances whichever side dropped below epsilon, so at least
/// one cursor moves per step and a debtor/creditor pair appears at most once per run.
///
/// This is not a global minimum-transfer solver: it emits at most
/// `debtors + creditors - 1` transfers.
pub fn resolve_settlements(group_id: &str, run: u64, balances: &Balances) -> Vec<Settlement> {
    debug!("Resolving settlements for group {} run {}", group_id, run);

    let mut debtors: Vec<(MemberId, f64)> = balances
        .iter()
        .filter(|(_, bal)| **bal < -SETTLEMENT_EPSILON)
        .map(|(member, bal)| (member.clone(), -bal))
        .collect();
    let mut creditors: Vec<(MemberId, f64)> = balances
        .iter()
        .filter(|(_, bal)| **bal > SETTLEMENT_EPSILON)
        .map(|(member, bal)| (member.clone(), *bal))
        .collect();

    let mut settlements = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let transfer = debtors[i].1.min(creditors[j].1);

        settlements.push(Settlement {
            id: SettlementId::new(group_id, run, debtors[i].0.clone(), creditors[j].0.clone()),
            debtor: debtors[i].0.clone(),
            creditor: creditors[j].0.clone(),
            amount: transfer,
        });

        debtors[i].1 -= transfer;
        creditors[j].1 -= transfer;

        if debtors[i].1 < SETTLEMENT_EPSILON {
            i += 1;
        }
        if creditors[j].1 < SETTLEMENT_EPSILON {
            j += 1;
        }
    }

    debug!("Resolved {} settlements: {:?}", settlements.len(), settlements);
    settlements
}

/// Balances after every settlement is paid: creditor receives, debtor pays.
pub fn apply_settlements(balances: &Balances, settlements: &[Settlement]) -> Balances {
    let mut adjusted = balances.clone();
    for settlement in settlements {
        if let Some(creditor) = adjusted.get_mut(&settlement.creditor) {
            *creditor -= settlement.amount;
        }
        if let Some(debtor) = adjusted.get_mut(&settlement.debtor) {
            *debtor += settlement.amount;
        }
    }
    adjusted
}
