use crate::core::errors::LedgerError;
use crate::core::models::{PaymentState, PaymentStatus, Settlement, SettlementId};
use chrono::Utc;
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// How to treat a terminal mark on a settlement that is not currently pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Reject with [`LedgerError::InvalidTransition`].
    #[default]
    Strict,
    /// Open a fresh pending record first, then apply the mark.
    Lenient,
}

/// Payment lifecycle per settlement id: `pending -> {paid, cancelled, failed}`.
///
/// Records are never removed, including records whose settlement no longer comes out of
/// the latest resolution.
#[derive(Debug, Default)]
pub struct SettlementLedger {
    statuses: HashMap<SettlementId, PaymentStatus>,
    policy: TransitionPolicy,
}

impl SettlementLedger {
    pub fn new(policy: TransitionPolicy) -> Self {
        SettlementLedger {
            statuses: HashMap::new(),
            policy,
        }
    }

    /// Starts (or restarts) a payment. Any earlier record for the id is replaced.
    pub fn initiate(&mut self, settlement_id: &SettlementId) -> &PaymentStatus {
        debug!("Initiating payment for settlement {}", settlement_id);
        self.statuses.insert(
            settlement_id.clone(),
            PaymentStatus {
                settlement_id: settlement_id.clone(),
                state: PaymentState::Pending,
                external_reference: None,
                updated_at: Utc::now(),
            },
        );
        &self.statuses[settlement_id]
    }

    pub fn mark_paid(
        &mut self,
        settlement_id: &SettlementId,
        external_reference: Option<String>,
    ) -> Result<&PaymentStatus, LedgerError> {
        self.transition(settlement_id, PaymentState::Paid, external_reference)
    }

    pub fn mark_cancelled(&mut self, settlement_id: &SettlementId) -> Result<&PaymentStatus, LedgerError> {
        self.transition(settlement_id, PaymentState::Cancelled, None)
    }

    pub fn mark_failed(&mut self, settlement_id: &SettlementId) -> Result<&PaymentStatus, LedgerError> {
        self.transition(settlement_id, PaymentState::Failed, None)
    }

    pub fn get_status(&self, settlement_id: &SettlementId) -> Option<&PaymentStatus> {
        self.statuses.get(settlement_id)
    }

    pub fn statuses_for_group(&self, group_id: &str) -> Vec<PaymentStatus> {
        let mut statuses: Vec<PaymentStatus> = self
            .statuses
            .values()
            .filter(|s| s.settlement_id.group_id == group_id)
            .cloned()
            .collect();
        statuses.sort_by(|a, b| a.updated_at.cmp(&b.updated_at));
        statuses
    }

    /// Records of `group_id` that no settlement in `current` refers to.
    pub fn orphaned(&self, group_id: &str, current: &[Settlement]) -> Vec<PaymentStatus> {
        let live: HashSet<&SettlementId> = current.iter().map(|s| &s.id).collect();
        self.statuses_for_group(group_id)
            .into_iter()
            .filter(|s| !live.contains(&s.settlement_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    fn transition(
        &mut self,
        settlement_id: &SettlementId,
        target: PaymentState,
        external_reference: Option<String>,
    ) -> Result<&PaymentStatus, LedgerError> {
        let current = self.statuses.get(settlement_id).map(|s| s.state);
        match (current, self.policy) {
            (Some(state), _) if !state.is_terminal() => {}
            (_, TransitionPolicy::Lenient) => {
                debug!(
                    "Lenient policy: opening pending record for settlement {} before marking {}",
                    settlement_id, target
                );
                self.initiate(settlement_id);
            }
            (from, TransitionPolicy::Strict) => {
                let from = from.map_or_else(|| "absent".to_string(), |s| s.to_string());
                warn!(
                    "Rejected payment transition for settlement {}: {} -> {}",
                    settlement_id, from, target
                );
                return Err(LedgerError::InvalidTransition {
                    settlement_id: settlement_id.to_string(),
                    from,
                    to: target.to_string(),
                });
            }
        }

        let status = self
            .statuses
            .get_mut(settlement_id)
            .ok_or_else(|| LedgerError::SettlementNotFound(settlement_id.to_string()))?;
        status.state = target;
        if external_reference.is_some() {
            status.external_reference = external_reference;
        }
        status.updated_at = Utc::now();
        debug!("Settlement {} is now {}", settlement_id, target);
        Ok(status)
    }
}
