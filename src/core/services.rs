use crate::config::Config;
use crate::constants::SETTLEMENT_EPSILON;
use crate::core::analytics::{Dashboard, SpendingReport};
use crate::core::balance_calculator::{compute_balances, member_summary};
use crate::core::errors::LedgerError;
use crate::core::models::{
    AppLog, AuditAction, Balances, Expense, Group, LedgerEvent, LedgerSnapshot, Member, MemberId, MemberSummary, NewExpense,
    PaymentState, PaymentStatus, Settlement, SettlementId, SettlementView,
};
use crate::core::settlement_ledger::SettlementLedger;
use crate::core::settlement_resolver::{apply_settlements, resolve_settlements};
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::notifier::Notifier;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use serde_json::json;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Group ledger operations on top of storage, audit logging, a settlement cache and a
/// refresh notifier.
///
/// Every call names the acting member explicitly. Writes (new expenses and payment
/// status changes) are serialized through the ledger mutex so revisions and the
/// payment state machine stay consistent under concurrent requests.
pub struct LedgerService<L: LoggingService, S: Storage, C: Cache, N: Notifier> {
    storage: S,
    logging: L,
    cache: C,
    notifier: N,
    ledger: Mutex<SettlementLedger>,
    settlement_cache_ttl: Duration,
}

impl<L: LoggingService, S: Storage, C: Cache, N: Notifier> LedgerService<L, S, C, N> {
    pub fn new(storage: S, logging: L, cache: C, notifier: N, config: &Config) -> Self {
        info!(
            "Initializing LedgerService (transition policy: {:?})",
            config.transition_policy()
        );
        LedgerService {
            storage,
            logging,
            cache,
            notifier,
            ledger: Mutex::new(SettlementLedger::new(config.transition_policy())),
            settlement_cache_ttl: config.settlement_cache_ttl,
        }
    }

    async fn load_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    async fn validate_group_membership(&self, group_id: &str, actor: &MemberId) -> Result<Group, LedgerError> {
        let group = self.load_group(group_id).await?;
        if !group.is_member(actor) {
            warn!("Member {} attempted to access group {} without membership", actor, group_id);
            return Err(LedgerError::NotGroupMember(actor.to_string()));
        }
        Ok(group)
    }

    async fn log_action(
        &self,
        action: AuditAction,
        group_id: &str,
        details: serde_json::Value,
        actor: &MemberId,
    ) -> Result<(), LedgerError> {
        self.logging.log_action(action, group_id, actor, details).await
    }

    /// Saves everything `owner` can see. Takes the ledger from an already held guard.
    async fn persist_snapshot(&self, owner: &MemberId, ledger: &SettlementLedger) -> Result<(), LedgerError> {
        let groups = self.storage.get_member_groups(owner).await?;
        let mut expenses = Vec::new();
        let mut payments = Vec::new();
        for group in &groups {
            expenses.extend(self.storage.get_group_expenses(&group.id).await?);
            payments.extend(ledger.statuses_for_group(&group.id));
        }
        debug!(
            "Persisting snapshot for {}: {} groups, {} expenses, {} payments",
            owner,
            groups.len(),
            expenses.len(),
            payments.len()
        );
        self.storage
            .save_snapshot(LedgerSnapshot {
                owner: owner.clone(),
                groups,
                expenses,
                payments,
                taken_at: Utc::now(),
            })
            .await
    }

    /// Resolution for the group's current revision, from cache when available.
    async fn current_settlements(&self, group: &Group) -> Result<Vec<Settlement>, LedgerError> {
        if let Some(settlements) = self.cache.get_settlements(&group.id, group.revision).await? {
            debug!("Settlement cache hit for group {} run {}", group.id, group.revision);
            return Ok(settlements);
        }
        let expenses = self.storage.get_group_expenses(&group.id).await?;
        let balances = compute_balances(&group.member_ids(), &expenses)?;
        let settlements = resolve_settlements(&group.id, group.revision, &balances);

        let residue = apply_settlements(&balances, &settlements)
            .iter()
            .map(|(_, amount)| amount.abs())
            .fold(0.0, f64::max);
        if residue >= SETTLEMENT_EPSILON {
            warn!(
                "Settlements for group {} run {} leave a residue of {}",
                group.id, group.revision, residue
            );
        } else {
            debug!("Settlements for group {} run {} leave a residue of {}", group.id, group.revision, residue);
        }

        self.cache
            .save_settlements(&group.id, group.revision, &settlements, self.settlement_cache_ttl)
            .await?;
        Ok(settlements)
    }

    // GROUPS

    pub async fn create_group(
        &self,
        name: String,
        description: Option<String>,
        members: Vec<Member>,
        created_by: &MemberId,
    ) -> Result<Group, LedgerError> {
        info!("Creating group '{}' by member {}", name, created_by);
        let group = Group::new(name, description, members)?;
        if !group.is_member(created_by) {
            warn!("Creator {} is not listed among the members of group '{}'", created_by, group.name);
            return Err(LedgerError::NotGroupMember(created_by.to_string()));
        }

        let ledger = self.ledger.lock().await;
        self.storage.save_group(group.clone()).await?;
        self.log_action(
            AuditAction::GroupCreated,
            &group.id,
            json!({
                "group_id": group.id,
                "name": group.name,
                "member_ids": group.member_ids(),
            }),
            created_by,
        )
        .await?;
        self.persist_snapshot(created_by, &ledger).await?;
        self.notifier
            .notify(LedgerEvent::GroupCreated {
                group_id: group.id.clone(),
            })
            .await?;

        Ok(group)
    }

    pub async fn get_group(&self, group_id: &str, actor: &MemberId) -> Result<Group, LedgerError> {
        self.validate_group_membership(group_id, actor).await
    }

    // EXPENSES

    pub async fn add_expense(&self, new_expense: NewExpense, created_by: &MemberId) -> Result<Expense, LedgerError> {
        info!(
            "Adding expense '{}' to group {} by member {}",
            new_expense.description, new_expense.group_id, created_by
        );
        let expense = Expense::new(new_expense)?;

        let ledger = self.ledger.lock().await;
        let mut group = self.validate_group_membership(&expense.group_id, created_by).await?;
        if !group.is_member(&expense.payer) {
            warn!("Payer {} not in group {}", expense.payer, group.id);
            return Err(LedgerError::InvalidExpense(format!(
                "payer {} is not a member of group {}",
                expense.payer, group.id
            )));
        }
        if let Some(unknown) = expense.participants.iter().find(|p| !group.is_member(p)) {
            warn!("Participant {} not in group {}", unknown, group.id);
            return Err(LedgerError::InvalidExpense(format!(
                "participant {} is not a member of group {}",
                unknown, group.id
            )));
        }

        // A stored expense never sits under the old revision or a cached run.
        let previous = group.clone();
        group.revision += 1;
        self.storage.save_group(group.clone()).await?;
        self.cache.invalidate_group(&group.id).await?;
        if let Err(e) = self.storage.save_expense(expense.clone()).await {
            warn!("Failed to store expense {} for group {}: {}", expense.id, group.id, e);
            self.storage.save_group(previous).await?;
            return Err(e);
        }
        debug!("Group {} moved to revision {}", group.id, group.revision);

        self.log_action(
            AuditAction::ExpenseAdded,
            &group.id,
            json!({
                "expense_id": expense.id,
                "group_id": group.id,
                "total_amount": expense.total_amount,
                "payer": expense.payer,
                "participants": expense.participants,
            }),
            created_by,
        )
        .await?;
        self.persist_snapshot(created_by, &ledger).await?;
        self.notifier
            .notify(LedgerEvent::ExpenseAdded {
                group_id: group.id.clone(),
                expense_id: expense.id.clone(),
            })
            .await?;

        Ok(expense)
    }

    pub async fn list_expenses(&self, group_id: &str, actor: &MemberId) -> Result<Vec<Expense>, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        self.storage.get_group_expenses(&group.id).await
    }

    // BALANCES & SETTLEMENTS

    pub async fn get_balances(&self, group_id: &str, actor: &MemberId) -> Result<Balances, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        let expenses = self.storage.get_group_expenses(&group.id).await?;
        let balances = compute_balances(&group.member_ids(), &expenses)?;
        self.log_action(AuditAction::BalancesQueried, &group.id, json!({ "members": balances.len() }), actor)
            .await?;
        Ok(balances)
    }

    pub async fn get_settlements(&self, group_id: &str, actor: &MemberId) -> Result<Vec<SettlementView>, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        let settlements = self.current_settlements(&group).await?;
        self.log_action(
            AuditAction::SettlementsResolved,
            &group.id,
            json!({ "run": group.revision, "count": settlements.len() }),
            actor,
        )
        .await?;

        let ledger = self.ledger.lock().await;
        Ok(settlements
            .into_iter()
            .map(|settlement| SettlementView {
                status: ledger.get_status(&settlement.id).cloned(),
                settlement,
            })
            .collect())
    }

    pub async fn get_member_summary(
        &self,
        group_id: &str,
        member_id: &MemberId,
        actor: &MemberId,
    ) -> Result<MemberSummary, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        if !group.is_member(member_id) {
            return Err(LedgerError::MemberNotFound(member_id.to_string()));
        }
        let expenses = self.storage.get_group_expenses(&group.id).await?;
        Ok(member_summary(member_id, &expenses))
    }

    pub async fn get_spending_report(&self, group_id: &str, actor: &MemberId) -> Result<SpendingReport, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        let expenses = self.storage.get_group_expenses(&group.id).await?;
        Ok(SpendingReport::from_expenses(&expenses))
    }

    // PAYMENTS

    /// Opens a pending payment for a settlement of the group's current resolution.
    pub async fn initiate_payment(
        &self,
        settlement_id: &SettlementId,
        actor: &MemberId,
    ) -> Result<PaymentStatus, LedgerError> {
        info!("Member {} initiating payment for settlement {}", actor, settlement_id);
        let mut ledger = self.ledger.lock().await;
        let group = self.validate_group_membership(&settlement_id.group_id, actor).await?;
        let settlements = self.current_settlements(&group).await?;
        if !settlements.iter().any(|s| &s.id == settlement_id) {
            warn!(
                "Settlement {} is not part of the current resolution (run {}) of group {}",
                settlement_id, group.revision, group.id
            );
            return Err(LedgerError::SettlementNotFound(settlement_id.to_string()));
        }

        let status = ledger.initiate(settlement_id).clone();
        self.after_payment_change(&status, actor, &ledger).await?;
        Ok(status)
    }

    pub async fn mark_paid(
        &self,
        settlement_id: &SettlementId,
        external_reference: Option<String>,
        actor: &MemberId,
    ) -> Result<PaymentStatus, LedgerError> {
        self.update_payment(settlement_id, PaymentState::Paid, external_reference, actor)
            .await
    }

    pub async fn mark_cancelled(
        &self,
        settlement_id: &SettlementId,
        actor: &MemberId,
    ) -> Result<PaymentStatus, LedgerError> {
        self.update_payment(settlement_id, PaymentState::Cancelled, None, actor).await
    }

    pub async fn mark_failed(&self, settlement_id: &SettlementId, actor: &MemberId) -> Result<PaymentStatus, LedgerError> {
        self.update_payment(settlement_id, PaymentState::Failed, None, actor).await
    }

    async fn update_payment(
        &self,
        settlement_id: &SettlementId,
        target: PaymentState,
        external_reference: Option<String>,
        actor: &MemberId,
    ) -> Result<PaymentStatus, LedgerError> {
        info!("Member {} marking settlement {} as {}", actor, settlement_id, target);
        let mut ledger = self.ledger.lock().await;
        let group = self.validate_group_membership(&settlement_id.group_id, actor).await?;
        // Older runs stay markable; ids that no resolution of this group could produce do not.
        if settlement_id.run > group.revision
            || !group.is_member(&settlement_id.debtor)
            || !group.is_member(&settlement_id.creditor)
        {
            warn!(
                "Settlement {} cannot come from group {} (revision {})",
                settlement_id, group.id, group.revision
            );
            return Err(LedgerError::SettlementNotFound(settlement_id.to_string()));
        }

        let status = match target {
            PaymentState::Paid => ledger.mark_paid(settlement_id, external_reference)?.clone(),
            PaymentState::Cancelled => ledger.mark_cancelled(settlement_id)?.clone(),
            PaymentState::Failed => ledger.mark_failed(settlement_id)?.clone(),
            PaymentState::Pending => ledger.initiate(settlement_id).clone(),
        };
        self.after_payment_change(&status, actor, &ledger).await?;
        Ok(status)
    }

    async fn after_payment_change(
        &self,
        status: &PaymentStatus,
        actor: &MemberId,
        ledger: &SettlementLedger,
    ) -> Result<(), LedgerError> {
        self.log_action(
            AuditAction::for_payment(status.state),
            &status.settlement_id.group_id,
            json!({
                "settlement_id": status.settlement_id.to_string(),
                "state": status.state,
                "external_reference": status.external_reference,
            }),
            actor,
        )
        .await?;
        self.persist_snapshot(actor, ledger).await?;
        self.notifier
            .notify(LedgerEvent::PaymentUpdated {
                group_id: status.settlement_id.group_id.clone(),
                settlement_id: status.settlement_id.to_string(),
                state: status.state.to_string(),
            })
            .await
    }

    pub async fn get_payment_status(&self, settlement_id: &SettlementId) -> Result<Option<PaymentStatus>, LedgerError> {
        let ledger = self.ledger.lock().await;
        Ok(ledger.get_status(settlement_id).cloned())
    }

    /// Payment records of the group that the current resolution no longer produces.
    pub async fn get_orphaned_payments(&self, group_id: &str, actor: &MemberId) -> Result<Vec<PaymentStatus>, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        let settlements = self.current_settlements(&group).await?;
        let ledger = self.ledger.lock().await;
        Ok(ledger.orphaned(&group.id, &settlements))
    }

    pub async fn get_snapshot(&self, member_id: &MemberId) -> Result<Option<LedgerSnapshot>, LedgerError> {
        self.storage.get_snapshot(member_id).await
    }

    /// Totals across every group `actor` belongs to, plus their most recent expenses.
    pub async fn get_dashboard(&self, actor: &MemberId) -> Result<Dashboard, LedgerError> {
        let groups = self.storage.get_member_groups(actor).await?;
        let mut expenses = Vec::new();
        for group in &groups {
            expenses.extend(self.storage.get_group_expenses(&group.id).await?);
        }
        debug!(
            "Building dashboard for {} over {} groups and {} expenses",
            actor,
            groups.len(),
            expenses.len()
        );
        Ok(Dashboard::build(actor, groups.len(), expenses))
    }

    pub async fn get_group_logs(&self, group_id: &str, actor: &MemberId) -> Result<Vec<AppLog>, LedgerError> {
        let group = self.validate_group_membership(group_id, actor).await?;
        self.logging.get_group_logs(&group.id).await
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        self.logging.get_logs().await
    }
}
