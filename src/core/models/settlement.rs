use super::member::MemberId;
use super::payment::PaymentStatus;
use crate::core::errors::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Identity of a proposed transfer: the debtor/creditor pair within one resolution run
/// of a group. Runs follow the group's revision, so an id never re-binds to a transfer
/// computed from a different expense log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SettlementId {
    pub group_id: String,
    pub run: u64,
    pub debtor: MemberId,
    pub creditor: MemberId,
}

impl SettlementId {
    pub fn new(group_id: impl Into<String>, run: u64, debtor: MemberId, creditor: MemberId) -> Self {
        SettlementId {
            group_id: group_id.into(),
            run,
            debtor,
            creditor,
        }
    }
}

impl fmt::Display for SettlementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:{}", self.group_id, self.run, self.debtor, self.creditor)
    }
}

impl FromStr for SettlementId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || {
            LedgerError::invalid_input(
                "settlement_id",
                "Invalid settlement id",
                format!("`{}` is not of the form group:run:debtor:creditor", s),
            )
        };
        let parts: Vec<&str> = s.split(':').collect();
        let [group_id, run, debtor, creditor] = parts.as_slice() else {
            return Err(malformed());
        };
        if group_id.is_empty() {
            return Err(malformed());
        }
        let run = run.parse::<u64>().map_err(|_| malformed())?;
        Ok(SettlementId {
            group_id: group_id.to_string(),
            run,
            debtor: MemberId::new(*debtor)?,
            creditor: MemberId::new(*creditor)?,
        })
    }
}

impl TryFrom<String> for SettlementId {
    type Error = LedgerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SettlementId> for String {
    fn from(id: SettlementId) -> Self {
        id.to_string()
    }
}

/// A proposed payment from `debtor` to `creditor`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Settlement {
    #[schema(value_type = String, example = "5f1c...:3:u2:u1")]
    pub id: SettlementId,
    #[schema(value_type = String)]
    pub debtor: MemberId,
    #[schema(value_type = String)]
    pub creditor: MemberId,
    pub amount: f64,
}

/// A settlement of the current resolution together with its payment record, if any.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SettlementView {
    pub settlement: Settlement,
    pub status: Option<PaymentStatus>,
}
