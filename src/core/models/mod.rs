pub mod audit;
pub mod balance;
pub mod expense;
pub mod group;
pub mod member;
pub mod payment;
pub mod settlement;
pub mod snapshot;

pub use audit::{AppLog, AuditAction};
pub use balance::{Balances, MemberSummary};
pub use expense::{Expense, ExpenseAmounts, ExpenseCategory, NewExpense};
pub use group::Group;
pub use member::{Member, MemberId};
pub use payment::{PaymentState, PaymentStatus};
pub use settlement::{Settlement, SettlementId, SettlementView};
pub use snapshot::{LedgerEvent, LedgerSnapshot};
