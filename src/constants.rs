/// Balances within this distance of zero count as settled.
pub const SETTLEMENT_EPSILON: f64 = 0.01;

/// Allowed drift of the group-wide balance sum.
pub const CONSERVATION_TOLERANCE: f64 = 1e-6;

pub const MAX_EXPENSE_AMOUNT: f64 = 1_000_000.0;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_MEMBER_ID_LENGTH: usize = 64;

/// Expenses listed under recent activity on a member dashboard.
pub const RECENT_ACTIVITY_LIMIT: usize = 5;
