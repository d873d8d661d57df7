use super::member::MemberId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Net balance per member, in member order. Positive: owed money. Negative: owes money.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances(IndexMap<MemberId, f64>);

impl Balances {
    pub fn new() -> Self {
        Balances(IndexMap::new())
    }

    pub fn get(&self, member: &MemberId) -> Option<f64> {
        self.0.get(member).copied()
    }

    pub fn get_mut(&mut self, member: &MemberId) -> Option<&mut f64> {
        self.0.get_mut(member)
    }

    pub fn contains(&self, member: &MemberId) -> bool {
        self.0.contains_key(member)
    }

    pub fn insert(&mut self, member: MemberId, amount: f64) -> Option<f64> {
        self.0.insert(member, amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MemberId, &f64)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}

impl FromIterator<(MemberId, f64)> for Balances {
    fn from_iter<T: IntoIterator<Item = (MemberId, f64)>>(iter: T) -> Self {
        Balances(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Balances {
    type Item = (&'a MemberId, &'a f64);
    type IntoIter = indexmap::map::Iter<'a, MemberId, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Paid/share figures for one member across a group's expenses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberSummary {
    #[schema(value_type = String)]
    pub member_id: MemberId,
    pub paid: f64,
    pub share: f64,
    pub net: f64,
}
