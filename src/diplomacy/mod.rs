//! Diplomacy - pairwise faction relations and gold trade

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::city::ledger::{Commodity, ResourceLedger};
use crate::core::types::FactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Relation {
    #[default]
    Neutral,
    Peace,
    War,
}

impl Relation {
    pub fn name(&self) -> &'static str {
        match self {
            Relation::Neutral => "neutral",
            Relation::Peace => "peace",
            Relation::War => "war",
        }
    }
}

/// One explicitly set pair in serialized form
pub type RelationEntry = (FactionId, FactionId, Relation);

/// Symmetric relation table; unset pairs are neutral
///
/// Serialized as a sorted list of entries since pair keys are not valid
/// JSON object keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<RelationEntry>", into = "Vec<RelationEntry>")]
pub struct DiplomacyLedger {
    relations: AHashMap<(FactionId, FactionId), Relation>,
}

impl From<Vec<RelationEntry>> for DiplomacyLedger {
    fn from(entries: Vec<RelationEntry>) -> Self {
        Self {
            relations: entries
                .into_iter()
                .map(|(a, b, relation)| (pair_key(a, b), relation))
                .collect(),
        }
    }
}

impl From<DiplomacyLedger> for Vec<RelationEntry> {
    fn from(ledger: DiplomacyLedger) -> Self {
        ledger.entries()
    }
}

/// Order a pair so (a, b) and (b, a) share one entry
fn pair_key(a: FactionId, b: FactionId) -> (FactionId, FactionId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl DiplomacyLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, a: FactionId, b: FactionId, relation: Relation) {
        self.relations.insert(pair_key(a, b), relation);
        tracing::info!(a = a.name(), b = b.name(), relation = relation.name(), "diplomacy changed");
    }

    pub fn get(&self, a: FactionId, b: FactionId) -> Relation {
        self.relations
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or_default()
    }

    pub fn at_peace(&self, a: FactionId, b: FactionId) -> bool {
        self.get(a, b) == Relation::Peace
    }

    /// Every explicitly set pair, sorted
    pub fn entries(&self) -> Vec<RelationEntry> {
        let mut entries: Vec<_> = self
            .relations
            .iter()
            .map(|(&(a, b), &relation)| (a, b, relation))
            .collect();
        entries.sort_by_key(|&(a, b, _)| (a, b));
        entries
    }
}

/// Move gold from one faction to another
///
/// Succeeds only for a positive amount between two registered factions at
/// peace, when `from` can cover it. On failure nothing changes.
pub fn trade(
    from: FactionId,
    to: FactionId,
    amount: u32,
    ledger: &mut ResourceLedger,
    diplomacy: &DiplomacyLedger,
) -> bool {
    if amount == 0 || !diplomacy.at_peace(from, to) {
        return false;
    }
    if !ledger.is_registered(from) || !ledger.is_registered(to) {
        return false;
    }
    if !ledger.remove(from, Commodity::Gold, amount) {
        return false;
    }
    ledger.add(to, Commodity::Gold, amount);
    tracing::info!(from = from.name(), to = to.name(), amount, "gold traded");
    true
}
