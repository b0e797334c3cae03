use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Monthly spending ceilings per category. Categories absent from the map
/// have no budget; `get` reports those as 0.
///
/// The map serializes as a JSON object keyed by category wire name
/// (`{"Groceries": 300.0}`), which is the persisted budgets contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct BudgetBook {
    limits: BTreeMap<Category, f64>,
}

impl BudgetBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the ceiling for a category. Non-negativity is enforced at
    /// the store's mutation boundary, not here.
    pub fn set(&mut self, category: Category, amount: f64) {
        if amount == 0.0 {
            self.limits.remove(&category);
        } else {
            self.limits.insert(category, amount);
        }
    }

    /// Monthly ceiling for a category, 0 when unset.
    pub fn get(&self, category: Category) -> f64 {
        self.limits.get(&category).copied().unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.limits.iter().map(|(category, amount)| (*category, *amount))
    }
}
