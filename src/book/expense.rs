use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{category::Category, frequency::Frequency};

/// A single dated financial event.
///
/// Field names serialize camelCase because that is the persisted wire format
/// the stores round-trip; they must stay stable across versions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    /// Weak back-reference to the originating template: an id to look up,
    /// never a live reference, so cascade deletion owns the cleanup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_expense_id: Option<Uuid>,
}

impl Expense {
    pub fn new(
        amount: f64,
        category: Category,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            date,
            description: description.into(),
            is_recurring: false,
            recurring_expense_id: None,
        }
    }

    /// Materializes one occurrence of a recurring template.
    pub fn from_template(template: &RecurringExpense, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount: template.amount,
            category: template.category,
            date,
            description: template.description.clone(),
            is_recurring: true,
            recurring_expense_id: Some(template.id),
        }
    }
}

/// A template that generates [`Expense`] instances on a schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecurringExpense {
    pub id: Uuid,
    pub amount: f64,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    #[serde(default = "RecurringExpense::default_active")]
    pub is_active: bool,
}

impl RecurringExpense {
    pub fn new(
        amount: f64,
        category: Category,
        description: impl Into<String>,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            category,
            description: description.into(),
            frequency,
            start_date,
            is_active: true,
        }
    }

    fn default_active() -> bool {
        true
    }
}
