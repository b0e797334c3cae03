//! Boundary to the categorization / insight collaborator.
//!
//! The collaborator is an external service: the engine defines the contract
//! it calls through and the bookkeeping needed to survive slow or abandoned
//! requests. Implementations are expected to be timeout-bounded and
//! cancellable. Requests must not hold a borrow of the store while in
//! flight: capture an [`AssistTicket`] and a [`monthly_context`] snapshot
//! first, then re-enter the store to apply the result.

pub mod quick_entry;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    analytics::{total_expenses, TimeFrame},
    book::{Category, Expense},
    errors::Result,
};

/// What the categorization collaborator returns for a free-text description.
/// Only `category` feeds back into engine state; the amount is recomputed
/// from user input so a collaborator can never fabricate a wrong amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategorySuggestion {
    pub amount: f64,
    pub category: Category,
}

/// External collaborator contract.
pub trait AssistProvider: Send + Sync {
    fn categorize(&self, description: &str) -> Result<CategorySuggestion>;

    fn answer_question(
        &self,
        expenses: &[Expense],
        total_cents: i64,
        question: &str,
    ) -> Result<String>;
}

/// Claim check for an in-flight categorization request: the target expense
/// plus the store generation at capture time. The store refuses to apply a
/// response once its generation has moved on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssistTicket {
    pub expense_id: Uuid,
    pub generation: u64,
}

/// Result of applying a collaborator response back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The store changed while the request was in flight; the response was
    /// discarded.
    Stale,
}

/// Pre-filtered snapshot handed to the insight collaborator for a question
/// about the current month: the month's expenses plus their exact total.
pub fn monthly_context(expenses: &[Expense], reference: NaiveDate) -> (Vec<Expense>, i64) {
    let window = TimeFrame::Month.window(reference);
    let snapshot: Vec<Expense> = expenses
        .iter()
        .filter(|e| window.contains(e.date))
        .cloned()
        .collect();
    let total_cents = total_expenses(expenses, None, TimeFrame::Month, reference);
    (snapshot, total_cents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_context_filters_to_the_reference_month() {
        let expenses = vec![
            Expense::new(10.0, Category::Food, date(2024, 3, 5), "in"),
            Expense::new(20.0, Category::Food, date(2024, 2, 28), "out"),
            Expense::new(5.5, Category::Other, date(2024, 3, 31), "in"),
        ];
        let (snapshot, total_cents) = monthly_context(&expenses, date(2024, 3, 15));
        assert_eq!(snapshot.len(), 2);
        assert_eq!(total_cents, 1550);
    }
}
