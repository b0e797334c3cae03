//! The single authoritative collection of expenses, recurring templates, and
//! budgets for a session.
//!
//! Mutations take `&mut self`, so the borrow checker enforces the
//! single-writer discipline: re-projection can never interleave with an
//! add/delete, and readers always observe a consistent snapshot. Hosts that
//! share the store across threads wrap it in a lock; analytics only need
//! `&self` borrows.
//!
//! Every mutation persists synchronously before returning. Persistence
//! failure is reported to the caller but the in-memory change is kept
//! (store-then-report, never rollback), so the session state stays
//! authoritative even when the disk is not.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    assist::{ApplyOutcome, AssistTicket},
    book::{project, BudgetBook, Category, Expense, RecurringExpense},
    errors::{EngineError, Result},
    storage::StorageBackend,
};

/// Outcome of pulling the persisted stores into memory. Unreadable stores
/// degrade to empty with a warning instead of failing the session.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub warnings: Vec<String>,
    pub projected: usize,
}

pub struct ExpenseStore {
    expenses: Vec<Expense>,
    recurring: Vec<RecurringExpense>,
    budgets: BudgetBook,
    storage: Box<dyn StorageBackend>,
    generation: u64,
}

impl ExpenseStore {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            expenses: Vec::new(),
            recurring: Vec::new(),
            budgets: BudgetBook::new(),
            storage,
            generation: 0,
        }
    }

    /// Loads all three stores and projects recurring templates through
    /// `reference`; this is the session-start hook. A store that fails to
    /// load falls back to empty and is reported in the warnings.
    pub fn load(&mut self, reference: NaiveDate) -> LoadReport {
        let mut report = LoadReport::default();

        self.expenses = match self.storage.load_expenses() {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                report.warnings.push(format!("expenses store unreadable: {err}"));
                Vec::new()
            }
        };
        self.recurring = match self.storage.load_recurring() {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                report
                    .warnings
                    .push(format!("recurring store unreadable: {err}"));
                Vec::new()
            }
        };
        self.budgets = match self.storage.load_budgets() {
            Ok(found) => found.unwrap_or_default(),
            Err(err) => {
                report.warnings.push(format!("budgets store unreadable: {err}"));
                BudgetBook::new()
            }
        };
        self.generation += 1;

        match self.project_recurring(reference) {
            Ok(projected) => report.projected = projected,
            Err(err) => report
                .warnings
                .push(format!("projection after load failed to persist: {err}")),
        }
        for warning in &report.warnings {
            tracing::warn!("{warning}");
        }
        tracing::info!(
            expenses = self.expenses.len(),
            templates = self.recurring.len(),
            projected = report.projected,
            "store loaded"
        );
        report
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn recurring(&self) -> &[RecurringExpense] {
        &self.recurring
    }

    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    /// Monotonic mutation counter; assist tickets use it to detect that the
    /// store moved on while a request was in flight.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn expense(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn recurring_expense(&self, id: Uuid) -> Option<&RecurringExpense> {
        self.recurring.iter().find(|t| t.id == id)
    }

    // --- expense mutations ---------------------------------------------

    pub fn add_expense(&mut self, expense: Expense) -> Result<()> {
        validate_amount(expense.amount)?;
        self.expenses.push(expense);
        self.generation += 1;
        self.persist_expenses()
    }

    /// Replaces the expense with the same id. Unknown ids leave the store
    /// untouched and surface as a not-found condition.
    pub fn update_expense(&mut self, expense: Expense) -> Result<()> {
        validate_amount(expense.amount)?;
        let slot = self
            .expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or(EngineError::ExpenseNotFound(expense.id))?;
        *slot = expense;
        self.generation += 1;
        self.persist_expenses()
    }

    pub fn delete_expense(&mut self, id: Uuid) -> Result<()> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return Err(EngineError::ExpenseNotFound(id));
        }
        self.generation += 1;
        self.persist_expenses()
    }

    // --- recurring template mutations ----------------------------------

    /// Adds a template and immediately projects its backlog through
    /// `reference`.
    pub fn add_recurring(&mut self, template: RecurringExpense, reference: NaiveDate) -> Result<()> {
        validate_template(&template)?;
        self.recurring.push(template);
        self.generation += 1;
        self.persist_recurring()?;
        self.project_recurring(reference)?;
        Ok(())
    }

    /// Replaces a template by id and re-projects. Already-generated expenses
    /// are never retroactively altered; a cadence change only shapes future
    /// occurrences.
    pub fn update_recurring(
        &mut self,
        template: RecurringExpense,
        reference: NaiveDate,
    ) -> Result<()> {
        validate_template(&template)?;
        let slot = self
            .recurring
            .iter_mut()
            .find(|t| t.id == template.id)
            .ok_or(EngineError::RecurringNotFound(template.id))?;
        *slot = template;
        self.generation += 1;
        self.persist_recurring()?;
        self.project_recurring(reference)?;
        Ok(())
    }

    /// Deletes a template and cascades to every expense generated from it.
    pub fn delete_recurring(&mut self, id: Uuid) -> Result<()> {
        let before = self.recurring.len();
        self.recurring.retain(|t| t.id != id);
        if self.recurring.len() == before {
            return Err(EngineError::RecurringNotFound(id));
        }
        let expenses_before = self.expenses.len();
        self.expenses
            .retain(|e| e.recurring_expense_id != Some(id));
        let cascaded = expenses_before - self.expenses.len();
        self.generation += 1;
        tracing::info!(template = %id, cascaded, "recurring expense deleted");
        self.persist_recurring()?;
        self.persist_expenses()
    }

    /// Materializes missing occurrences for every active template through
    /// `reference`; returns how many expenses were created.
    pub fn project_recurring(&mut self, reference: NaiveDate) -> Result<usize> {
        let created = project(&self.recurring, &self.expenses, reference);
        let count = created.len();
        if count > 0 {
            self.expenses.extend(created);
            self.generation += 1;
            self.persist_expenses()?;
        }
        Ok(count)
    }

    // --- budgets --------------------------------------------------------

    /// Overwrites a category's monthly ceiling. Negative ceilings are
    /// rejected here, at the caller-facing boundary.
    pub fn set_budget(&mut self, category: Category, amount: f64) -> Result<()> {
        if amount < 0.0 {
            return Err(EngineError::Validation(format!(
                "budget for {category} must not be negative"
            )));
        }
        self.budgets.set(category, amount);
        self.generation += 1;
        self.persist_budgets()
    }

    pub fn budget(&self, category: Category) -> f64 {
        self.budgets.get(category)
    }

    // --- queries --------------------------------------------------------

    /// Expenses matching an optional category and an optional inclusive date
    /// range, most recent first. Same-day order is stable but not part of
    /// the contract.
    pub fn filtered(
        &self,
        category: Option<Category>,
        range: Option<(NaiveDate, NaiveDate)>,
    ) -> Vec<&Expense> {
        let mut matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| range.map_or(true, |(from, to)| e.date >= from && e.date <= to))
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        matches
    }

    // --- assist integration ---------------------------------------------

    /// Captures a ticket for an in-flight categorization request against an
    /// existing expense.
    pub fn assist_ticket(&self, expense_id: Uuid) -> Result<AssistTicket> {
        if self.expense(expense_id).is_none() {
            return Err(EngineError::ExpenseNotFound(expense_id));
        }
        Ok(AssistTicket {
            expense_id,
            generation: self.generation,
        })
    }

    /// Applies a suggested category if the store has not moved on since the
    /// ticket was issued; stale responses are discarded, never applied to
    /// unrelated state.
    pub fn apply_categorization(
        &mut self,
        ticket: AssistTicket,
        category: Category,
    ) -> Result<ApplyOutcome> {
        if ticket.generation != self.generation {
            tracing::debug!(
                expense = %ticket.expense_id,
                "discarding stale categorization response"
            );
            return Ok(ApplyOutcome::Stale);
        }
        let expense = self
            .expenses
            .iter_mut()
            .find(|e| e.id == ticket.expense_id)
            .ok_or(EngineError::ExpenseNotFound(ticket.expense_id))?;
        expense.category = category;
        self.generation += 1;
        self.persist_expenses()?;
        Ok(ApplyOutcome::Applied)
    }

    // --- persistence ----------------------------------------------------

    fn persist_expenses(&self) -> Result<()> {
        self.storage.save_expenses(&self.expenses).map_err(|err| {
            tracing::warn!("expenses persisted in memory only: {err}");
            err
        })
    }

    fn persist_recurring(&self) -> Result<()> {
        self.storage.save_recurring(&self.recurring).map_err(|err| {
            tracing::warn!("recurring templates persisted in memory only: {err}");
            err
        })
    }

    fn persist_budgets(&self) -> Result<()> {
        self.storage.save_budgets(&self.budgets).map_err(|err| {
            tracing::warn!("budgets persisted in memory only: {err}");
            err
        })
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(EngineError::Validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

fn validate_template(template: &RecurringExpense) -> Result<()> {
    validate_amount(template.amount)?;
    if template.description.trim().is_empty() {
        return Err(EngineError::Validation(
            "recurring expense description must not be empty".into(),
        ));
    }
    Ok(())
}
