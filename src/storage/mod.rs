pub mod json_backend;

use crate::book::{BudgetBook, Expense, RecurringExpense};
use crate::errors::Result;

/// Abstraction over persistence media for the three independent stores.
///
/// `Ok(None)` from a load means the store has never been saved; callers
/// treat that as empty rather than an error. Save either completes or
/// leaves the previous state on disk intact.
pub trait StorageBackend: Send + Sync {
    fn load_expenses(&self) -> Result<Option<Vec<Expense>>>;
    fn save_expenses(&self, expenses: &[Expense]) -> Result<()>;

    fn load_recurring(&self) -> Result<Option<Vec<RecurringExpense>>>;
    fn save_recurring(&self, templates: &[RecurringExpense]) -> Result<()>;

    fn load_budgets(&self) -> Result<Option<BudgetBook>>;
    fn save_budgets(&self, budgets: &BudgetBook) -> Result<()>;
}

pub use json_backend::JsonStorage;
