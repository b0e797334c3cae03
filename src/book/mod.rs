//! Expense domain models, recurrence projection, and money helpers.

pub mod budget;
pub mod category;
pub mod expense;
pub mod frequency;
pub mod money;
pub mod recurring;

pub use budget::BudgetBook;
pub use category::Category;
pub use expense::{Expense, RecurringExpense};
pub use frequency::{Bucket, CalendarUnit, Frequency};
pub use recurring::{project, OccurrenceIter, MAX_PROJECTED_OCCURRENCES};
