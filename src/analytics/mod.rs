//! Pure query functions over a snapshot of the expense store. Nothing here
//! mutates; every monetary sum is computed in integer cents.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::book::{money, BudgetBook, Category, Expense, RecurringExpense};

/// Number of aligned periods a trend series always covers.
pub const TREND_PERIODS: usize = 5;

/// Calendar-aligned aggregation granularity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeFrame {
    Week,
    Month,
    Year,
}

/// Half-open calendar interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

impl TimeFrame {
    /// The aligned window containing `reference`: ISO Monday week, calendar
    /// month, or calendar year.
    pub fn window(&self, reference: NaiveDate) -> DateWindow {
        let start = self.window_start(reference);
        DateWindow {
            start,
            end: self.next_start(start),
        }
    }

    fn window_start(&self, reference: NaiveDate) -> NaiveDate {
        match self {
            TimeFrame::Week => {
                let delta = reference.weekday().num_days_from_monday() as i64;
                reference - Duration::days(delta)
            }
            TimeFrame::Month => reference.with_day(1).unwrap_or(reference),
            TimeFrame::Year => {
                NaiveDate::from_ymd_opt(reference.year(), 1, 1).unwrap_or(reference)
            }
        }
    }

    fn next_start(&self, start: NaiveDate) -> NaiveDate {
        match self {
            TimeFrame::Week => start + Duration::weeks(1),
            TimeFrame::Month => {
                let (year, month) = if start.month() == 12 {
                    (start.year() + 1, 1)
                } else {
                    (start.year(), start.month() + 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start)
            }
            TimeFrame::Year => {
                NaiveDate::from_ymd_opt(start.year() + 1, 1, 1).unwrap_or(start)
            }
        }
    }

    fn previous_start(&self, start: NaiveDate) -> NaiveDate {
        match self {
            TimeFrame::Week => start - Duration::weeks(1),
            TimeFrame::Month => {
                let (year, month) = if start.month() == 1 {
                    (start.year() - 1, 12)
                } else {
                    (start.year(), start.month() - 1)
                };
                NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(start)
            }
            TimeFrame::Year => {
                NaiveDate::from_ymd_opt(start.year() - 1, 1, 1).unwrap_or(start)
            }
        }
    }
}

/// One category's summed total, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total_cents: i64,
}

/// One aligned period of a trend series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub window: DateWindow,
    pub total_cents: i64,
}

/// Sum of amounts, in cents, for expenses matching the optional category
/// filter and dated inside the time-frame window containing `reference`.
pub fn total_expenses(
    expenses: &[Expense],
    category: Option<Category>,
    frame: TimeFrame,
    reference: NaiveDate,
) -> i64 {
    let window = frame.window(reference);
    money::sum_cents(
        expenses
            .iter()
            .filter(|e| window.contains(e.date))
            .filter(|e| category.map_or(true, |c| e.category == c))
            .map(|e| e.amount),
    )
}

/// Per-category totals for the window containing `reference`, zero totals
/// dropped, sorted descending. Equal totals keep [`Category::ALL`] order
/// (the sort is stable over input pre-ordered that way).
pub fn expenses_by_category(
    expenses: &[Expense],
    frame: TimeFrame,
    reference: NaiveDate,
) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Category::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            total_cents: total_expenses(expenses, Some(category), frame, reference),
        })
        .filter(|entry| entry.total_cents != 0)
        .collect();
    totals.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    totals
}

/// Monthly-equivalent totals per category for active templates: each
/// template's amount is normalized to its average monthly cost before
/// summing, so a yearly insurance premium and a weekly shop compare fairly.
pub fn recurring_by_category(templates: &[RecurringExpense]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Category::ALL
        .iter()
        .map(|&category| CategoryTotal {
            category,
            total_cents: money::sum_cents(
                templates
                    .iter()
                    .filter(|t| t.is_active && t.category == category)
                    .map(|t| t.amount * t.frequency.monthly_factor()),
            ),
        })
        .filter(|entry| entry.total_cents != 0)
        .collect();
    totals.sort_by(|a, b| b.total_cents.cmp(&a.total_cents));
    totals
}

/// The five most recent aligned periods ending at the period containing
/// `reference`, oldest first. Periods without expenses report 0; categories
/// in `excluded` are omitted from every sum.
pub fn trend_series(
    expenses: &[Expense],
    frame: TimeFrame,
    reference: NaiveDate,
    excluded: &[Category],
) -> Vec<TrendPoint> {
    let mut starts = Vec::with_capacity(TREND_PERIODS);
    let mut start = frame.window(reference).start;
    for _ in 0..TREND_PERIODS {
        starts.push(start);
        start = frame.previous_start(start);
    }
    starts.reverse();

    starts
        .into_iter()
        .map(|start| {
            let window = DateWindow {
                start,
                end: frame.next_start(start),
            };
            let total_cents = money::sum_cents(
                expenses
                    .iter()
                    .filter(|e| window.contains(e.date))
                    .filter(|e| !excluded.contains(&e.category))
                    .map(|e| e.amount),
            );
            TrendPoint {
                window,
                total_cents,
            }
        })
        .collect()
}

/// `spent / budget` when the budget is positive, else 0. Never clamped;
/// overspending reports a ratio above 1 and display layers decide what to
/// do with it.
pub fn budget_progress(spent_cents: i64, budget_cents: i64) -> f64 {
    if budget_cents > 0 {
        spent_cents as f64 / budget_cents as f64
    } else {
        0.0
    }
}

/// Progress against a category's monthly ceiling for the month containing
/// `reference`.
pub fn category_budget_progress(
    expenses: &[Expense],
    budgets: &BudgetBook,
    category: Category,
    reference: NaiveDate,
) -> f64 {
    let spent = total_expenses(expenses, Some(category), TimeFrame::Month, reference);
    let budget = money::to_cents(budgets.get(category));
    budget_progress(spent, budget)
}
