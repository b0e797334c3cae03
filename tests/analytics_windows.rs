use chrono::NaiveDate;
use spendbook::analytics::{
    budget_progress, category_budget_progress, expenses_by_category, recurring_by_category,
    total_expenses, trend_series, TimeFrame, TREND_PERIODS,
};
use spendbook::book::{BudgetBook, Category, Expense, Frequency, RecurringExpense};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn expense(amount: f64, category: Category, on: NaiveDate) -> Expense {
    Expense::new(amount, category, on, "")
}

#[test]
fn month_total_uses_the_half_open_window() {
    let expenses = vec![
        expense(10.0, Category::Food, date(2024, 2, 29)),
        expense(20.0, Category::Food, date(2024, 3, 1)),
        expense(30.0, Category::Shopping, date(2024, 3, 31)),
        expense(40.0, Category::Food, date(2024, 4, 1)),
    ];
    let total = total_expenses(&expenses, None, TimeFrame::Month, date(2024, 3, 15));
    assert_eq!(total, 5000, "only March expenses belong to the March window");
}

#[test]
fn category_filter_narrows_the_total() {
    let expenses = vec![
        expense(20.0, Category::Food, date(2024, 3, 1)),
        expense(30.0, Category::Shopping, date(2024, 3, 2)),
    ];
    let food = total_expenses(
        &expenses,
        Some(Category::Food),
        TimeFrame::Month,
        date(2024, 3, 15),
    );
    assert_eq!(food, 2000);
}

#[test]
fn week_total_covers_monday_through_sunday() {
    // Reference 2024-05-08 is a Wednesday; its ISO week runs May 6 - May 12.
    let expenses = vec![
        expense(5.0, Category::Food, date(2024, 5, 6)),
        expense(7.0, Category::Food, date(2024, 5, 12)),
        expense(100.0, Category::Food, date(2024, 5, 13)),
    ];
    let total = total_expenses(&expenses, None, TimeFrame::Week, date(2024, 5, 8));
    assert_eq!(total, 1200);
}

#[test]
fn year_total_is_calendar_aligned() {
    let expenses = vec![
        expense(10.0, Category::Food, date(2023, 12, 31)),
        expense(20.0, Category::Food, date(2024, 1, 1)),
        expense(30.0, Category::Food, date(2024, 12, 31)),
    ];
    let total = total_expenses(&expenses, None, TimeFrame::Year, date(2024, 6, 1));
    assert_eq!(total, 5000);
}

#[test]
fn breakdown_sorts_descending_and_drops_zero_totals() {
    let reference = date(2024, 3, 15);
    let expenses = vec![
        expense(25.0, Category::Transportation, date(2024, 3, 10)),
        expense(50.0, Category::Food, date(2024, 3, 5)),
        // Groceries only outside the window: must not appear.
        expense(60.0, Category::Groceries, date(2024, 2, 5)),
    ];
    let breakdown = expenses_by_category(&expenses, TimeFrame::Month, reference);
    let pairs: Vec<_> = breakdown
        .iter()
        .map(|entry| (entry.category, entry.total_cents))
        .collect();
    assert_eq!(
        pairs,
        vec![(Category::Food, 5000), (Category::Transportation, 2500)]
    );
}

#[test]
fn breakdown_ties_keep_declaration_order() {
    let reference = date(2024, 3, 15);
    let expenses = vec![
        expense(30.0, Category::Shopping, date(2024, 3, 1)),
        expense(30.0, Category::Entertainment, date(2024, 3, 2)),
    ];
    let breakdown = expenses_by_category(&expenses, TimeFrame::Month, reference);
    let order: Vec<_> = breakdown.iter().map(|entry| entry.category).collect();
    assert_eq!(order, vec![Category::Entertainment, Category::Shopping]);
}

#[test]
fn recurring_breakdown_normalizes_to_monthly_equivalents() {
    let start = date(2024, 1, 1);
    let mut paused = RecurringExpense::new(
        500.0,
        Category::Education,
        "course",
        Frequency::Monthly,
        start,
    );
    paused.is_active = false;
    let templates = vec![
        RecurringExpense::new(2.0, Category::Food, "coffee", Frequency::Daily, start),
        RecurringExpense::new(10.0, Category::Groceries, "veg box", Frequency::Weekly, start),
        RecurringExpense::new(
            10.0,
            Category::Transportation,
            "car wash",
            Frequency::Biweekly,
            start,
        ),
        RecurringExpense::new(
            15.0,
            Category::Subscriptions,
            "streaming",
            Frequency::Monthly,
            start,
        ),
        RecurringExpense::new(30.0, Category::Utilities, "water", Frequency::Quarterly, start),
        RecurringExpense::new(120.0, Category::Healthcare, "dental", Frequency::Yearly, start),
        paused,
    ];
    let breakdown = recurring_by_category(&templates);
    let pairs: Vec<_> = breakdown
        .iter()
        .map(|entry| (entry.category, entry.total_cents))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (Category::Food, 6000),
            (Category::Groceries, 4000),
            (Category::Transportation, 2000),
            (Category::Subscriptions, 1500),
            (Category::Utilities, 1000),
            (Category::Healthcare, 1000),
        ]
    );
}

#[test]
fn trend_series_always_returns_five_periods_oldest_first() {
    let expenses = vec![
        expense(10.0, Category::Food, date(2024, 1, 15)),
        expense(20.0, Category::Food, date(2024, 3, 20)),
        expense(30.0, Category::Food, date(2024, 5, 30)),
    ];
    let series = trend_series(&expenses, TimeFrame::Month, date(2024, 5, 20), &[]);
    assert_eq!(series.len(), TREND_PERIODS);
    let starts: Vec<_> = series.iter().map(|point| point.window.start).collect();
    assert_eq!(
        starts,
        vec![
            date(2024, 1, 1),
            date(2024, 2, 1),
            date(2024, 3, 1),
            date(2024, 4, 1),
            date(2024, 5, 1)
        ]
    );
    let totals: Vec<_> = series.iter().map(|point| point.total_cents).collect();
    assert_eq!(totals, vec![1000, 0, 2000, 0, 3000]);
}

#[test]
fn trend_series_omits_excluded_categories_from_every_period() {
    let expenses = vec![
        expense(10.0, Category::Food, date(2024, 4, 15)),
        expense(999.0, Category::Housing, date(2024, 4, 16)),
        expense(999.0, Category::Housing, date(2024, 5, 2)),
        expense(5.0, Category::Food, date(2024, 5, 3)),
    ];
    let series = trend_series(
        &expenses,
        TimeFrame::Month,
        date(2024, 5, 20),
        &[Category::Housing],
    );
    let totals: Vec<_> = series.iter().map(|point| point.total_cents).collect();
    assert_eq!(totals, vec![0, 0, 0, 1000, 500]);
}

#[test]
fn weekly_trend_crosses_year_boundaries() {
    // Reference 2024-01-10 (Wed): periods start Dec 11, 18, 25, Jan 1, Jan 8.
    let series = trend_series(&[], TimeFrame::Week, date(2024, 1, 10), &[]);
    let starts: Vec<_> = series.iter().map(|point| point.window.start).collect();
    assert_eq!(
        starts,
        vec![
            date(2023, 12, 11),
            date(2023, 12, 18),
            date(2023, 12, 25),
            date(2024, 1, 1),
            date(2024, 1, 8)
        ]
    );
}

#[test]
fn budget_progress_handles_zero_and_overspend() {
    assert_eq!(budget_progress(1234, 0), 0.0);
    assert_eq!(budget_progress(0, 10000), 0.0);
    assert!(budget_progress(15000, 10000) > 1.0);

    let expenses = vec![
        expense(150.0, Category::Food, date(2024, 3, 10)),
        expense(40.0, Category::Food, date(2024, 2, 10)),
    ];
    let mut budgets = BudgetBook::new();
    budgets.set(Category::Food, 100.0);
    let progress = category_budget_progress(&expenses, &budgets, Category::Food, date(2024, 3, 15));
    assert_eq!(progress, 1.5);

    let unbudgeted =
        category_budget_progress(&expenses, &budgets, Category::Shopping, date(2024, 3, 15));
    assert_eq!(unbudgeted, 0.0);
}
