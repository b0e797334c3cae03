use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use super::{
    expense::{Expense, RecurringExpense},
    frequency::Bucket,
};

/// Hard cap on occurrences projected for a single template in one run. A
/// template with a deep backlog projects the cap now and the remainder on
/// the next run.
pub const MAX_PROJECTED_OCCURRENCES: usize = 1024;

/// Lazy sequence of occurrence dates for one template: `start_date`, then
/// one calendar step from the previous occurrence, while the occurrence is
/// on or before the reference date.
///
/// Each date is computed from the last rather than by multiplying an index,
/// so variable-length months stay correct; the iterator stops if calendar
/// arithmetic ever fails to move the date strictly forward.
pub struct OccurrenceIter {
    template: RecurringExpense,
    anchor_day: u32,
    upcoming: Option<NaiveDate>,
    until: NaiveDate,
    emitted: usize,
}

impl OccurrenceIter {
    pub fn new(template: &RecurringExpense, until: NaiveDate) -> Self {
        let start = template.start_date;
        Self {
            template: template.clone(),
            anchor_day: start.day(),
            upcoming: Some(start),
            until,
            emitted: 0,
        }
    }
}

impl Iterator for OccurrenceIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.upcoming?;
        if current > self.until || self.emitted >= MAX_PROJECTED_OCCURRENCES {
            self.upcoming = None;
            return None;
        }
        let advanced = self.template.frequency.advance(current, self.anchor_day);
        self.upcoming = if advanced > current {
            Some(advanced)
        } else {
            None
        };
        self.emitted += 1;
        Some(current)
    }
}

/// Materializes the expenses missing from `existing` for every active
/// template, covering all occurrences from each template's start date
/// through `reference`.
///
/// An occurrence is considered covered when an existing expense carries the
/// template's id and a date in the same calendar bucket at the template's
/// frequency granularity, so re-running projection never duplicates a
/// bucket even if a stored date drifted within it. Pure: returns only the
/// new expenses.
pub fn project(
    templates: &[RecurringExpense],
    existing: &[Expense],
    reference: NaiveDate,
) -> Vec<Expense> {
    let mut created = Vec::new();

    for template in templates.iter().filter(|t| t.is_active) {
        let mut covered: HashSet<Bucket> = existing
            .iter()
            .filter(|e| e.recurring_expense_id == Some(template.id))
            .map(|e| template.frequency.bucket(e.date))
            .collect();

        let mut generated = 0usize;
        for occurrence in OccurrenceIter::new(template, reference) {
            let bucket = template.frequency.bucket(occurrence);
            if covered.insert(bucket) {
                created.push(Expense::from_template(template, occurrence));
                generated += 1;
            }
        }
        if generated > 0 {
            tracing::debug!(
                template = %template.id,
                frequency = template.frequency.label(),
                generated,
                "projected recurring occurrences"
            );
        }
    }

    created
}
