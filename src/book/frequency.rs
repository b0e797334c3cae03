use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Cadence of a recurring expense template. The variant names are the wire
/// strings (`"Monthly"`, `"Biweekly"`, ...) and must stay stable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Yearly,
}

/// Calendar granularity a frequency advances by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Granularity-aligned period used to decide whether an occurrence has
/// already been materialized. Bucket equality, not date equality, is the
/// projection idempotency key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Day(NaiveDate),
    Week { year: i32, week: u32 },
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year(i32),
}

impl Frequency {
    pub fn calendar_unit(&self) -> CalendarUnit {
        match self {
            Frequency::Daily => CalendarUnit::Day,
            Frequency::Weekly | Frequency::Biweekly => CalendarUnit::Week,
            Frequency::Monthly | Frequency::Quarterly => CalendarUnit::Month,
            Frequency::Yearly => CalendarUnit::Year,
        }
    }

    pub fn step(&self) -> u32 {
        match self {
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly | Frequency::Yearly => 1,
            Frequency::Biweekly => 2,
            Frequency::Quarterly => 3,
        }
    }

    /// Factor that normalizes one occurrence amount to its average monthly
    /// cost: daily spends land ~30 times a month, quarterly a third of one.
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Frequency::Daily => 30.0,
            Frequency::Weekly => 4.0,
            Frequency::Biweekly => 2.0,
            Frequency::Monthly => 1.0,
            Frequency::Quarterly => 1.0 / 3.0,
            Frequency::Yearly => 1.0 / 12.0,
        }
    }

    /// One calendar step forward from `from`. Month and year steps re-anchor
    /// to the template's original day-of-month so a monthly schedule started
    /// on the 31st lands on Feb 29 and then back on Mar 31, not Mar 29.
    pub fn advance(&self, from: NaiveDate, anchor_day: u32) -> NaiveDate {
        let step = self.step();
        match self.calendar_unit() {
            CalendarUnit::Day => from + Duration::days(step as i64),
            CalendarUnit::Week => from + Duration::weeks(step as i64),
            CalendarUnit::Month => shift_month(from, step as i32, anchor_day),
            CalendarUnit::Year => shift_year(from, step as i32, anchor_day),
        }
    }

    /// The calendar bucket containing `date` at this frequency's granularity.
    pub fn bucket(&self, date: NaiveDate) -> Bucket {
        match self {
            Frequency::Daily => Bucket::Day(date),
            Frequency::Weekly | Frequency::Biweekly => {
                let week = date.iso_week();
                Bucket::Week {
                    year: week.year(),
                    week: week.week(),
                }
            }
            Frequency::Monthly => Bucket::Month {
                year: date.year(),
                month: date.month(),
            },
            Frequency::Quarterly => Bucket::Quarter {
                year: date.year(),
                quarter: (date.month() - 1) / 3,
            },
            Frequency::Yearly => Bucket::Year(date.year()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "Quarterly",
            Frequency::Yearly => "Yearly",
        }
    }
}

fn shift_month(date: NaiveDate, months: i32, anchor_day: u32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    let day = anchor_day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

fn shift_year(date: NaiveDate, years: i32, anchor_day: u32) -> NaiveDate {
    let year = date.year() + years;
    let month = date.month();
    let day = anchor_day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    (first_next - Duration::days(1)).day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn advance_by_simple_units() {
        let start = date(2024, 1, 10);
        assert_eq!(Frequency::Daily.advance(start, 10), date(2024, 1, 11));
        assert_eq!(Frequency::Weekly.advance(start, 10), date(2024, 1, 17));
        assert_eq!(Frequency::Biweekly.advance(start, 10), date(2024, 1, 24));
        assert_eq!(Frequency::Monthly.advance(start, 10), date(2024, 2, 10));
        assert_eq!(Frequency::Quarterly.advance(start, 10), date(2024, 4, 10));
        assert_eq!(Frequency::Yearly.advance(start, 10), date(2025, 1, 10));
    }

    #[test]
    fn monthly_advance_reanchors_to_original_day() {
        let jan31 = date(2024, 1, 31);
        let feb = Frequency::Monthly.advance(jan31, 31);
        assert_eq!(feb, date(2024, 2, 29));
        let mar = Frequency::Monthly.advance(feb, 31);
        assert_eq!(mar, date(2024, 3, 31));
    }

    #[test]
    fn yearly_advance_clamps_leap_day() {
        let leap = date(2024, 2, 29);
        assert_eq!(Frequency::Yearly.advance(leap, 29), date(2025, 2, 28));
        let back = Frequency::Yearly.advance(date(2027, 2, 28), 29);
        assert_eq!(back, date(2028, 2, 29));
    }

    #[test]
    fn quarterly_advance_crosses_year_end() {
        assert_eq!(
            Frequency::Quarterly.advance(date(2024, 11, 15), 15),
            date(2025, 2, 15)
        );
    }

    #[test]
    fn buckets_follow_frequency_granularity() {
        let d = date(2024, 5, 7);
        assert_eq!(Frequency::Daily.bucket(d), Bucket::Day(d));
        assert_eq!(
            Frequency::Weekly.bucket(d),
            Bucket::Week {
                year: 2024,
                week: 19
            }
        );
        assert_eq!(
            Frequency::Monthly.bucket(d),
            Bucket::Month {
                year: 2024,
                month: 5
            }
        );
        assert_eq!(
            Frequency::Quarterly.bucket(d),
            Bucket::Quarter {
                year: 2024,
                quarter: 1
            }
        );
        assert_eq!(Frequency::Yearly.bucket(d), Bucket::Year(2024));
    }

    #[test]
    fn iso_week_bucket_matches_across_month_boundary() {
        // 2024-04-29 (Mon) and 2024-05-05 (Sun) share ISO week 18.
        assert_eq!(
            Frequency::Biweekly.bucket(date(2024, 4, 29)),
            Frequency::Biweekly.bucket(date(2024, 5, 5))
        );
    }

    #[test]
    fn wire_labels_round_trip() {
        let json = serde_json::to_string(&Frequency::Biweekly).unwrap();
        assert_eq!(json, "\"Biweekly\"");
        let back: Frequency = serde_json::from_str("\"Quarterly\"").unwrap();
        assert_eq!(back, Frequency::Quarterly);
    }
}
