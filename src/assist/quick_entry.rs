//! Heuristic parser for one-line expense entry ("12.50 coffee yesterday").
//! Best effort by design: only the output contract (amount, date,
//! description) matters to the engine; anything unparseable is simply `None`.

use chrono::{Duration, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)[$€£]?(\d+(?:[.,]\d{1,2})?)(?:\s|$)").unwrap());
static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct QuickEntry {
    pub amount: f64,
    pub date: NaiveDate,
    pub description: String,
}

/// Extracts amount, date, and description from a free-text line.
///
/// The first money-looking token becomes the amount; an ISO date or the
/// words "today"/"yesterday" set the date (defaulting to `today`); whatever
/// remains is the description. Returns `None` when no amount is present.
pub fn parse(input: &str, today: NaiveDate) -> Option<QuickEntry> {
    let captures = AMOUNT_RE.captures(input)?;
    let amount_token = captures.get(1)?;
    let amount: f64 = amount_token.as_str().replace(',', ".").parse().ok()?;
    if amount <= 0.0 {
        return None;
    }
    let whole_match = captures.get(0)?;
    let mut remainder = format!(
        "{} {}",
        &input[..whole_match.start()],
        &input[whole_match.end()..]
    );

    let mut date = today;
    if let Some(range) = ISO_DATE_RE.find(&remainder).map(|m| m.range()) {
        if let Ok(parsed) = remainder[range.clone()].parse::<NaiveDate>() {
            date = parsed;
            remainder.replace_range(range, "");
        }
    }

    let mut words: Vec<&str> = Vec::new();
    for word in remainder.split_whitespace() {
        match word.to_ascii_lowercase().as_str() {
            "today" => date = today,
            "yesterday" => date = today - Duration::days(1),
            _ => words.push(word),
        }
    }

    Some(QuickEntry {
        amount,
        date,
        description: words.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn amount_and_description_with_default_date() {
        let today = date(2024, 3, 15);
        let entry = parse("12.50 coffee with Sam", today).unwrap();
        assert_eq!(entry.amount, 12.5);
        assert_eq!(entry.date, today);
        assert_eq!(entry.description, "coffee with Sam");
    }

    #[test]
    fn yesterday_keyword_shifts_the_date() {
        let today = date(2024, 3, 15);
        let entry = parse("groceries 42 yesterday", today).unwrap();
        assert_eq!(entry.amount, 42.0);
        assert_eq!(entry.date, date(2024, 3, 14));
        assert_eq!(entry.description, "groceries");
    }

    #[test]
    fn iso_date_and_currency_symbol() {
        let today = date(2024, 3, 15);
        let entry = parse("$9,99 2024-03-02 streaming", today).unwrap();
        assert_eq!(entry.amount, 9.99);
        assert_eq!(entry.date, date(2024, 3, 2));
        assert_eq!(entry.description, "streaming");
    }

    #[test]
    fn no_amount_means_no_entry() {
        assert!(parse("lunch with the team", date(2024, 3, 15)).is_none());
        assert!(parse("", date(2024, 3, 15)).is_none());
    }
}
