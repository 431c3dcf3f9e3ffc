use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Temporal phrases the interpreter recognizes, in the order residual
/// extraction removes them from the question text.
pub const PERIOD_PHRASES: [&str; 5] = [
    "este ano",
    "esse ano",
    "este mes",
    "esse mes",
    "mes passado",
];

/// An inclusive calendar date range. `start <= end` always holds for
/// periods produced by [`Period::interpret`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    /// Maps a normalized question to a concrete date range.
    ///
    /// Phrases are matched as substrings, first match wins:
    /// 1. "mes passado" - the whole previous calendar month
    /// 2. "este mes" / "esse mes" - first of the current month through today
    /// 3. "este ano" / "esse ano" - January 1st through today
    /// 4. anything else - the last 30 days
    ///
    /// `today` is injected so the function is testable without a clock.
    pub fn interpret(normalized_question: &str, today: NaiveDate) -> Self {
        if normalized_question.contains("mes passado") {
            let (year, month) = previous_month(today);
            Self {
                start: NaiveDate::from_ymd_opt(year, month, 1).unwrap(),
                end: last_day_of_month(year, month),
            }
        } else if normalized_question.contains("este mes") || normalized_question.contains("esse mes")
        {
            Self {
                start: NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap(),
                end: today,
            }
        } else if normalized_question.contains("este ano") || normalized_question.contains("esse ano")
        {
            Self {
                start: NaiveDate::from_ymd_opt(today.year(), 1, 1).unwrap(),
                end: today,
            }
        } else {
            Self {
                start: today.checked_sub_days(Days::new(30)).unwrap(),
                end: today,
            }
        }
    }
}

fn previous_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    }
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap()
        .checked_sub_days(Days::new(1))
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_last_month() {
        let period = Period::interpret("gastos com frete no mes passado", date(2025, 7, 25));
        assert_eq!(period.start, date(2025, 6, 1));
        assert_eq!(period.end, date(2025, 6, 30));
    }

    #[test]
    fn test_last_month_january_rolls_to_previous_year() {
        let period = Period::interpret("mes passado", date(2025, 1, 15));
        assert_eq!(period.start, date(2024, 12, 1));
        assert_eq!(period.end, date(2024, 12, 31));
    }

    #[test]
    fn test_last_month_february_end() {
        let period = Period::interpret("mes passado", date(2025, 3, 10));
        assert_eq!(period.end, date(2025, 2, 28));

        let leap = Period::interpret("mes passado", date(2024, 3, 10));
        assert_eq!(leap.end, date(2024, 2, 29));
    }

    #[test]
    fn test_this_month() {
        let period = Period::interpret("quanto gastei este mes", date(2025, 7, 25));
        assert_eq!(period.start, date(2025, 7, 1));
        assert_eq!(period.end, date(2025, 7, 25));

        let alt = Period::interpret("gastos esse mes", date(2025, 7, 25));
        assert_eq!(alt, period);
    }

    #[test]
    fn test_this_year() {
        let period = Period::interpret("quanto gastei com combustivel este ano", date(2025, 7, 25));
        assert_eq!(period.start, date(2025, 1, 1));
        assert_eq!(period.end, date(2025, 7, 25));

        let alt = Period::interpret("esse ano", date(2025, 7, 25));
        assert_eq!(alt, period);
    }

    #[test]
    fn test_default_window_is_last_30_days() {
        let period = Period::interpret("gastos com frete", date(2025, 3, 10));
        assert_eq!(period.start, date(2025, 2, 8));
        assert_eq!(period.end, date(2025, 3, 10));
    }

    #[test]
    fn test_last_month_takes_precedence_over_this_year() {
        let period = Period::interpret("mes passado deste este ano", date(2025, 7, 25));
        assert_eq!(period.start, date(2025, 6, 1));
        assert_eq!(period.end, date(2025, 6, 30));
    }

    #[test]
    fn test_longer_relative_phrases_fall_through_to_default() {
        let period = Period::interpret("gastos nos ultimos tres meses", date(2025, 7, 25));
        assert_eq!(period.start, date(2025, 6, 25));
        assert_eq!(period.end, date(2025, 7, 25));
    }

    #[test]
    fn test_interpret_upholds_ordering_invariant() {
        for question in ["mes passado", "este mes", "este ano", "sem frase"] {
            let period = Period::interpret(question, date(2025, 1, 1));
            assert!(period.start <= period.end, "{question}");
        }
    }
}
