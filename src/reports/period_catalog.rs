//! Period catalog
//!
//! The distinct months in which a user recorded anything, most recent first.

use chrono::NaiveDate;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::error::{InsightsError, InsightsResult};
use crate::models::period::parse_date;
use crate::models::Period;

/// Distinct periods across income and expense dates, most recent first.
///
/// When both sides are empty the catalog holds only the current calendar
/// period, so callers always have something to select.
pub fn distinct_periods(income_dates: &[NaiveDate], expense_dates: &[NaiveDate]) -> Vec<Period> {
    distinct_periods_or(income_dates, expense_dates, Period::current())
}

/// As [`distinct_periods`], with an explicit fallback period
pub fn distinct_periods_or(
    income_dates: &[NaiveDate],
    expense_dates: &[NaiveDate],
    fallback: Period,
) -> Vec<Period> {
    let periods: BTreeSet<Period> = income_dates
        .iter()
        .chain(expense_dates)
        .map(|date| Period::from_date(*date))
        .collect();

    if periods.is_empty() {
        warn!(%fallback, "no recorded activity, falling back to a single period");
        return vec![fallback];
    }

    debug!(
        dates = income_dates.len() + expense_dates.len(),
        periods = periods.len(),
        "built period catalog"
    );

    periods.into_iter().rev().collect()
}

/// As [`distinct_periods`], for raw date strings.
///
/// Any unparseable date fails the whole call.
pub fn distinct_periods_from_strs<S: AsRef<str>>(
    income_dates: &[S],
    expense_dates: &[S],
) -> InsightsResult<Vec<Period>> {
    let parse_all = |dates: &[S]| -> InsightsResult<Vec<NaiveDate>> {
        dates
            .iter()
            .map(|d| parse_date(d.as_ref()).map_err(InsightsError::from))
            .collect()
    };

    Ok(distinct_periods(
        &parse_all(income_dates)?,
        &parse_all(expense_dates)?,
    ))
}
