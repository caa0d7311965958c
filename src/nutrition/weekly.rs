use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::MealNote;
use crate::nutrition::{aggregate, dates, AverageTotals, HasTotals, Totals};

/// Weeks of history offered by the summary view, current week included.
pub const HISTORY_WEEKS: u32 = 8;
pub const DAYS_PER_WEEK: u32 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayBucket {
    pub date: NaiveDate,
    pub totals: Totals,
}

impl DayBucket {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn date_key(&self) -> String {
        dates::date_key(self.date)
    }
}

impl HasTotals for DayBucket {
    fn totals(&self) -> Totals {
        self.totals
    }
}

/// Monday-to-Sunday totals for one week.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub week_offset: u32,
    pub days: Vec<DayBucket>,
}

impl WeekSummary {
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|day| day.date)
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|day| day.date)
    }

    pub fn totals(&self) -> Totals {
        aggregate(&self.days)
    }

    /// Always divided by seven, including days with nothing logged.
    pub fn averages(&self) -> AverageTotals {
        AverageTotals::over(self.totals(), DAYS_PER_WEEK)
    }
}

fn totals_by_day(notes: &[MealNote]) -> HashMap<NaiveDate, Totals> {
    let mut by_day: HashMap<NaiveDate, Vec<&MealNote>> = HashMap::new();
    for note in notes {
        by_day.entry(note.date).or_default().push(note);
    }
    by_day
        .into_iter()
        .map(|(date, group)| (date, aggregate(group.iter().copied())))
        .collect()
}

fn build_week(by_day: &HashMap<NaiveDate, Totals>, week_offset: u32, today: NaiveDate) -> WeekSummary {
    let monday = dates::week_start(today, week_offset);
    let days = dates::days_from(monday, DAYS_PER_WEEK)
        .into_iter()
        .map(|date| DayBucket {
            date,
            totals: by_day.get(&date).copied().unwrap_or_default(),
        })
        .collect();
    WeekSummary { week_offset, days }
}

/// The week `week_offset` weeks before the one containing `today`.
pub fn weekly_summary(notes: &[MealNote], week_offset: u32, today: NaiveDate) -> WeekSummary {
    build_week(&totals_by_day(notes), week_offset, today)
}

/// The current week followed by the preceding ones, newest first.
pub fn weekly_history(notes: &[MealNote], today: NaiveDate) -> Vec<WeekSummary> {
    let by_day = totals_by_day(notes);
    (0..HISTORY_WEEKS)
        .map(|offset| build_week(&by_day, offset, today))
        .collect()
}
