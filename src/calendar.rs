use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::task::Task;

/// Number of tasks due on each day of `year`/`month`, keyed by day of month.
/// Tasks whose deadline doesn't parse carry no marker.
pub fn month_markers(tasks: &[Task], year: i32, month: u32) -> BTreeMap<u32, usize> {
    let mut markers = BTreeMap::new();
    for at in tasks.iter().filter_map(Task::deadline_at) {
        if at.year() == year && at.month() == month {
            *markers.entry(at.day()).or_insert(0) += 1;
        }
    }
    markers
}

/// Monday-first week rows for the month; cells outside the month are `None`.
pub fn month_weeks(year: i32, month: u32) -> Vec<[Option<u32>; 7]> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    let days = days_in_month(first);
    let offset = first.weekday().num_days_from_monday() as usize;

    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = offset;
    for day in 1..=days {
        week[slot] = Some(day);
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

fn days_in_month(first: NaiveDate) -> u32 {
    let next = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    };
    next.map(|n| n.signed_duration_since(first).num_days() as u32)
        .unwrap_or(31)
}
