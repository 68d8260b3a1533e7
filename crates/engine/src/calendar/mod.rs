//! Calendar bucketing for the challenge schedule
//!
//! Challenges are grouped into day cells by their calendar date. Dates were
//! already normalised to a `NaiveDate` when the challenge was parsed, so a cell
//! and a challenge match on the same `YYYY-MM-DD` key regardless of the offset
//! the backend attached to the original timestamp.

use chrono::{Datelike, Days, Months, NaiveDate};
use rewards_admin_core::{date_key, Challenge};
use std::collections::HashMap;
use std::fmt;

/// Challenges shown per day cell before the rest collapse into "+N more"
pub const MAX_VISIBLE_PER_DAY: usize = 3;

/// Visible period of the calendar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Month,
    Week,
    Day,
}

impl std::str::FromStr for CalendarView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(CalendarView::Month),
            "week" => Ok(CalendarView::Week),
            "day" => Ok(CalendarView::Day),
            _ => Err(format!("unknown calendar view: {s}")),
        }
    }
}

/// Challenges scheduled on one calendar day
#[derive(Debug, Clone)]
pub struct DayBucket<'a> {
    pub date: NaiveDate,
    pub key: String,
    pub is_today: bool,
    pub challenges: Vec<&'a Challenge>,
}

impl<'a> DayBucket<'a> {
    /// The challenges that fit in the cell
    pub fn visible(&self) -> &[&'a Challenge] {
        let end = self.challenges.len().min(MAX_VISIBLE_PER_DAY);
        &self.challenges[..end]
    }

    /// How many challenges did not fit
    pub fn overflow(&self) -> usize {
        self.challenges.len().saturating_sub(MAX_VISIBLE_PER_DAY)
    }

    pub fn is_empty(&self) -> bool {
        self.challenges.is_empty()
    }
}

/// A grid slot: either a real day or padding from an adjacent month
#[derive(Debug, Clone)]
pub enum CalendarCell<'a> {
    Padding,
    Day(DayBucket<'a>),
}

impl<'a> CalendarCell<'a> {
    pub fn bucket(&self) -> Option<&DayBucket<'a>> {
        match self {
            CalendarCell::Padding => None,
            CalendarCell::Day(bucket) => Some(bucket),
        }
    }
}

/// Read-only projection of challenges onto the visible period
#[derive(Debug, Clone)]
pub struct CalendarGrid<'a> {
    pub view: CalendarView,
    pub reference: NaiveDate,
    pub cells: Vec<CalendarCell<'a>>,
}

impl<'a> CalendarGrid<'a> {
    /// Cells grouped into rows of seven (a day view is a single row of one)
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell<'a>]> {
        self.cells.chunks(7)
    }

    /// Real days only, in order
    pub fn days(&self) -> impl Iterator<Item = &DayBucket<'a>> {
        self.cells.iter().filter_map(CalendarCell::bucket)
    }

    pub fn bucket(&self, date: NaiveDate) -> Option<&DayBucket<'a>> {
        self.days().find(|b| b.date == date)
    }

    /// First and last real day shown
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        period_range(self.view, self.reference)
    }

    pub fn total_challenges(&self) -> usize {
        self.days().map(|b| b.challenges.len()).sum()
    }

    pub fn title(&self) -> String {
        period_title(self.view, self.reference)
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalendarView::Month => "month",
            CalendarView::Week => "week",
            CalendarView::Day => "day",
        })
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

fn week_start(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// First and last real day of the period containing `reference`
pub fn period_range(view: CalendarView, reference: NaiveDate) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::Month => (first_of_month(reference), last_of_month(reference)),
        CalendarView::Week => {
            let start = week_start(reference);
            (start, start.checked_add_days(Days::new(6)).unwrap_or(start))
        }
        CalendarView::Day => (reference, reference),
    }
}

/// Heading for the visible period
pub fn period_title(view: CalendarView, reference: NaiveDate) -> String {
    match view {
        CalendarView::Month => reference.format("%B %Y").to_string(),
        CalendarView::Week => {
            let (start, end) = period_range(view, reference);
            format!("{} - {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
        }
        CalendarView::Day => reference.format("%A, %B %-d, %Y").to_string(),
    }
}

/// Move the reference date by `steps` periods (negative goes back)
pub fn shift(view: CalendarView, reference: NaiveDate, steps: i32) -> NaiveDate {
    let magnitude = steps.unsigned_abs();
    let shifted = match view {
        CalendarView::Month => {
            let anchor = first_of_month(reference);
            if steps >= 0 {
                anchor.checked_add_months(Months::new(magnitude))
            } else {
                anchor.checked_sub_months(Months::new(magnitude))
            }
        }
        CalendarView::Week | CalendarView::Day => {
            let days = u64::from(magnitude) * if view == CalendarView::Week { 7 } else { 1 };
            if steps >= 0 {
                reference.checked_add_days(Days::new(days))
            } else {
                reference.checked_sub_days(Days::new(days))
            }
        }
    };
    shifted.unwrap_or(reference)
}

/// Bucket `challenges` into the period around `reference`.
///
/// Challenges outside the period are ignored. Within a day, input order is kept.
pub fn build_grid<'a, I>(
    challenges: I,
    view: CalendarView,
    reference: NaiveDate,
    today: NaiveDate,
) -> CalendarGrid<'a>
where
    I: IntoIterator<Item = &'a Challenge>,
{
    let mut by_day: HashMap<String, Vec<&'a Challenge>> = HashMap::new();
    for challenge in challenges {
        by_day.entry(date_key(challenge.date)).or_default().push(challenge);
    }

    let (start, end) = period_range(view, reference);
    let mut cells = Vec::new();

    if view == CalendarView::Month {
        let leading = start.weekday().num_days_from_sunday() as usize;
        cells.extend(std::iter::repeat_with(|| CalendarCell::Padding).take(leading));
    }

    for date in start.iter_days().take_while(|d| *d <= end) {
        let key = date_key(date);
        let challenges = by_day.remove(&key).unwrap_or_default();
        cells.push(CalendarCell::Day(DayBucket {
            date,
            key,
            is_today: date == today,
            challenges,
        }));
    }

    if view == CalendarView::Month {
        let trailing = (7 - cells.len() % 7) % 7;
        cells.extend(std::iter::repeat_with(|| CalendarCell::Padding).take(trailing));
    }

    CalendarGrid {
        view,
        reference,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rewards_admin_core::{ChallengeStatus, ChallengeType, ClaimType};
    use serde_json::json;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn challenge(id: &str, raw_date: &str) -> Challenge {
        serde_json::from_value(json!({
            "id": id,
            "title": format!("Challenge {id}"),
            "type": "Game",
            "date": raw_date,
        }))
        .unwrap()
    }

    fn plain(id: &str, date: NaiveDate) -> Challenge {
        Challenge {
            id: id.to_string(),
            title: id.to_string(),
            challenge_type: ChallengeType::Survey,
            date,
            coin_reward: 1,
            xp_reward: 1,
            claim_type: ClaimType::Auto,
            visibility: true,
            status: ChallengeStatus::Scheduled,
        }
    }

    #[test]
    fn test_every_date_form_lands_in_one_matching_cell() {
        let challenges = vec![
            challenge("bare", "2025-01-15"),
            challenge("utc", "2025-01-15T00:00:00Z"),
            challenge("pacific", "2025-01-15T23:59:59-08:00"),
        ];
        let grid = build_grid(&challenges, CalendarView::Month, day(2025, 1, 1), day(2025, 1, 1));

        for c in &challenges {
            let holding: Vec<&DayBucket> = grid
                .days()
                .filter(|b| b.challenges.iter().any(|x| x.id == c.id))
                .collect();
            assert_eq!(holding.len(), 1, "{} should be in exactly one cell", c.id);
            assert_eq!(holding[0].key, "2025-01-15");
        }
        assert_eq!(grid.total_challenges(), 3);
    }

    #[test]
    fn test_month_padding() {
        // February 2025 starts on a Saturday and has 28 days
        let grid = build_grid(
            std::iter::empty::<&Challenge>(),
            CalendarView::Month,
            day(2025, 2, 14),
            day(2025, 2, 14),
        );
        let leading = grid
            .cells
            .iter()
            .take_while(|c| matches!(c, CalendarCell::Padding))
            .count();
        assert_eq!(leading, 6);
        assert_eq!(grid.days().count(), 28);
        assert_eq!(grid.cells.len() % 7, 0);
        assert_eq!(grid.cells.len(), 35);
        assert!(matches!(grid.cells.last(), Some(CalendarCell::Padding)));
        assert_eq!(grid.bucket(day(2025, 2, 14)).map(|b| b.is_today), Some(true));
    }

    #[test]
    fn test_month_without_trailing_padding() {
        // May 2021 starts on Saturday and ends on Monday 31st: 6 + 31 = 37 -> 42 cells
        let grid = build_grid(
            std::iter::empty::<&Challenge>(),
            CalendarView::Month,
            day(2021, 5, 3),
            day(2021, 5, 3),
        );
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.weeks().count(), 6);
    }

    #[test]
    fn test_out_of_period_challenges_are_ignored() {
        let challenges = vec![plain("jan", day(2025, 1, 31)), plain("feb", day(2025, 2, 1))];
        let grid = build_grid(&challenges, CalendarView::Month, day(2025, 2, 10), day(2025, 2, 10));
        assert_eq!(grid.total_challenges(), 1);
        assert_eq!(grid.bucket(day(2025, 2, 1)).unwrap().challenges[0].id, "feb");
    }

    #[test]
    fn test_overflow_after_three() {
        let d = day(2025, 6, 10);
        let challenges: Vec<Challenge> = (0..5).map(|i| plain(&format!("c{i}"), d)).collect();
        let grid = build_grid(&challenges, CalendarView::Day, d, d);
        let bucket = grid.bucket(d).unwrap();
        assert_eq!(bucket.visible().len(), MAX_VISIBLE_PER_DAY);
        assert_eq!(bucket.visible()[0].id, "c0");
        assert_eq!(bucket.overflow(), 2);
        assert_eq!(grid.cells.len(), 1);
    }

    #[test]
    fn test_week_spans_month_boundary() {
        // Wednesday 2025-01-01; week runs Sun 2024-12-29 .. Sat 2025-01-04
        let challenges = vec![plain("nye", day(2024, 12, 31)), plain("next", day(2025, 1, 5))];
        let grid = build_grid(&challenges, CalendarView::Week, day(2025, 1, 1), day(2025, 1, 1));
        assert_eq!(grid.cells.len(), 7);
        assert_eq!(grid.range(), (day(2024, 12, 29), day(2025, 1, 4)));
        assert_eq!(grid.total_challenges(), 1);
        assert_eq!(grid.title(), "Dec 29 - Jan 4, 2025");
    }

    #[test]
    fn test_input_is_not_mutated() {
        let challenges = vec![plain("a", day(2025, 3, 3))];
        let before = challenges.clone();
        let _ = build_grid(&challenges, CalendarView::Month, day(2025, 3, 1), day(2025, 3, 1));
        assert_eq!(challenges, before);
    }

    #[test]
    fn test_shift_periods() {
        assert_eq!(shift(CalendarView::Month, day(2025, 1, 31), 1), day(2025, 2, 1));
        assert_eq!(shift(CalendarView::Month, day(2025, 1, 15), -1), day(2024, 12, 1));
        assert_eq!(shift(CalendarView::Week, day(2025, 1, 15), 2), day(2025, 1, 29));
        assert_eq!(shift(CalendarView::Day, day(2025, 3, 1), -1), day(2025, 2, 28));
    }

    #[test]
    fn test_titles() {
        assert_eq!(period_title(CalendarView::Month, day(2025, 7, 4)), "July 2025");
        assert_eq!(
            period_title(CalendarView::Day, day(2025, 1, 15)),
            "Wednesday, January 15, 2025"
        );
    }
}
