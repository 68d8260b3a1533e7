//! Plain-text tables, JSON output and the calendar view

use chrono::NaiveDate;
use rewards_admin_core::{mask, Integration};
use rewards_admin_engine::calendar::{CalendarCell, CalendarGrid, CalendarView};
use rewards_admin_engine::Page;
use serde::Serialize;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Column-aligned text table
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<const N: usize>(headers: [&str; N]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<const N: usize>(&mut self, cells: [String; N]) {
        self.rows.push(cells.into());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if let Some(w) = widths.get_mut(i) {
                    *w = (*w).max(cell.chars().count());
                }
            }
        }

        let line = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<w$}", w = *w))
                .collect();
            padded.join("  ").trim_end().to_string()
        };

        let mut out = vec![line(self.headers.as_slice())];
        out.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        out.extend(self.rows.iter().map(|r| line(r.as_slice())));
        out.join("\n")
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Confirm a write: the saved record as JSON, or a one-line message
pub fn saved<T: Serialize>(json: bool, record: &T, message: String) -> anyhow::Result<()> {
    if json {
        print_json(record)
    } else {
        println!("{message}");
        Ok(())
    }
}

/// Print a table followed by the page summary
pub fn show_page<T>(table: &Table, page: &Page<T>) {
    if table.is_empty() {
        println!("No records found.");
    } else {
        println!("{}", table.render());
    }
    println!();
    println!("{} (page {} of {})", page.summary(), page.page, page.total_pages);
}

pub fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

/// An integration with its credentials masked, for JSON output
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskedIntegration<'a> {
    pub id: &'a str,
    pub provider: &'a str,
    pub display_name: &'a str,
    pub app_id: &'a str,
    pub api_key: String,
    pub secret: Option<String>,
    pub enabled: bool,
}

impl<'a> From<&'a Integration> for MaskedIntegration<'a> {
    fn from(i: &'a Integration) -> Self {
        Self {
            id: &i.id,
            provider: &i.provider,
            display_name: &i.display_name,
            app_id: &i.app_id,
            api_key: i.masked_api_key(),
            secret: i.secret.as_deref().map(mask),
            enabled: i.enabled,
        }
    }
}

/// Grid of day numbers with per-day counts, then the challenges of each day
pub fn calendar(grid: &CalendarGrid<'_>, today: NaiveDate) -> String {
    let mut out = vec![grid.title(), String::new()];

    if grid.view != CalendarView::Day {
        out.push(
            WEEKDAYS
                .iter()
                .map(|d| format!("{d:<8}"))
                .collect::<String>()
                .trim_end()
                .to_string(),
        );
        for week in grid.weeks() {
            let cells: String = week
                .iter()
                .map(|cell| match cell {
                    CalendarCell::Padding => format!("{:<8}", "."),
                    CalendarCell::Day(bucket) => {
                        let marker = if bucket.is_today { "*" } else { "" };
                        let count = if bucket.is_empty() {
                            String::new()
                        } else {
                            format!("({})", bucket.challenges.len())
                        };
                        let label = format!("{}{}{}", bucket.date.format("%-d"), marker, count);
                        format!("{:<8}", label)
                    }
                })
                .collect();
            out.push(cells.trim_end().to_string());
        }
        out.push(String::new());
    }

    let mut any = false;
    for bucket in grid.days().filter(|b| !b.is_empty()) {
        any = true;
        let today_note = if bucket.is_today { " (today)" } else { "" };
        out.push(format!("{}{}", bucket.date.format("%a %b %-d"), today_note));
        for challenge in bucket.visible() {
            out.push(format!(
                "  [{}] {} - {} ({} coins, {} XP){}",
                challenge.display_status(today),
                challenge.title,
                challenge.challenge_type,
                challenge.coin_reward,
                challenge.xp_reward,
                if challenge.visibility { "" } else { " hidden" }
            ));
        }
        if bucket.overflow() > 0 {
            out.push(format!("  +{} more", bucket.overflow()));
        }
    }
    if !any {
        out.push("No challenges scheduled.".to_string());
    }

    out.join("\n")
}
