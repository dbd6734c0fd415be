use chrono::NaiveDate;
use colored::Colorize;
use gomi::api::{CmdMessage, MessageLevel};
use gomi::config::{GomiConfig, KEYS};
use gomi::model::{CompletionRecord, Stop};
use gomi::view::{Dashboard, HistoryView, PendingList, StopStatus};
use std::fmt::Write;
use timeago::Formatter;
use unicode_width::UnicodeWidthStr;

const DONE_MARKER: &str = "✓";
const PENDING_MARKER: &str = "·";
const AGE_WIDTH: usize = 12;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn render_dashboard(dash: &Dashboard, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}",
        "Progress:".bold(),
        dash.progress.to_string().bold()
    );

    if let Some(record) = &dash.banner {
        let _ = writeln!(
            out,
            "{}",
            format!(
                "{} Round completed on {} ({} stops)",
                DONE_MARKER, record.date, record.count
            )
            .green()
        );
    }

    out.push('\n');
    match &dash.pending {
        PendingList::AllCollected => {
            let _ = writeln!(out, "{}", "All stops collected.".green());
        }
        PendingList::Pending(stops) => {
            let _ = writeln!(out, "{}", "Pending:".bold());
            let width = name_width(stops.iter());
            for stop in stops {
                let _ = writeln!(out, "  {}", stop_line(stop, width));
            }
        }
    }

    out.push('\n');
    out.push_str(&render_history(&dash.history, today));
    out
}

pub(super) fn render_stops(stops: &[StopStatus]) -> String {
    let mut out = String::new();
    let width = name_width(stops.iter().map(|s| &s.stop));
    for status in stops {
        let marker = if status.collected {
            DONE_MARKER.green()
        } else {
            PENDING_MARKER.red()
        };
        let _ = writeln!(out, "{} {}", marker, stop_line(&status.stop, width));
    }
    out
}

pub(super) fn render_history(history: &HistoryView, today: NaiveDate) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "History:".bold());
    match history {
        HistoryView::NoHistory => {
            let _ = writeln!(out, "  {}", "No completed rounds yet.".dimmed());
        }
        HistoryView::Recent(entries) => {
            for record in entries {
                let _ = writeln!(out, "  {}", history_line(record, today));
            }
        }
    }
    out
}

pub(super) fn render_config(config: &GomiConfig) -> String {
    let width = KEYS.iter().map(|k| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for key in KEYS {
        let value = config.get(key).unwrap_or_default();
        let _ = writeln!(out, "{:<width$}  {}", key, value, width = width);
    }
    out
}

fn name_width<'a>(stops: impl Iterator<Item = &'a Stop>) -> usize {
    stops.map(|s| s.name.width()).max().unwrap_or(0)
}

fn stop_line(stop: &Stop, name_width: usize) -> String {
    // format! pads by char count, which is wrong for wide characters
    let padding = " ".repeat(name_width.saturating_sub(stop.name.width()));
    format!(
        "{} {}{}  {}",
        format!("{}.", stop.id).yellow(),
        stop.name,
        padding,
        stop.address.dimmed()
    )
}

fn history_line(record: &CompletionRecord, today: NaiveDate) -> String {
    format!(
        "{}  {} stops  {}",
        record.date,
        record.count,
        format_age(record.date, today).dimmed()
    )
}

fn format_age(date: NaiveDate, today: NaiveDate) -> String {
    let days = today.signed_duration_since(date).num_days();
    let age = if days <= 0 {
        "today".to_string()
    } else {
        let duration = chrono::Duration::days(days).to_std().unwrap_or_default();
        Formatter::new().convert(duration)
    };
    format!("{:>width$}", age, width = AGE_WIDTH)
}
