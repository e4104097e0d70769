use std::fmt::Write as _;

use client_core::{FeederView, Notice, NoticeLevel, NoticeSurface};
use shared::protocol::plain_number;

pub const EMPTY_HISTORY: &str = "No feed events yet.";

pub fn feeding_badge(feeding_active: bool) -> &'static str {
    if feeding_active {
        "Servo running"
    } else {
        "Ready to feed"
    }
}

pub fn feeding_state(feeding_active: bool) -> &'static str {
    if feeding_active {
        "Feeding in progress"
    } else {
        "Idle"
    }
}

pub fn render_view(view: &FeederView) -> String {
    let mut out = String::new();

    match &view.status {
        Some(status) => {
            let _ = writeln!(
                out,
                "Bowl: {:.1} g  [{}]  {}",
                status.weight,
                feeding_badge(status.feeding_active),
                feeding_state(status.feeding_active)
            );
            let _ = writeln!(out, "Next feeding: {}", status.next_time_label());
        }
        None => {
            let _ = writeln!(out, "Waiting for device status...");
        }
    }
    if let Some(synced) = view.last_synced_at {
        let _ = writeln!(out, "Last sync: {}", synced.format("%H:%M:%S UTC"));
    }

    let _ = writeln!(out, "Schedule:");
    for row in &view.slots {
        let _ = write!(
            out,
            "  {}. {:>5}  {:>6} g",
            row.index.number(),
            row.time_field,
            row.weight_field
        );
        if !row.effective_active {
            out.push_str("  (inactive)");
        }
        if row.editing {
            out.push_str("  [editing]");
        }
        out.push('\n');
    }

    let _ = writeln!(out, "History:");
    if view.history.is_empty() {
        let _ = writeln!(out, "  {EMPTY_HISTORY}");
    }
    for entry in &view.history {
        let _ = writeln!(
            out,
            "  {:<8} {:<8} target {}g, final {}g",
            entry.kind,
            entry.time,
            plain_number(entry.target),
            plain_number(entry.final_weight)
        );
    }

    if let Some(message) = &view.manual_message {
        let _ = writeln!(out, "Manual feed: {message}");
    }
    out
}

pub fn render_notice(notice: &Notice) -> String {
    let marker = match notice.level {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "error",
    };
    match notice.surface {
        NoticeSurface::Blocking => format!("*** [{marker}] {} ***", notice.text),
        NoticeSurface::Inline => format!("[{marker}] {}", notice.text),
    }
}

#[cfg(test)]
#[path = "../tests/render_tests.rs"]
mod tests;
