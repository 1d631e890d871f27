use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICK: Duration = Duration::from_millis(100);
const TIP_DURATION: Duration = Duration::from_secs(4);
const TIPS: &[&str] = &[
    "Deep search uses a larger model and takes noticeably longer",
    "Pass --csv to keep the results as a spreadsheet",
    "Coordinates like '40.71, -74.00' narrow the map search",
];

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ])
}

/// Drives the spinner attached to `span` until `running` is cleared.
///
/// Shows `message` first, then alternates it with usage tips.
pub fn start_spinner(span: Span, running: Arc<AtomicBool>, message: String) -> JoinHandle<()> {
    span.pb_set_style(&spinner_style());
    span.pb_set_message(&message);

    thread::spawn(move || {
        let mut tip_index: usize = 0;
        let mut showing_tip = false;
        let mut next_switch = Instant::now() + TIP_DURATION;

        while running.load(Ordering::Relaxed) {
            if Instant::now() >= next_switch {
                if showing_tip {
                    span.pb_set_message(&message);
                } else {
                    let tip = TIPS[tip_index % TIPS.len()];
                    span.pb_set_message(&format!("{}", tip.italic().color(colors::SECONDARY)));
                    tip_index += 1;
                }
                showing_tip = !showing_tip;
                next_switch = Instant::now() + TIP_DURATION;
            }
            thread::sleep(TICK);
        }
    })
}

pub fn stop_spinner(running: &AtomicBool, handle: JoinHandle<()>) {
    running.store(false, Ordering::Relaxed);
    let _ = handle.join();
}

pub fn scanning_message(domain: &str) -> String {
    format!(
        "AI is scanning for {} opportunities...",
        domain.trim().color(colors::ACCENT).bold()
    )
}

pub fn loading_more_message(known: usize) -> String {
    format!(
        "Loading more results beyond {}...",
        format!("{known} companies").green().bold()
    )
}
