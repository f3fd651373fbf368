//! Plain-text rendering of the client screens.

use super::view::{ClientView, Results, Screen};
use crate::competitor::Competitor;
use crate::consts::format_number;

const BAR_CELLS: usize = 10;
const URL_WIDTH: usize = 36;
const NO_DESCRIPTION: &str = "—";

/// Row badge: A, B, C, ... by position.
pub fn badge(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Bar fill in percent. The visual maximum is 100, so any traffic of 100 or
/// more renders as a full bar.
pub fn bar_percent(traffic: u64) -> u64 {
    traffic.min(100)
}

pub fn render_bar(traffic: u64) -> String {
    let filled = (bar_percent(traffic) as usize * BAR_CELLS).div_ceil(100);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_CELLS - filled))
}

pub fn render_row(index: usize, competitor: &Competitor) -> String {
    let description = if competitor.description.trim().is_empty() {
        NO_DESCRIPTION
    } else {
        competitor.description.as_str()
    };
    format!(
        "  {}  {:<width$}  {} {:>6}  {}",
        badge(index),
        competitor.url,
        render_bar(competitor.traffic),
        format_number(competitor.traffic),
        description,
        width = URL_WIDTH,
    )
}

pub fn render_results(competitors: &[Competitor]) -> String {
    if competitors.is_empty() {
        return "No competitors found.".to_string();
    }

    let mut out = format!(
        "     {:<width$}  {:<17}  {}\n",
        "Competitors",
        "Organic traffic",
        "Short description",
        width = URL_WIDTH,
    );
    let rows: Vec<String> = competitors
        .iter()
        .enumerate()
        .map(|(i, c)| render_row(i, c))
        .collect();
    out.push_str(&rows.join("\n"));
    out
}

/// Text for whatever screen the view is on.
pub fn render_screen(view: &ClientView) -> String {
    match view.screen() {
        Screen::Search => "Paste your website URL to find its SEO competitors.".to_string(),
        Screen::Results(Results::Loading) => {
            format!("SEO competitors of {}\n\nLoading competitors...", view.url())
        }
        Screen::Results(Results::Loaded(competitors)) => format!(
            "SEO competitors of {}\n\n{}",
            view.url(),
            render_results(competitors)
        ),
    }
}
