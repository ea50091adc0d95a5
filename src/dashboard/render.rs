use std::fmt::Write;

use crate::{
    dashboard::{notification::Notification, view_model::DashboardViewModel},
    favorites::model::FavoriteResponse,
    market::model::MarketCoin,
};

const MISSING: &str = "-";

/// `$1234.50`
pub fn format_usd(value: f64) -> String {
    format!("${:.2}", value)
}

/// Rounds to a whole number and groups thousands: `900000000000` -> `900,000,000,000`.
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn or_missing(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING.to_string())
}

fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .enumerate()
        .map(|(i, (h, w))| align(h, *w, i == 0))
        .collect();
    let _ = writeln!(out, "{}", header_line.join("  "));
    let _ = writeln!(out, "{}", "-".repeat(widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1)));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (c, w))| align(c, *w, i == 0))
            .collect();
        let _ = writeln!(out, "{}", cells.join("  "));
    }

    out
}

// First column left-aligned, numbers right-aligned
fn align(cell: &str, width: usize, left: bool) -> String {
    if left {
        format!("{:<width$}", cell, width = width)
    } else {
        format!("{:>width$}", cell, width = width)
    }
}

pub fn render_market_table(coins: &[&MarketCoin]) -> String {
    let headers = [
        "Name",
        "Price (USD)",
        "Market Cap",
        "24h Change (%)",
        "Volume (24h)",
        "Supply",
        "24h High",
        "24h Low",
    ];

    let rows: Vec<Vec<String>> = coins
        .iter()
        .map(|coin| {
            vec![
                coin.name.clone(),
                or_missing(coin.current_price, format_usd),
                or_missing(coin.market_cap, |v| format!("${}", format_grouped(v))),
                or_missing(coin.price_change_percentage_24h, |v| format!("{:.2}%", v)),
                or_missing(coin.total_volume, |v| format!("${}", format_grouped(v))),
                or_missing(coin.circulating_supply, format_grouped),
                or_missing(coin.high_24h, format_usd),
                or_missing(coin.low_24h, format_usd),
            ]
        })
        .collect();

    render_table(&headers, &rows)
}

pub fn render_favorites_table(favorites: &[FavoriteResponse]) -> String {
    let headers = ["Name", "Id", "Price (USD)", "Market Cap", "24h Change (%)"];

    let rows: Vec<Vec<String>> = favorites
        .iter()
        .map(|favorite| {
            vec![
                favorite.name.clone(),
                favorite.id.clone(),
                format_usd(favorite.price),
                format!("${}", format_grouped(favorite.market_cap)),
                format!("{:.2}%", favorite.change_24h),
            ]
        })
        .collect();

    render_table(&headers, &rows)
}

pub fn render_notification(notification: &Notification) -> String {
    format!("[{}] {}", notification.kind, notification.message)
}

/// Full dashboard: notification, filtered market table and favorites.
pub fn render_dashboard(view: &DashboardViewModel) -> String {
    let mut out = String::new();

    if let Some(notification) = view.notification() {
        let _ = writeln!(out, "{}\n", render_notification(notification));
    }

    let _ = writeln!(out, "Cryptocurrency Prices");
    if !view.search_term().is_empty() {
        let _ = writeln!(out, "(search: \"{}\")", view.search_term());
    }
    let _ = writeln!(out, "{}", render_market_table(&view.filtered_coins()));

    let _ = writeln!(out, "Your Favorites");
    let _ = write!(out, "{}", render_favorites_table(view.favorites()));

    out
}
