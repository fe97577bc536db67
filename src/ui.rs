//! TUI rendering for the weather dashboard.
//!
//! Everything drawn here comes from [`App`]: the view state, the search panel
//! and the hourly tabs. No data is fetched or transformed beyond display
//! formatting.

use crate::app::{App, WeatherView};
use crate::format::{
    aqi_text, get_date, get_day_label, get_hours, get_time, icon_glyph, mps_to_kmh, resolve_icon,
};
use crate::models::{AirQuality, CurrentWeather};
use crate::tabs::HourlyTab;
use ratatui::{prelude::*, widgets::*};

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

/// Renders one frame of the dashboard.
///
/// The not-found panel replaces the dashboard entirely. Otherwise the
/// dashboard is drawn and the loading indicator, failure panel and search
/// panel are layered on top as needed.
///
/// # Arguments
///
/// * `f` - The ratatui frame to draw into (from `terminal.draw()`).
/// * `app` - Current application state.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(f, app, chunks[0]);

    if app.view.error_panel {
        render_not_found(f, chunks[1]);
    } else {
        if app.view.container_visible || app.view.current.is_some() {
            render_dashboard(f, app, chunks[1]);
        }
        if app.view.loading {
            render_loading(f, app, chunks[1]);
        }
        if let Some(ref message) = app.view.failure {
            render_failure(f, message, chunks[1]);
        }
    }

    if app.search.open {
        render_search(f, app, area);
    }
}

fn label(text: &str) -> Span<'_> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn hint<'a>(key: &'a str, text: &'a str, enabled: bool) -> Vec<Span<'a>> {
    let (key_style, text_style) = if enabled {
        (
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            Style::default(),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };
    vec![
        Span::styled(format!(" {} ", key), key_style),
        Span::styled(text, text_style),
        Span::raw("  "),
    ]
}

/// Title, place label and key hints. The current-location hint is greyed out
/// while it is disabled.
fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let place = app
        .view
        .place
        .as_deref()
        .unwrap_or(if app.view.loading { "…" } else { "" });

    let mut spans = vec![
        Span::styled(
            " nimbus ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(place.to_string(), Style::default().fg(Color::Yellow)),
        Span::raw("   "),
    ];
    spans.extend(hint("/", "search", true));
    spans.extend(hint("c", "current location", app.current_location_enabled()));
    spans.extend(hint("tab", "hourly view", true));
    spans.extend(hint("q", "quit", true));

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(header, area);
}

/// Dashboard view: now card and 5-day list on the left (35%), highlights and
/// hourly panel on the right (65%).
fn render_dashboard(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(columns[1]);

    if let Some(ref current) = app.view.current {
        render_now_card(f, current, left[0]);
    }
    if !app.view.daily.is_empty() {
        render_daily(f, &app.view, left[1]);
    }
    if let (Some(current), Some(air)) = (&app.view.current, &app.view.air) {
        render_highlights(f, current, air, right[0]);
    }
    if !app.view.hourly.is_empty() {
        render_hourly(f, app, right[1]);
    }
}

fn render_now_card(f: &mut Frame, current: &CurrentWeather, area: Rect) {
    let icon = resolve_icon(&current.description, &current.icon_id);
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{:.0}° ", current.temperature),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(" {} ", icon_glyph(icon))),
            Span::styled(icon.to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            current.description.clone(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(vec![
            label("Date:  "),
            Span::raw(get_date(
                current.observed_at_unix,
                current.timezone_offset_seconds,
            )),
        ]),
        Line::from(vec![
            label("Time:  "),
            Span::raw(get_time(
                current.observed_at_unix,
                current.timezone_offset_seconds,
            )),
        ]),
    ];

    let p = Paragraph::new(lines).block(
        Block::default()
            .title(" Now ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(2, 2, 1, 0)),
    );
    f.render_widget(p, area);
}

fn render_daily(f: &mut Frame, view: &WeatherView, area: Rect) {
    let items: Vec<ListItem> = view
        .daily
        .iter()
        .map(|day| {
            let icon = resolve_icon(&day.description, &day.icon_id);
            let (weekday, date) = get_day_label(day.timestamp_unix, view.forecast_timezone);
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {} ", icon_glyph(icon))),
                Span::styled(
                    format!("{:>4.0}°", day.max_temperature),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("  {:<7}", date)),
                Span::styled(weekday, Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" 5 Days Forecast ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(list, area);
}

fn aqi_color(index: u8) -> Color {
    match index {
        1 => Color::Green,
        2 => Color::LightGreen,
        3 => Color::Yellow,
        4 => Color::LightRed,
        _ => Color::Red,
    }
}

fn render_highlights(f: &mut Frame, current: &CurrentWeather, air: &AirQuality, area: Rect) {
    let tz = current.timezone_offset_seconds;
    let aqi = aqi_text(air.aqi_index);
    let badge = aqi.map(|t| t.level).unwrap_or("Unknown");

    let lines = vec![
        Line::from(vec![
            label("Air Quality Index  "),
            Span::styled(
                format!(" {} ", badge),
                Style::default()
                    .fg(Color::Black)
                    .bg(aqi_color(air.aqi_index)),
            ),
        ]),
        Line::from(vec![
            Span::raw(format!(
                "PM2.5 {:.1}  │  SO2 {:.1}  │  NO2 {:.1}  │  O3 {:.1}",
                air.pm2_5, air.so2, air.no2, air.o3
            )),
        ]),
        Line::from(Span::styled(
            aqi.map(|t| t.message).unwrap_or(""),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            label("Sunrise  "),
            Span::raw(get_time(current.sunrise_unix, tz)),
            Span::raw("  │  "),
            label("Sunset  "),
            Span::raw(get_time(current.sunset_unix, tz)),
        ]),
        Line::from(vec![
            label("Humidity  "),
            Span::raw(format!("{:.0}%", current.humidity)),
            Span::raw("  │  "),
            label("Pressure  "),
            Span::raw(format!("{:.0} hPa", current.pressure)),
        ]),
        Line::from(vec![
            label("Visibility  "),
            Span::raw(format!("{:.1} km", current.visibility_meters / 1000.0)),
            Span::raw("  │  "),
            label("Feels Like  "),
            Span::raw(format!("{:.0}°", current.feels_like)),
        ]),
    ];

    let p = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Todays Highlights ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .padding(Padding::new(2, 2, 1, 0)),
    );
    f.render_widget(p, area);
}

/// Hourly panel with a tab bar. Content stays blank while a freshly selected
/// tab is still within its reveal delay.
fn render_hourly(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Today at ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let titles: Vec<&str> = HourlyTab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.tabs.active_index())
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider("│");
    f.render_widget(tabs, chunks[0]);

    if !app.tabs.is_revealed() {
        return;
    }

    let tz = app.view.forecast_timezone;
    let rows: Vec<Line> = app
        .view
        .hourly
        .iter()
        .map(|hour| {
            let time = Span::styled(
                format!(" {:>5}  ", get_hours(hour.timestamp_unix, tz)),
                Style::default().fg(Color::DarkGray),
            );
            match app.tabs.active() {
                HourlyTab::Temperature => {
                    let icon = resolve_icon(&hour.description, &hour.icon_id);
                    Line::from(vec![
                        time,
                        Span::raw(format!("{} ", icon_glyph(icon))),
                        Span::styled(
                            format!("{:>4.0}°", hour.temperature),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", hour.description),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ])
                }
                HourlyTab::Wind => Line::from(vec![
                    time,
                    Span::raw(format!("{} ", wind_arrow(hour.wind_direction_degrees))),
                    Span::styled(
                        format!("{:>5.1} km/h", mps_to_kmh(hour.wind_speed_mps)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("  {:.0}°", hour.wind_direction_degrees),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            }
        })
        .collect();

    f.render_widget(Paragraph::new(rows), chunks[1]);
}

/// Arrow pointing where the wind blows to. Meteorological degrees give the
/// direction it comes from.
fn wind_arrow(degrees: f64) -> &'static str {
    const ARROWS: [&str; 8] = ["↓", "↙", "←", "↖", "↑", "↗", "→", "↘"];
    let sector = ((degrees.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    ARROWS[sector]
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let rect = centered(area, 30, 3);
    let spinner = SPINNER[app.tick_count % SPINNER.len()];
    let p = Paragraph::new(format!("{} Loading weather…", spinner))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn render_failure(f: &mut Frame, message: &str, area: Rect) {
    let rect = centered(area, 60, 7);
    let lines = vec![
        Line::from(Span::styled(
            "Could not load the weather",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "press r to retry",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn render_not_found(f: &mut Frame, area: Rect) {
    let rect = centered(area, 50, 7);
    let lines = vec![
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from("Page not found"),
        Line::from(""),
        Line::from(Span::styled(
            "press h to go home",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, rect);
}

/// Search panel: input line with the searching indicator, then results.
fn render_search(f: &mut Frame, app: &App, area: Rect) {
    let search = &app.search;
    let rect = centered(area, 60, 14);
    f.render_widget(Clear, rect);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(rect);

    let indicator = if search.searching {
        Span::styled(
            format!(" {} ", SPINNER[app.tick_count % SPINNER.len()]),
            Style::default().fg(Color::Cyan),
        )
    } else {
        Span::raw("   ")
    };
    let input = Paragraph::new(Line::from(vec![
        Span::raw(search.query.as_str()),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ]))
    .block(
        Block::default()
            .title(" Search city ")
            .title(block::Title::from(Line::from(indicator)).alignment(Alignment::Right))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(input, chunks[0]);

    if !search.results_active {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if let Some(ref error) = search.error {
        let p = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(block);
        f.render_widget(p, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = search
        .results
        .iter()
        .enumerate()
        .map(|(i, loc)| {
            let style = if i == search.selected {
                Style::default()
                    .fg(Color::Cyan)
                    .bg(Color::Rgb(30, 30, 60))
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<20}", loc.name), style),
                Span::styled(
                    format!(" │ {}", loc.region_label()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(" No matching places")])
    } else {
        List::new(items)
    };
    f.render_widget(list.block(block), chunks[1]);
}
