use crate::application::{App, Focus, FormField, ListEntry, LocationStatus};
use crate::domain::WorkoutKind;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map as WorldMap, MapResolution},
        Block, Borders, Clear, Paragraph, Wrap,
    },
    Frame,
};

/// Rows taken by one list entry: title, details, spacer.
pub const ENTRY_HEIGHT: u16 = 3;
const FORM_HEIGHT: u16 = 6;
const SIDEBAR_PERCENT: u16 = 38;
const LABEL_WIDTH: usize = 10;
/// Approximate pixel width of a terminal cell, for popup widths.
const CELL_PIXELS: u16 = 8;

const RUNNING_COLOR: Color = Color::Rgb(0, 196, 106);
const CYCLING_COLOR: Color = Color::Rgb(255, 181, 69);

/// Screen areas for one frame. Rendering and mouse hit-testing share it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppLayout {
    pub header: Rect,
    pub form: Rect,
    pub list: Rect,
    pub map: Rect,
    pub status: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, form_visible: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(SIDEBAR_PERCENT), Constraint::Min(0)])
            .split(rows[1]);
        let form_height = if form_visible { FORM_HEIGHT } else { 0 };
        let sidebar = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(form_height), Constraint::Min(0)])
            .split(body[0]);

        Self {
            header: rows[0],
            form: sidebar[0],
            list: sidebar[1],
            map: body[1],
            status: rows[2],
        }
    }

    pub fn for_app(area: Rect, app: &App) -> Self {
        Self::new(area, app.form.is_visible())
    }

    /// Drawing area of the map, inside its border.
    pub fn map_canvas(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.map)
    }

    pub fn list_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.list)
    }

    pub fn form_inner(&self) -> Rect {
        Block::default().borders(Borders::ALL).inner(self.form)
    }
}

/// Whether the cell at (`column`, `row`) lies inside `rect`.
pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Index of the first list entry shown so that `selected` stays visible in
/// a list area `height` rows tall.
pub fn list_offset(selected: usize, height: u16) -> usize {
    let visible = usize::from((height / ENTRY_HEIGHT).max(1));
    (selected + 1).saturating_sub(visible)
}

pub fn render_ui(f: &mut Frame, app: &App) {
    let layout = AppLayout::for_app(f.area(), app);

    render_header(f, app, layout.header);
    if app.form.is_visible() {
        render_form(f, app, layout.form);
    }
    render_list(f, app, layout.list);
    render_map(f, app, &layout);
    render_status_bar(f, app, layout.status);

    if let Some(alert) = &app.alert {
        render_alert_popup(f, alert);
    }
}

fn kind_color(kind: WorkoutKind) -> Color {
    match kind {
        WorkoutKind::Running => RUNNING_COLOR,
        WorkoutKind::Cycling => CYCLING_COLOR,
    }
}

fn popup_color(class_name: &str) -> Color {
    match class_name {
        "running-popup" => RUNNING_COLOR,
        "cycling-popup" => CYCLING_COLOR,
        _ => Color::White,
    }
}

fn pane_border(app: &App, pane: Focus) -> Style {
    if app.focus == pane && app.alert.is_none() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let location = match app.location {
        LocationStatus::Locating => "locating…",
        LocationStatus::Ready => "map ready",
        LocationStatus::Unavailable => "map unavailable",
    };
    let header = Paragraph::new(format!(
        "mapty - Workout Log | {} workouts | {}",
        app.store.len(),
        location
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.focus == Focus::Form;
    let lines: Vec<Line> = app
        .form
        .visible_fields()
        .into_iter()
        .map(|field| form_line(app, field, editing && app.form.focus() == field))
        .collect();

    let title = match app.form.pending_coords() {
        Some(coords) => format!("New workout at {}", coords),
        None => "New workout".to_string(),
    };
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(pane_border(app, Focus::Form)),
    );
    f.render_widget(form, area);
}

fn form_line(app: &App, field: FormField, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let label = Span::styled(format!(" {:<width$}", field.label(), width = LABEL_WIDTH), label_style);

    let value = if field == FormField::Type {
        Span::styled(
            format!("◀ {} ▶", app.form.kind().label()),
            Style::default().fg(kind_color(app.form.kind())),
        )
    } else {
        let text = app.form.value(field);
        if text.is_empty() && !focused {
            Span::styled(field.placeholder().to_string(), Style::default().fg(Color::DarkGray))
        } else {
            let cursor = if focused { "█" } else { "" };
            Span::raw(format!("{text}{cursor}"))
        }
    };

    Line::from(vec![label, value])
}

fn render_list(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Workouts")
        .border_style(pane_border(app, Focus::List));

    if app.list.is_empty() {
        let empty = Paragraph::new("No workouts yet. Click the map to log one.")
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let inner = block.inner(area);
    let offset = list_offset(app.list_selected, inner.height);
    let highlight = app.focus == Focus::List;
    let lines: Vec<Line> = app
        .list
        .entries()
        .iter()
        .enumerate()
        .skip(offset)
        .flat_map(|(index, entry)| entry_lines(entry, highlight && index == app.list_selected))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn entry_lines(entry: &ListEntry, selected: bool) -> [Line<'static>; 3] {
    let color = kind_color(entry.kind);
    let base = if selected {
        Style::default().bg(Color::Rgb(45, 52, 57))
    } else {
        Style::default()
    };

    let title = Line::from(vec![
        Span::styled("▌ ", base.fg(color)),
        Span::styled(entry.title.clone(), base.add_modifier(Modifier::BOLD)),
    ]);

    let mut details = vec![Span::styled("▌ ", base.fg(color))];
    for field in &entry.details {
        details.push(Span::styled(format!("{} ", field.icon), base));
        details.push(Span::styled(field.value.clone(), base.add_modifier(Modifier::BOLD)));
        details.push(Span::styled(format!(" {}  ", field.unit), base.fg(Color::Gray)));
    }

    [title, Line::from(details), Line::default()]
}

fn render_map(f: &mut Frame, app: &App, layout: &AppLayout) {
    let Some(map) = app.map.as_ref() else {
        let text = match app.location {
            LocationStatus::Locating => "Locating your position…",
            _ => "Map unavailable: your position could not be determined.",
        };
        let placeholder = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Map")
                    .border_style(pane_border(app, Focus::Map)),
            );
        f.render_widget(placeholder, layout.map);
        return;
    };

    let canvas_area = layout.map_canvas();
    let bounds = map.bounds(canvas_area.width, canvas_area.height);
    let center = map.center();
    let pending = app.form.pending_coords();

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Map | {} | zoom {}", center, map.zoom()))
                .border_style(pane_border(app, Focus::Map)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(move |ctx| {
            ctx.draw(&WorldMap {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            ctx.print(center.lng, center.lat, Span::styled("+", Style::default().fg(Color::Gray)));
            if let Some(coords) = pending {
                ctx.print(coords.lng, coords.lat, Span::styled("✚", Style::default().fg(Color::White)));
            }

            for marker in map.markers() {
                let color = popup_color(&marker.popup.class_name);
                let max_chars = usize::from(marker.popup.max_width / CELL_PIXELS);
                let content: String = marker.popup.content.chars().take(max_chars).collect();
                ctx.print(
                    marker.coords.lng,
                    marker.coords.lat,
                    Line::from(vec![
                        Span::styled("● ", Style::default().fg(color)),
                        Span::styled(content, Style::default().fg(Color::Black).bg(color)),
                    ]),
                );
            }
        });

    f.render_widget(canvas, layout.map);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let text = if let Some(status) = &app.status_message {
        status.clone()
    } else {
        match app.focus {
            Focus::Map => "Click/Enter: log workout here | ←↑↓→: pan | +/-: zoom | Tab: list | q: quit".to_string(),
            Focus::List => "↑↓: select | Enter/click: show on map | Tab: switch pane | q: quit".to_string(),
            Focus::Form => "Type values | Tab/↑↓: next field | ←→/Space on Type: toggle | Enter: submit | Esc: map".to_string(),
        }
    };

    let style = match app.focus {
        _ if app.status_message.is_some() => Style::default().fg(Color::Red),
        Focus::Map => Style::default(),
        Focus::List => Style::default().fg(Color::Cyan),
        Focus::Form => Style::default().fg(Color::Green),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(style);
    f.render_widget(status, area);
}

fn alert_width(message: &str, available: u16) -> u16 {
    u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(6)
        .clamp(30, available.max(30))
        .min(available)
}

fn render_alert_popup(f: &mut Frame, message: &str) {
    let area = f.area();
    let width = alert_width(message, area.width);
    let height = 5.min(area.height);
    let popup_area = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(vec![
        Line::from(message.to_string()),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Alert")
            .style(Style::default().fg(Color::Yellow)),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(popup, popup_area);
}
