use crate::application::{App, Focus, FormField};
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::ui::{contains, list_offset, AppLayout, ENTRY_HEIGHT};

/// Cells moved per arrow key press on the map.
const PAN_COLUMNS: i32 = 4;
const PAN_ROWS: i32 = 2;

pub struct InputHandler;

impl InputHandler {
    /// Whether this key should end the program.
    pub fn is_quit(app: &App, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            return true;
        }
        key == KeyCode::Char('q') && app.alert.is_none() && app.focus != Focus::Form
    }

    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        // An open alert swallows the key that dismisses it.
        if app.alert.is_some() {
            app.dismiss_alert();
            return;
        }

        match app.focus {
            Focus::Map => Self::handle_map_keys(app, key),
            Focus::List => Self::handle_list_keys(app, key),
            Focus::Form => Self::handle_form_keys(app, key, modifiers),
        }
    }

    fn handle_map_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Tab => app.cycle_focus(),
            KeyCode::Enter => {
                if let Some(center) = app.map.as_ref().map(|m| m.center()) {
                    app.handle_map_click(center);
                }
            }
            _ => {
                let Some(map) = app.map.as_mut() else {
                    return;
                };
                match key {
                    KeyCode::Left | KeyCode::Char('h') => map.pan(-PAN_COLUMNS, 0),
                    KeyCode::Right | KeyCode::Char('l') => map.pan(PAN_COLUMNS, 0),
                    KeyCode::Up | KeyCode::Char('k') => map.pan(0, PAN_ROWS),
                    KeyCode::Down | KeyCode::Char('j') => map.pan(0, -PAN_ROWS),
                    KeyCode::Char('+') | KeyCode::Char('=') => map.zoom_in(),
                    KeyCode::Char('-') => map.zoom_out(),
                    _ => {}
                }
            }
        }
    }

    fn handle_list_keys(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Tab => app.cycle_focus(),
            KeyCode::Esc => app.focus = Focus::Map,
            KeyCode::Up | KeyCode::Char('k') => app.select_previous_entry(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next_entry(),
            KeyCode::Enter => app.open_selected_entry(),
            _ => {}
        }
    }

    fn handle_form_keys(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        let on_type = app.form.focus() == FormField::Type;
        match key {
            KeyCode::Esc => app.focus = Focus::Map,
            KeyCode::Enter => app.submit_form(),
            KeyCode::BackTab | KeyCode::Up => app.form.focus_previous(),
            KeyCode::Tab if modifiers.contains(KeyModifiers::SHIFT) => app.form.focus_previous(),
            KeyCode::Tab | KeyCode::Down => app.form.focus_next(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if on_type => app.toggle_workout_kind(),
            KeyCode::Backspace => app.form.backspace(),
            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                app.form.insert_char(c)
            }
            _ => {}
        }
    }

    pub fn handle_mouse_event(app: &mut App, event: MouseEvent, layout: &AppLayout) {
        let (column, row) = (event.column, event.row);
        let canvas = layout.map_canvas();

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if app.alert.is_some() {
                    app.dismiss_alert();
                } else if contains(canvas, column, row) {
                    Self::click_map(app, layout, column, row);
                } else if app.form.is_visible() && contains(layout.form_inner(), column, row) {
                    app.focus = Focus::Form;
                    let index = usize::from(row - layout.form_inner().y);
                    if let Some(field) = app.form.visible_fields().get(index) {
                        app.form.set_focus(*field);
                    }
                } else if contains(layout.list_inner(), column, row) {
                    Self::click_list(app, layout, row);
                }
            }
            MouseEventKind::ScrollUp if contains(canvas, column, row) => {
                if let Some(map) = app.map.as_mut() {
                    map.zoom_in();
                }
            }
            MouseEventKind::ScrollDown if contains(canvas, column, row) => {
                if let Some(map) = app.map.as_mut() {
                    map.zoom_out();
                }
            }
            _ => {}
        }
    }

    fn click_map(app: &mut App, layout: &AppLayout, column: u16, row: u16) {
        let canvas = layout.map_canvas();
        let clicked = app
            .map
            .as_ref()
            .map(|m| m.unproject(canvas.width, canvas.height, column - canvas.x, row - canvas.y));
        if let Some(coords) = clicked {
            app.handle_map_click(coords);
        }
    }

    fn click_list(app: &mut App, layout: &AppLayout, row: u16) {
        app.focus = Focus::List;
        let inner = layout.list_inner();
        let index = list_offset(app.list_selected, inner.height) + usize::from((row - inner.y) / ENTRY_HEIGHT);

        let target = app.list.get(index).map(|entry| entry.workout_id.clone());
        if target.is_some() {
            app.list_selected = index;
        }
        app.resolve_list_click(target.as_ref());
    }
}
