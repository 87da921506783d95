//! The workout entry form.
//!
//! The form is hidden until the map is clicked. A click reveals it and
//! remembers the clicked position; a valid submission turns that position
//! and the typed values into a [`Workout`] and hides the form again. Nothing
//! else ever dismisses it.

use crate::domain::{Coords, DomainResult, Workout, WorkoutInput, WorkoutKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormState {
    Hidden,
    /// Shown, waiting for input about a workout at `pending`.
    Visible { pending: Coords },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Type,
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Type => "Type",
            FormField::Distance => "Distance",
            FormField::Duration => "Duration",
            FormField::Cadence => "Cadence",
            FormField::ElevationGain => "Elev Gain",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Type => "",
            FormField::Distance => "km",
            FormField::Duration => "min",
            FormField::Cadence => "step/min",
            FormField::ElevationGain => "meters",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FormController {
    state: FormState,
    kind: WorkoutKind,
    distance: String,
    duration: String,
    cadence: String,
    elevation_gain: String,
    focus: FormField,
}

impl Default for FormController {
    fn default() -> Self {
        Self {
            state: FormState::Hidden,
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            cadence: String::new(),
            elevation_gain: String::new(),
            focus: FormField::Distance,
        }
    }
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, FormState::Visible { .. })
    }

    pub fn pending_coords(&self) -> Option<Coords> {
        match self.state {
            FormState::Visible { pending } => Some(pending),
            FormState::Hidden => None,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    /// Reveals the form for a workout at `coords` and focuses the distance
    /// field. Clicking again while shown only moves the pending position.
    pub fn show(&mut self, coords: Coords) {
        self.state = FormState::Visible { pending: coords };
        self.focus = FormField::Distance;
    }

    /// Swaps the cadence field for the elevation gain field or back.
    /// Typed values are left alone.
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
        self.focus = match self.focus {
            FormField::Cadence | FormField::ElevationGain => self.attribute_field(),
            other => other,
        };
    }

    fn attribute_field(&self) -> FormField {
        match self.kind {
            WorkoutKind::Running => FormField::Cadence,
            WorkoutKind::Cycling => FormField::ElevationGain,
        }
    }

    /// Fields currently shown, top to bottom.
    pub fn visible_fields(&self) -> [FormField; 4] {
        [
            FormField::Type,
            FormField::Distance,
            FormField::Duration,
            self.attribute_field(),
        ]
    }

    pub fn set_focus(&mut self, field: FormField) {
        if self.visible_fields().contains(&field) {
            self.focus = field;
        }
    }

    pub fn focus_next(&mut self) {
        self.step_focus(1);
    }

    pub fn focus_previous(&mut self) {
        self.step_focus(3);
    }

    fn step_focus(&mut self, step: usize) {
        let fields = self.visible_fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(current + step) % fields.len()];
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Type => self.kind.as_str(),
            FormField::Distance => &self.distance,
            FormField::Duration => &self.duration,
            FormField::Cadence => &self.cadence,
            FormField::ElevationGain => &self.elevation_gain,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Type => None,
            FormField::Distance => Some(&mut self.distance),
            FormField::Duration => Some(&mut self.duration),
            FormField::Cadence => Some(&mut self.cadence),
            FormField::ElevationGain => Some(&mut self.elevation_gain),
        }
    }

    /// Appends to the focused field. Ignored while the form is hidden.
    pub fn insert_char(&mut self, c: char) {
        if !self.is_visible() {
            return;
        }
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    pub fn clear_fields(&mut self) {
        self.distance.clear();
        self.duration.clear();
        self.cadence.clear();
        self.elevation_gain.clear();
    }

    fn hide(&mut self) {
        self.clear_fields();
        self.state = FormState::Hidden;
    }

    /// Validates the typed values.
    ///
    /// Returns `Ok(None)` while hidden. On success the form is cleared and
    /// hidden and the new workout returned. On failure the fields are
    /// cleared but the form stays open.
    pub fn submit(&mut self) -> DomainResult<Option<Workout>> {
        let FormState::Visible { pending } = self.state else {
            return Ok(None);
        };

        let input = WorkoutInput {
            kind: self.kind,
            distance: &self.distance,
            duration: &self.duration,
            cadence: &self.cadence,
            elevation_gain: &self.elevation_gain,
        };
        let result = Workout::new(pending, &input);

        match result {
            Ok(workout) => {
                self.hide();
                Ok(Some(workout))
            }
            Err(e) => {
                self.clear_fields();
                Err(e)
            }
        }
    }
}
