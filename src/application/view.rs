//! Rendering workouts into the list and onto the map.
//!
//! Both views share the display message `"<icon> <Kind> on <date>"`. The
//! list is append-only: rendering a workout twice yields two entries.

use crate::domain::{Coords, Workout, WorkoutDetails, WorkoutId, WorkoutKind};

/// Zoom used when the map loads and when jumping to a workout.
pub const MAP_ZOOM_LEVEL: u8 = 13;
pub const MAX_ZOOM: u8 = 18;

/// Terminal columns covered by one 256px map tile.
const COLUMNS_PER_TILE: f64 = 32.0;

pub fn workout_message(workout: &Workout) -> String {
    format!("{} {} on {}", workout.icon(), workout.kind().label(), workout.date())
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailField {
    pub icon: String,
    pub value: String,
    pub unit: &'static str,
}

impl DetailField {
    fn new(icon: &str, value: String, unit: &'static str) -> Self {
        Self {
            icon: icon.to_string(),
            value,
            unit,
        }
    }
}

/// One rendered row of the workout list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub workout_id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    /// Distance, duration, metric and kind-specific attribute, in that order.
    pub details: [DetailField; 4],
}

impl ListEntry {
    pub fn from_workout(workout: &Workout) -> Self {
        let (metric, metric_unit, attribute) = match *workout.details() {
            WorkoutDetails::Running { cadence, pace } => {
                (pace, "MIN/KM", DetailField::new("🦶🏼", cadence.to_string(), "SPM"))
            }
            WorkoutDetails::Cycling { elevation_gain, speed } => {
                (speed, "KM/H", DetailField::new("⛰", elevation_gain.to_string(), "M"))
            }
        };

        Self {
            workout_id: workout.id().clone(),
            kind: workout.kind(),
            title: workout_message(workout),
            details: [
                DetailField::new(workout.icon(), workout.distance().to_string(), "km"),
                DetailField::new("⏱", workout.duration().to_string(), "min"),
                DetailField::new("⚡️", format!("{metric:.1}"), metric_unit),
                attribute,
            ],
        }
    }
}

/// Rendered list entries, newest first.
#[derive(Debug, Clone, Default)]
pub struct WorkoutList {
    entries: Vec<ListEntry>,
}

impl WorkoutList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts a new entry at the top of the list.
    pub fn render_entry(&mut self, workout: &Workout) {
        self.entries.insert(0, ListEntry::from_workout(workout));
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ListEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    pub content: String,
    pub max_width: u16,
    pub min_width: u16,
    /// Close when another popup opens.
    pub auto_close: bool,
    /// Close when the map is clicked.
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupConfig {
    pub fn for_workout(workout: &Workout) -> Self {
        Self {
            content: workout_message(workout),
            max_width: 250,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", workout.kind().as_str()),
        }
    }
}

/// A map the coordinator can draw on and move.
///
/// Click events travel the other way: the front end hit-tests the map and
/// calls back into the coordinator with the clicked position.
pub trait MapSurface {
    fn initialize(center: Coords, zoom: u8) -> Self
    where
        Self: Sized;

    fn add_marker(&mut self, coords: Coords, popup: PopupConfig);

    fn set_view(&mut self, center: Coords, zoom: u8);
}

/// Places `workout`'s marker with its popup open.
pub fn render_map_marker<M: MapSurface>(map: &mut M, workout: &Workout) {
    map.add_marker(workout.coords(), PopupConfig::for_workout(workout));
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub coords: Coords,
    pub popup: PopupConfig,
}

/// Visible rectangle of the map in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

/// Map state for a character-cell display.
///
/// One column spans `360 / 2^zoom / 32` degrees of longitude and one row
/// twice that in latitude, since cells are about twice as tall as wide.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    center: Coords,
    zoom: u8,
    markers: Vec<Marker>,
}

impl MapSurface for MapView {
    fn initialize(center: Coords, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.min(MAX_ZOOM),
            markers: Vec::new(),
        }
    }

    fn add_marker(&mut self, coords: Coords, popup: PopupConfig) {
        self.markers.push(Marker { coords, popup });
    }

    fn set_view(&mut self, center: Coords, zoom: u8) {
        self.center = center;
        self.zoom = zoom.min(MAX_ZOOM);
    }
}

impl MapView {
    pub fn center(&self) -> Coords {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn degrees_per_column(&self) -> f64 {
        360.0 / 2f64.powi(i32::from(self.zoom)) / COLUMNS_PER_TILE
    }

    pub fn bounds(&self, width: u16, height: u16) -> MapBounds {
        let half_width = f64::from(width) * self.degrees_per_column() / 2.0;
        let half_height = f64::from(height) * self.degrees_per_column();
        MapBounds {
            west: self.center.lng - half_width,
            east: self.center.lng + half_width,
            south: self.center.lat - half_height,
            north: self.center.lat + half_height,
        }
    }

    /// Position under the cell at (`column`, `row`) of a `width` x `height`
    /// drawing area.
    pub fn unproject(&self, width: u16, height: u16, column: u16, row: u16) -> Coords {
        let bounds = self.bounds(width, height);
        let step = self.degrees_per_column();
        Coords::new(
            bounds.north - (f64::from(row) + 0.5) * step * 2.0,
            bounds.west + (f64::from(column) + 0.5) * step,
        )
    }

    /// Moves the centre by whole cells; positive rows move north.
    pub fn pan(&mut self, columns: i32, rows: i32) {
        let step = self.degrees_per_column();
        self.center.lng = wrap_longitude(self.center.lng + f64::from(columns) * step);
        self.center.lat = (self.center.lat + f64::from(rows) * step * 2.0).clamp(-90.0, 90.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }
}

/// Wraps a longitude into `[-180, 180)`.
fn wrap_longitude(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run() -> Workout {
        Workout::running(Coords::new(10.0, 20.0), "5", "30", "160").unwrap()
    }

    fn ride() -> Workout {
        Workout::cycling(Coords::new(-1.0, 2.0), "10", "60", "200").unwrap()
    }

    #[test]
    fn test_message_format() {
        let workout = run();
        assert_eq!(
            workout_message(&workout),
            format!("🏃‍♂️ Running on {}", workout.date())
        );
        assert!(workout_message(&ride()).starts_with("🚴‍♀️ Cycling on "));
    }

    #[test]
    fn test_running_entry() {
        let workout = run();
        let entry = ListEntry::from_workout(&workout);

        assert_eq!(&entry.workout_id, workout.id());
        assert_eq!(entry.details[0], DetailField::new("🏃‍♂️", "5".into(), "km"));
        assert_eq!(entry.details[1], DetailField::new("⏱", "30".into(), "min"));
        assert_eq!(entry.details[2], DetailField::new("⚡️", "6.0".into(), "MIN/KM"));
        assert_eq!(entry.details[3], DetailField::new("🦶🏼", "160".into(), "SPM"));
    }

    #[test]
    fn test_cycling_entry() {
        let entry = ListEntry::from_workout(&ride());

        assert_eq!(entry.kind, WorkoutKind::Cycling);
        assert_eq!(entry.details[2], DetailField::new("⚡️", "10.0".into(), "KM/H"));
        assert_eq!(entry.details[3], DetailField::new("⛰", "200".into(), "M"));
    }

    #[test]
    fn test_metric_rounds_to_one_decimal() {
        let workout = Workout::running(Coords::new(0.0, 0.0), "3", "17", "170").unwrap();
        assert_eq!(ListEntry::from_workout(&workout).details[2].value, "5.7");
    }

    #[test]
    fn test_list_prepends_without_dedup() {
        let mut list = WorkoutList::new();
        let first = run();
        let second = ride();

        list.render_entry(&first);
        list.render_entry(&second);
        list.render_entry(&second);

        assert_eq!(list.len(), 3);
        assert_eq!(&list.entries()[0].workout_id, second.id());
        assert_eq!(&list.entries()[1].workout_id, second.id());
        assert_eq!(&list.entries()[2].workout_id, first.id());
    }

    #[test]
    fn test_marker_popup_config() {
        let mut map = MapView::initialize(Coords::new(0.0, 0.0), MAP_ZOOM_LEVEL);
        let workout = ride();
        render_map_marker(&mut map, &workout);

        let marker = &map.markers()[0];
        assert_eq!(marker.coords, workout.coords());
        assert_eq!(marker.popup.content, workout_message(&workout));
        assert_eq!(marker.popup.class_name, "cycling-popup");
        assert_eq!((marker.popup.max_width, marker.popup.min_width), (250, 100));
        assert!(!marker.popup.auto_close);
        assert!(!marker.popup.close_on_click);
    }

    #[test]
    fn test_projection_centre() {
        let map = MapView::initialize(Coords::new(48.0, 2.0), 4);
        // 360 / 16 / 32 degrees per column.
        assert_eq!(map.degrees_per_column(), 0.703125);

        let bounds = map.bounds(40, 20);
        assert_eq!(bounds.west, 2.0 - 20.0 * 0.703125);
        assert_eq!(bounds.north, 48.0 + 20.0 * 0.703125);

        let clicked = map.unproject(40, 20, 20, 10);
        assert!((clicked.lng - (2.0 + 0.5 * 0.703125)).abs() < 1e-9);
        assert!((clicked.lat - (48.0 - 0.703125)).abs() < 1e-9);
    }

    #[test]
    fn test_pan_and_zoom() {
        let mut map = MapView::initialize(Coords::new(0.0, 0.0), 0);
        let step = map.degrees_per_column();
        map.pan(2, -1);
        assert_eq!(map.center(), Coords::new(-2.0 * step, 2.0 * step));

        map.zoom_out();
        assert_eq!(map.zoom(), 0);
        map.set_view(Coords::new(89.0, 0.0), 40);
        assert_eq!(map.zoom(), MAX_ZOOM);
        map.zoom_in();
        assert_eq!(map.zoom(), MAX_ZOOM);

        map.set_view(Coords::new(89.0, 0.0), 0);
        map.pan(0, 10);
        assert_eq!(map.center().lat, 90.0);
    }

    #[test]
    fn test_pan_wraps_longitude() {
        let mut map = MapView::initialize(Coords::new(0.0, 170.0), 0);
        let step = map.degrees_per_column();
        map.pan(2, 0);
        assert!((map.center().lng - (170.0 + 2.0 * step - 360.0)).abs() < 1e-9);

        map.set_view(Coords::new(0.0, -175.0), 0);
        map.pan(-1, 0);
        assert!((map.center().lng - (-175.0 - step + 360.0)).abs() < 1e-9);

        for _ in 0..100 {
            map.pan(7, 0);
            assert!((-180.0..180.0).contains(&map.center().lng));
        }
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(540.0), -180.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(12.5), 12.5);
    }
}
