//! Application state for the workout log.
//!
//! [`App`] owns every piece of mutable state and exposes one method per
//! external event: a position fix, a map click, a type toggle, a form
//! submission and a list click. The front end translates terminal input into
//! these calls; nothing else mutates the workout collection.

use crate::domain::{Coords, Workout, WorkoutId};
use crate::infrastructure::{GeolocationError, KeyValueStorage, PositionResult};

use super::form::FormController;
use super::store::WorkoutStore;
use super::view::{render_map_marker, MapSurface, MapView, WorkoutList, MAP_ZOOM_LEVEL};

/// Alert shown when a position lookup fails.
pub const LOCATION_ALERT: &str = "Can't locate your position";

/// Which pane receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Map,
    List,
    Form,
}

/// Progress of the startup position lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStatus {
    Locating,
    Ready,
    /// The lookup failed or no position source exists; the map never loads.
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppSettings {
    /// Zoom used when the map first loads.
    pub zoom: u8,
    /// Draw markers for workouts reloaded from storage once the map is
    /// ready. Off by default: reloaded workouts only appear in the list.
    pub draw_saved_markers: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            zoom: MAP_ZOOM_LEVEL,
            draw_saved_markers: false,
        }
    }
}

/// Main application state.
///
/// # Examples
///
/// ```
/// use mapty::application::{App, AppSettings, Focus};
/// use mapty::infrastructure::MemoryStorage;
///
/// let app: App = App::new(Box::new(MemoryStorage::new()), AppSettings::default());
/// assert!(app.store.is_empty());
/// assert_eq!(app.focus, Focus::Map);
/// ```
pub struct App<M = MapView> {
    /// Every workout, in creation order
    pub store: WorkoutStore,
    /// The entry form and its pending position
    pub form: FormController,
    /// Rendered list entries, newest first
    pub list: WorkoutList,
    /// The map, once a position fix has arrived
    pub map: Option<M>,
    pub settings: AppSettings,
    pub focus: Focus,
    pub location: LocationStatus,
    /// Alert-level message; blocks input until dismissed
    pub alert: Option<String>,
    /// Transient message for the status bar
    pub status_message: Option<String>,
    /// Highlighted list entry (index into `list`)
    pub list_selected: usize,
    storage: Box<dyn KeyValueStorage>,
}

impl<M: MapSurface> App<M> {
    /// Creates the application and loads saved workouts into the list.
    ///
    /// Saved workouts get no map markers here: the map does not exist yet.
    pub fn new(storage: Box<dyn KeyValueStorage>, settings: AppSettings) -> Self {
        let mut app = Self {
            store: WorkoutStore::new(),
            form: FormController::new(),
            list: WorkoutList::new(),
            map: None,
            settings,
            focus: Focus::Map,
            location: LocationStatus::Locating,
            alert: None,
            status_message: None,
            list_selected: 0,
            storage,
        };
        app.load_saved_workouts();
        app
    }

    fn load_saved_workouts(&mut self) {
        self.store.reload(self.storage.as_ref());
        for workout in self.store.workouts() {
            self.list.render_entry(workout);
        }
    }

    pub fn storage(&self) -> &dyn KeyValueStorage {
        self.storage.as_ref()
    }

    /// Routes the result of the startup position lookup.
    pub fn handle_position(&mut self, result: PositionResult) {
        match result {
            Ok(coords) => self.load_map(coords),
            Err(e) => self.location_failed(&e),
        }
    }

    /// Creates the map centred on `coords`.
    pub fn load_map(&mut self, coords: Coords) {
        let mut map = M::initialize(coords, self.settings.zoom);
        if self.settings.draw_saved_markers {
            for workout in self.store.workouts() {
                render_map_marker(&mut map, workout);
            }
        }
        self.map = Some(map);
        self.location = LocationStatus::Ready;
        tracing::info!(lat = coords.lat, lng = coords.lng, "map loaded");
    }

    /// Records a failed lookup. The map stays unavailable for the session.
    pub fn location_failed(&mut self, error: &GeolocationError) {
        self.location = LocationStatus::Unavailable;
        if error.should_alert() {
            tracing::warn!(error = %error, "position lookup failed");
            self.alert = Some(LOCATION_ALERT.to_string());
        } else {
            tracing::info!("no position source, map disabled");
        }
    }

    /// Opens the form for a workout at `coords`. Ignored without a map.
    pub fn handle_map_click(&mut self, coords: Coords) {
        if self.map.is_none() {
            return;
        }
        self.form.show(coords);
        self.focus = Focus::Form;
    }

    pub fn toggle_workout_kind(&mut self) {
        self.form.toggle_kind();
    }

    /// Submits the form.
    ///
    /// Invalid input raises an alert and leaves the collection untouched.
    /// Valid input is drawn on the map and the list, stored and persisted.
    pub fn submit_form(&mut self) {
        match self.form.submit() {
            Ok(Some(workout)) => self.add_workout(workout),
            Ok(None) => {}
            Err(e) => {
                tracing::debug!(error = %e, "rejected workout input");
                self.alert = Some(e.alert_message().to_string());
            }
        }
    }

    fn add_workout(&mut self, workout: Workout) {
        tracing::info!(id = %workout.id(), kind = workout.kind().as_str(), "workout logged");

        if let Some(map) = self.map.as_mut() {
            render_map_marker(map, &workout);
        }
        self.list.render_entry(&workout);
        self.store.append(workout);

        self.list_selected = 0;
        self.focus = Focus::Map;
        self.persist();
    }

    /// Saves the whole collection. A failure is reported but the in-memory
    /// collection is kept.
    fn persist(&mut self) {
        match self.store.persist(self.storage.as_mut()) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                tracing::error!(error = %e, "could not save workouts");
                self.status_message = Some(format!("Save failed: {}", e));
            }
        }
    }

    /// Centres the map on the workout behind a list entry.
    ///
    /// `None` means the click landed outside any entry. Unknown ids and a
    /// missing map are ignored.
    pub fn resolve_list_click(&mut self, target: Option<&WorkoutId>) {
        let Some(id) = target else {
            return;
        };
        let Some(workout) = self.store.find(id) else {
            tracing::debug!(%id, "list click on unknown workout");
            return;
        };
        let coords = workout.coords();
        if let Some(map) = self.map.as_mut() {
            map.set_view(coords, MAP_ZOOM_LEVEL);
        }
    }

    /// Resolves the highlighted list entry as if it were clicked.
    pub fn open_selected_entry(&mut self) {
        let target = self.list.get(self.list_selected).map(|e| e.workout_id.clone());
        self.resolve_list_click(target.as_ref());
    }

    pub fn select_next_entry(&mut self) {
        if self.list_selected + 1 < self.list.len() {
            self.list_selected += 1;
        }
    }

    pub fn select_previous_entry(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    /// Moves keyboard focus map → list → form → map, skipping the form
    /// while it is hidden.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Map => Focus::List,
            Focus::List if self.form.is_visible() => Focus::Form,
            Focus::List | Focus::Form => Focus::Map,
        };
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}
