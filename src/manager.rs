//! The editing-area manager: a state machine over the three modes.
//!
//! The manager owns a lazily-populated registry of editing areas, keeps
//! exactly one of them visible, and moves content between them through the
//! interchange fragment. Content never travels area-to-area; every switch
//! reads the outgoing area into the content cache and writes the cache
//! into the incoming area.
//!
//! Every mutating operation takes `&mut self`, so the serialization the
//! host container requires (one in-flight transition at a time) is
//! enforced by the borrow checker. Multi-threaded hosts wrap the whole
//! manager in a single mutex; nothing finer-grained exists inside.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tracing::{debug, trace};

use crate::area::{EditingArea, MarkupArea, TextArea, WysiwygArea};
use crate::convert::EMPTY_SENTINEL;
use crate::surface::{ContainerId, SurfaceFactory, SurfaceOptions};

/// The three editing surfaces a document can be presented through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Visually rendered rich-text editing.
    Wysiwyg,
    /// Raw markup source editing.
    Markup,
    /// Plain-text editing.
    Text,
}

impl Mode {
    /// All modes, in presentation order.
    pub const ALL: [Self; 3] = [Self::Wysiwyg, Self::Markup, Self::Text];
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Wysiwyg => "wysiwyg",
            Self::Markup => "markup",
            Self::Text => "text",
        })
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "wysiwyg" => Ok(Self::Wysiwyg),
            "markup" => Ok(Self::Markup),
            "text" => Ok(Self::Text),
            other => Err(Error::UnknownMode(other.to_string())),
        }
    }
}

/// Failures the manager can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A mode tag from the host did not name any known mode. Programmer
    /// error; not retried.
    #[error("unknown editing mode `{0}`")]
    UnknownMode(String),

    /// The active mode's area cannot be unloaded. Recoverable; nothing
    /// was changed.
    #[error("cannot unload the active {0} area")]
    UnloadActiveArea(Mode),
}

/// Lifecycle notifications the manager publishes.
///
/// Delivery is fire-and-forget: no back-pressure, no guarantees, and a
/// sink must not call back into the manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManagerEvent {
    /// The initial area was constructed and shown.
    Initialized {
        /// The mode that became active.
        mode: Mode,
    },
    /// A switch is about to start; the outgoing area is still visible.
    ModeChanging {
        /// The mode being left.
        from: Mode,
        /// The mode being entered.
        to: Mode,
    },
    /// A switch completed; the incoming area is visible and focused.
    ModeChanged {
        /// The mode that was left.
        from: Mode,
        /// The mode now active.
        to: Mode,
    },
    /// Every area was destroyed and the registry cleared.
    Destroyed,
}

/// Receives [`ManagerEvent`]s.
pub trait EventSink {
    /// Handle one event. Must not block and must not re-enter the manager.
    fn emit(&self, event: &ManagerEvent);
}

/// Caret save/restore and composition-state queries for the visually
/// rendered surface. Consumed only by the WYSIWYG area.
pub trait SelectionCollaborator {
    /// Remember the current caret/selection.
    fn save_caret(&mut self);
    /// Re-apply the last remembered caret/selection.
    fn restore_caret(&mut self);
    /// Whether an IME composition is in progress.
    fn is_composing(&self) -> bool;
}

/// Per-mode host style-class names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNames {
    /// Class for the WYSIWYG surface.
    pub wysiwyg: String,
    /// Class for the markup-source surface.
    pub markup: String,
    /// Class for the plain-text surface.
    pub text: String,
}

impl ClassNames {
    fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Wysiwyg => &self.wysiwyg,
            Mode::Markup => &self.markup,
            Mode::Text => &self.text,
        }
    }
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            wysiwyg: "triptych-wysiwyg".to_string(),
            markup: "triptych-markup".to_string(),
            text: "triptych-text".to_string(),
        }
    }
}

/// Construction-time configuration for [`EditorManager`].
pub struct ManagerConfig {
    container: ContainerId,
    initial_mode: Mode,
    class_names: ClassNames,
    min_height: Option<u32>,
    auto_resize: bool,
    selection: Option<Box<dyn SelectionCollaborator>>,
    sink: Option<Box<dyn EventSink>>,
}

impl ManagerConfig {
    /// Configuration with defaults: WYSIWYG initial mode, default class
    /// names, no height constraint, no collaborators.
    pub fn new(container: ContainerId) -> Self {
        Self {
            container,
            initial_mode: Mode::Wysiwyg,
            class_names: ClassNames::default(),
            min_height: None,
            auto_resize: false,
            selection: None,
            sink: None,
        }
    }

    /// Set the mode shown by `initialize`.
    pub const fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Set per-mode host class names.
    pub fn with_class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    /// Set the minimum surface height in pixels.
    pub const fn with_min_height(mut self, px: u32) -> Self {
        self.min_height = Some(px);
        self
    }

    /// Let surfaces grow with their content.
    pub const fn with_auto_resize(mut self, enabled: bool) -> Self {
        self.auto_resize = enabled;
        self
    }

    /// Attach a caret/selection collaborator for the WYSIWYG surface.
    pub fn with_selection(mut self, selection: Box<dyn SelectionCollaborator>) -> Self {
        self.selection = Some(selection);
        self
    }

    /// Attach a lifecycle event sink.
    pub fn with_event_sink(mut self, sink: Box<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }
}

/// Owns the editing areas and orchestrates every mode transition.
pub struct EditorManager {
    config: ManagerConfig,
    surfaces: Box<dyn SurfaceFactory>,
    areas: HashMap<Mode, Box<dyn EditingArea>>,
    current_mode: Mode,
    content_cache: String,
}

impl EditorManager {
    /// Create a manager. Cheap: no surface is touched until
    /// [`initialize`](Self::initialize) or the first lazy load.
    pub fn new(config: ManagerConfig, surfaces: Box<dyn SurfaceFactory>) -> Self {
        let current_mode = config.initial_mode;
        Self {
            config,
            surfaces,
            areas: HashMap::new(),
            current_mode,
            content_cache: EMPTY_SENTINEL.to_string(),
        }
    }

    /// Construct and show the initial mode's area.
    pub fn initialize(&mut self) {
        let mode = self.current_mode;
        debug!(%mode, "initializing editing areas");
        self.area(mode).show();
        self.emit(&ManagerEvent::Initialized { mode });
    }

    /// The mode currently presented.
    pub const fn current_mode(&self) -> Mode {
        self.current_mode
    }

    /// Switch the visible surface to `target`.
    ///
    /// No-op when `target` is already current. Otherwise the transition
    /// runs in a strict order: announce, read the outgoing area into the
    /// cache, hide it, construct the target if this is its first visit,
    /// write the cache into it, show, focus, commit, announce again.
    pub fn switch_mode(&mut self, target: Mode) {
        if target == self.current_mode {
            return;
        }
        let from = self.current_mode;
        debug!(%from, to = %target, "switching editing mode");
        self.emit(&ManagerEvent::ModeChanging { from, to: target });

        self.content_cache = self.area(from).content();
        trace!(cached = self.content_cache.len(), "content cache refreshed");
        self.area(from).hide();

        let cache = self.content_cache.clone();
        let area = self.area(target);
        area.set_content(&cache);
        area.show();
        area.focus();

        self.current_mode = target;
        self.emit(&ManagerEvent::ModeChanged { from, to: target });
    }

    /// Read the current area's content, refreshing the cache.
    pub fn content(&mut self) -> String {
        let mode = self.current_mode;
        self.content_cache = self.area(mode).content();
        self.content_cache.clone()
    }

    /// Write content into the current area, through the cache.
    pub fn set_content(&mut self, ir: &str) {
        let mode = self.current_mode;
        self.content_cache = ir.to_string();
        let cache = self.content_cache.clone();
        self.area(mode).set_content(&cache);
    }

    /// Focus the current area.
    pub fn focus(&mut self) {
        let mode = self.current_mode;
        self.area(mode).focus();
    }

    /// Apply editability to every *loaded* area, so a later switch never
    /// lands on a stale editable state. Areas constructed afterwards
    /// start editable.
    pub fn set_editable(&mut self, editable: bool) {
        for area in self.areas.values_mut() {
            area.set_editable(editable);
        }
    }

    /// The area for `mode`, constructing it on first use.
    pub fn area(&mut self, mode: Mode) -> &mut dyn EditingArea {
        self.ensure_area(mode);
        self.areas
            .get_mut(&mode)
            .expect("registry populated by ensure_area")
            .as_mut()
    }

    /// Whether `mode`'s area has been constructed. Pure lookup.
    pub fn is_area_loaded(&self, mode: Mode) -> bool {
        self.areas.contains_key(&mode)
    }

    /// Destroy and evict `mode`'s area to reclaim memory.
    ///
    /// The active mode's area cannot be unloaded; that returns
    /// [`Error::UnloadActiveArea`] and changes nothing. Unloading a mode
    /// that was never loaded is a no-op.
    pub fn unload_area(&mut self, mode: Mode) -> Result<(), Error> {
        if mode == self.current_mode {
            return Err(Error::UnloadActiveArea(mode));
        }
        if let Some(mut area) = self.areas.remove(&mode) {
            area.destroy();
            debug!(%mode, "unloaded editing area");
        }
        Ok(())
    }

    /// Destroy every loaded area and clear the registry.
    ///
    /// The manager itself stays usable: a later call lazily rebuilds
    /// whatever it touches.
    pub fn destroy(&mut self) {
        for (_, mut area) in self.areas.drain() {
            area.destroy();
        }
        debug!("editing areas destroyed");
        self.emit(&ManagerEvent::Destroyed);
    }

    fn ensure_area(&mut self, mode: Mode) {
        if self.areas.contains_key(&mode) {
            return;
        }
        let options = SurfaceOptions {
            class_name: self.config.class_names.for_mode(mode).to_string(),
            min_height: self.config.min_height,
            auto_resize: self.config.auto_resize,
        };
        let surface = self.surfaces.create(&self.config.container, mode, &options);
        let area: Box<dyn EditingArea> = match mode {
            Mode::Wysiwyg => Box::new(WysiwygArea::new(surface, self.config.selection.take())),
            Mode::Markup => Box::new(MarkupArea::new(surface)),
            Mode::Text => Box::new(TextArea::new(surface)),
        };
        debug!(%mode, "constructed editing area");
        self.areas.insert(mode, area);
    }

    fn emit(&self, event: &ManagerEvent) {
        if let Some(sink) = self.config.sink.as_ref() {
            sink.emit(event);
        }
    }
}
