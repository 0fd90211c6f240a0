//! The host-surface boundary.
//!
//! A [`HostSurface`] is the native text region a Mode Area edits through: a
//! content-editable region, a `<textarea>`, a terminal widget, or (for
//! headless hosts and tests) the in-memory [`MemorySurface`]. Surfaces are
//! created by a [`SurfaceFactory`] injected into the manager, never reached
//! through ambient globals.
//!
//! Surface calls are opaque to this crate: they may block for as long as
//! the host needs, they carry no timeout contract, and a panicking host
//! propagates to the manager's caller.

use ropey::Rope;

use crate::manager::Mode;

/// Opaque handle to the host container region surfaces attach to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerId(String);

impl ContainerId {
    /// Wrap a host-defined container identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Presentation options a factory applies when attaching a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Host style-class name for this mode's surface.
    pub class_name: String,
    /// Minimum surface height in pixels, when the host honors heights.
    pub min_height: Option<u32>,
    /// Whether the surface should grow with its content.
    pub auto_resize: bool,
}

/// A native editing surface.
///
/// All methods are commands or plain reads; none of them can fail. Content
/// written here is in the surface's *native* representation; conversion to
/// and from the interchange fragment is the owning area's job.
pub trait HostSurface {
    /// Read the surface's current native content.
    fn content(&self) -> String;
    /// Replace the surface's native content.
    fn set_content(&mut self, content: &str);
    /// Make the surface visible in its container.
    fn show(&mut self);
    /// Remove the surface from view.
    fn hide(&mut self);
    /// Toggle whether user input reaches the surface.
    fn set_editable(&mut self, editable: bool);
    /// Give the surface input focus.
    fn focus(&mut self);
    /// Move the caret to the start of the content.
    fn move_caret_to_start(&mut self);
    /// Release host resources. Further calls are undefined but must not
    /// be reachable through the manager.
    fn destroy(&mut self);
}

/// Creates host surfaces inside a container.
///
/// Injected into the manager so non-interactive hosts can substitute an
/// in-memory implementation without touching the rest of the crate.
pub trait SurfaceFactory {
    /// Attach a new surface for `mode` to `container`.
    fn create(
        &self,
        container: &ContainerId,
        mode: Mode,
        options: &SurfaceOptions,
    ) -> Box<dyn HostSurface>;
}

/// An in-memory surface backed by a rope.
///
/// Complete enough to act as a real headless host, not just a test double:
/// it tracks visibility, editability, focus, and a caret.
pub struct MemorySurface {
    buffer: Rope,
    caret: usize,
    visible: bool,
    editable: bool,
    focused: bool,
    destroyed: bool,
    options: SurfaceOptions,
}

impl MemorySurface {
    /// Create an empty, hidden, editable surface.
    pub fn new(options: SurfaceOptions) -> Self {
        Self {
            buffer: Rope::new(),
            caret: 0,
            visible: false,
            editable: true,
            focused: false,
            destroyed: false,
            options,
        }
    }

    /// Whether the surface is currently shown.
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether user input would reach the surface.
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    /// Whether the surface holds input focus.
    pub const fn has_focus(&self) -> bool {
        self.focused
    }

    /// Whether the surface has been destroyed.
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Caret position as a char index into the content.
    pub const fn caret(&self) -> usize {
        self.caret
    }

    /// The presentation options this surface was created with.
    pub const fn options(&self) -> &SurfaceOptions {
        &self.options
    }
}

impl HostSurface for MemorySurface {
    fn content(&self) -> String {
        self.buffer.to_string()
    }

    fn set_content(&mut self, content: &str) {
        self.buffer = Rope::from_str(content);
        self.caret = self.caret.min(self.buffer.len_chars());
    }

    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
        self.focused = false;
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    fn focus(&mut self) {
        if self.visible {
            self.focused = true;
        }
    }

    fn move_caret_to_start(&mut self) {
        self.caret = 0;
    }

    fn destroy(&mut self) {
        self.buffer = Rope::new();
        self.caret = 0;
        self.visible = false;
        self.focused = false;
        self.destroyed = true;
    }
}

/// Factory producing [`MemorySurface`] instances.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryFactory;

impl MemoryFactory {
    /// Create the factory.
    pub const fn new() -> Self {
        Self
    }
}

impl SurfaceFactory for MemoryFactory {
    fn create(
        &self,
        _container: &ContainerId,
        _mode: Mode,
        options: &SurfaceOptions,
    ) -> Box<dyn HostSurface> {
        Box::new(MemorySurface::new(options.clone()))
    }
}
