//! Mode Areas: the uniform contract over the three editing surfaces.
//!
//! Each area binds one [`HostSurface`](crate::surface::HostSurface) to one
//! [`Mode`](crate::manager::Mode) and speaks the interchange fragment on
//! one side and its native representation on the other:
//!
//! - [`WysiwygArea`]: native content *is* the interchange fragment
//! - [`MarkupArea`]: native content is pretty-printed markup source
//! - [`TextArea`]: native content is plain text
//!
//! Areas are owned exclusively by the manager, which creates them on first
//! use and is the only caller of the lifecycle methods.

mod markup;
mod text;
mod wysiwyg;

pub use markup::MarkupArea;
pub use text::TextArea;
pub use wysiwyg::WysiwygArea;

use crate::manager::Mode;
use crate::surface::HostSurface;

/// Uniform interface each editing surface variant implements.
pub trait EditingArea {
    /// The mode this area is bound to.
    fn mode(&self) -> Mode;

    /// Read the area's content as an interchange fragment.
    ///
    /// This is a boundary call into the host surface and may block.
    fn content(&self) -> String;

    /// Write interchange content into the area.
    ///
    /// Recognized visually-empty fragments are normalized to the mode's
    /// own empty form first. Malformed markup is stored best-effort;
    /// this never fails.
    fn set_content(&mut self, ir: &str);

    /// Make the area visible. Idempotent.
    fn show(&mut self);

    /// Remove the area from view. Idempotent.
    fn hide(&mut self);

    /// Whether the area is currently shown.
    fn is_visible(&self) -> bool;

    /// Give the area input focus. No-op while hidden.
    fn focus(&mut self);

    /// Toggle whether user input reaches the area.
    fn set_editable(&mut self, editable: bool);

    /// Whether user input reaches the area.
    fn is_editable(&self) -> bool;

    /// Read the native representation, bypassing conversion.
    fn raw_content(&self) -> String;

    /// Write the native representation, bypassing conversion.
    fn set_raw_content(&mut self, raw: &str);

    /// Release the underlying surface. Idempotent.
    fn destroy(&mut self);

    /// Whether the area has been destroyed.
    fn is_destroyed(&self) -> bool;
}

/// Surface plumbing shared by all three variants: visibility and
/// editability bookkeeping over the raw host calls, with the idempotence
/// the [`EditingArea`] contract promises.
pub(crate) struct SurfaceBinding {
    surface: Box<dyn HostSurface>,
    visible: bool,
    editable: bool,
    destroyed: bool,
}

impl SurfaceBinding {
    pub(crate) fn new(surface: Box<dyn HostSurface>) -> Self {
        Self {
            surface,
            visible: false,
            editable: true,
            destroyed: false,
        }
    }

    pub(crate) fn read(&self) -> String {
        self.surface.content()
    }

    pub(crate) fn write(&mut self, content: &str) {
        self.surface.set_content(content);
    }

    pub(crate) fn show(&mut self) {
        if !self.visible && !self.destroyed {
            self.surface.show();
            self.visible = true;
        }
    }

    pub(crate) fn hide(&mut self) {
        if self.visible {
            self.surface.hide();
            self.visible = false;
        }
    }

    pub(crate) const fn visible(&self) -> bool {
        self.visible
    }

    pub(crate) fn focus_surface(&mut self) {
        self.surface.focus();
    }

    pub(crate) fn caret_to_start(&mut self) {
        self.surface.move_caret_to_start();
    }

    pub(crate) fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
        self.surface.set_editable(editable);
    }

    pub(crate) const fn editable(&self) -> bool {
        self.editable
    }

    pub(crate) fn destroy(&mut self) {
        if !self.destroyed {
            self.surface.destroy();
            self.visible = false;
            self.destroyed = true;
        }
    }

    pub(crate) const fn destroyed(&self) -> bool {
        self.destroyed
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use crate::surface::{HostSurface, MemorySurface, SurfaceOptions};

    pub(crate) fn create_test_surface() -> Box<dyn HostSurface> {
        Box::new(MemorySurface::new(SurfaceOptions {
            class_name: "test".to_string(),
            min_height: None,
            auto_resize: false,
        }))
    }
}
