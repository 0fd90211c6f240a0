//! The plain-text editing surface.

use super::{EditingArea, SurfaceBinding};
use crate::convert::{html_to_text, text_to_html};
use crate::manager::Mode;
use crate::surface::HostSurface;

/// Editing area whose native representation is plain text. Writing
/// flattens the interchange fragment to text; reading re-wraps the text in
/// paragraphs. Inline formatting does not survive a detour through this
/// area; the text itself always does.
pub struct TextArea {
    binding: SurfaceBinding,
}

impl TextArea {
    /// Bind a host surface.
    pub fn new(surface: Box<dyn HostSurface>) -> Self {
        Self {
            binding: SurfaceBinding::new(surface),
        }
    }
}

impl EditingArea for TextArea {
    fn mode(&self) -> Mode {
        Mode::Text
    }

    fn content(&self) -> String {
        text_to_html(&self.binding.read())
    }

    fn set_content(&mut self, ir: &str) {
        self.binding.write(&html_to_text(ir));
    }

    fn show(&mut self) {
        self.binding.show();
    }

    fn hide(&mut self) {
        self.binding.hide();
    }

    fn is_visible(&self) -> bool {
        self.binding.visible()
    }

    fn focus(&mut self) {
        if !self.binding.visible() {
            return;
        }
        self.binding.focus_surface();
        self.binding.caret_to_start();
    }

    fn set_editable(&mut self, editable: bool) {
        self.binding.set_editable(editable);
    }

    fn is_editable(&self) -> bool {
        self.binding.editable()
    }

    fn raw_content(&self) -> String {
        self.binding.read()
    }

    fn set_raw_content(&mut self, raw: &str) {
        self.binding.write(raw);
    }

    fn destroy(&mut self) {
        self.binding.destroy();
    }

    fn is_destroyed(&self) -> bool {
        self.binding.destroyed()
    }
}
