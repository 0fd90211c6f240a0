//! The raw-markup source editing surface.

use super::{EditingArea, SurfaceBinding};
use crate::convert::format_html;
use crate::manager::Mode;
use crate::surface::HostSurface;

/// Markers that all render as an empty document; source mode stores plain
/// emptiness for every one of them.
const EMPTY_MARKERS: [&str; 5] = ["", "<br>", "<p>&nbsp;</p>", "<p><br></p>", "<p></p>"];

/// Editing area whose native representation is pretty-printed markup
/// source. Incoming fragments are formatted once on write; reads return
/// the edited source verbatim, without a re-parse.
pub struct MarkupArea {
    binding: SurfaceBinding,
}

impl MarkupArea {
    /// Bind a host surface.
    pub fn new(surface: Box<dyn HostSurface>) -> Self {
        Self {
            binding: SurfaceBinding::new(surface),
        }
    }
}

impl EditingArea for MarkupArea {
    fn mode(&self) -> Mode {
        Mode::Markup
    }

    fn content(&self) -> String {
        self.binding.read()
    }

    fn set_content(&mut self, ir: &str) {
        if EMPTY_MARKERS.contains(&ir) {
            self.binding.write("");
        } else {
            self.binding.write(&format_html(ir));
        }
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

#[cfg(test)]
mod tests {
    use super::super::test_helpers::create_test_surface;
    use super::*;

    fn create_test_area() -> MarkupArea {
        MarkupArea::new(create_test_surface())
    }

    #[test]
    fn test_empty_markers_store_empty_source() {
        for marker in EMPTY_MARKERS {
            let mut area = create_test_area();
            area.set_content(marker);
            assert_eq!(area.content(), "", "marker {marker:?}");
        }
    }

    #[test]
    fn test_set_content_pretty_prints() {
        let mut area = create_test_area();
        area.set_content("<div><p>Hello</p></div>");
        assert_eq!(area.content(), "<div>\n\n  <p>\n    Hello\n  </p>\n\n</div>");
    }

    #[test]
    fn test_content_returns_edited_source_without_reparse() {
        let mut area = create_test_area();
        area.set_raw_content("<p>hand-edited,   odd   spacing</p>");
        assert_eq!(area.content(), "<p>hand-edited,   odd   spacing</p>");
    }

    #[test]
    fn test_focus_noop_while_hidden() {
        let mut area = create_test_area();
        area.focus();
        assert!(!area.is_visible());
    }
}
