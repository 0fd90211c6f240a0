//! The visually-rendered editing surface.

use super::{EditingArea, SurfaceBinding};
use crate::convert::EMPTY_SENTINEL;
use crate::manager::{Mode, SelectionCollaborator};
use crate::surface::HostSurface;

/// Editing area whose native representation is the interchange fragment
/// itself: content passes through without conversion, and only the
/// empty-document spellings are renormalized.
pub struct WysiwygArea {
    binding: SurfaceBinding,
    selection: Option<Box<dyn SelectionCollaborator>>,
}

impl WysiwygArea {
    /// Bind a host surface, optionally with a caret/selection collaborator.
    pub fn new(
        surface: Box<dyn HostSurface>,
        selection: Option<Box<dyn SelectionCollaborator>>,
    ) -> Self {
        Self {
            binding: SurfaceBinding::new(surface),
            selection,
        }
    }

    fn normalize(ir: &str) -> &str {
        match ir {
            "" | "<br>" | "<p></p>" => EMPTY_SENTINEL,
            other => other,
        }
    }
}

impl EditingArea for WysiwygArea {
    fn mode(&self) -> Mode {
        Mode::Wysiwyg
    }

    fn content(&self) -> String {
        self.binding.read()
    }

    fn set_content(&mut self, ir: &str) {
        // Restoring the caret mid-composition would cancel the host IME
        // session, so the collaborator is only consulted between
        // compositions.
        let keep_caret = self
            .selection
            .as_ref()
            .is_some_and(|selection| !selection.is_composing());
        if keep_caret {
            if let Some(selection) = self.selection.as_mut() {
                selection.save_caret();
            }
        }
        self.binding.write(Self::normalize(ir));
        if keep_caret {
            if let Some(selection) = self.selection.as_mut() {
                selection.restore_caret();
            }
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
        if let Some(selection) = self.selection.as_mut() {
            if !selection.is_composing() {
                selection.restore_caret();
            }
        }
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
