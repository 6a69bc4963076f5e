//! The design document: background, overlays, and the current selection.
//!
//! This is the single source of truth for everything the canvas shows.
//! All mutations are synchronous and immediately observable; UI systems
//! re-derive what they draw from this resource every frame.

use bevy::prelude::*;

use super::background::BackgroundImage;
use super::overlay::{Overlay, OverlayId, OverlayPatch};

/// The document being edited.
///
/// Overlay order is creation order and doubles as z-order (later overlays
/// draw on top). At most one overlay is selected at a time, and a non-null
/// selection always references an overlay present in the list.
#[derive(Resource, Debug, Clone)]
pub struct Design {
    pub background: Option<BackgroundImage>,
    pub overlays: Vec<Overlay>,
    pub selected: Option<OverlayId>,
    /// Bumped on every `set_background` so texture caches know to refresh.
    pub background_revision: u64,
    next_id: u64,
}

impl Default for Design {
    fn default() -> Self {
        Self {
            background: None,
            overlays: Vec::new(),
            selected: None,
            background_revision: 0,
            next_id: creation_seed(),
        }
    }
}

/// Seed ids from the clock so ids stay unique across sessions that touch
/// the same saved design.
fn creation_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(1)
}

impl Design {
    /// Append a new overlay with the fixed default style at the canvas
    /// center, select it, and return its id.
    pub fn add_overlay(&mut self) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.overlays.push(Overlay::with_defaults(id));
        self.selected = Some(id);
        id
    }

    /// Merge a partial attribute patch into the overlay with the given id.
    /// Silent no-op when the id is absent.
    pub fn update_overlay(&mut self, id: OverlayId, patch: OverlayPatch) {
        if let Some(overlay) = self.overlays.iter_mut().find(|o| o.id == id) {
            patch.apply_to(overlay);
        }
    }

    /// Remove the overlay with the given id. Clears the selection if it
    /// pointed at the removed overlay. Silent no-op when the id is absent.
    pub fn delete_overlay(&mut self, id: OverlayId) {
        self.overlays.retain(|o| o.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Replace the background unconditionally. Overlays are untouched.
    pub fn set_background(&mut self, background: BackgroundImage) {
        self.background = Some(background);
        self.background_revision += 1;
    }

    /// Move the selection pointer; `None` deselects.
    pub fn select(&mut self, id: Option<OverlayId>) {
        self.selected = id;
    }

    pub fn overlay(&self, id: OverlayId) -> Option<&Overlay> {
        self.overlays.iter().find(|o| o.id == id)
    }

    pub fn selected_overlay(&self) -> Option<&Overlay> {
        self.selected.and_then(|id| self.overlay(id))
    }

    /// Both export paths require a background and at least one overlay.
    pub fn can_export(&self) -> bool {
        self.background.is_some() && !self.overlays.is_empty()
    }

    /// Replace the whole document with loaded state, reseeding the id
    /// allocator above every loaded id so future ids never collide.
    pub fn restore(&mut self, background: Option<BackgroundImage>, overlays: Vec<Overlay>) {
        let max_id = overlays.iter().map(|o| o.id.0).max().unwrap_or(0);
        // Loaded ids come from external JSON; saturate rather than overflow
        self.next_id = self.next_id.max(max_id.saturating_add(1));
        self.background = background;
        self.overlays = overlays;
        self.selected = None;
        self.background_revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::overlay::TextAlign;

    fn test_background() -> BackgroundImage {
        BackgroundImage::for_tests(4, 4)
    }

    #[test]
    fn test_add_overlay_ids_are_unique() {
        let mut design = Design::default();
        let mut ids = Vec::new();
        for _ in 0..100 {
            ids.push(design.add_overlay());
        }
        let mut deduped = ids.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), ids.len());
    }

    #[test]
    fn test_add_overlay_selects_new_overlay() {
        let mut design = Design::default();
        let first = design.add_overlay();
        assert_eq!(design.selected, Some(first));
        let second = design.add_overlay();
        assert_eq!(design.selected, Some(second));
        assert_eq!(design.overlays.len(), 2);
    }

    #[test]
    fn test_add_overlay_uses_defaults() {
        let mut design = Design::default();
        let id = design.add_overlay();
        let overlay = design.overlay(id).unwrap();
        assert_eq!(overlay.position, Vec2::new(50.0, 50.0));
        assert_eq!(overlay.font_family, "Montserrat");
    }

    #[test]
    fn test_update_overlay_patches_only_named_fields() {
        let mut design = Design::default();
        let a = design.add_overlay();
        let b = design.add_overlay();
        let b_before = design.overlay(b).unwrap().clone();

        design.update_overlay(
            a,
            OverlayPatch {
                text: Some("Hello".to_string()),
                ..OverlayPatch::default()
            },
        );

        let a_after = design.overlay(a).unwrap();
        assert_eq!(a_after.text, "Hello");
        assert_eq!(a_after.font_size, "48px");
        // The other overlay is untouched
        assert_eq!(design.overlay(b).unwrap(), &b_before);
    }

    #[test]
    fn test_update_overlay_missing_id_is_noop() {
        let mut design = Design::default();
        design.add_overlay();
        let before = design.overlays.clone();
        design.update_overlay(
            OverlayId(u64::MAX),
            OverlayPatch {
                text: Some("ghost".to_string()),
                ..OverlayPatch::default()
            },
        );
        assert_eq!(design.overlays, before);
    }

    #[test]
    fn test_delete_selected_overlay_clears_selection() {
        let mut design = Design::default();
        let id = design.add_overlay();
        assert_eq!(design.selected, Some(id));
        design.delete_overlay(id);
        assert!(design.overlays.is_empty());
        assert_eq!(design.selected, None);
    }

    #[test]
    fn test_delete_unselected_overlay_keeps_selection() {
        let mut design = Design::default();
        let first = design.add_overlay();
        let second = design.add_overlay();
        design.select(Some(second));
        design.delete_overlay(first);
        assert_eq!(design.selected, Some(second));
        assert_eq!(design.overlays.len(), 1);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut design = Design::default();
        let id = design.add_overlay();
        design.delete_overlay(OverlayId(u64::MAX));
        assert_eq!(design.overlays.len(), 1);
        assert_eq!(design.selected, Some(id));
    }

    #[test]
    fn test_deleted_ids_are_never_reused() {
        let mut design = Design::default();
        let first = design.add_overlay();
        design.delete_overlay(first);
        let second = design.add_overlay();
        assert_ne!(first, second);
    }

    #[test]
    fn test_set_background_replaces_and_keeps_overlays() {
        let mut design = Design::default();
        design.add_overlay();
        design.set_background(test_background());
        let first_revision = design.background_revision;
        design.set_background(test_background());
        assert!(design.background.is_some());
        assert_eq!(design.overlays.len(), 1);
        assert!(design.background_revision > first_revision);
    }

    #[test]
    fn test_positions_are_not_clamped() {
        let mut design = Design::default();
        let id = design.add_overlay();
        design.update_overlay(id, OverlayPatch::position(Vec2::new(-23.5, 141.0)));
        assert_eq!(design.overlay(id).unwrap().position, Vec2::new(-23.5, 141.0));
    }

    #[test]
    fn test_can_export_requires_background_and_overlay() {
        let mut design = Design::default();
        assert!(!design.can_export());

        design.set_background(test_background());
        assert!(!design.can_export());

        let id = design.add_overlay();
        assert!(design.can_export());

        design.delete_overlay(id);
        assert!(!design.can_export());
    }

    #[test]
    fn test_restore_reseeds_allocator_and_clears_selection() {
        let mut design = Design::default();
        let mut overlay = Overlay::with_defaults(OverlayId(u64::MAX - 1));
        overlay.text_align = TextAlign::Right;
        design.restore(Some(test_background()), vec![overlay]);

        assert_eq!(design.selected, None);
        assert_eq!(design.overlays.len(), 1);
        let fresh = design.add_overlay();
        assert_eq!(fresh, OverlayId(u64::MAX));
    }

    #[test]
    fn test_restore_with_max_id_saturates_allocator() {
        let mut design = Design::default();
        // Ids in a loaded file are arbitrary u64s; the allocator must not wrap
        design.restore(None, vec![Overlay::with_defaults(OverlayId(u64::MAX))]);

        let fresh = design.add_overlay();
        assert_eq!(fresh, OverlayId(u64::MAX));
        let next = design.add_overlay();
        assert_ne!(next, OverlayId(0));
    }
}
