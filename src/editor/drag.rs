//! Pointer-drag controller.
//!
//! Translates pointer events over the canvas into selection changes and
//! normalized position updates on the document. Pointer-down on an overlay
//! selects it and immediately moves it to the pointer (click-to-move is
//! deliberate: clicking a label also repositions it). Dragging keeps
//! applying the same formula; pointer-up or leaving the canvas ends the
//! drag and keeps the last position. There are no cancel semantics.

use bevy::prelude::*;

use crate::design::{Design, OverlayPatch};

use super::canvas::{CanvasRect, percent_from_pointer};
use super::hit_testing::find_overlay_at;

/// Global dragging state. Only one overlay can be dragged at a time, and
/// it is always the selected one.
#[derive(Resource, Default)]
pub struct DragState {
    pub is_dragging: bool,
}

/// A canvas pointer event, already reduced from raw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Moved(Vec2),
    Released,
    LeftCanvas,
}

/// Reduce one frame of raw pointer input to at most one canvas event.
pub fn interpret_pointer(
    pressed: bool,
    down: bool,
    over_canvas: bool,
    pos: Option<Vec2>,
    rect: CanvasRect,
    dragging: bool,
) -> Option<PointerEvent> {
    if pressed && over_canvas {
        return pos.map(PointerEvent::Down);
    }
    if !dragging {
        return None;
    }
    if !down {
        return Some(PointerEvent::Released);
    }
    match pos {
        Some(p) if rect.contains(p) => Some(PointerEvent::Moved(p)),
        _ => Some(PointerEvent::LeftCanvas),
    }
}

/// Apply a canvas pointer event to the document.
pub fn apply_pointer_event(
    design: &mut Design,
    drag: &mut DragState,
    rect: CanvasRect,
    event: PointerEvent,
) {
    match event {
        PointerEvent::Down(pointer) => match find_overlay_at(design, rect, pointer) {
            Some(id) => {
                design.select(Some(id));
                drag.is_dragging = true;
                design.update_overlay(
                    id,
                    OverlayPatch::position(percent_from_pointer(rect, pointer)),
                );
            }
            None => {
                design.select(None);
                drag.is_dragging = false;
            }
        },
        PointerEvent::Moved(pointer) => {
            if drag.is_dragging
                && let Some(id) = design.selected
            {
                design.update_overlay(
                    id,
                    OverlayPatch::position(percent_from_pointer(rect, pointer)),
                );
            }
        }
        PointerEvent::Released | PointerEvent::LeftCanvas => {
            drag.is_dragging = false;
        }
    }
}
