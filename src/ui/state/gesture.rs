// SPDX-License-Identifier: MPL-2.0
//! Pointer, wheel and touch gestures mapped to per-image adjustments.
//!
//! One interaction is active at a time:
//!
//! - **Dragging**: primary button pressed over an occupied cell; moves pan.
//! - **Panning**: one finger on a cell already zoomed past its cover scale.
//! - **Pinching**: two fingers; zooms the image under their midpoint.
//!
//! Hover is tracked separately and only reported while idle. Wheel zoom is
//! a one-shot update and never becomes an interaction.
//!
//! All positions are in frame pixels; [`ViewTransform`] converts from
//! widget coordinates.

use super::capture::{CaptureGuard, InputCapture};
use crate::collage::{Collage, ImageId};
use crate::config::{DRAG_SENSITIVITY, WHEEL_ZOOM_FACTOR};
use crate::domain::collage::{FrameSpec, ZoomFactor};
use iced::{Point, Rectangle, Size, Vector};
use std::collections::BTreeMap;

// =============================================================================
// View transform
// =============================================================================

/// Maps widget coordinates to frame coordinates for a preview that shows
/// the whole frame, scaled uniformly and centered in the widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// Widget pixels per frame pixel.
    scale: f32,
    /// Top-left of the frame inside the widget.
    origin: Vector,
}

impl ViewTransform {
    #[must_use]
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            origin: Vector::new(0.0, 0.0),
        }
    }

    /// Fits `frame` inside `bounds` (contain), centered.
    #[must_use]
    pub fn contain(bounds: Size, frame: FrameSpec) -> Self {
        let scale = (bounds.width / frame.width()).min(bounds.height / frame.height());
        if !scale.is_finite() || scale <= 0.0 {
            return Self::identity();
        }
        let origin = Vector::new(
            (bounds.width - frame.width() * scale) / 2.0,
            (bounds.height - frame.height() * scale) / 2.0,
        );
        Self { scale, origin }
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Widget point to frame point.
    #[must_use]
    pub fn to_frame(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.origin.x) / self.scale,
            (point.y - self.origin.y) / self.scale,
        )
    }

    /// Frame rectangle to widget rectangle.
    #[must_use]
    pub fn to_widget(&self, x: f32, y: f32, width: f32, height: f32) -> Rectangle {
        Rectangle {
            x: self.origin.x + x * self.scale,
            y: self.origin.y + y * self.scale,
            width: width * self.scale,
            height: height * self.scale,
        }
    }
}

// =============================================================================
// Events and effects
// =============================================================================

/// Device input, already converted to frame coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerPressed(Point),
    PointerMoved(Point),
    /// Primary button released, wherever the pointer is.
    PointerReleased,
    /// Pointer moved off the canvas.
    PointerLeftCanvas,
    /// Pointer left the window.
    PointerLeftWindow,
    /// Vertical wheel movement in pixels; positive scrolls down (zooms out).
    Wheel { position: Point, delta_y: f32 },
    FingerPressed { id: u64, position: Point },
    FingerMoved { id: u64, position: Point },
    /// Finger lifted or lost.
    FingerLifted { id: u64 },
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The adjustment of this image changed.
    Adjusted(ImageId),
    /// Hover or interaction state changed; the preview must be redrawn.
    Redraw,
}

// =============================================================================
// Controller
// =============================================================================

#[derive(Debug, Default)]
enum Interaction {
    #[default]
    Idle,
    Dragging {
        target: ImageId,
        last: Point,
        _capture: CaptureGuard,
    },
    Panning {
        target: ImageId,
        finger: u64,
        last: Point,
        _capture: CaptureGuard,
    },
    Pinching {
        target: ImageId,
        fingers: (u64, u64),
        initial_distance: f32,
        initial_zoom: ZoomFactor,
        _capture: CaptureGuard,
    },
}

impl Interaction {
    fn target(&self) -> Option<ImageId> {
        match self {
            Interaction::Idle => None,
            Interaction::Dragging { target, .. }
            | Interaction::Panning { target, .. }
            | Interaction::Pinching { target, .. } => Some(*target),
        }
    }
}

/// Gesture state machine for the collage preview.
#[derive(Debug, Default)]
pub struct GestureController {
    interaction: Interaction,
    hovered: Option<usize>,
    pointer: Option<Point>,
    touches: BTreeMap<u64, Point>,
    capture: InputCapture,
}

impl GestureController {
    #[must_use]
    pub fn new(capture: InputCapture) -> Self {
        Self {
            capture,
            ..Self::default()
        }
    }

    /// Cell to highlight, if any. Always `None` during an interaction.
    #[must_use]
    pub fn hovered_cell(&self) -> Option<usize> {
        if self.is_interacting() {
            None
        } else {
            self.hovered
        }
    }

    #[must_use]
    pub fn is_interacting(&self) -> bool {
        !matches!(self.interaction, Interaction::Idle)
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.interaction, Interaction::Dragging { .. })
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.capture.is_captured()
    }

    /// Image targeted by the active interaction.
    #[must_use]
    pub fn target(&self) -> Option<ImageId> {
        self.interaction.target()
    }

    /// Returns whether the canvas should claim `event`: while an interaction
    /// holds the capture scope, or when the event is over an occupied cell
    /// and would start one (or zoom it, for the wheel).
    #[must_use]
    pub fn wants_capture(&self, event: &GestureEvent, collage: &Collage) -> bool {
        if self.is_captured() {
            return true;
        }
        match *event {
            GestureEvent::PointerPressed(position) | GestureEvent::Wheel { position, .. } => {
                hit(collage, position).is_some()
            }
            GestureEvent::FingerPressed { id, position } => {
                let mut touches = self.touches.clone();
                touches.insert(id, position);
                match touches.len() {
                    1 => hit(collage, position)
                        .is_some_and(|target| collage.adjustment(target).zoom.is_zoomed_in()),
                    2 => pinch_pair(&touches)
                        .is_some_and(|(_, a, b)| hit(collage, midpoint(a, b)).is_some()),
                    _ => false,
                }
            }
            _ => false,
        }
    }

    /// Applies `event` to the controller and, through it, to `collage`.
    pub fn handle(&mut self, event: GestureEvent, collage: &mut Collage) -> Effect {
        if let Some(target) = self.interaction.target() {
            if !collage.images().contains(target) {
                tracing::debug!(%target, "interaction target removed, ending gesture");
                self.end_interaction();
            }
        }

        match event {
            GestureEvent::PointerPressed(position) => self.on_pointer_pressed(position, collage),
            GestureEvent::PointerMoved(position) => self.on_pointer_moved(position, collage),
            GestureEvent::PointerReleased => {
                if self.is_dragging() {
                    self.end_interaction();
                    self.hovered = self.pointer.and_then(|p| hit_cell(collage, p));
                    Effect::Redraw
                } else {
                    Effect::None
                }
            }
            GestureEvent::PointerLeftCanvas => {
                if self.is_dragging() {
                    return Effect::None;
                }
                self.pointer = None;
                self.set_hover(None)
            }
            GestureEvent::PointerLeftWindow => {
                self.pointer = None;
                let was_dragging = self.is_dragging();
                if was_dragging {
                    self.end_interaction();
                }
                let hover = self.set_hover(None);
                if was_dragging {
                    Effect::Redraw
                } else {
                    hover
                }
            }
            GestureEvent::Wheel { position, delta_y } => Self::on_wheel(position, delta_y, collage),
            GestureEvent::FingerPressed { id, position } => {
                self.on_finger_pressed(id, position, collage)
            }
            GestureEvent::FingerMoved { id, position } => {
                self.on_finger_moved(id, position, collage)
            }
            GestureEvent::FingerLifted { id } => self.on_finger_lifted(id, collage),
        }
    }

    /// Drops any interaction and releases the capture scope.
    pub fn reset(&mut self) {
        self.end_interaction();
        self.hovered = None;
        self.pointer = None;
        self.touches.clear();
    }

    // -------------------------------------------------------------------------
    // Pointer
    // -------------------------------------------------------------------------

    fn on_pointer_pressed(&mut self, position: Point, collage: &Collage) -> Effect {
        self.pointer = Some(position);
        if self.is_interacting() {
            return Effect::None;
        }
        let Some(target) = hit(collage, position) else {
            return Effect::None;
        };
        tracing::debug!(%target, "drag started");
        self.interaction = Interaction::Dragging {
            target,
            last: position,
            _capture: self.capture.acquire(),
        };
        Effect::Redraw
    }

    fn on_pointer_moved(&mut self, position: Point, collage: &mut Collage) -> Effect {
        self.pointer = Some(position);
        if let Interaction::Dragging { target, last, .. } = &mut self.interaction {
            let (target, delta) = (*target, position - *last);
            *last = position;
            return pan(collage, target, delta);
        }
        if self.is_interacting() {
            return Effect::None;
        }
        let hovered = hit_cell(collage, position);
        self.set_hover(hovered)
    }

    fn on_wheel(position: Point, delta_y: f32, collage: &mut Collage) -> Effect {
        let Some(target) = hit(collage, position) else {
            return Effect::None;
        };
        let zoom_delta = -delta_y * WHEEL_ZOOM_FACTOR;
        collage.update_adjustment(target, |adjustment| {
            adjustment.with_zoom(adjustment.zoom.offset_by(zoom_delta))
        });
        Effect::Adjusted(target)
    }

    // -------------------------------------------------------------------------
    // Touch
    // -------------------------------------------------------------------------

    fn on_finger_pressed(&mut self, id: u64, position: Point, collage: &Collage) -> Effect {
        self.touches.insert(id, position);

        match self.touches.len() {
            1 => {
                let Some(target) = hit(collage, position) else {
                    return Effect::None;
                };
                if !collage.adjustment(target).zoom.is_zoomed_in() {
                    return Effect::None;
                }
                tracing::debug!(%target, finger = id, "touch pan started");
                self.interaction = Interaction::Panning {
                    target,
                    finger: id,
                    last: position,
                    _capture: self.capture.acquire(),
                };
                Effect::Redraw
            }
            2 => {
                let Some((fingers, a, b)) = pinch_pair(&self.touches) else {
                    return Effect::None;
                };
                let Some(target) = hit(collage, midpoint(a, b)) else {
                    return Effect::None;
                };
                let initial_distance = a.distance(b);
                if initial_distance <= f32::EPSILON {
                    return Effect::None;
                }
                tracing::debug!(%target, "pinch started");
                // The new guard is taken before the previous interaction drops its own.
                self.interaction = Interaction::Pinching {
                    target,
                    fingers,
                    initial_distance,
                    initial_zoom: collage.adjustment(target).zoom,
                    _capture: self.capture.acquire(),
                };
                Effect::Redraw
            }
            _ => Effect::None,
        }
    }

    fn on_finger_moved(&mut self, id: u64, position: Point, collage: &mut Collage) -> Effect {
        if let Some(touch) = self.touches.get_mut(&id) {
            *touch = position;
        } else {
            return Effect::None;
        }

        match &mut self.interaction {
            Interaction::Panning {
                target,
                finger,
                last,
                ..
            } if *finger == id => {
                let (target, delta) = (*target, position - *last);
                *last = position;
                pan(collage, target, delta)
            }
            Interaction::Pinching {
                target,
                fingers,
                initial_distance,
                initial_zoom,
                ..
            } => {
                let (Some(a), Some(b)) = (self.touches.get(&fingers.0), self.touches.get(&fingers.1))
                else {
                    return Effect::None;
                };
                let target = *target;
                let zoom = ZoomFactor::new(initial_zoom.value() * (a.distance(*b) / *initial_distance));
                collage.update_adjustment(target, |adjustment| adjustment.with_zoom(zoom));
                Effect::Adjusted(target)
            }
            _ => Effect::None,
        }
    }

    fn on_finger_lifted(&mut self, id: u64, collage: &Collage) -> Effect {
        self.touches.remove(&id);

        let ends = match &self.interaction {
            Interaction::Pinching { fingers, .. } => {
                if self.touches.len() < 2 {
                    true
                } else if fingers.0 == id || fingers.1 == id {
                    return self.rebind_pinch(collage);
                } else {
                    false
                }
            }
            Interaction::Panning { finger, .. } => *finger == id || self.touches.is_empty(),
            _ => false,
        };
        if ends {
            self.end_interaction();
            Effect::Redraw
        } else {
            Effect::None
        }
    }

    /// Continues a pinch on the remaining fingers after one of its pair
    /// lifted, restarting the ratio from the current zoom.
    fn rebind_pinch(&mut self, collage: &Collage) -> Effect {
        let Interaction::Pinching {
            target, _capture, ..
        } = std::mem::take(&mut self.interaction)
        else {
            return Effect::None;
        };
        let Some((fingers, a, b)) = pinch_pair(&self.touches) else {
            return Effect::Redraw;
        };
        let initial_distance = a.distance(b);
        if initial_distance <= f32::EPSILON {
            tracing::debug!(%target, "pinch fingers coincide, ending gesture");
            return Effect::Redraw;
        }
        tracing::debug!(%target, "pinch moved to remaining fingers");
        self.interaction = Interaction::Pinching {
            target,
            fingers,
            initial_distance,
            initial_zoom: collage.adjustment(target).zoom,
            _capture,
        };
        Effect::None
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn end_interaction(&mut self) {
        if let Some(target) = self.interaction.target() {
            tracing::debug!(%target, "gesture ended");
        }
        // Dropping the variant drops its guard.
        self.interaction = Interaction::Idle;
    }

    fn set_hover(&mut self, hovered: Option<usize>) -> Effect {
        if self.hovered == hovered {
            Effect::None
        } else {
            self.hovered = hovered;
            Effect::Redraw
        }
    }
}

/// Occupied cell under `position`.
fn hit_cell(collage: &Collage, position: Point) -> Option<usize> {
    collage
        .geometry()
        .hit_test(position.x, position.y, collage.occupied_cells())
}

/// Image under `position`.
fn hit(collage: &Collage, position: Point) -> Option<ImageId> {
    hit_cell(collage, position).and_then(|cell| collage.image_at_cell(cell))
}

/// Pans `target` by a frame-pixel delta.
///
/// Dragging across one full cell changes the offset by the drag sensitivity
/// (200 percentage points), so half a cell spans the whole range.
fn pan(collage: &mut Collage, target: ImageId, delta: Vector) -> Effect {
    let Ok((cell_width, cell_height)) = collage.geometry().cell_size() else {
        return Effect::None;
    };
    let delta_x = delta.x * DRAG_SENSITIVITY / cell_width;
    let delta_y = delta.y * DRAG_SENSITIVITY / cell_height;
    collage.update_adjustment(target, |adjustment| adjustment.panned(delta_x, delta_y));
    Effect::Adjusted(target)
}

/// The two lowest finger ids and their positions.
fn pinch_pair(touches: &BTreeMap<u64, Point>) -> Option<((u64, u64), Point, Point)> {
    let mut iter = touches.iter();
    let (&id_a, &a) = iter.next()?;
    let (&id_b, &b) = iter.next()?;
    Some(((id_a, id_b), a, b))
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collage::{Adjustment, SourceImage};
    use crate::domain::collage::{adjustment_bounds, CollageLayout, SpacingSpec};
    use crate::test_utils::{assert_abs_diff_eq, F32_EPSILON};

    /// 1x2 grid of 200x400 cells in a 400x400 frame, both occupied.
    fn setup() -> (GestureController, Collage, [ImageId; 2]) {
        let mut collage = Collage::new(
            CollageLayout::OneByTwo,
            FrameSpec::new(400.0, 1.0).expect("valid frame"),
            SpacingSpec::new(0.0, 0.0),
        );
        let left = collage.add_image(SourceImage::new("left"));
        let right = collage.add_image(SourceImage::new("right"));
        (GestureController::default(), collage, [left, right])
    }

    #[test]
    fn drag_pans_by_sensitivity_over_cell_size() {
        let (mut controller, mut collage, [left, _]) = setup();

        controller.handle(GestureEvent::PointerPressed(Point::new(100.0, 200.0)), &mut collage);
        assert!(controller.is_dragging());
        assert!(controller.is_captured());

        let effect = controller.handle(GestureEvent::PointerMoved(Point::new(120.0, 190.0)), &mut collage);
        assert_eq!(effect, Effect::Adjusted(left));

        let adjustment = collage.adjustment(left);
        // 20px of a 200px wide cell -> 20 points; -10px of a 400px tall cell -> -5 points.
        assert_abs_diff_eq!(adjustment.offset_x.value(), 20.0);
        assert_abs_diff_eq!(adjustment.offset_y.value(), -5.0);
    }

    #[test]
    fn drag_offsets_stay_clamped() {
        let (mut controller, mut collage, [left, _]) = setup();
        controller.handle(GestureEvent::PointerPressed(Point::new(10.0, 10.0)), &mut collage);
        controller.handle(GestureEvent::PointerMoved(Point::new(390.0, 390.0)), &mut collage);

        let adjustment = collage.adjustment(left);
        assert_eq!(adjustment.offset_x.value(), adjustment_bounds::MAX_OFFSET);
        assert_eq!(adjustment.offset_y.value(), adjustment_bounds::MAX_OFFSET);
    }

    #[test]
    fn release_anywhere_ends_drag_and_releases_capture() {
        let (mut controller, mut collage, _) = setup();
        controller.handle(GestureEvent::PointerPressed(Point::new(100.0, 100.0)), &mut collage);
        // Leaving the canvas does not end a drag.
        controller.handle(GestureEvent::PointerLeftCanvas, &mut collage);
        assert!(controller.is_dragging());

        controller.handle(GestureEvent::PointerReleased, &mut collage);
        assert!(!controller.is_interacting());
        assert!(!controller.is_captured());
    }

    #[test]
    fn leaving_window_ends_drag() {
        let (mut controller, mut collage, _) = setup();
        controller.handle(GestureEvent::PointerPressed(Point::new(100.0, 100.0)), &mut collage);
        controller.handle(GestureEvent::PointerLeftWindow, &mut collage);
        assert!(!controller.is_dragging());
        assert!(!controller.is_captured());
    }

    #[test]
    fn press_outside_occupied_cells_does_not_start() {
        let (mut controller, mut collage, [_, right]) = setup();
        collage.remove_image(right);

        let effect = controller.handle(GestureEvent::PointerPressed(Point::new(300.0, 100.0)), &mut collage);
        assert_eq!(effect, Effect::None);
        assert!(!controller.is_interacting());
        assert!(!controller.is_captured());
    }

    #[test]
    fn hover_tracks_pointer_and_clears_on_leave() {
        let (mut controller, mut collage, _) = setup();
        let effect = controller.handle(GestureEvent::PointerMoved(Point::new(300.0, 50.0)), &mut collage);
        assert_eq!(effect, Effect::Redraw);
        assert_eq!(controller.hovered_cell(), Some(1));

        // Same cell: nothing to redraw.
        let effect = controller.handle(GestureEvent::PointerMoved(Point::new(310.0, 60.0)), &mut collage);
        assert_eq!(effect, Effect::None);

        controller.handle(GestureEvent::PointerLeftCanvas, &mut collage);
        assert_eq!(controller.hovered_cell(), None);
    }

    #[test]
    fn hover_is_hidden_while_dragging() {
        let (mut controller, mut collage, _) = setup();
        controller.handle(GestureEvent::PointerMoved(Point::new(50.0, 50.0)), &mut collage);
        controller.handle(GestureEvent::PointerPressed(Point::new(50.0, 50.0)), &mut collage);
        assert_eq!(controller.hovered_cell(), None);

        controller.handle(GestureEvent::PointerMoved(Point::new(300.0, 50.0)), &mut collage);
        controller.handle(GestureEvent::PointerReleased, &mut collage);
        assert_eq!(controller.hovered_cell(), Some(1));
    }

    #[test]
    fn wheel_zooms_by_factor() {
        let (mut controller, mut collage, [left, _]) = setup();
        let at = Point::new(100.0, 100.0);

        controller.handle(GestureEvent::Wheel { position: at, delta_y: -500.0 }, &mut collage);
        assert_abs_diff_eq!(collage.adjustment(left).zoom.value(), 2.0);

        controller.handle(GestureEvent::Wheel { position: at, delta_y: 5000.0 }, &mut collage);
        assert_abs_diff_eq!(collage.adjustment(left).zoom.value(), adjustment_bounds::MIN_ZOOM);
        assert!(!controller.is_captured());
    }

    #[test]
    fn single_finger_pans_only_zoomed_cells() {
        let (mut controller, mut collage, [left, right]) = setup();
        collage.set_adjustment(right, Adjustment::new(0.0, 0.0, 1.5));

        controller.handle(
            GestureEvent::FingerPressed { id: 1, position: Point::new(100.0, 100.0) },
            &mut collage,
        );
        assert!(!controller.is_interacting());
        controller.handle(GestureEvent::FingerLifted { id: 1 }, &mut collage);

        controller.handle(
            GestureEvent::FingerPressed { id: 2, position: Point::new(300.0, 100.0) },
            &mut collage,
        );
        assert!(controller.is_captured());
        controller.handle(
            GestureEvent::FingerMoved { id: 2, position: Point::new(280.0, 100.0) },
            &mut collage,
        );
        assert_abs_diff_eq!(collage.adjustment(right).offset_x.value(), -20.0);
        assert_eq!(collage.adjustment(left), Adjustment::default());

        controller.handle(GestureEvent::FingerLifted { id: 2 }, &mut collage);
        assert!(!controller.is_captured());
    }

    #[test]
    fn pinch_scales_initial_zoom_by_distance_ratio() {
        let (mut controller, mut collage, [left, _]) = setup();
        collage.set_adjustment(left, Adjustment::new(0.0, 0.0, 1.2));

        controller.handle(
            GestureEvent::FingerPressed { id: 1, position: Point::new(80.0, 200.0) },
            &mut collage,
        );
        controller.handle(
            GestureEvent::FingerPressed { id: 2, position: Point::new(120.0, 200.0) },
            &mut collage,
        );
        assert!(controller.is_captured());

        // Distance 40 -> 80: zoom doubles.
        controller.handle(
            GestureEvent::FingerMoved { id: 2, position: Point::new(160.0, 200.0) },
            &mut collage,
        );
        assert_abs_diff_eq!(collage.adjustment(left).zoom.value(), 2.4, epsilon = F32_EPSILON);

        // Far apart: clamped.
        controller.handle(
            GestureEvent::FingerMoved { id: 2, position: Point::new(199.0, 200.0) },
            &mut collage,
        );
        assert_abs_diff_eq!(collage.adjustment(left).zoom.value(), adjustment_bounds::MAX_ZOOM);

        controller.handle(GestureEvent::FingerLifted { id: 1 }, &mut collage);
        assert!(!controller.is_interacting());
        assert!(!controller.is_captured());
    }

    #[test]
    fn pinch_continues_on_remaining_fingers_when_one_lifts() {
        let (mut controller, mut collage, [left, _]) = setup();

        for (id, x) in [(1, 80.0), (2, 120.0), (3, 160.0)] {
            controller.handle(
                GestureEvent::FingerPressed { id, position: Point::new(x, 200.0) },
                &mut collage,
            );
        }
        assert!(controller.is_captured());

        // Fingers 2 and 3 take over, 40 px apart at zoom 1.
        controller.handle(GestureEvent::FingerLifted { id: 1 }, &mut collage);
        assert!(controller.is_interacting());

        let effect = controller.handle(
            GestureEvent::FingerMoved { id: 2, position: Point::new(80.0, 200.0) },
            &mut collage,
        );
        assert_eq!(effect, Effect::Adjusted(left));
        assert_abs_diff_eq!(collage.adjustment(left).zoom.value(), 2.0, epsilon = F32_EPSILON);

        controller.handle(GestureEvent::FingerLifted { id: 3 }, &mut collage);
        assert!(!controller.is_interacting());
        assert!(!controller.is_captured());
    }

    #[test]
    fn removing_target_ends_interaction_on_next_event() {
        let (mut controller, mut collage, [left, _]) = setup();
        controller.handle(GestureEvent::PointerPressed(Point::new(100.0, 100.0)), &mut collage);
        collage.remove_image(left);

        controller.handle(GestureEvent::PointerMoved(Point::new(150.0, 100.0)), &mut collage);
        assert!(!controller.is_dragging());
        assert!(!controller.is_captured());
    }

    #[test]
    fn wants_capture_only_over_occupied_cells() {
        let (controller, mut collage, [_, right]) = setup();
        let over_left = GestureEvent::PointerPressed(Point::new(100.0, 100.0));
        let over_right = GestureEvent::PointerPressed(Point::new(300.0, 100.0));
        assert!(controller.wants_capture(&over_left, &collage));

        collage.remove_image(right);
        assert!(!controller.wants_capture(&over_right, &collage));
        assert!(!controller.wants_capture(
            &GestureEvent::FingerPressed { id: 1, position: Point::new(100.0, 100.0) },
            &collage
        ));
    }

    #[test]
    fn view_transform_contains_and_centers() {
        let frame = FrameSpec::new(800.0, 2.0).expect("valid frame");
        let transform = ViewTransform::contain(Size::new(400.0, 400.0), frame);
        assert_abs_diff_eq!(transform.scale(), 0.5);

        // Frame is 400x200 on screen, centered vertically at y = 100.
        let top_left = transform.to_frame(Point::new(0.0, 100.0));
        assert_abs_diff_eq!(top_left.x, 0.0);
        assert_abs_diff_eq!(top_left.y, 0.0);
        let bottom_right = transform.to_frame(Point::new(400.0, 300.0));
        assert_abs_diff_eq!(bottom_right.x, 800.0);
        assert_abs_diff_eq!(bottom_right.y, 400.0);

        let rect = transform.to_widget(400.0, 200.0, 100.0, 100.0);
        assert_abs_diff_eq!(rect.x, 200.0);
        assert_abs_diff_eq!(rect.y, 200.0);
        assert_abs_diff_eq!(rect.width, 50.0);
    }
}
