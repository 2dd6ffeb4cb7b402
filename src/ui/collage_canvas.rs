// SPDX-License-Identifier: MPL-2.0
//! Canvas overlay on top of the rasterized collage preview.
//!
//! The preview itself is an image widget showing the same raster that gets
//! exported. This overlay sits above it, draws the placeholder labels (the
//! raster has no text) and turns pointer, wheel and touch events into
//! [`GestureEvent`]s in frame coordinates.

use crate::collage::{render, CellLabel, CellRect, Collage, Painter};
use crate::config::WHEEL_LINE_HEIGHT_PX;
use crate::i18n::fluent::I18n;
use crate::ui::state::{GestureController, GestureEvent, ViewTransform};
use iced::widget::canvas::{self, Frame, Geometry, Text};
use iced::widget::Action;
use iced::{mouse, touch, Element, Length, Point, Rectangle, Renderer, Theme};

/// Base label size in frame pixels.
const LABEL_SIZE: f32 = 16.0;
/// Labels never shrink below this on screen.
const MIN_LABEL_SIZE: f32 = 11.0;
/// Average glyph advance relative to the font size, for centering.
const GLYPH_ADVANCE: f32 = 0.55;

/// Canvas program drawing labels and emitting gestures.
pub struct CollageOverlay<'a> {
    collage: &'a Collage,
    controller: &'a GestureController,
    i18n: &'a I18n,
}

/// Tracks whether the pointer was over the canvas on the previous event.
#[derive(Debug, Default)]
pub struct OverlayState {
    inside: bool,
}

impl<'a> CollageOverlay<'a> {
    pub fn new(collage: &'a Collage, controller: &'a GestureController, i18n: &'a I18n) -> Self {
        Self {
            collage,
            controller,
            i18n,
        }
    }

    /// Builds the overlay widget, filling the available space.
    pub fn view(self) -> Element<'a, GestureEvent> {
        iced::widget::Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn transform(&self, bounds: Rectangle) -> ViewTransform {
        ViewTransform::contain(bounds.size(), self.collage.frame())
    }

    fn publish(&self, event: GestureEvent) -> Action<GestureEvent> {
        let action = Action::publish(event);
        if self.controller.wants_capture(&event, self.collage) {
            action.and_capture()
        } else {
            action
        }
    }

    fn on_mouse(
        &self,
        state: &mut OverlayState,
        event: &mouse::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<GestureEvent>> {
        let transform = self.transform(bounds);

        match event {
            mouse::Event::CursorMoved { .. } => {
                if let Some(position) = cursor.position_in(bounds) {
                    state.inside = true;
                    return Some(self.publish(GestureEvent::PointerMoved(transform.to_frame(position))));
                }
                let was_inside = std::mem::take(&mut state.inside);
                if self.controller.is_dragging() {
                    // Keep panning while the pointer is outside the canvas.
                    let position = cursor.position()?;
                    let relative = Point::new(position.x - bounds.x, position.y - bounds.y);
                    return Some(self.publish(GestureEvent::PointerMoved(transform.to_frame(relative))));
                }
                was_inside.then(|| Action::publish(GestureEvent::PointerLeftCanvas))
            }
            mouse::Event::CursorLeft => {
                state.inside = false;
                Some(Action::publish(GestureEvent::PointerLeftWindow))
            }
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let position = cursor.position_in(bounds)?;
                Some(self.publish(GestureEvent::PointerPressed(transform.to_frame(position))))
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                Some(self.publish(GestureEvent::PointerReleased))
            }
            mouse::Event::WheelScrolled { delta } => {
                let position = cursor.position_in(bounds)?;
                let delta_y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } => -y * WHEEL_LINE_HEIGHT_PX,
                    mouse::ScrollDelta::Pixels { y, .. } => -y,
                };
                Some(self.publish(GestureEvent::Wheel {
                    position: transform.to_frame(position),
                    delta_y,
                }))
            }
            _ => None,
        }
    }

    fn on_touch(&self, event: &touch::Event, bounds: Rectangle) -> Option<Action<GestureEvent>> {
        let transform = self.transform(bounds);
        let to_frame =
            |position: Point| transform.to_frame(Point::new(position.x - bounds.x, position.y - bounds.y));

        let gesture = match *event {
            touch::Event::FingerPressed { id, position } => {
                if !bounds.contains(position) {
                    return None;
                }
                GestureEvent::FingerPressed {
                    id: id.0,
                    position: to_frame(position),
                }
            }
            touch::Event::FingerMoved { id, position } => GestureEvent::FingerMoved {
                id: id.0,
                position: to_frame(position),
            },
            touch::Event::FingerLifted { id, .. } | touch::Event::FingerLost { id, .. } => {
                GestureEvent::FingerLifted { id: id.0 }
            }
        };
        Some(self.publish(gesture))
    }
}

impl canvas::Program<GestureEvent> for CollageOverlay<'_> {
    type State = OverlayState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<GestureEvent>> {
        match event {
            iced::Event::Mouse(mouse_event) => self.on_mouse(state, mouse_event, bounds, cursor),
            iced::Event::Touch(touch_event) => self.on_touch(touch_event, bounds),
            _ => None,
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let mut painter = LabelPainter {
            frame: &mut frame,
            transform: self.transform(bounds),
            i18n: self.i18n,
        };
        render(self.collage, None, &mut painter);
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.controller.is_dragging() {
            return mouse::Interaction::Grabbing;
        }
        let Some(position) = cursor.position_in(bounds) else {
            return mouse::Interaction::default();
        };
        let point = self.transform(bounds).to_frame(position);
        let over_image = self
            .collage
            .geometry()
            .hit_test(point.x, point.y, self.collage.occupied_cells())
            .is_some();
        if over_image {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

/// Painter that only writes placeholder labels onto a canvas frame.
struct LabelPainter<'f, 'a> {
    frame: &'f mut Frame,
    transform: ViewTransform,
    i18n: &'a I18n,
}

impl Painter for LabelPainter<'_, '_> {
    fn label(&mut self, rect: CellRect, label: CellLabel) {
        let content = self.i18n.tr(label.i18n_key());
        let size = (LABEL_SIZE * self.transform.scale()).max(MIN_LABEL_SIZE);
        let cell = self.transform.to_widget(rect.x, rect.y, rect.width, rect.height);
        let estimated_width = content.chars().count() as f32 * size * GLYPH_ADVANCE;
        if estimated_width > cell.width || size > cell.height {
            return;
        }

        self.frame.fill_text(Text {
            content,
            position: Point::new(
                cell.x + (cell.width - estimated_width) / 2.0,
                cell.y + (cell.height - size) / 2.0,
            ),
            color: crate::collage::render::palette::LABEL,
            size: size.into(),
            ..Text::default()
        });
    }
}
