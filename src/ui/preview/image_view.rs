// SPDX-License-Identifier: MPL-2.0
//! Zoomable, pannable image preview.
//!
//! The image is fitted into the available area at zoom 1 and scaled
//! around the center from there. Ctrl + wheel zooms by the wheel step;
//! dragging pans once the zoom exceeds 1.

use crate::domain::preview::{ImageSource, ImageZoom, PanOffset, PanState};
use crate::ui::styles::container as container_styles;
use iced::widget::canvas::{self, Canvas, Frame, Geometry};
use iced::widget::image::Handle;
use iced::widget::{Action, Container};
use iced::{keyboard, mouse, Element, Length, Point, Rectangle, Renderer, Size, Theme};

#[derive(Debug, Clone)]
pub struct State {
    handle: Handle,
    natural: Size,
    zoom: ImageZoom,
    pan: PanState,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    /// Ctrl + wheel, positive zooms in.
    Wheel(f32),
    DragStarted(Point),
    DragMoved(Point),
    DragEnded,
}

fn to_offset(point: Point) -> PanOffset {
    PanOffset::new(point.x, point.y)
}

impl State {
    #[must_use]
    pub fn new(source: &ImageSource) -> Self {
        Self {
            handle: Handle::from_path(&source.path),
            natural: Size::new(source.width as f32, source.height as f32),
            zoom: ImageZoom::default(),
            pan: PanState::default(),
        }
    }

    #[must_use]
    pub fn zoom(&self) -> ImageZoom {
        self.zoom
    }

    #[must_use]
    pub fn pan(&self) -> PanOffset {
        self.pan.offset()
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::ZoomIn => self.set_zoom(self.zoom.zoom_in()),
            Message::ZoomOut => self.set_zoom(self.zoom.zoom_out()),
            Message::ResetZoom => self.set_zoom(ImageZoom::default()),
            Message::Wheel(delta) => self.set_zoom(self.zoom.wheel(delta)),
            Message::DragStarted(point) => self.pan.start(to_offset(point), self.zoom),
            Message::DragMoved(point) => self.pan.drag_to(to_offset(point)),
            Message::DragEnded => self.pan.stop(),
        }
    }

    fn set_zoom(&mut self, zoom: ImageZoom) {
        self.zoom = zoom;
        self.pan.sync_with_zoom(zoom);
    }

    pub fn view(&self) -> Element<'_, Message> {
        let canvas = Canvas::new(ImageCanvas {
            handle: &self.handle,
            natural: self.natural,
            zoom: self.zoom,
            pan: self.pan.offset(),
            dragging: self.pan.is_dragging(),
            pannable: self.zoom.allows_pan(),
        })
        .width(Length::Fill)
        .height(Length::Fill);

        Container::new(canvas)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container_styles::canvas_area)
            .into()
    }
}

/// Rectangle the image occupies inside `bounds` (local coordinates).
fn image_rect(natural: Size, bounds: Size, zoom: f32, pan: PanOffset) -> Rectangle {
    if natural.width <= 0.0 || natural.height <= 0.0 {
        return Rectangle::new(Point::ORIGIN, Size::ZERO);
    }
    let fit = (bounds.width / natural.width)
        .min(bounds.height / natural.height)
        .min(1.0);
    let size = Size::new(natural.width * fit * zoom, natural.height * fit * zoom);
    Rectangle::new(
        Point::new(
            (bounds.width - size.width) / 2.0 + pan.x,
            (bounds.height - size.height) / 2.0 + pan.y,
        ),
        size,
    )
}

struct ImageCanvas<'a> {
    handle: &'a Handle,
    natural: Size,
    zoom: ImageZoom,
    pan: PanOffset,
    dragging: bool,
    pannable: bool,
}

impl canvas::Program<Message> for ImageCanvas<'_> {
    type State = keyboard::Modifiers;

    fn update(
        &self,
        modifiers: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            iced::Event::Keyboard(keyboard::Event::ModifiersChanged(new_modifiers)) => {
                *modifiers = *new_modifiers;
                None
            }
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if !modifiers.command() || !cursor.is_over(bounds) {
                    return None;
                }
                let y = match delta {
                    mouse::ScrollDelta::Lines { y, .. } | mouse::ScrollDelta::Pixels { y, .. } => *y,
                };
                Some(Action::publish(Message::Wheel(y)).and_capture())
            }
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) if self.pannable => {
                let position = cursor.position_over(bounds)?;
                Some(Action::publish(Message::DragStarted(position)).and_capture())
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { position }) if self.dragging => {
                Some(Action::publish(Message::DragMoved(*position)).and_capture())
            }
            iced::Event::Mouse(
                mouse::Event::ButtonReleased(mouse::Button::Left) | mouse::Event::CursorLeft,
            ) if self.dragging => Some(Action::publish(Message::DragEnded).and_capture()),
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
        let rect = image_rect(self.natural, bounds.size(), self.zoom.value(), self.pan);
        frame.draw_image(rect, canvas::Image::new(self.handle.clone()));
        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        _state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if self.dragging {
            mouse::Interaction::Grabbing
        } else if self.pannable && cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_abs_diff_eq;
    use std::path::PathBuf;

    fn state() -> State {
        State::new(&ImageSource {
            path: PathBuf::from("photo.png"),
            width: 400,
            height: 200,
        })
    }

    #[test]
    fn small_images_keep_natural_size() {
        let rect = image_rect(Size::new(100.0, 50.0), Size::new(800.0, 600.0), 1.0, PanOffset::ORIGIN);
        assert_abs_diff_eq!(rect.width, 100.0);
        assert_abs_diff_eq!(rect.x, 350.0);
        assert_abs_diff_eq!(rect.y, 275.0);
    }

    #[test]
    fn large_images_fit_then_scale() {
        let natural = Size::new(1600.0, 800.0);
        let bounds = Size::new(800.0, 600.0);
        let fitted = image_rect(natural, bounds, 1.0, PanOffset::ORIGIN);
        assert_abs_diff_eq!(fitted.width, 800.0);
        assert_abs_diff_eq!(fitted.height, 400.0);

        let zoomed = image_rect(natural, bounds, 2.0, PanOffset::new(10.0, -5.0));
        assert_abs_diff_eq!(zoomed.width, 1600.0);
        assert_abs_diff_eq!(zoomed.x, -390.0);
        assert_abs_diff_eq!(zoomed.y, -105.0);
    }

    #[test]
    fn buttons_and_wheel_use_their_steps() {
        let mut state = state();
        state.update(Message::ZoomIn);
        assert_abs_diff_eq!(state.zoom().value(), 1.25);
        state.update(Message::Wheel(-1.0));
        assert_abs_diff_eq!(state.zoom().value(), 1.05);
        state.update(Message::ResetZoom);
        assert_abs_diff_eq!(state.zoom().value(), 1.0);
    }

    #[test]
    fn drag_pans_only_when_zoomed() {
        let mut state = state();
        state.update(Message::DragStarted(Point::new(0.0, 0.0)));
        state.update(Message::DragMoved(Point::new(40.0, 40.0)));
        assert_eq!(state.pan(), PanOffset::ORIGIN);

        state.update(Message::ZoomIn);
        state.update(Message::DragStarted(Point::new(0.0, 0.0)));
        state.update(Message::DragMoved(Point::new(40.0, 20.0)));
        state.update(Message::DragEnded);
        assert_eq!(state.pan(), PanOffset::new(40.0, 20.0));

        state.update(Message::ZoomOut);
        assert_eq!(state.pan(), PanOffset::ORIGIN);
    }
}
