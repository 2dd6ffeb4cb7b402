// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Canvas gestures arrive through the canvas widget itself; only window-level
//! events that no widget sees are routed here.

use super::Message;
use iced::{event, time, window, Subscription};
use std::time::Duration;

/// Interval of the toast auto-dismiss tick.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Routes files dropped anywhere on the window.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, _status, _window_id| {
        if let event::Event::Window(iced::window::Event::FileDropped(path)) = event {
            return Some(Message::FileDropped(path));
        }
        None
    })
}

/// Ticks only while toasts are showing.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(TICK_INTERVAL).map(Message::Tick)
    } else {
        Subscription::none()
    }
}

/// Emits one message per window frame while the preview is stale.
pub fn create_redraw_subscription(preview_dirty: bool) -> Subscription<Message> {
    if preview_dirty {
        window::frames().map(Message::RedrawFrame)
    } else {
        Subscription::none()
    }
}
