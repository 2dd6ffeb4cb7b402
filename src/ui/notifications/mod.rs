// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for user feedback.
//!
//! Notifications report decode failures, export results and configuration
//! problems without blocking interaction.
//!
//! - Success toasts last ~3s, warnings ~5s, errors stay until dismissed.
//! - At most three are visible; the rest are queued.
//! - Position: bottom-right corner.

mod manager;
mod notification;
mod toast;

pub use manager::{Manager, Message as NotificationMessage};
pub use notification::{Notification, Severity};
pub use toast::Toast;
