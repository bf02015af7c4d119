//! Accessibility support for Horizon Controls.
//!
//! - [`Accessible`] trait: implemented by controls to describe themselves
//! - [`AccessibleRole`] / [`AccessibleAction`]: roles and requestable actions
//! - [`AnnouncementChannel`]: where spoken announcements are delivered
//!
//! With the `accessibility` feature (on by default) controls can build
//! [AccessKit](https://accesskit.dev/) nodes for the platform accessibility
//! tree, and AccessKit action requests can be translated into
//! [`AccessibleAction`]s.

mod announcer;
mod node;
mod role;

pub use announcer::{AnnouncementChannel, AnnouncementRequest, UtteranceQueue};
pub use node::Accessible;
pub use role::{AccessibleAction, AccessibleRole};

#[cfg(feature = "accessibility")]
use crate::widget::WidgetId;

/// Convert a WidgetId to an AccessKit NodeId.
#[cfg(feature = "accessibility")]
pub(crate) fn widget_id_to_node_id(id: WidgetId) -> accesskit::NodeId {
    accesskit::NodeId(id.as_raw())
}
