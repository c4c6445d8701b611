//! Defines an abstraction over the event sending mechanism.

use super::events::UserEvent;

/// A trait that abstracts the sending of user events to the host shell.
/// This is "fire-and-forget" and doesn't return a result, simplifying its use.
///
/// The embedding host implements this for its own event loop handle; tests
/// implement it over a channel.
pub trait EventProxy: Send + Sync + Clone + 'static {
    fn send_event(&self, event: UserEvent);
}
