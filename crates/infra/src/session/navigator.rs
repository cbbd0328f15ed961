//! Navigator adapters
//!
//! The client never renders anything; it only announces that the user has
//! to be sent to another route. Hosts either subscribe to a channel or let
//! the event be logged.

use chainverdict_core::Navigator;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// A request to move the application to `path`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEvent {
    pub path: String,
}

/// Logs navigation requests and does nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, path: &str) {
        info!(path = %path, "Navigation requested");
    }
}

/// Broadcasts navigation requests to every subscriber
#[derive(Debug, Clone)]
pub struct ChannelNavigator {
    sender: broadcast::Sender<NavigationEvent>,
}

impl ChannelNavigator {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.sender.subscribe()
    }
}

impl Default for ChannelNavigator {
    fn default() -> Self {
        Self::new(16)
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, path: &str) {
        let event = NavigationEvent { path: path.to_string() };
        if self.sender.send(event).is_err() {
            debug!(path = %path, "Navigation requested with no subscribers");
        }
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNavigator {
    visits: parking_lot::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingNavigator {
    pub(crate) fn visits(&self) -> Vec<String> {
        self.visits.lock().clone()
    }
}

#[cfg(test)]
impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits.lock().push(path.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_events() {
        let navigator = ChannelNavigator::default();
        let mut events = navigator.subscribe();

        navigator.navigate("/login");

        assert_eq!(events.recv().await.unwrap(), NavigationEvent { path: "/login".into() });
    }

    #[test]
    fn sending_without_subscribers_is_harmless() {
        ChannelNavigator::new(0).navigate("/login");
    }
}
