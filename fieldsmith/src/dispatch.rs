//! Outbound events for quick-action buttons.
//!
//! A [`QuickButtonDispatcher`] is an [`ActivationListener`]: when an element
//! carrying the quick-button class is activated it reads the button's
//! identifier and emits a `dispatch_event` on the [`EventChannel`]. Sends are
//! fire-and-forget.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::broadcast;
use tracing::debug;

use crate::builder::BUTTON_ID_DATA_KEY;
use crate::element::Element;

pub const DISPATCH_EVENT: &str = "dispatch_event";
pub const QUICKBUTTON_NAMESPACE: &str = "quickbutton";

/// A message sent to the remote party.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutboundEvent {
    pub event: String,
    pub payload: Value,
}

/// Payload of a `dispatch_event`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchPayload {
    pub id: String,
    pub namespace: String,
}

impl OutboundEvent {
    pub fn dispatch(id: &str, namespace: &str) -> Self {
        Self {
            event: DISPATCH_EVENT.to_string(),
            payload: json!({ "id": id, "namespace": namespace }),
        }
    }

    /// Decode the payload of a `dispatch_event`; `None` for any other event.
    pub fn dispatch_payload(&self) -> Option<DispatchPayload> {
        if self.event != DISPATCH_EVENT {
            return None;
        }
        serde_json::from_value(self.payload.clone()).ok()
    }
}

/// Where outbound events go. No acknowledgement is awaited.
pub trait EventChannel: Send + Sync {
    fn emit(&self, event: OutboundEvent);
}

/// In-process channel backed by `tokio::sync::broadcast`.
pub struct BroadcastChannel {
    sender: broadcast::Sender<OutboundEvent>,
}

impl BroadcastChannel {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<OutboundEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventChannel for BroadcastChannel {
    fn emit(&self, event: OutboundEvent) {
        if let Err(broadcast::error::SendError(event)) = self.sender.send(event) {
            debug!(event = %event.event, "no subscribers for outbound event");
        }
    }
}

/// Receives activations delivered by a surface.
pub trait ActivationListener: Send + Sync {
    fn on_activate(&self, element: &Element);
}

/// Forwards quick-button activations to an event channel.
pub struct QuickButtonDispatcher {
    channel: Arc<dyn EventChannel>,
    class: String,
}

impl QuickButtonDispatcher {
    pub fn new(channel: Arc<dyn EventChannel>, class: impl Into<String>) -> Self {
        Self {
            channel,
            class: class.into(),
        }
    }
}

impl ActivationListener for QuickButtonDispatcher {
    fn on_activate(&self, element: &Element) {
        if !element.has_class(&self.class) {
            return;
        }
        let Some(id) = element.data().get_str(BUTTON_ID_DATA_KEY) else {
            debug!("quick button activated without an identifier");
            return;
        };
        debug!(%id, "dispatching quick button");
        self.channel
            .emit(OutboundEvent::dispatch(id, QUICKBUTTON_NAMESPACE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<OutboundEvent>>);

    impl EventChannel for Recorder {
        fn emit(&self, event: OutboundEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    fn button(name: &str) -> Element {
        let mut el = Element::new("button").with_class("quickbutton");
        el.set_data(BUTTON_ID_DATA_KEY, name);
        el
    }

    #[test]
    fn dispatch_event_shape() {
        let event = OutboundEvent::dispatch("save", QUICKBUTTON_NAMESPACE);
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({"event": "dispatch_event", "payload": {"id": "save", "namespace": "quickbutton"}})
        );
        assert_eq!(
            event.dispatch_payload(),
            Some(DispatchPayload {
                id: "save".into(),
                namespace: "quickbutton".into()
            })
        );
    }

    #[test]
    fn dispatcher_forwards_marked_buttons_only() {
        let recorder = Arc::new(Recorder::default());
        let dispatcher = QuickButtonDispatcher::new(recorder.clone(), "quickbutton");

        dispatcher.on_activate(&button("save"));
        dispatcher.on_activate(&Element::new("button"));
        let mut unlabelled = Element::new("button").with_class("quickbutton");
        unlabelled.set_data("other", "x");
        dispatcher.on_activate(&unlabelled);

        let events = recorder.0.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].dispatch_payload().unwrap().id, "save");
    }

    #[tokio::test]
    async fn broadcast_channel_delivers_to_subscribers() {
        let channel = BroadcastChannel::default();
        let mut rx = channel.subscribe();
        channel.emit(OutboundEvent::dispatch("cancel", QUICKBUTTON_NAMESPACE));

        let event = rx.recv().await.unwrap();
        assert_eq!(event.dispatch_payload().unwrap().id, "cancel");
    }

    #[test_log::test]
    fn broadcast_channel_without_subscribers_is_silent() {
        let channel = BroadcastChannel::new(4);
        channel.emit(OutboundEvent::dispatch("save", QUICKBUTTON_NAMESPACE));
    }
}
