use spellout_types::DisplayIntent;
use tracing::debug;

/// Receiver of display intents, typically a presenter.
pub trait IntentHandler {
    fn handle_intent(&mut self, intent: &DisplayIntent);
}

/// Fan-out of display intents to every registered handler, in order.
pub struct IntentBus {
    handlers: Vec<Box<dyn IntentHandler>>,
}

impl IntentBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn IntentHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, intent: &DisplayIntent) {
        for handler in &mut self.handlers {
            handler.handle_intent(intent);
        }
    }

    pub fn publish_all(&mut self, intents: &[DisplayIntent]) {
        for intent in intents {
            self.publish(intent);
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for IntentBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs every intent at debug level.
pub struct TracingIntentLogger;

impl IntentHandler for TracingIntentLogger {
    fn handle_intent(&mut self, intent: &DisplayIntent) {
        debug!("Display intent {}: {:?}", intent.kind(), intent);
    }
}
