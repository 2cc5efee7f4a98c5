use super::IReminderNotifier;
use agenda_domain::{EventReminderNotification, ID};
use std::sync::Mutex;

/// Records every reminder instead of delivering it.
/// Delivery can be made to fail for given events.
pub struct InMemoryReminderNotifier {
    sent: Mutex<Vec<EventReminderNotification>>,
    failing_events: Mutex<Vec<ID>>,
}

impl InMemoryReminderNotifier {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing_events: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_for(&self, event_id: &ID) {
        self.failing_events.lock().unwrap().push(event_id.clone());
    }

    pub fn sent(&self) -> Vec<EventReminderNotification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for InMemoryReminderNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderNotifier for InMemoryReminderNotifier {
    async fn send(&self, notification: &EventReminderNotification) -> anyhow::Result<()> {
        let event_id = &notification.payload.event_id;
        if self.failing_events.lock().unwrap().contains(event_id) {
            return Err(anyhow::Error::msg(format!(
                "Mail delivery refused for event: {}",
                event_id
            )));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
