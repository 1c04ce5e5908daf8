use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::sleep,
};

pub const MESSAGE_TTL: Duration = Duration::from_millis(1500);

/// Auto-expiring status line shown after a mutation.
///
/// Each `show` supersedes the previous message and its clear timer. Dropping
/// the owner aborts any pending timer.
pub struct TransientMessage {
    state: Arc<watch::Sender<Option<String>>>,
    ttl: Duration,
    timer: Option<JoinHandle<()>>,
}

impl Default for TransientMessage {
    fn default() -> Self {
        Self::new(MESSAGE_TTL)
    }
}

impl TransientMessage {
    pub fn new(ttl: Duration) -> Self {
        let (state, _) = watch::channel(None);

        Self {
            state: Arc::new(state),
            ttl,
            timer: None,
        }
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.cancel_timer();
        self.state.send_replace(Some(text.into()));

        let state = Arc::clone(&self.state);
        let ttl = self.ttl;
        self.timer = Some(tokio::spawn(async move {
            sleep(ttl).await;
            state.send_replace(None);
        }));
    }

    pub fn clear(&mut self) {
        self.cancel_timer();
        self.state.send_replace(None);
    }

    pub fn text(&self) -> Option<String> {
        self.state.borrow().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.state.borrow().is_some()
    }

    /// Receiver that observes every show/clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.state.subscribe()
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for TransientMessage {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
