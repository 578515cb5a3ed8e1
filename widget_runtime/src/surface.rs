use std::sync::Arc;

use tokio::sync::watch;

/// Render target a poll loop writes into. Each write replaces the previous
/// markup entirely.
pub trait OutputSurface: Send + Sync + 'static {
    fn write(&self, markup: String);
}

impl<T: OutputSurface + ?Sized> OutputSurface for Arc<T> {
    fn write(&self, markup: String) {
        (**self).write(markup);
    }
}

/// Surface holding only the latest markup, observable through
/// [`watch::Receiver`]s.
#[derive(Debug)]
pub struct WatchSurface {
    sender: watch::Sender<String>,
}

impl WatchSurface {
    #[must_use]
    pub fn new(initial: String) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    #[must_use]
    pub fn current(&self) -> String {
        self.sender.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.sender.subscribe()
    }
}

impl OutputSurface for WatchSurface {
    fn write(&self, markup: String) {
        self.sender.send_replace(markup);
    }
}
