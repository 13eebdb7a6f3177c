/// Single channel through which all Actions reach the event loop
use crate::actions::Action;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct Dispatcher {
    tx: mpsc::UnboundedSender<Action>,
}

impl Dispatcher {
    pub fn new() -> (Self, ActionReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, ActionReceiver { rx })
    }

    /// Queue an action for the next turn of the event loop
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.tx.send(action) {
            log::error!("Event loop is gone, dropping {:?}", e.0);
        }
    }

    /// Queue an action once `delay` has passed. Must be called inside a tokio runtime.
    pub fn dispatch_after(&self, delay: Duration, action: Action) {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            dispatcher.dispatch(action);
        });
    }
}

/// Receiving end, owned by the event loop
pub struct ActionReceiver {
    rx: mpsc::UnboundedReceiver<Action>,
}

impl ActionReceiver {
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    /// Next queued action without waiting
    pub fn try_recv(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dispatch_is_received_in_order() {
        let (dispatcher, mut rx) = Dispatcher::new();
        dispatcher.dispatch(Action::ToggleHelp);
        dispatcher.dispatch(Action::Quit);
        assert_eq!(rx.recv().await, Some(Action::ToggleHelp));
        assert_eq!(rx.recv().await, Some(Action::Quit));
        assert_eq!(rx.try_recv(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_after_waits() {
        let (dispatcher, mut rx) = Dispatcher::new();
        dispatcher.dispatch_after(Duration::from_millis(800), Action::NavigateBack);
        assert_eq!(rx.try_recv(), None);
        tokio::time::advance(Duration::from_millis(801)).await;
        assert_eq!(rx.recv().await, Some(Action::NavigateBack));
    }
}
