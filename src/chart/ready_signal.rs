use crate::chart::errors::WidgetConstructionError;
use std::fmt::Display;
use tokio::sync::oneshot;

pub type ReadyResult = Result<(), WidgetConstructionError>;

/// Handed to the charting library at construction. Consuming `ready`/`fail`
/// makes the notification fire at most once.
#[derive(Debug)]
pub struct ReadyNotifier {
    tx: oneshot::Sender<ReadyResult>,
}

#[derive(Debug)]
pub struct ReadyListener {
    rx: oneshot::Receiver<ReadyResult>,
}

pub fn ready_channel() -> (ReadyNotifier, ReadyListener) {
    let (tx, rx) = oneshot::channel();
    (ReadyNotifier { tx }, ReadyListener { rx })
}

impl ReadyNotifier {
    pub fn ready(self) {
        // The listener is gone if the session was disposed meanwhile.
        let _ = self.tx.send(Ok(()));
    }

    pub fn fail(self, reason: impl Display) {
        let _ = self
            .tx
            .send(Err(WidgetConstructionError(reason.to_string())));
    }
}

impl ReadyListener {
    /// Resolves once the widget signals readiness. A notifier dropped without
    /// firing counts as a construction failure.
    pub async fn wait(self) -> ReadyResult {
        match self.rx.await {
            Ok(result) => result,
            Err(_) => Err(WidgetConstructionError(
                "widget was dropped before it signalled readiness".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_resolves_ok() {
        let (notifier, listener) = ready_channel();
        notifier.ready();

        assert_eq!(listener.wait().await, Ok(()));
    }

    #[tokio::test]
    async fn failure_carries_reason() {
        let (notifier, listener) = ready_channel();
        notifier.fail("chart pane missing");

        let err = listener.wait().await.unwrap_err();
        assert_eq!(err.0, "chart pane missing");
    }

    #[tokio::test]
    async fn dropped_notifier_is_an_error() {
        let (notifier, listener) = ready_channel();
        drop(notifier);

        assert!(listener.wait().await.is_err());
    }
}
