use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

/// 可取消的延时投递：窗口内再次触发会作废上一次，只有最后一条消息送达
pub struct Debouncer {
    window: Duration,
    handle: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            handle: None,
        }
    }

    pub fn trigger<T: Send + 'static>(&mut self, tx: &UnboundedSender<T>, msg: T) {
        self.cancel();
        let tx = tx.clone();
        let window = self.window;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let _ = tx.send(msg);
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn only_the_last_trigger_is_delivered() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_millis(150));

        for width in [900u32, 700, 500] {
            debouncer.trigger(&tx, width);
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(500));
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_message() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = Debouncer::new(Duration::from_secs(1));

        debouncer.trigger(&tx, "render");
        assert!(debouncer.is_pending());
        debouncer.cancel();

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(rx.try_recv().is_err());
    }
}
