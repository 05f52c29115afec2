use crate::domains::logger::DomainLogger;
use std::sync::Arc;
use tokio::sync::mpsc;

enum Level {
    Info,
    Warn,
    Error,
}

struct LogMessage {
    level: Level,
    msg: String,
}

/// Non-blocking logger: messages go through a bounded channel and are written
/// to `bridge` by a background task, so a slow sink never delays a tick.
/// Messages are dropped when the channel is full. Must be called inside a tokio runtime.
pub fn init_buffered_logger(bridge: Arc<dyn DomainLogger>, capacity: usize) -> Arc<dyn DomainLogger> {
    let (tx, mut rx) = mpsc::channel::<LogMessage>(capacity);

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg.level {
                Level::Info => bridge.info(&msg.msg),
                Level::Warn => bridge.warn(&msg.msg),
                Level::Error => bridge.error(&msg.msg),
            }
        }
    });

    struct BufferedLogger {
        sender: mpsc::Sender<LogMessage>,
    }

    impl BufferedLogger {
        fn send(&self, level: Level, msg: &str) {
            let _ = self.sender.try_send(LogMessage { level, msg: msg.to_string() });
        }
    }

    impl DomainLogger for BufferedLogger {
        fn info(&self, msg: &str) {
            self.send(Level::Info, msg);
        }

        fn warn(&self, msg: &str) {
            self.send(Level::Warn, msg);
        }

        fn error(&self, msg: &str) {
            self.send(Level::Error, msg);
        }
    }

    Arc::new(BufferedLogger { sender: tx })
}
