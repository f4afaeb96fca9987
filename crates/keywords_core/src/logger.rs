use log::{error, info, warn};

/// Sink for the messages a scan reports to whoever invoked it.
///
/// Internal progress goes through the `log` macros directly; this seam only
/// carries what the caller is expected to surface.
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLogger;

impl Logger for LogLogger {
    fn info(&self, message: &str) {
        info!("{}", message);
    }

    fn warn(&self, message: &str) {
        warn!("{}", message);
    }

    fn error(&self, message: &str) {
        error!("{}", message);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Logger;
    use log::Level;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct RecordingLogger {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl RecordingLogger {
        pub(crate) fn messages(&self, level: Level) -> Vec<String> {
            self.records
                .lock()
                .unwrap()
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, m)| m.clone())
                .collect()
        }

        fn push(&self, level: Level, message: &str) {
            self.records.lock().unwrap().push((level, message.to_string()));
        }
    }

    impl Logger for RecordingLogger {
        fn info(&self, message: &str) {
            self.push(Level::Info, message);
        }

        fn warn(&self, message: &str) {
            self.push(Level::Warn, message);
        }

        fn error(&self, message: &str) {
            self.push(Level::Error, message);
        }
    }
}
