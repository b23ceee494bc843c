use crate::{DebugSink, SinkWriter};
use core::fmt::Write;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend writing to a [`DebugSink`].
pub struct DebugLogger<S: ?Sized + 'static> {
    max_level: LevelFilter,
    sink: &'static S,
}

impl<S: DebugSink + Sync + ?Sized + 'static> DebugLogger<S> {
    #[must_use]
    pub const fn new(max_level: LevelFilter, sink: &'static S) -> Self {
        Self { max_level, sink }
    }

    /// Install as the global logger. Call this once during early init.
    ///
    /// # Errors
    /// Returns [`SetLoggerError`] if a logger was already installed.
    pub fn init(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.max_level);
        Ok(())
    }

    #[must_use]
    pub const fn max_level(&self) -> LevelFilter {
        self.max_level
    }
}

impl<S: DebugSink + Sync + ?Sized + 'static> Log for DebugLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Format: "[LEVEL] target: message\n"
        let _ = writeln!(
            SinkWriter::new(self.sink),
            "[{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        // unbuffered
    }
}
