use std::{
    io,
    io::Write,
    sync::{
        Arc,
        Mutex,
        MutexGuard,
    },
};
use tracing::{
    dispatcher::DefaultGuard,
    Dispatch,
};
use tracing_subscriber::{
    fmt::MakeWriter,
    layer::SubscriberExt,
    registry,
    EnvFilter,
};

/// A fake writer that writes into a buffer (behind a mutex).
#[derive(Default, Debug, Clone)]
pub struct MockWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MockWriter {
    /// Create a new `MockWriter` that writes into the specified buffer (behind a mutex).
    pub fn new(buf: Arc<Mutex<Vec<u8>>>) -> Self {
        Self { buf }
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        self.buf()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }

    fn buf(&self) -> io::Result<MutexGuard<Vec<u8>>> {
        self.buf
            .lock()
            .map_err(|_| io::Error::from(io::ErrorKind::Other))
    }

    fn dispatch(&self) -> Dispatch {
        let fmt = tracing_subscriber::fmt::Layer::default()
            .with_writer(self.clone())
            .with_ansi(false)
            .with_level(true)
            .with_target(false);

        registry::Registry::default()
            .with(fmt)
            .with(EnvFilter::new("debug"))
            .into()
    }
}

impl io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf()?.flush()
    }
}

impl MakeWriter<'_> for MockWriter {
    type Writer = Self;

    fn make_writer(&self) -> Self::Writer {
        self.clone()
    }
}

/// Captures every event emitted on the current thread while it is alive.
///
/// Works inside `#[tokio::test]` with the default current thread runtime, where
/// a closure based capture cannot wrap an `.await`.
pub struct CapturedLogs {
    writer: MockWriter,
    _guard: DefaultGuard,
}

impl CapturedLogs {
    pub fn start() -> Self {
        let writer = MockWriter::default();
        let guard = tracing::dispatcher::set_default(&writer.dispatch());
        Self {
            writer,
            _guard: guard,
        }
    }

    pub fn contents(&self) -> String {
        self.writer.contents()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

/// Runs `f` with a buffer backed subscriber and returns its result together
/// with the captured log lines.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let writer = MockWriter::default();
    let result = tracing::dispatcher::with_default(&writer.dispatch(), f);
    (result, writer.contents())
}
