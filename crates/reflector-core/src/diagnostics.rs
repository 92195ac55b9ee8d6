//! Diagnostic side channel.
//!
//! Accessors report unsupported properties through a [`DiagnosticSink`]
//! instead of logging directly, so their return values stay pure and tests
//! can observe or silence the messages.

/// Fire-and-forget diagnostic output. Must never affect control flow.
pub trait DiagnosticSink: Send + Sync {
    /// Record a trace-level message.
    fn trace(&self, message: &str);
}

/// Forwards diagnostics to `tracing` under the `reflector::mom` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn trace(&self, message: &str) {
        tracing::trace!(target: "reflector::mom", "{}", message);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn trace(&self, _message: &str) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn trace(&self, message: &str) {
        (**self).trace(message);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for std::sync::Arc<S> {
    fn trace(&self, message: &str) {
        (**self).trace(message);
    }
}
