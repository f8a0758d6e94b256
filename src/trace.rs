//! Feature-gated tracing macros.
//!
//! With the `tracing` feature the macros forward to `tracing`; without it
//! they expand to nothing (spans become a [`NoopSpan`] guard).

/// Opens an info-level span around a stage of the locate pipeline.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Records an info-level event with key/value fields.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

/// Records a debug-level event; used for per-scale chatter.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_debug;
pub(crate) use trace_event;
pub(crate) use trace_span;

/// Span stand-in used when tracing is compiled out.
///
/// Lets call sites write `let _guard = trace_span!(...).entered();`
/// unconditionally.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mirroring `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
