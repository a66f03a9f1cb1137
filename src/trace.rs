//! Feature-gated tracing macros.
//!
//! With the `tracing` feature enabled these forward to the `tracing` crate;
//! without it they expand to nothing, so the pixel loops carry no logging cost.
//! Both macros take a static name followed by `key = value` fields.

/// Opens an info-level span around a whole-buffer operation.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:literal $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info_span!($name $(, $key = $value)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:literal $(, $key:ident = $value:expr)* $(,)?) => {{
        let _ = ($($value,)*);
        $crate::trace::NoopSpan
    }};
}

/// Emits an info-level event; every call site carries at least one field.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:literal, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:literal, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Guard returned by `trace_span!` when tracing is compiled out.
#[cfg(not(feature = "tracing"))]
pub(crate) struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    #[inline]
    pub(crate) fn entered(self) -> Self {
        self
    }
}
