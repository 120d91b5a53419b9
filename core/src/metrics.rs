//! Counters for heap block traffic.
//!
//! The macros forward to the `metrics` crate when the `metrics` feature is enabled and expand to
//! nothing otherwise, so that the refcount hot path doesn't pay for them by default.

#[cfg(feature = "metrics")]
macro_rules! increment {
    ( $counter:expr ) => {
        $crate::metrics::increment!($counter, 1)
    };
    ( $counter:expr, $count:expr ) => {
        ::metrics::counter!($counter).increment($count)
    };
}

#[cfg(not(feature = "metrics"))]
macro_rules! increment {
    ( $( $args:expr ),+ ) => {};
}

/// Adjusts a gauge by a signed delta.
#[cfg(feature = "metrics")]
macro_rules! adjust {
    ( $gauge:expr, $delta:expr ) => {
        ::metrics::gauge!($gauge).increment(($delta) as f64)
    };
}

#[cfg(not(feature = "metrics"))]
macro_rules! adjust {
    ( $( $args:expr ),+ ) => {};
}

pub(crate) use adjust;
pub(crate) use increment;
