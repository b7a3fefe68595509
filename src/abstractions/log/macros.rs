//! Macros for generating log messages. Each level macro accepts an optional leading threshold literal, which must be
//! followed by the format string literal.

/// Shared expansion of the level macros. Not part of the public interface.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_event {
    ($level:expr, critical, $threshold:expr, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            $crate::log::tracing::event!(
                $level,
                critical = true,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
    ($level:expr, plain, $threshold:expr, $($arg:tt)+) => {
        {
            $crate::log::init_logger();
            $crate::log::tracing::event!(
                $level,
                threshold = $threshold,
                message = format_args!($($arg)+)
            );
        }
    };
}

#[macro_export]
macro_rules! critical {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        $crate::__log_event!($crate::log::tracing::Level::ERROR, critical, $threshold, $fmt $($arg)*)
    };
    ($($arg:tt)+) => {
        $crate::__log_event!($crate::log::tracing::Level::ERROR, critical, 0, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        $crate::__log_event!($crate::log::tracing::Level::ERROR, plain, $threshold, $fmt $($arg)*)
    };
    ($($arg:tt)+) => {
        $crate::__log_event!($crate::log::tracing::Level::ERROR, plain, 0, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        $crate::__log_event!($crate::log::tracing::Level::WARN, plain, $threshold, $fmt $($arg)*)
    };
    ($($arg:tt)+) => {
        $crate::__log_event!($crate::log::tracing::Level::WARN, plain, 0, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        $crate::__log_event!($crate::log::tracing::Level::INFO, plain, $threshold, $fmt $($arg)*)
    };
    ($($arg:tt)+) => {
        $crate::__log_event!($crate::log::tracing::Level::INFO, plain, 0, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        $crate::__log_event!($crate::log::tracing::Level::DEBUG, plain, $threshold, $fmt $($arg)*)
    };
    ($($arg:tt)+) => {
        $crate::__log_event!($crate::log::tracing::Level::DEBUG, plain, 0, $($arg)+)
    };
}

#[macro_export]
macro_rules! trace {
    ($threshold:literal, $fmt:literal $($arg:tt)*) => {
        $crate::__log_event!($crate::log::tracing::Level::TRACE, plain, $threshold, $fmt $($arg)*)
    };
    ($($arg:tt)+) => {
        $crate::__log_event!($crate::log::tracing::Level::TRACE, plain, 0, $($arg)+)
    };
}


// The following makes the macros importable directly from the `log` module.
pub use {critical, error, warning, info, debug, trace};
