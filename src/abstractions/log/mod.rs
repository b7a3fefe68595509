/*!

# Overview

Threshold logging on top of `tracing`. A log message is emitted at a _level_ (what kind of message it is) and at a
numeric _threshold_ (how verbose it is). A message is emitted only if its threshold is at most the global logging
threshold, so higher thresholds are chattier.

```
use keyed_shim::log::*;

// Only messages logged at threshold 1 or below are emitted from here on.
set_global_logging_threshold(1);

critical!(3, "Never seen at threshold 1.");
info!(1, "Binding resolved.");             // Emitted
debug!("Threshold omitted means 0.");      // Emitted
```

## Levels

Critical, Error, Warning, Info, Debug, Trace. Critical messages are `ERROR` level events carrying a `critical` flag,
which the formatter renders as a `[CRITICAL]` prefix.

## Threshold

The global threshold is an atomic `u8`, so changing it is safe from any thread. The threshold field itself is never
printed. The subscriber is installed on first use by any of the macros; nothing has to be initialized explicitly.

Collections log sparingly: the capability registry reports each binding at threshold 1, the weak map shim reports
token generation at threshold 4, and rejected keys are warnings at threshold 2.

*/
mod formatter;
mod threshold_filter;
mod macros;

use std::sync::atomic::{AtomicU8, Ordering};

use once_cell::sync::Lazy;
use tracing_subscriber::{
  fmt,
  layer::SubscriberExt,
  Registry
};

use threshold_filter::ThresholdFilterLayer;
use formatter::ThresholdFieldFormatter;
pub use macros::*;

// The macros expand to `tracing` events; re-exported so client crates need not depend on `tracing` themselves.
#[doc(hidden)]
pub use tracing;

/// The threshold in effect until someone calls `set_global_logging_threshold`.
pub const DEFAULT_LOGGING_THRESHOLD: u8 = 2;

static GLOBAL_LOGGING_THRESHOLD: AtomicU8 = AtomicU8::new(DEFAULT_LOGGING_THRESHOLD);

static INIT_LOGGER: Lazy<()> = Lazy::new(|| {
  let subscriber = Registry::default()
      .with(ThresholdFilterLayer)
      .with(
        fmt::layer()
            .fmt_fields(ThresholdFieldFormatter)
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr),
      );

  // A host application that installed its own subscriber first keeps it.
  let _ = tracing::subscriber::set_global_default(subscriber);
});

/// Installs the subscriber if it has not been installed. The macros call this; client code never needs to.
pub fn init_logger() {
  Lazy::force(&INIT_LOGGER);
}

pub fn set_global_logging_threshold(new_threshold: u8) {
  GLOBAL_LOGGING_THRESHOLD.store(new_threshold, Ordering::SeqCst);
}

pub fn get_global_logging_threshold() -> u8 {
  GLOBAL_LOGGING_THRESHOLD.load(Ordering::SeqCst)
}
