/*!

Field formatting for log events. The `threshold` field is bookkeeping for the filter and is never printed; the
`critical` flag becomes a `[CRITICAL]` prefix; the message is printed bare; any other field is printed as `name=value`.

*/

use std::fmt::Debug;

use tracing::field::{Field, Visit};
use tracing_subscriber::{
  field::RecordFields,
  fmt::{
    format::Writer,
    FormatFields
  }
};

pub(crate) struct ThresholdFieldFormatter;

impl<'writer> FormatFields<'writer> for ThresholdFieldFormatter {
  fn format_fields<R: RecordFields>(
    &self,
    writer: Writer<'writer>,
    fields: R,
  ) -> std::fmt::Result {
    let mut visitor = FieldWriter { writer, result: Ok(()) };
    fields.record(&mut visitor);
    visitor.result
  }
}

struct FieldWriter<'writer> {
  writer: Writer<'writer>,
  result: std::fmt::Result,
}

impl<'writer> FieldWriter<'writer> {
  fn write_named(&mut self, field: &Field, value: &dyn Debug) {
    if self.result.is_ok() {
      self.result = write!(self.writer, "{}={:?} ", field.name(), value);
    }
  }
}

impl<'writer> Visit for FieldWriter<'writer> {
  fn record_i64(&mut self, field: &Field, value: i64) {
    if field.name() != "threshold" {
      self.write_named(field, &value);
    }
  }

  fn record_u64(&mut self, field: &Field, value: u64) {
    if field.name() != "threshold" {
      self.write_named(field, &value);
    }
  }

  fn record_bool(&mut self, field: &Field, value: bool) {
    match (field.name(), value) {
      ("critical", true)  => {
        if self.result.is_ok() {
          self.result = write!(self.writer, "[CRITICAL] ");
        }
      }
      ("critical", false) => {}
      _                   => self.write_named(field, &value),
    }
  }

  fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
    match field.name() {

      "message" => {
        if self.result.is_ok() {
          self.result = write!(self.writer, "{:?}", value);
        }
      }

      "threshold" | "critical" => {
        // Handled by the typed visitors above.
      }

      _ => self.write_named(field, value),

    }
  }
}
