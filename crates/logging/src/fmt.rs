//! Flatten `tracing` events into plain records.
//!
//! The `message` field becomes the text of the record; any other field is
//! appended as `name=value`.

use std::fmt::{Debug, Write};

use tracing::{
    Event, Level,
    field::{Field, Visit},
};

/// A flattened event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLog {
    /// Level of the event.
    pub level: Level,
    /// Target, usually the module path.
    pub target: String,
    /// Message followed by the remaining fields.
    pub message: String,
}

/// Collects the message and the extra fields of one event.
#[derive(Default)]
struct FieldCollector {
    /// Text of the `message` field.
    message: String,
    /// `name=value` pairs, space separated.
    extra: String,
}

impl FieldCollector {
    /// Append `name=value` to the extra fields.
    fn push_extra(&mut self, name: &str, value: &dyn Debug) {
        if !self.extra.is_empty() {
            self.extra.push(' ');
        }
        let _ignored = write!(self.extra, "{name}={value:?}");
    }

    /// Message and extra fields joined by a space.
    fn finish(self) -> String {
        match (self.message.is_empty(), self.extra.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.extra,
            (false, false) => format!("{} {}", self.message, self.extra),
        }
    }
}

impl Visit for FieldCollector {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_extra(field.name(), &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.push_extra(field.name(), value);
        }
    }
}

/// Flatten `event` into a [`RenderedLog`].
pub fn render_event(event: &Event<'_>) -> RenderedLog {
    let mut fields = FieldCollector::default();
    event.record(&mut fields);
    let meta = event.metadata();
    RenderedLog {
        level: *meta.level(),
        target: meta.target().to_string(),
        message: fields.finish(),
    }
}
