//! Human-readable rendering of records

use std::fmt::Write;

use super::engine::IdentityEngine;
use super::outcome::{DiagnosticSink, Outcome};
use crate::domain::common::Record;

impl IdentityEngine {
    /// `TypeName(field=value,...)` over key, required, then info fields
    ///
    /// A field that cannot be read keeps its slot; the failure is written in
    /// place of the value as `[Kind:message]`.
    pub fn render<T: Record>(&self, a: &T) -> Outcome<String> {
        let mut sink = DiagnosticSink::new(T::TYPE_NAME, "render");
        let metadata = self.metadata_or_empty::<T>(&mut sink);

        let mut buf = String::new();
        for field in metadata.rendered_fields() {
            if !buf.is_empty() {
                buf.push(',');
            }
            buf.push_str(field.name);
            buf.push('=');
            match a.read_field(field.name) {
                // Writing into a String cannot fail
                Ok(value) => {
                    let _ = write!(buf, "{}", value);
                }
                Err(err) => {
                    let _ = write!(buf, "[{}:{}]", err.kind_name(), err);
                    sink.field_access(err);
                }
            }
        }

        sink.finish(format!("{}({})", T::TYPE_NAME, buf))
    }
}
