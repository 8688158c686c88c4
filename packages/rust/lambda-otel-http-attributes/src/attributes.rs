//! The ordered attribute list produced by the extractor and the sink it is written to.

use opentelemetry::{KeyValue, Value};
use tracing::Span;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Something span attributes can be written to.
///
/// Implemented for [`tracing::Span`], which forwards to the OpenTelemetry span
/// behind it. Implementations must accept repeated keys.
pub trait AttributeSink {
    /// Set a single attribute.
    fn set_attribute(&self, key: &'static str, value: Value);
}

impl AttributeSink for Span {
    fn set_attribute(&self, key: &'static str, value: Value) {
        OpenTelemetrySpanExt::set_attribute(self, key, value);
    }
}

/// Ordered list of HTTP span attributes.
///
/// Entries keep the order in which they were discovered. A fact can appear
/// under more than one name (for example `http.scheme` and `url.scheme`), and
/// an entry can carry no value: `server.port` is always listed, even when the
/// port is unknown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpAttributes {
    entries: Vec<(&'static str, Option<Value>)>,
}

impl HttpAttributes {
    /// Append an entry, with or without a value.
    pub(crate) fn push(&mut self, key: &'static str, value: Option<Value>) {
        self.entries.push((key, value));
    }

    /// Append `value` under every name in `keys`, or nothing when `value` is `None`.
    pub(crate) fn push_present<V: Into<Value>>(&mut self, keys: &[&'static str], value: Option<V>) {
        if let Some(value) = value {
            let value = value.into();
            for key in keys {
                self.push(*key, Some(value.clone()));
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in order. The value is `None` for entries without one.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Value>)> + '_ {
        self.entries.iter().map(|(key, value)| (*key, value.as_ref()))
    }

    /// Names of all entries, in order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// First value recorded under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value.as_ref())
    }

    /// Whether `key` was listed, with or without a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(name, _)| *name == key)
    }

    /// Entries that carry a value, as OpenTelemetry key-values.
    pub fn to_key_values(&self) -> Vec<KeyValue> {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|value| KeyValue::new(*key, value.clone()))
            })
            .collect()
    }

    /// Write every entry that carries a value to `sink`.
    pub fn record_on<S: AttributeSink + ?Sized>(&self, sink: &S) {
        for (key, value) in &self.entries {
            if let Some(value) = value {
                sink.set_attribute(*key, value.clone());
            }
        }
    }
}

impl IntoIterator for HttpAttributes {
    type Item = (&'static str, Option<Value>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
