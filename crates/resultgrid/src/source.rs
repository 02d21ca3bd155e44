//! Result sources: where field names and rows come from.

use std::collections::VecDeque;

use crate::error::{Result, SourceError};
use crate::value::{TypedValue, Value};

/// A row produced by a [`ResultSource`].
pub trait ResultRow {
    type Value: TypedValue;

    /// Returns the value of field `index`, or `None` if the row has no such
    /// field. Renderers treat a missing field as null.
    fn field(&self, index: usize) -> Option<&Self::Value>;
}

/// A stream of result rows with named fields.
///
/// Failure is reported out of band through [`ResultSource::failure`], which
/// renderers check before fetching the first row and after the last one.
pub trait ResultSource {
    type Row: ResultRow;

    fn field_count(&self) -> usize;

    fn field_name(&self, index: usize) -> Option<&str>;

    /// Fetches the next row, or `None` at end of stream (or on failure).
    fn next_row(&mut self) -> Option<Self::Row>;

    /// Returns the failure state of the stream, if it has failed.
    fn failure(&self) -> Option<SourceError>;
}

/// Returns the source's failure state as an error.
pub(crate) fn check_source<S: ResultSource + ?Sized>(source: &S) -> Result<()> {
    match source.failure() {
        Some(error) => {
            tracing::warn!(%error, "result source reported failure");
            Err(error.into())
        }
        None => Ok(()),
    }
}

impl ResultRow for Vec<Value> {
    type Value = Value;

    fn field(&self, index: usize) -> Option<&Value> {
        self.get(index)
    }
}

/// When an injected failure becomes visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FailAt {
    Start,
    End,
}

/// An in-memory result source over owned rows.
///
/// ```rust
/// use resultgrid::{MemoryResults, Value};
///
/// let results = MemoryResults::new(["name", "age"])
///     .row(vec![Value::from("Ada"), Value::from(36)])
///     .row(vec![Value::from("Grace"), Value::Null]);
/// assert_eq!(results.len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryResults {
    fields: Vec<String>,
    rows: VecDeque<Vec<Value>>,
    failure: Option<(SourceError, FailAt)>,
}

impl MemoryResults {
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(fields: I) -> Self {
        MemoryResults {
            fields: fields.into_iter().map(Into::into).collect(),
            rows: VecDeque::new(),
            failure: None,
        }
    }

    /// Appends a row.
    pub fn row<V: Into<Value>, I: IntoIterator<Item = V>>(mut self, values: I) -> Self {
        self.rows.push_back(values.into_iter().map(Into::into).collect());
        self
    }

    /// Builds a source from a JSON array of objects, taking field names
    /// from the keys of the first object.
    pub fn from_json_records(records: &serde_json::Value) -> Self {
        let items = records.as_array().map(Vec::as_slice).unwrap_or_default();
        let fields: Vec<String> = items
            .first()
            .and_then(|first| first.as_object())
            .map(|object| object.keys().cloned().collect())
            .unwrap_or_default();

        let mut results = MemoryResults::new(fields.clone());
        for item in items {
            let row: Vec<Value> = fields
                .iter()
                .map(|field| item.get(field).cloned().map(Value::from).unwrap_or_default())
                .collect();
            results.rows.push_back(row);
        }
        results
    }

    /// Makes the source report `error` before any row is fetched.
    pub fn fail_on_start(mut self, error: SourceError) -> Self {
        self.failure = Some((error, FailAt::Start));
        self
    }

    /// Makes the source report `error` once all rows have been fetched.
    pub fn fail_on_end(mut self, error: SourceError) -> Self {
        self.failure = Some((error, FailAt::End));
        self
    }

    /// Number of rows not yet fetched.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ResultSource for MemoryResults {
    type Row = Vec<Value>;

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field_name(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    fn next_row(&mut self) -> Option<Vec<Value>> {
        if matches!(self.failure, Some((_, FailAt::Start))) {
            return None;
        }
        self.rows.pop_front()
    }

    fn failure(&self) -> Option<SourceError> {
        match &self.failure {
            Some((error, FailAt::Start)) => Some(error.clone()),
            Some((error, FailAt::End)) if self.rows.is_empty() => Some(error.clone()),
            _ => None,
        }
    }
}
