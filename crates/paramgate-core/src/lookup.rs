//! Submitted value lookup
//!
//! A form submission may carry several values per name (multi-select
//! fields). Conditions only inspect the first one.

use std::collections::{BTreeMap, HashMap};

/// Read-only view of the values submitted with one request
pub trait ValueLookup {
    /// All values submitted under `name`, in submission order.
    ///
    /// Returns an empty slice when the name was not submitted.
    fn values(&self, name: &str) -> &[String];

    /// First submitted value under `name`
    fn first(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }
}

impl<T: ValueLookup + ?Sized> ValueLookup for &T {
    fn values(&self, name: &str) -> &[String] {
        (**self).values(name)
    }
}

impl ValueLookup for HashMap<String, Vec<String>> {
    fn values(&self, name: &str) -> &[String] {
        self.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl ValueLookup for BTreeMap<String, Vec<String>> {
    fn values(&self, name: &str) -> &[String] {
        self.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Values of one form submission, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestValues {
    values: HashMap<String, Vec<String>>,
}

impl RequestValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `name`, keeping earlier values
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    /// Replace every value under `name` with a single value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), vec![value.into()]);
    }

    /// Builder-style [`RequestValues::append`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_empty())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValueLookup for RequestValues {
    fn values(&self, name: &str) -> &[String] {
        ValueLookup::values(&self.values, name)
    }
}

impl<N, V> FromIterator<(N, V)> for RequestValues
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut values = RequestValues::new();
        for (name, value) in iter {
            values.append(name, value);
        }
        values
    }
}

impl From<HashMap<String, Vec<String>>> for RequestValues {
    fn from(values: HashMap<String, Vec<String>>) -> Self {
        Self { values }
    }
}
