//! Routing parameters forwarded to the isochrone endpoint.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Parameter key naming the OTP router.
pub const ROUTER_ID_KEY: &str = "routerId";

/// Router used when the parameters name none.
pub const DEFAULT_ROUTER_ID: &str = "default";

const FROM_PLACE_KEY: &str = "fromPlace";
const MODE_KEY: &str = "mode";
const DATE_KEY: &str = "date";
const TIME_KEY: &str = "time";

/// A primitive query-string value.
///
/// # Examples
/// ```
/// use isochrone_core::ParamValue;
///
/// assert_eq!(ParamValue::from(2.5).to_string(), "2.5");
/// assert_eq!(ParamValue::from("WALK").to_string(), "WALK");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// A boolean flag such as `arriveBy`.
    Bool(bool),
    /// A whole number such as `maxTransfers`.
    Integer(i64),
    /// A decimal number such as `walkSpeed`.
    Float(f64),
    /// Free text such as `mode` or `fromPlace`.
    Text(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Routing inputs for one isochrone query.
///
/// Keys are kept sorted so the serialised query string is deterministic.
/// Values are forwarded verbatim; nothing here checks that OTP understands
/// them.
///
/// # Examples
/// ```
/// use isochrone_core::QueryParameters;
///
/// let params = QueryParameters::new()
///     .with_router("portland")
///     .with_origin(45.5, -122.6)
///     .with("walkSpeed", 1.2);
/// assert_eq!(params.router_id(), "portland");
/// assert_eq!(
///     params.to_query_string(),
///     "fromPlace=45.5%2C-122.6&routerId=portland&walkSpeed=1.2"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryParameters(BTreeMap<String, ParamValue>);

impl QueryParameters {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a parameter, returning the updated set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Name the router that should answer the query.
    #[must_use]
    pub fn with_router(self, router_id: impl Into<String>) -> Self {
        self.with(ROUTER_ID_KEY, router_id.into())
    }

    /// Set the origin as a `lat,lon` pair.
    #[must_use]
    pub fn with_origin(self, lat: f64, lon: f64) -> Self {
        self.with(FROM_PLACE_KEY, format!("{lat},{lon}"))
    }

    /// Set the travel modes, e.g. `"WALK,TRANSIT"`.
    #[must_use]
    pub fn with_mode(self, mode: impl Into<String>) -> Self {
        self.with(MODE_KEY, mode.into())
    }

    /// Set the departure date in the format OTP expects (`MM-DD-YYYY`).
    #[must_use]
    pub fn with_date(self, date: impl Into<String>) -> Self {
        self.with(DATE_KEY, date.into())
    }

    /// Set the departure time in the format OTP expects (e.g. `8:00am`).
    #[must_use]
    pub fn with_time(self, time: impl Into<String>) -> Self {
        self.with(TIME_KEY, time.into())
    }

    /// Add or replace a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a parameter by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Router identifier, falling back to [`DEFAULT_ROUTER_ID`] when the
    /// parameter is absent or empty.
    #[must_use]
    pub fn router_id(&self) -> Cow<'_, str> {
        match self.get(ROUTER_ID_KEY) {
            Some(ParamValue::Text(id)) if !id.is_empty() => Cow::Borrowed(id.as_str()),
            Some(ParamValue::Text(_)) | None => Cow::Borrowed(DEFAULT_ROUTER_ID),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    /// Serialise every parameter, `routerId` included, as
    /// `application/x-www-form-urlencoded` pairs.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for QueryParameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn router_defaults_when_absent() {
        let params = QueryParameters::new().with_mode("WALK");
        assert_eq!(params.router_id(), DEFAULT_ROUTER_ID);
    }

    #[rstest]
    fn router_defaults_when_empty() {
        let params = QueryParameters::new().with_router("");
        assert_eq!(params.router_id(), DEFAULT_ROUTER_ID);
    }

    #[rstest]
    fn numeric_router_is_rendered() {
        let params = QueryParameters::new().with(ROUTER_ID_KEY, 7);
        assert_eq!(params.router_id(), "7");
    }

    #[rstest]
    #[case(ParamValue::from(true), "true")]
    #[case(ParamValue::from(42), "42")]
    #[case(ParamValue::from(2.0), "2")]
    #[case(ParamValue::from(1.25), "1.25")]
    #[case(ParamValue::from("WALK,TRANSIT"), "WALK,TRANSIT")]
    fn values_render_like_query_values(#[case] value: ParamValue, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn query_string_is_form_encoded_and_sorted() {
        let params = QueryParameters::new()
            .with_time("8:00 am")
            .with_mode("WALK,TRANSIT")
            .with("arriveBy", false);

        assert_eq!(
            params.to_query_string(),
            "arriveBy=false&mode=WALK%2CTRANSIT&time=8%3A00+am"
        );
    }

    #[rstest]
    fn empty_parameters_serialise_to_empty_string() {
        assert_eq!(QueryParameters::new().to_query_string(), "");
    }

    #[rstest]
    fn later_values_replace_earlier_ones() {
        let mut params: QueryParameters = [("mode", "WALK")].into_iter().collect();
        params.extend([("mode", "BICYCLE")]);

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("mode"), Some(&ParamValue::from("BICYCLE")));
    }

    #[rstest]
    fn deserialises_from_json_object() {
        let params: QueryParameters = serde_json::from_str(
            r#"{"routerId": "abc", "maxTransfers": 2, "walkSpeed": 1.5, "wheelchair": true}"#,
        )
        .expect("parameters should deserialise");

        assert_eq!(params.router_id(), "abc");
        assert_eq!(params.get("maxTransfers"), Some(&ParamValue::Integer(2)));
        assert_eq!(params.get("walkSpeed"), Some(&ParamValue::Float(1.5)));
        assert_eq!(params.get("wheelchair"), Some(&ParamValue::Bool(true)));
    }
}
