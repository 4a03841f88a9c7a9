//! GeoJSON isochrone features and their index by cutoff time.
//!
//! OTP serialises the cutoff of each isochrone into the feature properties,
//! but depending on the JSON library on the server the key is either `Time`
//! or `time`. [`IsochroneFeature::cutoff`] accepts both, preferring `Time`.

use std::collections::BTreeMap;

use geojson::{FeatureCollection, Geometry, JsonObject, feature::Id};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FeatureError;

/// Preferred property key holding the cutoff time.
pub const TIME_PROPERTY: &str = "Time";

/// Fallback property key holding the cutoff time.
pub const TIME_PROPERTY_LOWERCASE: &str = "time";

/// One isochrone polygon as returned by the service.
///
/// # Examples
/// ```
/// use isochrone_core::IsochroneFeature;
///
/// let feature: IsochroneFeature = serde_json::from_str(
///     r#"{"type": "Feature", "geometry": null, "properties": {"time": 600}}"#,
/// )?;
/// assert_eq!(feature.cutoff(), Some(600));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsochroneFeature {
    /// Optional feature identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Isochrone boundary, usually a `MultiPolygon`.
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Properties bag; carries the cutoff under `Time` or `time`.
    #[serde(default)]
    pub properties: JsonObject,
}

impl IsochroneFeature {
    /// Cutoff time in seconds, if the properties carry a usable one.
    #[must_use]
    pub fn cutoff(&self) -> Option<u32> {
        self.time_value().and_then(whole_seconds)
    }

    /// Raw time property, preferring `Time` over `time`.
    ///
    /// A `null` value counts as absent.
    #[must_use]
    pub fn time_value(&self) -> Option<&Value> {
        [TIME_PROPERTY, TIME_PROPERTY_LOWERCASE]
            .into_iter()
            .find_map(|key| self.properties.get(key).filter(|value| !value.is_null()))
    }

    /// Convert into a standard GeoJSON feature for rendering layers.
    #[must_use]
    pub fn to_geojson(&self) -> geojson::Feature {
        let id = match &self.id {
            Some(Value::String(id)) => Some(Id::String(id.clone())),
            Some(Value::Number(id)) => Some(Id::Number(id.clone())),
            _ => None,
        };
        geojson::Feature {
            bbox: None,
            geometry: self.geometry.clone(),
            id,
            properties: Some(self.properties.clone()),
            foreign_members: None,
        }
    }

    fn parse_cutoff(&self, position: usize) -> Result<u32, FeatureError> {
        let value = self
            .time_value()
            .ok_or(FeatureError::MissingTime { position })?;
        whole_seconds(value).ok_or_else(|| FeatureError::InvalidTime {
            position,
            value: value.to_string(),
        })
    }
}

/// Accept non-negative whole numbers, including integral floats such as
/// `600.0` and numeric strings such as `"600"` that some serialisers emit.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "the float is checked to be a whole number within u32 range"
)]
fn whole_seconds(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => match number.as_u64() {
            Some(seconds) => u32::try_from(seconds).ok(),
            None => number
                .as_f64()
                .filter(|seconds| {
                    seconds.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(seconds)
                })
                .map(|seconds| seconds as u32),
        },
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Body returned by the isochrone endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IsochroneResponse {
    /// One feature per cutoff the server computed.
    pub features: Vec<IsochroneFeature>,
}

/// Features keyed by cutoff time in seconds.
///
/// Lookups are exact: there is no nearest-cutoff matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureIndex(BTreeMap<u32, IsochroneFeature>);

impl FeatureIndex {
    /// Index every feature of `response` by its cutoff time.
    ///
    /// When two features share a cutoff the later one wins.
    ///
    /// # Errors
    ///
    /// Fails on the first feature without a usable time property; no
    /// partial index is returned.
    pub fn from_response(response: IsochroneResponse) -> Result<Self, FeatureError> {
        let mut index = BTreeMap::new();
        for (position, feature) in response.features.into_iter().enumerate() {
            let seconds = feature.parse_cutoff(position)?;
            if index.insert(seconds, feature).is_some() {
                warn!("isochrone response repeats cutoff {seconds}s; keeping feature {position}");
            }
        }
        Ok(Self(index))
    }

    /// Feature for exactly `seconds`, if one was indexed.
    #[must_use]
    pub fn get(&self, seconds: u32) -> Option<&IsochroneFeature> {
        self.0.get(&seconds)
    }

    /// Number of indexed features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indexed cutoff times in ascending order.
    pub fn cutoffs(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    /// Iterate over `(cutoff, feature)` pairs in ascending cutoff order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &IsochroneFeature)> {
        self.0.iter().map(|(seconds, feature)| (*seconds, feature))
    }

    /// Collect the indexed features, smallest cutoff first, into a GeoJSON
    /// feature collection.
    #[must_use]
    pub fn to_feature_collection(&self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.0.values().map(IsochroneFeature::to_geojson).collect(),
            foreign_members: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    fn feature(properties: Value) -> Value {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
            },
            "properties": properties
        })
    }

    fn parse(body: Value) -> IsochroneResponse {
        serde_json::from_value(body).expect("response should deserialise")
    }

    #[fixture]
    fn mixed_response() -> IsochroneResponse {
        parse(json!({
            "type": "FeatureCollection",
            "features": [
                feature(json!({"Time": 300})),
                feature(json!({"time": 600}))
            ]
        }))
    }

    #[rstest]
    fn indexes_both_key_spellings(mixed_response: IsochroneResponse) {
        let index = FeatureIndex::from_response(mixed_response).expect("index should build");

        assert_eq!(index.cutoffs().collect::<Vec<_>>(), vec![300, 600]);
        assert!(index.get(300).is_some());
        assert!(index.get(600).is_some());
        assert!(index.get(900).is_none());
    }

    #[rstest]
    #[case(json!({"Time": 300, "time": 600}), Some(300))]
    #[case(json!({"Time": null, "time": 600}), Some(600))]
    #[case(json!({"Time": 0}), Some(0))]
    #[case(json!({"time": 900.0}), Some(900))]
    #[case(json!({"time": 90.5}), None)]
    #[case(json!({"time": -60}), None)]
    #[case(json!({"time": "300"}), Some(300))]
    #[case(json!({"time": "-60"}), None)]
    #[case(json!({"time": true}), None)]
    #[case(json!({"name": "walkshed"}), None)]
    fn cutoff_prefers_capitalised_key(#[case] properties: Value, #[case] expected: Option<u32>) {
        let parsed: IsochroneFeature =
            serde_json::from_value(feature(properties)).expect("feature should deserialise");
        assert_eq!(parsed.cutoff(), expected);
    }

    #[rstest]
    fn missing_time_fails_loudly() {
        let response = parse(json!({
            "features": [feature(json!({"Time": 300})), feature(json!({"name": "x"}))]
        }));

        let err = FeatureIndex::from_response(response).expect_err("index should fail");

        assert_eq!(err, FeatureError::MissingTime { position: 1 });
    }

    #[rstest]
    fn invalid_time_reports_value() {
        let response = parse(json!({"features": [feature(json!({"time": "soon"}))]}));

        let err = FeatureIndex::from_response(response).expect_err("index should fail");

        assert_eq!(
            err,
            FeatureError::InvalidTime {
                position: 0,
                value: "\"soon\"".to_owned(),
            }
        );
    }

    #[rstest]
    fn numeric_string_time_is_indexed() {
        let response = parse(json!({
            "features": [feature(json!({"Time": "300"})), feature(json!({"time": 600}))]
        }));

        let index = FeatureIndex::from_response(response).expect("index should build");

        assert_eq!(index.cutoffs().collect::<Vec<_>>(), vec![300, 600]);
    }

    #[rstest]
    fn duplicate_cutoffs_keep_later_feature() {
        let response = parse(json!({
            "features": [
                feature(json!({"Time": 300, "rank": 1})),
                feature(json!({"time": 300, "rank": 2}))
            ]
        }));

        let index = FeatureIndex::from_response(response).expect("index should build");

        assert_eq!(index.len(), 1);
        let kept = index.get(300).expect("cutoff 300 should be indexed");
        assert_eq!(kept.properties.get("rank"), Some(&json!(2)));
    }

    #[rstest]
    fn response_without_features_is_rejected() {
        let outcome = serde_json::from_value::<IsochroneResponse>(json!({"type": "FeatureCollection"}));
        assert!(outcome.is_err());
    }

    #[rstest]
    fn converts_to_feature_collection(mixed_response: IsochroneResponse) {
        let index = FeatureIndex::from_response(mixed_response).expect("index should build");

        let collection = index.to_feature_collection();

        assert_eq!(collection.features.len(), 2);
        let first = &collection.features[0];
        assert!(first.geometry.is_some());
        assert_eq!(first.property("Time"), Some(&json!(300)));
    }

    #[rstest]
    fn string_ids_survive_conversion() {
        let mut value = feature(json!({"Time": 60}));
        value["id"] = json!("iso-60");
        let parsed: IsochroneFeature =
            serde_json::from_value(value).expect("feature should deserialise");

        let converted = parsed.to_geojson();

        assert_eq!(converted.id, Some(Id::String("iso-60".to_owned())));
    }
}
