//! Cutoff times, in seconds, requested from the isochrone endpoint.

use serde::{Deserialize, Serialize};

/// Ordered set of cutoff times in seconds.
///
/// A single value converts into a one-element set. Order only matters for the
/// request URL, which lists cutoffs as given.
///
/// # Examples
/// ```
/// use isochrone_core::Cutoffs;
///
/// let single = Cutoffs::from(900);
/// assert_eq!(single.as_slice(), &[900]);
///
/// let several = Cutoffs::from([600, 300]);
/// assert_eq!(several.as_slice(), &[600, 300]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cutoffs(Vec<u32>);

impl Cutoffs {
    /// Cutoff values in input order.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    /// Iterate over cutoff values in input order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Number of cutoff values.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no cutoff was requested.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `seconds` was requested.
    #[must_use]
    pub fn contains(&self, seconds: u32) -> bool {
        self.0.contains(&seconds)
    }
}

impl From<u32> for Cutoffs {
    fn from(seconds: u32) -> Self {
        Self(vec![seconds])
    }
}

impl From<Vec<u32>> for Cutoffs {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}

impl From<&[u32]> for Cutoffs {
    fn from(values: &[u32]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[u32; N]> for Cutoffs {
    fn from(values: [u32; N]) -> Self {
        Self(values.to_vec())
    }
}

impl FromIterator<u32> for Cutoffs {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn scalar_becomes_single_element() {
        assert_eq!(Cutoffs::from(1800).as_slice(), &[1800]);
    }

    #[rstest]
    fn sequence_keeps_input_order_and_duplicates() {
        let cutoffs = Cutoffs::from(vec![900, 300, 900]);
        assert_eq!(cutoffs.iter().collect::<Vec<_>>(), vec![900, 300, 900]);
        assert!(cutoffs.contains(300));
        assert!(!cutoffs.contains(600));
    }

    #[rstest]
    fn deserialises_from_json_array() {
        let cutoffs: Cutoffs = serde_json::from_str("[300, 600]").expect("should deserialise");
        assert_eq!(cutoffs.len(), 2);
    }
}
