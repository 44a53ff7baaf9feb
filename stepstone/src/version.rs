use crate::errors::{ErrorKind, StepstoneError, StepstoneResult};
use itertools::{EitherOrBoth, Itertools};
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A totally ordered version marker made of dot-delimited numeric segments.
///
/// # Purpose
/// Identifies a migration's position in the upgrade sequence. Ordering is
/// numeric per segment, never lexicographic: "0.2" sorts before "0.10", and
/// a plain string comparison would corrupt that order for multi-digit
/// segments.
///
/// # Ordering
/// Segments are compared left to right. When the segment counts differ, the
/// shorter sequence is treated as having trailing zero segments, so "0.2"
/// and "0.2.0" are equal while "0.2" < "0.2.1".
///
/// # Examples
///
/// ```rust,ignore
/// use stepstone::version::Version;
///
/// let a: Version = "0.2".parse()?;
/// let b: Version = "0.10".parse()?;
/// assert!(a < b);
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    segments: SmallVec<[u64; 4]>,
}

impl Version {
    /// Parses a dot-delimited version marker.
    ///
    /// # Arguments
    /// * `marker` - The version string, e.g. "0.2.1"
    ///
    /// # Returns
    /// `Ok(Version)` - The parsed marker
    /// `Err(StepstoneError)` - `MalformedVersion` if the marker is empty or
    ///   any segment is empty, non-numeric, or out of range
    ///
    /// # Behavior
    /// There is no fallback to lexicographic comparison: a marker that cannot
    /// be parsed is an error wherever it is compared, not a differently
    /// ordered value.
    pub fn parse(marker: &str) -> StepstoneResult<Version> {
        if marker.is_empty() {
            return Err(StepstoneError::new(
                "Version marker is empty",
                ErrorKind::MalformedVersion,
            ));
        }

        let mut segments = SmallVec::new();
        for segment in marker.split('.') {
            if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                return Err(StepstoneError::new(
                    &format!(
                        "Malformed version marker '{}': segment '{}' is not numeric",
                        marker, segment
                    ),
                    ErrorKind::MalformedVersion,
                ));
            }
            let value = segment.parse::<u64>().map_err(|_| {
                StepstoneError::new(
                    &format!(
                        "Malformed version marker '{}': segment '{}' is out of range",
                        marker, segment
                    ),
                    ErrorKind::MalformedVersion,
                )
            })?;
            segments.push(value);
        }

        Ok(Version { segments })
    }

    /// Returns the numeric segments of this marker.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        // missing segments compare as zero
        for pair in self.segments.iter().zip_longest(other.segments.iter()) {
            let (left, right) = match pair {
                EitherOrBoth::Both(l, r) => (*l, *r),
                EitherOrBoth::Left(l) => (*l, 0),
                EitherOrBoth::Right(r) => (0, *r),
            };
            match left.cmp(&right) {
                Ordering::Equal => continue,
                non_eq => return non_eq,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl FromStr for Version {
    type Err = StepstoneError;

    fn from_str(marker: &str) -> StepstoneResult<Version> {
        Version::parse(marker)
    }
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.iter().join("."))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Version {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let marker = <String as serde::Deserialize>::deserialize(deserializer)?;
        Version::parse(&marker).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_single_segment() {
        let version = Version::parse("3").unwrap();
        assert_eq!(version.segments(), &[3]);
    }

    #[test]
    fn test_parse_multiple_segments() {
        let version = Version::parse("0.2.1").unwrap();
        assert_eq!(version.segments(), &[0, 2, 1]);
    }

    #[test]
    fn test_parse_empty_marker_fails() {
        let result = Version::parse("");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::MalformedVersion);
    }

    #[test]
    fn test_parse_non_numeric_segment_fails() {
        let result = Version::parse("0.2a.1");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::MalformedVersion);
    }

    #[test]
    fn test_parse_empty_segment_fails() {
        // Trailing dot leaves an empty segment
        let result = Version::parse("0.2.");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::MalformedVersion);
    }

    #[test]
    fn test_parse_negative_segment_fails() {
        let result = Version::parse("0.-2");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::MalformedVersion);
    }

    #[test]
    fn test_parse_out_of_range_segment_fails() {
        // One digit past u64::MAX
        let result = Version::parse("99999999999999999999999");
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::MalformedVersion);
    }

    #[test]
    fn test_from_str_roundtrip() {
        let version: Version = "1.4.0".parse().unwrap();
        assert_eq!(version.segments(), &[1, 4, 0]);
    }

    // ==================== Ordering Tests ====================

    #[test]
    fn test_numeric_not_lexicographic_order() {
        // "0.10" > "0.2" numerically, while a string comparison would invert it
        let small = Version::parse("0.2").unwrap();
        let large = Version::parse("0.10").unwrap();
        assert!(small < large);
    }

    #[test]
    fn test_shorter_marker_pads_with_zeros() {
        let short = Version::parse("0.2").unwrap();
        let padded = Version::parse("0.2.0").unwrap();
        let longer = Version::parse("0.2.1").unwrap();

        assert_eq!(short, padded);
        assert!(short < longer);
    }

    #[test]
    fn test_ordering_is_total_over_sample() {
        let markers = ["0.2", "0.0", "0.2.1", "0.0.1", "0.1"];
        let mut versions: Vec<Version> =
            markers.iter().map(|m| Version::parse(m).unwrap()).collect();
        versions.sort();

        let sorted: Vec<String> = versions.iter().map(|v| v.to_string()).collect();
        assert_eq!(sorted, vec!["0.0", "0.0.1", "0.1", "0.2", "0.2.1"]);
    }

    #[test]
    fn test_leading_zero_segments_compare_numerically() {
        let a = Version::parse("1.02").unwrap();
        let b = Version::parse("1.2").unwrap();
        assert_eq!(a, b);
    }

    // ==================== Display Tests ====================

    #[test]
    fn test_display_dotted_form() {
        let version = Version::parse("0.2.1").unwrap();
        assert_eq!(version.to_string(), "0.2.1");
    }

    #[test]
    fn test_display_single_segment() {
        let version = Version::parse("7").unwrap();
        assert_eq!(version.to_string(), "7");
    }
}
