//! Street network components - nodes, edges and shade tables

use chrono::{NaiveTime, Timelike};
use geo::{LineString, Point};
use serde::{Deserialize, Serialize};

use crate::{NEUTRAL_SHADE, NodeId};

/// Time-of-day bucket selecting a column of an edge's shade table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Morning,
    Midday,
    #[default]
    Afternoon,
    Evening,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 4] = [
        TimeBucket::Morning,
        TimeBucket::Midday,
        TimeBucket::Afternoon,
        TimeBucket::Evening,
    ];

    /// Bucket covering the given wall-clock time.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        match time.hour() {
            5..=10 => TimeBucket::Morning,
            11..=14 => TimeBucket::Midday,
            15..=18 => TimeBucket::Afternoon,
            _ => TimeBucket::Evening,
        }
    }

    /// Parses a document bucket name ("afternoon" etc.).
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "morning" => Some(TimeBucket::Morning),
            "midday" => Some(TimeBucket::Midday),
            "afternoon" => Some(TimeBucket::Afternoon),
            "evening" => Some(TimeBucket::Evening),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeBucket::Morning => "morning",
            TimeBucket::Midday => "midday",
            TimeBucket::Afternoon => "afternoon",
            TimeBucket::Evening => "evening",
        }
    }

    fn index(self) -> usize {
        match self {
            TimeBucket::Morning => 0,
            TimeBucket::Midday => 1,
            TimeBucket::Afternoon => 2,
            TimeBucket::Evening => 3,
        }
    }
}

/// Shade value per time bucket, in [0, 1] (0 = no shade, 1 = full shade).
///
/// Buckets missing from the source document carry [`NEUTRAL_SHADE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeTable([f64; 4]);

impl ShadeTable {
    pub fn neutral() -> Self {
        Self([NEUTRAL_SHADE; 4])
    }

    pub fn get(&self, bucket: TimeBucket) -> f64 {
        self.0[bucket.index()]
    }

    pub fn set(&mut self, bucket: TimeBucket, value: f64) {
        self.0[bucket.index()] = value;
    }
}

impl Default for ShadeTable {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Street graph node
#[derive(Debug, Clone)]
pub struct StreetNode {
    /// Document ID of the node
    pub id: String,
    /// Node coordinates (x = longitude, y = latitude)
    pub geometry: Point<f64>,
}

/// Street graph edge (street segment)
///
/// Directed as stored; the network synthesizes a reverse counterpart for
/// every stored edge so the graph is logically undirected.
#[derive(Debug, Clone)]
pub struct StreetEdge {
    /// Document ID of the edge, shared with its synthesized reverse
    pub id: String,
    pub from: NodeId,
    pub to: NodeId,
    /// Walking length in meters, precomputed by the document producer
    pub length_m: f64,
    pub shade: ShadeTable,
    /// Physical path of the segment, kept in stored direction
    pub geometry: LineString<f64>,
}

impl StreetEdge {
    pub fn shade_for(&self, bucket: TimeBucket) -> f64 {
        self.shade.get(bucket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_cover_the_clock() {
        let cases = [
            (NaiveTime::from_hms_opt(5, 0, 0).unwrap(), TimeBucket::Morning),
            (NaiveTime::from_hms_opt(10, 59, 0).unwrap(), TimeBucket::Morning),
            (NaiveTime::from_hms_opt(11, 0, 0).unwrap(), TimeBucket::Midday),
            (NaiveTime::from_hms_opt(14, 30, 0).unwrap(), TimeBucket::Midday),
            (NaiveTime::from_hms_opt(15, 0, 0).unwrap(), TimeBucket::Afternoon),
            (NaiveTime::from_hms_opt(18, 59, 59).unwrap(), TimeBucket::Afternoon),
            (NaiveTime::from_hms_opt(19, 0, 0).unwrap(), TimeBucket::Evening),
            (NaiveTime::from_hms_opt(3, 0, 0).unwrap(), TimeBucket::Evening),
        ];
        for (time, expected) in cases {
            assert_eq!(TimeBucket::from_naive_time(time), expected, "{time}");
        }
    }

    #[test]
    fn bucket_names_round_trip() {
        for bucket in TimeBucket::ALL {
            assert_eq!(TimeBucket::parse(bucket.as_str()), Some(bucket));
        }
        assert_eq!(TimeBucket::parse("noon"), None);
    }

    #[test]
    fn missing_buckets_are_neutral() {
        let mut table = ShadeTable::neutral();
        assert_eq!(table.get(TimeBucket::Morning), crate::NEUTRAL_SHADE);

        table.set(TimeBucket::Afternoon, 0.8);
        assert_eq!(table.get(TimeBucket::Afternoon), 0.8);
        assert_eq!(table.get(TimeBucket::Evening), crate::NEUTRAL_SHADE);
    }
}
