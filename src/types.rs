//! Core data structures for the neighborhood catalog.
//!
//! - [`Region`] - Materialized query result returned to callers
//! - [`Columns`] - Column-oriented storage of the raw catalog, also the persisted form

#![warn(missing_docs)]

use serde::{Deserialize, Serialize};

/// A neighborhood as returned by every query of the [`Engine`](crate::Engine).
///
/// Records are built only for the rows a query actually returns, and are owned by the
/// caller. Spatial queries fill in [`distance`](Region::distance), soft-geofence and text
/// queries fill in [`score`](Region::score); a record never carries both.
///
/// Serialized to JSON the optional fields are omitted when absent:
///
/// ```
/// use dongnae::Region;
///
/// let region = Region {
///     id: "1168010100".to_string(),
///     name: "Yeoksam-dong".to_string(),
///     latitude: 37.5006,
///     longitude: 127.0366,
///     radius: 1.2,
///     distance: Some(-0.4),
///     score: None,
/// };
/// let json = serde_json::to_string(&region).unwrap();
/// assert!(json.contains("\"distance\":-0.4"));
/// assert!(!json.contains("score"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Catalog identifier in its normalized text form (e.g., "1111010100")
    pub id: String,
    /// Display name, not necessarily unique (e.g., "Cheongun-dong")
    pub name: String,
    /// Center latitude in decimal degrees
    pub latitude: f64,
    /// Center longitude in decimal degrees
    pub longitude: f64,
    /// Radius of the neighborhood in kilometers, may be zero
    pub radius: f64,
    /// Signed boundary distance in kilometers. Negative means the query point lies inside
    /// the radius, positive means outside by that many kilometers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Query-specific score. For [`resolve`](crate::Engine::resolve) 0.0 is the center and
    /// 1.0 the threshold-scaled edge; for text search it is the number of matched tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Parallel columns holding one slot per neighborhood.
///
/// All five vectors have the same length and the same index correspondence. This is
/// also the persisted format: [`Catalog::to_bytes`](crate::Catalog::to_bytes) encodes
/// it with bincode and [`Catalog::from_bytes`](crate::Catalog::from_bytes) validates it
/// on the way back in.
#[derive(
    Debug, Clone, Default, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct Columns {
    /// Identifiers, normalized to text
    pub ids: Vec<String>,
    /// Display names
    pub names: Vec<String>,
    /// Center latitudes in decimal degrees
    pub latitudes: Vec<f64>,
    /// Center longitudes in decimal degrees
    pub longitudes: Vec<f64>,
    /// Radii in kilometers
    pub radii: Vec<f64>,
}

impl Columns {
    /// Creates empty columns with room for `capacity` rows.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            names: Vec::with_capacity(capacity),
            latitudes: Vec::with_capacity(capacity),
            longitudes: Vec::with_capacity(capacity),
            radii: Vec::with_capacity(capacity),
        }
    }

    /// Appends one row. The id is stored in its `Display` form so numeric and textual
    /// ids share one key space.
    pub fn push(
        &mut self,
        id: impl std::fmt::Display,
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        radius: f64,
    ) {
        self.ids.push(id.to_string());
        self.names.push(name.into());
        self.latitudes.push(latitude);
        self.longitudes.push(longitude);
        self.radii.push(radius);
    }

    /// Number of rows, taken from the id column.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
