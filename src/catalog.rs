use crate::calibration::Calibration;
use crate::error::{Error, Result};
use crate::types::Columns;
use rustc_hash::FxHashMap;
use std::fmt::Display;

/// The immutable neighborhood store: validated columns, the id index and the calibration.
///
/// A catalog is built once and never mutated. Wrap it in an [`Engine`](crate::Engine) to
/// query it; share the engine by reference or `Arc` after construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    columns: Columns,
    index: FxHashMap<String, usize>,
    calibration: Calibration,
}

impl Catalog {
    /// Validates `columns`, builds the id index and calibrates.
    ///
    /// Fails with [`Error::InvalidInput`] if the columns differ in length, a coordinate
    /// is non-finite or out of range, or a radius is negative or non-finite. When an id
    /// appears more than once the later row wins in the index.
    pub fn new(columns: Columns) -> Result<Self> {
        validate(&columns)?;

        let mut index = FxHashMap::default();
        index.reserve(columns.len());
        for (idx, id) in columns.ids.iter().enumerate() {
            if let Some(previous) = index.insert(id.clone(), idx) {
                tracing::debug!(id = %id, previous, kept = idx, "Duplicate region id");
            }
        }

        let calibration = Calibration::from_latitudes(&columns.latitudes);
        tracing::debug!(
            count = columns.len(),
            lat_coef = calibration.lat_coef,
            lon_coef = calibration.lon_coef,
            "Built region catalog"
        );

        Ok(Self {
            columns,
            index,
            calibration,
        })
    }

    /// Builds a catalog from five parallel sequences.
    ///
    /// Ids may be numeric or textual; they are normalized to their `Display` text.
    pub fn from_parallel<I, N>(
        ids: impl IntoIterator<Item = I>,
        names: impl IntoIterator<Item = N>,
        latitudes: Vec<f64>,
        longitudes: Vec<f64>,
        radii: Vec<f64>,
    ) -> Result<Self>
    where
        I: Display,
        N: Into<String>,
    {
        Self::new(Columns {
            ids: ids.into_iter().map(|id| id.to_string()).collect(),
            names: names.into_iter().map(Into::into).collect(),
            latitudes,
            longitudes,
            radii,
        })
    }

    /// Decodes a catalog persisted with [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (columns, _): (Columns, _) =
            bincode::decode_from_slice(bytes, bincode::config::standard())?;
        Self::new(columns)
    }

    /// Encodes the columns with bincode. The index and calibration are rebuilt on decode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::encode_to_vec(&self.columns, bincode::config::standard())?)
    }

    /// Number of neighborhoods.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the catalog holds no neighborhoods.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Slot of the neighborhood with the given normalized id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Raw column storage.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Calibration computed at construction.
    pub fn calibration(&self) -> Calibration {
        self.calibration
    }
}

fn validate(columns: &Columns) -> Result<()> {
    let count = columns.ids.len();
    let lengths = [
        ("names", columns.names.len()),
        ("latitudes", columns.latitudes.len()),
        ("longitudes", columns.longitudes.len()),
        ("radii", columns.radii.len()),
    ];
    if let Some((name, len)) = lengths.iter().find(|(_, len)| *len != count) {
        return Err(Error::InvalidInput(format!(
            "column length mismatch: {} ids but {} {}",
            count, len, name
        )));
    }

    for idx in 0..count {
        let (lat, lon, radius) = (
            columns.latitudes[idx],
            columns.longitudes[idx],
            columns.radii[idx],
        );
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(invalid_row(columns, idx, "latitude", lat));
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(invalid_row(columns, idx, "longitude", lon));
        }
        if !radius.is_finite() || radius < 0.0 {
            return Err(invalid_row(columns, idx, "radius", radius));
        }
    }

    Ok(())
}

fn invalid_row(columns: &Columns, idx: usize, field: &str, value: f64) -> Error {
    Error::InvalidInput(format!(
        "row {} (id {}): invalid {} {}",
        idx, columns.ids[idx], field, value
    ))
}
