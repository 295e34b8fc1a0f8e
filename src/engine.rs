use crate::catalog::Catalog;
use crate::types::Region;

/// The query engine over one immutable [`Catalog`].
///
/// Spatial queries live in [`spatial`](crate::spatial), text queries in
/// [`text`](crate::text). Every query is a read-only scan, so an `Engine` can be shared
/// between threads once built.
#[derive(Debug, Clone)]
pub struct Engine {
    catalog: Catalog,
}

impl Engine {
    /// Wraps a catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Number of neighborhoods in the catalog.
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// The underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Signed distance in kilometers from a point to the edge of the neighborhood at `idx`.
    ///
    /// Negative inside the radius, zero on the boundary, positive outside.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    pub fn boundary_distance(&self, latitude: f64, longitude: f64, idx: usize) -> f64 {
        let columns = self.catalog.columns();
        let center = self.catalog.calibration().planar_distance(
            latitude,
            longitude,
            columns.latitudes[idx],
            columns.longitudes[idx],
        );
        center - columns.radii[idx]
    }

    /// Materializes the row at `idx` into an owned record.
    pub(crate) fn build_region(
        &self,
        idx: usize,
        distance: Option<f64>,
        score: Option<f64>,
    ) -> Region {
        let columns = self.catalog.columns();
        Region {
            id: columns.ids[idx].clone(),
            name: columns.names[idx].clone(),
            latitude: columns.latitudes[idx],
            longitude: columns.longitudes[idx],
            radius: columns.radii[idx],
            distance,
            score,
        }
    }
}

impl From<Catalog> for Engine {
    fn from(catalog: Catalog) -> Self {
        Self::new(catalog)
    }
}
