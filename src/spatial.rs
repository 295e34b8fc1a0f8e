//! Spatial queries: reverse geocoding, k-nearest, radius search and soft geofencing.
//!
//! Every query runs the same two-phase scan. A degree box sized from the scan window
//! rejects most rows with four comparisons, then the exact boundary distance is computed
//! for the rows that survive. The scan is linear in the catalog size; a grid or tree
//! could replace the box test without changing any result.

use crate::calibration::round_to;
use crate::engine::Engine;
use crate::types::Region;
use std::cmp::Ordering;

/// Default number of results for [`Engine::nearest`].
pub const DEFAULT_K: usize = 1;

/// Scan window used by [`Engine::nearest`] when no radius is given, in kilometers.
pub const DEFAULT_SCAN_RADIUS_KM: f64 = 10.0;

/// Margin added to the nearest-neighbor scan window, in kilometers.
pub const SCAN_MARGIN_KM: f64 = 5.0;

/// Scan window of [`Engine::resolve`] per unit of threshold, in kilometers.
pub const RESOLVE_SCAN_KM: f64 = 15.0;

/// Default threshold for [`Engine::resolve`]: match exactly the inside of each radius.
pub const DEFAULT_THRESHOLD: f64 = 1.0;

impl Engine {
    /// Returns the single nearest neighborhood, or `None` if nothing lies in the scan window.
    ///
    /// Equivalent to `nearest(latitude, longitude, 1, None)`.
    pub fn locate(&self, latitude: f64, longitude: f64) -> Option<Region> {
        self.nearest(latitude, longitude, DEFAULT_K, None).into_iter().next()
    }

    /// Returns up to `k` neighborhoods ordered by ascending boundary distance.
    ///
    /// The scan window is `radius_km` (or [`DEFAULT_SCAN_RADIUS_KM`]) plus
    /// [`SCAN_MARGIN_KM`]. With `radius_km` set, only neighborhoods whose boundary is
    /// within that many kilometers are returned. Distances are rounded to 4 decimals
    /// before ordering; equal distances keep catalog order.
    pub fn nearest(
        &self,
        latitude: f64,
        longitude: f64,
        k: usize,
        radius_km: Option<f64>,
    ) -> Vec<Region> {
        if k == 0 {
            return Vec::new();
        }

        let window = radius_km.unwrap_or(DEFAULT_SCAN_RADIUS_KM) + SCAN_MARGIN_KM;
        let mut candidates: Vec<(usize, f64)> = self
            .scan(latitude, longitude, window)
            .filter_map(|idx| {
                let distance = self.boundary_distance(latitude, longitude, idx);
                match radius_km {
                    Some(limit) if !(distance <= limit) => None,
                    // -0.0 + 0.0 == +0.0
                    _ => Some((idx, round_to(distance, 4) + 0.0)),
                }
            })
            .collect();

        sort_ascending(&mut candidates);
        candidates.truncate(k);
        candidates
            .into_iter()
            .map(|(idx, distance)| self.build_region(idx, Some(distance), None))
            .collect()
    }

    /// Returns every neighborhood whose boundary lies within `radius_km`, nearest first.
    ///
    /// `limit` caps the number of results; `None` returns them all. The scan window is
    /// `radius_km` plus [`SCAN_MARGIN_KM`], so a zero radius still looks 5 km out for
    /// neighborhoods that contain the point.
    pub fn within(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
        limit: Option<usize>,
    ) -> Vec<Region> {
        self.nearest(
            latitude,
            longitude,
            limit.unwrap_or(self.len()),
            Some(radius_km),
        )
    }

    /// Soft geofence: neighborhoods that contain the point, scored by how central it is.
    ///
    /// A neighborhood matches when its boundary distance is at most
    /// `radius * (threshold - 1)`, so `threshold = 1.0` means inside or on the edge and
    /// larger thresholds widen every radius proportionally. The score is the center
    /// distance divided by `radius * threshold`, rounded to 2 decimals: 0.0 at the center,
    /// 1.0 on the scaled edge. Results are sorted by ascending score.
    ///
    /// A zero-radius neighborhood matches only a point exactly at its center, with score
    /// 0.0. A threshold that is not a positive finite number matches nothing.
    pub fn resolve(&self, latitude: f64, longitude: f64, threshold: f64) -> Vec<Region> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Vec::new();
        }

        let radii = &self.catalog().columns().radii;
        let mut matches: Vec<(usize, f64)> = self
            .scan(latitude, longitude, RESOLVE_SCAN_KM * threshold)
            .filter_map(|idx| {
                let radius = radii[idx];
                let distance = self.boundary_distance(latitude, longitude, idx);
                if !(distance <= radius * (threshold - 1.0)) {
                    return None;
                }
                let score = if radius > 0.0 {
                    round_to((distance + radius) / (radius * threshold), 2)
                } else {
                    0.0
                };
                Some((idx, score))
            })
            .collect();

        sort_ascending(&mut matches);
        matches
            .into_iter()
            .map(|(idx, score)| self.build_region(idx, None, Some(score)))
            .collect()
    }

    /// Indices of neighborhoods whose center lies in the box `window_km` around the point.
    fn scan(
        &self,
        latitude: f64,
        longitude: f64,
        window_km: f64,
    ) -> impl Iterator<Item = usize> + '_ {
        let columns = self.catalog().columns();
        let bbox = self
            .catalog()
            .calibration()
            .bounding_box(latitude, longitude, window_km);
        columns
            .latitudes
            .iter()
            .zip(&columns.longitudes)
            .enumerate()
            .filter(move |(_, (lat, lon))| bbox.contains(**lat, **lon))
            .map(|(idx, _)| idx)
    }
}

/// Stable sort on the key, so equal keys keep catalog order.
fn sort_ascending(candidates: &mut [(usize, f64)]) {
    candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
}
