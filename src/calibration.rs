//! Degree-to-kilometer calibration and the planar distance model.
//!
//! Distances are computed on an equirectangular projection: one degree of latitude is
//! a fixed [`LAT_KM_PER_DEGREE`], one degree of longitude is that value scaled by the
//! cosine of the catalog's mean latitude. The coefficient pair is computed once when the
//! catalog is built. It is accurate for short distances near the sampled latitude band
//! and degrades far from it or close to the poles.

/// Kilometers per degree of latitude.
pub const LAT_KM_PER_DEGREE: f64 = 111.0;

/// Every Nth latitude is sampled when calibrating.
pub const CALIBRATION_STRIDE: usize = 100;

/// Conversion factors from degrees to kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Kilometers per degree of latitude
    pub lat_coef: f64,
    /// Kilometers per degree of longitude at the catalog's mean latitude
    pub lon_coef: f64,
}

impl Calibration {
    /// Calibrates from a latitude column.
    ///
    /// The mean latitude is the midpoint of the smallest and largest sampled values. Only
    /// every [`CALIBRATION_STRIDE`]th entry is sampled, or the whole column when it is
    /// shorter than the stride. An empty column calibrates at the equator.
    ///
    /// ```
    /// use dongnae::Calibration;
    ///
    /// let equator = Calibration::from_latitudes(&[]);
    /// assert_eq!(equator.lon_coef, 111.0);
    ///
    /// let seoul = Calibration::from_latitudes(&[37.0, 38.0]);
    /// assert_eq!(seoul.lon_coef, 88.06);
    /// ```
    pub fn from_latitudes(latitudes: &[f64]) -> Self {
        let stride = if latitudes.len() < CALIBRATION_STRIDE {
            1
        } else {
            CALIBRATION_STRIDE
        };

        let (min_lat, max_lat) = latitudes
            .iter()
            .step_by(stride)
            .fold(None, |range: Option<(f64, f64)>, &lat| match range {
                Some((lo, hi)) => Some((lo.min(lat), hi.max(lat))),
                None => Some((lat, lat)),
            })
            .unwrap_or((0.0, 0.0));

        let mean_lat = (min_lat + max_lat) / 2.0;
        Self {
            lat_coef: LAT_KM_PER_DEGREE,
            lon_coef: round_to(LAT_KM_PER_DEGREE * mean_lat.to_radians().cos(), 2),
        }
    }

    /// Approximate distance in kilometers between two points.
    pub fn planar_distance(&self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        let d_lat = (lat2 - lat1) * self.lat_coef;
        let d_lon = (lon2 - lon1) * self.lon_coef;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }

    /// Degree box spanning `window_km` in every direction from a point.
    pub fn bounding_box(&self, latitude: f64, longitude: f64, window_km: f64) -> BoundingBox {
        let lat_delta = window_km / self.lat_coef;
        let lon_delta = window_km / self.lon_coef;
        BoundingBox {
            min_lat: latitude - lat_delta,
            max_lat: latitude + lat_delta,
            min_lon: longitude - lon_delta,
            max_lon: longitude + lon_delta,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::from_latitudes(&[])
    }
}

/// Inclusive latitude/longitude rectangle used to reject candidates cheaply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge in degrees
    pub min_lat: f64,
    /// Northern edge in degrees
    pub max_lat: f64,
    /// Western edge in degrees
    pub min_lon: f64,
    /// Eastern edge in degrees
    pub max_lon: f64,
}

impl BoundingBox {
    /// Whether a point lies inside the box, edges included. NaN never does.
    #[inline]
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        latitude >= self.min_lat
            && latitude <= self.max_lat
            && longitude >= self.min_lon
            && longitude <= self.max_lon
    }
}

/// Rounds half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
