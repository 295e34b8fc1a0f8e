//! In-memory spatial and text query engine over a fixed catalog of neighborhoods.
//!
//! `dongnae` answers "where is this point?" against a catalog of neighborhoods, each a
//! named circle given by a center coordinate and a radius in kilometers. It is meant to
//! be embedded in a service or UI that owns the data and renders the answers.
//!
//! # Features
//!
//! - **Reverse geocoding** - [`Engine::locate`] returns the neighborhood nearest to a point
//! - **k-nearest and radius search** - [`Engine::nearest`], [`Engine::within`]
//! - **Soft geofencing** - [`Engine::resolve`] scores how central a point is in each
//!   neighborhood that contains it
//! - **Keyword search** - [`Engine::search`], [`Engine::best_match`]
//! - **Id lookup** - [`Engine::get`] in O(1), numeric and string ids alike
//! - **Compact** - column-oriented storage, persisted with bincode
//!
//! # Quick Start
//!
//! ```
//! use dongnae::{Catalog, Engine};
//!
//! let catalog = Catalog::from_parallel(
//!     [1111010100u64, 1111010200, 1168010100],
//!     ["Cheongun-dong", "Singyo-dong", "Yeoksam-dong"],
//!     vec![37.5871, 37.5843, 37.5006],
//!     vec![126.9695, 126.9703, 127.0366],
//!     vec![0.6, 0.3, 1.2],
//! )?;
//! let engine = Engine::new(catalog);
//!
//! let here = engine.locate(37.5010, 127.0370).unwrap();
//! assert_eq!(here.name, "Yeoksam-dong");
//! assert!(here.distance.unwrap() < 0.0); // inside its radius
//!
//! let found = engine.best_match("Singyo").unwrap();
//! assert_eq!(found.id, "1111010200");
//! assert_eq!(engine.get(1111010200u64), engine.get("1111010200"));
//! # Ok::<(), dongnae::Error>(())
//! ```
//!
//! # Distance Model
//!
//! Distances use an equirectangular approximation instead of a geodesic formula. At
//! construction the catalog samples every 100th latitude, takes the midpoint of the
//! sampled range, and fixes two coefficients: 111 km per degree of latitude and
//! `111 * cos(mean latitude)` km per degree of longitude (see [`Calibration`]). This is
//! accurate for the short distances between neighborhoods of one country and degrades
//! for catalogs spanning a wide band of latitudes.
//!
//! The *boundary distance* from a point to a neighborhood is the planar distance to its
//! center minus its radius: negative inside, positive outside.
//!
//! # Query Algorithm
//!
//! 1. Size a scan window in kilometers and convert it to a degree box
//! 2. Scan the latitude/longitude columns, keeping rows whose center is in the box
//! 3. Compute the boundary distance only for those rows and apply the exact filter
//! 4. Sort stably by rounded distance or score, truncate, and build result records
//!
//! Only the returned rows are materialized into [`Region`] values.
//!
//! # Thread Safety
//!
//! A [`Catalog`] is never mutated after [`Catalog::new`] returns. Build the [`Engine`]
//! first, then share it by reference or `Arc`; all queries are lock-free reads.
//!
//! # Modules
//!
//! - [`types`] - Result records and column storage
//! - [`spatial`] - Spatial queries and their tuning constants
//! - [`text`] - Keyword search and id lookup
//! - [`source`] - CSV ingestion
//! - `builder` - Catalog building from local or remote sources (feature `builder`)

#![warn(missing_docs)]

mod calibration;
mod catalog;
mod engine;
mod error;
pub mod source;
pub mod spatial;
pub mod text;
pub mod types;

#[cfg(feature = "builder")]
pub mod builder;

pub use calibration::{BoundingBox, Calibration, CALIBRATION_STRIDE, LAT_KM_PER_DEGREE};
pub use catalog::Catalog;
pub use engine::Engine;
pub use error::{Error, Result};
pub use spatial::{
    DEFAULT_K, DEFAULT_SCAN_RADIUS_KM, DEFAULT_THRESHOLD, RESOLVE_SCAN_KM, SCAN_MARGIN_KM,
};
pub use text::DEFAULT_SEARCH_LIMIT;
pub use types::{Columns, Region};
