//! CSV ingestion of neighborhood tables.
//!
//! The expected header names the columns `dnid`, `dnname`, `dnlatitude`, `dnlongitude`
//! and `dnradius`, in any order; extra columns are ignored. Coordinates are rounded to
//! 4 decimals (about 11 m), which is all the precision the distance model uses.

use crate::calibration::round_to;
use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::types::Columns;

const ID: &str = "dnid";
const NAME: &str = "dnname";
const LATITUDE: &str = "dnlatitude";
const LONGITUDE: &str = "dnlongitude";
const RADIUS: &str = "dnradius";

/// Parses CSV text into a validated [`Catalog`].
///
/// A leading byte order mark is skipped, blank lines are ignored and fields are trimmed.
/// Quoted fields may hold commas. Rows may carry more or fewer fields than the header;
/// a row missing one of the five columns fails with its line number.
///
/// ```
/// let csv = "dnid,dnname,dnlatitude,dnlongitude,dnradius\n\
///            1111010100,Cheongun-dong,37.58712,126.96951,0.6\n";
/// let catalog = dongnae::source::parse_csv(csv).unwrap();
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.columns().latitudes[0], 37.5871);
/// ```
pub fn parse_csv(text: &str) -> Result<Catalog> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let header = reader.headers().map_err(malformed)?;
    if header.is_empty() {
        return Err(Error::InvalidInput("missing CSV header".to_string()));
    }
    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| Error::InvalidInput(format!("missing CSV column {}", name)))
    };
    let (id_col, name_col, lat_col, lon_col, radius_col) = (
        column(ID)?,
        column(NAME)?,
        column(LATITUDE)?,
        column(LONGITUDE)?,
        column(RADIUS)?,
    );

    let mut columns = Columns::default();
    for record in reader.records() {
        let record = record.map_err(malformed)?;
        let line_no = record.position().map_or(0, |pos| pos.line());
        let field = |col: usize, name: &str| {
            record.get(col).ok_or_else(|| {
                Error::InvalidInput(format!("line {}: missing field {}", line_no, name))
            })
        };
        let number = |col: usize, name: &str| {
            let raw = field(col, name)?;
            raw.parse::<f64>().map_err(|_| {
                Error::InvalidInput(format!("line {}: invalid {} {:?}", line_no, name, raw))
            })
        };

        columns.push(
            field(id_col, ID)?,
            field(name_col, NAME)?,
            round_to(number(lat_col, LATITUDE)?, 4),
            round_to(number(lon_col, LONGITUDE)?, 4),
            number(radius_col, RADIUS)?,
        );
    }

    Catalog::new(columns)
}

fn malformed(err: csv::Error) -> Error {
    Error::InvalidInput(format!("malformed CSV: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reordered_columns() {
        let csv = "\u{feff}dnname,dnradius,extra,dnlongitude,dnlatitude,dnid\r\n\
                   Singyo-dong,0.3,x,126.97034,37.58431,1111010200\r\n\
                   \r\n\
                   Gungjeong-dong,0.4,y,126.9731,37.5895,1111010300\r\n";
        let catalog = parse_csv(csv).unwrap();
        let columns = catalog.columns();
        assert_eq!(columns.ids, vec!["1111010200", "1111010300"]);
        assert_eq!(columns.names, vec!["Singyo-dong", "Gungjeong-dong"]);
        assert_eq!(columns.latitudes, vec![37.5843, 37.5895]);
        assert_eq!(columns.longitudes, vec![126.9703, 126.9731]);
        assert_eq!(columns.radii, vec![0.3, 0.4]);
    }

    #[test]
    fn test_quoted_name_with_commas() {
        let csv = "dnid,dnname,dnlatitude,dnlongitude,dnradius\n\
                   1111017400,\"Jongno 1,2,3,4-ga-dong\",37.5703,126.9918,0.7\n\
                   1111017500,\"Jongno 5\"\"6\"\"-ga-dong\",37.5709,127.0050,0.6\n";
        let catalog = parse_csv(csv).unwrap();
        let columns = catalog.columns();
        assert_eq!(columns.ids, vec!["1111017400", "1111017500"]);
        assert_eq!(columns.names[0], "Jongno 1,2,3,4-ga-dong");
        assert_eq!(columns.names[1], "Jongno 5\"6\"-ga-dong");
        assert_eq!(columns.radii, vec![0.7, 0.6]);
    }

    #[test]
    fn test_header_only_is_empty_catalog() {
        let catalog = parse_csv("dnid,dnname,dnlatitude,dnlongitude,dnradius\n").unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(parse_csv(""), Err(Error::InvalidInput(_))));
        let result = parse_csv("dnid,dnname,dnlatitude,dnlongitude\n1,a,37.0,127.0\n");
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.contains("dnradius")));
    }

    #[test]
    fn test_bad_row_names_line() {
        let csv = "dnid,dnname,dnlatitude,dnlongitude,dnradius\n\
                   1,a,37.0,127.0,1.0\n\
                   2,b,north,127.0,1.0\n";
        let result = parse_csv(csv);
        assert!(matches!(result, Err(Error::InvalidInput(msg)) if msg.starts_with("line 3")));
    }

    #[test]
    fn test_short_row() {
        let csv = "dnid,dnname,dnlatitude,dnlongitude,dnradius\n1,a,37.0\n";
        assert!(matches!(parse_csv(csv), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_out_of_range_row() {
        let csv = "dnid,dnname,dnlatitude,dnlongitude,dnradius\n1,a,137.0,127.0,1.0\n";
        assert!(matches!(parse_csv(csv), Err(Error::InvalidInput(_))));
    }
}
