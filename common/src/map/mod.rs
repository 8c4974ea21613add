//! Coordinate handling for the map point selector.
//!
//! The selector receives coordinates as the text currently held by the draft
//! (possibly empty or malformed) and emits clicks as 6-decimal strings. Both
//! directions go through this module so the form and the map agree on format.

use thiserror::Error;

/// Geographic center of Ukraine, used when the draft has no usable point.
pub const DEFAULT_CENTER: (f64, f64) = (48.3794, 31.1656);
pub const DEFAULT_ZOOM: u8 = 6;
/// Minimum zoom when the map recenters on a point filled in by the form.
pub const FOLLOW_ZOOM: u8 = 10;
pub const COORDINATE_DECIMALS: usize = 6;

/// Radius drawn around region-level marks on the public map.
pub const REGION_MARK_RADIUS_METERS: f64 = 20_000.0;

#[derive(Debug, Error, PartialEq)]
pub enum CoordError {
    #[error("coordinate is empty")]
    Empty,
    #[error("coordinate '{0}' is not a number")]
    NotANumber(String),
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

pub fn format_coordinate(value: f64) -> String {
    format!("{:.*}", COORDINATE_DECIMALS, value)
}

fn parse_component(value: &str) -> Result<f64, CoordError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoordError::Empty);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordError::NotANumber(trimmed.to_string()))
}

/// Parses a `(lat, lng)` pair of draft strings.
pub fn parse_point(lat: &str, lng: &str) -> Result<(f64, f64), CoordError> {
    let lat = parse_component(lat)?;
    let lng = parse_component(lng)?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(CoordError::LatitudeOutOfRange(lat));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(CoordError::LongitudeOutOfRange(lng));
    }
    Ok((lat, lng))
}

/// Where the map should be centered for the given draft coordinates.
pub fn center_for(lat: &str, lng: &str) -> (f64, f64) {
    parse_point(lat, lng).unwrap_or(DEFAULT_CENTER)
}

/// Formats a map click for the draft.
pub fn click_to_draft(lat: f64, lng: f64) -> (String, String) {
    (format_coordinate(lat), format_coordinate(lng))
}

/// Decides whether an externally supplied point should move the marker.
///
/// Returns the new marker position when the incoming coordinates are valid and
/// differ from the marker the map currently shows.
pub fn marker_update(current: Option<(f64, f64)>, lat: &str, lng: &str) -> Option<(f64, f64)> {
    let incoming = parse_point(lat, lng).ok()?;
    match current {
        Some(shown) if same_point(shown, incoming) => None,
        _ => Some(incoming),
    }
}

/// A marker position the selector should apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerMove {
    pub point: (f64, f64),
    /// Pan the map so the point is visible. Only for points the user did not
    /// just click on.
    pub recenter: bool,
}

/// The user clicked the map; the point is already in view.
pub fn click_move(lat: f64, lng: f64) -> MarkerMove {
    MarkerMove {
        point: (lat, lng),
        recenter: false,
    }
}

/// The draft's coordinates changed. A click echoed back through the props
/// yields `None`; a point from anywhere else moves and recenters the map.
pub fn external_move(current: Option<(f64, f64)>, lat: &str, lng: &str) -> Option<MarkerMove> {
    marker_update(current, lat, lng).map(|point| MarkerMove {
        point,
        recenter: true,
    })
}

fn same_point(a: (f64, f64), b: (f64, f64)) -> bool {
    let eps = 0.5 * 10f64.powi(-(COORDINATE_DECIMALS as i32));
    (a.0 - b.0).abs() < eps && (a.1 - b.1).abs() < eps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_are_formatted_to_six_decimals() {
        assert_eq!(
            click_to_draft(50.4501234567, 30.5234),
            ("50.450123".to_string(), "30.523400".to_string())
        );
    }

    #[test]
    fn invalid_input_falls_back_to_default_center() {
        assert_eq!(center_for("", ""), DEFAULT_CENTER);
        assert_eq!(center_for("abc", "30.5"), DEFAULT_CENTER);
        assert_eq!(center_for("120", "30.5"), DEFAULT_CENTER);
        assert_eq!(center_for("50.45", "30.52"), (50.45, 30.52));
    }

    #[test]
    fn parse_reports_the_failing_component() {
        assert_eq!(parse_point("", "1"), Err(CoordError::Empty));
        assert_eq!(
            parse_point("x", "1"),
            Err(CoordError::NotANumber("x".to_string()))
        );
        assert_eq!(
            parse_point("10", "200"),
            Err(CoordError::LongitudeOutOfRange(200.0))
        );
    }

    #[test]
    fn marker_moves_only_for_new_valid_points() {
        assert_eq!(marker_update(None, "50.5", "30.2"), Some((50.5, 30.2)));
        assert_eq!(marker_update(Some((50.5, 30.2)), "50.500000", "30.200000"), None);
        assert_eq!(marker_update(Some((50.5, 30.2)), "", ""), None);
        assert_eq!(
            marker_update(Some((50.5, 30.2)), "49.8397", "24.0297"),
            Some((49.8397, 24.0297))
        );
    }

    #[test]
    fn only_external_points_recenter_the_map() {
        let clicked = click_move(50.4501234567, 30.5234);
        assert!(!clicked.recenter);

        let (lat, lng) = click_to_draft(50.4501234567, 30.5234);
        assert_eq!(external_move(Some(clicked.point), &lat, &lng), None);

        assert_eq!(
            external_move(Some(clicked.point), "51.4982", "31.2893"),
            Some(MarkerMove {
                point: (51.4982, 31.2893),
                recenter: true,
            })
        );
        assert_eq!(external_move(None, "", "31.2893"), None);
    }
}
