//! Geographic-consistency check between a selected city and a selected
//! lodging place, run before any write that includes both.

use crate::types::PlaceGeoData;

/// Maximum great-circle distance for a lodging place to be considered
/// "within" a selected city, in kilometers.
pub const CONTAINMENT_RADIUS_KM: f64 = 50.0;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// How containment is decided. Both strategies are first-class; the caller
/// picks one at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoStrategy {
    /// Country must match (case-insensitive) and the lodging locality, when
    /// present, must match the city locality.
    #[default]
    ComponentMatch,
    /// Haversine distance between the two coordinate pairs must be within
    /// [`CONTAINMENT_RADIUS_KM`].
    Radius,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// One of the places lacks the data the chosen strategy needs. The
    /// write must be rejected, never silently coerced.
    #[error("could not verify geographic data for the selected places")]
    Unverifiable,

    #[error("the selected address does not appear to be within {city}")]
    OutsideArea { city: String },
}

/// Decide whether `secondary` (the selected lodging) lies within `primary`
/// (the selected city).
pub fn check_containment(
    primary: &PlaceGeoData,
    secondary: &PlaceGeoData,
    strategy: GeoStrategy,
) -> Result<(), GeoError> {
    match strategy {
        GeoStrategy::ComponentMatch => component_match(primary, secondary),
        GeoStrategy::Radius => radius_check(primary, secondary),
    }
}

fn component_match(primary: &PlaceGeoData, secondary: &PlaceGeoData) -> Result<(), GeoError> {
    if primary.country.trim().is_empty() || secondary.country.trim().is_empty() {
        return Err(GeoError::Unverifiable);
    }

    let country_matches = primary.country.eq_ignore_ascii_case(&secondary.country);
    // An empty lodging locality is permissive: the country match decides.
    let locality_matches = secondary.locality.trim().is_empty()
        || secondary.locality.eq_ignore_ascii_case(&primary.locality);

    if country_matches && locality_matches {
        Ok(())
    } else {
        Err(GeoError::OutsideArea {
            city: display_name(primary),
        })
    }
}

fn radius_check(primary: &PlaceGeoData, secondary: &PlaceGeoData) -> Result<(), GeoError> {
    let (Some(lat1), Some(lng1)) = (primary.lat, primary.lng) else {
        return Err(GeoError::Unverifiable);
    };
    let (Some(lat2), Some(lng2)) = (secondary.lat, secondary.lng) else {
        return Err(GeoError::Unverifiable);
    };

    if haversine_km(lat1, lng1, lat2, lng2) <= CONTAINMENT_RADIUS_KM {
        Ok(())
    } else {
        Err(GeoError::OutsideArea {
            city: display_name(primary),
        })
    }
}

/// Great-circle distance between two coordinate pairs, in kilometers.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

fn display_name(place: &PlaceGeoData) -> String {
    if place.name.trim().is_empty() {
        "the selected city".to_string()
    } else {
        place.name.clone()
    }
}
