//! Map links derived from a point's coordinate text.
//!
//! Pure string building with no failure path: a non-numeric token shows up
//! as `NaN` in the bounding box, exactly like a broken embed would.

use serde::{Deserialize, Serialize};
use supply_points_sdk::PlusCode;

/// Half-width of the embedded map's bounding box, in degrees.
pub const BBOX_DELTA: f64 = 0.005;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub embed_base: String,
    pub osm_base: String,
    pub directions_base: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            embed_base: "https://www.openstreetmap.org/export/embed.html".to_owned(),
            osm_base: "https://www.openstreetmap.org".to_owned(),
            directions_base: "https://www.google.com/maps/dir/".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn around(lat: f64, lng: f64) -> Self {
        Self {
            west: lng - BBOX_DELTA,
            south: lat - BBOX_DELTA,
            east: lng + BBOX_DELTA,
            north: lat + BBOX_DELTA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapLinks {
    pub embed_url: String,
    pub osm_link: String,
    pub directions_url: String,
    pub coordinates_valid: bool,
}

impl MapLinks {
    #[must_use]
    pub fn derive(config: &MapConfig, code: &PlusCode) -> Self {
        let (lat_token, lng_token) = code.split();
        let coords = code.coordinates();
        let bbox = BoundingBox::around(coords.lat, coords.lng);
        let lat = urlencoding::encode(lat_token);
        let lng = urlencoding::encode(lng_token);

        let embed_url = format!(
            "{}?bbox={}%2C{}%2C{}%2C{}&layer=mapnik&marker={lat}%2C{lng}",
            config.embed_base, bbox.west, bbox.south, bbox.east, bbox.north
        );
        let osm_link = format!(
            "{}/?mlat={lat}&mlon={lng}#map=18/{lat}/{lng}",
            config.osm_base.trim_end_matches('/')
        );
        let destination = format!("{lat_token},{lng_token}");
        let directions_url = format!(
            "{}?api=1&destination={}",
            config.directions_base,
            urlencoding::encode(&destination)
        );

        Self {
            embed_url,
            osm_link,
            directions_url,
            coordinates_valid: code.is_well_formed(),
        }
    }
}
