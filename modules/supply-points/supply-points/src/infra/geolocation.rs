use async_trait::async_trait;

use crate::domain::ports::{GeolocationError, Geolocator, Position};

/// A device with a known position, no positioning, or a refused prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum FixedGeolocator {
    At(Position),
    Unsupported,
    Denied,
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<Position, GeolocationError> {
        match self {
            Self::At(position) => Ok(*position),
            Self::Unsupported => Err(GeolocationError::Unsupported),
            Self::Denied => Err(GeolocationError::PermissionDenied),
        }
    }
}

impl From<Option<Position>> for FixedGeolocator {
    fn from(position: Option<Position>) -> Self {
        position.map_or(Self::Unsupported, Self::At)
    }
}
