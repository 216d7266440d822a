pub mod clock;
pub mod geocode;
pub mod geolocation;
pub mod identity;
pub mod notify;
pub mod storage;
