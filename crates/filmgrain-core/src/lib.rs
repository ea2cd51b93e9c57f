pub mod asset;
pub mod config;
pub mod consts;
pub mod error;
pub mod params;
pub mod session;
pub mod transport;
