pub mod access;
pub mod core;
pub mod currency;
pub mod fields;
pub mod geo;
pub mod grades;
pub mod session;
pub mod setup;
