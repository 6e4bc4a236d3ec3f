pub mod components;
pub mod date_utils;
pub mod location;
