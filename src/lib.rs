//! Shopradar - geo-ranking service for car damage assessment and repair shop discovery
//!
//! This library provides the ranking core shared by every screen that lists
//! points of interest, plus the HTTP clients for the external collaborators:
//! place search, IP geolocation, and the damage inference backend.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance_km, haversine_distance, rank};
pub use crate::models::{Coordinate, NearbyShopsResponse, RepairShop, SortCriterion};
