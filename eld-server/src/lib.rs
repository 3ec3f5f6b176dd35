//! ELD daily log server.
//!
//! Takes a trip request, asks the planning service for a route and an
//! hours-of-service schedule, and shows the result as a route map and one
//! FMCSA-style duty-status log sheet per day, downloadable as a PDF.

pub mod cache;
pub mod config;
pub mod domain;
pub mod export;
pub mod map;
pub mod planner;
pub mod render;
pub mod web;
