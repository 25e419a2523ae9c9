#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analytics over the reference snapshot.
//!
//! Everything here is a pure function of the reference tables it is
//! given. [`window`] derives the visible part of the temporal series and
//! [`overview`] computes the headline figures. [`distribution`] feeds the
//! hourly, monthly and severity cards, and [`clusters`] backs the
//! geospatial cluster explorer. No function holds state between calls.

pub mod clusters;
pub mod distribution;
pub mod overview;
pub mod window;
