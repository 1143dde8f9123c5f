#![warn(missing_docs)]
//! A toolkit for synthetic aperture imaging from frequency-domain measurements
//!
//! A [`region::TargetRegion`] is cut into a regular grid and an
//! [`algorithms::ImagingAlgorithm`] sums the phase-compensated responses
//! of every sensor at every grid point. The
//! [`reconstructor::ImageReconstructor`] ties a region to the
//! measurements of one vertical slice.
pub mod algorithms;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod reconstructor;
pub mod region;
