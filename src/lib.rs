#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! A terminal form for periodic reports.
//!
//! The [`controller`] holds all form behavior; [`tui`] is the terminal front
//! end and [`transport`] talks to the backend.

pub mod config;
pub mod controller;
pub mod logging;
pub mod model;
pub mod storage;
pub mod transport;
pub mod tui;
