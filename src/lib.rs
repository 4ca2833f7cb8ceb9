//! Club Events - Event registration and access-control engine
//!
//! Decides which club events a member may see and register for, and runs
//! registration, capacity, waitlisting, and cancellation with refunds.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
