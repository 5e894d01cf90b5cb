//! API Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod countries;
pub mod dashboard;
pub mod dataset;
pub mod health;
pub mod page;
