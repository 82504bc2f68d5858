//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types used across the app (kernel-facing).
//! - `adapters`: filesystem and runtime implementations (IO/async).

pub mod adapters;
pub mod ports;
