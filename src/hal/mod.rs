//! Hardware Access Layer
//!
//! This layer separates the detection logic from the machine it runs on:
//!
//! - [`bus`]: the [`RegisterBus`](bus::RegisterBus) trait, the single seam
//!   through which all physical register traffic flows. The implementation
//!   is supplied by the caller (a `/dev/mem` mapping on a hosted system, a
//!   direct volatile accessor on bare metal, a mock in tests).
//! - [`mdio`]: the MDIO transaction engine driving the station-management
//!   handshake over a [`RegisterBus`].
//!
//! # Delay Integration
//!
//! The engine paces its ready-bit poll through
//! `embedded_hal::delay::DelayNs`. Pass any delay implementation from your
//! HAL or OS layer; tests use a mock that only records the requested sleep.

pub mod bus;
pub mod mdio;

// Re-export commonly used types
pub use bus::RegisterBus;
pub use mdio::{MdioController, PollConfig};
