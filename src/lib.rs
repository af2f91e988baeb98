//! Ethernet PHY Detection for HiSilicon SoCs
//!
//! A `no_std`, no-alloc detection core that identifies the Ethernet PHY
//! attached to a HiSilicon-style SoC by driving the chip's MDIO
//! station-management controller, then reports the PHY's electrical
//! interface mode and identity.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! 1. **Detection Layer** ([`detect`]): the [`PhyDetector`] orchestrator
//! 2. **Engine Layer** ([`hal::mdio`]): the poll/command/poll/read MDIO
//!    handshake
//! 3. **Register Layer** ([`register`]): per-generation register maps as
//!    explicit shift/mask constants
//!
//! Three collaborators are supplied by the caller rather than implemented
//! here: raw register access ([`RegisterBus`]), the running chip generation
//! ([`ChipGeneration`], from whatever chip-identification the platform
//! has), and the report sink ([`ParamSink`]).
//!
//! # Failure Model
//!
//! Detection never fails as a whole. Missing controllers, busy engines,
//! unreadable registers and unmapped strap codes each skip their own step;
//! the run reports whatever it could determine. Failures are explicit
//! `Err`/`None` values end to end: no sentinel register values, no zero
//! readings standing in for errors.
//!
//! # Features
//!
//! - `defmt`: diagnostic output and `defmt::Format` derives on public types
//!
//! # Example
//!
//! ```ignore
//! use hisi_ethdetect::{ChipGeneration, PhyDetector};
//!
//! // Your physical register access (e.g. a /dev/mem mapping) and delay
//! let mut bus = /* impl RegisterBus */;
//! let mut delay = /* impl embedded_hal::delay::DelayNs */;
//! let mut sink = /* impl ParamSink, feeding your report serializer */;
//!
//! PhyDetector::new(ChipGeneration::V3).run(&mut bus, &mut delay, &mut sink);
//! ```

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::similar_names,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports
)]

// =============================================================================
// Modules
// =============================================================================

pub mod detect;
pub mod error;
pub mod generation;
pub mod hal;
pub mod register;
pub mod report;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use detect::{
    PARAM_D_MDIO_PHYADDR, PARAM_PHY_ID, PARAM_PHY_MODE, PARAM_U_MDIO_PHYADDR, PhyDetector,
};
pub use error::{AccessError, AccessResult, MdioError, MdioResult};
pub use generation::{ChipGeneration, PhyMode, StrapRegister};
pub use hal::bus::RegisterBus;
pub use hal::mdio::{MdioController, PollConfig};
pub use report::{ParamSink, ParamValue};
