//! Memory-mapped register definitions
//!
//! Layouts for the two register families the detector touches:
//!
//! - [`mdio`]: the MDIO station-management controller block (control word,
//!   result data, PHY address and status registers)
//! - [`strap`]: the per-generation peripheral control words holding the
//!   PHY-mode hardware straps
//!
//! All layouts are expressed as explicit shift/mask constants applied with
//! plain integer arithmetic, so decoding is deterministic regardless of
//! compiler bit-field packing or host byte order. Actual access goes through
//! the caller-supplied [`RegisterBus`](crate::hal::bus::RegisterBus)
//! primitive; nothing in this module touches memory.

pub mod mdio;
pub mod strap;
