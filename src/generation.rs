//! Chip-Generation Register Maps
//!
//! The SoC family spans several hardware generations that moved both the
//! MDIO controller and the PHY-mode strap word around the address map, and
//! changed the strap encoding along the way. Each [`ChipGeneration`]
//! variant carries its own map; which variant is running is decided by an
//! external identification subsystem and passed in explicitly.
//!
//! Generations without an MDIO controller (or without a known strap word)
//! simply answer `None`; that is an expected configuration, not an error.

use crate::register::strap::{
    CRG51_MII_RMII_SHIFT, CRG51_MII_RMII_WIDTH, CRG59_PHY_SEL_SHIFT, CRG59_PHY_SEL_WIDTH,
    V1_PERI_CRG51_ADDR, V2A_PERI_CRG59_ADDR, V3A_PERI_CRG59_ADDR,
};

// =============================================================================
// PHY Interface Mode
// =============================================================================

/// Electrical interface mode between MAC and PHY, as sampled from the
/// hardware straps at reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PhyMode {
    /// Media Independent Interface
    Mii,
    /// Reduced Media Independent Interface
    Rmii,
    /// Gigabit or fast MII; the strap does not distinguish the two
    GmiiMii,
    /// Reduced Gigabit Media Independent Interface
    Rgmii,
}

impl PhyMode {
    /// The mode string as it appears in detection reports
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            PhyMode::Mii => "mii",
            PhyMode::Rmii => "rmii",
            PhyMode::GmiiMii => "gmii/mii",
            PhyMode::Rgmii => "rgmii",
        }
    }
}

impl core::fmt::Display for PhyMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Strap Register Map
// =============================================================================

/// Which encoding the strap field uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum StrapTable {
    /// Single-bit select: 0 = mii, 1 = rmii (V1)
    MiiRmii,
    /// Three-bit select: 0 = gmii/mii, 1 = rgmii, 4 = rmii (V2A/V3A)
    PhySelect,
}

/// Location and encoding of one generation's PHY-mode strap field
///
/// The surrounding word is read-only hardware strap state; only the field
/// described here is meaningful to the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StrapRegister {
    /// Physical address of the strap word
    pub addr: u32,
    /// Bit position of the strap field
    pub shift: u32,
    /// Width of the strap field in bits
    pub width: u32,
    table: StrapTable,
}

impl StrapRegister {
    /// Mask for the strap field after shifting
    pub const fn field_mask(&self) -> u32 {
        (1 << self.width) - 1
    }

    /// Extract the raw strap code from a register word
    pub const fn field(&self, raw: u32) -> u32 {
        (raw >> self.shift) & self.field_mask()
    }

    /// Decode a register word into an interface mode.
    ///
    /// Pure function of the generation's table and the raw word; unmapped
    /// codes yield `None`.
    pub const fn decode(&self, raw: u32) -> Option<PhyMode> {
        match self.table {
            StrapTable::MiiRmii => match self.field(raw) {
                0 => Some(PhyMode::Mii),
                _ => Some(PhyMode::Rmii),
            },
            StrapTable::PhySelect => match self.field(raw) {
                0 => Some(PhyMode::GmiiMii),
                1 => Some(PhyMode::Rgmii),
                4 => Some(PhyMode::Rmii),
                _ => None,
            },
        }
    }
}

// =============================================================================
// Chip Generations
// =============================================================================

/// Closed set of supported hardware generations
///
/// Supplied by the external chip-identification subsystem. Each variant
/// carries the register map the detector needs; nothing here is read from
/// ambient global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChipGeneration {
    /// First generation
    V1,
    /// Second generation
    V2,
    /// Second generation, A-series
    V2A,
    /// Third generation
    V3,
    /// Third generation, A-series
    V3A,
    /// Fourth generation, A-series
    V4A,
    /// Fourth generation
    V4,
}

impl ChipGeneration {
    /// Every supported generation, for exhaustive table checks
    pub const ALL: [ChipGeneration; 7] = [
        ChipGeneration::V1,
        ChipGeneration::V2,
        ChipGeneration::V2A,
        ChipGeneration::V3,
        ChipGeneration::V3A,
        ChipGeneration::V4A,
        ChipGeneration::V4,
    ];

    /// Physical base address of the MDIO controller, if this generation
    /// has one
    pub const fn mdio_base(self) -> Option<u32> {
        match self {
            ChipGeneration::V1 | ChipGeneration::V2 => Some(0x1009_0000),
            ChipGeneration::V3 => Some(0x1005_0000),
            ChipGeneration::V4A => Some(0x1001_0000),
            ChipGeneration::V4 => Some(0x1004_0000),
            ChipGeneration::V2A | ChipGeneration::V3A => None,
        }
    }

    /// Location and encoding of the PHY-mode strap, if known for this
    /// generation
    pub const fn strap_register(self) -> Option<StrapRegister> {
        match self {
            ChipGeneration::V1 => Some(StrapRegister {
                addr: V1_PERI_CRG51_ADDR,
                shift: CRG51_MII_RMII_SHIFT,
                width: CRG51_MII_RMII_WIDTH,
                table: StrapTable::MiiRmii,
            }),
            ChipGeneration::V2A => Some(StrapRegister {
                addr: V2A_PERI_CRG59_ADDR,
                shift: CRG59_PHY_SEL_SHIFT,
                width: CRG59_PHY_SEL_WIDTH,
                table: StrapTable::PhySelect,
            }),
            ChipGeneration::V3A => Some(StrapRegister {
                addr: V3A_PERI_CRG59_ADDR,
                shift: CRG59_PHY_SEL_SHIFT,
                width: CRG59_PHY_SEL_WIDTH,
                table: StrapTable::PhySelect,
            }),
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
