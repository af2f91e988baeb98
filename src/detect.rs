//! Ethernet Detection Orchestrator
//!
//! Ties the pieces together for one detection run: select the register maps
//! for the running chip generation, drive the MDIO engine to identify the
//! attached PHY, read the interface-mode strap, and emit every parameter
//! that could be determined.
//!
//! Every failure along the way is soft. Whether a generation has no MDIO
//! controller or the controller never reports ready, only the affected step
//! is skipped (with a diagnostic where one is useful) and the run carries
//! on. The report simply contains fewer parameters when the hardware does
//! not cooperate.

use embedded_hal::delay::DelayNs;

use crate::generation::{ChipGeneration, PhyMode};
use crate::hal::bus::RegisterBus;
use crate::hal::mdio::{MdioController, PollConfig, phy_reg};
use crate::report::{ParamSink, ParamValue};

// =============================================================================
// Report Keys
// =============================================================================

/// Report key for the initiator PHY address (decimal)
pub const PARAM_U_MDIO_PHYADDR: &str = "u-mdio-phyaddr";
/// Report key for the composed 32-bit PHY identifier (`0x` + 8 hex digits)
pub const PARAM_PHY_ID: &str = "phy-id";
/// Report key for the raw target PHY address register (bare hex)
pub const PARAM_D_MDIO_PHYADDR: &str = "d-mdio-phyaddr";
/// Report key for the strap-selected interface mode
pub const PARAM_PHY_MODE: &str = "phy-mode";

// =============================================================================
// Detector
// =============================================================================

/// One-shot Ethernet PHY detector for a given chip generation
///
/// Construct per run; a run is self-contained and leaves no state behind.
/// The MDIO controller has no internal locking, so runs must not be
/// interleaved with any other MDIO user.
#[derive(Debug, Clone, Copy)]
pub struct PhyDetector {
    chip: ChipGeneration,
    poll: PollConfig,
}

impl PhyDetector {
    /// Create a detector for `chip` with the default poll bounds
    pub fn new(chip: ChipGeneration) -> Self {
        Self {
            chip,
            poll: PollConfig::default(),
        }
    }

    /// Override the ready-bit poll bounds
    #[must_use]
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Run detection, emitting every determinable parameter to `sink`.
    ///
    /// The strap-based mode check runs independently of the MDIO probe, so
    /// `phy-mode` can be reported even when the generation has no MDIO
    /// controller or the controller is dead.
    pub fn run<B, D, S>(&self, bus: &mut B, delay: &mut D, sink: &mut S)
    where
        B: RegisterBus,
        D: DelayNs,
        S: ParamSink,
    {
        if let Some(base) = self.chip.mdio_base() {
            self.probe_mdio(base, bus, delay, sink);
        }

        if let Some(mode) = self.phy_mode(bus) {
            sink.add_param(PARAM_PHY_MODE, ParamValue::Mode(mode));
        }
    }

    /// Read the PHY-mode strap for this generation.
    ///
    /// `None` when the generation has no known strap word, the word is
    /// unreadable, or the strap code is unmapped.
    pub fn phy_mode<B: RegisterBus>(&self, bus: &mut B) -> Option<PhyMode> {
        let strap = self.chip.strap_register()?;
        let raw = bus.read(strap.addr).ok()?;
        strap.decode(raw)
    }

    fn probe_mdio<B, D, S>(&self, base: u32, bus: &mut B, delay: &mut D, sink: &mut S)
    where
        B: RegisterBus,
        D: DelayNs,
        S: ParamSink,
    {
        let mut mdio = MdioController::with_poll_config(bus, delay, base, self.poll);

        // One read of the control word serves two purposes: it proves the
        // controller is reachable at all, and it recovers the MDC divider
        // already programmed by the boot stage.
        let frq_dv = match mdio.clock_divider() {
            Ok(div) => div,
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("mdio controller unreachable at {:#010x}", base);
                return;
            }
        };

        // The controller must report ready once before any of its registers
        // are worth trusting; a dead engine yields no MDIO parameters.
        if mdio.wait_ready() == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("mdio busy");
            return;
        }

        match mdio.local_phy_addr() {
            Ok(phy_addr) => {
                sink.add_param(PARAM_U_MDIO_PHYADDR, ParamValue::Int(phy_addr));

                let addr = (phy_addr & 0x1F) as u8;
                let id1 = mdio.read(frq_dv, addr, phy_reg::PHYIDR1);
                let id2 = mdio.read(frq_dv, addr, phy_reg::PHYIDR2);
                if let (Ok(id1), Ok(id2)) = (id1, id2) {
                    let phy_id = ((id1 as u32) << 16) | id2 as u32;
                    sink.add_param(PARAM_PHY_ID, ParamValue::Hex32(phy_id));
                }
                // Transaction failures were already logged by the engine;
                // the identifier is simply not reported.
            }
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("initiator phy address unreadable, skipping identifier");
            }
        }

        match mdio.remote_phy_addr() {
            Ok(value) => sink.add_param(PARAM_D_MDIO_PHYADDR, ParamValue::Hex(value)),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("target phy address unreadable");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
