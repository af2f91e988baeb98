//! MDIO Transaction Engine
//!
//! Drives the station-management handshake against one MDIO controller
//! instance: poll for ready, issue the command word, poll for completion,
//! collect the result. The hardware offers no interrupt for this, so the
//! engine busy-waits with a bounded poll budget; the bound is the only
//! cancellation mechanism.
//!
//! All register traffic goes through the caller's
//! [`RegisterBus`](crate::hal::bus::RegisterBus); the inter-poll sleep goes
//! through the caller's `DelayNs`. Both seams exist so the engine runs
//! unchanged against real hardware or a simulated controller.

use embedded_hal::delay::DelayNs;

use crate::error::{AccessResult, MdioError, MdioResult};
use crate::hal::bus::RegisterBus;
use crate::register::mdio::{
    D_MDIO_PHYADDR_OFFSET, D_MDIO_RO_STAT_OFFSET, MDIO_RO_DATA_OFFSET, MDIO_RWCTRL_OFFSET,
    RwCtrl, U_MDIO_PHYADDR_OFFSET, U_MDIO_RO_STAT_OFFSET,
};

// =============================================================================
// Poll Configuration
// =============================================================================

/// Default ready-bit poll budget
pub const MDIO_MAX_POLLS: u32 = 1000;

/// Default sleep between ready-bit polls in microseconds
pub const MDIO_POLL_INTERVAL_US: u32 = 1;

/// Bounds for the ready-bit busy-wait
///
/// Worst-case blocking time is `max_polls * interval_us` (nominally 1 ms),
/// though wall-clock cost is dominated by the delay provider's granularity.
/// Tests shrink the budget to keep simulated timeouts cheap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PollConfig {
    /// Maximum number of ready-bit polls before giving up
    pub max_polls: u32,
    /// Sleep between polls in microseconds
    pub interval_us: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_polls: MDIO_MAX_POLLS,
            interval_us: MDIO_POLL_INTERVAL_US,
        }
    }
}

impl PollConfig {
    /// Create a poll configuration with an explicit budget and interval
    pub const fn new(max_polls: u32, interval_us: u32) -> Self {
        Self {
            max_polls,
            interval_us,
        }
    }
}

// =============================================================================
// MDIO Controller
// =============================================================================

/// MDIO transaction engine bound to one controller base address
///
/// The controller is a singleton hardware resource with no internal locking;
/// one engine at a time, never interleaved with another MDIO user.
#[derive(Debug)]
pub struct MdioController<'a, B: RegisterBus, D: DelayNs> {
    bus: &'a mut B,
    delay: &'a mut D,
    base: u32,
    poll: PollConfig,
}

impl<'a, B: RegisterBus, D: DelayNs> MdioController<'a, B, D> {
    /// Create an engine with the default poll bounds
    pub fn new(bus: &'a mut B, delay: &'a mut D, base: u32) -> Self {
        Self {
            bus,
            delay,
            base,
            poll: PollConfig::default(),
        }
    }

    /// Create an engine with custom poll bounds
    pub fn with_poll_config(bus: &'a mut B, delay: &'a mut D, base: u32, poll: PollConfig) -> Self {
        Self {
            bus,
            delay,
            base,
            poll,
        }
    }

    /// The poll bounds in effect
    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    fn reg(&self, offset: u32) -> u32 {
        self.base + offset
    }

    // -------------------------------------------------------------------------
    // Status observation (read-only paths)
    // -------------------------------------------------------------------------

    /// Read-only observation of the finish/ready bit.
    ///
    /// An unreadable control register counts as not-ready; an unclocked or
    /// absent controller looks permanently busy rather than spuriously done.
    pub fn is_ready(&mut self) -> bool {
        match self.bus.read(self.reg(MDIO_RWCTRL_OFFSET)) {
            Ok(word) => RwCtrl(word).finish(),
            Err(_) => false,
        }
    }

    /// Poll the ready bit until it is observed or the budget runs out.
    ///
    /// Decrements a counter per failed poll, sleeping the configured
    /// interval in between. Returns the remaining count; `0` means the
    /// ready bit was never observed (a zero budget always reports that).
    pub fn wait_ready(&mut self) -> u32 {
        let mut remaining = self.poll.max_polls;
        while remaining > 0 {
            remaining -= 1;
            if remaining == 0 || self.is_ready() {
                break;
            }
            self.delay.delay_us(self.poll.interval_us);
        }
        remaining
    }

    /// Read back the MDC clock divider currently programmed in the control
    /// register, for reuse when composing commands.
    pub fn clock_divider(&mut self) -> AccessResult<u8> {
        let word = self.bus.read(self.reg(MDIO_RWCTRL_OFFSET))?;
        Ok(RwCtrl(word).frq_dv())
    }

    /// Initiator PHY address register (`U_MDIO_PHYADDR`)
    pub fn local_phy_addr(&mut self) -> AccessResult<u32> {
        self.bus.read(self.reg(U_MDIO_PHYADDR_OFFSET))
    }

    /// Target PHY address register (`D_MDIO_PHYADDR`)
    pub fn remote_phy_addr(&mut self) -> AccessResult<u32> {
        self.bus.read(self.reg(D_MDIO_PHYADDR_OFFSET))
    }

    /// Initiator MDIO status register (`U_MDIO_RO_STAT`)
    pub fn local_status(&mut self) -> AccessResult<u32> {
        self.bus.read(self.reg(U_MDIO_RO_STAT_OFFSET))
    }

    /// Target MDIO status register (`D_MDIO_RO_STAT`)
    pub fn remote_status(&mut self) -> AccessResult<u32> {
        self.bus.read(self.reg(D_MDIO_RO_STAT_OFFSET))
    }

    // -------------------------------------------------------------------------
    // Command issue and result collection
    // -------------------------------------------------------------------------

    /// Compose and issue a read command, triggering the hardware read cycle.
    pub fn start_read(&mut self, frq_dv: u8, phy_addr: u8, regnum: u8) -> AccessResult<()> {
        let word = RwCtrl::read_command(frq_dv as u32, phy_addr as u32, regnum as u32);
        self.bus.write(self.reg(MDIO_RWCTRL_OFFSET), word.raw())
    }

    /// Compose and issue a write command carrying `value`.
    pub fn start_write(
        &mut self,
        frq_dv: u8,
        phy_addr: u8,
        regnum: u8,
        value: u16,
    ) -> AccessResult<()> {
        let word = RwCtrl::write_command(frq_dv as u32, phy_addr as u32, regnum as u32, value);
        self.bus.write(self.reg(MDIO_RWCTRL_OFFSET), word.raw())
    }

    /// Read the result register of a completed read cycle, masked to the
    /// 16 bits the PHY actually returned.
    pub fn read_result(&mut self) -> AccessResult<u16> {
        let word = self.bus.read(self.reg(MDIO_RO_DATA_OFFSET))?;
        Ok((word & 0xFFFF) as u16)
    }

    // -------------------------------------------------------------------------
    // Full transactions
    // -------------------------------------------------------------------------

    /// One complete MDIO read transaction.
    ///
    /// Pre-check poll (`Busy` on timeout), command issue, post-check poll
    /// (`Timeout` on timeout), result collection. Register primitive
    /// failures surface as [`MdioError::Access`].
    pub fn read(&mut self, frq_dv: u8, phy_addr: u8, regnum: u8) -> MdioResult<u16> {
        if self.wait_ready() == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("mdio busy");
            return Err(MdioError::Busy);
        }

        self.start_read(frq_dv, phy_addr, regnum)?;

        if self.wait_ready() == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("mdio read timeout");
            return Err(MdioError::Timeout);
        }

        let val = self.read_result()?;

        #[cfg(feature = "defmt")]
        defmt::trace!("phy_addr = {}, regnum = {}, val = {:#06x}", phy_addr, regnum, val);

        Ok(val)
    }

    /// One complete MDIO write transaction, same handshake as [`Self::read`]
    /// with the payload carried in the command word.
    pub fn write(&mut self, frq_dv: u8, phy_addr: u8, regnum: u8, value: u16) -> MdioResult<()> {
        if self.wait_ready() == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("mdio busy");
            return Err(MdioError::Busy);
        }

        self.start_write(frq_dv, phy_addr, regnum, value)?;

        if self.wait_ready() == 0 {
            #[cfg(feature = "defmt")]
            defmt::warn!("mdio write timeout");
            return Err(MdioError::Timeout);
        }

        Ok(())
    }
}

// =============================================================================
// PHY Register Definitions (IEEE 802.3 standard registers)
// =============================================================================

/// Standard PHY register addresses (IEEE 802.3 Clause 22)
pub mod phy_reg {
    /// Basic Mode Control Register
    pub const BMCR: u8 = 0;
    /// Basic Mode Status Register
    pub const BMSR: u8 = 1;
    /// PHY Identifier 1
    pub const PHYIDR1: u8 = 2;
    /// PHY Identifier 2
    pub const PHYIDR2: u8 = 3;
}

// =============================================================================
// Unit Tests
// =============================================================================
