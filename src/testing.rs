//! Testing utilities and mock implementations
//!
//! Mock implementations for exercising the detection core on the host
//! without hardware access: a register bus with a small simulated MDIO
//! controller behind it, a delay that records requested sleeps, and a sink
//! that captures parameters in order.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::string::{String, ToString};
use std::vec::Vec;

use crate::error::{AccessError, AccessResult};
use crate::hal::bus::RegisterBus;
use crate::register::mdio::{MDIO_RO_DATA_OFFSET, MDIO_RWCTRL_OFFSET, RwCtrl};
use crate::report::{ParamSink, ParamValue};

// =============================================================================
// Mock Register Bus
// =============================================================================

/// Mock register bus with a simulated MDIO controller at a fixed base
///
/// Plain addresses behave like a sparse register file (reads default to 0,
/// writes stick). The two controller words are modeled: status reads report
/// the configured ready behavior and clock divider, and command writes are
/// decoded, logged, and applied to a separate PHY register space.
///
/// # Example
///
/// ```ignore
/// let mut bus = MockRegisterBus::new(0x1009_0000);
/// bus.set_phy_register(5, 0x02, 0x0042);
///
/// let mut mdio = MdioController::new(&mut bus, &mut delay, 0x1009_0000);
/// assert_eq!(mdio.read(0, 5, 0x02).unwrap(), 0x0042);
/// ```
#[derive(Debug)]
pub struct MockRegisterBus {
    /// MDIO controller base address being simulated
    base: u32,
    /// Plain register values: address -> value
    registers: RefCell<HashMap<u32, u32>>,
    /// PHY register space behind the MDIO controller: (phy_addr, regnum) -> value
    phy_regs: RefCell<HashMap<(u8, u8), u16>>,
    /// Decoded control words in issue order
    commands: RefCell<Vec<RwCtrl>>,
    /// Record of raw writes: (address, value)
    write_log: RefCell<Vec<(u32, u32)>>,
    /// Current finish/ready bit
    ready: RefCell<bool>,
    /// Status reads left before the ready bit flips on
    ready_after_polls: RefCell<Option<u32>>,
    /// Whether a command makes the controller go permanently quiet
    hang_after_command: RefCell<bool>,
    /// Clock divider reported in status reads
    frq_dv: RefCell<u8>,
    /// Raw result register content
    ro_data: RefCell<u32>,
    /// Addresses whose access fails
    fail_addrs: RefCell<HashSet<u32>>,
    /// Whether every write fails
    fail_all_writes: RefCell<bool>,
}

impl MockRegisterBus {
    /// Create a mock bus simulating an MDIO controller at `base`.
    ///
    /// The controller starts out idle: ready bit set, divider 0.
    pub fn new(base: u32) -> Self {
        Self {
            base,
            registers: RefCell::new(HashMap::new()),
            phy_regs: RefCell::new(HashMap::new()),
            commands: RefCell::new(Vec::new()),
            write_log: RefCell::new(Vec::new()),
            ready: RefCell::new(true),
            ready_after_polls: RefCell::new(None),
            hang_after_command: RefCell::new(false),
            frq_dv: RefCell::new(0),
            ro_data: RefCell::new(0),
            fail_addrs: RefCell::new(HashSet::new()),
            fail_all_writes: RefCell::new(false),
        }
    }

    /// Set a plain register value
    pub fn set_register(&self, addr: u32, value: u32) {
        self.registers.borrow_mut().insert(addr, value);
    }

    /// Set a PHY register reachable through MDIO read transactions
    pub fn set_phy_register(&self, phy_addr: u8, regnum: u8, value: u16) {
        self.phy_regs.borrow_mut().insert((phy_addr, regnum), value);
    }

    /// Current value of a PHY register (for verifying MDIO writes)
    pub fn phy_register(&self, phy_addr: u8, regnum: u8) -> Option<u16> {
        self.phy_regs.borrow().get(&(phy_addr, regnum)).copied()
    }

    /// Force the ready bit
    pub fn set_ready(&self, ready: bool) {
        *self.ready.borrow_mut() = ready;
        *self.ready_after_polls.borrow_mut() = None;
    }

    /// Report not-ready for the next `polls` status reads, then ready
    pub fn set_ready_after_polls(&self, polls: u32) {
        *self.ready.borrow_mut() = false;
        *self.ready_after_polls.borrow_mut() = Some(polls);
    }

    /// Accept the next command, then never report ready again
    pub fn hang_after_command(&self) {
        *self.hang_after_command.borrow_mut() = true;
    }

    /// Set the clock divider reported by status reads
    pub fn set_clock_divider(&self, frq_dv: u8) {
        *self.frq_dv.borrow_mut() = frq_dv;
    }

    /// Set the raw result register content (upper bits included)
    pub fn set_result_raw(&self, value: u32) {
        *self.ro_data.borrow_mut() = value;
    }

    /// Make accesses to one address fail
    pub fn fail_address(&self, addr: u32) {
        self.fail_addrs.borrow_mut().insert(addr);
    }

    /// Make every write fail
    pub fn fail_writes(&self) {
        *self.fail_all_writes.borrow_mut() = true;
    }

    /// Decoded control words in issue order
    pub fn commands(&self) -> Vec<RwCtrl> {
        self.commands.borrow().clone()
    }

    /// All raw writes that have been made
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.write_log.borrow().clone()
    }

    fn status_word(&self) -> u32 {
        let mut after = self.ready_after_polls.borrow_mut();
        if let Some(polls) = *after {
            if polls == 0 {
                *self.ready.borrow_mut() = true;
                *after = None;
            } else {
                *after = Some(polls - 1);
            }
        }
        drop(after);

        RwCtrl::compose(
            0,
            *self.ready.borrow(),
            false,
            0,
            *self.frq_dv.borrow() as u32,
            0,
        )
        .raw()
    }

    fn handle_command(&self, value: u32) {
        let cmd = RwCtrl(value);
        self.commands.borrow_mut().push(cmd);

        if *self.hang_after_command.borrow() {
            *self.ready.borrow_mut() = false;
            *self.ready_after_polls.borrow_mut() = None;
            return;
        }

        let key = (cmd.phy_exaddr(), cmd.phy_inaddr());
        if cmd.is_write() {
            self.phy_regs.borrow_mut().insert(key, cmd.cpu_data());
        } else {
            let val = self.phy_regs.borrow().get(&key).copied().unwrap_or(0);
            *self.ro_data.borrow_mut() = val as u32;
        }
    }
}

impl RegisterBus for MockRegisterBus {
    fn read(&mut self, addr: u32) -> AccessResult<u32> {
        if self.fail_addrs.borrow().contains(&addr) {
            return Err(AccessError);
        }
        if addr == self.base + MDIO_RWCTRL_OFFSET {
            return Ok(self.status_word());
        }
        if addr == self.base + MDIO_RO_DATA_OFFSET {
            return Ok(*self.ro_data.borrow());
        }
        Ok(self.registers.borrow().get(&addr).copied().unwrap_or(0))
    }

    fn write(&mut self, addr: u32, value: u32) -> AccessResult<()> {
        if *self.fail_all_writes.borrow() || self.fail_addrs.borrow().contains(&addr) {
            return Err(AccessError);
        }
        self.write_log.borrow_mut().push((addr, value));

        if addr == self.base + MDIO_RWCTRL_OFFSET {
            self.handle_command(value);
            return Ok(());
        }
        self.registers.borrow_mut().insert(addr, value);
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }

    /// Get total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns() / 1_000
    }

    /// Reset the delay counter
    pub fn reset(&self) {
        *self.total_ns.borrow_mut() = 0;
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
    }
}

// =============================================================================
// Recording Sink
// =============================================================================

/// Parameter sink capturing everything it is handed, in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Captured parameters in arrival order
    pub params: Vec<(&'static str, ParamValue)>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameter names in arrival order
    pub fn names(&self) -> Vec<&'static str> {
        self.params.iter().map(|(name, _)| *name).collect()
    }

    /// Look up a captured parameter by name
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.params
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
    }

    /// Render every captured parameter the way a serializer would
    pub fn rendered(&self) -> Vec<(&'static str, String)> {
        self.params
            .iter()
            .map(|(name, value)| (*name, value.to_string()))
            .collect()
    }
}

impl ParamSink for RecordingSink {
    fn add_param(&mut self, name: &'static str, value: ParamValue) {
        self.params.push((name, value));
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use embedded_hal::delay::DelayNs;

    use super::*;

    #[test]
    fn mock_bus_plain_registers() {
        let mut bus = MockRegisterBus::new(0x1009_0000);

        // Unmapped addresses read as 0
        assert_eq!(bus.read(0x2003_0002).unwrap(), 0);

        bus.set_register(0x2003_0002, 0x8);
        assert_eq!(bus.read(0x2003_0002).unwrap(), 0x8);

        bus.write(0x2003_0002, 0x9).unwrap();
        assert_eq!(bus.read(0x2003_0002).unwrap(), 0x9);
        assert_eq!(bus.writes(), std::vec![(0x2003_0002, 0x9)]);
    }

    #[test]
    fn mock_bus_status_word_reflects_ready_and_divider() {
        let mut bus = MockRegisterBus::new(0x1009_0000);
        bus.set_clock_divider(0x5);

        let word = RwCtrl(bus.read(0x1009_1100).unwrap());
        assert!(word.finish());
        assert_eq!(word.frq_dv(), 0x5);

        bus.set_ready(false);
        let word = RwCtrl(bus.read(0x1009_1100).unwrap());
        assert!(!word.finish());
    }

    #[test]
    fn mock_bus_read_command_latches_result() {
        let mut bus = MockRegisterBus::new(0x1009_0000);
        bus.set_phy_register(5, 0x03, 0x0012);

        let cmd = RwCtrl::read_command(0, 5, 0x03);
        bus.write(0x1009_1100, cmd.raw()).unwrap();

        assert_eq!(bus.read(0x1009_1104).unwrap(), 0x0012);
        assert_eq!(bus.commands().len(), 1);
    }

    #[test]
    fn mock_bus_failing_address() {
        let mut bus = MockRegisterBus::new(0x1009_0000);
        bus.fail_address(0x2003_0002);

        assert!(bus.read(0x2003_0002).is_err());
        assert!(bus.write(0x2003_0002, 1).is_err());
        assert!(bus.read(0x2003_0003).is_ok());
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        delay.delay_ns(1000);
        delay.delay_us(2);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_us(), 3);

        delay.reset();
        assert_eq!(delay.total_ns(), 0);
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        sink.add_param("u-mdio-phyaddr", ParamValue::Int(5));
        sink.add_param("phy-id", ParamValue::Hex32(0x0042_0012));

        assert_eq!(sink.names(), std::vec!["u-mdio-phyaddr", "phy-id"]);
        assert_eq!(sink.get("phy-id"), Some(ParamValue::Hex32(0x0042_0012)));
        assert_eq!(sink.get("phy-mode"), None);
        assert_eq!(
            sink.rendered()[1],
            ("phy-id", std::string::String::from("0x00420012"))
        );
    }
}
