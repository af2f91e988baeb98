//! Detection Report Output
//!
//! The detector does not serialize anything itself; it hands each detected
//! parameter, in detection order, to a caller-supplied [`ParamSink`]. The
//! external serializer is expected to group the parameters under an
//! "ethernet" section of whatever report format it produces.
//!
//! Every value carries its own wire formatting through [`ParamValue`]'s
//! `Display` impl, so sinks can render without knowing which parameter is
//! which.

use crate::generation::PhyMode;

// =============================================================================
// Parameter Values
// =============================================================================

/// A detected parameter value together with its report formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParamValue {
    /// Rendered as a decimal integer
    Int(u32),
    /// Rendered as `0x` followed by exactly 8 lowercase hex digits
    Hex32(u32),
    /// Rendered as bare lowercase hex, no prefix, no padding
    Hex(u32),
    /// Rendered as the interface mode string
    Mode(PhyMode),
}

impl core::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Hex32(v) => write!(f, "{:#010x}", v),
            ParamValue::Hex(v) => write!(f, "{:x}", v),
            ParamValue::Mode(m) => f.write_str(m.as_str()),
        }
    }
}

// =============================================================================
// Parameter Sink
// =============================================================================

/// Trait for the structured output sink accumulating detected parameters
///
/// Parameters arrive in detection order; the sink owns ordering, grouping
/// and eventual serialization. A detection run only ever adds parameters it
/// could actually determine.
pub trait ParamSink {
    /// Record one detected parameter
    fn add_param(&mut self, name: &'static str, value: ParamValue);
}

impl<S: ParamSink + ?Sized> ParamSink for &mut S {
    fn add_param(&mut self, name: &'static str, value: ParamValue) {
        (**self).add_param(name, value);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
