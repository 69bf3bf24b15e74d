//! Receivers for recoverable decode faults.

use crate::DecodeFault;

/// Callback trait for recoverable per-entry decode faults.
///
/// A sink observes faults; it cannot abort the traversal. Any
/// `FnMut(&DecodeFault)` closure is a sink.
///
/// # Examples
///
/// ```
/// use nestarch_core::DecodeFault;
/// use nestarch_core::FaultSink;
///
/// struct CountingSink(usize);
///
/// impl FaultSink for CountingSink {
///     fn on_decode_fault(&mut self, _fault: &DecodeFault) {
///         self.0 += 1;
///     }
/// }
///
/// let mut sink = CountingSink(0);
/// sink.on_decode_fault(&DecodeFault::new("outer.zip", 1, "bad header"));
/// assert_eq!(sink.0, 1);
/// ```
pub trait FaultSink {
    /// Called once for every entry header that failed to decode.
    fn on_decode_fault(&mut self, fault: &DecodeFault);
}

impl<F> FaultSink for F
where
    F: FnMut(&DecodeFault),
{
    fn on_decode_fault(&mut self, fault: &DecodeFault) {
        self(fault);
    }
}

/// Sink that drops every fault.
///
/// Used when the caller supplies no sink: faults are tolerated silently up to
/// the retry bound.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl FaultSink for NoopSink {
    fn on_decode_fault(&mut self, _fault: &DecodeFault) {}
}
