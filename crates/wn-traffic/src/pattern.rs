//! The `TrafficPattern` trait — the seam to external traffic generators.

use crate::GeneratedPacket;

/// A packet generator attached to a traffic source.
///
/// On/off, FTP, VoIP, video and similar models live outside this crate and
/// plug in by implementing this trait.  The manager calls
/// [`generate`][Self::generate] exactly once per packet it emits.
///
/// # Example
///
/// ```rust,ignore
/// struct Poisson { rng: SmallRng, mean_gap_us: f64 }
///
/// impl TrafficPattern for Poisson {
///     fn generate(&mut self) -> Option<GeneratedPacket> {
///         let u: f64 = self.rng.r#gen();
///         let gap = -self.mean_gap_us * (1.0 - u).ln();
///         Some(GeneratedPacket { gap_us: gap, length: 512, payload: None })
///     }
/// }
/// ```
pub trait TrafficPattern {
    /// Produce the next packet and the gap until the one after it.
    ///
    /// Returning `None` retires the source: it is never invoked again.
    fn generate(&mut self) -> Option<GeneratedPacket>;

    /// Told once, at registration, whether the owning manager abstracts
    /// payloads away.  Generators that build expensive payloads should skip
    /// that work when `enabled` is `true`.
    ///
    /// Default: ignored (the manager strips payloads regardless).
    fn set_data_abstraction(&mut self, _enabled: bool) {}
}

/// Fixed-size packets at a fixed interval, optionally for a limited count.
///
/// Payload bytes are all equal to the low byte of the packet's sequence
/// number, which makes reordering visible to a receiver.
#[derive(Debug, Clone)]
pub struct ConstantRate {
    interval_us:      f64,
    length:           u32,
    limit:            Option<u64>,
    generated:        u64,
    data_abstraction: bool,
}

impl ConstantRate {
    /// `length`-byte packets every `interval_us` microseconds, forever.
    pub fn new(interval_us: f64, length: u32) -> Self {
        Self {
            interval_us,
            length,
            limit:            None,
            generated:        0,
            data_abstraction: false,
        }
    }

    /// Stop after `count` packets.
    pub fn with_limit(mut self, count: u64) -> Self {
        self.limit = Some(count);
        self
    }

    pub fn generated(&self) -> u64 {
        self.generated
    }
}

impl TrafficPattern for ConstantRate {
    fn generate(&mut self) -> Option<GeneratedPacket> {
        if self.limit.is_some_and(|limit| self.generated >= limit) {
            return None;
        }
        let payload = (!self.data_abstraction)
            .then(|| vec![self.generated as u8; self.length as usize]);
        self.generated += 1;
        Some(GeneratedPacket { gap_us: self.interval_us, length: self.length, payload })
    }

    fn set_data_abstraction(&mut self, enabled: bool) {
        self.data_abstraction = enabled;
    }
}
