//! Output sink for row payloads

/// Destination for one refresh tick's worth of cascade bytes
///
/// `payload[0]` belongs to the device furthest down the chain and is
/// shifted out first. Implementations must present the whole payload to
/// the outputs at once (one latch edge per call) or not at all.
pub trait CascadeSink<const N: usize> {
    /// Error reported by the underlying bus
    type Error;

    /// Shift `payload` into the chain and latch it
    fn shift_out(&mut self, payload: &[u8; N]) -> Result<(), Self::Error>;
}

impl<S: CascadeSink<N> + ?Sized, const N: usize> CascadeSink<N> for &mut S {
    type Error = S::Error;

    fn shift_out(&mut self, payload: &[u8; N]) -> Result<(), Self::Error> {
        S::shift_out(self, payload)
    }
}
