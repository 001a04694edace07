use crate::error::PropagationError;
use crate::mobility::Mobility;

/// Capability set of a propagation loss model.
///
/// A model maps a pair of node positions to a loss in dB and owns
/// whatever random streams it draws from; `assign_streams` pins those
/// streams for reproducible runs and reports how many indices were
/// consumed.
pub trait PropagationLossModel {
    /// Path loss in dB between a receiver and a transmitter.
    fn loss(&mut self, rx: &dyn Mobility, tx: &dyn Mobility) -> Result<f64, PropagationError>;

    /// Received power in dBm after applying the model.
    fn calc_rx_power(
        &mut self,
        tx_power_dbm: f64,
        a: &dyn Mobility,
        b: &dyn Mobility,
    ) -> Result<f64, PropagationError> {
        Ok(tx_power_dbm - self.loss(a, b)?)
    }

    /// Assigns a fixed stream index to the model's random variables
    /// and returns the number of stream indices used.
    fn assign_streams(&mut self, first_stream: i64) -> i64;
}
