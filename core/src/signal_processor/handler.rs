use super::signal::RaidSignal;

/// Trait for systems that react to raid progress signals.
/// Implement this for the detector manager, panels, persistence, etc.
pub trait SignalHandler {
    /// Handle a single signal.
    fn handle_signal(&mut self, signal: &RaidSignal);

    /// Handle multiple signals (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[RaidSignal]) {
        for signal in signals {
            self.handle_signal(signal);
        }
    }
}
