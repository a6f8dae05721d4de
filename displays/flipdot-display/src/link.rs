//! Hardware or simulated link to a sign

use flipdot_hal::{Transport, TransportError};
use flipdot_protocol::{Layout, Simulator};

/// Where frames go
///
/// Picked once when the display is built. A missing serial port is the
/// caller's decision to fall back to [`Link::Simulated`], not something the
/// link does on its own.
#[derive(Debug)]
pub enum Link<H> {
    /// Real sign behind a transport
    Hardware(H),
    /// In-memory sign
    Simulated(Simulator),
}

impl<H> Link<H> {
    /// Simulated sign for a layout
    pub fn simulated(layout: Layout) -> Self {
        Link::Simulated(Simulator::new(layout))
    }

    /// Whether frames go to the simulator
    pub fn is_simulated(&self) -> bool {
        matches!(self, Link::Simulated(_))
    }

    /// The simulator, if this link is simulated
    pub fn simulator(&self) -> Option<&Simulator> {
        match self {
            Link::Simulated(sim) => Some(sim),
            Link::Hardware(_) => None,
        }
    }

    /// Mutable access to the simulator, if this link is simulated
    pub fn simulator_mut(&mut self) -> Option<&mut Simulator> {
        match self {
            Link::Simulated(sim) => Some(sim),
            Link::Hardware(_) => None,
        }
    }
}

impl<H: Transport> Transport for Link<H> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        match self {
            Link::Hardware(port) => port.write(bytes),
            Link::Simulated(sim) => sim.write(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipdot_protocol::ControlBytes;

    struct Dead;

    impl Transport for Dead {
        fn write(&mut self, _bytes: &[u8]) -> Result<(), TransportError> {
            Err(TransportError::Disconnected)
        }
    }

    #[test]
    fn test_simulated_link_feeds_simulator() {
        let mut link: Link<Dead> = Link::simulated(Layout::new(4, 4, ControlBytes::LEGACY));
        assert!(link.is_simulated());
        link.write(&[0x81, 0x81, 0x11, 0x22]).unwrap();

        let sim = link.simulator().unwrap();
        assert_eq!(sim.frame().as_bytes(), &[0x11, 0x22, 0, 0]);
        assert_eq!(sim.writes(), 1);
    }

    #[test]
    fn test_hardware_link_forwards_errors() {
        let mut link = Link::Hardware(Dead);
        assert!(!link.is_simulated());
        assert!(link.simulator().is_none());
        assert_eq!(link.write(&[0x81]), Err(TransportError::Disconnected));
    }
}
