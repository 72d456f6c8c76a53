//! System reset

use fox_hal::SystemReset;

/// Reset through the Cortex-M system control block
#[derive(Debug, Default, Clone, Copy)]
pub struct CortexReset;

impl SystemReset for CortexReset {
    fn reset(&mut self) -> ! {
        cortex_m::peripheral::SCB::sys_reset()
    }
}
