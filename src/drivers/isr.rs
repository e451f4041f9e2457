//! GPIO interrupt wiring for the obstacle beams.
//!
//! Each beam input gets an edge interrupt whose handler sets that
//! sensor's [`ObstacleLatch`].  The per-pin ISR service passes the latch
//! to the handler as its argument, so one handler serves every beam.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use crate::error::Error;
use crate::sensors::obstacle::ObstacleLatch;

#[cfg(target_os = "espidf")]
unsafe extern "C" fn obstacle_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` was registered from a `&'static ObstacleLatch`.
    let latch = unsafe { &*(arg as *const ObstacleLatch) };
    latch.set_from_isr();
}

/// Install the per-pin GPIO ISR service.  Call once, before
/// [`attach_obstacle_latch`].
#[cfg(target_os = "espidf")]
pub fn init_isr_service() -> Result<(), Error> {
    // SAFETY: ESP_ERR_INVALID_STATE means the service is already installed.
    let ret = unsafe { gpio_install_isr_service(0) };
    if ret != ESP_OK && ret != ESP_ERR_INVALID_STATE {
        log::error!("gpio_install_isr_service returned {}", ret);
        return Err(Error::Init("GPIO ISR service install failed"));
    }
    Ok(())
}

/// Latch beam breaks on `gpio` into `latch`.
///
/// The interrupt fires on the edge into the blocked level: falling for
/// an active-low receiver, rising otherwise.
#[cfg(target_os = "espidf")]
pub fn attach_obstacle_latch(
    gpio: i32,
    active_low: bool,
    latch: &'static ObstacleLatch,
) -> Result<(), Error> {
    let edge = if active_low {
        gpio_int_type_t_GPIO_INTR_NEGEDGE
    } else {
        gpio_int_type_t_GPIO_INTR_POSEDGE
    };
    // SAFETY: the handler only touches an atomic, and `latch` is 'static.
    unsafe {
        if gpio_set_intr_type(gpio, edge) != ESP_OK {
            return Err(Error::Init("obstacle GPIO interrupt type"));
        }
        let arg = latch as *const ObstacleLatch as *mut core::ffi::c_void;
        if gpio_isr_handler_add(gpio, Some(obstacle_gpio_isr), arg) != ESP_OK {
            return Err(Error::Init("obstacle GPIO handler"));
        }
        gpio_intr_enable(gpio);
    }
    log::info!("isr: obstacle latch on GPIO{}", gpio);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_isr_service() -> Result<(), Error> {
    log::info!("isr(sim): ISR service skipped");
    Ok(())
}

/// Host builds have no interrupts; tests drive the latch directly.
#[cfg(not(target_os = "espidf"))]
pub fn attach_obstacle_latch(
    gpio: i32,
    _active_low: bool,
    _latch: &'static ObstacleLatch,
) -> Result<(), Error> {
    log::info!("isr(sim): obstacle latch on GPIO{} skipped", gpio);
    Ok(())
}
