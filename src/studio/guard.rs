//! Single-flight guards for provider calls.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{GenerationError, StudioError};

/// A provider-backed action that may only run once at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Surface {
    Overlay,
    Flyer,
    BackgroundRemoval,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overlay => "overlay",
            Self::Flyer => "flyer",
            Self::BackgroundRemoval => "background removal",
        }
    }

    /// Message shown to the user when the action fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Overlay => "Sorry, there was an error generating the overlay. Please try again.",
            Self::Flyer => "Sorry, there was an error generating the flyer. Please try again.",
            Self::BackgroundRemoval => "Sorry, there was an error removing the background.",
        }
    }

    /// Text to show for `err` raised by this surface. Provider failures get
    /// the surface's alert; anything else keeps the error's own message.
    pub fn user_message(&self, err: &StudioError) -> String {
        if err.is_provider_failure() {
            self.failure_message().to_string()
        } else {
            err.friendly_message()
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Busy flag for one surface.
#[derive(Debug)]
pub struct SingleFlight {
    surface: Surface,
    busy: AtomicBool,
}

impl SingleFlight {
    pub fn new(surface: Surface) -> Self {
        Self {
            surface,
            busy: AtomicBool::new(false),
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Mark the surface busy until the returned guard is dropped.
    pub fn try_acquire(&self) -> Result<FlightGuard<'_>, GenerationError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GenerationError::Busy {
                surface: self.surface.as_str().to_string(),
            })?;
        Ok(FlightGuard { flight: self })
    }
}

/// Clears the busy flag on drop, whichever way the call exits.
#[must_use = "the surface is released as soon as the guard is dropped"]
pub struct FlightGuard<'a> {
    flight: &'a SingleFlight,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flight.busy.store(false, Ordering::Release);
    }
}
