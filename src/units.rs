//! SMuFL unit system.
//!
//! Layout code measures everything in ems or staff spaces and converts to
//! pixels once, through a [`Units`] value. One staff space is always a
//! quarter of an em, so changing `em_px` rescales the whole score.

/// Staff spaces per em, fixed by SMuFL.
pub const STAFF_SPACES_PER_EM: f64 = 4.0;

/// Default em size in pixels (one staff space = 10 px).
pub const DEFAULT_EM_PX: f64 = 40.0;

/// Conversion between ems, staff spaces and pixels for one font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    em_px: f64,
}

impl Units {
    pub fn new(em_px: f64) -> Self {
        Self { em_px }
    }

    /// Pixels per em.
    pub fn em_px(&self) -> f64 {
        self.em_px
    }

    /// Pixels per staff space.
    pub fn staff_space_px(&self) -> f64 {
        self.em_px / STAFF_SPACES_PER_EM
    }

    pub fn staff_spaces_to_pixels(&self, staff_spaces: f64) -> f64 {
        staff_spaces * self.staff_space_px()
    }

    pub fn pixels_to_staff_spaces(&self, pixels: f64) -> f64 {
        pixels / self.staff_space_px()
    }

    pub fn ems_to_pixels(&self, ems: f64) -> f64 {
        ems * self.em_px
    }

    pub fn pixels_to_ems(&self, pixels: f64) -> f64 {
        pixels / self.em_px
    }
}

impl Default for Units {
    fn default() -> Self {
        Self::new(DEFAULT_EM_PX)
    }
}

pub fn ems_to_staff_spaces(ems: f64) -> f64 {
    ems * STAFF_SPACES_PER_EM
}

pub fn staff_spaces_to_ems(staff_spaces: f64) -> f64 {
    staff_spaces / STAFF_SPACES_PER_EM
}
