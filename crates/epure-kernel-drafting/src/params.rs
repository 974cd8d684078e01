//! Bend parameters entered by the user.

use epure_kernel_math::cm_to_px;
use serde::{Deserialize, Serialize};

use crate::error::{DraftingError, Result};

/// Bend parameters, in the units the user thinks in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BendParameters {
    /// Target bend angle in degrees, in (0, 180).
    pub angle_deg: f64,
    /// Bend radius in centimeters (centerline of the bender die).
    pub bend_radius_cm: f64,
    /// Outside diameter of the tube in centimeters.
    pub tube_diameter_cm: f64,
}

impl Default for BendParameters {
    fn default() -> Self {
        Self {
            angle_deg: 135.0,
            bend_radius_cm: 7.5,
            tube_diameter_cm: 3.4,
        }
    }
}

impl BendParameters {
    /// Create a new parameter set.
    pub fn new(angle_deg: f64, bend_radius_cm: f64, tube_diameter_cm: f64) -> Self {
        Self {
            angle_deg,
            bend_radius_cm,
            tube_diameter_cm,
        }
    }

    /// Check the ranges the construction relies on.
    ///
    /// [`compute_layout`](crate::compute_layout) does not call this; an angle of
    /// 0° puts the apex at infinity and the output becomes non-finite.
    pub fn validate(&self) -> Result<()> {
        if !(self.angle_deg > 0.0 && self.angle_deg < 180.0) {
            return Err(DraftingError::InvalidAngle(self.angle_deg));
        }
        if !(self.bend_radius_cm > 0.0 && self.bend_radius_cm.is_finite()) {
            return Err(DraftingError::NonPositiveRadius(self.bend_radius_cm));
        }
        if !(self.tube_diameter_cm > 0.0 && self.tube_diameter_cm.is_finite()) {
            return Err(DraftingError::NonPositiveDiameter(self.tube_diameter_cm));
        }
        Ok(())
    }

    /// Bend radius in canvas units.
    pub fn bend_radius_px(&self) -> f64 {
        cm_to_px(self.bend_radius_cm)
    }

    /// Half the tube diameter, in canvas units.
    pub fn tube_radius_px(&self) -> f64 {
        cm_to_px(self.tube_diameter_cm / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use epure_kernel_math::CM_TO_PX;

    #[test]
    fn test_default_is_valid() {
        assert!(BendParameters::default().validate().is_ok());
    }

    #[test]
    fn test_angle_bounds() {
        for angle in [0.0, 180.0, -10.0, 200.0, f64::NAN] {
            let p = BendParameters::new(angle, 5.0, 2.0);
            assert!(matches!(p.validate(), Err(DraftingError::InvalidAngle(_))));
        }
        assert!(BendParameters::new(179.9, 5.0, 2.0).validate().is_ok());
    }

    #[test]
    fn test_radius_and_diameter_must_be_positive() {
        assert_eq!(
            BendParameters::new(90.0, 0.0, 2.0).validate(),
            Err(DraftingError::NonPositiveRadius(0.0))
        );
        assert_eq!(
            BendParameters::new(90.0, 5.0, -1.0).validate(),
            Err(DraftingError::NonPositiveDiameter(-1.0))
        );
        assert!(matches!(
            BendParameters::new(90.0, f64::INFINITY, 2.0).validate(),
            Err(DraftingError::NonPositiveRadius(_))
        ));
    }

    #[test]
    fn test_pixel_conversion() {
        let p = BendParameters::new(90.0, 2.0, 3.0);
        assert_relative_eq!(p.bend_radius_px(), 2.0 * CM_TO_PX);
        assert_relative_eq!(p.tube_radius_px(), 1.5 * CM_TO_PX);
    }
}
