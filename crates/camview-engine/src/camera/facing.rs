use core::f32::consts::FRAC_PI_2;
use core::str::FromStr;

use crate::coords::Affine;

/// Which way the capturing camera faces.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum CameraFacing {
    Front,
    Back,
    /// External or unknown cameras. Displayed as captured.
    #[default]
    Unspecified,
}

impl CameraFacing {
    /// Transform that turns a raw sensor frame upright for display.
    ///
    /// - `Back`: 90° clockwise.
    /// - `Front`: vertical mirror, then 90° clockwise.
    /// - `Unspecified`: identity.
    pub fn orientation_transform(self) -> Affine {
        match self {
            CameraFacing::Front => Affine::rotation(-FRAC_PI_2).scale(1.0, -1.0),
            CameraFacing::Back => Affine::rotation(-FRAC_PI_2),
            CameraFacing::Unspecified => Affine::IDENTITY,
        }
    }
}

/// Free-function form of [`CameraFacing::orientation_transform`].
#[inline]
pub fn orientation_transform(facing: CameraFacing) -> Affine {
    facing.orientation_transform()
}

impl FromStr for CameraFacing {
    type Err = core::convert::Infallible;

    /// Unrecognized names map to `Unspecified` rather than failing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "front" | "user" => CameraFacing::Front,
            "back" | "rear" | "environment" => CameraFacing::Back,
            _ => CameraFacing::Unspecified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Rect, Vec2};
    use core::f32::consts::PI;

    fn v(x: f32, y: f32) -> Vec2 { Vec2::new(x, y) }

    #[test]
    fn back_rotates_clockwise() {
        let t = orientation_transform(CameraFacing::Back);
        // "up" becomes "right".
        assert_eq!(t.apply(v(0.0, 1.0)), v(1.0, 0.0));
        assert_eq!(t.apply(v(1.0, 0.0)), v(0.0, -1.0));
    }

    #[test]
    fn front_mirrors_before_rotating() {
        let t = orientation_transform(CameraFacing::Front);
        let expected = Affine::scaling(1.0, -1.0).then(Affine::rotation(-FRAC_PI_2));
        assert_eq!(t, expected);
        assert_eq!(t.apply(v(0.0, 1.0)), v(-1.0, 0.0));
        assert_eq!(t.apply(v(1.0, 0.0)), v(0.0, -1.0));
    }

    #[test]
    fn unspecified_is_identity() {
        assert!(orientation_transform(CameraFacing::Unspecified).is_identity());
        assert_eq!(CameraFacing::default(), CameraFacing::Unspecified);
    }

    #[test]
    fn lookup_is_stable() {
        for facing in [CameraFacing::Front, CameraFacing::Back, CameraFacing::Unspecified] {
            assert_eq!(facing.orientation_transform(), facing.orientation_transform());
        }
    }

    #[test]
    fn front_twice_is_identity() {
        // Mirror-then-rotate is a reflection, so it undoes itself.
        let f = orientation_transform(CameraFacing::Front);
        let grouped_left = f.then(f);
        let expanded = Affine::scaling(1.0, -1.0)
            .then(Affine::rotation(-FRAC_PI_2))
            .then(Affine::scaling(1.0, -1.0))
            .then(Affine::rotation(-FRAC_PI_2));
        assert_eq!(grouped_left, expanded);
        assert!(grouped_left.is_identity());
    }

    #[test]
    fn back_twice_is_half_turn() {
        let b = orientation_transform(CameraFacing::Back);
        assert!(b.then(b).approx_eq(Affine::rotation(PI), 1e-6));
    }

    #[test]
    fn landscape_sensor_frame_becomes_portrait() {
        let sensor = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        for facing in [CameraFacing::Front, CameraFacing::Back] {
            let upright = facing.orientation_transform().apply_rect(sensor);
            assert_eq!(upright.size, v(1080.0, 1920.0), "{facing:?}");
        }
        let front = CameraFacing::Front.orientation_transform().apply_rect(sensor);
        assert_eq!(front.origin, v(-1080.0, -1920.0));
    }

    #[test]
    fn parses_names_leniently() {
        assert_eq!("Front".parse::<CameraFacing>(), Ok(CameraFacing::Front));
        assert_eq!(" rear ".parse::<CameraFacing>(), Ok(CameraFacing::Back));
        assert_eq!("usb-42".parse::<CameraFacing>(), Ok(CameraFacing::Unspecified));
    }
}
