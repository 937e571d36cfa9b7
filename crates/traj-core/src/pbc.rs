use crate::error::{TrajError, TrajResult};
use crate::geom::Vec3;

/// Fully periodic cubic cell of edge `length`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBox {
    length: f64,
    half: f64,
}

impl CubicBox {
    pub fn new(length: f64) -> TrajResult<Self> {
        if !(length.is_finite() && length > 0.0) {
            return Err(TrajError::Invalid(format!(
                "box length must be positive and finite, got {length}"
            )));
        }
        Ok(Self {
            length,
            half: 0.5 * length,
        })
    }

    pub fn length(self) -> f64 {
        self.length
    }

    pub fn volume(self) -> f64 {
        self.length * self.length * self.length
    }

    /// Folds one component into (-L/2, L/2].
    pub fn fold(self, d: f64) -> f64 {
        let l = self.length;
        let mut d = d - (d / l).round() * l;
        // f64::round sends exact half-box ties to -L/2
        if d <= -self.half {
            d += l;
        } else if d > self.half {
            d -= l;
        }
        d
    }

    pub fn minimum_image(self, d: Vec3) -> Vec3 {
        d.map(|c| self.fold(c))
    }

    /// Minimum-image displacement `a - b`.
    pub fn delta(self, a: Vec3, b: Vec3) -> Vec3 {
        self.minimum_image(a.sub(b))
    }

    pub fn distance(self, a: Vec3, b: Vec3) -> f64 {
        self.delta(a, b).norm()
    }

    /// Reciprocal lattice vector `(2π/L)·n`.
    pub fn wavevector(self, n: [i32; 3]) -> Vec3 {
        Vec3::from_ints(n).scale(2.0 * std::f64::consts::PI / self.length)
    }
}
