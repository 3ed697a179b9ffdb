// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time iteration at the heart of the Mandelbrot set.

use num::Complex;

/// Once an orbit's magnitude passes this radius it diverges.
pub const BAILOUT: f64 = 2.0;

/// This is our classic iterator function.  Starting from zero, apply
/// z = z² + c until the orbit leaves the bailout radius or the cap is
/// reached, and return the number of steps taken.  A result equal to
/// `max_iterations` means the point never escaped.
#[inline]
pub fn escape_time(c: Complex<f64>, max_iterations: u32) -> u32 {
    let mut z = Complex::new(0.0_f64, 0.0_f64);
    let mut n = 0;
    while z.norm() <= BAILOUT && n < max_iterations {
        z = z * z + c;
        n += 1;
    }
    n
}

/// True if the point escaped before reaching the cap.
pub fn escapes(c: Complex<f64>, max_iterations: u32) -> bool {
    escape_time(c, max_iterations) < max_iterations
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn far_point_escapes_after_one_step() {
        assert_eq!(escape_time(Complex::new(3.0, 0.0), 100), 1);
        assert_eq!(escape_time(Complex::new(-2.5, 1.0), 100), 1);
    }

    #[test]
    fn origin_never_escapes() {
        for &max in &[1, 2, 50, 180, 10_000] {
            assert_eq!(escape_time(Complex::new(0.0, 0.0), max), max);
        }
    }

    #[test]
    fn zero_cap_returns_zero() {
        assert_eq!(escape_time(Complex::new(0.0, 0.0), 0), 0);
        assert_eq!(escape_time(Complex::new(3.0, 3.0), 0), 0);
        assert_eq!(escape_time(Complex::new(-0.75, 0.1), 0), 0);
    }

    #[test]
    fn main_cardioid_and_bulb_are_interior() {
        assert!(!escapes(Complex::new(-0.5, 0.0), 500));
        assert!(!escapes(Complex::new(-1.0, 0.0), 500));
        assert!(!escapes(Complex::new(0.25, 0.0), 500));
    }

    #[test]
    fn boundary_of_real_axis() {
        // -2 sits exactly on the bailout circle and stays there.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 64), 64);
        assert!(escapes(Complex::new(0.26, 0.0), 500));
    }

    #[test]
    fn result_never_exceeds_cap() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let c = Complex::new(rng.gen_range(-3.0, 3.0), rng.gen_range(-3.0, 3.0));
            let max = rng.gen_range(1, 300);
            let n = escape_time(c, max);
            assert!(n <= max);
            assert!(n >= 1);
            assert_eq!(n, escape_time(c, max));
        }
    }
}
