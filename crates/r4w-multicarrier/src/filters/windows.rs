//! Window Functions for Prototype Design
//!
//! The Nyquist prototype is apodized with a Kaiser window whose shape
//! parameter β comes straight from the channelizer configuration.
//!
//! | β    | Behaviour                 |
//! |------|---------------------------|
//! | 0    | Rectangular               |
//! | 5    | Similar to Hamming        |
//! | 8.6  | Similar to Blackman       |
//! | > 10 | Very low sidelobes        |

/// Kaiser window sample `n` of a window of `length` samples.
///
/// # Arguments
/// * `n` - Sample index, `0..length`
/// * `length` - Window length
/// * `beta` - Shape parameter (typically 0 to 12)
pub fn kaiser(n: usize, length: usize, beta: f64) -> f64 {
    if length <= 1 {
        return 1.0;
    }

    let half = (length - 1) as f64 / 2.0;
    let x = (n as f64 - half) / half;
    let arg = beta * (1.0 - x * x).max(0.0).sqrt();
    bessel_i0(arg) / bessel_i0(beta)
}

/// Modified Bessel function of the first kind, order zero.
///
/// Power series; converges quickly for the β range used in filter design.
pub(crate) fn bessel_i0(x: f64) -> f64 {
    let half_x = x / 2.0;
    let mut sum = 1.0;
    let mut term = 1.0;

    for k in 1..64 {
        let factor = half_x / k as f64;
        term *= factor * factor;
        sum += term;
        if term < 1e-16 * sum {
            break;
        }
    }

    sum
}
