//! Timing curves for one-shot drivers

/// Easing function types
///
/// The named curves use the standard cubic-bezier control points of the
/// platform timing functions, so `EaseIn` is `cubic-bezier(0.42, 0, 1, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Easing {
    /// Constant rate; used by scrubbed drivers
    #[default]
    Linear,
    /// Slow start, accelerate
    EaseIn,
    /// Fast start, decelerate
    EaseOut,
    EaseInOut,
    /// Arbitrary curve through (0,0), (x1,y1), (x2,y2), (1,1)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    fn control_points(self) -> Option<(f32, f32, f32, f32)> {
        match self {
            Easing::Linear => None,
            Easing::EaseIn => Some((0.42, 0.0, 1.0, 1.0)),
            Easing::EaseOut => Some((0.0, 0.0, 0.58, 1.0)),
            Easing::EaseInOut => Some((0.42, 0.0, 0.58, 1.0)),
            Easing::CubicBezier(x1, y1, x2, y2) => Some((x1, y1, x2, y2)),
        }
    }
}

/// Apply easing function to a value t in range [0, 1]
pub fn ease(t: f32, easing: Easing) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t == 0.0 || t == 1.0 {
        return t;
    }

    match easing.control_points() {
        None => t,
        Some((x1, y1, x2, y2)) => {
            let s = solve_curve_x(t, x1, x2);
            bezier(s, y1, y2)
        }
    }
}

/// One coordinate of the curve with fixed endpoints 0 and 1
fn bezier(s: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_derivative(s: f32, p1: f32, p2: f32) -> f32 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x equals `x`
///
/// Newton steps first; falls back to bisection where the slope vanishes.
fn solve_curve_x(x: f32, x1: f32, x2: f32) -> f32 {
    let mut s = x;
    for _ in 0..8 {
        let err = bezier(s, x1, x2) - x;
        if err.abs() < 1e-6 {
            return s;
        }
        let dx = bezier_derivative(s, x1, x2);
        if dx.abs() < 1e-6 {
            break;
        }
        s = (s - err / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    s = x;
    for _ in 0..32 {
        let value = bezier(s, x1, x2);
        if (value - x).abs() < 1e-6 {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    s
}
