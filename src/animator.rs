//! Breathing visual: maps the session's phase signal onto a continuous
//! expansion progress and lays out the radial petals drawn from it.
//!
//! The animation clock is separate from the session tick. `advance` is fed
//! frame time; `update` only retargets.

use std::f64::consts::{PI, TAU};
use std::time::Duration;

use crate::palette::Rgb;
use crate::session::Phase;

pub const REST_TRANSITION: Duration = Duration::from_millis(500);
pub const HOLD_TRANSITION: Duration = Duration::from_millis(100);
pub const PETAL_COUNT: usize = 6;

/// Cubic Bézier timing curve through `(0,0)` and `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

/// Symmetric ease-in-out used for every transition.
pub const EASE_IN_OUT: CubicBezier = CubicBezier::new(0.5, 0.0, 0.5, 1.0);

fn bezier_sample(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    ((a * t + b) * t + c) * t
}

fn bezier_slope(p1: f64, p2: f64, t: f64) -> f64 {
    let c = 3.0 * p1;
    let b = 3.0 * (p2 - p1) - c;
    let a = 1.0 - c - b;
    (3.0 * a * t + 2.0 * b) * t + c
}

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Eased output for input progress `x`, clamped to `[0, 1]`.
    pub fn ease(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let x = x.clamp(0.0, 1.0);
        if x == 0.0 || x == 1.0 {
            return x;
        }

        // Newton first, bisection when the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = bezier_sample(self.x1, self.x2, t) - x;
            if err.abs() < EPSILON {
                return bezier_sample(self.y1, self.y2, t);
            }
            let slope = bezier_slope(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let sample = bezier_sample(self.x1, self.x2, t);
            if (sample - x).abs() < EPSILON {
                break;
            }
            if sample < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        bezier_sample(self.y1, self.y2, t)
    }
}

/// The inputs the session screen hands to the animator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSignal {
    pub phase: Phase,
    pub duration_secs: u32,
    pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTarget {
    pub progress: f64,
    pub transition: Duration,
}

pub fn target_for(signal: PhaseSignal) -> AnimationTarget {
    let over_phase = Duration::from_secs(signal.duration_secs as u64);
    let (progress, transition) = match (signal.is_active, signal.phase) {
        (false, _) | (_, Phase::Idle) => (0.0, REST_TRANSITION),
        (true, Phase::Inhale) => (1.0, over_phase),
        (true, Phase::Hold) => (1.0, HOLD_TRANSITION),
        (true, Phase::Exhale) => (0.0, over_phase),
    };
    AnimationTarget {
        progress,
        transition,
    }
}

/// A value easing from where it currently is towards a target.
#[derive(Debug, Clone)]
pub struct Tween {
    from: f64,
    to: f64,
    elapsed: Duration,
    duration: Duration,
    easing: CubicBezier,
}

impl Tween {
    pub fn at_rest(value: f64) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: Duration::ZERO,
            duration: Duration::ZERO,
            easing: EASE_IN_OUT,
        }
    }

    pub fn value(&self) -> f64 {
        if self.duration.is_zero() || self.elapsed >= self.duration {
            return self.to;
        }
        let x = self.elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * self.easing.ease(x)
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_settled(&self) -> bool {
        self.duration.is_zero() || self.elapsed >= self.duration
    }

    /// Supersede the in-flight transition, starting from the current value.
    pub fn retarget(&mut self, to: f64, duration: Duration) {
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
        self.duration = duration;
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

#[derive(Debug, Clone)]
pub struct PhaseAnimator {
    progress: Tween,
    goes_down: bool,
    signal: Option<PhaseSignal>,
}

impl Default for PhaseAnimator {
    fn default() -> Self {
        Self::new()
    }
}

impl PhaseAnimator {
    pub fn new() -> Self {
        Self {
            progress: Tween::at_rest(0.0),
            goes_down: false,
            signal: None,
        }
    }

    /// Retarget for a new signal. Repeating the current signal leaves the
    /// running transition alone. Returns whether a retarget happened.
    pub fn update(&mut self, signal: PhaseSignal) -> bool {
        if self.signal == Some(signal) {
            return false;
        }
        self.signal = Some(signal);

        let target = target_for(signal);
        self.progress.retarget(target.progress, target.transition);
        match (signal.is_active, signal.phase) {
            (false, _) | (_, Phase::Idle) | (_, Phase::Inhale) => self.goes_down = false,
            (true, Phase::Exhale) => self.goes_down = true,
            (true, Phase::Hold) => {}
        }
        true
    }

    pub fn advance(&mut self, dt: Duration) {
        self.progress.advance(dt);
    }

    pub fn progress(&self) -> f64 {
        self.progress.value()
    }

    pub fn target(&self) -> f64 {
        self.progress.target()
    }

    pub fn goes_down(&self) -> bool {
        self.goes_down
    }

    pub fn is_settled(&self) -> bool {
        self.progress.is_settled()
    }

    pub fn petals(&self, gradient: Gradient) -> Vec<Petal> {
        petals(self.progress(), self.goes_down, gradient, PETAL_COUNT)
    }
}

pub fn mix(value: f64, from: f64, to: f64) -> f64 {
    from + (to - from) * value
}

/// Whole-figure rotation in radians: `-π` at rest, `0` fully expanded.
pub fn rotation(progress: f64) -> f64 {
    mix(progress.clamp(0.0, 1.0), -PI, 0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub start: Rgb,
    pub end: Rgb,
}

pub fn gradient(phase: Phase) -> Gradient {
    let (start, end) = match phase {
        Phase::Inhale => (Rgb::new(0x62, 0xBF, 0xA1), Rgb::new(0x52, 0x9C, 0xA0)),
        Phase::Hold => (Rgb::new(0xF6, 0xAD, 0x55), Rgb::new(0xED, 0x89, 0x36)),
        Phase::Exhale => (Rgb::new(0x68, 0xD3, 0x91), Rgb::new(0x48, 0xBB, 0x78)),
        Phase::Idle => (Rgb::new(0x66, 0x7E, 0xEA), Rgb::new(0x76, 0x4B, 0xA2)),
    };
    Gradient { start, end }
}

/// One circle of the radial figure, in unit coordinates around the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Petal {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Rgb,
}

const ORBIT: f64 = 0.5;
const MIN_RADIUS: f64 = 0.2;
const MAX_RADIUS: f64 = 0.5;

/// Lay out `count` petals. At progress 0 they are stacked small in the
/// center; at 1 they sit full-size on the orbit. The contraction path walks
/// the gradient in reverse.
pub fn petals(progress: f64, goes_down: bool, gradient: Gradient, count: usize) -> Vec<Petal> {
    let progress = progress.clamp(0.0, 1.0);
    let spin = rotation(progress);
    let distance = progress * ORBIT;
    let radius = mix(progress, MIN_RADIUS, MAX_RADIUS);

    (0..count)
        .map(|index| {
            let angle = spin + index as f64 * TAU / count as f64;
            let shade = if count > 1 {
                index as f64 / (count - 1) as f64
            } else {
                0.0
            };
            let color = if goes_down {
                gradient.end.mix(gradient.start, shade)
            } else {
                gradient.start.mix(gradient.end, shade)
            };
            Petal {
                x: distance * angle.cos(),
                y: distance * angle.sin(),
                radius,
                color,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signal(phase: Phase, duration_secs: u32, is_active: bool) -> PhaseSignal {
        PhaseSignal {
            phase,
            duration_secs,
            is_active,
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn inhale_spans_its_duration() {
        let t = target_for(signal(Phase::Inhale, 4, true));
        assert_eq!(t.progress, 1.0);
        assert_eq!(t.transition, Duration::from_millis(4000));
    }

    #[test]
    fn inactive_snaps_to_rest_regardless_of_phase() {
        for phase in [Phase::Idle, Phase::Inhale, Phase::Hold, Phase::Exhale] {
            let t = target_for(signal(phase, 8, false));
            assert_eq!(t.progress, 0.0);
            assert_eq!(t.transition, REST_TRANSITION);
        }
        let idle = target_for(signal(Phase::Idle, 0, true));
        assert_eq!(idle.progress, 0.0);
        assert_eq!(idle.transition, Duration::from_millis(500));
    }

    #[test]
    fn hold_stays_expanded_briefly() {
        let t = target_for(signal(Phase::Hold, 7, true));
        assert_eq!(t.progress, 1.0);
        assert_eq!(t.transition, HOLD_TRANSITION);
    }

    #[test]
    fn exhale_contracts_over_its_duration() {
        let t = target_for(signal(Phase::Exhale, 8, true));
        assert_eq!(t.progress, 0.0);
        assert_eq!(t.transition, Duration::from_secs(8));
    }

    #[test]
    fn ease_in_out_is_symmetric_and_monotonic() {
        assert_eq!(EASE_IN_OUT.ease(0.0), 0.0);
        assert_eq!(EASE_IN_OUT.ease(1.0), 1.0);
        assert!(close(EASE_IN_OUT.ease(0.5), 0.5));
        assert!(EASE_IN_OUT.ease(0.2) < 0.2, "eases in");
        assert!(EASE_IN_OUT.ease(0.8) > 0.8, "eases out");

        let mut last = 0.0;
        for i in 1..=100 {
            let x = i as f64 / 100.0;
            let y = EASE_IN_OUT.ease(x);
            assert!(y >= last, "not monotonic at {x}");
            assert!(close(y + EASE_IN_OUT.ease(1.0 - x), 1.0), "asymmetric at {x}");
            last = y;
        }
    }

    #[test]
    fn linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.0, 0.0, 1.0, 1.0);
        for x in [0.1, 0.33, 0.5, 0.9] {
            assert!(close(linear.ease(x), x));
        }
    }

    #[test]
    fn tween_retargets_from_current_value() {
        let mut tween = Tween::at_rest(0.0);
        tween.retarget(1.0, Duration::from_secs(2));
        tween.advance(Duration::from_secs(1));
        let midway = tween.value();
        assert!(close(midway, 0.5));

        tween.retarget(0.0, Duration::from_millis(500));
        assert!(close(tween.value(), midway), "retarget must not jump");
        tween.advance(Duration::from_secs(5));
        assert!(tween.is_settled());
        assert_eq!(tween.value(), 0.0);
    }

    #[test]
    fn animator_follows_a_cycle() {
        let mut anim = PhaseAnimator::new();
        assert_eq!(anim.progress(), 0.0);

        anim.update(signal(Phase::Inhale, 4, true));
        assert!(!anim.goes_down());
        anim.advance(Duration::from_secs(2));
        assert!(close(anim.progress(), 0.5));
        anim.advance(Duration::from_secs(2));
        assert_eq!(anim.progress(), 1.0);

        anim.update(signal(Phase::Hold, 7, true));
        assert!(!anim.goes_down());
        anim.advance(Duration::from_secs(3));
        assert_eq!(anim.progress(), 1.0);

        anim.update(signal(Phase::Exhale, 8, true));
        assert!(anim.goes_down());
        anim.advance(Duration::from_secs(4));
        assert!(close(anim.progress(), 0.5));
        anim.advance(Duration::from_secs(4));
        assert_eq!(anim.progress(), 0.0);

        anim.update(signal(Phase::Inhale, 4, true));
        assert!(!anim.goes_down());
    }

    #[test]
    fn repeated_signal_does_not_restart_transition() {
        let mut anim = PhaseAnimator::new();
        assert!(anim.update(signal(Phase::Inhale, 4, true)));
        anim.advance(Duration::from_secs(1));
        let before = anim.progress();
        assert!(!anim.update(signal(Phase::Inhale, 4, true)));
        assert_eq!(anim.progress(), before);
        assert!(!anim.is_settled());
    }

    #[test]
    fn pausing_mid_exhale_returns_to_rest() {
        let mut anim = PhaseAnimator::new();
        anim.update(signal(Phase::Inhale, 1, true));
        anim.advance(Duration::from_secs(1));
        anim.update(signal(Phase::Exhale, 4, true));
        anim.advance(Duration::from_secs(1));
        assert!(anim.goes_down());

        anim.update(signal(Phase::Exhale, 4, false));
        assert!(!anim.goes_down());
        assert_eq!(anim.target(), 0.0);
        anim.advance(REST_TRANSITION);
        assert_eq!(anim.progress(), 0.0);
    }

    #[test]
    fn rotation_spans_half_turn() {
        assert!(close(rotation(0.0), -PI));
        assert!(close(rotation(1.0), 0.0));
        assert!(close(rotation(0.5), -PI / 2.0));
    }

    #[test]
    fn petal_extremes_are_distinct() {
        let g = gradient(Phase::Inhale);
        let rest = petals(0.0, false, g, PETAL_COUNT);
        let open = petals(1.0, false, g, PETAL_COUNT);
        assert_eq!(rest.len(), PETAL_COUNT);
        assert!(rest.iter().all(|p| close(p.x, 0.0) && close(p.y, 0.0)));
        assert!(rest.iter().all(|p| close(p.radius, MIN_RADIUS)));
        assert!(open.iter().all(|p| close(p.radius, MAX_RADIUS)));
        assert!(open
            .iter()
            .all(|p| close((p.x * p.x + p.y * p.y).sqrt(), ORBIT)));
        assert!(close(open[0].x, ORBIT) && close(open[0].y, 0.0));
    }

    #[test]
    fn petals_grow_continuously() {
        let g = gradient(Phase::Exhale);
        let mut last = petals(0.0, true, g, PETAL_COUNT)[0].radius;
        for i in 1..=20 {
            let r = petals(i as f64 / 20.0, true, g, PETAL_COUNT)[0].radius;
            assert!(r > last);
            assert!(r - last < 0.05);
            last = r;
        }
    }

    #[test]
    fn contraction_reverses_gradient() {
        let g = gradient(Phase::Hold);
        let up = petals(0.5, false, g, PETAL_COUNT);
        let down = petals(0.5, true, g, PETAL_COUNT);
        assert_eq!(up[0].color, g.start);
        assert_eq!(down[0].color, g.end);
        assert_eq!(up[PETAL_COUNT - 1].color, down[0].color);
    }
}
