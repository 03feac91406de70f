use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

use crate::palette::Rgb;

const SYMBOLS: [char; 5] = ['✦', '✧', '·', '•', '*'];
const PARTICLE_COUNT: usize = 36;
const BURST_SECS: f64 = 3.0;
const DRIFT: f64 = -4.0; // rows per second, upwards

/// One floating glyph of the completion burst.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color: Rgb,
    pub age: f64,
    pub max_age: f64,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, x: f64, y: f64, palette: &[Rgb]) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-6.0..6.0),
            vel_y: rng.gen_range(-5.0..-1.0),
            symbol: *SYMBOLS.choose(rng).unwrap_or(&'*'),
            color: palette.choose(rng).copied().unwrap_or(Rgb::new(255, 255, 255)),
            age: 0.0,
            max_age: rng.gen_range(1.5..BURST_SECS),
        }
    }

    /// Move by `dt` seconds; false once the particle has faded out.
    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        // breath-like: particles slow down and rise gently
        self.vel_x *= 0.9;
        self.vel_y = self.vel_y * 0.9 + DRIFT * 0.1;
        self.age += dt;
        self.age < self.max_age
    }

    /// Remaining life in `[0, 1]`, used to dim the glyph.
    pub fn vitality(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Particle burst played over the session screen when the last cycle ends.
#[derive(Debug, Default)]
pub struct CompletionBurst {
    pub particles: Vec<Particle>,
    elapsed: f64,
    width: f64,
    height: f64,
}

impl CompletionBurst {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.particles.is_empty()
    }

    pub fn start(&mut self, width: u16, height: u16, palette: &[Rgb]) {
        let mut rng = rand::thread_rng();
        self.width = width as f64;
        self.height = height as f64;
        self.elapsed = 0.0;

        let center_x = self.width / 2.0;
        let center_y = self.height / 2.0;
        self.particles = (0..PARTICLE_COUNT)
            .map(|_| {
                let x = center_x + rng.gen_range(-4.0..4.0);
                let y = center_y + rng.gen_range(-2.0..2.0);
                Particle::spawn(&mut rng, x, y, palette)
            })
            .collect();
    }

    pub fn update(&mut self, dt: Duration) {
        if !self.is_active() {
            return;
        }
        let dt = dt.as_secs_f64();
        self.elapsed += dt;
        if self.elapsed >= BURST_SECS {
            self.particles.clear();
            return;
        }

        let (w, h) = (self.width, self.height);
        self.particles.retain_mut(|p| {
            let alive = p.update(dt);
            let on_screen = p.x >= 0.0 && p.x < w && p.y >= 0.0 && p.y < h;
            alive && on_screen
        });
    }

    pub fn stop(&mut self) {
        self.particles.clear();
    }
}
