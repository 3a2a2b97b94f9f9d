use rand::prelude::*;
use serde::{Deserialize, Serialize};

/// Upward acceleration of smoke, in tiles per second squared.
const SMOKE_RISE: f32 = 0.6;
const SMOKE_MAX_ALPHA: u8 = 200;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const GREEN: Self = Self::rgb(0, 255, 100);
    pub const RED: Self = Self::rgb(255, 40, 40);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SmokeParticle {
    /// World position in tiles
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub life: f32,
    pub max_life: f32,
    pub alpha: u8,
    pub size: u8,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Shake {
    duration: f32,
    remaining: f32,
    intensity: f32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Flash {
    color: Color,
    duration: f32,
    remaining: f32,
}

/// Screen shake, smoke and full screen flashes. Purely cosmetic; updated every
/// frame whatever state the game is in.
#[derive(Clone, Debug)]
pub struct Effects {
    rng: SmallRng,
    shake: Option<Shake>,
    shake_offset: (i32, i32),
    particles: Vec<SmokeParticle>,
    flash: Option<Flash>,
}

impl Effects {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            shake: None,
            shake_offset: (0, 0),
            particles: Vec::new(),
            flash: None,
        }
    }

    pub fn trigger_screen_shake(&mut self, duration: f32, intensity: f32) {
        self.shake = Some(Shake {
            duration,
            remaining: duration,
            intensity,
        });
    }

    /// Spawns `count` smoke puffs scattered around `position`.
    pub fn trigger_smoke(&mut self, position: (f32, f32), count: usize) {
        let rng = &mut self.rng;
        self.particles.extend((0..count).map(|_| {
            let max_life = rng.random_range(0.8..1.4);
            SmokeParticle {
                position: (
                    position.0 + rng.random_range(-0.3..0.3),
                    position.1 + rng.random_range(-0.3..0.3),
                ),
                velocity: (rng.random_range(-1.0..1.0), -rng.random_range(0.6..1.9)),
                life: max_life,
                max_life,
                alpha: SMOKE_MAX_ALPHA,
                size: rng.random_range(4..10),
            }
        }));
    }

    pub fn trigger_flash(&mut self, color: Color, duration: f32) {
        self.flash = Some(Flash {
            color,
            duration,
            remaining: duration,
        });
    }

    pub fn update(&mut self, dt: f32) {
        self.update_shake(dt);

        self.particles.retain_mut(|particle| {
            particle.life -= dt;
            if particle.life <= 0.0 {
                return false;
            }
            particle.position.0 += particle.velocity.0 * dt;
            particle.position.1 += particle.velocity.1 * dt;
            particle.velocity.1 -= SMOKE_RISE * dt;

            let ratio = particle.life / particle.max_life;
            particle.alpha = (f32::from(SMOKE_MAX_ALPHA) * ratio) as u8;
            particle.size = (6.0 + (1.0 - ratio) * 10.0) as u8;
            true
        });

        if let Some(flash) = &mut self.flash {
            flash.remaining -= dt;
            if flash.remaining <= 0.0 {
                self.flash = None;
            }
        }
    }

    fn update_shake(&mut self, dt: f32) {
        let Some(shake) = &mut self.shake else {
            return;
        };

        shake.remaining -= dt;
        if shake.remaining <= 0.0 {
            self.shake = None;
            self.shake_offset = (0, 0);
            return;
        }

        let strength = shake.intensity * shake.remaining / shake.duration;
        let x = self.rng.random_range(-1.0..1.0) * strength;
        let y = self.rng.random_range(-1.0..1.0) * strength;
        self.shake_offset = (x as i32, y as i32);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Camera jitter to add this frame.
    pub fn shake_offset(&self) -> (i32, i32) {
        self.shake_offset
    }

    pub fn particles(&self) -> &[SmokeParticle] {
        &self.particles
    }

    /// The flash colour with its remaining opacity in `0.0..=1.0`.
    pub fn flash(&self) -> Option<(Color, f32)> {
        self.flash
            .map(|flash| (flash.color, flash.remaining / flash.duration))
    }
}

impl Default for Effects {
    fn default() -> Self {
        Self::new(crate::Settings::default().effects_seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake_decays_to_rest() {
        let mut effects = Effects::new(7);
        effects.trigger_screen_shake(0.5, 8.0);

        for _ in 0..5 {
            effects.update(0.05);
            let (x, y) = effects.shake_offset();
            assert!(x.abs() <= 8 && y.abs() <= 8);
        }
        assert!(effects.is_shaking());

        effects.update(0.5);
        assert!(!effects.is_shaking());
        assert_eq!(effects.shake_offset(), (0, 0));
    }

    #[test]
    fn smoke_rises_fades_and_expires() {
        let mut effects = Effects::new(7);
        effects.trigger_smoke((5.0, 5.0), 20);
        assert_eq!(effects.particles().len(), 20);

        let start_y: f32 = effects.particles().iter().map(|p| p.position.1).sum();
        effects.update(0.3);
        let later_y: f32 = effects.particles().iter().map(|p| p.position.1).sum();

        assert!(later_y < start_y);
        assert!(effects.particles().iter().all(|p| p.alpha < SMOKE_MAX_ALPHA));

        effects.update(1.5);
        assert!(effects.particles().is_empty());
    }

    #[test]
    fn flash_fades_out() {
        let mut effects = Effects::new(7);
        effects.trigger_flash(Color::RED, 0.4);

        effects.update(0.1);
        let (color, alpha) = effects.flash().unwrap();
        assert_eq!(color, Color::RED);
        assert!(alpha > 0.7 && alpha < 0.8);

        effects.update(0.4);
        assert!(effects.flash().is_none());
    }

    #[test]
    fn same_seed_same_smoke() {
        let mut a = Effects::new(42);
        let mut b = Effects::new(42);
        a.trigger_smoke((1.0, 1.0), 5);
        b.trigger_smoke((1.0, 1.0), 5);

        assert_eq!(a.particles(), b.particles());
    }
}
