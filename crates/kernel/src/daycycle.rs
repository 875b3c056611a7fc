use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

const NIGHT_SKY: [u8; 3] = [10, 10, 30];
const DAY_SKY: [u8; 3] = [135, 206, 235];

/// Day/night clock.
///
/// The clock is `phase / length` in `[0, 1)`. Keeping the phase as an integer
/// tick count makes a full day exactly `length` ticks long with no drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCycle {
    phase: u32,
    length: u32,
}

impl DayCycle {
    pub fn new(length: u32) -> Self {
        assert!(length > 0, "day length must be positive");
        Self { phase: 0, length }
    }

    pub fn advance(&mut self) {
        self.phase = (self.phase + 1) % self.length;
    }

    pub fn phase(&self) -> u32 {
        self.phase
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    /// Clock value in `[0, 1)`.
    pub fn clock(&self) -> f64 {
        self.phase as f64 / self.length as f64
    }

    /// `(sin(2π·clock) + 1) / 2`, always within `[0, 1]`.
    pub fn daylight(&self) -> f32 {
        let d = ((TAU * self.clock()).sin() + 1.0) / 2.0;
        d.clamp(0.0, 1.0) as f32
    }

    /// Sky color blended from night to day by the daylight factor.
    pub fn ambient_color(&self) -> [u8; 3] {
        lerp_color(NIGHT_SKY, DAY_SKY, self.daylight())
    }
}

fn lerp_color(from: [u8; 3], to: [u8; 3], t: f32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = from[i] as f32 * (1.0 - t) + to[i] as f32 * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_half_light() {
        let day = DayCycle::new(1000);
        assert_eq!(day.clock(), 0.0);
        assert_eq!(day.daylight(), 0.5);
    }

    #[test]
    fn daylight_stays_in_unit_range() {
        let mut day = DayCycle::new(997);
        for _ in 0..2 * 997 {
            let d = day.daylight();
            assert!((0.0..=1.0).contains(&d), "daylight {d} out of range");
            day.advance();
        }
    }

    #[test]
    fn returns_to_start_after_one_day() {
        let mut day = DayCycle::new(1000);
        let initial = day.daylight();
        for tick in 1..=1000 {
            day.advance();
            if tick < 1000 {
                assert_ne!(day.phase(), 0);
            }
        }
        assert_eq!(day.phase(), 0);
        assert_eq!(day.daylight(), initial);
    }

    #[test]
    fn noon_and_midnight() {
        let mut day = DayCycle::new(4);
        day.advance();
        assert!((day.daylight() - 1.0).abs() < 1e-6);
        day.advance();
        day.advance();
        assert!(day.daylight().abs() < 1e-6);
    }

    #[test]
    fn ambient_color_tracks_daylight() {
        let mut day = DayCycle::new(4);
        day.advance();
        assert_eq!(day.ambient_color(), DAY_SKY);
        day.advance();
        day.advance();
        assert_eq!(day.ambient_color(), NIGHT_SKY);
    }

    #[test]
    #[should_panic(expected = "day length must be positive")]
    fn zero_length_panics() {
        DayCycle::new(0);
    }
}
