//! # Key Wheel Rotation
//!
//! Tracks the rotation of the circle-of-fifths key wheel.
//!
//! ## Modes
//! - **Rotating** - the wheel spins so the selected key always sits at the
//!   reference position (12 o'clock). Rotation is cumulative and never
//!   wraps: after two full clockwise turns it reads `-720`, not `0`.
//! - **Fixed** - the wheel never turns (rotation stays `0`); a marker moves
//!   to the selected key instead.
//!
//! ## Jump To Key
//! ```text
//! target = -(position * 30)
//! delta  = target - current
//! delta  = delta - 360 * round(delta / 360)
//! next   = current + delta
//! ```
//! The normalised delta is always within `[-180, 180]`, however many turns
//! the wheel has already accumulated.
//!
//! ## Lock
//! While locked, key and mode changes (`select_key`, `nudge`, `set_mode`)
//! are rejected before any state is touched.

use crate::pitch::Key;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Angular distance between neighbouring keys on the wheel.
pub const DEGREES_PER_KEY: f64 = 30.0;

const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WheelMode {
    #[default]
    Rotating,
    Fixed,
}

impl WheelMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rotating" => Some(WheelMode::Rotating),
            "fixed" => Some(WheelMode::Fixed),
            _ => None,
        }
    }
}

/// Rotation that puts `key` at the reference position, ignoring prior turns.
pub fn base_rotation(key: &Key) -> f64 {
    -(key.position() as f64 * DEGREES_PER_KEY)
}

/// Smallest signed rotation taking `from` onto an angle equivalent to `to`.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = to - from;
    delta - FULL_TURN * (delta / FULL_TURN).round()
}

/// New wheel rotation after jumping to `target` from `current_deg`.
///
/// # Example
/// ```
/// use keywheel::{compute_wheel_rotation, Key, WheelMode};
///
/// let f: Key = "F".parse()?;
/// // From C (0°), F is one step counter-clockwise: turn +30°, not -330°.
/// assert_eq!(compute_wheel_rotation(0.0, &f, WheelMode::Rotating), 30.0);
/// assert_eq!(compute_wheel_rotation(-725.0, &f, WheelMode::Fixed), 0.0);
/// # Ok::<(), keywheel::TheoryError>(())
/// ```
pub fn compute_wheel_rotation(current_deg: f64, target: &Key, mode: WheelMode) -> f64 {
    match mode {
        WheelMode::Fixed => 0.0,
        WheelMode::Rotating => current_deg + shortest_delta(current_deg, base_rotation(target)),
    }
}

/// Explicit wheel state owned by the host UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyWheel {
    rotation: f64,
    mode: WheelMode,
    position: u8,
    locked: bool,
}

impl Default for KeyWheel {
    fn default() -> Self {
        Self::new(Key::from_position(0), WheelMode::default())
    }
}

impl KeyWheel {
    pub fn new(key: Key, mode: WheelMode) -> Self {
        let rotation = match mode {
            WheelMode::Rotating => base_rotation(&key),
            WheelMode::Fixed => 0.0,
        };
        Self {
            rotation,
            mode,
            position: key.position(),
            locked: false,
        }
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn mode(&self) -> WheelMode {
        self.mode
    }

    pub fn selected_key(&self) -> Key {
        Key::from_position(self.position as i32)
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    /// Jump to `key` along the shortest path. Returns `false` when locked.
    pub fn select_key(&mut self, key: Key) -> bool {
        if self.locked {
            trace!(key = key.name(), "wheel locked, ignoring key change");
            return false;
        }
        let rotation = compute_wheel_rotation(self.rotation, &key, self.mode);
        trace!(from = self.rotation, to = rotation, key = key.name(), "jump to key");
        self.rotation = rotation;
        self.position = key.position();
        true
    }

    /// Move `steps` keys clockwise (negative = counter-clockwise), 30° a step.
    ///
    /// Rotation accumulates without unwinding at 360°. Returns `false` when
    /// locked.
    pub fn nudge(&mut self, steps: i32) -> bool {
        if self.locked {
            trace!(steps, "wheel locked, ignoring nudge");
            return false;
        }
        let key = self.selected_key().step(steps);
        if self.mode == WheelMode::Rotating {
            self.rotation -= steps as f64 * DEGREES_PER_KEY;
        }
        trace!(steps, rotation = self.rotation, key = key.name(), "nudge");
        self.position = key.position();
        true
    }

    /// Switch display mode, keeping the selected key.
    ///
    /// Entering `Rotating` snaps to the key's base rotation; entering `Fixed`
    /// resets rotation to 0. Returns `false` when locked.
    pub fn set_mode(&mut self, mode: WheelMode) -> bool {
        if self.locked {
            trace!(?mode, "wheel locked, ignoring mode change");
            return false;
        }
        self.mode = mode;
        self.rotation = match mode {
            WheelMode::Rotating => base_rotation(&self.selected_key()),
            WheelMode::Fixed => 0.0,
        };
        trace!(?mode, rotation = self.rotation, "wheel mode changed");
        true
    }

    /// Angle of the highlight marker, clockwise from the reference position.
    pub fn marker_angle(&self) -> f64 {
        match self.mode {
            WheelMode::Rotating => 0.0,
            WheelMode::Fixed => self.position as f64 * DEGREES_PER_KEY,
        }
    }

    /// Key currently drawn at the reference position.
    pub fn key_at_reference(&self) -> Key {
        let steps = (-self.rotation / DEGREES_PER_KEY).round() as i32;
        Key::from_position(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Key {
        name.parse().unwrap()
    }

    #[test]
    fn test_jump_from_rest() {
        assert_eq!(compute_wheel_rotation(0.0, &key("G"), WheelMode::Rotating), -30.0);
        assert_eq!(compute_wheel_rotation(0.0, &key("F"), WheelMode::Rotating), 30.0);
        assert_eq!(compute_wheel_rotation(0.0, &key("Eb"), WheelMode::Rotating), 90.0);
        assert_eq!(compute_wheel_rotation(0.0, &key("A"), WheelMode::Rotating), -90.0);
    }

    #[test]
    fn test_jump_keeps_accumulated_turns() {
        // Two full clockwise turns past C, then on to G.
        assert_eq!(compute_wheel_rotation(-720.0, &key("G"), WheelMode::Rotating), -750.0);
        // From F after a turn, C is one step further round.
        assert_eq!(compute_wheel_rotation(-330.0, &key("C"), WheelMode::Rotating), -360.0);
    }

    #[test]
    fn test_fixed_mode_is_always_zero() {
        for k in Key::all() {
            assert_eq!(compute_wheel_rotation(1234.0, &k, WheelMode::Fixed), 0.0);
        }
    }

    #[test]
    fn test_shortest_delta_bounds() {
        assert_eq!(shortest_delta(0.0, -180.0), 180.0);
        assert_eq!(shortest_delta(0.0, 190.0), -170.0);
        assert_eq!(shortest_delta(10.0, 10.0 + 3600.0), 0.0);
    }

    #[test]
    fn test_nudge_never_unwinds() {
        let mut wheel = KeyWheel::new(key("B"), WheelMode::Rotating);
        assert_eq!(wheel.rotation(), -150.0);
        for _ in 0..12 {
            assert!(wheel.nudge(1));
        }
        assert_eq!(wheel.rotation(), -510.0);
        assert_eq!(wheel.selected_key(), key("B"));
        assert_eq!(wheel.key_at_reference(), key("B"));

        assert!(wheel.nudge(-2));
        assert_eq!(wheel.rotation(), -450.0);
        assert_eq!(wheel.selected_key(), key("A"));
    }

    #[test]
    fn test_huge_nudge_wraps_key() {
        let mut wheel = KeyWheel::new(key("C"), WheelMode::Fixed);
        assert!(wheel.nudge(i32::MAX));
        // i32::MAX = 12 * 178956970 + 7
        assert_eq!(wheel.selected_key(), Key::from_position(7));
        assert!(wheel.nudge(i32::MIN));
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_nudge_in_fixed_mode_moves_marker() {
        let mut wheel = KeyWheel::new(key("C"), WheelMode::Fixed);
        assert!(wheel.nudge(-1));
        assert_eq!(wheel.rotation(), 0.0);
        assert_eq!(wheel.selected_key(), key("F"));
        assert_eq!(wheel.marker_angle(), 330.0);
    }

    #[test]
    fn test_lock_blocks_changes() {
        let mut wheel = KeyWheel::new(key("D"), WheelMode::Rotating);
        wheel.nudge(12);
        let before = wheel.clone();
        wheel.set_locked(true);
        assert!(!wheel.select_key(key("Ab")));
        assert!(!wheel.nudge(3));
        assert_eq!(wheel.rotation(), before.rotation());
        assert_eq!(wheel.selected_key(), key("D"));

        wheel.set_locked(false);
        assert!(wheel.select_key(key("Ab")));
        assert_eq!(wheel.selected_key(), key("Ab"));
    }

    #[test]
    fn test_lock_blocks_mode_switch() {
        let mut wheel = KeyWheel::new(key("A"), WheelMode::Rotating);
        wheel.nudge(12);
        let before = wheel.clone();
        wheel.set_locked(true);

        assert!(!wheel.set_mode(WheelMode::Fixed));
        assert_eq!(wheel.rotation(), -450.0);
        assert_eq!(wheel.mode(), WheelMode::Rotating);

        wheel.set_locked(false);
        assert_eq!(wheel, before);
        assert!(wheel.set_mode(WheelMode::Fixed));
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_mode_switch_snaps_rotation() {
        let mut wheel = KeyWheel::new(key("E"), WheelMode::Rotating);
        wheel.nudge(24);
        assert_eq!(wheel.rotation(), -840.0);

        assert!(wheel.set_mode(WheelMode::Fixed));
        assert_eq!(wheel.rotation(), 0.0);
        assert_eq!(wheel.marker_angle(), 120.0);

        assert!(wheel.set_mode(WheelMode::Rotating));
        assert_eq!(wheel.rotation(), -120.0);
        assert_eq!(wheel.selected_key(), key("E"));
    }

    #[test]
    fn test_wheel_state_roundtrips_through_json() {
        let mut wheel = KeyWheel::new(key("Db"), WheelMode::Rotating);
        wheel.set_locked(true);
        let json = serde_json::to_string(&wheel).unwrap();
        assert!(json.contains("\"mode\":\"rotating\""));
        let restored: KeyWheel = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, wheel);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(WheelMode::from_str("Fixed"), Some(WheelMode::Fixed));
        assert_eq!(WheelMode::from_str("rotating"), Some(WheelMode::Rotating));
        assert_eq!(WheelMode::from_str("spin"), None);
    }
}
