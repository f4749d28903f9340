//! Player input
//!
//! Window polling lives outside this crate; anything that can say which
//! controls are held on a given frame implements [`InputSource`].

use serde::{Deserialize, Serialize};

/// Controls held during one frame
///
/// Turns use the world's y-up frame: left is counter-clockwise and maps to a
/// positive angle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// Turn the hull counter-clockwise (positive angle)
    pub hull_left: bool,
    /// Turn the hull clockwise (negative angle)
    pub hull_right: bool,
    /// Drive along the hull's facing
    pub forward: bool,
    /// Reverse against the hull's facing
    pub backward: bool,
    /// Turn the turret counter-clockwise (positive angle)
    pub turret_left: bool,
    /// Turn the turret clockwise (negative angle)
    pub turret_right: bool,
    /// Fire when the cooldown allows
    pub fire: bool,
}

impl InputState {
    /// -1, 0 or 1 from a pair of opposing controls
    pub fn axis(negative: bool, positive: bool) -> f32 {
        match (negative, positive) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    /// Hull turn direction, positive counter-clockwise
    pub fn hull_turn(&self) -> f32 {
        Self::axis(self.hull_right, self.hull_left)
    }

    /// Drive direction
    pub fn drive(&self) -> f32 {
        Self::axis(self.backward, self.forward)
    }

    /// Turret turn direction, positive counter-clockwise
    pub fn turret_turn(&self) -> f32 {
        Self::axis(self.turret_right, self.turret_left)
    }
}

/// Supplies input once per frame
pub trait InputSource {
    /// Controls held on `frame`
    fn poll(&mut self, frame: u64) -> InputState;
}

/// Hold one input state for a number of frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// How many frames this step lasts
    pub frames: u64,
    /// Controls held meanwhile
    pub input: InputState,
}

impl ScriptStep {
    /// Create a script step
    pub const fn new(frames: u64, input: InputState) -> Self {
        Self { frames, input }
    }
}

/// Replays a looping list of steps
///
/// An empty script (or one whose steps are all zero frames long) holds
/// nothing down. The cycle length saturates at `u64::MAX`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    steps: Vec<ScriptStep>,
    cycle: u64,
}

impl ScriptedInput {
    /// Create a scripted source
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        let cycle = steps.iter().fold(0u64, |total, step| total.saturating_add(step.frames));
        Self { steps, cycle }
    }

    /// Frames in one pass over the script
    pub fn cycle_length(&self) -> u64 {
        self.cycle
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, frame: u64) -> InputState {
        if self.cycle == 0 {
            return InputState::default();
        }
        let mut offset = frame % self.cycle;
        for step in &self.steps {
            if offset < step.frames {
                return step.input;
            }
            offset -= step.frames;
        }
        InputState::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_cancels_opposing_controls() {
        assert_eq!(InputState::axis(true, true), 0.0);
        assert_eq!(InputState::axis(true, false), -1.0);
        let input = InputState { forward: true, turret_right: true, ..InputState::default() };
        assert_eq!(input.drive(), 1.0);
        assert_eq!(input.turret_turn(), -1.0);
        assert_eq!(input.hull_turn(), 0.0);
    }

    #[test]
    fn test_left_turns_are_positive() {
        let left = InputState { hull_left: true, turret_left: true, ..InputState::default() };
        assert_eq!(left.hull_turn(), 1.0);
        assert_eq!(left.turret_turn(), 1.0);
        let right = InputState { hull_right: true, ..InputState::default() };
        assert_eq!(right.hull_turn(), -1.0);
    }

    #[test]
    fn test_huge_steps_saturate_cycle() {
        let fire = InputState { fire: true, ..InputState::default() };
        let drive = InputState { forward: true, ..InputState::default() };
        let mut script = ScriptedInput::new(vec![ScriptStep::new(u64::MAX, fire), ScriptStep::new(u64::MAX, drive)]);
        assert_eq!(script.cycle_length(), u64::MAX);
        assert_eq!(script.poll(0), fire);
        assert_eq!(script.poll(u64::MAX - 1), fire);
    }

    #[test]
    fn test_script_loops() {
        let fire = InputState { fire: true, ..InputState::default() };
        let drive = InputState { forward: true, ..InputState::default() };
        let mut script = ScriptedInput::new(vec![ScriptStep::new(2, fire), ScriptStep::new(3, drive)]);
        assert_eq!(script.cycle_length(), 5);
        assert_eq!(script.poll(0), fire);
        assert_eq!(script.poll(1), fire);
        assert_eq!(script.poll(2), drive);
        assert_eq!(script.poll(4), drive);
        assert_eq!(script.poll(5), fire);
    }

    #[test]
    fn test_empty_script_holds_nothing() {
        let mut script = ScriptedInput::new(Vec::new());
        assert_eq!(script.poll(10), InputState::default());
    }
}
