/// Gamepad input tracker using gilrs.
///
/// Button mapping comes from the `[gamepad]` table of config.toml.
/// Default mapping:
///   D-pad / Left Stick    →  Hop
///   A                     →  Toggle pickup
///   Start                 →  Skip round
///   Select                →  Quit

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::entity::{Command, MoveDir};

const STICK_DEADZONE: f32 = 0.25;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,
    R1,
    Start,
    Select,
}

const BTN_COUNT: usize = 8;

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(Btn::A),
            "B" | "EAST"  => Some(Btn::B),
            "X" | "WEST"  => Some(Btn::X),
            "Y" | "NORTH" => Some(Btn::Y),
            "L1" | "LB" => Some(Btn::L1),
            "R1" | "RB" => Some(Btn::R1),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South => Some(Btn::A),
            Button::East  => Some(Btn::B),
            Button::West  => Some(Btn::X),
            Button::North => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::Start  => Some(Btn::Start),
            Button::Select => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Action-to-button mapping.
struct ActionMap {
    pickup: Vec<Btn>,
    skip_round: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            pickup:     vec![Btn::A],
            skip_round: vec![Btn::Start],
            quit:       vec![Btn::Select],
        }
    }
}

impl ActionMap {
    /// Names that don't parse are dropped; an empty list keeps the default.
    fn from_config(cfg: &GamepadConfig) -> Self {
        fn parse_list(names: &[String], fallback: Vec<Btn>) -> Vec<Btn> {
            let list: Vec<Btn> = names.iter().filter_map(|s| Btn::from_name(s)).collect();
            if list.is_empty() { fallback } else { list }
        }
        let default = ActionMap::default();
        ActionMap {
            pickup: parse_list(&cfg.pickup, default.pickup),
            skip_round: parse_list(&cfg.skip_round, default.skip_round),
            quit: parse_list(&cfg.quit, default.quit),
        }
    }
}

fn dir_index(dir: MoveDir) -> usize {
    match dir {
        MoveDir::Up => 0,
        MoveDir::Down => 1,
        MoveDir::Left => 2,
        MoveDir::Right => 3,
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    /// Buttons pressed since the last `update` (edge only).
    pressed: [bool; BTN_COUNT],
    dpad: [bool; 4],
    stick_x: f32,
    stick_y: f32,

    action_map: ActionMap,
}

impl GamepadState {
    pub fn new(cfg: &GamepadConfig) -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs_opt = Gilrs::new().ok();

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            pressed: [false; BTN_COUNT],
            dpad: [false; 4],
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::from_config(cfg),
        }
    }

    pub fn update(&mut self) {
        self.pressed = [false; BTN_COUNT];

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => self.set_button(btn, true),
                EventType::ButtonReleased(btn, _) => self.set_button(btn, false),
                EventType::AxisChanged(Axis::LeftStickX, value, _) => self.stick_x = value,
                EventType::AxisChanged(Axis::LeftStickY, value, _) => self.stick_y = value,
                EventType::Disconnected => self.release_all(),
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        let dir = match gilrs_btn {
            Button::DPadUp => Some(MoveDir::Up),
            Button::DPadDown => Some(MoveDir::Down),
            Button::DPadLeft => Some(MoveDir::Left),
            Button::DPadRight => Some(MoveDir::Right),
            _ => None,
        };
        if let Some(dir) = dir {
            self.dpad[dir_index(dir)] = held;
            return;
        }

        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            if held { self.pressed[btn as usize] = true; }
        }
    }

    // ── Queries ──

    fn any_just_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.pressed[b as usize])
    }

    fn held(&self, dir: MoveDir) -> bool {
        let stick = match dir {
            MoveDir::Up => self.stick_y > STICK_DEADZONE,
            MoveDir::Down => self.stick_y < -STICK_DEADZONE,
            MoveDir::Left => self.stick_x < -STICK_DEADZONE,
            MoveDir::Right => self.stick_x > STICK_DEADZONE,
        };
        stick || self.dpad[dir_index(dir)]
    }

    /// This frame's command, same precedence as the keyboard.
    pub fn command(&self) -> Command {
        let map = &self.action_map;
        if self.any_just_pressed(&map.quit) { return Command::Quit; }
        if self.any_just_pressed(&map.skip_round) { return Command::SkipRound; }
        if self.any_just_pressed(&map.pickup) { return Command::TogglePickup; }
        [MoveDir::Up, MoveDir::Down, MoveDir::Left, MoveDir::Right]
            .into_iter()
            .find(|&d| self.held(d))
            .map(Command::Move)
            .unwrap_or_default()
    }

    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn release_all(&mut self) {
        self.pressed = [false; BTN_COUNT];
        self.dpad = [false; 4];
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
