/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to built-in defaults if the file is missing, unreadable,
/// or incomplete. A broken config is never fatal.
///
/// ```toml
/// [game]
/// frog_color = 4
/// frog_symbol = "F"
/// number_of_bounces = 3
/// max_time = 60
///
/// [tuning]
/// look_ahead = 4
/// ```

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug, Default)]
pub struct GameConfig {
    pub rules: RulesConfig,
    pub look: LookConfig,
    pub tuning: TuningConfig,
    pub gamepad: GamepadConfig,
}

/// Round rules: lifecycle thresholds and round length.
#[derive(Clone, Debug)]
pub struct RulesConfig {
    pub number_of_bounces: u32,
    pub number_of_wraps: u32,
    pub max_time: u32,       // seconds per round
}

/// Display characters and palette indices.
#[derive(Clone, Debug)]
pub struct LookConfig {
    pub frog_color: u8,
    pub passive_car_color: u8,
    pub aggressive_car_color: u8,
    pub friendly_car_color: u8,
    pub frog_symbol: char,
    pub car_symbol: char,
    pub border_symbol: char,
    pub lane_separator: char,
}

/// Simulation tunables. None of these are load-bearing beyond being small
/// positive numbers.
#[derive(Clone, Debug)]
pub struct TuningConfig {
    pub tick_rate_ms: u64,
    pub car_step: f32,             // cells per frame per speed tier
    pub overlap_tolerance: usize,  // columns either side of a car that count as a hit
    pub look_ahead: usize,         // columns in front of a car that count as approaching
    pub jump_delay_ms: u64,
    pub speed_change_interval: u64, // seconds
    pub obstacle_count: usize,
    pub seed: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct GamepadConfig {
    pub pickup: Vec<String>,
    pub skip_round: Vec<String>,
    pub quit: Vec<String>,
}

// ── Errors ──

/// Why a config file could not be used. Always recovered by `load()`.
#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "could not read {}: {source}", path.display())
            }
            ConfigError::Parse { path, source } => {
                write!(f, "{} parse error: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    tuning: TomlTuning,
    #[serde(default)]
    gamepad: TomlGamepad,
}

#[derive(Deserialize, Debug)]
struct TomlGame {
    #[serde(default = "default_frog_color")]
    frog_color: u8,
    #[serde(default = "default_passive_color")]
    passive_car_color: u8,
    #[serde(default = "default_aggressive_color")]
    aggressive_car_color: u8,
    #[serde(default = "default_friendly_color")]
    friendly_car_color: u8,
    #[serde(default = "default_frog_symbol")]
    frog_symbol: String,
    #[serde(default = "default_car_symbol")]
    car_symbol: String,
    #[serde(default = "default_border_symbol")]
    border_symbol: String,
    #[serde(default = "default_lane_separator")]
    lane_separator: String,
    #[serde(default = "default_bounces")]
    number_of_bounces: u32,
    #[serde(default = "default_wraps")]
    number_of_wraps: u32,
    #[serde(default = "default_max_time")]
    max_time: u32,
}

#[derive(Deserialize, Debug)]
struct TomlTuning {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
    #[serde(default = "default_car_step")]
    car_step: f32,
    #[serde(default = "default_overlap")]
    overlap_tolerance: usize,
    #[serde(default = "default_look_ahead")]
    look_ahead: usize,
    #[serde(default = "default_jump_delay")]
    jump_delay_ms: u64,
    #[serde(default = "default_speed_interval")]
    speed_change_interval: u64,
    #[serde(default = "default_obstacle_count")]
    obstacle_count: usize,
    #[serde(default)]
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_pickup")]
    pickup: Vec<String>,
    #[serde(default = "default_skip_round")]
    skip_round: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

// ── Defaults ──

fn default_frog_color() -> u8 { 4 }       // green
fn default_passive_color() -> u8 { 2 }    // blue
fn default_aggressive_color() -> u8 { 3 } // red
fn default_friendly_color() -> u8 { 6 }   // white
fn default_frog_symbol() -> String { "F".into() }
fn default_car_symbol() -> String { "#".into() }
fn default_border_symbol() -> String { "=".into() }
fn default_lane_separator() -> String { "-".into() }
fn default_bounces() -> u32 { 3 }
fn default_wraps() -> u32 { 3 }
fn default_max_time() -> u32 { 60 }

fn default_tick_rate() -> u64 { 15 }
fn default_car_step() -> f32 { 0.05 }
fn default_overlap() -> usize { 1 }
fn default_look_ahead() -> usize { 4 }
fn default_jump_delay() -> u64 { 300 }
fn default_speed_interval() -> u64 { 5 }
fn default_obstacle_count() -> usize { 5 }

fn default_pickup() -> Vec<String> { vec!["A".into()] }
fn default_skip_round() -> Vec<String> { vec!["Start".into()] }
fn default_quit() -> Vec<String> { vec!["Select".into()] }

impl Default for TomlGame {
    fn default() -> Self {
        TomlGame {
            frog_color: default_frog_color(),
            passive_car_color: default_passive_color(),
            aggressive_car_color: default_aggressive_color(),
            friendly_car_color: default_friendly_color(),
            frog_symbol: default_frog_symbol(),
            car_symbol: default_car_symbol(),
            border_symbol: default_border_symbol(),
            lane_separator: default_lane_separator(),
            number_of_bounces: default_bounces(),
            number_of_wraps: default_wraps(),
            max_time: default_max_time(),
        }
    }
}

impl Default for TomlTuning {
    fn default() -> Self {
        TomlTuning {
            tick_rate_ms: default_tick_rate(),
            car_step: default_car_step(),
            overlap_tolerance: default_overlap(),
            look_ahead: default_look_ahead(),
            jump_delay_ms: default_jump_delay(),
            speed_change_interval: default_speed_interval(),
            obstacle_count: default_obstacle_count(),
            seed: None,
        }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            pickup: default_pickup(),
            skip_round: default_skip_round(),
            quit: default_quit(),
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default()).rules
    }
}

impl Default for LookConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default()).look
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default()).tuning
    }
}

impl Default for GamepadConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default()).gamepad
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) `~/.local/share/jumping-frog`.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let toml_cfg = load_toml(&candidate_dirs());
        Self::from_toml(toml_cfg)
    }

    /// Parse a config from TOML text. Missing keys take their defaults.
    #[cfg(test)]
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        parse_toml(text).map(Self::from_toml)
    }

    fn from_toml(cfg: TomlConfig) -> Self {
        let game = cfg.game;
        GameConfig {
            rules: RulesConfig {
                number_of_bounces: game.number_of_bounces,
                number_of_wraps: game.number_of_wraps,
                max_time: game.max_time,
            },
            look: LookConfig {
                frog_color: game.frog_color,
                passive_car_color: game.passive_car_color,
                aggressive_car_color: game.aggressive_car_color,
                friendly_car_color: game.friendly_car_color,
                frog_symbol: first_char(&game.frog_symbol, 'F'),
                car_symbol: first_char(&game.car_symbol, '#'),
                border_symbol: first_char(&game.border_symbol, '='),
                lane_separator: first_char(&game.lane_separator, '-'),
            },
            tuning: TuningConfig {
                // A zero tick would freeze the round timer.
                tick_rate_ms: cfg.tuning.tick_rate_ms.max(1),
                car_step: positive_or(cfg.tuning.car_step, default_car_step()),
                overlap_tolerance: cfg.tuning.overlap_tolerance,
                look_ahead: cfg.tuning.look_ahead,
                jump_delay_ms: cfg.tuning.jump_delay_ms,
                speed_change_interval: cfg.tuning.speed_change_interval,
                obstacle_count: cfg.tuning.obstacle_count,
                seed: cfg.tuning.seed,
            },
            gamepad: GamepadConfig {
                pickup: cfg.gamepad.pickup,
                skip_round: cfg.gamepad.skip_round,
                quit: cfg.gamepad.quit,
            },
        }
    }
}

/// Cars only stay on the road with a finite, positive step.
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 { value } else { fallback }
}

fn parse_toml(text: &str) -> Result<TomlConfig, toml::de::Error> {
    toml::from_str::<TomlConfig>(text)
}

/// Symbols are single characters; only the first one of the value counts.
fn first_char(value: &str, fallback: char) -> char {
    value.chars().next().unwrap_or(fallback)
}

/// Candidate directories to search: exe dir + CWD + XDG data home (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/jumping-frog");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Read and parse one config file.
fn read_config(path: &Path) -> Result<TomlConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_toml(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() { continue; }
        match read_config(&path) {
            Ok(cfg) => return cfg,
            Err(e @ ConfigError::Parse { .. }) => {
                eprintln!("Warning: {e}");
                eprintln!("Using default settings.");
                return TomlConfig::default();
            }
            Err(e) => eprintln!("Warning: {e}"),
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        let cfg = GameConfig::parse("").unwrap();
        assert_eq!(cfg.rules.number_of_bounces, 3);
        assert_eq!(cfg.rules.max_time, 60);
        assert_eq!(cfg.look.frog_symbol, 'F');
        assert_eq!(cfg.tuning.look_ahead, 4);
        assert_eq!(cfg.tuning.seed, None);
    }

    #[test]
    fn partial_game_table_keeps_other_defaults() {
        let cfg = GameConfig::parse(
            "[game]\nnumber_of_wraps = 7\nfrog_color = 1\n",
        ).unwrap();
        assert_eq!(cfg.rules.number_of_wraps, 7);
        assert_eq!(cfg.look.frog_color, 1);
        assert_eq!(cfg.rules.number_of_bounces, 3);
        assert_eq!(cfg.look.aggressive_car_color, 3);
    }

    #[test]
    fn symbols_take_first_char() {
        let cfg = GameConfig::parse(
            "[game]\ncar_symbol = \"OXO\"\nborder_symbol = \"\"\n",
        ).unwrap();
        assert_eq!(cfg.look.car_symbol, 'O');
        assert_eq!(cfg.look.border_symbol, '=');
    }

    #[test]
    fn tuning_and_seed() {
        let cfg = GameConfig::parse(
            "[tuning]\nseed = 42\ntick_rate_ms = 0\noverlap_tolerance = 2\n",
        ).unwrap();
        assert_eq!(cfg.tuning.seed, Some(42));
        assert_eq!(cfg.tuning.tick_rate_ms, 1);
        assert_eq!(cfg.tuning.overlap_tolerance, 2);
    }

    #[test]
    fn non_positive_car_step_falls_back() {
        for text in ["[tuning]\ncar_step = -0.05\n", "[tuning]\ncar_step = 0.0\n", "[tuning]\ncar_step = nan\n"] {
            let cfg = GameConfig::parse(text).unwrap();
            assert_eq!(cfg.tuning.car_step, 0.05, "{text}");
        }
        let cfg = GameConfig::parse("[tuning]\ncar_step = 0.1\n").unwrap();
        assert_eq!(cfg.tuning.car_step, 0.1);
    }

    #[test]
    fn malformed_text_is_an_error() {
        assert!(GameConfig::parse("[game\nmax_time = ").is_err());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_config(Path::new("/nonexistent/jumping-frog/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("could not read"));
    }

    #[test]
    fn load_toml_without_files_uses_defaults() {
        let cfg = load_toml(&[PathBuf::from("/nonexistent/jumping-frog")]);
        assert_eq!(cfg.game.max_time, 60);
    }
}
