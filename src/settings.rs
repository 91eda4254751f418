//! Numeric constants and runtime configuration.
//!
//! Constants that the kernel itself depends on live here as plain `const`s.
//! Defaults for new sample planes are runtime settings, loaded in layers:
//! `config/default.toml` (or `config/local.toml` when present), then
//! `MMPLANE__*` environment variables, then command line overrides.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Regularisation epsilon used by the vector norms.
pub const DEFAULT_EPS: f64 = 1e-7;
/// Minimum axis length accepted when building a rotation matrix.
pub const AXIS_NORM_THRESHOLD: f64 = 1e-12;
/// Default sample point marker radius, as a fraction of the length scale.
pub const DEFAULT_SCALE_MULTIPLIER: f64 = 0.05;
/// Default tessellation of a sample point marker in both angles.
pub const DEFAULT_POINT_RESOLUTION: u32 = 30;
/// Default plane distance from the target, in multiples of the length scale.
pub const DEFAULT_DISTANCE_FACTOR: f64 = 2.0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_builtin_defaults() {
        let settings = load_default_config().unwrap();
        assert_eq!(settings.plane, PlaneSettings::default());
    }

    #[test]
    fn cli_overrides_config() {
        let args = CliArgs::parse_from([
            "mmplane",
            "--scale-multiplier",
            "0.1",
            "--theta",
            "-45",
            "--target",
            "1",
            "-2",
            "3",
        ]);
        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings.plane.scale_multiplier, 0.1);
        assert_eq!(settings.plane.theta, -45.0);
        assert_eq!(args.target, Some(vec![1.0, -2.0, 3.0]));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.plane.point_resolution_phi = 0;
        assert!(settings.validate().is_err());

        settings.plane.point_resolution_phi = 8;
        settings.plane.scale_multiplier = -1.0;
        assert!(settings.validate().is_err());

        for bad in [f64::NAN, f64::INFINITY, 0.0] {
            settings.plane.scale_multiplier = bad;
            assert!(settings.validate().is_err(), "scale multiplier {}", bad);
        }

        settings.plane.scale_multiplier = 0.05;
        settings.plane.width_factor = f64::NAN;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn display_ends_on_the_angles_line() {
        let text = Settings::default().to_string();
        assert!(text.starts_with("Settings:"));
        assert!(text.ends_with("0.000, 0.000, 0.000"), "{:?}", text);
    }

    #[test]
    fn settings_round_trip_through_toml() {
        let settings = Settings::default();
        let text = settings.to_toml().unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub plane: PlaneSettings,
}

/// Initial state of a newly created sample plane.
///
/// Lengths are factors of the length scale the plane is created with, so
/// the same configuration works for meshes of any size.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PlaneSettings {
    pub scale_multiplier: f64,
    pub point_resolution_theta: u32,
    pub point_resolution_phi: u32,
    pub distance_factor: f64,
    pub width_factor: f64,
    pub height_factor: f64,
    /// Polar angle in degrees.
    pub theta: f64,
    /// Azimuthal angle in degrees.
    pub phi: f64,
    /// In-plane orientation angle in degrees.
    pub gamma: f64,
}

impl Default for PlaneSettings {
    fn default() -> Self {
        Self {
            scale_multiplier: DEFAULT_SCALE_MULTIPLIER,
            point_resolution_theta: DEFAULT_POINT_RESOLUTION,
            point_resolution_phi: DEFAULT_POINT_RESOLUTION,
            distance_factor: DEFAULT_DISTANCE_FACTOR,
            width_factor: 1.0,
            height_factor: 1.0,
            theta: 0.0,
            phi: 0.0,
            gamma: 0.0,
        }
    }
}

impl Settings {
    /// Checks that the settings describe a drawable plane.
    pub fn validate(&self) -> Result<()> {
        let plane = &self.plane;
        if !(plane.scale_multiplier > 0.0) || !plane.scale_multiplier.is_finite() {
            return Err(anyhow!(
                "scale multiplier must be finite and positive, got {}",
                plane.scale_multiplier
            ));
        }
        if plane.point_resolution_theta == 0 || plane.point_resolution_phi == 0 {
            return Err(anyhow!(
                "point resolutions must be non-zero, got {} x {}",
                plane.point_resolution_theta,
                plane.point_resolution_phi
            ));
        }
        for (name, value) in [
            ("distance factor", plane.distance_factor),
            ("width factor", plane.width_factor),
            ("height factor", plane.height_factor),
        ] {
            if value < 0.0 || !value.is_finite() {
                return Err(anyhow!("{} must be finite and non-negative, got {}", name, value));
            }
        }
        Ok(())
    }

    /// Renders the resolved settings as TOML, in the layout of `config/default.toml`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialise settings")
    }
}

/// Loads `config/default.toml` only, ignoring local overrides and the environment.
pub fn load_default_config() -> Result<Settings> {
    let root = retrieve_project_root()?;
    let default_config_file = root.join("config/default.toml");

    let settings = Config::builder()
        .add_source(File::from(default_config_file).required(true))
        .build()
        .context("error loading configuration")?;

    let config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    config.validate()?;

    Ok(config)
}

/// Loads the layered configuration and applies command line overrides.
pub fn load_config(args: &CliArgs) -> Result<Settings> {
    let root = retrieve_project_root()?;

    let default_config_file = root.join("config/default.toml");
    let local_config = root.join("config/local.toml");

    let config_file = if local_config.exists() {
        log::info!("using local configuration: {:?}", local_config);
        local_config
    } else {
        log::debug!("using default configuration: {:?}", default_config_file);
        default_config_file
    };

    let settings = Config::builder()
        .add_source(File::from(config_file).required(true))
        .add_source(Environment::with_prefix("MMPLANE").separator("__"))
        .build()
        .context("error loading configuration")?;

    let mut config: Settings = settings
        .try_deserialize()
        .context("error deserializing configuration")?;

    args.apply(&mut config);
    config.validate()?;

    log::debug!("resolved settings: {:?}", config);

    Ok(config)
}

/// Retrieve the project root directory.
///
/// Tried in order:
/// 1. `CARGO_MANIFEST_DIR`, when running under cargo.
/// 2. `MMPLANE_ROOT_DIR`, for installed binaries.
/// 3. The nearest ancestor of the executable that contains a `config` directory.
fn retrieve_project_root() -> Result<PathBuf> {
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        return Ok(PathBuf::from(manifest_dir));
    }
    if let Ok(path) = env::var("MMPLANE_ROOT_DIR") {
        return Ok(PathBuf::from(path));
    }

    let exe_path = env::current_exe().context("failed to get current executable path")?;
    exe_path
        .ancestors()
        .skip(1)
        .find(|dir| dir.join("config").is_dir())
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| anyhow!("could not find project root directory from {:?}", exe_path))
}

#[derive(Parser, Debug)]
#[command(version, about = "Print the geometry of a sample plane")]
pub struct CliArgs {
    /// Sizing reference for the plane, usually the diagonal of the mesh bounding box.
    #[arg(short, long, default_value_t = 1.0)]
    pub length_scale: f64,

    /// Polar angle of the plane normal, in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub theta: Option<f64>,

    /// Azimuthal angle of the plane normal, in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub phi: Option<f64>,

    /// Rotation of the plane about its normal, in degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub gamma: Option<f64>,

    /// Distance of the plane centre from the target. Defaults to `distance_factor * length_scale`.
    #[arg(short, long, allow_negative_numbers = true)]
    pub r: Option<f64>,

    /// Plane width. Defaults to `width_factor * length_scale`.
    #[arg(long)]
    pub width: Option<f64>,

    /// Plane height. Defaults to `height_factor * length_scale`.
    #[arg(long)]
    pub height: Option<f64>,

    /// Target point the plane is positioned around.
    /// Format: x y z
    #[arg(long, num_args = 3, value_delimiter = ' ', allow_negative_numbers = true)]
    pub target: Option<Vec<f64>>,

    /// Marker radius as a fraction of the length scale.
    #[arg(long)]
    pub scale_multiplier: Option<f64>,

    /// Print the geometry as JSON.
    #[arg(long)]
    pub json: bool,

    /// Print the resolved configuration as TOML and exit.
    #[arg(long)]
    pub dump_config: bool,
}

impl CliArgs {
    /// Overrides the configured plane defaults with values given on the command line.
    pub fn apply(&self, config: &mut Settings) {
        if let Some(scale_multiplier) = self.scale_multiplier {
            config.plane.scale_multiplier = scale_multiplier;
        }
        if let Some(theta) = self.theta {
            config.plane.theta = theta;
        }
        if let Some(phi) = self.phi {
            config.plane.phi = phi;
        }
        if let Some(gamma) = self.gamma {
            config.plane.gamma = gamma;
        }
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Settings:
  - Scale Multiplier: {:.6}
  - Point Resolution: {} x {}
  - Distance Factor: {:.6}
  - Width Factor: {:.6}
  - Height Factor: {:.6}
  - Angles (theta, phi, gamma): {:.3}, {:.3}, {:.3}",
            self.plane.scale_multiplier,
            self.plane.point_resolution_theta,
            self.plane.point_resolution_phi,
            self.plane.distance_factor,
            self.plane.width_factor,
            self.plane.height_factor,
            self.plane.theta,
            self.plane.phi,
            self.plane.gamma,
        )
    }
}
