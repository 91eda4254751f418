use anyhow::{Context, Result};
use clap::Parser;
use mmplane::settings::{self, CliArgs};
use mmplane::{SamplePlane, Vector3};

fn main() -> Result<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let settings = settings::load_config(&args)?;

    if args.dump_config {
        print!("{}", settings.to_toml()?);
        return Ok(());
    }

    let mut plane = SamplePlane::from_settings(args.length_scale, &settings.plane);
    if let Some(r) = args.r {
        plane.set_r(r);
    }
    if let Some(width) = args.width {
        plane.set_width(width);
    }
    if let Some(height) = args.height {
        plane.set_height(height);
    }
    if let Some(target) = &args.target {
        plane.set_target(Vector3::from_slice(target).context("invalid --target")?);
    }

    if args.json {
        let json = serde_json::to_string_pretty(&plane.geometry())
            .context("failed to serialise plane geometry")?;
        println!("{}", json);
    } else {
        println!("{}", plane);
    }

    Ok(())
}
