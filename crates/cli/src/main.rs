#![deny(unsafe_code)]
//! CLI binary for the glint visual-effects engines.
//!
//! Subcommands:
//! - `render <effect>` — run an effect N steps, write a PNG snapshot
//! - `list` — print available effects

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use glint_core::{Effect, InputEvent, MotionPreference, Recipe, Rgba};
use glint_engines::EffectKind;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "glint", about = "Canvas-style visual effects CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run an effect for N steps and write a PNG snapshot.
    Render {
        /// Effect name (e.g. "particle-field").
        effect: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 480)]
        width: usize,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 270)]
        height: usize,

        /// Number of animation steps.
        #[arg(short, long, default_value_t = 120)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Frame rate the step interval is derived from.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// Background color behind the (possibly transparent) effect.
        #[arg(short, long, default_value = "#000000")]
        background: String,

        /// Scripted pointer position "x,y", applied before stepping.
        #[arg(long)]
        pointer: Option<String>,

        /// Send a pointer-enter event before stepping.
        #[arg(long)]
        hover: bool,

        /// Honor reduced-motion: render the static initial frame only.
        #[arg(long)]
        reduced_motion: bool,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,

        /// Effect parameters as a JSON string.
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available effects.
    List,
}

/// Parses a `--pointer` value of the form "x,y".
fn parse_pointer(spec: &str) -> Result<(f64, f64), CliError> {
    let bad = || CliError::Input(format!("invalid --pointer '{spec}', expected x,y"));
    let (x, y) = spec.split_once(',').ok_or_else(bad)?;
    let x = x.trim().parse::<f64>().map_err(|_| bad())?;
    let y = y.trim().parse::<f64>().map_err(|_| bad())?;
    Ok((x, y))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let effects = EffectKind::list_effects();
            if cli.json {
                let info = serde_json::json!({ "effects": effects });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Effects:");
                for name in effects {
                    println!("  {name}");
                }
            }
        }
        Command::Render {
            effect,
            width,
            height,
            steps,
            seed,
            fps,
            background,
            pointer,
            hover,
            reduced_motion,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let background =
                Rgba::from_hex(&background).map_err(|e| CliError::Input(e.to_string()))?;

            if fps <= 0.0 {
                return Err(CliError::Input(format!("invalid --fps {fps}")));
            }

            let motion = if reduced_motion {
                MotionPreference::Reduced
            } else {
                MotionPreference::Full
            };
            // Reduced motion renders the initial frame and nothing else.
            let steps = match motion {
                MotionPreference::Reduced => 0,
                MotionPreference::Full => steps,
            };

            let recipe = Recipe {
                effect: effect.clone(),
                width,
                height,
                params: params.clone(),
                seed,
                steps,
            };
            recipe.validate()?;

            let mut eff =
                EffectKind::from_name(&recipe.effect, width, height, seed, &recipe.params)?;

            if hover {
                eff.handle_event(&InputEvent::PointerEnter);
            }
            if let Some(spec) = &pointer {
                let (x, y) = parse_pointer(spec)?;
                eff.handle_event(&InputEvent::PointerMove { x, y });
            }

            let dt = 1.0 / fps;
            (0..steps).try_for_each(|_| eff.step(dt))?;

            glint_engines::snapshot::write_png(eff.surface(), background, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "recipe": recipe,
                    "phase": format!("{:?}", eff.phase()),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {effect} ({width}x{height}, {steps} steps, seed {seed}) -> {}",
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
