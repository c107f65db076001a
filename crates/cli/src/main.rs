#![deny(unsafe_code)]
//! CLI binary for the confetti engine.
//!
//! Subcommands:
//! - `render` — run a seeded confetti field N frames, write a PNG
//! - `trace` — run N frames, print particle state (or draw calls) as JSON
//! - `slug <name>` — print the slug, photo path and share link for a greeting
//! - `list` — print palettes and the field parameter schema

mod error;

use clap::{Parser, Subcommand};
use confetti_core::greeting::{photo_storage_path, share_link, unique_slug, Submission};
use confetti_core::{FieldConfig, Palette, ParticleField, RecordingSurface};
use error::CliError;
use std::path::PathBuf;
use std::process;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "confetti", about = "Birthday-greeting confetti CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Surface width in pixels.
    #[arg(short = 'W', long, default_value_t = 800)]
    width: usize,

    /// Surface height in pixels.
    #[arg(short = 'H', long, default_value_t = 600)]
    height: usize,

    /// Number of frames to advance before output.
    #[arg(short, long, default_value_t = 120)]
    frames: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Palette name; overrides any "palette" in --params.
    #[arg(short, long)]
    palette: Option<String>,

    /// Field parameters as a JSON object (see `confetti list`).
    #[arg(long, default_value = "{}")]
    params: String,
}

impl SessionArgs {
    fn config(&self) -> Result<FieldConfig, CliError> {
        let params: serde_json::Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut config = FieldConfig::from_json(&params);
        if let Some(palette) = &self.palette {
            config.palette = palette.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Advance a confetti field and write the last frame as a PNG.
    Render {
        #[command(flatten)]
        session: SessionArgs,

        /// Output file path.
        #[arg(short, long, default_value = "confetti.png")]
        output: PathBuf,
    },
    /// Advance a confetti field and print its state as JSON.
    Trace {
        #[command(flatten)]
        session: SessionArgs,

        /// Print the last frame's draw calls instead of particle state.
        #[arg(long)]
        draw: bool,
    },
    /// Build the slug, photo storage path and share link for a greeting.
    Slug {
        /// Name of the birthday person.
        name: String,

        /// Creation time in milliseconds since the Unix epoch (default: now).
        #[arg(long)]
        timestamp: Option<u64>,

        /// Site origin used for the share link.
        #[arg(long, default_value = "http://localhost:3000")]
        origin: String,

        /// Uploaded photo file name.
        #[arg(long, default_value = "photo.jpg")]
        file: String,

        /// MIME type of the uploaded photo.
        #[arg(long, default_value = "image/jpeg")]
        content_type: String,
    },
    /// List palettes and field parameters.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let palettes = Palette::list_names();
            let schema = FieldConfig::param_schema();
            if cli.json {
                let info = serde_json::json!({ "palettes": palettes, "params": schema });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                println!("Params:");
                if let Some(params) = schema.as_object() {
                    for (name, spec) in params {
                        let description = spec["description"].as_str().unwrap_or("");
                        println!("  {name} (default {}): {description}", spec["default"]);
                    }
                }
            }
        }
        Command::Render { session, output } => {
            let config = session.config()?;
            let (field, surface) = confetti_raster::render_session(
                &config,
                session.width,
                session.height,
                session.seed,
                session.frames,
            )?;
            confetti_raster::snapshot::write_png(&surface, &output)?;
            info!(path = %output.display(), covered = surface.covered(), "snapshot written");

            if cli.json {
                let info = serde_json::json!({
                    "width": session.width,
                    "height": session.height,
                    "frames": field.frame(),
                    "seed": session.seed,
                    "particles": field.len(),
                    "params": config.params(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} pieces ({}x{}, {} frames, seed {}) -> {}",
                    field.len(),
                    session.width,
                    session.height,
                    field.frame(),
                    session.seed,
                    output.display()
                );
            }
        }
        Command::Trace { session, draw } => {
            let config = session.config()?;
            let mut field = ParticleField::start(
                &config,
                session.width as f64,
                session.height as f64,
                session.seed,
            )?;
            (0..session.frames).for_each(|_| field.tick());
            debug!(frames = field.frame(), "trace complete");

            let out = if draw {
                let mut surface = RecordingSurface::new(field.width(), field.height());
                field.render(&mut surface);
                serde_json::json!({ "frame": field.frame(), "commands": surface.commands() })
            } else {
                serde_json::json!({
                    "frame": field.frame(),
                    "width": field.width(),
                    "height": field.height(),
                    "particles": field.particles(),
                })
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Command::Slug {
            name,
            timestamp,
            origin,
            file,
            content_type,
        } => {
            let submission = Submission {
                name: name.clone(),
                file_name: file.clone(),
                content_type,
            };
            submission.validate()?;
            let created_at = timestamp.unwrap_or_else(now_ms);
            let slug = unique_slug(&name, created_at);
            let path = photo_storage_path(&slug, &file);
            let link = share_link(&origin, &slug);

            if cli.json {
                let info = serde_json::json!({
                    "slug": slug,
                    "createdAt": created_at,
                    "photoPath": path,
                    "link": link,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("slug:  {slug}");
                println!("photo: {path}");
                println!("link:  {link}");
            }
        }
    }

    Ok(())
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

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
