//! Prints what an Aseprite file decodes to and optionally exports its frames

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use aseprite_frames::Sprite;
use clap::Parser;
use itertools::Itertools;

/// Decode an Aseprite file and print its frames, tags and decode warnings
#[derive(Parser)]
#[command(name = "asedump")]
#[command(version)]
struct Cli {
    /// Input .ase/.aseprite file
    input: PathBuf,

    /// Directory to write each frame to as frame_<n>.png
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the frame order played for this animation name
    #[arg(short, long)]
    tag: Option<String>,

    /// Fail if the file needed any recovery while decoding
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<bool> {
    let sprite = Sprite::from_file(&cli.input)?;

    println!(
        "{}: {}x{}, {:?}, {:?} layout, {} of {} frames",
        cli.input.display(),
        sprite.canvas_width(),
        sprite.canvas_height(),
        sprite.header.color_depth,
        sprite.header.layout,
        sprite.frames.len(),
        sprite.header.frames,
    );
    println!(
        "durations (ms): {}",
        sprite.frames.iter().map(|frame| frame.duration).join(", ")
    );
    for tag in &sprite.tags {
        println!(
            "tag {:?}: frames {}..={} {} x{}",
            tag.name, tag.from, tag.to, tag.direction, tag.repeat
        );
    }

    if let Some(name) = &cli.tag {
        match sprite.animation_range(name) {
            Some(range) => println!(
                "{name} -> {:?}: [{}]",
                range.name,
                range.playback_order().iter().join(", ")
            ),
            None => println!("{name} -> no frames"),
        }
    }

    if let Some(dir) = &cli.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        for (index, frame) in sprite.frames.iter().enumerate() {
            let path = dir.join(format!("frame_{index}.png"));
            frame
                .image
                .save_with_format(&path, image::ImageFormat::Png)
                .with_context(|| format!("writing {}", path.display()))?;
        }
        log::info!("wrote {} frames to {}", sprite.frames.len(), dir.display());
    }

    for warning in &sprite.warnings {
        println!("warning: {warning}");
    }
    Ok(!(cli.strict && !sprite.warnings.is_empty()))
}
