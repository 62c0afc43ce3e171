// line21
// Copyright (c) 2026 The line21 Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

mod frame_source;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::error;

use line21_core::{CcFilter, OutputFormat, Pipeline, PipelineConfig};

use frame_source::DirectoryFrameSource;

/// Mirrors `line21_core::config::OutputFormat`; kept as a separate type so
/// `clap::ValueEnum` only needs to be derived here, not on the core's own
/// plain-struct-with-`Default` configuration type.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum FormatArg {
    Srt,
    Srtroll,
    Scc,
    Raw,
    Debug,
    Xds,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Srt => OutputFormat::Srt,
            FormatArg::Srtroll => OutputFormat::SrtRoll,
            FormatArg::Scc => OutputFormat::Scc,
            FormatArg::Raw => OutputFormat::Raw,
            FormatArg::Debug => OutputFormat::Debug,
            FormatArg::Xds => OutputFormat::Xds,
        }
    }
}

/// Extracts burnt-in EIA-608 line-21 closed captions from a directory of
/// pre-extracted video frames, produced by a separately-invoked transcode
/// step (see the crate's Non-goals: this tool never drives `ffmpeg` itself).
#[derive(Parser, Debug)]
#[command(name = "line21", version, about)]
struct Cli {
    /// Directory of already-extracted, numerically-named frame images.
    frames_dir: PathBuf,

    /// Output format to emit.
    #[arg(long, value_enum, default_value = "srt")]
    format: FormatArg,

    /// Frame rate used as the SRT timestamp base.
    #[arg(long, default_value_t = 29.97)]
    fps: f64,

    /// Number of scan rows to search for the line-21 signal.
    #[arg(long, default_value_t = 3)]
    lines: u32,

    /// Topmost row index to start scanning from.
    #[arg(long = "start-line", default_value_t = 0)]
    start_line: u32,

    /// Restrict SRT output to one caption channel: 0 = all, 1 = CC1, 2 = CC2.
    #[arg(long = "cc-filter", default_value_t = 0)]
    cc_filter: u8,

    /// Luma threshold (0-255) above which a sampled bit is considered set.
    #[arg(long = "luma-threshold", default_value_t = 80)]
    luma_threshold: u8,

    /// Horizontal averaging width, in pixels, used at each bit center.
    #[arg(long = "sample-size", default_value_t = 3)]
    sample_size: u32,

    /// Skip releasing frames as soon as they're consumed (diagnostic use
    /// only; the default is to release eagerly).
    #[arg(long = "keep-frames")]
    keep_frames: bool,

    /// Increase logging verbosity (repeatable).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    pretty_env_logger::formatted_builder().filter_level(level).init();
}

fn run(cli: &Cli) -> line21_core::Result<()> {
    let config = PipelineConfig {
        format: cli.format.into(),
        fps: cli.fps,
        lines: cli.lines,
        start_line: cli.start_line,
        cc_filter: CcFilter::from_code(cli.cc_filter),
        luma_threshold: cli.luma_threshold,
        sample_size: cli.sample_size,
        delete_after: !cli.keep_frames,
    };

    let mut emitter = line21_core::emitters::make_emitter(&config)?;

    let mut source = DirectoryFrameSource::open(&cli.frames_dir)
        .map_err(line21_core::Line21Error::from)?;

    let pipeline = Pipeline::new(&config);
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    pipeline.run(&mut source, emitter.as_mut(), &mut out)?;
    out.flush().map_err(line21_core::Line21Error::from)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            ExitCode::FAILURE
        }
    }
}
