use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use movmux::{
    CommandBuilder, MuxOptions, MuxRequest, NumberLocale, SampleRate, SourceKind, TrackLabel,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  movmux command --video clip.mov --audio1 take.wav\n  movmux command --video clip.mov --audio1 a.wav --audio2 b.wav --audio1-source analog --audio1-rate 48k --json\n  movmux run --video clip.mov --audio1 take.wav --video-ss 2.5\n  movmux validate --video clip.mov --audio1 take.wav\n  movmux completions zsh > _movmux";

#[derive(Debug, Parser)]
#[command(
    name = "movmux",
    version,
    about = "Build and launch FFmpeg commands that mux a video with one or two audio tracks",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional diagnostic output.
    #[arg(long, global = true)]
    verbose: bool,

    /// Allow overwriting an existing output file when running.
    #[arg(long, global = true)]
    overwrite: bool,

    /// Program token at the start of the command (name or path of ffmpeg).
    #[arg(long, global = true)]
    ffmpeg: Option<String>,

    /// Locale used when an offset is not a plain decimal (e.g. de_DE, fr, C).
    #[arg(long, global = true)]
    locale: Option<String>,
}

#[derive(Debug, Args, Clone, Default)]
struct MuxArgs {
    /// Video input file.
    #[arg(long)]
    video: Option<PathBuf>,

    /// First audio input file.
    #[arg(long)]
    audio1: Option<PathBuf>,

    /// Optional second audio input file.
    #[arg(long)]
    audio2: Option<PathBuf>,

    /// Output file. Defaults to <video stem>_mux.mov next to the video.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Start offset of the video input, in seconds.
    #[arg(long, allow_hyphen_values = true)]
    video_ss: Option<String>,

    /// Start offset of the first audio input, in seconds.
    #[arg(long, allow_hyphen_values = true)]
    audio1_ss: Option<String>,

    /// Start offset of the second audio input, in seconds.
    #[arg(long, allow_hyphen_values = true)]
    audio2_ss: Option<String>,

    /// Source of the first audio track (analog, digital, none).
    #[arg(long)]
    audio1_source: Option<String>,

    /// Sample rate of the first audio track (48k, 44.1k, none).
    #[arg(long)]
    audio1_rate: Option<String>,

    /// Source of the second audio track (analog, digital, none).
    #[arg(long)]
    audio2_source: Option<String>,

    /// Sample rate of the second audio track (48k, 44.1k, none).
    #[arg(long)]
    audio2_rate: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the FFmpeg command line for a mux request.
    #[command(
        name = "command",
        about = "Print the mux command",
        visible_alias = "cmd",
        after_help = "Examples:\n  movmux command --video clip.mov --audio1 take.wav\n  movmux command --video clip.mov --audio1 take.wav --json"
    )]
    Print {
        #[command(flatten)]
        mux: MuxArgs,

        /// Output the command as machine-readable JSON.
        #[arg(long)]
        json: bool,
    },

    /// Build the command and start it in a new shell.
    #[command(
        about = "Run the mux command in a shell",
        after_help = "Examples:\n  movmux run --video clip.mov --audio1 take.wav --overwrite"
    )]
    Run {
        #[command(flatten)]
        mux: MuxArgs,
    },

    /// Check a mux request and print every finding.
    #[command(
        about = "Validate a mux request",
        after_help = "Examples:\n  movmux validate --video clip.mov --audio1 a.wav --audio2 b.wav"
    )]
    Validate {
        #[command(flatten)]
        mux: MuxArgs,
    },

    /// Print the metadata title for an audio track classification.
    #[command(about = "Print an audio track title")]
    Label {
        /// Source (analog, digital, none).
        #[arg(long)]
        source: Option<String>,

        /// Sample rate (48k, 44.1k, none).
        #[arg(long)]
        rate: Option<String>,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completions")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_source_kind(value: Option<&str>) -> Result<SourceKind, Box<dyn std::error::Error>> {
    Ok(value.map(str::parse::<SourceKind>).transpose()?.unwrap_or_default())
}

fn parse_sample_rate(value: Option<&str>) -> Result<SampleRate, Box<dyn std::error::Error>> {
    Ok(value.map(str::parse::<SampleRate>).transpose()?.unwrap_or_default())
}

fn track_label(
    source: Option<&str>,
    rate: Option<&str>,
) -> Result<TrackLabel, Box<dyn std::error::Error>> {
    Ok(TrackLabel::new(
        parse_source_kind(source)?,
        parse_sample_rate(rate)?,
    ))
}

fn mux_request(args: &MuxArgs) -> Result<MuxRequest, Box<dyn std::error::Error>> {
    Ok(MuxRequest {
        video_path: args.video.clone(),
        audio1_path: args.audio1.clone(),
        audio2_path: args.audio2.clone(),
        output_path: args.output.clone(),
        video_offset: args.video_ss.clone(),
        audio1_offset: args.audio1_ss.clone(),
        audio2_offset: args.audio2_ss.clone(),
        audio1_label: track_label(args.audio1_source.as_deref(), args.audio1_rate.as_deref())?,
        audio2_label: track_label(args.audio2_source.as_deref(), args.audio2_rate.as_deref())?,
    })
}

fn mux_options(global: &GlobalOptions) -> MuxOptions {
    let mut options = MuxOptions::new();
    if let Some(program) = &global.ffmpeg {
        options = options.with_program(program.as_str());
    }
    if let Some(locale) = &global.locale {
        options = options.with_number_locale(NumberLocale::from_tag(locale));
    }
    options
}

/// `run` never replaces an existing output unless `--overwrite` is given.
fn check_output_free(output: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !output.exists() {
        return Ok(());
    }
    if !overwrite {
        return Err(format!(
            "{} already exists; pass --overwrite to let ffmpeg replace it",
            output.display()
        )
        .into());
    }

    eprintln!(
        "{} {}",
        "warning:".yellow().bold(),
        format!("{} will be replaced", output.display()).yellow()
    );
    Ok(())
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let options = mux_options(&cli.global);

    if cli.global.verbose {
        eprintln!(
            "{} program={} decimal separator='{}'",
            "config".cyan().bold(),
            options.program(),
            options.number_locale().decimal_separator(),
        );
    }

    let builder = CommandBuilder::with_options(options);

    match cli.command {
        Commands::Print { mux, json } => {
            let request = mux_request(&mux)?;
            let command = builder.build(&request)?;
            if json {
                let payload = json!({
                    "program": command.program(),
                    "arguments": command.arguments(),
                    "command": command.to_string(),
                    "output": command.output_path().to_string_lossy(),
                    "mode": if command.is_dual_track() { "dual" } else { "single" },
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{command}");
            }
        }
        Commands::Run { mux } => {
            let request = mux_request(&mux)?;
            let command = builder.build(&request)?;
            check_output_free(command.output_path(), cli.global.overwrite)?;

            if cli.global.verbose {
                eprintln!("{} {command}", "running".cyan().bold());
            }

            movmux::launch(&command)?;
            println!(
                "{} {}",
                "started:".green().bold(),
                format!("writing {}", command.output_path().display()).green()
            );
        }
        Commands::Validate { mux } => {
            let request = mux_request(&mux)?;
            let report = builder.validate(&request);
            print!("{report}");
            if !report.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Label { source, rate } => {
            let label = track_label(source.as_deref(), rate.as_deref())?;
            println!("{}", label.title());
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "movmux", &mut std::io::stdout());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    run().unwrap_or_else(|error| {
        eprintln!("error: {error}");
        ExitCode::FAILURE
    })
}
