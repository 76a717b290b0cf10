//! voice-narrator - generate narrated audio from English or Hindi text

use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;

use voice_narrator::backends::create_backend;
use voice_narrator::config_loader::Settings;
use voice_narrator::detect::{LanguageDetector, WhatlangDetector};
use voice_narrator::engine::AudioEngine;
use voice_narrator::narrator::{save_as, Narration, Narrator, Notice};
use voice_narrator::rate::SpeechRate;
use voice_narrator::NarratorError;

const SAMPLE_TEXT: &str = "Hello! You can now generate audio from your own text.";

/// Turn text into a narrated audio file
#[derive(Parser)]
#[command(name = "voice-narrator")]
#[command(version)]
#[command(about = "Turn English or Hindi text into a narrated audio file", long_about = None)]
struct Cli {
    /// Synthesis backend: google or azure (overrides configuration)
    #[arg(long, global = true)]
    backend: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List voices in menu order
    Voices {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report the detected language of the text
    Detect {
        #[command(flatten)]
        input: TextInput,
    },

    /// Synthesize a short sample of the text
    Preview {
        #[command(flatten)]
        form: Form,
    },

    /// Synthesize the full text
    Generate {
        #[command(flatten)]
        form: Form,

        /// Copy the finished file here (a directory gets narration.mp3)
        #[arg(long)]
        save_as: Option<PathBuf>,
    },
}

#[derive(Args)]
struct TextInput {
    /// Text to narrate
    #[arg(short, long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the text from a file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args)]
struct Form {
    #[command(flatten)]
    input: TextInput,

    /// Voice label, as listed by `voices`
    #[arg(long)]
    voice: Option<String>,

    /// Speaking rate in percent, -100 to 100 in steps of 5
    #[arg(short, long, allow_hyphen_values = true)]
    rate: Option<SpeechRate>,

    /// Always use the selected voice, even for Hindi text
    #[arg(long)]
    no_detect: bool,

    /// Play the result when done
    #[arg(long)]
    play: bool,
}

impl TextInput {
    fn read(&self) -> std::io::Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        if let Some(path) = &self.file {
            return std::fs::read_to_string(path);
        }
        let mut stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Ok(SAMPLE_TEXT.to_string());
        }
        let mut text = String::new();
        stdin.read_to_string(&mut text)?;
        Ok(text)
    }
}

fn default_filter(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("voice_narrator={}", level)
}

fn init_tracing(verbose: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(verbose).into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_notice(notice: &Option<Notice>) {
    match notice {
        Some(Notice::Info(msg)) => println!("info: {}", msg),
        Some(Notice::Warning(msg)) => eprintln!("warning: {}", msg),
        None => {}
    }
}

fn fail(err: NarratorError) -> ! {
    eprintln!("error: {}", err.user_message());
    std::process::exit(1);
}

fn settings_for(cli: &Cli) -> Result<Settings, Box<dyn Error>> {
    let mut settings = Settings::load()?;
    if let Some(backend) = &cli.backend {
        settings.tts_backend = backend.clone();
    }
    settings.validate()?;
    Ok(settings)
}

async fn run_form(
    narrator: &mut Narrator,
    settings: &Settings,
    form: &Form,
    full: bool,
) -> Result<Narration, NarratorError> {
    let text = form.input.read()?;
    let label = match &form.voice {
        Some(label) => label.clone(),
        None if !settings.default_voice.is_empty() => settings.default_voice.clone(),
        None => narrator
            .catalog()
            .default_entry()
            .map(|v| v.name.clone())
            .ok_or_else(|| NarratorError::UnknownVoice("(empty catalog)".to_string()))?,
    };
    let rate = match form.rate {
        Some(rate) => rate,
        None => SpeechRate::new(settings.default_rate)?,
    };
    if form.no_detect {
        narrator.set_language_override(false);
    }

    let plan = if full {
        narrator.plan_generate(&text, &label)?
    } else {
        narrator.plan_preview(&text, &label)?
    };
    print_notice(&plan.decision.notice);
    narrator.render(&plan, rate).await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = settings_for(&cli)?;
    let backend = create_backend(&settings).unwrap_or_else(|e| fail(e));
    let detector = Arc::new(WhatlangDetector::new());

    match &cli.command {
        Commands::Voices { json } => {
            let catalog = backend.catalog();
            if *json {
                let voices: Vec<_> = catalog.iter().collect();
                println!("{}", serde_json::to_string_pretty(&voices)?);
            } else {
                for voice in catalog.iter() {
                    println!("{:<36} {}", voice.name, voice.id);
                }
            }
        }

        Commands::Detect { input } => {
            let text = input.read()?;
            match detector.detect(&text) {
                Ok(code) => println!("{}", code),
                Err(e) => fail(e),
            }
        }

        Commands::Preview { form } => {
            let mut narrator = Narrator::new(backend, detector, &settings);
            let narration = run_form(&mut narrator, &settings, form, false)
                .await
                .unwrap_or_else(|e| fail(e));
            println!(
                "Preview ready ({}): {}",
                narration.decision.label,
                narration.path.display()
            );
            if form.play {
                AudioEngine::new()
                    .play_file(&narration.path)
                    .unwrap_or_else(|e| fail(e));
            }
        }

        Commands::Generate { form, save_as: dest } => {
            let mut narrator = Narrator::new(backend, detector, &settings);
            let narration = run_form(&mut narrator, &settings, form, true)
                .await
                .unwrap_or_else(|e| fail(e));
            println!(
                "Success! Your audio file is ready ({}): {}",
                narration.decision.label,
                narration.path.display()
            );
            if form.play {
                AudioEngine::new()
                    .play_file(&narration.path)
                    .unwrap_or_else(|e| fail(e));
            }
            if let Some(dest) = dest {
                let saved = save_as(&narration.path, dest).unwrap_or_else(|e| fail(e));
                println!("Saved to {}", saved.display());
            }
        }
    }

    Ok(())
}
