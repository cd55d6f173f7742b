#![deny(warnings)]

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use signflow_core::challenge;
use signflow_core::config::{
    resolve_seed, resolve_speed, resolve_tone, resolve_u64_with_default, Debounce, EngineConfig,
    Env, FrameRate, SequenceOptions, StdEnv, DEFAULT_DEBOUNCE_MS, DEFAULT_FPS, ENV_DEBOUNCE_MS,
    ENV_FPS,
};
use signflow_core::frame;
use signflow_core::live::LiveTyping;
use signflow_core::request::translate_text;
use signflow_core::segment::PhraseExtraction;
use signflow_core::suggest::suggest;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "signflow")]
#[command(about = "Turn text into timed sign-language avatar animation sequences")]
struct Args {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct CommonArgs {
    /// neutral, casual or formal; anything else falls back to neutral
    #[arg(long, global = true)]
    tone: Option<String>,

    /// slow, normal or fast; anything else falls back to normal
    #[arg(long, global = true)]
    speed: Option<String>,

    /// Fix the variation seed for reproducible output
    #[arg(long, global = true, allow_hyphen_values = true)]
    seed: Option<String>,

    /// Extract every catalog phrase instead of only the first hit
    #[arg(long, global = true)]
    multi_phrase: bool,

    #[arg(long, global = true)]
    fps: Option<u64>,

    #[arg(long, global = true)]
    debounce_ms: Option<u64>,

    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build and print the animation sequence for TEXT
    Sequence { text: String },
    /// Sample every rendered frame of TEXT's sequence as JSON lines
    Frames { text: String },
    /// Draw a random practice phrase and print its sequence
    Challenge,
    /// Read typing snapshots from stdin and sign the last word after each pause
    Live,
    /// Suggest phrases to practice, given previously translated texts
    Suggest { history: Vec<String> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.common.log_level)?;

    let env = StdEnv;
    let cfg = build_config(&args.common, &env)?;

    tracing::info!(
        tone = %cfg.options.tone,
        speed = %cfg.options.speed,
        seed = cfg.options.seed.map(|s| s.value()),
        fps = cfg.frame_rate.fps(),
        "config loaded"
    );

    match args.command {
        Command::Sequence { text } => run_sequence(&text, &cfg),
        Command::Frames { text } => run_frames(&text, &cfg),
        Command::Challenge => run_challenge(&cfg),
        Command::Live => run_live(cfg).await,
        Command::Suggest { history } => run_suggest(&history),
    }
}

fn run_sequence(text: &str, cfg: &EngineConfig) -> anyhow::Result<()> {
    let translation = translate_text(text, cfg.options)?;
    println!("{}", serde_json::to_string_pretty(&translation)?);
    Ok(())
}

fn run_frames(text: &str, cfg: &EngineConfig) -> anyhow::Result<()> {
    let translation = translate_text(text, cfg.options)?;
    for sample in frame::frames(&translation.sequence, cfg.frame_rate) {
        println!("{}", serde_json::to_string(&sample)?);
    }
    Ok(())
}

fn run_challenge(cfg: &EngineConfig) -> anyhow::Result<()> {
    let phrase = challenge::draw(&mut rand::rng());
    tracing::info!(phrase, "challenge drawn");
    let translation = translate_text(phrase, cfg.options)?;
    println!("{}", serde_json::to_string_pretty(&translation)?);
    Ok(())
}

fn run_suggest(history: &[String]) -> anyhow::Result<()> {
    let history: Vec<&str> = history.iter().map(String::as_str).collect();
    let suggestions = suggest(&history, &mut rand::rng());
    println!("{}", serde_json::to_string_pretty(&suggestions)?);
    Ok(())
}

async fn run_live(cfg: EngineConfig) -> anyhow::Result<()> {
    let driver = LiveTyping::new(cfg.debounce, cfg.options);
    let (tx, rx) = mpsc::channel(driver.channel_capacity());
    let (mut updates, task) = driver.spawn(rx);

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if tx.send(line).await.is_err() {
                break;
            }
        }
        Ok::<_, std::io::Error>(())
    });

    while let Some(update) = updates.recv().await {
        println!("{}", serde_json::to_string(&update)?);
    }

    reader.await.context("stdin reader panicked")??;
    task.await.context("live driver panicked")?;
    Ok(())
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(
            level
                .parse()
                .with_context(|| format!("invalid --log-level: {level}"))?,
        )
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_config(args: &CommonArgs, env: &impl Env) -> anyhow::Result<EngineConfig> {
    let fps = resolve_u64_with_default(args.fps, ENV_FPS, env, u64::from(DEFAULT_FPS))?;
    let fps = u32::try_from(fps).with_context(|| format!("--fps out of range: {fps}"))?;
    let debounce_ms =
        resolve_u64_with_default(args.debounce_ms, ENV_DEBOUNCE_MS, env, DEFAULT_DEBOUNCE_MS)?;

    let extraction = if args.multi_phrase {
        PhraseExtraction::CatalogPass
    } else {
        PhraseExtraction::Single
    };

    Ok(EngineConfig {
        options: SequenceOptions {
            tone: resolve_tone(args.tone.clone(), env),
            speed: resolve_speed(args.speed.clone(), env),
            seed: resolve_seed(args.seed.clone(), env)?,
            extraction,
        },
        frame_rate: FrameRate::new(fps)?,
        debounce: Debounce::new(debounce_ms)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use signflow_core::config::{MapEnv, Speed, Tone, ENV_SEED, ENV_TONE};

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).expect("valid args")
    }

    #[test]
    fn flags_override_env() {
        let args = parse(&["signflow", "sequence", "hi", "--tone", "formal", "--seed", "-3.5"]);
        let env = MapEnv::default()
            .with_var(ENV_TONE, "casual")
            .with_var(ENV_SEED, "10");
        let cfg = build_config(&args.common, &env).expect("config");
        assert_eq!(cfg.options.tone, Tone::Formal);
        assert_eq!(cfg.options.seed.map(|s| s.value()), Some(-3.5));
        assert_eq!(cfg.options.speed, Speed::Normal);
        assert_eq!(cfg.options.extraction, PhraseExtraction::Single);
    }

    #[test]
    fn bad_options_degrade_but_bad_seed_fails() {
        let args = parse(&["signflow", "--tone", "angry", "--speed", "warp", "challenge"]);
        let cfg = build_config(&args.common, &MapEnv::default()).expect("config");
        assert_eq!(cfg.options.tone, Tone::Neutral);
        assert_eq!(cfg.options.speed, Speed::Normal);

        let args = parse(&["signflow", "--seed", "nope", "challenge"]);
        assert!(build_config(&args.common, &MapEnv::default()).is_err());
    }

    #[test]
    fn zero_fps_is_rejected() {
        let args = parse(&["signflow", "frames", "hi", "--fps", "0"]);
        assert!(build_config(&args.common, &MapEnv::default()).is_err());
    }

    #[test]
    fn oversized_fps_is_rejected() {
        for fps in ["5000", "4000000000", "99999999999"] {
            let args = parse(&["signflow", "frames", "hi", "--fps", fps]);
            assert!(build_config(&args.common, &MapEnv::default()).is_err(), "{fps}");
        }
    }

    #[test]
    fn suggest_takes_history_texts() {
        let args = parse(&["signflow", "suggest", "need water", "good morning"]);
        match args.command {
            Command::Suggest { history } => assert_eq!(history, ["need water", "good morning"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn multi_phrase_selects_catalog_pass() {
        let args = parse(&["signflow", "live", "--multi-phrase", "--debounce-ms", "250"]);
        let cfg = build_config(&args.common, &MapEnv::default()).expect("config");
        assert_eq!(cfg.options.extraction, PhraseExtraction::CatalogPass);
        assert_eq!(cfg.debounce.window_ms, 250);
    }
}
