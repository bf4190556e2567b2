use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::Path;

use camera_session::{load_fixture_file, MockSession};

mod checks;
use checks::Verdict;

#[derive(Parser, Debug)]
#[command(
    name = "cam-qa",
    version,
    about = "Scripted camera quality acceptance checks",
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the logical multi-camera luma match check
    MultiCameraMatch {
        /// Device fixture YAML path
        #[arg(long, default_value = "configs/fixtures/dual_gray.yaml")]
        fixture: String,
        /// Directory for per-focal-length JPEG snapshots
        #[arg(long, default_value = "out")]
        out_dir: String,
    },
    /// Validate and list a device fixture
    FixtureValidate {
        /// Fixture YAML path
        #[arg(long)]
        file: String,
        /// Print JSON after validation
        #[arg(long, action = ArgAction::SetTrue)]
        json: bool,
    },
}

fn main() -> Result<()> {
    setup_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::MultiCameraMatch { fixture, out_dir } => multi_camera_match(&fixture, &out_dir),
        Commands::FixtureValidate { file, json } => fixture_validate(&file, json),
    }
}

fn setup_tracing() {
    // Best-effort; avoid panics if already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn multi_camera_match(fixture_path: &str, out_dir: &str) -> Result<()> {
    let fixture = load_fixture_file(fixture_path)?;
    std::fs::create_dir_all(out_dir)?;
    let mut session = MockSession::open(fixture)?;
    match checks::multi_camera_match::run(&mut session, Path::new(out_dir))? {
        Verdict::Pass => {
            println!("PASS: {}", checks::multi_camera_match::NAME);
            Ok(())
        }
        Verdict::Skip(reason) => {
            println!("SKIP: {}: {reason}", checks::multi_camera_match::NAME);
            Ok(())
        }
        Verdict::Fail(msg) => Err(anyhow::anyhow!(
            "FAIL: {}: {msg}",
            checks::multi_camera_match::NAME
        )),
    }
}

fn fixture_validate(file: &str, json: bool) -> Result<()> {
    let fixture = load_fixture_file(file)?;
    println!(
        "ok: camera {} ({} physical, {} scene lumas)",
        fixture.camera.id,
        fixture.physical_cameras.len(),
        fixture.scene.luma.len()
    );
    if json {
        println!("{}", serde_json::to_string_pretty(&fixture)?);
    }
    Ok(())
}
