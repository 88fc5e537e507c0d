use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fashiongen::{
    logger::{self, LogLevel, LoggerConfig},
    AspectRatio, DirectorySaver, ExtractionMode, Form, GeminiClient, ImageAsset, ImageCount,
    Scenario, Screen, ScreenState, StudioConfig, Studio,
};

#[derive(Parser, Debug)]
#[command(name = "fashiongen", version, about = "Fashion image studio for Gemini image models")]
struct Cli {
    /// Directory results are saved into.
    #[arg(long, short, global = true, default_value = ".")]
    out: PathBuf,

    /// Override the model id from the environment.
    #[arg(long, global = true)]
    model: Option<String>,

    #[arg(long, global = true, default_value = "info")]
    log_level: LogLevel,

    /// Also append log lines to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cut a garment out onto a white background.
    Extract {
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value = "background")]
        mode: ExtractionMode,
    },
    /// Put an outfit on a model, optionally on a background photo.
    Model {
        #[arg(long)]
        model_image: Option<PathBuf>,
        #[arg(long)]
        outfit_image: Option<PathBuf>,
        #[arg(long)]
        background_image: Option<PathBuf>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "9:16")]
        aspect_ratio: AspectRatio,
    },
    /// Show a garment in a new scene.
    Perspective {
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "9:16")]
        aspect_ratio: AspectRatio,
        #[arg(long, default_value = "1")]
        count: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let dotenv_loaded = dotenv::dotenv().is_ok();
    let mut log_config = LoggerConfig::default()
        .with_level(cli.log_level)
        .with_json_output(cli.log_json);
    if let Some(path) = &cli.log_file {
        log_config = log_config.with_file_output(path);
    }
    logger::init_with_config(log_config)?;
    if !dotenv_loaded {
        log::debug!("No .env file found, using system environment variables");
    }

    let mut config = StudioConfig::from_env();
    if let Some(model) = cli.model.clone() {
        config = config.with_model(model);
    }
    logger::log_config_info(&config);

    let client = match GeminiClient::new(config.clone()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("❌ Failed to initialize Gemini client: {}", e);
            return Err(e.into());
        }
    };

    let mut studio = Studio::from_config(&config);
    let saver = DirectorySaver::new(&cli.out);

    let saved = match cli.command {
        Command::Extract { image, mode } => {
            studio.select(Scenario::Extraction);
            let form = studio.extraction.form_mut();
            fill(&mut form.image, image);
            form.mode = mode;
            run(&mut studio.extraction, &client, &saver).await
        }
        Command::Model {
            model_image,
            outfit_image,
            background_image,
            description,
            aspect_ratio,
        } => {
            studio.select(Scenario::Model);
            let form = studio.model.form_mut();
            fill(&mut form.model_image, model_image);
            fill(&mut form.outfit_image, outfit_image);
            fill(&mut form.background_image, background_image);
            form.description = description;
            form.aspect_ratio = aspect_ratio;
            run(&mut studio.model, &client, &saver).await
        }
        Command::Perspective {
            image,
            description,
            aspect_ratio,
            count,
        } => {
            studio.select(Scenario::Perspective);
            let form = studio.perspective.form_mut();
            fill(&mut form.outfit_image, image);
            form.description = description;
            form.aspect_ratio = aspect_ratio;
            form.image_count = ImageCount::parse_lossy(&count);
            run(&mut studio.perspective, &client, &saver).await
        }
    };

    match saved {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            Ok(())
        }
        Err(message) => {
            eprintln!("{}", message);
            std::process::exit(1);
        }
    }
}

fn fill(slot: &mut fashiongen::AssetSlot, path: Option<PathBuf>) {
    match path {
        Some(path) => slot.select(ImageAsset::from_path(path)),
        None => slot.clear(),
    }
}

/// Submits once and saves whatever the screen ends up showing.
async fn run<F: Form>(
    screen: &mut Screen<F>,
    client: &GeminiClient,
    saver: &DirectorySaver,
) -> Result<Vec<PathBuf>, String> {
    match screen.submit(client.image()).await {
        ScreenState::Success(_) => {}
        ScreenState::Failed(message) => return Err(message.clone()),
        other => return Err(format!("Unexpected screen state: {:?}", other)),
    }

    let mut paths = Vec::new();
    for action in screen.save_actions() {
        let path = action
            .save(saver)
            .await
            .map_err(|e| format!("Không thể lưu {}: {}", action.file_name, e))?;
        paths.push(path);
    }
    Ok(paths)
}
