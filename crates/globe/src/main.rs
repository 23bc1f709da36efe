use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foundation::math::{EarthOrientation, GeoPoint, Vec3};
use globe::{DatasetSource, GlobeConfig, GlobeSession, fetch_collection};
use reqwest::Client;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Country boundaries, picking and labels on a 3D globe")]
struct Args {
    /// JSON config file; missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Countries GeoJSON: http(s) URL or local path
    #[arg(long, env = "GLOBE_DATASET")]
    dataset: Option<String>,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "globe=trace")
    #[arg(long)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the dataset and print what was built from it
    Summary,

    /// Hit-test a geographic coordinate
    Pick {
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
    },

    /// Hit-test a point on the globe surface (world space, unrotated globe)
    PickPoint {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, allow_hyphen_values = true)]
        z: f64,
    },

    /// List labels visible from a camera on +z at the given distance
    Labels {
        #[arg(long)]
        distance: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        yaw_deg: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        pitch_deg: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GlobeConfig::load(path)?,
        None => GlobeConfig::default(),
    };
    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }
    if let Some(filter) = args.log {
        config.log_filter = filter;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let source = DatasetSource::parse(&config.dataset);
    let mut session = GlobeSession::new(config);

    let client = Client::new();
    let fetched = fetch_collection(&client, &source).await;
    if let Err(err) = &fetched {
        warn!("dataset unavailable, continuing without boundaries: {err}");
    }
    session.apply_fetch(fetched);

    match args.command {
        Command::Summary => print_summary(&session),
        Command::Pick { lon, lat } => {
            let hit = session.pick_geo(GeoPoint::new(lon, lat)).map(str::to_string);
            print_hit(hit);
        }
        Command::PickPoint { x, y, z } => {
            let hit = session.click_world(Vec3::new(x, y, z));
            print_hit(hit);
        }
        Command::Labels {
            distance,
            yaw_deg,
            pitch_deg,
        } => {
            let interaction = session.interaction_mut();
            interaction.set_camera_distance(distance);
            interaction.set_orientation(EarthOrientation::from_degrees(pitch_deg, yaw_deg));
            let visible = session.frame();
            info!(visible, "label frame");
            for name in session.visible_labels() {
                println!("{name}");
            }
        }
    }

    Ok(())
}

fn print_summary(session: &GlobeSession) {
    match session.data() {
        Some(data) => {
            println!("countries: {}", data.registry.len());
            println!("boundary strips: {}", data.boundaries.lines.len());
            println!("boundary vertices: {}", data.boundaries.vertex_count());
            println!("labels: {}", data.labels.labels.len());
        }
        None => {
            let reason = session.load_failure().unwrap_or("not loaded");
            println!("no data: {reason}");
        }
    }
}

fn print_hit(hit: Option<String>) {
    match hit {
        Some(name) => println!("{name}"),
        None => println!("ocean or unknown area"),
    }
}
