use anyhow::{bail, Context, Result};
use clap::Parser;
use fare_map::{
    sdk::config::DistanceConfig,
    sdk::distance::{DistancePriceService, RemoteDistanceProvider},
    sdk::region::Coordinate,
    sdk::selection::Slot,
    sdk::util::log::init_logging,
    sdk::widget::{FareWidget, MapEvent},
};

/// Price a ticket between two points on the map, the way the widget does
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Origin pin as "LAT,LNG" (e.g. "35.6892,51.3890")
    #[arg(short, long, allow_hyphen_values = true)]
    origin: Coordinate,

    /// Destination pin as "LAT,LNG"
    #[arg(short, long, allow_hyphen_values = true)]
    destination: Coordinate,

    /// [Optional] Move the origin pin here after placing both pins
    #[arg(long, allow_hyphen_values = true)]
    reedit_origin: Option<Coordinate>,

    /// [Optional] Move the destination pin here after placing both pins
    #[arg(long, allow_hyphen_values = true)]
    reedit_destination: Option<Coordinate>,

    /// Print the widget view as JSON instead of display lines
    #[arg(long)]
    json: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn click(widget: &mut FareWidget, at: Coordinate) {
    widget.handle_event(MapEvent::Click {
        lat: at.latitude,
        lng: at.longitude,
    });
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    // --- 1. Dependency Initialization ---
    let config = DistanceConfig::from_env().context("Failed to load distance API configuration")?;
    let provider =
        RemoteDistanceProvider::new(&config).context("Failed to build the HTTP client")?;
    let service = DistancePriceService::new(provider);
    let mut widget = FareWidget::default();
    log::info!(
        "Selecting points inside {} (map centered on {})",
        widget.region().name,
        widget.region().map_center
    );

    // --- 2. Replay the user's clicks ---
    click(&mut widget, cli.origin);
    click(&mut widget, cli.destination);
    for (slot, target) in [
        (Slot::Origin, cli.reedit_origin),
        (Slot::Destination, cli.reedit_destination),
    ] {
        if let Some(target) = target {
            widget.handle_event(MapEvent::PinActivated(slot));
            click(&mut widget, target);
        }
    }

    if !widget.can_calculate() {
        bail!(
            "{}",
            widget
                .error()
                .unwrap_or("Both an origin and a destination are required")
        );
    }

    // --- 3. Calculate ---
    let status = widget.calculate(&service);
    log::info!("Calculation finished: {:?}", status);

    // --- 4. Output Results ---
    let view = widget.view();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        for line in view.lines() {
            println!("{}", line);
        }
    }

    Ok(())
}
