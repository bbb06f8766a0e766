use iced::{Application, Settings, Size};
use tracing::info;

mod app;
mod ui;

use app::RespiteApp;

fn main() -> iced::Result {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("info,respite=debug")
        .init();

    info!("Starting Respite v{}", env!("CARGO_PKG_VERSION"));

    // Run the application
    RespiteApp::run(Settings {
        window: iced::window::Settings {
            size: Size::new(1000.0, 760.0),
            min_size: Some(Size::new(720.0, 560.0)),
            position: iced::window::Position::Centered,
            ..Default::default()
        },
        ..Default::default()
    })?;

    Ok(())
}
