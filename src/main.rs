mod app;

use app::App;
use iced::Application;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("wgpu_core", log::LevelFilter::Error)
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .filter_module("iced_wgpu", log::LevelFilter::Error)
        .filter_module("naga", log::LevelFilter::Error)
        .init();

    println!("Sp3ctraGen");
    println!("----------");
    println!("Spectrogram PNGs are written as spectrogram.png in the chosen output folder.");
    println!("CLI: cargo run --bin sp3ctragen-cli -- --help");
    println!();

    let mut settings = iced::Settings::default();
    settings.window.size = (520, 860);
    App::run(settings)
}
