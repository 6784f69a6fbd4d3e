// ============================================================================
// Console Output Functions
// ============================================================================

use std::path::Path;
use crate::app::AppController;
use crate::Bpm;

pub fn log_startup_banner(app: &AppController, config_path: &Path) {
    let config = app.config();
    println!("====================================");
    println!("  Heart Rate Bridge Starting");
    println!("====================================");
    println!("Settings file: {}", config_path.display());
    println!("Heart rate file: {}", config.file_path);
    println!("Listen address: {}", config.full_listen_addr());
    println!("------------------------------------");
}

pub fn log_server_running(app: &AppController, current: Option<Bpm>) {
    println!("{}", app.status_line());
    print_current(current);
    println!("------------------------------------");
    println!("Beat Saber: edit UserData/HRCounter.json");
    println!("{}", app.feed_config());
    println!("====================================");
    println!("Press Ctrl-C to stop");
}

pub fn print_current(current: Option<Bpm>) {
    match current {
        Some(bpm) => println!("Current heart rate: {}", bpm),
        None => println!("Current heart rate: unreadable"),
    }
}
