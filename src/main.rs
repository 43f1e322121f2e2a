use std::process::exit;

fn main() {
    if let Err(e) = fleetdesk::app::run_cli() {
        fleetdesk::output::error(&e);
        exit(1);
    }
}
