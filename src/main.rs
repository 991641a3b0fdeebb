use adw::prelude::*;
use adw::Application;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // GTK gets only the program name; the optional first argument is the
    // page location, e.g. http://host/options/soldier?user_id=7
    let mut args = std::env::args();
    let program: Vec<String> = args.next().into_iter().collect();
    let location = args.next();

    let app = Application::builder()
        .application_id("org.evac.EvacConnect")
        .build();
    app.connect_activate(move |app| {
        evac_connect::app::build_ui(app, location.clone());
    });
    app.run_with_args(program.as_slice());
}
