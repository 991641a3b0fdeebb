use adw::Application;
use gtk4 as gtk;

use crate::config::Settings;
use crate::error::ApiError;
use crate::session::PageContext;

/// Entry point from `connect_activate`. `location` is the optional launch URL.
pub fn build_ui(app: &Application, location: Option<String>) {
    let settings = Settings::load();
    crate::ui::style::install();
    if settings.strings.right_to_left {
        gtk::Widget::set_default_direction(gtk::TextDirection::Rtl);
    }

    if settings.is_complete() {
        open_main(app, settings, location, None);
    } else {
        crate::ui::setup::show_setup_window(app, settings, location);
    }
}

/// The launch URL when it parses, otherwise the options page derived from
/// the settings.
pub fn resolve_page(settings: &Settings, location: Option<&str>) -> Option<PageContext> {
    if let Some(loc) = location {
        match PageContext::parse(loc) {
            Ok(page) => return Some(page),
            Err(e) => log::warn!("ignoring launch location {loc:?}: {e}"),
        }
    }
    match PageContext::for_session(&settings.base_url, &settings.session()) {
        Ok(page) => Some(page),
        Err(e) => {
            log::error!("cannot derive page location from {:?}: {e}", settings.base_url);
            None
        }
    }
}

/// What to tell the user after the setup window's server check. Settings are
/// saved either way; an unreachable server only earns a toast.
pub fn reachability_notice(settings: &Settings, check: &Result<(), ApiError>) -> Option<String> {
    match check {
        Ok(()) => {
            log::info!("server check: {} reachable", settings.base_url);
            None
        }
        Err(err) => {
            log::warn!("server check failed: {err}");
            Some(settings.strings.setup_unreachable.clone())
        }
    }
}

pub fn open_main(
    app: &Application,
    settings: Settings,
    location: Option<String>,
    notice: Option<String>,
) {
    match resolve_page(&settings, location.as_deref()) {
        Some(page) => {
            crate::ui::main_window::show_main_window(app, settings, page, location, notice)
        }
        None => crate::ui::setup::show_setup_window(app, settings, location),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            base_url: "http://localhost:8000".into(),
            user_id: "12".into(),
            ..Settings::default()
        }
    }

    #[test]
    fn launch_location_wins() {
        let location = "http://localhost:8000/options/soldier?user_id=99";
        let page = resolve_page(&settings(), Some(location)).unwrap();
        assert_eq!(page.user_id().as_deref(), Some("99"));
    }

    #[test]
    fn bad_location_falls_back_to_settings() {
        let page = resolve_page(&settings(), Some("::not a url::")).unwrap();
        assert_eq!(page.user_id().as_deref(), Some("12"));
        assert_eq!(page.url().path(), "/options/evacuee");
    }

    #[test]
    fn nothing_usable() {
        let settings = Settings {
            base_url: "nowhere".into(),
            ..settings()
        };
        assert!(resolve_page(&settings, None).is_none());
    }

    #[test]
    fn unreachable_server_becomes_a_notice() {
        let settings = settings();
        assert_eq!(reachability_notice(&settings, &Ok(())), None);
        let down = Err(ApiError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(
            reachability_notice(&settings, &down),
            Some(settings.strings.setup_unreachable.clone())
        );
    }
}
