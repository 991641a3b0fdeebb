use gtk4 as gtk;

const CSS: &str = r#"
.message {
    padding: 6px 10px;
    border-radius: 12px;
    margin: 2px 8px;
}
.message.sent {
    background-color: alpha(@accent_bg_color, 0.85);
    color: @accent_fg_color;
}
.message.received {
    background-color: alpha(@view_fg_color, 0.08);
}
.message .sender {
    font-size: smaller;
    opacity: 0.75;
}
.datetime-selector {
    padding: 12px;
    border-radius: 8px;
    background-color: alpha(@view_fg_color, 0.04);
}
.role-option.selected {
    background-color: @accent_bg_color;
    color: @accent_fg_color;
}
.meeting-card {
    padding: 10px 14px;
    border-radius: 8px;
    background-color: alpha(@view_fg_color, 0.06);
}
"#;

pub fn install() {
    let Some(display) = gtk::gdk::Display::default() else {
        log::warn!("no display, skipping stylesheet");
        return;
    };
    let provider = gtk::CssProvider::new();
    provider.load_from_data(CSS);
    gtk::style_context_add_provider_for_display(
        &display,
        &provider,
        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}
