use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use adw::prelude::*;
use adw::Application;
use gtk4 as gtk;

use crate::api::client::ApiClient;
use crate::api::MessageApi;
use crate::config::Settings;
use crate::error::ApiError;
use crate::session::UserType;

pub fn show_setup_window(app: &Application, settings: Settings, location: Option<String>) {
    let strings = settings.strings.clone();
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(&strings.setup_title)
        .default_width(420)
        .default_height(320)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some(&strings.setup_title));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some(&strings.setup_server));
    server_entry.set_text(&settings.base_url);
    server_entry.set_hexpand(true);

    let user_entry = gtk::Entry::new();
    user_entry.set_placeholder_text(Some(&strings.setup_user_id));
    user_entry.set_text(&settings.user_id);

    let receiver_entry = gtk::Entry::new();
    receiver_entry.set_placeholder_text(Some(&strings.setup_receiver_id));
    receiver_entry.set_text(&settings.receiver_id);

    let type_names: Vec<&str> = UserType::ALL.iter().map(|t| strings.user_type(*t)).collect();
    let type_dropdown = gtk::DropDown::from_strings(&type_names);
    if let Some(pos) = UserType::ALL.iter().position(|t| *t == settings.user_type) {
        type_dropdown.set_selected(pos as u32);
    }

    let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
    form.append(&server_entry);
    form.append(&user_entry);
    form.append(&receiver_entry);
    form.append(&type_dropdown);
    root.append(&form);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let connect_btn = gtk::Button::with_label(&strings.setup_connect);
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some(&strings.app_title));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let connect_btn = connect_btn.clone();
        // A second Connect while the check runs would open a second main window.
        let pending_check = Cell::new(false);
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let server_entry = server_entry.clone();
        let user_entry = user_entry.clone();
        let receiver_entry = receiver_entry.clone();
        let type_dropdown = type_dropdown.clone();
        move || {
            if pending_check.get() {
                return;
            }
            let mut next = settings.clone();
            next.base_url = crate::utils::normalize_url(&server_entry.text());
            next.user_id = user_entry.text().trim().to_string();
            next.receiver_id = receiver_entry.text().trim().to_string();
            next.user_type = UserType::ALL
                .get(type_dropdown.selected() as usize)
                .copied()
                .unwrap_or_default();
            if !next.is_complete() {
                overlay.add_toast(adw::Toast::new(&next.strings.setup_incomplete));
                return;
            }

            pending_check.set(true);
            connect_btn.set_sensitive(false);
            status.set_label(&next.strings.setup_connecting);

            // Reachability is reported but never blocks saving.
            let base_url = next.base_url.clone();
            let user_id = next.user_id.clone();
            let rx = crate::utils::run_async_to_main(async move {
                let client = ApiClient::with_timeout(&base_url, Some(Duration::from_secs(5)))?;
                client.messages(&user_id).await?;
                Ok::<(), ApiError>(())
            });

            let app2 = app.clone();
            let window2 = window.clone();
            let location = location.clone();
            let mut pending = Some(next);
            rx.attach(None, move |res| {
                let Some(next) = pending.take() else {
                    return glib::ControlFlow::Break;
                };
                let notice = crate::app::reachability_notice(&next, &res);
                if let Err(e) = next.save() {
                    log::error!("saving settings: {e}");
                }
                crate::app::open_main(&app2, next, location.clone(), notice);
                window2.close();
                glib::ControlFlow::Break
            });
        }
    };

    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    for entry in [&server_entry, &user_entry, &receiver_entry] {
        let on_connect = on_connect.clone();
        entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}
