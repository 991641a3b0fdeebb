use std::rc::Rc;

use adw::prelude::*;
use adw::Application;

use crate::api::client::ApiClient;
use crate::config::Settings;
use crate::session::PageContext;
use crate::ui::chat_view::ChatView;
use crate::ui::scheduler_view::SchedulerView;

/// `notice`, when given, is shown as a toast once the window is up.
pub fn show_main_window(
    app: &Application,
    settings: Settings,
    page: PageContext,
    location: Option<String>,
    notice: Option<String>,
) {
    let client = match ApiClient::with_timeout(&settings.base_url, settings.request_timeout()) {
        Ok(client) => client,
        Err(e) => {
            log::error!("cannot use server {:?}: {e}", settings.base_url);
            crate::ui::setup::show_setup_window(app, settings, location);
            return;
        }
    };
    let strings = Rc::new(settings.strings.clone());
    let session = settings.session();
    log::info!(
        "opening {} page for user {} at {}",
        session.user_type,
        session.user_id,
        page.url()
    );

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(&strings.app_title)
        .default_width(960)
        .default_height(640)
        .build();

    let stack = gtk4::Stack::new();
    stack.set_vexpand(true);

    let chat = ChatView::new(
        session.clone(),
        client.clone(),
        strings.clone(),
        settings.chat_refresh(),
    );
    stack.add_titled(&chat, Some("chat"), &strings.chat_page);

    let meetings = SchedulerView::new(
        session.user_type.meeting_categories(),
        client,
        page,
        strings.clone(),
    );
    stack.add_titled(&meetings, Some("meetings"), &strings.meetings_page);

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let switcher = gtk4::StackSwitcher::new();
    switcher.set_stack(Some(&stack));
    header.set_title_widget(Some(&switcher));

    let settings_btn = gtk4::Button::with_label(&strings.settings);
    header.pack_end(&settings_btn);
    container.append(&header);
    let toast_overlay = adw::ToastOverlay::new();
    toast_overlay.set_child(Some(&stack));
    container.append(&toast_overlay);
    window.set_content(Some(&container));
    window.present();
    if let Some(text) = notice {
        toast_overlay.add_toast(adw::Toast::new(&text));
    }

    {
        let app = app.clone();
        let window = window.clone();
        settings_btn.connect_clicked(move |_| {
            crate::ui::setup::show_setup_window(&app, settings.clone(), location.clone());
            window.close();
        });
    }
}
