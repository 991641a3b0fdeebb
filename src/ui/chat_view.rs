use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use gtk4 as gtk;
use gtk4::gdk;
use gtk4::prelude::*;

use crate::api::client::ApiClient;
use crate::api::MessageApi;
use crate::chat::{Direction, MessagePanel, SendOutcome};
use crate::session::Session;
use crate::strings::Strings;

pub struct ChatView {
    panel: RefCell<MessagePanel>,
    client: ApiClient,
    strings: Rc<Strings>,
    messages_box: gtk::Box,
    scroller: gtk::ScrolledWindow,
    entry: gtk::Entry,
    loading: Cell<bool>,
}

impl ChatView {
    pub fn new(
        session: Session,
        client: ApiClient,
        strings: Rc<Strings>,
        refresh: Option<Duration>,
    ) -> gtk::Widget {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let messages_box = gtk::Box::new(gtk::Orientation::Vertical, 6);
        messages_box.add_css_class("messages");
        scroller.set_child(Some(&messages_box));
        root.append(&scroller);

        // Input row
        let input_row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let entry = gtk::Entry::new();
        entry.set_hexpand(true);
        entry.set_placeholder_text(Some(&strings.message_placeholder));
        let send_btn = gtk::Button::with_label(&strings.send);
        send_btn.add_css_class("suggested-action");
        input_row.append(&entry);
        input_row.append(&send_btn);
        root.append(&input_row);

        let view = Rc::new(Self {
            panel: RefCell::new(MessagePanel::new(session)),
            client,
            strings,
            messages_box,
            scroller,
            entry: entry.clone(),
            loading: Cell::new(false),
        });

        {
            let view = view.clone();
            send_btn.connect_clicked(move |_| view.send());
        }
        {
            // Enter sends and the key goes no further.
            let view = view.clone();
            let keys = gtk::EventControllerKey::new();
            keys.set_propagation_phase(gtk::PropagationPhase::Capture);
            keys.connect_key_pressed(move |_, key, _, _| {
                if key == gdk::Key::Return || key == gdk::Key::KP_Enter {
                    view.send();
                    gtk::glib::Propagation::Stop
                } else {
                    gtk::glib::Propagation::Proceed
                }
            });
            entry.add_controller(keys);
        }

        view.load();
        if let Some(interval) = refresh {
            Self::start_refresh(Rc::downgrade(&view), interval);
        }
        root.upcast()
    }

    /// Reloads the history every `interval` while the page is on screen.
    /// Stops once the view is gone.
    fn start_refresh(view: Weak<Self>, interval: Duration) {
        glib::timeout_add_local(interval, move || {
            let Some(view) = view.upgrade() else {
                return glib::ControlFlow::Break;
            };
            if view.messages_box.is_mapped() {
                view.load();
            }
            glib::ControlFlow::Continue
        });
    }

    fn load(self: &Rc<Self>) {
        if self.loading.replace(true) {
            return;
        }
        let client = self.client.clone();
        let user_id = self.panel.borrow().session().user_id.clone();
        let rx = crate::utils::run_async_to_main(async move { client.messages(&user_id).await });
        let view = self.clone();
        rx.attach(None, move |res| {
            view.loading.set(false);
            let changed = view.panel.borrow_mut().apply_history(res);
            if changed {
                view.render();
            }
            glib::ControlFlow::Break
        });
    }

    fn send(self: &Rc<Self>) {
        let outgoing = {
            let mut panel = self.panel.borrow_mut();
            panel.input = self.entry.text().to_string();
            panel.outgoing()
        };
        let Some(message) = outgoing else {
            return;
        };

        let client = self.client.clone();
        let to_send = message.clone();
        let rx =
            crate::utils::run_async_to_main(async move { client.send_message(&to_send).await });
        let view = self.clone();
        rx.attach(None, move |res| {
            let outcome = view.panel.borrow_mut().apply_send(message.clone(), res);
            match outcome {
                SendOutcome::Sent => {
                    view.entry.set_text("");
                    view.render();
                }
                SendOutcome::Failed => {
                    let strings = &view.strings;
                    crate::ui::alert::alert(&view.entry, &strings.send_failed, &strings.ok);
                }
            }
            glib::ControlFlow::Break
        });
    }

    fn render(&self) {
        while let Some(child) = self.messages_box.first_child() {
            self.messages_box.remove(&child);
        }
        for row in self.panel.borrow().rows() {
            let bubble = gtk::Box::new(gtk::Orientation::Vertical, 2);
            for class in row.css_classes() {
                bubble.add_css_class(class);
            }
            bubble.set_halign(match row.direction {
                Direction::Sent => gtk::Align::End,
                Direction::Received => gtk::Align::Start,
            });

            let sender = gtk::Label::new(Some(&row.heading(&self.strings)));
            sender.add_css_class("sender");
            sender.set_xalign(0.0);
            bubble.append(&sender);

            let text = gtk::Label::new(Some(&row.text));
            text.set_wrap(true);
            text.set_selectable(true);
            text.set_xalign(0.0);
            bubble.append(&text);

            self.messages_box.append(&bubble);
        }
        let adj = self.scroller.vadjustment();
        adj.set_value(adj.upper());
    }
}
