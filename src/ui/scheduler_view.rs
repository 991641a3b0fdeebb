use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;

use crate::api::client::ApiClient;
use crate::api::MeetingApi;
use crate::scheduler::model::{MeetingCategory, Role};
use crate::scheduler::{MeetingScheduler, MeetingsView};
use crate::session::PageContext;
use crate::strings::Strings;

const NO_TIME: &str = "--:--";

struct PanelWidgets {
    category: MeetingCategory,
    root: gtk::Box,
    date: gtk::Entry,
    time: gtk::DropDown,
    times: Vec<String>,
    role_box: Option<gtk::Box>,
    roles: Vec<(Role, gtk::Button)>,
    schedule: gtk::Button,
    close: gtk::Button,
}

impl PanelWidgets {
    fn selected_time(&self) -> String {
        match self.time.selected() {
            0 | gtk::INVALID_LIST_POSITION => String::new(),
            i => self.times.get(i as usize - 1).cloned().unwrap_or_default(),
        }
    }
}

pub struct SchedulerView {
    scheduler: RefCell<MeetingScheduler>,
    strings: Rc<Strings>,
    panels: Vec<PanelWidgets>,
    container: gtk::Box,
}

impl SchedulerView {
    pub fn new(
        categories: &[MeetingCategory],
        client: ApiClient,
        page: PageContext,
        strings: Rc<Strings>,
    ) -> gtk::Widget {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
        root.set_margin_top(12);
        root.set_margin_bottom(12);
        root.set_margin_start(12);
        root.set_margin_end(12);

        let scheduler = MeetingScheduler::new(categories);
        let categories: Vec<MeetingCategory> =
            scheduler.board().panels().iter().map(|p| p.category).collect();

        let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        root.append(&buttons);

        let panels: Vec<PanelWidgets> = categories
            .iter()
            .map(|&c| Self::build_panel(c, &strings))
            .collect();
        for p in &panels {
            root.append(&p.root);
        }

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .build();
        let container = gtk::Box::new(gtk::Orientation::Vertical, 8);
        container.add_css_class("meetings-container");
        scroller.set_child(Some(&container));
        root.append(&scroller);

        let view = Rc::new(Self {
            scheduler: RefCell::new(scheduler),
            strings,
            panels,
            container,
        });

        for &category in &categories {
            let btn = gtk::Button::with_label(view.strings.category(category));
            let v = view.clone();
            btn.connect_clicked(move |_| {
                v.scheduler.borrow_mut().show_selector(category);
                v.sync_panels();
            });
            buttons.append(&btn);
        }
        view.wire_panels();
        view.sync_panels();
        view.render_meetings();
        view.fetch(client, page);

        root.upcast()
    }

    fn build_panel(category: MeetingCategory, strings: &Strings) -> PanelWidgets {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 8);
        root.add_css_class("datetime-selector");

        let nav = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let title = gtk::Label::new(Some(&strings.card_title(Some(category))));
        title.add_css_class("heading");
        title.set_hexpand(true);
        title.set_xalign(0.0);
        nav.append(&title);
        root.append(&nav);

        let date = gtk::Entry::new();
        date.set_placeholder_text(Some(&strings.date_placeholder));
        root.append(&Self::labeled_row(&strings.date_label, &date));

        let times = category.slot_labels();
        let mut items: Vec<&str> = vec![NO_TIME];
        items.extend(times.iter().map(String::as_str));
        let time = gtk::DropDown::from_strings(&items);
        root.append(&Self::labeled_row(&strings.time_label, &time));

        let mut roles = Vec::new();
        let role_box = category.requires_role().then(|| {
            let group = gtk::Box::new(gtk::Orientation::Horizontal, 6);
            group.add_css_class("role-selector");
            for role in Role::ALL {
                let btn = gtk::Button::with_label(strings.role(role));
                btn.add_css_class("role-option");
                group.append(&btn);
                roles.push((role, btn));
            }
            root.append(&Self::labeled_row(&strings.role_label, &group));
            group
        });

        let actions = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        actions.set_halign(gtk::Align::End);
        let schedule = gtk::Button::with_label(&strings.schedule);
        schedule.add_css_class("suggested-action");
        let close = gtk::Button::with_label(&strings.close);
        actions.append(&close);
        actions.append(&schedule);
        root.append(&actions);

        PanelWidgets {
            category,
            root,
            date,
            time,
            times,
            role_box,
            roles,
            schedule,
            close,
        }
    }

    fn labeled_row(label: &str, widget: &impl IsA<gtk::Widget>) -> gtk::Box {
        let row = gtk::Box::new(gtk::Orientation::Horizontal, 6);
        let lbl = gtk::Label::new(Some(label));
        lbl.set_width_chars(8);
        lbl.set_xalign(0.0);
        row.append(&lbl);
        row.append(widget);
        row
    }

    fn wire_panels(self: &Rc<Self>) {
        for (idx, p) in self.panels.iter().enumerate() {
            let category = p.category;
            {
                let v = self.clone();
                p.schedule.connect_clicked(move |_| v.schedule(idx));
            }
            {
                let v = self.clone();
                p.close.connect_clicked(move |_| {
                    v.scheduler.borrow_mut().hide_selector(category);
                    v.sync_panels();
                });
            }
            for (role, btn) in &p.roles {
                let v = self.clone();
                let role = *role;
                btn.connect_clicked(move |_| {
                    v.scheduler.borrow_mut().select_role(category, role);
                    v.sync_panels();
                });
            }
        }
    }

    fn schedule(&self, idx: usize) {
        let Some(p) = self.panels.get(idx) else {
            return;
        };
        let result = {
            let mut scheduler = self.scheduler.borrow_mut();
            scheduler.board_mut().set_date(p.category, p.date.text().to_string());
            scheduler.board_mut().set_time(p.category, p.selected_time());
            scheduler.schedule(p.category).map(|_| ())
        };
        match result {
            Ok(()) => {
                self.render_meetings();
                self.sync_panels();
                crate::ui::alert::alert(&p.root, &self.strings.meeting_scheduled, &self.strings.ok);
            }
            Err(e) => {
                log::debug!("schedule rejected: {e}");
                crate::ui::alert::alert(&p.root, e.alert(&self.strings), &self.strings.ok);
            }
        }
    }

    fn fetch(self: &Rc<Self>, client: ApiClient, page: PageContext) {
        let Some(user_id) = self.scheduler.borrow_mut().begin_fetch(&page) else {
            self.render_meetings();
            self.sync_panels();
            return;
        };
        let rx = crate::utils::run_async_to_main(async move { client.meetings(&user_id).await });
        let view = self.clone();
        rx.attach(None, move |res| {
            view.scheduler.borrow_mut().apply_fetched(res);
            view.render_meetings();
            view.sync_panels();
            glib::ControlFlow::Break
        });
    }

    /// Mirrors panel and role state onto the widgets. Scheduling stays off
    /// until the known meetings have arrived.
    fn sync_panels(&self) {
        let scheduler = self.scheduler.borrow();
        for p in &self.panels {
            p.schedule.set_sensitive(scheduler.is_loaded());
            let Some(state) = scheduler.board().panel(p.category) else {
                continue;
            };
            p.root.set_visible(state.active);
            toggle_class(&p.root, "active", state.active);
            if let (Some(role_box), Some(picker)) = (&p.role_box, &state.roles) {
                toggle_class(role_box, "active", picker.active);
                for (role, btn) in &p.roles {
                    toggle_class(btn, "selected", picker.is_selected(*role));
                }
            }
        }
    }

    fn render_meetings(&self) {
        while let Some(child) = self.container.first_child() {
            self.container.remove(&child);
        }
        match self.scheduler.borrow().view(&self.strings) {
            MeetingsView::Loading(text) | MeetingsView::Placeholder(text) => {
                let lbl = gtk::Label::new(Some(&text));
                lbl.add_css_class("dim-label");
                self.container.append(&lbl);
            }
            MeetingsView::Cards(cards) => {
                for card in cards {
                    let frame = gtk::Box::new(gtk::Orientation::Vertical, 4);
                    frame.add_css_class("meeting-card");
                    let title = gtk::Label::new(Some(&card.title));
                    title.add_css_class("heading");
                    title.set_xalign(0.0);
                    frame.append(&title);
                    let lines = [
                        Some(card.date_line),
                        Some(card.time_line),
                        card.role_line,
                        Some(card.status_line),
                    ];
                    for line in lines.into_iter().flatten() {
                        let lbl = gtk::Label::new(Some(&line));
                        lbl.set_xalign(0.0);
                        frame.append(&lbl);
                    }
                    self.container.append(&frame);
                }
            }
        }
    }
}

fn toggle_class(widget: &impl IsA<gtk::Widget>, class: &str, on: bool) {
    if on {
        widget.add_css_class(class);
    } else {
        widget.remove_css_class(class);
    }
}
