use gtk4 as gtk;
use gtk4::prelude::*;

/// Modal message box attached to the window that holds `anchor`.
pub fn alert(anchor: &impl IsA<gtk::Widget>, text: &str, ok: &str) {
    let dialog = gtk::MessageDialog::builder()
        .modal(true)
        .message_type(gtk::MessageType::Info)
        .text(text)
        .build();
    if let Some(window) = anchor.root().and_then(|r| r.downcast::<gtk::Window>().ok()) {
        dialog.set_transient_for(Some(&window));
    }
    dialog.add_button(ok, gtk::ResponseType::Ok);
    dialog.connect_response(|dlg, _| dlg.close());
    dialog.present();
}
