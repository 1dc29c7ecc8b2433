//! Clipboard helper with a legacy fallback chain.

use std::io::Write;

use base64::Engine;

use crate::notifications::{Notification, Notifier};

/// Copy text to the system clipboard.
///
/// Falls back to emitting an OSC 52 sequence on stdout when the clipboard
/// service is unavailable (remote shells, headless sessions); only when both
/// mechanisms fail does this report `false`.
pub fn copy_text(text: &str) -> bool {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        if clipboard.set_text(text.to_string()).is_ok() {
            return true;
        }
    }
    copy_text_osc52(text)
}

/// OSC 52 clipboard write: the terminal itself stores the payload, which
/// survives SSH where a native clipboard service does not.
fn copy_text_osc52(text: &str) -> bool {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    let mut stdout = std::io::stdout();
    write!(stdout, "\x1b]52;c;{encoded}\x07")
        .and_then(|_| stdout.flush())
        .is_ok()
}

/// Copy text, surfacing an error notification when every mechanism fails.
pub fn copy_text_or_notify(notifier: &Notifier, text: &str) -> bool {
    let copied = copy_text(text);
    if !copied {
        notifier.notify(
            Notification::error("Copy failed")
                .with_description("Could not access the clipboard."),
        );
    }
    copied
}
