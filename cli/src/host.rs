//! Terminal implementations of the host collaborators.

use easy_preview_core::{Navigator, Notifier, Toast, ToastStatus};
use url::Url;

/// Opens preview URLs in the system browser.
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        webbrowser::open(url.as_str())
    }
}

/// Prints preview URLs instead of opening them.
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn open(&self, url: &Url) -> std::io::Result<()> {
        println!("{url}");
        Ok(())
    }
}

/// Writes toasts to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, toast: Toast) {
        let status = match toast.status {
            ToastStatus::Success => "ok",
            ToastStatus::Error => "error",
        };
        match toast.description {
            Some(description) => eprintln!("[{status}] {}: {description}", toast.title),
            None => eprintln!("[{status}] {}", toast.title),
        }
    }
}
