//! Host-facing seams: action descriptor, toasts and URL navigation.

use url::Url;

/// What the host editor needs to render the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDescriptor {
    pub label: &'static str,
    pub icon: &'static str,
    pub disabled: bool,
}

impl ActionDescriptor {
    pub const PREVIEW: ActionDescriptor = ActionDescriptor {
        label: "Open preview",
        icon: "eye-open",
        disabled: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub status: ToastStatus,
    pub title: String,
    pub description: Option<String>,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: ToastStatus::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            status: ToastStatus::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

/// Toast sink supplied by the host.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Opens a URL in a new browsing context.
pub trait Navigator {
    fn open(&self, url: &Url) -> std::io::Result<()>;
}
