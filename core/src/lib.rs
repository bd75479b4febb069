//! Draft preview links for a content studio.
//!
//! A preview request mints a one-hour secret, stores it as a draft record and
//! returns a frontend URL that carries the secret and the document's content
//! path. Validation of the secret happens in the frontend.

pub mod action;
pub mod link;
pub mod resolve;
pub mod secret;
pub mod store;
pub mod types;

pub use action::error::PreviewError;
pub use action::{
    ActionDescriptor, IssuedPreview, Navigator, Notifier, PreviewAction, PreviewRequest, Stage,
    Toast, ToastStatus,
};
pub use store::error::StoreError;
pub use store::{Dataset, ExpiryQuery, RedbDataset, SecretStore};
