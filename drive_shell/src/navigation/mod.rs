mod browser;
mod errors;
mod navigator;
mod store;
mod types;
mod url_sync;

pub use browser::{Browser, InMemoryBrowser, Location};
pub use errors::NavigationError;
pub use navigator::Navigator;
pub use store::PageStateStore;
pub use types::{
    FragmentKind, ListingType, Modal, NavigationOutcome, NavigationState, Page, PaymentPayload,
    ScreenPayload, SyncOutcome,
};
pub use url_sync::UrlSynchronizer;
