//! Data models for langcover.

mod organization;
mod result;

pub use organization::{load_organizations, Organization};
pub use result::{LanguageOptionSignal, SignalKind, SiteResult, SiteStatus};
