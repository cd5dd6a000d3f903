mod credentials;
mod header;
mod narrative_tiles;
mod toast;

pub use credentials::CredentialsForm;
pub use header::DashboardHeader;
pub use narrative_tiles::NarrativeTiles;
pub use toast::{ErrorToast, Toast};
