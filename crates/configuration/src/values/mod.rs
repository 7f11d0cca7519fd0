mod secret;
mod uri;

pub use secret::Secret;
pub use uri::ConnectionUri;
