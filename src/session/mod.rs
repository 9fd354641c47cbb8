mod extractors;

pub use extractors::{provision, SessionId};
