//! Provider abstractions the host game plugs into the session.
mod share;

pub use share::{PartyRoster, SoloShare, XpShareProvider};
