// Registration, login, guest access and per-session state.
// Sessions are explicit objects handed to handlers via the `Session` extractor.

pub mod handlers;
pub mod password;
pub mod sessions;
pub mod store;
