pub mod debounce;
pub mod events;
pub mod requests;
pub mod settings;
pub mod state;
