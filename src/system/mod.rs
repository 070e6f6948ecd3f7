pub mod event;
pub mod indicator;
pub mod state;
