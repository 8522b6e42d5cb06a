mod controller;

pub use controller::{TimerController, TimerState};
