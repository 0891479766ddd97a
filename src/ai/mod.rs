// AI module for the computer opponent

mod reactive_bot;

pub use reactive_bot::ReactiveBot;
