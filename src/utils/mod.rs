pub mod constants;
mod wait;

pub use wait::wait_for_any_selector;
