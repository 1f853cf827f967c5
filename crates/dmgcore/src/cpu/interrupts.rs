mod ime;
mod service;

pub use ime::MasterEnable;
