//! Global event dispatchers fed by the host engine

pub mod hunger;

pub use hunger::{HungerChange, HungerPinDispatcher, FULL_FOOD_LEVEL};
