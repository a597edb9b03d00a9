//! Combat system
//!
//! Attack profiles, elements and the tunable curves that turn dodge, armor
//! and resistance into strike chances and damage.

mod attack;
mod element;
pub mod policy;

pub use attack::{AttackProfile, Resolution};
pub use element::Element;
