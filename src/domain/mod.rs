//! Core domain types for ccopen

mod favorite;
mod launch;

pub use favorite::{Favorite, directory_name, relative_time};
pub use launch::LaunchRequest;
