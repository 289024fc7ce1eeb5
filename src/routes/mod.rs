pub mod cycle;
pub mod journal;
pub mod quiz;
pub mod resources;
pub mod settings;
pub mod tracker;
