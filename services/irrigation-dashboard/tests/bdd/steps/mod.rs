//! BDD step definitions for the irrigation dashboard

pub mod command_steps;
pub mod image_steps;
pub mod sensor_steps;
pub mod voice_steps;
