pub mod descriptor;
pub mod logging;
pub mod settings;
