pub mod file_upload;
pub mod panel;
pub mod prescription;
pub mod risk;
pub mod sidebar;
pub mod utils;
pub mod xray;
