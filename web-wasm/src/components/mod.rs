pub mod camera_modal;
pub mod export_buttons;
pub mod header;
pub mod loading_overlay;
pub mod results_panel;
pub mod upload_area;
