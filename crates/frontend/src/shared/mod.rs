pub mod api_error;
pub mod api_utils;
pub mod components;
pub mod export;
pub mod icons;
pub mod modal;
