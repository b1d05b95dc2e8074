pub mod api_utils;
pub mod commit;
pub mod components;
pub mod config;
pub mod form;
pub mod layered_modal;
pub mod notification;
pub mod selection;
