pub mod document;
pub mod editor;
pub mod error;
pub mod gate;
pub mod map;
pub mod ports;
pub mod service;
pub mod tasks;
pub mod timestamp;
pub mod viewer;
