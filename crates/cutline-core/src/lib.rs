pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod links;
pub mod media;
pub mod placement;
pub mod playback;
pub mod scrollbar;
pub mod selection;
pub mod snap;
pub mod timecode;
pub mod timeline;
pub mod transform;
pub mod trim;
