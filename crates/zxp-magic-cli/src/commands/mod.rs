pub mod debug;
pub mod folder;
pub mod format;
pub mod inspect;
pub mod install;
pub mod list;
pub mod show;
pub mod uninstall;
