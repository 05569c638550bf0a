pub mod dashboard;
pub mod i18n;
pub mod ids;
pub mod logging;
pub mod settings;
pub mod storage;
