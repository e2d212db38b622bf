pub mod browser;
pub mod diagnostics;
pub mod logging;
pub mod proxy;
