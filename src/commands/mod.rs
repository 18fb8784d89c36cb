pub mod installations;
pub mod theme;
pub mod versions;

pub use installations::InstallationsCommand;
pub use theme::ThemeCommand;
pub use versions::VersionsCommand;
