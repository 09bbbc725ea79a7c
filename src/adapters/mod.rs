// Adapters layer: concrete port implementations for the CLI host.

pub mod console;
pub mod scan;
pub mod session;

pub use console::{CliNavigator, ConsoleNotifier};
pub use scan::TextScanner;
pub use session::FileSessionStore;
