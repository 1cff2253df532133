pub mod bootstrap;
pub mod ident;
pub mod tool;

pub use bootstrap::{Bootstrapper, absolutize, apply_env_overlay, parse_var_listing};
pub use ident::{Identity, extract_identity};
pub use tool::{GitTool, ToolOutput};
