//! Root manager integration.
//!
//! A device runs at most one of KernelSU, APatch or Magisk. [`RootRuntime`]
//! finds it and drives its command-line interface to install module archives
//! and enumerate installed modules.

mod error;
mod module;
mod runtime;

pub use error::{Result, RootError};
pub use module::{ModuleInfo, parse_module_prop, scan_modules_dir};
pub use runtime::{ADB_ROOT, RootRuntime, RuntimeKind};
