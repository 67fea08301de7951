//! Resolution of the host application's identity.
//!
//! `Packaged` locators that do not name an application explicitly can only
//! be resolved relative to the application that is actually running.  This
//! module finds that application's name through a chain of discrete
//! fallback probes.  The chain as a whole yields `None` rather than an
//! error: an unresolved identity merely disables relative packaged
//! lookups, it never fails a conversion.

use std::env;
use std::path::{Path, PathBuf};

/// Process name of the design-time authoring host.  That process hosts
/// previews on behalf of the application being designed and is never the
/// identity we are looking for.
const DESIGN_TIME_HOST: &str = "xdesproc";

/// Runtime probes consulted while resolving the host identity.
///
/// [`SystemRuntime`] answers these from the process's own view of itself;
/// hosts that know better (plugin containers, test harnesses) can supply
/// their own implementation.
pub trait HostRuntime {
    /// Identity of the entry process, typically its executable's file
    /// stem.
    fn entry_process_identity(&self) -> Option<String>;

    /// Paths of the non-dynamic modules currently loaded in the process.
    fn loaded_executable_modules(&self) -> Vec<PathBuf>;

    /// Identity of the unit that owns the application's packaged
    /// resources, when the runtime can name one.
    fn resource_owner_identity(&self) -> Option<String>;
}

/// The process's own view of itself.
#[derive(Debug, Default)]
pub struct SystemRuntime;

impl HostRuntime for SystemRuntime {
    fn entry_process_identity(&self) -> Option<String> {
        env::current_exe().ok().as_deref().and_then(file_stem_of)
    }

    fn loaded_executable_modules(&self) -> Vec<PathBuf> {
        // std exposes no module enumeration; the entry executable is the
        // one module always known to be loaded.
        env::current_exe().ok().into_iter().collect()
    }

    fn resource_owner_identity(&self) -> Option<String> {
        None
    }
}

/// Runs the fallback chain.  Each step is consulted only if the previous
/// one yielded nothing; `None` means every probe came up empty.
pub fn resolve_host_identity(runtime: &dyn HostRuntime) -> Option<String> {
    from_entry_process(runtime)
        .or_else(|| from_loaded_modules(runtime))
        .or_else(|| from_resource_owner(runtime))
}

fn from_entry_process(runtime: &dyn HostRuntime) -> Option<String> {
    runtime
        .entry_process_identity()
        .filter(|name| !is_design_time_host(name))
}

fn from_loaded_modules(runtime: &dyn HostRuntime) -> Option<String> {
    runtime
        .loaded_executable_modules()
        .iter()
        .filter(|path| is_executable_module(path))
        .filter_map(|path| file_stem_of(path))
        .find(|name| !is_design_time_host(name))
}

fn from_resource_owner(runtime: &dyn HostRuntime) -> Option<String> {
    runtime
        .resource_owner_identity()
        .filter(|name| !is_design_time_host(name))
}

fn is_design_time_host(name: &str) -> bool {
    name.eq_ignore_ascii_case(DESIGN_TIME_HOST)
}

// Unix executables usually carry no extension.
fn is_executable_module(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => ext.eq_ignore_ascii_case("exe"),
        None => true,
    }
}

fn file_stem_of(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
}
