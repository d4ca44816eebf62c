//! Tool path resolution.
//!
//! The archive tools are located once, at startup, and the result is carried
//! around as a plain [`ToolPaths`] value. Nothing here caches state behind
//! the caller's back.
//!
//! Resolution policy is a chain of [`ToolResolver`]s; the first one that
//! answers wins.

use std::env;
use std::path::PathBuf;

use tracing::debug;

pub const UNAR: &str = "unar";
pub const LSAR: &str = "lsar";

pub trait ToolResolver {
    fn resolve(&self, tool: &str) -> Option<PathBuf>;
}

impl<R: ToolResolver + ?Sized> ToolResolver for Box<R> {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        (**self).resolve(tool)
    }
}

/// Ordered list of resolvers, tried front to back.
#[derive(Default)]
pub struct ChainResolver {
    links: Vec<Box<dyn ToolResolver + Send + Sync>>,
}

impl ChainResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(mut self, resolver: impl ToolResolver + Send + Sync + 'static) -> Self {
        self.links.push(Box::new(resolver));
        self
    }
}

impl ToolResolver for ChainResolver {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        self.links.iter().find_map(|link| link.resolve(tool))
    }
}

const ENV_PREFIX: &str = "UNARR";

/// Reads `UNARR_<TOOL>` from the environment, e.g. `UNARR_LSAR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvResolver;

impl EnvResolver {
    pub fn var_name(tool: &str) -> String {
        format!("{ENV_PREFIX}_{}", tool.to_uppercase())
    }
}

impl ToolResolver for EnvResolver {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        env::var_os(Self::var_name(tool))
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }
}

/// Looks the tool up on `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl ToolResolver for PathResolver {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        which::which(tool).ok()
    }
}

/// Tool shipped next to the running executable.
#[derive(Debug, Clone, Default)]
pub struct SiblingResolver {
    dir: Option<PathBuf>,
}

impl SiblingResolver {
    pub fn new() -> Self {
        Self {
            dir: env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(PathBuf::from)),
        }
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }
}

impl ToolResolver for SiblingResolver {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        let dir = self.dir.as_ref()?;
        #[cfg(target_os = "windows")]
        let path = dir.join(format!("{tool}.exe"));
        #[cfg(not(target_os = "windows"))]
        let path = dir.join(tool);

        path.is_file().then_some(path)
    }
}

/// Explicit per-tool paths, typically from a config file or CLI flags.
#[derive(Debug, Clone, Default)]
pub struct FixedResolver {
    unar: Option<PathBuf>,
    lsar: Option<PathBuf>,
}

impl FixedResolver {
    pub fn new(unar: Option<PathBuf>, lsar: Option<PathBuf>) -> Self {
        Self { unar, lsar }
    }
}

impl ToolResolver for FixedResolver {
    fn resolve(&self, tool: &str) -> Option<PathBuf> {
        match tool {
            UNAR => self.unar.clone(),
            LSAR => self.lsar.clone(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    pub unar: PathBuf,
    pub lsar: PathBuf,
}

impl ToolPaths {
    pub fn new(unar: impl Into<PathBuf>, lsar: impl Into<PathBuf>) -> Self {
        Self {
            unar: unar.into(),
            lsar: lsar.into(),
        }
    }

    /// Resolve both tools. A tool nobody knows about falls back to its bare
    /// name and is left to the OS lookup at spawn time.
    pub fn resolve(resolver: &impl ToolResolver) -> Self {
        let lookup = |tool: &str| {
            let path = resolver.resolve(tool).unwrap_or_else(|| PathBuf::from(tool));
            debug!(tool, path = %path.display(), "resolved tool");
            path
        };
        Self {
            unar: lookup(UNAR),
            lsar: lookup(LSAR),
        }
    }

    /// Environment, then `PATH`, then next to the executable.
    pub fn detect() -> Self {
        Self::resolve(&Self::default_resolver())
    }

    pub fn default_resolver() -> ChainResolver {
        ChainResolver::new()
            .then(EnvResolver)
            .then(PathResolver)
            .then(SiblingResolver::new())
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self::new(UNAR, LSAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockResolver(&'static str, Option<PathBuf>);

    impl ToolResolver for MockResolver {
        fn resolve(&self, tool: &str) -> Option<PathBuf> {
            if tool == self.0 { self.1.clone() } else { None }
        }
    }

    #[test]
    fn test_chain_resolver_first_answer_wins() {
        let chain = ChainResolver::new()
            .then(MockResolver(UNAR, None))
            .then(MockResolver(UNAR, Some(PathBuf::from("/second/unar"))))
            .then(MockResolver(UNAR, Some(PathBuf::from("/third/unar"))));

        assert_eq!(chain.resolve(UNAR), Some(PathBuf::from("/second/unar")));
        assert_eq!(chain.resolve(LSAR), None);
    }

    #[test]
    fn test_empty_chain_resolves_nothing() {
        assert_eq!(ChainResolver::new().resolve(UNAR), None);
    }

    #[test]
    fn test_env_resolver_var_name() {
        assert_eq!(EnvResolver::var_name(UNAR), "UNARR_UNAR");
        assert_eq!(EnvResolver::var_name(LSAR), "UNARR_LSAR");
    }

    #[test]
    fn test_env_resolver_reads_variable() {
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var("UNARR_RESOLVER_TEST_TOOL", "/custom/tool") };

        assert_eq!(
            EnvResolver.resolve("resolver_test_tool"),
            Some(PathBuf::from("/custom/tool"))
        );
        assert_eq!(EnvResolver.resolve("resolver_test_unset"), None);
    }

    #[test]
    fn test_env_resolver_ignores_empty_value() {
        // SAFETY: the variable name is unique to this test.
        unsafe { env::set_var("UNARR_RESOLVER_EMPTY_TOOL", "") };

        assert_eq!(EnvResolver.resolve("resolver_empty_tool"), None);
    }

    #[test]
    fn test_sibling_resolver_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = SiblingResolver::in_dir(dir.path());
        assert_eq!(resolver.resolve(LSAR), None);

        #[cfg(target_os = "windows")]
        let name = "lsar.exe";
        #[cfg(not(target_os = "windows"))]
        let name = "lsar";
        std::fs::write(dir.path().join(name), b"").unwrap();

        assert_eq!(resolver.resolve(LSAR), Some(dir.path().join(name)));
    }

    #[test]
    fn test_fixed_resolver_only_knows_its_tools() {
        let resolver = FixedResolver::new(Some(PathBuf::from("/opt/unar")), None);
        assert_eq!(resolver.resolve(UNAR), Some(PathBuf::from("/opt/unar")));
        assert_eq!(resolver.resolve(LSAR), None);
        assert_eq!(resolver.resolve("tar"), None);
    }

    #[test]
    fn test_tool_paths_fall_back_to_bare_names() {
        let paths = ToolPaths::resolve(&ChainResolver::new());
        assert_eq!(paths, ToolPaths::default());
        assert_eq!(paths.unar, PathBuf::from("unar"));
        assert_eq!(paths.lsar, PathBuf::from("lsar"));
    }

    #[test]
    fn test_tool_paths_mix_resolved_and_fallback() {
        let resolver = FixedResolver::new(None, Some(PathBuf::from("/usr/local/bin/lsar")));
        let paths = ToolPaths::resolve(&resolver);
        assert_eq!(paths.unar, PathBuf::from("unar"));
        assert_eq!(paths.lsar, PathBuf::from("/usr/local/bin/lsar"));
    }
}
