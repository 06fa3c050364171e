//! Canonical stored paths.
//!
//! All operations here are lexical. The filesystem is never consulted, so
//! symlinks are not resolved and the result depends only on the input string,
//! the options and the anchor directory.

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::options::BuildOptions;

/// Turns input paths into the form stored in texture entries.
#[derive(Debug, Clone)]
pub struct PathNormalizer {
    anchor: Anchor,
    backslash: bool,
    strip_dot_prefix: bool,
    lowercase: bool,
}

#[derive(Debug, Clone)]
enum Anchor {
    /// Every input is made relative to this directory.
    Base(PathBuf),
    /// Absolute inputs are made relative to this directory.
    WorkingDir(PathBuf),
    None,
}

impl PathNormalizer {
    /// Creates a normalizer from build options.
    ///
    /// Without a base directory, the current working directory is captured
    /// once here.
    #[must_use]
    pub fn new(opts: &BuildOptions) -> Self {
        let anchor = match base_dir(opts) {
            Some(dir) => Anchor::Base(dir.clone()),
            None => env::current_dir().map_or(Anchor::None, Anchor::WorkingDir),
        };
        Self::with_anchor(opts, anchor)
    }

    /// Creates a normalizer that resolves absolute inputs against `cwd`
    /// instead of the process working directory.
    #[must_use]
    pub fn with_working_dir(opts: &BuildOptions, cwd: impl Into<PathBuf>) -> Self {
        let anchor = match base_dir(opts) {
            Some(dir) => Anchor::Base(dir.clone()),
            None => Anchor::WorkingDir(cwd.into()),
        };
        Self::with_anchor(opts, anchor)
    }

    fn with_anchor(opts: &BuildOptions, anchor: Anchor) -> Self {
        Self {
            anchor,
            backslash: opts.backslash_paths,
            strip_dot_prefix: opts.strip_dot_prefix,
            lowercase: opts.lowercase_paths,
        }
    }

    /// Returns the stored form of `input`.
    #[must_use]
    pub fn normalize(&self, input: &str) -> String {
        let cleaned = clean(Path::new(input));
        let relative = match &self.anchor {
            Anchor::Base(base) => relative_to(base, &cleaned),
            Anchor::WorkingDir(cwd) if cleaned.is_absolute() => relative_to(cwd, &cleaned),
            _ => None,
        }
        .unwrap_or(cleaned);

        let mut out = relative.to_string_lossy().into_owned();
        if self.backslash {
            out = out.replace('/', "\\");
        }
        if self.strip_dot_prefix {
            if let Some(rest) = out.strip_prefix(".\\").or_else(|| out.strip_prefix("./")) {
                out = rest.to_owned();
            }
        }
        if self.lowercase {
            out = out.to_lowercase();
        }
        out
    }
}

/// A blank base directory counts as unset.
fn base_dir(opts: &BuildOptions) -> Option<&PathBuf> {
    opts.base_dir
        .as_ref()
        .filter(|dir| !dir.to_string_lossy().trim().is_empty())
}

/// Lexically cleans `path`: drops `.` components and folds `..` into the
/// preceding normal component. An empty result becomes `.`.
#[must_use]
pub fn clean(path: &Path) -> PathBuf {
    let mut out: Vec<Component<'_>> = Vec::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.last() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root.
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(comp),
            },
            other => out.push(other),
        }
    }
    if out.is_empty() {
        PathBuf::from(".")
    } else {
        out.iter().collect()
    }
}

/// Lexically computes `target` relative to `base`.
///
/// Returns `None` when no relative path exists, such as when exactly one of
/// the two is absolute or they live under different prefixes.
#[must_use]
pub fn relative_to(base: &Path, target: &Path) -> Option<PathBuf> {
    let base = clean(base);
    let target = clean(target);
    if base.has_root() != target.has_root() {
        return None;
    }

    let b: Vec<_> = base
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();
    let t: Vec<_> = target
        .components()
        .filter(|c| *c != Component::CurDir)
        .collect();

    let common = b.iter().zip(&t).take_while(|(x, y)| x == y).count();
    // Climbing out of anything but a named directory is not expressible.
    if !b[common..].iter().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    let mut out = PathBuf::new();
    for _ in common..b.len() {
        out.push("..");
    }
    for comp in &t[common..] {
        out.push(comp);
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> BuildOptions {
        BuildOptions::default()
    }

    #[test]
    fn clean_folds_dots() {
        assert_eq!(clean(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(clean(Path::new("./a")), PathBuf::from("a"));
        assert_eq!(clean(Path::new("../a/..")), PathBuf::from(".."));
        assert_eq!(clean(Path::new("")), PathBuf::from("."));
        assert_eq!(clean(Path::new("a/..")), PathBuf::from("."));
    }

    #[cfg(unix)]
    #[test]
    fn clean_keeps_root() {
        assert_eq!(clean(Path::new("/../a//b/")), PathBuf::from("/a/b"));
    }

    #[cfg(unix)]
    #[test]
    fn relative_paths() {
        assert_eq!(
            relative_to(Path::new("/work"), Path::new("/work/data/a.paa")),
            Some(PathBuf::from("data/a.paa"))
        );
        assert_eq!(
            relative_to(Path::new("/work/addon"), Path::new("/work/other/a.paa")),
            Some(PathBuf::from("../other/a.paa"))
        );
        assert_eq!(
            relative_to(Path::new("/work"), Path::new("/work")),
            Some(PathBuf::from("."))
        );
        assert_eq!(relative_to(Path::new("/work"), Path::new("data/a.paa")), None);
        assert_eq!(
            relative_to(Path::new("data"), Path::new("data/sub/a.paa")),
            Some(PathBuf::from("sub/a.paa"))
        );
        assert_eq!(relative_to(Path::new(".."), Path::new("a.paa")), None);
    }

    #[cfg(unix)]
    #[test]
    fn normalize_against_base_dir() {
        let opts = BuildOptions {
            base_dir: Some(PathBuf::from("/work/addon")),
            ..opts()
        };
        let n = PathNormalizer::new(&opts);
        assert_eq!(n.normalize("/work/addon/Data/Wall_CO.paa"), "data\\wall_co.paa");
        assert_eq!(n.normalize("/work/addon/./data/../x.paa"), "x.paa");
    }

    #[cfg(unix)]
    #[test]
    fn normalize_absolute_against_working_dir() {
        let n = PathNormalizer::with_working_dir(&opts(), "/work");
        assert_eq!(n.normalize("/work/data/a_co.paa"), "data\\a_co.paa");
        // Relative inputs are only cleaned.
        assert_eq!(n.normalize("./data//b_co.paa"), "data\\b_co.paa");
    }

    #[cfg(unix)]
    #[test]
    fn normalize_keeps_unrelated_absolute_path() {
        let opts = BuildOptions {
            base_dir: Some(PathBuf::from("relative/base")),
            ..opts()
        };
        let n = PathNormalizer::new(&opts);
        assert_eq!(n.normalize("/abs/a.paa"), "\\abs\\a.paa");
    }

    #[cfg(unix)]
    #[test]
    fn normalize_respects_flags() {
        let opts = BuildOptions {
            lowercase_paths: false,
            backslash_paths: false,
            ..opts()
        };
        let n = PathNormalizer::with_working_dir(&opts, "/unused");
        assert_eq!(n.normalize("Data/Wall_CO.paa"), "Data/Wall_CO.paa");
    }

    #[test]
    fn normalize_is_deterministic() {
        let n = PathNormalizer::with_working_dir(&opts(), "/work");
        assert_eq!(n.normalize("a/B.paa"), n.normalize("a/B.paa"));
    }
}
