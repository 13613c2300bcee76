//! `confport.toml` manifest parsing and project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use confport_rewrite::Layout;
use confport_targets::{parse, TargetTables};
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "confport.toml";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfportManifest {
    /// Source, build and output locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Native build configuration.
    #[serde(default)]
    pub build: BuildConfig,
    /// Which generated files are copied and rewritten.
    #[serde(default)]
    pub generate: GenerateConfig,
    /// Table overrides.
    #[serde(default)]
    pub tables: TablesConfig,
}

/// Paths section. Relative paths resolve against the manifest directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct PathsConfig {
    /// Toolchain source tree handed to cmake.
    pub llvm_dir: PathBuf,
    /// Native build directory.
    pub objs_dir: PathBuf,
    /// Root of the generated configuration trees.
    pub configs_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            llvm_dir: PathBuf::from("../llvm"),
            objs_dir: PathBuf::from("llvm_objs"),
            configs_dir: PathBuf::from("../configs"),
        }
    }
}

/// Build section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct BuildConfig {
    /// cmake executable.
    pub cmake: String,
    /// make executable.
    pub make: String,
    /// Extra cmake options; `-DLLVM_TARGETS_TO_BUILD` is derived from the tables.
    pub options: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            cmake: "cmake".into(),
            make: "make".into(),
            options: [
                "-DCMAKE_BUILD_TYPE=Release",
                "-DLLVM_ENABLE_TERMINFO=OFF",
                "-DLLVM_ENABLE_LIBXML2=OFF",
                "-DLLVM_ENABLE_LIBEDIT=OFF",
                "-DLLVM_ENABLE_LIBPFM=OFF",
                "-DLLVM_ENABLE_ZLIB=OFF",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Generate section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GenerateConfig {
    /// Accepted file extensions.
    pub suffixes: Vec<String>,
    /// Build subdirectories copied verbatim into `<configs-dir>/common`.
    pub common_subdirs: Vec<PathBuf>,
    /// Build subdirectory rewritten into `<configs-dir>/<platform>`.
    pub platform_subdir: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            suffixes: Layout::default_suffixes(),
            common_subdirs: Layout::default_common_subdirs(),
            platform_subdir: Layout::default_platform_subdir(),
        }
    }
}

/// Tables section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TablesConfig {
    /// TOML tables file replacing the built-in tables.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl ConfportManifest {
    /// Search upward from `start_dir` for a `confport.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let manifest = Self::load(&candidate)?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load a manifest from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing confport.toml")
    }

    /// Generate the default template for `confport init`.
    pub fn template() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("serializing confport.toml template")
    }
}

/// A manifest bound to the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct Project {
    pub manifest: ConfportManifest,
    pub root: PathBuf,
    /// Where the manifest was read from, if anywhere.
    pub manifest_path: Option<PathBuf>,
}

impl Project {
    /// Resolve the project from `--manifest`, an upward search, or defaults rooted at `cwd`.
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            let manifest = ConfportManifest::load(path)?;
            let root = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
                Some(parent) => parent.to_path_buf(),
                None => cwd.to_path_buf(),
            };
            return Ok(Self {
                manifest,
                root,
                manifest_path: Some(path.to_path_buf()),
            });
        }
        match ConfportManifest::find_and_load(cwd)? {
            Some((manifest, root)) => Ok(Self {
                manifest,
                manifest_path: Some(root.join(MANIFEST_FILE)),
                root,
            }),
            None => Ok(Self {
                manifest: ConfportManifest::default(),
                root: cwd.to_path_buf(),
                manifest_path: None,
            }),
        }
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    pub fn llvm_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.paths.llvm_dir)
    }

    pub fn objs_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.paths.objs_dir)
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.resolve(&self.manifest.paths.configs_dir)
    }

    /// The generation layout described by the manifest.
    pub fn layout(&self) -> Layout {
        let generate = &self.manifest.generate;
        Layout {
            objs_dir: self.objs_dir(),
            configs_dir: self.configs_dir(),
            suffixes: generate.suffixes.clone(),
            common_subdirs: generate.common_subdirs.clone(),
            platform_subdir: generate.platform_subdir.clone(),
        }
    }

    /// Built-in tables, or the validated tables file named by the manifest.
    pub fn tables(&self) -> Result<TargetTables> {
        match &self.manifest.tables.file {
            Some(file) => {
                let path = self.resolve(file);
                parse::load_validated(&path)
                    .with_context(|| format!("loading tables from {}", path.display()))
            }
            None => Ok(TargetTables::builtin()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[paths]
llvm-dir = "third_party/llvm"
objs-dir = "out/llvm"
configs-dir = "configs"

[build]
cmake = "/usr/bin/cmake"
options = ["-DCMAKE_BUILD_TYPE=Debug"]

[generate]
suffixes = ["h"]
common-subdirs = ["include/llvm/IR"]
platform-subdir = "include/llvm/Config"

[tables]
file = "tables.toml"
"#;
        let manifest = ConfportManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.paths.llvm_dir, Path::new("third_party/llvm"));
        assert_eq!(manifest.paths.objs_dir, Path::new("out/llvm"));
        assert_eq!(manifest.build.cmake, "/usr/bin/cmake");
        assert_eq!(manifest.build.make, "make");
        assert_eq!(manifest.build.options, ["-DCMAKE_BUILD_TYPE=Debug"]);
        assert_eq!(manifest.generate.suffixes, ["h"]);
        assert_eq!(manifest.generate.common_subdirs.len(), 1);
        assert_eq!(manifest.tables.file.as_deref(), Some(Path::new("tables.toml")));
    }

    #[test]
    fn parse_empty_manifest_uses_defaults() {
        let manifest = ConfportManifest::from_str("").unwrap();
        assert_eq!(manifest.paths.objs_dir, Path::new("llvm_objs"));
        assert_eq!(manifest.paths.configs_dir, Path::new("../configs"));
        assert_eq!(manifest.build.options.len(), 6);
        assert_eq!(manifest.generate.suffixes, ["h", "inc", "def"]);
        assert_eq!(manifest.generate.common_subdirs.len(), 7);
        assert!(manifest.tables.file.is_none());
    }

    #[test]
    fn reject_invalid_toml() {
        assert!(ConfportManifest::from_str("this is not valid toml [[[").is_err());
    }

    #[test]
    fn template_round_trips() {
        let template = ConfportManifest::template().unwrap();
        let manifest = ConfportManifest::from_str(&template).unwrap();
        assert_eq!(manifest.paths.llvm_dir, Path::new("../llvm"));
        assert_eq!(
            manifest.generate.platform_subdir,
            Path::new("include/llvm/Config")
        );
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "[paths]\nobjs-dir = \"build\"\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = ConfportManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.paths.objs_dir, Path::new("build"));
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn project_paths_resolve_against_manifest_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "").unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();

        let project = Project::discover(None, &nested).unwrap();
        assert_eq!(project.root, dir.path());
        assert_eq!(project.objs_dir(), dir.path().join("llvm_objs"));
        let layout = project.layout();
        assert_eq!(layout.configs_dir, dir.path().join("../configs"));
        assert_eq!(layout.suffixes, ["h", "inc", "def"]);
    }

    #[test]
    fn explicit_manifest_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[paths]\nconfigs-dir = \"gen\"\n").unwrap();

        let project = Project::discover(Some(&path), Path::new("/")).unwrap();
        assert_eq!(project.configs_dir(), dir.path().join("gen"));
        assert_eq!(project.manifest_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn tables_default_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let project = Project::discover(None, dir.path()).unwrap();
        assert_eq!(project.tables().unwrap(), TargetTables::builtin());
    }

    #[test]
    fn tables_file_is_loaded_and_validated() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), "[tables]\nfile = \"t.toml\"\n").unwrap();
        std::fs::write(
            dir.path().join("t.toml"),
            parse::generate_template().unwrap(),
        )
        .unwrap();
        let project = Project::discover(None, dir.path()).unwrap();
        assert_eq!(project.tables().unwrap().platforms.len(), 2);

        std::fs::write(dir.path().join("t.toml"), "architectures = []\nplatforms = []\n").unwrap();
        assert!(project.tables().is_err());
    }
}
