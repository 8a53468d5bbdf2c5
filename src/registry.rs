//! Named spec lookup against a resources directory.
//!
//! `spec_named("MainSpec")` loads `<resources>/MainSpec.json` once and hands
//! out the same shared spec on every later call, so every part of a program
//! tunes and observes the same values. A spec whose file is missing or
//! malformed is still returned, disabled, and the failure is logged.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::constants::SPEC_EXTENSION;
use crate::error::{TunableError, TunableResult};
use crate::spec::TunableSpec;

/// Cache of specs loaded from one resources directory.
#[derive(Debug)]
pub struct SpecRegistry {
    resources_dir: PathBuf,
    specs: RefCell<HashMap<String, Rc<TunableSpec>>>,
}

impl SpecRegistry {
    /// Creates a registry reading from `resources_dir`.
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
            specs: RefCell::new(HashMap::new()),
        }
    }

    /// Creates a registry for the configured resources directory.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.paths.resources_dir.clone())
    }

    /// Directory spec files are read from.
    #[must_use]
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }

    /// Path of the file backing the spec called `name`.
    #[must_use]
    pub fn spec_path(&self, name: &str) -> PathBuf {
        self.resources_dir.join(format!("{name}.{SPEC_EXTENSION}"))
    }

    /// Returns the shared spec called `name`, loading it on first use.
    ///
    /// Never fails: a missing file or malformed JSON yields a disabled spec
    /// (see [`TunableSpec::is_enabled`]), which is cached like any other.
    pub fn spec_named(&self, name: &str) -> Rc<TunableSpec> {
        if let Some(spec) = self.specs.borrow().get(name) {
            return Rc::clone(spec);
        }

        let spec = match self.load(name) {
            Ok(spec) => spec,
            Err(err) => {
                warn!(spec = name, error = %err, "tuning disabled for spec");
                TunableSpec::disabled(name, err.to_string())
            }
        };

        let spec = Rc::new(spec);
        self.specs
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&spec));
        spec
    }

    /// Like [`SpecRegistry::spec_named`], but reports load failures instead of
    /// caching a disabled spec.
    pub fn try_spec_named(&self, name: &str) -> TunableResult<Rc<TunableSpec>> {
        if let Some(spec) = self.specs.borrow().get(name) {
            if spec.is_enabled() {
                return Ok(Rc::clone(spec));
            }
        }

        let spec = Rc::new(self.load(name)?);
        self.specs
            .borrow_mut()
            .insert(name.to_string(), Rc::clone(&spec));
        Ok(spec)
    }

    /// Drops the cached spec so the next lookup reads the file again.
    ///
    /// Holders of the old `Rc` keep it, along with its maintainers.
    pub fn forget(&self, name: &str) -> Option<Rc<TunableSpec>> {
        self.specs.borrow_mut().remove(name)
    }

    /// Names of specs loaded so far, sorted.
    #[must_use]
    pub fn loaded_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.specs.borrow().keys().cloned().collect();
        names.sort();
        names
    }

    /// Names of spec files present in the resources directory, sorted.
    pub fn available_specs(&self) -> TunableResult<Vec<String>> {
        let read_dir = fs::read_dir(&self.resources_dir).map_err(|source| TunableError::Io {
            path: self.resources_dir.clone(),
            source,
        })?;

        let mut names: Vec<String> = read_dir
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(SPEC_EXTENSION))
            })
            .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().to_string()))
            .collect();
        names.sort();
        Ok(names)
    }

    fn load(&self, name: &str) -> TunableResult<TunableSpec> {
        if name.trim().is_empty() || name.contains(['/', '\\']) {
            return Err(TunableError::Disabled {
                name: name.to_string(),
                reason: "spec names must be plain file stems".to_string(),
            });
        }

        let path = self.spec_path(name);
        debug!(spec = name, path = %path.display(), "resolving spec");
        TunableSpec::load(name, &path)
    }
}
