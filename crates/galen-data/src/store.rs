//! Cached access to the integrated model.

use crate::clean::CoercePolicy;
use crate::error::{DataError, Result};
use crate::integrate;
use crate::load;
use crate::model::PharmaModel;
use crate::schema;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::debug;

/// Modification signature of the five source files: filename, byte length,
/// and mtime where the filesystem provides one.
type Signature = Vec<(String, u64, Option<SystemTime>)>;

/// Cached, reloadable access to the integrated model.
///
/// `model` recomputes only when the signature of the source files changes;
/// `refresh` forces a reload and `invalidate` drops the cache. The store
/// holds no state beyond its own cache and requires no locking.
#[derive(Debug)]
pub struct DataStore {
    dir: PathBuf,
    policy: CoercePolicy,
    cached: Option<(Signature, PharmaModel)>,
}

impl DataStore {
    /// Create a store over `dir` with the default coercion policy.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_policy(dir, CoercePolicy::default())
    }

    /// Create a store over `dir` with an explicit coercion policy.
    pub fn with_policy(dir: impl Into<PathBuf>, policy: CoercePolicy) -> Self {
        Self {
            dir: dir.into(),
            policy,
            cached: None,
        }
    }

    /// The data directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a model is currently cached.
    pub const fn is_cached(&self) -> bool {
        self.cached.is_some()
    }

    /// Return the integrated model, reloading if the sources changed.
    pub fn model(&mut self) -> Result<&PharmaModel> {
        let signature = self.signature()?;
        let fresh = matches!(&self.cached, Some((cached, _)) if *cached == signature);
        if !fresh {
            debug!(dir = %self.dir.display(), "source signature changed, reloading");
            let model = self.load_model()?;
            self.cached = Some((signature, model));
        }
        let Some((_, model)) = self.cached.as_ref() else {
            unreachable!("cache populated above")
        };
        Ok(model)
    }

    /// Reload unconditionally, replacing any cached model.
    pub fn refresh(&mut self) -> Result<&PharmaModel> {
        let signature = self.signature()?;
        let model = self.load_model()?;
        Ok(&self.cached.insert((signature, model)).1)
    }

    /// Drop the cached model; the next [`model`](Self::model) call reloads.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    fn load_model(&self) -> Result<PharmaModel> {
        let raw = load::load_dir(&self.dir)?;
        integrate::integrate_with_policy(&raw, self.policy)
    }

    /// Compute the modification signature of the five source files.
    ///
    /// A missing file surfaces as [`DataError::MissingSource`], the same
    /// failure a direct load would produce.
    fn signature(&self) -> Result<Signature> {
        let mut signature = Vec::with_capacity(schema::SOURCES.len());
        let mut missing = Vec::new();
        for source in &schema::SOURCES {
            match std::fs::metadata(self.dir.join(source.file)) {
                Ok(meta) => {
                    signature.push((source.file.to_string(), meta.len(), meta.modified().ok()));
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    missing.push(source.file.to_string());
                }
                Err(err) => return Err(err.into()),
            }
        }
        if !missing.is_empty() {
            return Err(DataError::MissingSource {
                dir: self.dir.clone(),
                files: missing,
            });
        }
        Ok(signature)
    }
}
