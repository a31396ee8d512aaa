use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    assets::media,
    assets::source::{
        MediaKind, ResolvedSource, SourceHandle, SourceLoader, SourceRequest, SourceRole,
    },
    foundation::error::{ReelError, ReelResult, SourceFailure},
    playlist::model::{MediaConfig, VisualKind},
};

/// Every source a playlist document needs, grouped per role and kept in request order.
#[derive(Clone, Debug, Default)]
pub struct LoadedSources {
    /// Video sources, in playlist order among videos.
    pub videos: Vec<ResolvedSource>,
    /// Image sources, in playlist order among images.
    pub images: Vec<ResolvedSource>,
    /// Track sources, in track order.
    pub tracks: Vec<ResolvedSource>,
}

/// Source requests for `config`: visual items numbered per kind, then tracks.
pub fn source_requests(config: &MediaConfig) -> ReelResult<Vec<SourceRequest>> {
    let mut out = Vec::with_capacity(config.playlist.len() + config.tracks.len());
    let mut next_video = 0usize;
    let mut next_image = 0usize;

    for item in config.playlist_items()? {
        let locator = item.media.locator().ok_or_else(|| {
            ReelError::validation(format!("media '{}' has no source locator", item.id))
        })?;
        let (role, index) = match item.media.kind {
            VisualKind::Video => {
                next_video += 1;
                (SourceRole::Video, next_video - 1)
            }
            VisualKind::Image => {
                next_image += 1;
                (SourceRole::Image, next_image - 1)
            }
        };
        out.push(SourceRequest {
            role,
            index,
            locator: locator.to_string(),
        });
    }

    out.extend(
        config
            .tracks
            .iter()
            .enumerate()
            .map(|(index, track)| SourceRequest {
                role: SourceRole::Track,
                index,
                locator: track.src.clone(),
            }),
    );
    Ok(out)
}

/// Load every source referenced by `config`.
///
/// Requests run concurrently; results are re-associated with their originating index before
/// returning. Any failure fails the whole load with one aggregate error listing all of them.
#[tracing::instrument(skip_all, fields(config_id = config.id.as_deref().unwrap_or("")))]
pub fn load_sources(config: &MediaConfig, loader: &dyn SourceLoader) -> ReelResult<LoadedSources> {
    let requests = source_requests(config)?;
    let results: Vec<ReelResult<ResolvedSource>> = requests
        .par_iter()
        .map(|request| {
            let source = loader.load(request)?;
            if source.kind != request.kind() {
                return Err(ReelError::validation(format!(
                    "loader returned {} for a {} request",
                    source.kind,
                    request.kind()
                )));
            }
            Ok(source)
        })
        .collect();

    let mut out = LoadedSources::default();
    let mut failures = Vec::new();
    for (request, result) in requests.into_iter().zip(results) {
        match result {
            Ok(source) => match request.role {
                SourceRole::Video => out.videos.push(source),
                SourceRole::Image => out.images.push(source),
                SourceRole::Track => out.tracks.push(source),
            },
            Err(e) => failures.push(SourceFailure {
                role: request.role,
                index: request.index,
                locator: request.locator,
                reason: e.to_string(),
            }),
        }
    }

    if !failures.is_empty() {
        tracing::error!(failed = failures.len(), "source loading failed");
        return Err(ReelError::SourceLoad(failures));
    }

    tracing::info!(
        videos = out.videos.len(),
        images = out.images.len(),
        tracks = out.tracks.len(),
        "sources loaded"
    );
    Ok(out)
}

/// Filesystem-backed loader resolving locators against a root directory.
///
/// A leading `/` is read as relative to the root (web-root style). Locators with a URL scheme
/// or `..` components are rejected.
#[derive(Clone, Debug)]
pub struct FsSourceLoader {
    root: PathBuf,
}

impl FsSourceLoader {
    /// Loader rooted at `root`, usually the directory holding the playlist document.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used to resolve locators.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path a locator resolves to.
    pub fn resolve_path(&self, locator: &str) -> ReelResult<PathBuf> {
        if locator.contains("://") {
            return Err(ReelError::validation(format!(
                "unsupported locator scheme in '{locator}'"
            )));
        }
        let rel = normalize_rel_path(locator.trim_start_matches(['/', '\\']))?;
        Ok(self.root.join(Path::new(&rel)))
    }
}

impl SourceLoader for FsSourceLoader {
    fn load(&self, request: &SourceRequest) -> ReelResult<ResolvedSource> {
        let path = self.resolve_path(&request.locator)?;
        if !path.is_file() {
            return Err(ReelError::validation(format!(
                "no such file '{}'",
                path.display()
            )));
        }

        let kind = request.kind();
        let (duration_secs, dimensions) = match kind {
            MediaKind::Image => (None, Some(media::probe_image(&path)?)),
            MediaKind::Video | MediaKind::Audio => (media::probe_duration(&path)?, None),
        };
        tracing::debug!(%kind, path = %path.display(), ?duration_secs, "source loaded");

        Ok(ResolvedSource {
            kind,
            duration_secs,
            handle: SourceHandle {
                locator: request.locator.clone(),
                path: Some(path),
                dimensions,
            },
        })
    }
}

/// Normalize a relative locator: unify separators, drop `.` and empty parts, reject `..`.
pub fn normalize_rel_path(source: &str) -> ReelResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ReelError::validation("source paths must be relative"));
    }
    if s.is_empty() {
        return Err(ReelError::validation("source path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ReelError::validation("source paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ReelError::validation("source path must contain a file name"));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
