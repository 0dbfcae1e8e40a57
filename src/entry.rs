//! Resolved batch entries and the library-layout naming rules.

use crate::config::{self, AudioTrack, EntryKind, EntryOptions, SubtitleOptions};
use anyhow::{Context, Result};
use ripforged_av::escape;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the directory all transcoded output lands in.
pub const OUTPUT_DIRNAME: &str = "output";

/// Position of an entry in the two-level feature/extra hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    /// A top-level entry. `has_extras` decides between the flat layout and a
    /// per-title subfolder.
    Feature { has_extras: bool },
    /// An extra owned by the feature with the given title.
    Extra { feature_title: String },
}

/// One resolved entry: a feature film or one of its extras.
///
/// Constructed only for source files that exist on disk; the title is fixed
/// at construction and the output name is a pure function of title, edition,
/// and container choice.
#[derive(Debug, Clone)]
pub struct Entry {
    source: PathBuf,
    title: String,
    edition: Option<String>,
    kind: EntryKind,
    mp4: bool,
    audio: Vec<AudioTrack>,
    subtitles: BTreeMap<String, SubtitleOptions>,
    role: Role,
}

/// Parse the batch file at `config_path` and materialize every entry whose
/// source file exists.
///
/// Returns the flattened list in declaration order: each feature immediately
/// followed by its extras. Source paths (top-level keys and extras keys)
/// resolve against the config file's directory. Entries pointing at missing
/// files are dropped silently.
pub fn resolve_all(config_path: &Path) -> Result<Vec<Entry>> {
    let batch = config::load_config(config_path)?;
    let base = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().context("Failed to determine working directory")?,
    };

    let mut entries = Vec::new();

    for (rel, mut opts) in batch.0 {
        let source = base.join(&rel);
        tracing::debug!(source = %source.display(), "considering source file");
        if !source.exists() {
            tracing::debug!(source = %source.display(), "source file missing, dropping entry");
            continue;
        }

        let feature_title = title_for(&opts, &source);

        // Materialize extras first: whether any survive decides the
        // feature's layout.
        let declared = std::mem::take(&mut opts.extras);
        let mut extras = Vec::with_capacity(declared.len());
        for (extra_rel, extra_opts) in declared {
            let extra_source = base.join(&extra_rel);
            if !extra_source.exists() {
                tracing::debug!(source = %extra_source.display(), "extra source missing, dropping entry");
                continue;
            }
            extras.push(Entry::from_options(
                extra_source,
                extra_opts,
                Role::Extra {
                    feature_title: feature_title.clone(),
                },
            ));
        }

        let role = Role::Feature {
            has_extras: !extras.is_empty(),
        };
        entries.push(Entry::from_options(source, opts, role));
        entries.append(&mut extras);
    }

    Ok(entries)
}

fn title_for(opts: &EntryOptions, source: &Path) -> String {
    opts.title.clone().unwrap_or_else(|| {
        source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    })
}

impl Entry {
    pub(crate) fn from_options(source: PathBuf, opts: EntryOptions, role: Role) -> Self {
        let title = title_for(&opts, &source);
        let kind = opts.kind.unwrap_or(match role {
            Role::Feature { .. } => EntryKind::Feature,
            Role::Extra { .. } => EntryKind::Other,
        });

        Self {
            source,
            title,
            edition: opts.edition,
            kind,
            mp4: opts.mp4,
            audio: opts.audio,
            subtitles: opts.subtitles,
            role,
        }
    }

    /// Absolute path to the source media file.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn mp4(&self) -> bool {
        self.mp4
    }

    pub fn audio(&self) -> &[AudioTrack] {
        &self.audio
    }

    pub fn subtitles(&self) -> &BTreeMap<String, SubtitleOptions> {
        &self.subtitles
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn is_extra(&self) -> bool {
        matches!(self.role, Role::Extra { .. })
    }

    /// Directory this entry's transcoded file belongs in, under `base`.
    ///
    /// A lone feature lands directly in `output/`; a feature with extras gets
    /// its own `output/<title>/` folder so the family of files can coexist,
    /// and each extra nests one level further into its category subfolder.
    pub fn output_directory(&self, base: &Path) -> PathBuf {
        let out = base.join(OUTPUT_DIRNAME);
        match &self.role {
            Role::Feature { has_extras: false } => out,
            Role::Feature { has_extras: true } => out.join(&self.title),
            Role::Extra { feature_title } => out
                .join(feature_title)
                .join(self.kind.category_folder()),
        }
    }

    /// Final filename: title, optional edition tag, container extension.
    pub fn output_filename(&self) -> String {
        let ext = self.container_extension();
        match &self.edition {
            Some(edition) => format!("{} {{edition-\"{}\"}}.{}", self.title, escape(edition), ext),
            None => format!("{}.{}", self.title, ext),
        }
    }

    /// Full output path under `base`.
    pub fn output_path(&self, base: &Path) -> PathBuf {
        self.output_directory(base).join(self.output_filename())
    }

    /// Name the external transcoder gives its product: the source file's stem
    /// plus the container extension implied by the flags.
    pub fn expected_product_filename(&self) -> String {
        let stem = self
            .source
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{}.{}", stem, self.container_extension())
    }

    /// Title used for metadata tagging; extras carry their feature's name.
    pub fn display_title(&self) -> String {
        match &self.role {
            Role::Extra { feature_title } => format!("{} - {}", feature_title, self.title),
            Role::Feature { .. } => self.title.clone(),
        }
    }

    fn container_extension(&self) -> &'static str {
        if self.mp4 {
            "mp4"
        } else {
            "mkv"
        }
    }
}
