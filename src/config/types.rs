use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

/// Parsed batch file: the top-level mapping from relative source path to
/// options, kept in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchFile(#[serde(deserialize_with = "ordered_map")] pub Vec<(String, EntryOptions)>);

/// Options record for one configured entry (a feature or an extra).
///
/// Every field is optional in the source; unknown fields are tolerated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryOptions {
    /// Display title; defaults to the source file's stem.
    #[serde(default)]
    pub title: Option<String>,

    /// Edition tag appended to the output filename.
    #[serde(default)]
    pub edition: Option<String>,

    /// Entry category; only meaningful on extras.
    #[serde(default, rename = "type")]
    pub kind: Option<EntryKind>,

    /// Emit an MP4 container instead of MKV.
    #[serde(default)]
    pub mp4: bool,

    /// Audio tracks to carry over, in order.
    #[serde(default)]
    pub audio: Vec<AudioTrack>,

    /// Sidecar subtitle files, keyed by filename relative to the source's directory.
    #[serde(default)]
    pub subtitles: BTreeMap<String, SubtitleOptions>,

    /// Extras attached to this feature, in declaration order. One level only:
    /// an `extras` key on an extra is ignored.
    #[serde(default, deserialize_with = "ordered_map")]
    pub extras: Vec<(String, EntryOptions)>,
}

/// One audio track selection passed to the transcoder.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudioTrack {
    /// 1-based track index; defaults to the track's position in the list.
    #[serde(default)]
    pub track: Option<u32>,

    /// Display name for the track; defaults to "Track N".
    #[serde(default)]
    pub title: Option<String>,
}

/// Options for one sidecar subtitle file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtitleOptions {
    /// ISO language code; defaults to "eng".
    #[serde(default, alias = "lang")]
    pub language: Option<String>,

    /// Character encoding; defaults to "utf8".
    #[serde(default)]
    pub encoding: Option<String>,
}

/// Category of a configured entry.
///
/// Unrecognized values fall back to `Other` rather than failing the parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum EntryKind {
    Feature,
    Bts,
    Deleted,
    Featurette,
    Interview,
    Trailer,
    #[default]
    Other,
}

impl From<String> for EntryKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "feature" => EntryKind::Feature,
            "bts" => EntryKind::Bts,
            "deleted" => EntryKind::Deleted,
            "featurette" => EntryKind::Featurette,
            "interview" => EntryKind::Interview,
            "trailer" => EntryKind::Trailer,
            _ => EntryKind::Other,
        }
    }
}

impl EntryKind {
    /// Library subfolder extras of this kind land in.
    pub fn category_folder(self) -> &'static str {
        match self {
            EntryKind::Bts => "Behind The Scenes",
            EntryKind::Deleted => "Deleted Scenes",
            EntryKind::Featurette => "Featurettes",
            EntryKind::Interview => "Interviews",
            EntryKind::Trailer => "Trailers",
            EntryKind::Feature | EntryKind::Other => "Other",
        }
    }
}

/// Deserialize a mapping into a `Vec` of pairs, preserving declaration order.
///
/// Serde's map collections are either unordered or sorted; the batch file's
/// top-level and `extras` mappings are processed in the order the user wrote
/// them, so they go through this visitor instead. A null value (a bare
/// `movie.mkv:` line, or an empty `extras:` key) reads as all-defaults.
fn ordered_map<'de, D, V>(deserializer: D) -> Result<Vec<(String, V)>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de> + Default,
{
    struct MapVisitor<V>(PhantomData<V>);

    impl<'de, V: Deserialize<'de> + Default> serde::de::Visitor<'de> for MapVisitor<V> {
        type Value = Vec<(String, V)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a mapping of source paths to entry options")
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: serde::de::MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, Option<V>>()? {
                entries.push((key, value.unwrap_or_default()));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(MapVisitor(PhantomData))
}
