//! Builders for the external transcode and tag command strings.
//!
//! Both builders are pure: they read one [`Entry`] and produce the shell
//! command string the process runner will hand to `sh -c`.

use crate::entry::Entry;
use ripforged_av::{escape, quote, TAGGER, TRANSCODER};
use std::path::Path;

/// Build the full transcode invocation for one entry.
///
/// Flag groups for audio and subtitles are omitted entirely when the entry
/// configures none of either.
pub fn transcode_command(entry: &Entry) -> String {
    let mut parts = vec![TRANSCODER.to_string()];
    parts.extend(video_flags(entry));
    parts.extend(audio_flags(entry));
    parts.extend(subtitle_flags(entry));
    parts.push(quote(&entry.source().to_string_lossy()));
    parts.join(" ")
}

/// Build the metadata-tag invocation setting `title` on `target`.
pub fn tag_command(target: &Path, title: &str) -> String {
    format!(
        "{} {} --set title=\"{}\"",
        TAGGER,
        quote(&target.to_string_lossy()),
        escape(title)
    )
}

fn video_flags(entry: &Entry) -> Vec<String> {
    let mut flags = Vec::new();
    if entry.mp4() {
        flags.push("--mp4".to_string());
    }
    flags
}

fn audio_flags(entry: &Entry) -> Vec<String> {
    if entry.audio().is_empty() {
        return Vec::new();
    }

    let mut flags: Vec<String> = entry
        .audio()
        .iter()
        .enumerate()
        .map(|(i, track)| format!("--add-audio {}", track.track.unwrap_or(i as u32 + 1)))
        .collect();

    // The aggregate name flag is emitted whenever any track is configured;
    // unnamed tracks fall back to their positional name.
    let names = entry
        .audio()
        .iter()
        .enumerate()
        .map(|(i, track)| match &track.title {
            Some(title) => quote(title),
            None => quote(&format!("Track {}", i + 1)),
        })
        .collect::<Vec<_>>()
        .join(",");
    flags.push(format!("-x aname={}", names));

    flags
}

// Subtitle options are passed through to the transcoder's underlying
// HandBrake invocation.
fn subtitle_flags(entry: &Entry) -> Vec<String> {
    if entry.subtitles().is_empty() {
        return Vec::new();
    }

    let source_dir = entry.source().parent().unwrap_or_else(|| Path::new(""));

    let files = entry
        .subtitles()
        .keys()
        .map(|name| quote(&source_dir.join(name).to_string_lossy()))
        .collect::<Vec<_>>()
        .join(",");
    let langs = entry
        .subtitles()
        .values()
        .map(|sub| sub.language.as_deref().unwrap_or("eng"))
        .collect::<Vec<_>>()
        .join(",");
    let encodings = entry
        .subtitles()
        .values()
        .map(|sub| sub.encoding.as_deref().unwrap_or("utf8"))
        .collect::<Vec<_>>()
        .join(",");

    vec![
        format!("-x srt-file={}", files),
        format!("-x srt-lang={}", langs),
        format!("-x srt-codeset={}", encodings),
    ]
}
