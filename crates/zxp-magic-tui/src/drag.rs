//! Drag-and-drop normalization.
//!
//! Hosts deliver drags through one of two transports. Each gets an adapter
//! that produces a [`DragSignal`]; [`DragTracker`] consumes the signals and
//! never needs to know which transport produced them.

use std::path::{Path, PathBuf};

use zxp_magic::{PackageError, validate_package_path};

/// Transport-independent drag signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragSignal {
    Hover,
    Leave,
    /// A drop. `None` when the payload holds no filesystem path.
    Drop(Option<PathBuf>),
}

/// A file entry from the structural file-object transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    /// Absent when the payload is data rather than a file reference.
    pub path: Option<PathBuf>,
}

/// Events from the structural file-object transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileObjectEvent {
    DragOver,
    /// `related_target` is set when the pointer moved onto another element
    /// inside the tracked region.
    DragLeave { related_target: bool },
    Drop { files: Vec<DroppedFile> },
}

/// Events from the OS-level path-list transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeDragEvent {
    Enter { paths: Vec<PathBuf> },
    Over,
    Leave,
    Drop { paths: Vec<PathBuf> },
}

pub fn from_file_object(event: FileObjectEvent) -> Option<DragSignal> {
    match event {
        FileObjectEvent::DragOver => Some(DragSignal::Hover),
        FileObjectEvent::DragLeave {
            related_target: true,
        } => None,
        FileObjectEvent::DragLeave {
            related_target: false,
        } => Some(DragSignal::Leave),
        FileObjectEvent::Drop { files } => Some(DragSignal::Drop(
            files.into_iter().next().and_then(|f| f.path),
        )),
    }
}

pub fn from_native(event: NativeDragEvent) -> Option<DragSignal> {
    match event {
        NativeDragEvent::Enter { .. } | NativeDragEvent::Over => Some(DragSignal::Hover),
        NativeDragEvent::Leave => Some(DragSignal::Leave),
        NativeDragEvent::Drop { paths } => Some(DragSignal::Drop(paths.into_iter().next())),
    }
}

/// What a drop resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropResolution {
    /// Nothing to do: not a drop, no file, or no filesystem path.
    Ignored,
    Rejected { path: PathBuf, error: PackageError },
    Accepted(PathBuf),
}

/// Owns the "drag active" flag and resolves drops to package paths.
#[derive(Debug, Default)]
pub struct DragTracker {
    active: bool,
}

impl DragTracker {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn apply(&mut self, signal: DragSignal) -> DropResolution {
        match signal {
            DragSignal::Hover => {
                self.active = true;
                DropResolution::Ignored
            }
            DragSignal::Leave => {
                self.active = false;
                DropResolution::Ignored
            }
            DragSignal::Drop(path) => {
                self.active = false;
                let Some(path) = path else {
                    return DropResolution::Ignored;
                };
                match validate_package_path(&path) {
                    Ok(_) => DropResolution::Accepted(path),
                    Err(error) => DropResolution::Rejected { path, error },
                }
            }
        }
    }

    /// Force-clear on teardown.
    pub fn reset(&mut self) {
        self.active = false;
    }
}

/// Terminals deliver a dropped file as pasted text. Convert that text into
/// a native drop carrying every path-like token, first one first.
pub fn native_drop_from_paste(text: &str) -> NativeDragEvent {
    NativeDragEvent::Drop {
        paths: paths_from_paste(text),
    }
}

/// Extract path-like tokens from pasted text.
///
/// Handles quoting, backslash-escaped spaces and `file://` URIs. Tokens that
/// do not look like a filesystem path are skipped, so pasting ordinary text
/// yields nothing.
pub fn paths_from_paste(text: &str) -> Vec<PathBuf> {
    text.lines()
        .flat_map(split_words)
        .filter_map(|word| {
            let word = match word.strip_prefix("file://") {
                Some(rest) => percent_decode(rest.strip_prefix("localhost").unwrap_or(rest)),
                None => word,
            };
            let path = expand_home(&word);
            looks_like_path(&path).then_some(path)
        })
        .collect()
}

fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => quote = Some(c),
            (None, '\\') => match chars.peek() {
                Some(&next) if is_escapable(next) => {
                    current.push(next);
                    chars.next();
                }
                _ => current.push('\\'),
            },
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

// Windows paths keep their separators; only shell-style escapes are undone.
fn is_escapable(c: char) -> bool {
    matches!(c, ' ' | '(' | ')' | '[' | ']' | '&' | '\'' | '"' | '\\')
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
            && let Some(byte) = std::str::from_utf8(&bytes[i + 1..i + 3])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn expand_home(word: &str) -> PathBuf {
    if let Some(rest) = word.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(rest);
    }
    PathBuf::from(word)
}

fn looks_like_path(path: &Path) -> bool {
    path.is_absolute() || path.starts_with(".") || path.starts_with("..") || has_drive_prefix(path)
}

fn has_drive_prefix(path: &Path) -> bool {
    let s = path.to_string_lossy();
    let b = s.as_bytes();
    b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && (b[2] == b'\\' || b[2] == b'/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, path: Option<&str>) -> DroppedFile {
        DroppedFile {
            name: name.to_owned(),
            path: path.map(PathBuf::from),
        }
    }

    #[test]
    fn hover_then_leave_toggles_active() {
        let mut tracker = DragTracker::default();
        tracker.apply(DragSignal::Hover);
        assert!(tracker.is_active());
        tracker.apply(DragSignal::Leave);
        assert!(!tracker.is_active());
    }

    #[test]
    fn leave_into_nested_element_is_dropped() {
        assert_eq!(
            from_file_object(FileObjectEvent::DragLeave {
                related_target: true
            }),
            None
        );
        assert_eq!(
            from_file_object(FileObjectEvent::DragLeave {
                related_target: false
            }),
            Some(DragSignal::Leave)
        );
    }

    #[test]
    fn drop_always_clears_active() {
        let mut tracker = DragTracker::default();
        tracker.apply(DragSignal::Hover);
        let resolution = tracker.apply(DragSignal::Drop(None));
        assert_eq!(resolution, DropResolution::Ignored);
        assert!(!tracker.is_active());
    }

    #[test]
    fn drop_with_invalid_suffix_is_rejected() {
        let mut tracker = DragTracker::default();
        let resolution = tracker.apply(DragSignal::Drop(Some(PathBuf::from("/tmp/readme.txt"))));
        assert!(matches!(resolution, DropResolution::Rejected { .. }));
    }

    #[test]
    fn both_transports_resolve_identically() {
        let path = "/Users/me/Downloads/panel.zxpinstall";

        let mut a = DragTracker::default();
        let via_object = from_file_object(FileObjectEvent::Drop {
            files: vec![file("panel.zxpinstall", Some(path))],
        })
        .map(|s| a.apply(s));

        let mut b = DragTracker::default();
        let via_native = from_native(NativeDragEvent::Drop {
            paths: vec![PathBuf::from(path)],
        })
        .map(|s| b.apply(s));

        assert_eq!(via_object, via_native);
        assert_eq!(via_object, Some(DropResolution::Accepted(PathBuf::from(path))));
    }

    #[test]
    fn only_first_file_is_considered() {
        let signal = from_file_object(FileObjectEvent::Drop {
            files: vec![
                file("a.txt", Some("/tmp/a.txt")),
                file("b.zxp", Some("/tmp/b.zxp")),
            ],
        });
        assert_eq!(signal, Some(DragSignal::Drop(Some(PathBuf::from("/tmp/a.txt")))));
    }

    #[test]
    fn data_payload_without_path_is_ignored() {
        let mut tracker = DragTracker::default();
        let signal = from_file_object(FileObjectEvent::Drop {
            files: vec![file("clip.txt", None)],
        })
        .unwrap();
        assert_eq!(tracker.apply(signal), DropResolution::Ignored);
    }

    #[test]
    fn empty_drop_is_ignored() {
        let mut tracker = DragTracker::default();
        let signal = from_native(NativeDragEvent::Drop { paths: vec![] }).unwrap();
        assert_eq!(tracker.apply(signal), DropResolution::Ignored);
    }

    #[test]
    fn reset_clears_active() {
        let mut tracker = DragTracker::default();
        tracker.apply(DragSignal::Hover);
        tracker.reset();
        assert!(!tracker.is_active());
    }

    #[test]
    fn paste_with_escaped_spaces() {
        let paths = paths_from_paste("/Users/me/My\\ Panels/panel.zxp ");
        assert_eq!(paths, vec![PathBuf::from("/Users/me/My Panels/panel.zxp")]);
    }

    #[test]
    fn paste_with_quotes() {
        let paths = paths_from_paste("'/tmp/with space/panel.zxp'");
        assert_eq!(paths, vec![PathBuf::from("/tmp/with space/panel.zxp")]);
    }

    #[test]
    fn paste_file_uri() {
        let paths = paths_from_paste("file:///tmp/my%20panel.zxp");
        assert_eq!(paths, vec![PathBuf::from("/tmp/my panel.zxp")]);
    }

    #[test]
    fn paste_file_uri_with_localhost() {
        let paths = paths_from_paste("file://localhost/tmp/my%20panel.zxp");
        assert_eq!(paths, vec![PathBuf::from("/tmp/my panel.zxp")]);
    }

    #[test]
    fn percent_escape_needs_two_hex_digits() {
        assert_eq!(percent_decode("/tmp/a%+1.zxp"), "/tmp/a%+1.zxp");
        assert_eq!(percent_decode("/tmp/a%2"), "/tmp/a%2");
        assert_eq!(percent_decode("/tmp/%41.zxp"), "/tmp/A.zxp");
    }

    #[test]
    fn paste_windows_path_keeps_separators() {
        let paths = paths_from_paste("\"C:\\Users\\me\\panel.zxp\"");
        assert_eq!(paths, vec![PathBuf::from("C:\\Users\\me\\panel.zxp")]);
    }

    #[test]
    fn paste_of_plain_text_yields_nothing() {
        assert!(paths_from_paste("hello world").is_empty());
    }

    #[test]
    fn paste_of_several_files_keeps_order() {
        let paths = paths_from_paste("/tmp/a.zxp /tmp/b.zxp");
        assert_eq!(
            paths,
            vec![PathBuf::from("/tmp/a.zxp"), PathBuf::from("/tmp/b.zxp")]
        );
    }
}
