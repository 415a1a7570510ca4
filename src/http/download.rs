use std::path::{Path, PathBuf};

use crate::error::FetchError;

pub const DEFAULT_SONG_FILE_NAME: &str = "quickmp3-song.mp3";

/// Name for a downloaded render: the server's file name, else the last
/// segment of the song URL, else a fixed default.
pub fn song_file_name(song_url: &str, server_file_name: Option<&str>) -> String {
    let from_server = server_file_name.and_then(sanitize);
    if let Some(name) = from_server {
        return name;
    }

    let path = song_url
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    path.rsplit('/')
        .next()
        .and_then(sanitize)
        .unwrap_or_else(|| DEFAULT_SONG_FILE_NAME.to_string())
}

fn sanitize(name: &str) -> Option<String> {
    let name = Path::new(name.trim()).file_name()?.to_string_lossy().into_owned();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name)
    }
}

/// `dir/name`, or `dir/stem (n).ext` for the first `n` that is free.
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let as_path = Path::new(name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let ext = as_path.extension().map(|e| e.to_string_lossy().into_owned());

    (1..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

pub async fn save_render(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, FetchError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = unique_path(dir, name);
    tokio::fs::write(&path, bytes).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_server_file_name() {
        assert_eq!(
            song_file_name("http://localhost:8000/media/a.mp3", Some("song_1.mp3")),
            "song_1.mp3"
        );
    }

    #[test]
    fn falls_back_to_url_segment_then_default() {
        assert_eq!(
            song_file_name("http://localhost:8000/media/abc.mp3?dl=1", None),
            "abc.mp3"
        );
        assert_eq!(song_file_name("http://localhost:8000/", None), DEFAULT_SONG_FILE_NAME);
    }

    #[test]
    fn server_names_cannot_escape_the_download_dir() {
        assert_eq!(
            song_file_name("http://x/media/a.mp3", Some("../../etc/passwd")),
            "passwd"
        );
        assert_eq!(song_file_name("http://x/media/a.mp3", Some("..")), "a.mp3");
    }

    #[tokio::test]
    async fn never_overwrites_existing_downloads() {
        let dir = tempfile::tempdir().unwrap();

        let first = save_render(dir.path(), "song.mp3", b"one").await.unwrap();
        let second = save_render(dir.path(), "song.mp3", b"two").await.unwrap();

        assert_eq!(first, dir.path().join("song.mp3"));
        assert_eq!(second, dir.path().join("song (1).mp3"));
        assert_eq!(std::fs::read(first).unwrap(), b"one");
        assert_eq!(std::fs::read(second).unwrap(), b"two");
    }
}
