use anyhow::{Context, Result};
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::SubtitleError;

// @module: File and directory utilities

// @const: Start of an SRT block (sequence number line followed by a timing line)
static SRT_BLOCK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\d+\s*\r?\n\d{2,}:\d{2}:\d{2},\d{3}\s+-->\s+\d{2,}:\d{2}:\d{2},\d{3}")
        .expect("SRT block regex is valid")
});

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    /// Resolve an encoding label such as "UTF-8" or "windows-1252"
    pub fn resolve_encoding(label: &str) -> Result<&'static Encoding, SubtitleError> {
        Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| SubtitleError::UnsupportedEncoding(label.to_string()))
    }

    /// Read a whole file, decoding it with the given encoding label
    pub fn read_with_encoding<P: AsRef<Path>>(path: P, encoding: &str) -> Result<String, SubtitleError> {
        let path = path.as_ref();
        let encoding = Self::resolve_encoding(encoding)?;

        let bytes = fs::read(path).map_err(|e| SubtitleError::io(path, e))?;

        let (text, used, had_errors) = encoding.decode(&bytes);
        if had_errors {
            log::warn!(
                "{} contains bytes that are not valid {}; they were replaced",
                path.display(),
                used.name()
            );
        }

        Ok(text.into_owned())
    }

    /// Write a whole file, encoding it with the given encoding label
    pub fn write_with_encoding<P: AsRef<Path>>(path: P, content: &str, encoding: &str) -> Result<(), SubtitleError> {
        let path = path.as_ref();
        let encoding = Self::resolve_encoding(encoding)?;

        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent).map_err(|e| SubtitleError::io(parent, e))?;
        }

        let bytes = Self::encode_content(content, encoding);
        fs::write(path, &bytes).map_err(|e| SubtitleError::io(path, e))
    }

    // encoding_rs only encodes to ASCII-compatible targets and maps UTF-16 to UTF-8,
    // so UTF-16 code units are serialized here.
    fn encode_content(content: &str, encoding: &'static Encoding) -> Vec<u8> {
        if encoding == encoding_rs::UTF_16LE {
            return content.encode_utf16().flat_map(u16::to_le_bytes).collect();
        }
        if encoding == encoding_rs::UTF_16BE {
            return content.encode_utf16().flat_map(u16::to_be_bytes).collect();
        }

        let (bytes, used, had_errors) = encoding.encode(content);
        if had_errors {
            log::warn!(
                "Some characters cannot be represented in {} and were written as numeric references",
                used.name()
            );
        }
        bytes.into_owned()
    }

    /// Find files with a specific extension in a directory
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let normalized_ext = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(normalized_ext) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        Ok(result)
    }

    // @generates: Output path for a shifted subtitle
    // @params: input_file, suffix
    //
    // "movie.srt" with suffix "shifted" becomes "movie.shifted.srt" next to the input.
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();

        let stem = input_file.file_stem().unwrap_or_default();
        let extension = input_file
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "srt".to_string());

        let mut output_filename = stem.to_string_lossy().to_string();
        if !suffix.is_empty() {
            output_filename.push('.');
            output_filename.push_str(suffix);
        }
        output_filename.push('.');
        output_filename.push_str(&extension);

        input_file.with_file_name(output_filename)
    }

    /// Detect if a file is a subtitle file (SRT)
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> Result<FileType> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(anyhow::anyhow!("File does not exist: {:?}", path));
        }

        if let Some(ext) = path.extension() {
            if ext.to_string_lossy().eq_ignore_ascii_case("srt") {
                return Ok(FileType::Subtitle);
            }
        }

        // Fall back to examining file contents
        if let Ok(bytes) = fs::read(path) {
            let content = String::from_utf8_lossy(&bytes);
            if content.contains("-->") && SRT_BLOCK_REGEX.is_match(&content) {
                return Ok(FileType::Subtitle);
            }
        }

        Ok(FileType::Unknown)
    }
}

/// Enum representing different file types
#[derive(Debug, PartialEq, Eq)]
pub enum FileType {
    /// Subtitle file (SRT)
    Subtitle,
    /// Unknown file type
    Unknown,
}
