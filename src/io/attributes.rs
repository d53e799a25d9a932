// Raw filesystem attributes of one entry and the text report built from them.

use crate::entry::{path_name, FileEntry};
use crate::error::{FileSpyError, ReadFailure, Result};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::SystemTime;

#[cfg(unix)]
use std::os::unix::fs::{FileTypeExt, MetadataExt};

/// Composite key for extended attributes; never part of a report.
pub const EXTENDED_ATTRIBUTES_KEY: &str = "ExtendedAttributes";

#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Text(String),
    Number(u64),
    Bytes(u64),
    Flag(bool),
    Time(SystemTime),
    Mode(u32),
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(s) => write!(f, "{}", s),
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Bytes(n) => write!(f, "{} ({})", n, bytesize::ByteSize(*n)),
            AttrValue::Flag(b) => write!(f, "{}", if *b { "YES" } else { "NO" }),
            AttrValue::Time(t) => {
                let datetime: DateTime<Local> = (*t).into();
                write!(f, "{}", datetime.format("%Y-%m-%d %H:%M:%S %z"))
            }
            AttrValue::Mode(mode) => write!(f, "{:04o} ({})", mode & 0o7777, rwx_string(*mode)),
        }
    }
}

pub type Attributes = BTreeMap<String, AttrValue>;

/// Reads the metadata of `path` itself; symbolic links are not followed.
pub fn read_attributes(path: &Path) -> Result<Attributes> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FileSpyError::AttributesUnreadable {
        path: path.to_path_buf(),
        kind: ReadFailure::from(&e),
    })?;

    let mut attrs = Attributes::new();
    let file_type = metadata.file_type();
    attrs.insert("Type".into(), AttrValue::Text(type_name(&file_type).into()));
    attrs.insert("Size".into(), AttrValue::Bytes(metadata.len()));
    attrs.insert(
        "ReadOnly".into(),
        AttrValue::Flag(metadata.permissions().readonly()),
    );

    if let Ok(t) = metadata.modified() {
        attrs.insert("Modified".into(), AttrValue::Time(t));
    }
    if let Ok(t) = metadata.accessed() {
        attrs.insert("Accessed".into(), AttrValue::Time(t));
    }
    if let Ok(t) = metadata.created() {
        attrs.insert("Created".into(), AttrValue::Time(t));
    }

    #[cfg(unix)]
    {
        attrs.insert("Permissions".into(), AttrValue::Mode(metadata.mode()));
        attrs.insert("OwnerAccountID".into(), AttrValue::Number(metadata.uid() as u64));
        attrs.insert(
            "GroupOwnerAccountID".into(),
            AttrValue::Number(metadata.gid() as u64),
        );
        attrs.insert("ReferenceCount".into(), AttrValue::Number(metadata.nlink()));
        attrs.insert("SystemNumber".into(), AttrValue::Number(metadata.dev()));
        attrs.insert("SystemFileNumber".into(), AttrValue::Number(metadata.ino()));
    }

    if file_type.is_symlink() {
        if let Ok(target) = fs::read_link(path) {
            attrs.insert(
                "SymbolicLinkTarget".into(),
                AttrValue::Text(target.display().to_string()),
            );
        }
    }

    Ok(attrs)
}

fn type_name(file_type: &fs::FileType) -> &'static str {
    if file_type.is_dir() {
        return "Directory";
    }
    if file_type.is_symlink() {
        return "SymbolicLink";
    }
    if file_type.is_file() {
        return "Regular";
    }
    #[cfg(unix)]
    {
        if file_type.is_block_device() {
            return "BlockSpecial";
        }
        if file_type.is_char_device() {
            return "CharacterSpecial";
        }
        if file_type.is_fifo() {
            return "Fifo";
        }
        if file_type.is_socket() {
            return "Socket";
        }
    }
    "Unknown"
}

fn rwx_string(mode: u32) -> String {
    [(mode >> 6) & 0o7, (mode >> 3) & 0o7, mode & 0o7]
        .iter()
        .map(|bits| format_perms(*bits))
        .collect()
}

fn format_perms(mode: u32) -> String {
    let r = if mode & 0o4 != 0 { "r" } else { "-" };
    let w = if mode & 0o2 != 0 { "w" } else { "-" };
    let x = if mode & 0o1 != 0 { "x" } else { "-" };
    format!("{}{}{}", r, w, x)
}

/// Text shown when nothing can be read about `path`.
pub fn no_information(path: &Path) -> String {
    format!("No information available for {}", path.display())
}

/// Name and path header, a blank line, then one `key:\tvalue` line per attribute.
pub fn format_report(path: &Path, attrs: &Attributes) -> String {
    let mut report = format!("{}\n{}\n\n", path_name(path), path.display());
    for (key, value) in attrs {
        if key == EXTENDED_ATTRIBUTES_KEY {
            continue;
        }
        report.push_str(&format!("{}:\t{}\n", key, value));
    }
    report
}

pub fn describe_path(path: &Path) -> String {
    match read_attributes(path) {
        Ok(attrs) => format_report(path, &attrs),
        Err(e) => {
            log::debug!("{}", e);
            no_information(path)
        }
    }
}

/// Multi-line attribute report for the detail panel and exports. Never fails.
pub fn describe(entry: &FileEntry) -> String {
    describe_path(&entry.path)
}
