//! The core `Importer` struct: one pass over a delimited journal export,
//! one Markdown document written per dated row.
use crate::paths::{self, entry_file};
use crate::sniff::sniff_delimiter;
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, StringRecord};
use std::fs::{self, File};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// How much of the file the delimiter sniffer gets to see.
const SNIFF_SAMPLE_LEN: usize = 1024;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Required logical columns, matched against trimmed header names.
const DATE_COLUMN: &str = "full_date";
const NOTE_COLUMN: &str = "note";

/// The central struct for an import run.
///
/// An instance holds the resolved target directory and writes one document
/// per qualifying input row into it.
#[derive(Debug)]
pub struct Importer {
    pub entries_dir: PathBuf,
}

/// What one run did: the column names the input declared, and how many
/// documents were written for the first time versus overwritten.
#[derive(Debug)]
pub struct ImportReport {
    pub columns: Vec<String>,
    pub created: usize,
    pub updated: usize,
}

/// The header row resolved into lookups for the two required columns.
#[derive(Debug)]
struct Columns {
    names: Vec<String>,
    full_date: usize,
    note: usize,
}

impl Columns {
    /// Trims each header and locates `full_date` and `note` by exact,
    /// case-sensitive match. Spreadsheet exports sometimes pad header
    /// names, so matching runs on the trimmed form.
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let names: Vec<String> = headers.iter().map(|h| h.trim().to_string()).collect();
        let full_date = names.iter().position(|n| n == DATE_COLUMN);
        let note = names.iter().position(|n| n == NOTE_COLUMN);
        match (full_date, note) {
            (Some(full_date), Some(note)) => Ok(Self {
                names,
                full_date,
                note,
            }),
            _ => bail!(
                "input must contain '{DATE_COLUMN}' and '{NOTE_COLUMN}' columns (found: {})",
                names.join(", ")
            ),
        }
    }
}

impl Importer {
    /// Creates an importer targeting the default entries directory.
    pub fn new() -> Result<Self> {
        Self::with_dir(paths::entries_dir()?)
    }

    /// Creates an importer targeting a specific directory.
    ///
    /// This also ensures the directory exists; existing contents are left
    /// alone.
    pub fn with_dir(entries_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&entries_dir)
            .with_context(|| format!("creating {}", entries_dir.display()))?;
        Ok(Self { entries_dir })
    }

    /// Runs one full import of the file at `input`.
    ///
    /// - Sniffs the field delimiter from a bounded prefix, then parses the
    ///   whole file from the start (tolerating a UTF-8 byte-order mark).
    /// - Requires `full_date` and `note` columns in the header; fails
    ///   before writing anything when either is missing.
    /// - Writes each row's raw note as the full content of
    ///   `<entries_dir>/<full_date>.md`, overwriting prior content. Rows
    ///   with an empty trimmed date are skipped.
    ///
    /// Returns the run's [`ImportReport`]. On error, documents written
    /// before the failure stay on disk.
    pub fn import(&self, input: &Path) -> Result<ImportReport> {
        if !input.is_file() {
            bail!("file '{}' not found", input.display());
        }

        let mut file =
            File::open(input).with_context(|| format!("opening {}", input.display()))?;
        let mut sample = [0u8; SNIFF_SAMPLE_LEN];
        let len = read_sample(&mut file, &mut sample)
            .with_context(|| format!("sampling {}", input.display()))?;
        let sample = &sample[..len];
        let delimiter = sniff_delimiter(sample.strip_prefix(UTF8_BOM).unwrap_or(sample));

        file.seek(SeekFrom::Start(0))
            .with_context(|| format!("rewinding {}", input.display()))?;
        skip_bom(&mut file).with_context(|| format!("reading {}", input.display()))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(file);

        let headers = reader
            .headers()
            .with_context(|| format!("reading the header row of {}", input.display()))?;
        let columns = Columns::resolve(headers)?;

        let mut created = 0;
        let mut updated = 0;
        for record in reader.records() {
            let record = record.with_context(|| format!("reading {}", input.display()))?;
            let date = record.get(columns.full_date).unwrap_or("").trim();
            if date.is_empty() {
                continue;
            }
            // Short rows may lack the note cell entirely.
            let note = record.get(columns.note).unwrap_or("");

            let path = entry_file(&self.entries_dir, date);
            let existed = path.exists();
            fs::write(&path, note).with_context(|| format!("writing {}", path.display()))?;
            if existed {
                updated += 1;
            } else {
                created += 1;
            }
        }

        Ok(ImportReport {
            columns: columns.names,
            created,
            updated,
        })
    }
}

/// Fills `buf` from the start of `file`, stopping early at end of file.
/// Returns how many bytes were read.
fn read_sample(file: &mut File, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}

/// Leaves the read position just past a leading UTF-8 byte-order mark, or
/// back at the start when there is none.
fn skip_bom(file: &mut File) -> io::Result<()> {
    let mut prefix = [0u8; 3];
    let len = read_sample(file, &mut prefix)?;
    if &prefix[..len] != UTF8_BOM {
        file.seek(SeekFrom::Start(0))?;
    }
    Ok(())
}
