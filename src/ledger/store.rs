//! Persistent cross-run brick inventory
//!
//! The ledger maps color codes to cumulative brick counts. It only ever grows:
//! each finalized image adds its counts. Stores hide where the ledger lives so
//! the pipeline can run against a file or an in-memory ledger alike.

use crate::io::error::{MosaicError, Result, file_system_error};
use crate::ledger::histogram::ColorCounts;
use crate::palette::ColorCode;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

const HEADER: &str = "code,quantity";

/// Cumulative brick count per color code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    totals: BTreeMap<ColorCode, u64>,
}

impl Ledger {
    /// Ledger with the given codes at zero
    pub fn with_codes(codes: impl IntoIterator<Item = ColorCode>) -> Self {
        Self {
            totals: codes.into_iter().map(|code| (code, 0)).collect(),
        }
    }

    /// Running total of a code
    pub fn get(&self, code: ColorCode) -> u64 {
        self.totals.get(&code).copied().unwrap_or(0)
    }

    /// Add to the running total of a code
    pub fn add(&mut self, code: ColorCode, quantity: u64) {
        let total = self.totals.entry(code).or_insert(0);
        *total = total.saturating_add(quantity);
    }

    /// Add every positive count of an image
    pub fn merge(&mut self, counts: &ColorCounts) {
        for (code, count) in counts.present() {
            self.add(code, count);
        }
    }

    /// Codes and totals in code order
    pub fn iter(&self) -> impl Iterator<Item = (ColorCode, u64)> + '_ {
        self.totals.iter().map(|(&code, &total)| (code, total))
    }

    /// Parse the `code,quantity` table
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::MalformedTable`] for rows that are not a single
    /// character code followed by a non-negative integer, and for a code listed
    /// more than once
    pub fn parse(text: &str, source: &Path) -> Result<Self> {
        let malformed = |line: usize, reason: String| MosaicError::MalformedTable {
            path: source.to_path_buf(),
            line,
            reason,
        };

        let mut ledger = Self::default();
        let mut seen = BTreeSet::new();
        for (number, raw) in (1..).zip(text.lines()) {
            let line = raw.trim();
            if line.is_empty() || (number == 1 && line.eq_ignore_ascii_case(HEADER)) {
                continue;
            }

            let (code, quantity) = line
                .split_once(',')
                .ok_or_else(|| malformed(number, format!("expected '{HEADER}', found '{line}'")))?;

            let mut chars = code.trim().chars();
            let (Some(code), None) = (chars.next(), chars.next()) else {
                return Err(malformed(number, format!("'{code}' is not a single-letter code")));
            };
            // Older ledgers were written with float quantities
            let quantity = quantity.trim();
            let quantity = quantity
                .parse::<u64>()
                .or_else(|_| {
                    quantity
                        .parse::<f64>()
                        .ok()
                        .filter(|value| value.is_finite() && *value >= 0.0)
                        .map(|value| value as u64)
                        .ok_or(())
                })
                .map_err(|()| malformed(number, format!("'{quantity}' is not a quantity")))?;

            if !seen.insert(code) {
                return Err(malformed(number, format!("duplicate code '{code}'")));
            }
            ledger.add(code, quantity);
        }
        Ok(ledger)
    }

    /// Render as a `code,quantity` table
    pub fn to_table(&self) -> String {
        let mut table = String::from(HEADER);
        table.push('\n');
        for (code, total) in self.iter() {
            table.push_str(&format!("{code},{total}\n"));
        }
        table
    }
}

/// Where the ledger is kept
pub trait LedgerStore {
    /// Read the current ledger, creating an empty one if none exists yet
    ///
    /// # Errors
    ///
    /// Returns an error if the stored ledger cannot be read or parsed
    fn load(&mut self) -> Result<Ledger>;

    /// Replace the stored ledger
    ///
    /// # Errors
    ///
    /// Returns an error if the ledger cannot be written
    fn save(&mut self, ledger: &Ledger) -> Result<()>;

    /// Add an image's counts in one read-modify-write cycle
    ///
    /// # Errors
    ///
    /// Returns an error if loading or saving fails
    fn merge(&mut self, counts: &ColorCounts) -> Result<Ledger> {
        let mut ledger = self.load()?;
        ledger.merge(counts);
        self.save(&ledger)?;
        tracing::debug!(bricks = counts.total(), "Ledger updated");
        Ok(ledger)
    }
}

/// Ledger held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryLedgerStore {
    ledger: Ledger,
}

impl MemoryLedgerStore {
    /// Store starting from an existing ledger
    pub const fn new(ledger: Ledger) -> Self {
        Self { ledger }
    }

    /// Current contents
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&mut self) -> Result<Ledger> {
        Ok(self.ledger.clone())
    }

    fn save(&mut self, ledger: &Ledger) -> Result<()> {
        self.ledger = ledger.clone();
        Ok(())
    }
}

/// Ledger kept in a `code,quantity` file
///
/// Merges hold an exclusive lock file next to the ledger so concurrent runs
/// cannot interleave their read-modify-write cycles. Saves go through a
/// temporary file and a rename.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    path: PathBuf,
    seed_codes: Vec<ColorCode>,
}

impl FileLedgerStore {
    /// Store backed by `path`; a missing file starts as `seed_codes` at zero
    pub fn new(path: impl Into<PathBuf>, seed_codes: impl IntoIterator<Item = ColorCode>) -> Self {
        Self {
            path: path.into(),
            seed_codes: seed_codes.into_iter().collect(),
        }
    }

    /// Ledger file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(extension);
        self.path.with_file_name(name)
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&mut self) -> Result<Ledger> {
        if !self.path.exists() {
            let ledger = Ledger::with_codes(self.seed_codes.iter().copied());
            self.save(&ledger)?;
            return Ok(ledger);
        }
        let text = fs::read_to_string(&self.path)
            .map_err(|e| file_system_error(&self.path, "read ledger", e))?;
        Ledger::parse(&text, &self.path)
    }

    fn save(&mut self, ledger: &Ledger) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }
        let temporary = self.sibling(".tmp");
        fs::write(&temporary, ledger.to_table())
            .map_err(|e| file_system_error(&temporary, "write ledger", e))?;
        fs::rename(&temporary, &self.path)
            .map_err(|e| file_system_error(&self.path, "replace ledger", e))
    }

    fn merge(&mut self, counts: &ColorCounts) -> Result<Ledger> {
        let _lock = LedgerLock::acquire(self.sibling(".lock"))?;
        let mut ledger = self.load()?;
        ledger.merge(counts);
        self.save(&ledger)?;
        tracing::debug!(
            path = %self.path.display(),
            bricks = counts.total(),
            "Ledger updated"
        );
        Ok(ledger)
    }
}

// Exclusive lock released on drop
struct LedgerLock {
    path: PathBuf,
}

impl LedgerLock {
    fn acquire(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| file_system_error(parent, "create directory", e))?;
        }
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                Err(MosaicError::LedgerLocked { path })
            }
            Err(e) => Err(file_system_error(&path, "lock ledger", e)),
        }
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
