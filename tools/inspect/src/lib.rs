//! Image inspector for the zerostart programs
//!
//! Answers one question about an ELF executable: does a given symbol live
//! in zero-fill storage (`SHT_NOBITS`, no bytes in the file) or in a
//! section whose contents are stored in the file?

use std::fmt;
use std::fs;
use std::path::Path;

use goblin::elf::section_header::{SectionHeader, SHT_NOBITS};
use goblin::elf::Elf;

mod error;

pub use error::InspectError;

/// Symbol the zerostart programs export for their reserved region
pub const RESERVED_REGION_SYMBOL: &str = "RESERVED_REGION";

/// How a section's contents reach memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// `SHT_NOBITS`: size only, zero-filled by the loader
    ZeroFill,
    /// Contents stored in the file
    Stored,
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionKind::ZeroFill => f.write_str("zero-fill (NOBITS)"),
            SectionKind::Stored => f.write_str("stored (PROGBITS or other)"),
        }
    }
}

/// One section header, decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionInfo {
    /// Section name
    pub name: String,
    /// Zero-fill or stored
    pub kind: SectionKind,
    /// Size in memory
    pub size: u64,
    /// Bytes the section occupies in the file
    pub file_size: u64,
}

impl SectionInfo {
    fn from_header(elf: &Elf<'_>, header: &SectionHeader) -> Self {
        let name = elf.shdr_strtab.get_at(header.sh_name).unwrap_or("").to_string();
        let kind = if header.sh_type == SHT_NOBITS {
            SectionKind::ZeroFill
        } else {
            SectionKind::Stored
        };
        let file_size = match kind {
            SectionKind::ZeroFill => 0,
            SectionKind::Stored => header.sh_size,
        };

        Self {
            name,
            kind,
            size: header.sh_size,
            file_size,
        }
    }
}

/// Where a symbol was placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolPlacement {
    /// Symbol name
    pub symbol: String,
    /// Symbol value (virtual address, before load bias)
    pub address: u64,
    /// Symbol size in bytes
    pub size: u64,
    /// Section housing the symbol
    pub section: SectionInfo,
}

impl SymbolPlacement {
    /// Whether the symbol's bytes are carried in the file image
    #[must_use]
    pub fn occupies_file_bytes(&self) -> bool {
        self.section.kind == SectionKind::Stored
    }
}

impl fmt::Display for SymbolPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {:#x}, {} bytes, section {} ({}, {} file bytes)",
            self.symbol,
            self.address,
            self.size,
            self.section.name,
            self.section.kind,
            self.section.file_size
        )
    }
}

/// Locate `name` in an ELF image held in memory
///
/// Looks in the static symbol table first, then the dynamic one.
///
/// # Errors
/// * [`InspectError::Elf`] - `bytes` is not a parsable ELF image
/// * [`InspectError::SymbolNotFound`] - no symbol of that name
/// * [`InspectError::NoSection`] - the symbol is undefined or absolute
pub fn inspect_symbol(bytes: &[u8], name: &str) -> Result<SymbolPlacement, InspectError> {
    let elf = Elf::parse(bytes)?;

    let sym = elf
        .syms
        .iter()
        .find(|sym| elf.strtab.get_at(sym.st_name) == Some(name))
        .or_else(|| {
            elf.dynsyms
                .iter()
                .find(|sym| elf.dynstrtab.get_at(sym.st_name) == Some(name))
        })
        .ok_or_else(|| InspectError::SymbolNotFound(name.to_string()))?;

    // SHN_UNDEF is 0; reserved indices (SHN_ABS, SHN_COMMON) have no header
    let header = match sym.st_shndx {
        0 => None,
        index => elf.section_headers.get(index),
    }
    .ok_or_else(|| InspectError::NoSection(name.to_string()))?;

    Ok(SymbolPlacement {
        symbol: name.to_string(),
        address: sym.st_value,
        size: sym.st_size,
        section: SectionInfo::from_header(&elf, header),
    })
}

/// Locate `name` in the ELF file at `path`
///
/// # Errors
/// [`InspectError::Io`] if the file cannot be read, otherwise as
/// [`inspect_symbol`].
pub fn inspect_file(path: impl AsRef<Path>, name: &str) -> Result<SymbolPlacement, InspectError> {
    let bytes = fs::read(path)?;
    inspect_symbol(&bytes, name)
}

/// Every zero-fill section of an ELF image
///
/// # Errors
/// [`InspectError::Elf`] if `bytes` is not a parsable ELF image.
pub fn zero_fill_sections(bytes: &[u8]) -> Result<Vec<SectionInfo>, InspectError> {
    let elf = Elf::parse(bytes)?;
    Ok(elf
        .section_headers
        .iter()
        .map(|header| SectionInfo::from_header(&elf, header))
        .filter(|section| section.kind == SectionKind::ZeroFill)
        .collect())
}
