//! Helpers for rendering check results.

use std::io::{self, Write};
use std::path::Path;

use spdx_tag::{Document, DocumentError, Package};

/// Write one line per error, prefixed with `path:line:`.
///
/// # Errors
/// Returns any error from `writer`.
pub fn write_errors(
    writer: &mut dyn Write,
    path: &Path,
    errors: &[DocumentError],
) -> io::Result<()> {
    for err in errors {
        writeln!(writer, "{}:{}: {err}", path.display(), err.line())?;
    }
    Ok(())
}

/// Write a summary of a successfully parsed document.
///
/// # Errors
/// Returns any error from `writer`.
pub fn write_summary(writer: &mut dyn Write, path: &Path, document: &Document) -> io::Result<()> {
    writeln!(
        writer,
        "{}: ok ({}, {} package(s), {} file(s))",
        path.display(),
        display_or(&document.spec_version, "unversioned"),
        document.packages.len(),
        document.files.len()
    )?;
    for package in &document.packages {
        write_package(writer, package)?;
    }
    Ok(())
}

fn write_package(writer: &mut dyn Write, package: &Package) -> io::Result<()> {
    let version = package.version.as_deref().unwrap_or("-");
    let declared = package
        .licence_declared
        .as_ref()
        .map_or_else(|| "NOASSERTION".to_owned(), ToString::to_string);
    write!(writer, "  {} {version}: {declared}", package.name)?;
    if let Some(code) = &package.verification_code {
        write!(
            writer,
            "; verification {} ({} excluded)",
            code.value,
            code.excluded_files.len()
        )?;
    }
    writeln!(writer)
}

fn display_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}
