//! In-memory records populated from tag-value documents.

use crate::expression::LicenceTree;
use crate::field::{Checksum, FieldEntry, FieldSetter, Record, VerificationCode};

/// A parsed tag-value document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// `SPDXVersion`.
    pub spec_version: String,
    /// `DataLicense`.
    pub data_licence: String,
    /// `DocumentComment`.
    pub comment: Option<String>,
    /// Creator metadata.
    pub creation_info: CreationInfo,
    /// Packages in the order their `PackageName` tags appear.
    pub packages: Vec<Package>,
    /// Files in the order their `FileName` tags appear.
    pub files: Vec<File>,
}

impl Record for Document {
    const FIELDS: &'static [FieldEntry<Self>] = &[
        ("SPDXVersion", |d| FieldSetter::Text(&mut d.spec_version)),
        ("DataLicense", |d| FieldSetter::Text(&mut d.data_licence)),
        ("DocumentComment", |d| FieldSetter::OptionalText(&mut d.comment)),
    ];
}

/// Who created a document and when.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationInfo {
    /// `Creator`, repeated.
    pub creators: Vec<String>,
    /// `Created`.
    pub created: String,
    /// `CreatorComment`.
    pub comment: Option<String>,
}

impl Record for CreationInfo {
    const FIELDS: &'static [FieldEntry<Self>] = &[
        ("Creator", |c| FieldSetter::TextList(&mut c.creators)),
        ("Created", |c| FieldSetter::Text(&mut c.created)),
        ("CreatorComment", |c| FieldSetter::OptionalText(&mut c.comment)),
    ];
}

/// A package record, opened by `PackageName`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Package {
    /// `PackageName`.
    pub name: String,
    /// `PackageVersion`.
    pub version: Option<String>,
    /// `PackageFileName`.
    pub file_name: Option<String>,
    /// `PackageSupplier`.
    pub supplier: Option<String>,
    /// `PackageOriginator`.
    pub originator: Option<String>,
    /// `PackageDownloadLocation`.
    pub download_location: String,
    /// `PackageVerificationCode`.
    pub verification_code: Option<VerificationCode>,
    /// `PackageChecksum`.
    pub checksum: Option<Checksum>,
    /// `PackageHomePage`.
    pub home_page: Option<String>,
    /// `PackageSourceInfo`.
    pub source_info: Option<String>,
    /// `PackageLicenseConcluded`.
    pub licence_concluded: Option<LicenceTree>,
    /// `PackageLicenseInfoFromFiles`, repeated.
    pub licence_info_from_files: Vec<LicenceTree>,
    /// `PackageLicenseDeclared`.
    pub licence_declared: Option<LicenceTree>,
    /// `PackageLicenseComments`.
    pub licence_comments: Option<String>,
    /// `PackageCopyrightText`.
    pub copyright_text: String,
    /// `PackageSummary`.
    pub summary: Option<String>,
    /// `PackageDescription`.
    pub description: Option<String>,
}

impl Package {
    /// Record kind named when a package field appears before `PackageName`.
    pub const KIND: &'static str = "package";
}

impl Record for Package {
    const FIELDS: &'static [FieldEntry<Self>] = &[
        ("PackageName", |p| FieldSetter::Text(&mut p.name)),
        ("PackageVersion", |p| FieldSetter::OptionalText(&mut p.version)),
        ("PackageFileName", |p| FieldSetter::OptionalText(&mut p.file_name)),
        ("PackageSupplier", |p| FieldSetter::OptionalText(&mut p.supplier)),
        ("PackageOriginator", |p| FieldSetter::OptionalText(&mut p.originator)),
        ("PackageDownloadLocation", |p| {
            FieldSetter::Text(&mut p.download_location)
        }),
        ("PackageVerificationCode", |p| {
            FieldSetter::VerificationCode(&mut p.verification_code)
        }),
        ("PackageChecksum", |p| FieldSetter::Checksum(&mut p.checksum)),
        ("PackageHomePage", |p| FieldSetter::OptionalText(&mut p.home_page)),
        ("PackageSourceInfo", |p| FieldSetter::OptionalText(&mut p.source_info)),
        ("PackageLicenseConcluded", |p| {
            FieldSetter::Licence(&mut p.licence_concluded)
        }),
        ("PackageLicenseInfoFromFiles", |p| {
            FieldSetter::LicenceList(&mut p.licence_info_from_files)
        }),
        ("PackageLicenseDeclared", |p| {
            FieldSetter::Licence(&mut p.licence_declared)
        }),
        ("PackageLicenseComments", |p| {
            FieldSetter::OptionalText(&mut p.licence_comments)
        }),
        ("PackageCopyrightText", |p| FieldSetter::Text(&mut p.copyright_text)),
        ("PackageSummary", |p| FieldSetter::OptionalText(&mut p.summary)),
        ("PackageDescription", |p| FieldSetter::OptionalText(&mut p.description)),
    ];
}

/// A file record, opened by `FileName`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct File {
    /// `FileName`.
    pub name: String,
    /// `FileType`.
    pub file_type: Option<String>,
    /// `FileChecksum`.
    pub checksum: Option<Checksum>,
    /// `LicenseConcluded`.
    pub licence_concluded: Option<LicenceTree>,
    /// `LicenseInfoInFile`, repeated.
    pub licence_info_in_file: Vec<LicenceTree>,
    /// `LicenseComments`.
    pub licence_comments: Option<String>,
    /// `FileCopyrightText`.
    pub copyright_text: String,
    /// `FileComment`.
    pub comment: Option<String>,
    /// `FileNotice`.
    pub notice: Option<String>,
    /// `FileContributor`, repeated.
    pub contributors: Vec<String>,
}

impl File {
    /// Record kind named when a file field appears before `FileName`.
    pub const KIND: &'static str = "file";
}

impl Record for File {
    const FIELDS: &'static [FieldEntry<Self>] = &[
        ("FileName", |f| FieldSetter::Text(&mut f.name)),
        ("FileType", |f| FieldSetter::OptionalText(&mut f.file_type)),
        ("FileChecksum", |f| FieldSetter::Checksum(&mut f.checksum)),
        ("LicenseConcluded", |f| FieldSetter::Licence(&mut f.licence_concluded)),
        ("LicenseInfoInFile", |f| {
            FieldSetter::LicenceList(&mut f.licence_info_in_file)
        }),
        ("LicenseComments", |f| FieldSetter::OptionalText(&mut f.licence_comments)),
        ("FileCopyrightText", |f| FieldSetter::Text(&mut f.copyright_text)),
        ("FileComment", |f| FieldSetter::OptionalText(&mut f.comment)),
        ("FileNotice", |f| FieldSetter::OptionalText(&mut f.notice)),
        ("FileContributor", |f| FieldSetter::TextList(&mut f.contributors)),
    ];
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests exercise setter fallibility")]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn tables_do_not_share_tags() {
        let tags = Document::FIELDS
            .iter()
            .map(|(tag, _)| *tag)
            .chain(CreationInfo::FIELDS.iter().map(|(tag, _)| *tag))
            .chain(Package::FIELDS.iter().map(|(tag, _)| *tag))
            .chain(File::FIELDS.iter().map(|(tag, _)| *tag))
            .collect::<Vec<_>>();
        let mut unique = tags.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), tags.len());
    }

    #[rstest]
    #[case("PackageVerificationCode", "d6a770ba38583ed4bb4525bd96e50461655d2758 (a.spdx)")]
    #[case("PackageChecksum", "SHA1: d6a770ba38583ed4bb4525bd96e50461655d2758")]
    #[case("PackageLicenseDeclared", "(MIT or Apache-2.0)")]
    fn package_table_decodes_structured_fields(#[case] tag: &str, #[case] value: &str) {
        let mut package = Package::default();
        package.setter(tag).unwrap().apply(value).unwrap();
        assert_ne!(package, Package::default());
    }

    #[test]
    fn file_table_routes_licence_info_to_list() {
        let mut file = File::default();
        for value in ["MIT", "BSD-2-Clause"] {
            file.setter("LicenseInfoInFile").unwrap().apply(value).unwrap();
        }
        assert_eq!(file.licence_info_in_file.len(), 2);
    }
}
