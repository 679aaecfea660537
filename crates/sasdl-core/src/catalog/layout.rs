//! Versioned layout table: one row per (kind, release).
//!
//! Directory and filename templates are relative to the archive root; the
//! same relative path is used under the base URL and under the local data root.

use super::CatalogKind;
use crate::checksum::HashAlgorithm;

/// Where the expected checksum of a file comes from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ChecksumRule {
    /// Digest published with the release.
    Fixed {
        algorithm: HashAlgorithm,
        digest: &'static str,
    },
    /// Looked up in a per-directory manifest; `stem` is templated and gets the
    /// algorithm's extension appended.
    Manifest {
        algorithm: HashAlgorithm,
        stem: &'static str,
    },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Layout {
    pub kind: CatalogKind,
    pub release: u32,
    pub directory: &'static str,
    pub filename: &'static str,
    pub checksum: ChecksumRule,
}

const DR17_SYNSPEC: &str = "dr17/apogee/spectro/aspcap/dr17/synspec";

pub(crate) const LAYOUTS: &[Layout] = &[
    Layout {
        kind: CatalogKind::AllStar,
        release: 17,
        directory: DR17_SYNSPEC,
        filename: "allStar-dr17-synspec.fits",
        checksum: ChecksumRule::Fixed {
            algorithm: HashAlgorithm::Sha1,
            digest: "0e70c02323132af4045545d2329e3f1cb8fdb1e0",
        },
    },
    Layout {
        kind: CatalogKind::AllVisit,
        release: 17,
        directory: DR17_SYNSPEC,
        filename: "allVisit-dr17-synspec.fits",
        checksum: ChecksumRule::Fixed {
            algorithm: HashAlgorithm::Sha1,
            digest: "fb2f5ecbabbe156f8ec37b420e095f3ba8323cc6",
        },
    },
    Layout {
        kind: CatalogKind::CombinedSpectra,
        release: 17,
        directory: "dr17/apogee/spectro/aspcap/dr17/synspec/{telescope}/{field}",
        filename: "aspcapStar-dr17-{apogee}.fits",
        checksum: ChecksumRule::Manifest {
            algorithm: HashAlgorithm::Sha1,
            stem: "dr17_synspec_{telescope}_{field}",
        },
    },
    Layout {
        kind: CatalogKind::VisitSpectra,
        release: 17,
        directory: "dr17/apogee/spectro/redux/dr17/stars/{telescope}/{field}",
        filename: "{star}-dr17-{apogee}.fits",
        checksum: ChecksumRule::Manifest {
            algorithm: HashAlgorithm::Sha1,
            stem: "dr17_stars_{telescope}_{field}",
        },
    },
    Layout {
        kind: CatalogKind::RedClump,
        release: 17,
        directory: "dr17/apogee/vac/apogee-rc/cat",
        filename: "apogee-rc-DR{dr}.fits",
        checksum: ChecksumRule::Fixed {
            algorithm: HashAlgorithm::Sha1,
            digest: "d54e0ea4e6a3f5cc3c02a73b93260e992d9836d0",
        },
    },
    Layout {
        kind: CatalogKind::Distances,
        release: 17,
        directory: "dr17/apogee/vac/apogee-starhorse",
        filename: "APOGEE_DR17_EDR3_STARHORSE_v2.fits",
        checksum: ChecksumRule::Fixed {
            algorithm: HashAlgorithm::Sha1,
            digest: "2502e2f7703046163f81ecc4054dce39b2038e4f",
        },
    },
    Layout {
        kind: CatalogKind::AstroNn,
        release: 17,
        directory: "dr17/apogee/vac/apogee-astronn",
        filename: "apogee_astroNN-DR17.fits",
        checksum: ChecksumRule::Fixed {
            algorithm: HashAlgorithm::Sha1,
            digest: "c422b9adba840b3415af2fe6dec6500219f1b68f",
        },
    },
];

pub(crate) fn find(kind: CatalogKind, release: u32) -> Option<&'static Layout> {
    LAYOUTS
        .iter()
        .find(|l| l.kind == kind && l.release == release)
}

/// Data releases with a layout row for `kind`, ascending.
pub fn supported_releases(kind: CatalogKind) -> Vec<u32> {
    let mut releases: Vec<u32> = LAYOUTS
        .iter()
        .filter(|l| l.kind == kind)
        .map(|l| l.release)
        .collect();
    releases.sort_unstable();
    releases.dedup();
    releases
}
