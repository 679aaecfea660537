//! Catalog kinds, request descriptors and their mapping onto the archive layout.
//!
//! Each supported (kind, release) pair is one row in [`layout::LAYOUTS`]; a
//! [`Descriptor`] is rendered against its row to produce a [`Target`] with the
//! local cache path, the remote URL and where the expected checksum comes from.

mod layout;
mod resolve;
mod template;

pub use layout::supported_releases;
pub use resolve::{resolve, ChecksumSource, ManifestRef, Target};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of archive file that can be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    /// allStar: ASPCAP parameters and abundances from combined spectra.
    #[serde(rename = "allstar")]
    AllStar,
    /// allVisit: properties of the individual visit spectra.
    #[serde(rename = "allvisit")]
    AllVisit,
    /// aspcapStar: combined spectrum of one star.
    #[serde(rename = "combined")]
    CombinedSpectra,
    /// apStar/asStar: visit spectra of one star.
    #[serde(rename = "visit")]
    VisitSpectra,
    /// Red-clump value-added catalog.
    #[serde(rename = "red-clump")]
    RedClump,
    /// StarHorse distances value-added catalog.
    #[serde(rename = "distances")]
    Distances,
    /// astroNN parameters, distances and orbits cross-matched to allStar.
    #[serde(rename = "astronn")]
    AstroNn,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 7] = [
        CatalogKind::AllStar,
        CatalogKind::AllVisit,
        CatalogKind::CombinedSpectra,
        CatalogKind::VisitSpectra,
        CatalogKind::RedClump,
        CatalogKind::Distances,
        CatalogKind::AstroNn,
    ];

    /// Canonical command-line name.
    pub fn name(self) -> &'static str {
        match self {
            CatalogKind::AllStar => "allstar",
            CatalogKind::AllVisit => "allvisit",
            CatalogKind::CombinedSpectra => "combined",
            CatalogKind::VisitSpectra => "visit",
            CatalogKind::RedClump => "red-clump",
            CatalogKind::Distances => "distances",
            CatalogKind::AstroNn => "astronn",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CatalogKind::AllStar => "allStar catalog of stellar parameters from combined spectra",
            CatalogKind::AllVisit => "allVisit catalog of individual visit properties",
            CatalogKind::CombinedSpectra => "aspcapStar combined spectrum of one star",
            CatalogKind::VisitSpectra => "apStar/asStar visit spectra of one star",
            CatalogKind::RedClump => "red-clump value-added catalog",
            CatalogKind::Distances => "StarHorse distances value-added catalog",
            CatalogKind::AstroNn => "astroNN value-added catalog",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "allstar" => CatalogKind::AllStar,
            "allvisit" => CatalogKind::AllVisit,
            "combined" | "aspcapstar" => CatalogKind::CombinedSpectra,
            "visit" | "apstar" | "asstar" => CatalogKind::VisitSpectra,
            "red-clump" | "rc" => CatalogKind::RedClump,
            "distances" | "starhorse" => CatalogKind::Distances,
            "astronn" => CatalogKind::AstroNn,
            other => return Err(format!("unknown catalog kind: {other}")),
        };
        Ok(kind)
    }
}

/// One request for an archive file. Cheap to build; not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub kind: CatalogKind,
    pub release: u32,
    pub location: Option<u32>,
    pub field: Option<String>,
    pub apogee_id: Option<String>,
    /// Telescope id, e.g. `apo25m` or `lco25m`.
    pub telescope: Option<String>,
    /// Spectra taken during commissioning (`apStarC`/`asStarC`).
    pub commissioning: bool,
}

impl Descriptor {
    pub fn new(kind: CatalogKind, release: u32) -> Self {
        Self {
            kind,
            release,
            location: None,
            field: None,
            apogee_id: None,
            telescope: None,
            commissioning: false,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn with_apogee_id(mut self, apogee_id: impl Into<String>) -> Self {
        self.apogee_id = Some(apogee_id.into());
        self
    }

    pub fn with_telescope(mut self, telescope: impl Into<String>) -> Self {
        self.telescope = Some(telescope.into());
        self
    }

    pub fn with_location(mut self, location: u32) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_commissioning(mut self, commissioning: bool) -> Self {
        self.commissioning = commissioning;
        self
    }

    /// Prefix of visit-spectra filenames: LCO spectra are `asStar`, APO `apStar`,
    /// with a trailing `C` for commissioning data.
    pub fn star_prefix(&self) -> String {
        let base = match self.telescope.as_deref() {
            Some("lco25m") => "asStar",
            _ => "apStar",
        };
        if self.commissioning {
            format!("{base}C")
        } else {
            base.to_string()
        }
    }
}
