//! `{placeholder}` substitution for layout templates.

use super::Descriptor;
use crate::error::FetchError;

/// Renders `template` with values from `descriptor`.
///
/// Known placeholders: `dr`, `telescope`, `field`, `apogee`, `location`, `star`.
/// Identifier values are validated so they cannot leave their path segment.
pub(crate) fn render(template: &str, descriptor: &Descriptor) -> Result<String, FetchError> {
    let mut out = String::with_capacity(template.len() + 32);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(|| FetchError::InvalidIdentifier {
            name: "template",
            value: template.to_string(),
        })?;
        out.push_str(&value_for(&after[..close], descriptor)?);
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

fn value_for(placeholder: &str, d: &Descriptor) -> Result<String, FetchError> {
    match placeholder {
        "dr" => Ok(d.release.to_string()),
        "telescope" => identifier(d, "telescope", d.telescope.as_deref()),
        "field" => identifier(d, "field", d.field.as_deref()),
        "apogee" => identifier(d, "apogee_id", d.apogee_id.as_deref()),
        "location" => d
            .location
            .map(|l| l.to_string())
            .ok_or_else(|| missing(d, "location")),
        "star" => {
            // Prefix depends on the telescope, so it must be present too.
            identifier(d, "telescope", d.telescope.as_deref())?;
            Ok(d.star_prefix())
        }
        other => Err(FetchError::InvalidIdentifier {
            name: "placeholder",
            value: other.to_string(),
        }),
    }
}

fn identifier(d: &Descriptor, name: &'static str, value: Option<&str>) -> Result<String, FetchError> {
    let value = value.ok_or_else(|| missing(d, name))?;
    validate_identifier(name, value)?;
    Ok(value.to_string())
}

fn missing(d: &Descriptor, name: &'static str) -> FetchError {
    FetchError::MissingIdentifier {
        kind: d.kind,
        release: d.release,
        name,
    }
}

/// Rejects values that are empty, contain path separators, whitespace or
/// control characters, or are `.`/`..`-style traversal.
pub(crate) fn validate_identifier(name: &'static str, value: &str) -> Result<(), FetchError> {
    let bad = value.is_empty()
        || value.contains("..")
        || value
            .chars()
            .any(|c| c == '/' || c == '\\' || c.is_whitespace() || c.is_control());
    if bad {
        return Err(FetchError::InvalidIdentifier {
            name,
            value: value.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogKind;

    fn star() -> Descriptor {
        Descriptor::new(CatalogKind::VisitSpectra, 17)
            .with_telescope("apo25m")
            .with_field("N6791")
            .with_apogee_id("2M19203303+3755558")
    }

    #[test]
    fn renders_all_placeholders() {
        let d = star().with_location(4263);
        let s = render("{dr}/{telescope}/{field}/{location}/{star}-{apogee}", &d).unwrap();
        assert_eq!(s, "17/apo25m/N6791/4263/apStar-2M19203303+3755558");
    }

    #[test]
    fn plain_text_passes_through() {
        let d = Descriptor::new(CatalogKind::AllStar, 17);
        assert_eq!(render("allStar-dr17-synspec.fits", &d).unwrap(), "allStar-dr17-synspec.fits");
    }

    #[test]
    fn missing_identifier_names_the_field() {
        let d = Descriptor::new(CatalogKind::CombinedSpectra, 17).with_telescope("apo25m");
        match render("{telescope}/{field}", &d) {
            Err(FetchError::MissingIdentifier { name, kind, release }) => {
                assert_eq!(name, "field");
                assert_eq!(kind, CatalogKind::CombinedSpectra);
                assert_eq!(release, 17);
            }
            other => panic!("expected MissingIdentifier, got {other:?}"),
        }
    }

    #[test]
    fn traversal_and_separators_rejected() {
        for bad in ["..", "../etc", "a/b", "a\\b", "a b", ""] {
            let d = star().with_field(bad);
            assert!(
                matches!(render("{field}", &d), Err(FetchError::InvalidIdentifier { .. })),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn unknown_placeholder_rejected() {
        let d = star();
        assert!(render("{plate}", &d).is_err());
        assert!(render("{field", &d).is_err());
    }
}
