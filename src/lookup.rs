//! Static lookup tables for display enrichment
//!
//! Icons per entity schema, region codes per issuing authority, country names
//! per region code, and the entity-type categories used by the daily pivots.
//! Every lookup has an explicit answer for unknown keys.

const PERSON_ICON: &str = "![Person](https://banner2.cleanpng.com/20180426/gkw/kisspng-user-computer-icons-download-person-icon-5ae1dbfbb675d7.5784016215247513557474.jpg)";
const COMPANY_ICON: &str = "![Company](https://w7.pngwing.com/pngs/38/685/png-transparent-computer-icons-company-youtube-business-corporation-youtube-angle-building-company.png)";

/// Icon used for schemas without their own entry
pub const FALLBACK_ICON: &str = "![Entity](https://w7.pngwing.com/pngs/38/685/png-transparent-computer-icons-company-youtube-business-corporation-youtube-angle-building-company.png)";

/// Icon prefix for supranational bodies without a country flag
pub const GLOBAL_REGION_ICON: &str = ":globe_with_meridians:";

/// Issuing authority → region code
const AUTHORITIES: &[(&str, &str)] = &[
    ("Office of Foreign Assets Control (OFAC)", "us"),
    ("National Security and Defense Council", "ua"),
    ("Entity List (EL) - Bureau of Industry and Security", "us"),
    ("European External Action Service", "eu"),
    ("UK; Office of Financial Sanctions Implementation", "uk"),
    (
        "Military End User (MEU) List - Bureau of Industry and Security",
        "us",
    ),
    ("Ministry of Finance", "jp"),
    (
        "Державна служба фінансового моніторингу України (Держфінмоніторинг)",
        "ua",
    ),
    ("Nonproliferation Sanctions (ISN) - State Department", "us"),
    ("United Nations Security Council (UN SC)", "un"),
    ("UN; Office of Financial Sanctions Implementation", "un"),
    ("Ministry of Justice and Human Rights", "ar"),
    (
        "Minister of Defense - Mr. Avigdor Liberman; National Bureau for Counter Terror Financing",
        "il",
    ),
    ("World Bank", "xx"),
    ("Asian Development Bank", "as"),
    ("African Development Bank Group", "af"),
    ("WBG cross debarment; Inter-American Development Bank", "sa"),
    (
        "The State Security Cabinet (SSC); National Bureau for Counter Terror Financing",
        "il",
    ),
];

/// Region code → display name, for codes that get a flag
const COUNTRIES: &[(&str, &str)] = &[
    ("us", "USA"),
    ("ua", "Ukraine"),
    ("uk", "UK"),
    ("jp", "Japan"),
    ("ar", "Argentinien"),
    ("il", "Israel"),
    ("ch", "Schweiz"),
];

/// Supranational region codes shown with the generic region icon
const GLOBAL_REGIONS: &[(&str, &str)] = &[("eu", "EU"), ("un", "UN")];

/// Display icon for an entity schema
///
/// `Person`, `Company` and `LegalEntity` have their own icon; anything else
/// gets `FALLBACK_ICON` when `use_fallback` is set and no icon otherwise.
#[must_use]
pub fn schema_icon(schema: &str, use_fallback: bool) -> Option<&'static str> {
    match schema {
        "Person" => Some(PERSON_ICON),
        "Company" | "LegalEntity" => Some(COMPANY_ICON),
        _ if use_fallback => Some(FALLBACK_ICON),
        _ => None,
    }
}

/// Region code for a known issuing authority
#[must_use]
pub fn authority_region(authority: &str) -> Option<&'static str> {
    AUTHORITIES
        .iter()
        .find(|(name, _)| *name == authority)
        .map(|(_, code)| *code)
}

/// Display name for a region code that gets a country flag
#[must_use]
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|(iso, _)| *iso == code)
        .map(|(_, name)| *name)
}

/// Display name for a supranational region code
#[must_use]
pub fn global_region_name(code: &str) -> Option<&'static str> {
    GLOBAL_REGIONS
        .iter()
        .find(|(iso, _)| *iso == code)
        .map(|(_, name)| *name)
}

/// Flag shortcode for a region code, e.g. `:ru:`
#[must_use]
pub fn flag(code: &str) -> String {
    format!(":{}:", code.to_lowercase())
}

/// Entity-type categories used by the daily pivots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SchemaCategory {
    Person,
    Company,
    /// Any other schema
    Other,
}

impl SchemaCategory {
    /// Category of an entity schema
    #[must_use]
    pub fn from_schema(schema: &str) -> Self {
        match schema {
            "Person" => Self::Person,
            "Company" => Self::Company,
            _ => Self::Other,
        }
    }

    /// German column label
    #[must_use]
    pub const fn label_de(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Company => "Firma",
            Self::Other => "Sonstige",
        }
    }

    /// English column label
    #[must_use]
    pub const fn label_en(self) -> &'static str {
        match self {
            Self::Person => "Person",
            Self::Company => "Company",
            Self::Other => "Other",
        }
    }

    /// Column label in the requested language
    #[must_use]
    pub const fn label(self, language: Language) -> &'static str {
        match language {
            Language::De => self.label_de(),
            Language::En => self.label_en(),
        }
    }

    /// Display icon of the category
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Person => PERSON_ICON,
            Self::Company => COMPANY_ICON,
            Self::Other => FALLBACK_ICON,
        }
    }

    /// All categories in column order
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Person, Self::Company, Self::Other]
    }

    /// Category for a column label in either language
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|c| c.label_de() == label || c.label_en() == label)
    }
}

/// Label language of the schema pivots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    De,
    En,
}
