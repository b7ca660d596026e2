//! Neighbourhood insight text shown next to the location picker.
//!
//! Insights come from an ordered list of [`InsightProvider`]s. The first
//! provider that knows a location wins; an unknown location renders nothing.

/// The five text fields of the location panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationText {
    pub safety: String,
    pub infrastructure: String,
    pub transport: String,
    pub amenities: String,
    pub description: String,
}

/// A source of location insight text.
pub trait InsightProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn insights(
        &self,
        location: &str,
    ) -> Option<LocationText>;
}

// ── scored profiles ──────────────────────────────────────────────────────

/// A location rated 1–5 on four axes, each with a short note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaProfile {
    pub id: &'static str,
    pub safety_score: u8,
    pub infra_score: u8,
    pub transport_score: u8,
    pub amenities_score: u8,
    pub safety_note: &'static str,
    pub infra_note: &'static str,
    pub transport_note: &'static str,
    pub amenities_note: &'static str,
    pub overview: Option<&'static str>,
}

impl AreaProfile {
    fn render(&self) -> LocationText {
        let description = match self.overview {
            Some(text) => text.to_string(),
            None => format!(
                "A popular area with {} and {}. ",
                self.safety_note.to_lowercase(),
                self.infra_note.to_lowercase()
            ),
        };

        LocationText {
            safety: format!(
                "{}/5 {} – {}",
                self.safety_score,
                stars(self.safety_score),
                self.safety_note
            ),
            infrastructure: format!("{}/5 – {}", self.infra_score, self.infra_note),
            transport: format!("{}/5 – {}", self.transport_score, self.transport_note),
            amenities: format!("{}/5 – {}", self.amenities_score, self.amenities_note),
            description,
        }
    }
}

/// Five-character rating: `score` filled stars then empty ones.
pub fn stars(score: u8) -> String {
    let filled = usize::from(score.min(5));
    let mut out = "★".repeat(filled);
    out.push_str(&"☆".repeat(5 - filled));
    out
}

const AREA_PROFILES: &[AreaProfile] = &[
    AreaProfile {
        id: "lekki",
        safety_score: 4,
        infra_score: 4,
        transport_score: 3,
        amenities_score: 5,
        safety_note: "Estate security and private patrols are common",
        infra_note: "modern estates, decent drainage; some pockets still developing",
        transport_note: "good arterial roads but peak-hour congestion",
        amenities_note: "beaches, malls, schools, healthcare close by",
        overview: Some(
            "Lekki/Ajah blends coastal living with modern estates; great lifestyle, but plan around rush-hour traffic.",
        ),
    },
    AreaProfile {
        id: "ikeja",
        safety_score: 4,
        infra_score: 4,
        transport_score: 5,
        amenities_score: 4,
        safety_note: "well-policed commercial zones",
        infra_note: "strong road network and services near the airport",
        transport_note: "excellent access via major roads and local transit",
        amenities_note: "malls, offices, hotels, hospitals within minutes",
        overview: Some(
            "Ikeja is a vibrant commercial hub with reliable infrastructure and excellent connectivity.",
        ),
    },
    AreaProfile {
        id: "yaba",
        safety_score: 3,
        infra_score: 4,
        transport_score: 4,
        amenities_score: 4,
        safety_note: "mixed residential/commercial; generally moderate risk",
        infra_note: "improving roads and services around tech corridors",
        transport_note: "good BRT and main-road access",
        amenities_note: "universities, hubs, eateries, clinics",
        overview: Some(
            "Yaba offers a youthful tech vibe with improving infrastructure and solid transport links.",
        ),
    },
    AreaProfile {
        id: "maitama",
        safety_score: 5,
        infra_score: 5,
        transport_score: 4,
        amenities_score: 5,
        safety_note: "diplomatic enclave with high-grade security",
        infra_note: "top-tier roads, utilities, and urban services",
        transport_note: "good access; light congestion by comparison",
        amenities_note: "premium restaurants, embassies, parks",
        overview: Some(
            "Maitama is exclusive and secure with premium services and serene ambience.",
        ),
    },
    AreaProfile {
        id: "asokoro",
        safety_score: 5,
        infra_score: 5,
        transport_score: 4,
        amenities_score: 5,
        safety_note: "high-security government/official residences",
        infra_note: "excellent roads and utilities",
        transport_note: "reliable access; low noise",
        amenities_note: "embassies, parks, upscale services",
        overview: Some("Asokoro is pristine and secure, ideal for tranquil premium living."),
    },
    AreaProfile {
        id: "gwarinpa",
        safety_score: 4,
        infra_score: 4,
        transport_score: 4,
        amenities_score: 4,
        safety_note: "generally safe estates; vary by cluster",
        infra_note: "extensive estate planning; services fairly reliable",
        transport_note: "good internal and connecting roads",
        amenities_note: "neighborhood malls, schools, clinics",
        overview: Some(
            "Gwarinpa offers diverse housing in a large, well-planned estate environment.",
        ),
    },
    AreaProfile {
        id: "wuse",
        safety_score: 4,
        infra_score: 5,
        transport_score: 5,
        amenities_score: 5,
        safety_note: "central district with active security presence",
        infra_note: "excellent roads, lighting, utilities",
        transport_note: "superb connectivity to all parts of Abuja",
        amenities_note: "top retail, offices, healthcare",
        overview: Some(
            "Wuse balances residential comfort with central accessibility and amenities.",
        ),
    },
    AreaProfile {
        id: "ph_gra",
        safety_score: 4,
        infra_score: 4,
        transport_score: 4,
        amenities_score: 4,
        safety_note: "upscale with estates and private security",
        infra_note: "good roads and services in most parts",
        transport_note: "solid access to business areas",
        amenities_note: "restaurants, lounges, clinics",
        overview: Some(
            "Port Harcourt GRA is quiet and upscale with convenient access to services.",
        ),
    },
    AreaProfile {
        id: "trans_amadi",
        safety_score: 3,
        infra_score: 4,
        transport_score: 4,
        amenities_score: 4,
        safety_note: "mixed commercial/industrial; varies by street",
        infra_note: "good road links to industrial zones",
        transport_note: "reliable access to city nodes",
        amenities_note: "essential services nearby",
        overview: Some(
            "Trans-Amadi is practical for work access with improving liveability around key roads.",
        ),
    },
];

/// Scored profiles for Lagos, Abuja and Port Harcourt neighbourhoods.
#[derive(Debug, Clone)]
pub struct ExtendedInsights {
    profiles: Vec<AreaProfile>,
}

impl ExtendedInsights {
    pub fn new(profiles: Vec<AreaProfile>) -> Self {
        Self { profiles }
    }

    pub fn location_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.profiles.iter().map(|p| p.id)
    }
}

impl Default for ExtendedInsights {
    fn default() -> Self {
        Self::new(AREA_PROFILES.to_vec())
    }
}

impl InsightProvider for ExtendedInsights {
    fn name(&self) -> &'static str {
        "extended"
    }

    fn insights(
        &self,
        location: &str,
    ) -> Option<LocationText> {
        self.profiles
            .iter()
            .find(|p| p.id == location)
            .map(AreaProfile::render)
    }
}

// ── basic table ──────────────────────────────────────────────────────────

/// Plain one-word ratings for the three Lagos areas.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicInsights;

impl InsightProvider for BasicInsights {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn insights(
        &self,
        location: &str,
    ) -> Option<LocationText> {
        let (safety, infrastructure, transport, amenities, description) = match location {
            "lekki" => (
                "High",
                "Modern",
                "Moderate",
                "Excellent",
                "Modern estates, gated communities, occasional traffic.",
            ),
            "ikeja" => (
                "High",
                "Good",
                "Excellent",
                "Good",
                "Commercial hub, great infrastructure, near airport.",
            ),
            "yaba" => (
                "Moderate",
                "Good",
                "Good",
                "Good",
                "Youthful, tech-focused, good transport.",
            ),
            _ => return None,
        };

        Some(LocationText {
            safety: safety.to_string(),
            infrastructure: infrastructure.to_string(),
            transport: transport.to_string(),
            amenities: amenities.to_string(),
            description: description.to_string(),
        })
    }
}

// ── provider chain ───────────────────────────────────────────────────────

/// Ordered chain of insight providers.
pub struct LocationInsights {
    providers: Vec<Box<dyn InsightProvider>>,
}

impl LocationInsights {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Extended profiles first, then the basic table.
    pub fn with_defaults() -> Self {
        let mut chain = Self::new();
        chain.push(Box::new(ExtendedInsights::default()));
        chain.push(Box::new(BasicInsights));
        chain
    }

    pub fn push(
        &mut self,
        provider: Box<dyn InsightProvider>,
    ) {
        self.providers.push(provider);
    }

    /// Text for `location` from the first provider that knows it.
    pub fn lookup(
        &self,
        location: &str,
    ) -> Option<LocationText> {
        let found = self
            .providers
            .iter()
            .find_map(|p| p.insights(location).map(|text| (p.name(), text)));

        match found {
            Some((provider, text)) => {
                tracing::debug!(location, provider, "location insights resolved");
                Some(text)
            }
            None => {
                tracing::debug!(location, "no location insights");
                None
            }
        }
    }
}

impl Default for LocationInsights {
    fn default() -> Self {
        Self::with_defaults()
    }
}
