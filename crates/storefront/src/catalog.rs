//! The plugin catalog.
//!
//! Static reference data: the catalog ships with the binary and is never
//! mutated at runtime. Category pills on the storefront filter this data;
//! a category with no matching plugins renders the "not available" state.

use dawe_audio_core::{Price, ProductId};

/// A plugin product in the catalog.
#[derive(Debug, Clone)]
pub struct Plugin {
    pub id: ProductId,
    pub name: String,
    /// Category identifier (e.g., "synthesizer", "effect").
    pub category: String,
    pub price: Price,
    /// Average review rating out of 5.
    pub rating: f64,
    pub review_count: u32,
    pub description: String,
    /// Short feature bullets shown on the product card.
    pub features: Vec<String>,
    /// CSS gradient used as the card artwork.
    pub artwork: String,
}

impl Plugin {
    /// Number of fully filled stars for the rating display.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn stars_filled(&self) -> usize {
        self.rating.clamp(0.0, 5.0).floor() as usize
    }
}

/// A browsable category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Stable identifier used in filter query strings.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Icon identifier for the pill and dropdown.
    pub icon: &'static str,
}

/// Identifier of the pseudo-category that shows the whole catalog.
pub const ALL_CATEGORY: &str = "all";

/// The browsable categories, in display order.
pub const CATEGORIES: &[Category] = &[
    Category { id: ALL_CATEGORY, name: "All", icon: "music" },
    Category { id: "analyzer", name: "Analyzer", icon: "bar-chart" },
    Category { id: "eq", name: "EQ", icon: "sliders" },
    Category { id: "compressor", name: "Compressor", icon: "minimize" },
    Category { id: "limiter", name: "Limiter", icon: "shield" },
    Category { id: "reverb", name: "Reverb", icon: "radio" },
    Category { id: "delay", name: "Delay", icon: "clock" },
];

/// The plugin catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    plugins: Vec<Plugin>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Build the catalog with the shipped product data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            plugins: featured_plugins(),
        }
    }

    /// All plugins, in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Plugin] {
        &self.plugins
    }

    /// Plugins in a category; `all` returns the whole catalog.
    ///
    /// An unknown or empty category yields an empty set, which the view
    /// renders as the "Not Available For Now" state.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<&Plugin> {
        if category == ALL_CATEGORY {
            return self.plugins.iter().collect();
        }
        self.plugins
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Look a plugin up by ID.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Plugin> {
        self.plugins.iter().find(|p| p.id == id)
    }

    /// The browsable categories, in display order.
    #[must_use]
    pub const fn categories() -> &'static [Category] {
        CATEGORIES
    }
}

/// The shipped product data.
fn featured_plugins() -> Vec<Plugin> {
    vec![
        Plugin {
            id: ProductId::new(1),
            name: "Synth Master Pro".to_string(),
            category: "synthesizer".to_string(),
            price: Price::usd(199),
            rating: 4.8,
            review_count: 324,
            description: "Powerful analog synthesizer with endless sound design possibilities"
                .to_string(),
            features: vec![
                "500+ Presets".to_string(),
                "Dual Layer Architecture".to_string(),
                "MPE Support".to_string(),
            ],
            artwork: "linear-gradient(135deg, #667eea 0%, #764ba2 100%)".to_string(),
        },
        Plugin {
            id: ProductId::new(2),
            name: "Reverb Space".to_string(),
            category: "effect".to_string(),
            price: Price::usd(89),
            rating: 4.9,
            review_count: 567,
            description: "Professional reverb processor for creating perfect spatial depth"
                .to_string(),
            features: vec![
                "Real Space Simulation".to_string(),
                "50+ Presets".to_string(),
                "CPU Optimized".to_string(),
            ],
            artwork: "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)".to_string(),
        },
        Plugin {
            id: ProductId::new(3),
            name: "Beat Maker Studio".to_string(),
            category: "drums".to_string(),
            price: Price::usd(149),
            rating: 4.7,
            review_count: 892,
            description: "Professional drum machine plugin for creating powerful beats"
                .to_string(),
            features: vec![
                "1000+ Samples".to_string(),
                "Step Sequencer".to_string(),
                "MIDI Learn".to_string(),
            ],
            artwork: "linear-gradient(135deg, #4facfe 0%, #00f2fe 100%)".to_string(),
        },
        Plugin {
            id: ProductId::new(4),
            name: "Vocal Enhance AI".to_string(),
            category: "vocal".to_string(),
            price: Price::usd(299),
            rating: 5.0,
            review_count: 156,
            description: "AI-powered vocal processor for professional sound".to_string(),
            features: vec![
                "AI Enhancement".to_string(),
                "Auto-Tune".to_string(),
                "Harmony Generator".to_string(),
            ],
            artwork: "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)".to_string(),
        },
        Plugin {
            id: ProductId::new(5),
            name: "Bass Station X".to_string(),
            category: "bass".to_string(),
            price: Price::usd(129),
            rating: 4.6,
            review_count: 445,
            description: "Deep and powerful bass synthesizer".to_string(),
            features: vec![
                "Analog Modeling".to_string(),
                "Sidechain Compression".to_string(),
                "Vintage Mode".to_string(),
            ],
            artwork: "linear-gradient(135deg, #fa709a 0%, #fee140 100%)".to_string(),
        },
        Plugin {
            id: ProductId::new(6),
            name: "Master Limiter Pro".to_string(),
            category: "mastering".to_string(),
            price: Price::usd(179),
            rating: 4.9,
            review_count: 721,
            description: "Mastering limiter for making your music louder".to_string(),
            features: vec![
                "Transparent Limiting".to_string(),
                "Stereo Enhancement".to_string(),
                "A/B Compare".to_string(),
            ],
            artwork: "linear-gradient(135deg, #30cfd0 0%, #330867 100%)".to_string(),
        },
    ]
}
