//! Static Springfield catalog: the location cards rendered on the dashboard,
//! plus the canned text the modals and rotating panels draw from.
//!
//! Everything here is compiled in and immutable for the session.

use serde::Serialize;

/// District grouping used by the category buttons and the mini map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Residential,
    Commercial,
    Municipal,
    Entertainment,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Residential,
        Category::Commercial,
        Category::Municipal,
        Category::Entertainment,
    ];

    /// Token used in markup (`data-category`) and filter requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Residential => "residential",
            Category::Commercial => "commercial",
            Category::Municipal => "municipal",
            Category::Entertainment => "entertainment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Residential => "Residential",
            Category::Commercial => "Commercial",
            Category::Municipal => "Municipal",
            Category::Entertainment => "Entertainment",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Category::Residential => "\u{1F3E0}",        // 🏠
            Category::Commercial => "\u{1F3EA}",         // 🏪
            Category::Municipal => "\u{1F3DB}\u{FE0F}", // 🏛️
            Category::Entertainment => "\u{1F3AA}",      // 🎪
        }
    }

    /// Exact, case-sensitive token lookup.
    pub fn parse(token: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == token)
    }
}

/// One dashboard tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card<'a> {
    /// Stable identifier (`data-location`).
    pub id: &'a str,
    pub category: Category,
    pub title: &'a str,
    pub icon: &'a str,
    /// Flattened visible text of the tile, used for search matching.
    pub display_text: &'a str,
}

/// Cards in page order. Digit shortcuts 1–6 index into this order.
pub static CARDS: [Card<'static>; 6] = [
    Card {
        id: "simpsons-house",
        category: Category::Residential,
        title: "742 Evergreen Terrace",
        icon: "\u{1F3E0}",
        display_text: "742 Evergreen Terrace Simpson family home Homer Marge Bart Lisa Maggie orange couch",
    },
    Card {
        id: "elementary",
        category: Category::Municipal,
        title: "Springfield Elementary",
        icon: "\u{1F3EB}",
        display_text: "Springfield Elementary School Principal Skinner Mrs. Krabappel detention",
    },
    Card {
        id: "power-plant",
        category: Category::Municipal,
        title: "Nuclear Power Plant",
        icon: "\u{269B}\u{FE0F}",
        display_text: "Springfield Nuclear Power Plant Mr. Burns Smithers Sector 7G safety",
    },
    Card {
        id: "channel-6",
        category: Category::Entertainment,
        title: "Channel 6 News",
        icon: "\u{1F4FA}",
        display_text: "Channel 6 News Kent Brockman Krusty the Clown broadcast studio",
    },
    Card {
        id: "moes-tavern",
        category: Category::Entertainment,
        title: "Moe's Tavern",
        icon: "\u{1F37A}",
        display_text: "Moe's Tavern Moe Szyslak Barney Duff beer prank calls",
    },
    Card {
        id: "kwik-e-mart",
        category: Category::Commercial,
        title: "Kwik-E-Mart",
        icon: "\u{1F3EA}",
        display_text: "Kwik-E-Mart Apu Squishee convenience store open 24/7",
    },
];

/// Look up a catalog card by identifier.
pub fn find_card(id: &str) -> Option<&'static Card<'static>> {
    CARDS.iter().find(|c| c.id == id)
}

// ── Location modal text ────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LocationDetails {
    pub description: &'static str,
    pub characters: &'static str,
    pub fun_fact: &'static str,
    pub first_episode: &'static str,
}

const UNKNOWN_LOCATION: LocationDetails = LocationDetails {
    description: "A mysterious location in Springfield.",
    characters: "Various residents",
    fun_fact: "Every location in Springfield has its own unique story.",
    first_episode: "Unknown",
};

/// Canned modal text for a location. Unknown ids get a generic record.
pub fn location_details(id: &str) -> LocationDetails {
    match id {
        "simpsons-house" => LocationDetails {
            description: "The iconic home of the Simpson family, featuring the famous orange couch and endless couch gags.",
            characters: "Homer, Marge, Bart, Lisa, Maggie",
            fun_fact: "The house address 742 Evergreen Terrace was inspired by creator Matt Groening's childhood address.",
            first_episode: "Simpsons Roasting on an Open Fire (1989)",
        },
        "elementary" => LocationDetails {
            description: "Springfield Elementary School, where learning happens... occasionally.",
            characters: "Principal Skinner, Superintendent Chalmers, Mrs. Krabappel",
            fun_fact: "The school motto is \"De Whal Oil Beef Hooked\", which only makes sense read aloud.",
            first_episode: "Bart the Genius (1990)",
        },
        "power-plant" => LocationDetails {
            description: "Springfield Nuclear Power Plant, home to many safety violations and one very lazy safety inspector.",
            characters: "Mr. Burns, Waylon Smithers, Homer Simpson",
            fun_fact: "The plant has had numerous accidents, but somehow Springfield survives.",
            first_episode: "Homer's Odyssey (1990)",
        },
        "channel-6" => LocationDetails {
            description: "Springfield's premier news station, delivering the news with questionable accuracy.",
            characters: "Kent Brockman, Arnie Pie",
            fun_fact: "Kent Brockman once welcomed our \"new insect overlords\" live on air.",
            first_episode: "Krusty Gets Busted (1990)",
        },
        "moes-tavern" => LocationDetails {
            description: "The local watering hole where everybody knows your shame.",
            characters: "Moe Szyslak, Barney Gumble, Carl, Lenny",
            fun_fact: "The bar has been robbed multiple times, usually by the same few regulars.",
            first_episode: "Simpsons Roasting on an Open Fire (1989)",
        },
        "kwik-e-mart" => LocationDetails {
            description: "Springfield's convenience store, open 24/7 and selling items of questionable freshness.",
            characters: "Apu Nahasapeemapetilon",
            fun_fact: "The hot dogs have been rotating on the grill since 1987.",
            first_episode: "The Telltale Head (1990)",
        },
        _ => UNKNOWN_LOCATION,
    }
}

// ── Topic chips ────────────────────────────────────────────────────

/// Topic chips shown above the grid. Each maps to a fixed set of locations.
pub const CHIPS: [&str; 5] = ["episodes", "characters", "locations", "lore", "games"];

/// Locations associated with a topic chip. Unknown chips map to nothing.
pub fn chip_locations(chip: &str) -> &'static [&'static str] {
    match chip {
        "episodes" => &["simpsons-house"],
        "characters" => &["simpsons-house", "moes-tavern"],
        "locations" => &["elementary", "power-plant", "channel-6", "kwik-e-mart"],
        "lore" => &["power-plant", "channel-6"],
        "games" => &["kwik-e-mart", "moes-tavern"],
        _ => &[],
    }
}

// ── Rotating hero panels ───────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: &'static str,
    pub author: &'static str,
}

pub static QUOTES: [Quote; 4] = [
    Quote { text: "\"D'oh!\"", author: "- Homer Simpson" },
    Quote { text: "\"Eat my shorts!\"", author: "- Bart Simpson" },
    Quote { text: "\"Excellent...\"", author: "- Mr. Burns" },
    Quote { text: "\"Thank you, come again!\"", author: "- Apu" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weather {
    pub temp: &'static str,
    pub label: &'static str,
    pub radiation: &'static str,
    pub smog: &'static str,
    pub donut: &'static str,
}

impl Weather {
    pub fn radiation_class(&self) -> &'static str {
        if self.radiation == "Minimal" { "safe" } else { "moderate" }
    }

    pub fn smog_class(&self) -> &'static str {
        if self.smog == "Light" { "safe" } else { "moderate" }
    }

    pub fn donut_class(&self) -> &'static str {
        match self.donut {
            "Perfect" | "Excellent" => "excellent",
            _ => "safe",
        }
    }
}

pub static WEATHER: [Weather; 5] = [
    Weather { temp: "72°F", label: "Nuclear Winter", radiation: "Minimal", smog: "Moderate", donut: "Excellent" },
    Weather { temp: "68°F", label: "Radioactive Breeze", radiation: "Low", smog: "Light", donut: "Outstanding" },
    Weather { temp: "75°F", label: "Toxic Sunshine", radiation: "Moderate", smog: "Heavy", donut: "Good" },
    Weather { temp: "70°F", label: "Atomic Drizzle", radiation: "Minimal", smog: "Moderate", donut: "Excellent" },
    Weather { temp: "73°F", label: "Meltdown Mild", radiation: "Low", smog: "Light", donut: "Perfect" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeaturedStat {
    pub number: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Featured {
    pub location: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub stats: [FeaturedStat; 3],
    pub quote: &'static str,
}

pub static FEATURED: [Featured; 3] = [
    Featured {
        location: "simpsons-house",
        icon: "\u{1F3E0}",
        title: "742 Evergreen Terrace",
        description: "The heart of Springfield - where America's favorite family lives",
        stats: [
            FeaturedStat { number: "∞", label: "Donuts Consumed" },
            FeaturedStat { number: "684", label: "Couch Gags" },
            FeaturedStat { number: "35+", label: "Years on TV" },
        ],
        quote: "\"D'oh! Where's the remote?\"",
    },
    Featured {
        location: "power-plant",
        icon: "\u{269B}\u{FE0F}",
        title: "Springfield Nuclear Plant",
        description: "Powering Springfield through questionable safety protocols",
        stats: [
            FeaturedStat { number: "C-", label: "Safety Rating" },
            FeaturedStat { number: "47", label: "Accidents This Year" },
            FeaturedStat { number: "1", label: "Safety Inspector" },
        ],
        quote: "\"Excellent...\" - Mr. Burns",
    },
    Featured {
        location: "moes-tavern",
        icon: "\u{1F37A}",
        title: "Moe's Tavern",
        description: "Where everybody knows your shame and your tab",
        stats: [
            FeaturedStat { number: "847", label: "Prank Calls" },
            FeaturedStat { number: "24/7", label: "Duff on Tap" },
            FeaturedStat { number: "3", label: "Regular Customers" },
        ],
        quote: "\"Moe's Tavern, Moe speaking\"",
    },
];

/// Springfield's official population, as printed on the stats modal.
pub const POPULATION: &str = "30,720";
