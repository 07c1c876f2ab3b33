//! Investment personas shown next to the risk profile.

use serde::Serialize;

/// Share of a portfolio in one asset class
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub asset_class: &'static str,
    pub percent: u8,
}

const fn alloc(asset_class: &'static str, percent: u8) -> Allocation {
    Allocation {
        asset_class,
        percent,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub style: &'static str,
    pub motto: &'static str,
    pub allocations: &'static [Allocation],
}

static CATALOG: [Persona; 4] = [
    Persona {
        id: "warren-buffett",
        name: "Warren Buffett",
        style: "Long-term value investor",
        motto: "Patience & Proven Strategies",
        allocations: &[
            alloc("Equities (blue-chip stocks, dividend ETFs)", 70),
            alloc("Bonds", 15),
            alloc("Commodities (agriculture, precious metals)", 10),
            alloc("Cash", 5),
        ],
    },
    Persona {
        id: "elon-musk",
        name: "Elon Musk",
        style: "Disruptive, tech-focused growth investor",
        motto: "Bet on the Future",
        allocations: &[
            alloc("Tech equities", 50),
            alloc("Cryptocurrencies", 20),
            alloc("Tech-related commodities (lithium ETFs)", 10),
            alloc("Alternative investments", 15),
            alloc("Bonds", 5),
        ],
    },
    Persona {
        id: "to-the-moon-genz",
        name: "To the Moon GenZ",
        style: "High-risk, meme-driven speculator",
        motto: "Sky’s the Limit – Ride the Wave!",
        allocations: &[
            alloc("Trending/meme stocks", 30),
            alloc("Cryptocurrencies (including meme coins)", 40),
            alloc("Safe commodities", 10),
            alloc("Speculative assets (NFTs, gaming stocks)", 15),
            alloc("Cash", 5),
        ],
    },
    Persona {
        id: "jim-cramer",
        name: "Jim Cramer",
        style: "Active, momentum trader",
        motto: "Bold Moves with a Safety Net",
        allocations: &[
            alloc("Blue-chip/momentum equities", 60),
            alloc("Bonds", 10),
            alloc("Commodities (precious metals, energy)", 10),
            alloc("Cryptocurrencies", 10),
            alloc("Cash", 10),
        ],
    },
];

impl Persona {
    pub fn all() -> &'static [Persona] {
        &CATALOG
    }

    pub fn find(id: &str) -> Option<&'static Persona> {
        CATALOG.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn total_percent(&self) -> u32 {
        self.allocations.iter().map(|a| u32::from(a.percent)).sum()
    }
}
