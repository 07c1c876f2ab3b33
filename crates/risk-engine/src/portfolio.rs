//! Starter portfolio suggested from verification and wallet results.

use serde::{Deserialize, Serialize};

/// One suggested holding
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAsset {
    pub name: String,
    pub allocation: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub assets: Vec<PortfolioAsset>,

    /// Sum of every asset's allocation
    pub total_investment: u32,
}

/// What the builder looks at
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioInputs {
    /// Outcome of the Twitter/X verification
    #[serde(default)]
    pub twitter_verified: bool,

    /// Token symbols held by the wallet
    #[serde(default)]
    pub tokens: Vec<String>,
}

const TWITTER_STOCKS: u32 = 20;
const ETHEREUM: u32 = 30;

impl PortfolioInputs {
    fn holds(&self, symbol: &str) -> bool {
        self.tokens.iter().any(|t| t.trim().eq_ignore_ascii_case(symbol))
    }
}

/// Build the suggestion; an empty portfolio is a valid answer
pub fn build_portfolio(inputs: &PortfolioInputs) -> Portfolio {
    let mut assets = Vec::new();

    if inputs.twitter_verified {
        assets.push(PortfolioAsset {
            name: "Twitter Stocks".into(),
            allocation: TWITTER_STOCKS,
        });
    }
    if inputs.holds("ETH") {
        assets.push(PortfolioAsset {
            name: "Ethereum".into(),
            allocation: ETHEREUM,
        });
    }

    let total_investment = assets.iter().map(|a| a.allocation).sum();
    Portfolio {
        assets,
        total_investment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(twitter_verified: bool, tokens: &[&str]) -> PortfolioInputs {
        PortfolioInputs {
            twitter_verified,
            tokens: tokens.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_verified_eth_holder() {
        let portfolio = build_portfolio(&inputs(true, &["USDC", "ETH"]));
        let names: Vec<_> = portfolio.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Twitter Stocks", "Ethereum"]);
        assert_eq!(portfolio.total_investment, 50);
    }

    #[test]
    fn test_single_source() {
        assert_eq!(build_portfolio(&inputs(true, &[])).total_investment, 20);

        let portfolio = build_portfolio(&inputs(false, &[" eth "]));
        assert_eq!(portfolio.assets.len(), 1);
        assert_eq!(portfolio.total_investment, 30);
    }

    #[test]
    fn test_nothing_qualifies() {
        let portfolio = build_portfolio(&inputs(false, &["WETH", "BTC"]));
        assert_eq!(portfolio, Portfolio::default());
    }

    #[test]
    fn test_json_shape() {
        let parsed: PortfolioInputs = serde_json::from_str(r#"{"twitterVerified": true}"#).unwrap();
        assert!(parsed.tokens.is_empty());

        let json = serde_json::to_value(build_portfolio(&parsed)).unwrap();
        assert_eq!(json["totalInvestment"], 20);
        assert_eq!(json["assets"][0]["allocation"], 20);
    }
}
