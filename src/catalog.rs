//! Indicator listing: which registry names are indicators, and how they
//! group into the TA-Lib function categories.

use crate::talib::IndicatorRegistry;

/// Library plumbing that can sit in a registry without being an indicator
pub const EXCLUDED_NAMES: &[&str] = &[
    "available",
    "check_available",
    "methods",
    "name",
    "new",
    "version",
];

/// How a category claims its members
#[derive(Debug, Clone, Copy)]
pub enum Membership {
    Names(&'static [&'static str]),
    Prefix(&'static str),
}

impl Membership {
    fn matches(&self, name: &str) -> bool {
        match self {
            Membership::Names(names) => names.contains(&name),
            Membership::Prefix(prefix) => name.starts_with(prefix),
        }
    }
}

pub const OTHER: &str = "Other";

/// Categories in display order; a name belongs to the first one that claims it
pub const CATEGORIES: &[(&str, Membership)] = &[
    (
        "Overlap Studies (Moving Averages & Bands)",
        Membership::Names(&[
            "sma", "ema", "wma", "dema", "tema", "trima", "kama", "mama", "t3", "ma", "mavp",
            "bbands",
        ]),
    ),
    (
        "Momentum Indicators",
        Membership::Names(&[
            "adx", "adxr", "apo", "aroon", "aroonosc", "bop", "cci", "cmo", "dx", "macd",
            "macdext", "macdfix", "mfi", "minus_di", "minus_dm", "mom", "plus_di", "plus_dm",
            "ppo", "roc", "rocp", "rocr", "rocr100", "rsi", "stoch", "stochf", "stochrsi",
            "trix", "ultosc", "willr",
        ]),
    ),
    ("Volume Indicators", Membership::Names(&["ad", "adosc", "obv"])),
    ("Volatility Indicators", Membership::Names(&["atr", "natr", "trange"])),
    (
        "Price Transform",
        Membership::Names(&["avgprice", "medprice", "typprice", "wclprice"]),
    ),
    ("Cycle Indicators", Membership::Prefix("ht_")),
    ("Pattern Recognition (Candlestick)", Membership::Prefix("cdl_")),
    (
        "Statistic Functions",
        Membership::Names(&[
            "beta", "correl", "linearreg", "linearreg_angle", "linearreg_intercept",
            "linearreg_slope", "stddev", "tsf", "var",
        ]),
    ),
    (
        "Math Transform",
        Membership::Names(&[
            "accbands", "acos", "asin", "atan", "ceil", "cos", "cosh", "exp", "floor", "ln",
            "log10", "sin", "sinh", "sqrt", "tan", "tanh", "sar", "sarext",
        ]),
    ),
    (OTHER, Membership::Names(&["imi", "midpoint", "midprice"])),
];

/// Every indicator name the registry exposes, sorted
pub fn available_indicators(registry: &IndicatorRegistry) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = registry
        .names()
        .filter(|name| !EXCLUDED_NAMES.contains(name))
        .collect();
    names.sort_unstable();
    names
}

/// Name of the category `name` belongs to; unclaimed names land in "Other"
pub fn category_of(name: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|(_, membership)| membership.matches(name))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER)
}

/// Group `names` by category, in category order, dropping empty categories
pub fn categorize<'a>(names: &[&'a str]) -> Vec<(&'static str, Vec<&'a str>)> {
    CATEGORIES
        .iter()
        .map(|(category, _)| {
            let members = names
                .iter()
                .copied()
                .filter(|name| category_of(name) == *category)
                .collect::<Vec<_>>();
            (*category, members)
        })
        .filter(|(_, members)| !members.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::talib::IndicatorOutput;

    #[test]
    fn test_category_rules() {
        assert_eq!(category_of("sma"), "Overlap Studies (Moving Averages & Bands)");
        assert_eq!(category_of("rsi"), "Momentum Indicators");
        assert_eq!(category_of("ht_trendline"), "Cycle Indicators");
        assert_eq!(category_of("cdl_doji"), "Pattern Recognition (Candlestick)");
        assert_eq!(category_of("sarext"), "Math Transform");
        assert_eq!(category_of("midpoint"), OTHER);
        assert_eq!(category_of("something_new"), OTHER);
    }

    #[test]
    fn test_every_name_in_exactly_one_group() {
        let names = available_indicators(&IndicatorRegistry::talib());
        let groups = categorize(&names);

        let mut seen: Vec<&str> = groups.iter().flat_map(|(_, m)| m.iter().copied()).collect();
        seen.sort_unstable();
        assert_eq!(seen, names);
    }

    #[test]
    fn test_empty_categories_omitted() {
        let groups = categorize(&["sma", "unknown_thing"]);
        let titles: Vec<_> = groups.iter().map(|(t, _)| *t).collect();
        assert_eq!(titles, vec!["Overlap Studies (Moving Averages & Bands)", OTHER]);
        assert!(groups.iter().all(|(_, m)| !m.is_empty()));
    }

    #[test]
    fn test_plumbing_names_excluded() {
        let mut registry = IndicatorRegistry::new();
        registry
            .register("sma", |_| Ok(IndicatorOutput::Scalar(0.0)))
            .register("available", |_| Ok(IndicatorOutput::Scalar(0.0)))
            .register("version", |_| Ok(IndicatorOutput::Scalar(0.0)));
        assert_eq!(available_indicators(&registry), vec!["sma"]);
    }

    #[test]
    fn test_talib_registry_has_no_plumbing() {
        let registry = IndicatorRegistry::talib();
        assert_eq!(available_indicators(&registry).len(), registry.len());
    }
}
