/// Static sector mapping for NSE-listed symbols, used to enrich holdings.
///
/// Exchange qualifiers after a dash ("TCS-EQ") are stripped before lookup;
/// unknown symbols resolve to "Other". Total, never fails.
pub fn sector_of(symbol: &str) -> &'static str {
    let base = symbol.split('-').next().unwrap_or(symbol);
    match base {
        // IT services
        "TCS" | "INFY" | "HCLTECH" | "WIPRO" | "TECHM" | "LTIM" | "TATATECH" => "IT Services",

        // Banks, private and PSU
        "HDFCBANK" | "ICICIBANK" | "KOTAKBANK" | "AXISBANK" | "INDUSINDBK" | "CUB"
        | "IDFCFIRSTB" | "SBIN" | "PNB" | "BANKBARODA" => "Banking",

        // Finance and NBFC
        "BAJFINANCE" | "BAJAJFINSV" | "ARMANFIN" | "SBICARD" | "JIOFIN" | "IREDA" => "Finance",
        "SBILIFE" | "HDFCLIFE" => "Insurance",

        // Oil, gas and energy
        "RELIANCE" | "ONGC" | "BPCL" | "IOC" => "Energy",
        "POWERGRID" | "NTPC" | "ADANIGREEN" => "Power",

        // FMCG
        "HINDUNILVR" | "ITC" | "NESTLEIND" | "BRITANNIA" | "TATACONSUM" | "DABUR" => "FMCG",

        // Auto
        "MARUTI" | "TATAMOTORS" | "M&M" | "EICHERMOT" | "HEROMOTOCO" => "Automobile",

        // Metals and mining
        "TATASTEEL" | "HINDALCO" | "JSWSTEEL" => "Metals",
        "COALINDIA" => "Mining",

        // Infra and construction
        "LT" => "Construction",
        "ULTRACEMCO" => "Cement",
        "ADANIENT" => "Diversified",
        "ADANIPORTS" => "Infrastructure",
        "CGPOWER" => "Engineering",

        // Pharma
        "SUNPHARMA" | "DRREDDY" | "CIPLA" | "DIVISLAB" => "Pharma",

        // Telecom
        "BHARTIARTL" | "TATACOMM" => "Telecom",

        // Consumer discretionary
        "TITAN" => "Consumer Durables",
        "ASIANPAINT" | "INDIGOPNTS" => "Paints",
        "PVRINOX" => "Media & Entertainment",

        // ETFs and funds
        "NIFTYBEES" | "ITBEES" | "MID150BEES" | "SENSEXBEES" => "ETF",
        "LIQUIDCASE" => "Liquid Fund",

        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_symbols_resolve() {
        assert_eq!(sector_of("TCS"), "IT Services");
        assert_eq!(sector_of("HDFCBANK"), "Banking");
        assert_eq!(sector_of("RELIANCE"), "Energy");
    }

    #[test]
    fn exchange_suffix_is_stripped() {
        assert_eq!(sector_of("TCS-EQ"), "IT Services");
        assert_eq!(sector_of("SBIN-BE"), "Banking");
    }

    #[test]
    fn unknown_symbols_default_to_other() {
        assert_eq!(sector_of("ZZZUNKNOWN"), "Other");
        assert_eq!(sector_of(""), "Other");
    }
}
