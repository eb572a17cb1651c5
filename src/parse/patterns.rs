//! Lookup tables shared by the receipt and voice parsers
//!
//! All tables are ordered and matched first-hit-wins against lowercased
//! text, so more specific entries must come before general ones.

use crate::models::Category;

/// A known merchant: a lowercase substring to look for, the canonical
/// display name and the category it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MerchantPattern {
    pub pattern: &'static str,
    pub name: &'static str,
    pub category: Category,
}

const fn merchant(pattern: &'static str, name: &'static str, category: Category) -> MerchantPattern {
    MerchantPattern {
        pattern,
        name,
        category,
    }
}

/// Known merchants in match order
pub const MERCHANTS: &[MerchantPattern] = &[
    // Coffee and fast food
    merchant("starbucks", "Starbucks", Category::FoodAndDrink),
    merchant("mcdonald", "McDonald's", Category::FoodAndDrink),
    merchant("subway", "Subway", Category::FoodAndDrink),
    merchant("dunkin", "Dunkin'", Category::FoodAndDrink),
    merchant("chipotle", "Chipotle", Category::FoodAndDrink),
    merchant("taco bell", "Taco Bell", Category::FoodAndDrink),
    merchant("burger king", "Burger King", Category::FoodAndDrink),
    merchant("wendy", "Wendy's", Category::FoodAndDrink),
    merchant("chick-fil-a", "Chick-fil-A", Category::FoodAndDrink),
    merchant("panera", "Panera Bread", Category::FoodAndDrink),
    merchant("kfc", "KFC", Category::FoodAndDrink),
    merchant("pizza hut", "Pizza Hut", Category::FoodAndDrink),
    merchant("domino", "Domino's", Category::FoodAndDrink),
    merchant("papa john", "Papa John's", Category::FoodAndDrink),
    merchant("five guys", "Five Guys", Category::FoodAndDrink),
    merchant("panda express", "Panda Express", Category::FoodAndDrink),
    merchant("popeyes", "Popeyes", Category::FoodAndDrink),
    merchant("sonic", "Sonic", Category::FoodAndDrink),
    merchant("dairy queen", "Dairy Queen", Category::FoodAndDrink),
    merchant("tim horton", "Tim Hortons", Category::FoodAndDrink),

    // Big box and grocery
    merchant("walmart", "Walmart", Category::Shopping),
    merchant("target", "Target", Category::Shopping),
    merchant("costco", "Costco", Category::Shopping),
    merchant("whole foods", "Whole Foods", Category::FoodAndDrink),
    merchant("trader joe", "Trader Joe's", Category::FoodAndDrink),
    merchant("kroger", "Kroger", Category::FoodAndDrink),
    merchant("safeway", "Safeway", Category::FoodAndDrink),
    merchant("publix", "Publix", Category::FoodAndDrink),
    merchant("aldi", "ALDI", Category::FoodAndDrink),
    merchant("wegmans", "Wegmans", Category::FoodAndDrink),
    merchant("heb", "H-E-B", Category::FoodAndDrink),
    merchant("food lion", "Food Lion", Category::FoodAndDrink),
    merchant("albertsons", "Albertsons", Category::FoodAndDrink),
    merchant("sprouts", "Sprouts", Category::FoodAndDrink),

    // Online and electronics
    merchant("amazon", "Amazon", Category::Shopping),
    merchant("apple", "Apple", Category::Shopping),
    merchant("best buy", "Best Buy", Category::Shopping),
    merchant("microsoft", "Microsoft", Category::Shopping),
    merchant("ebay", "eBay", Category::Shopping),

    // Fuel and rides
    merchant("uber", "Uber", Category::Transport),
    merchant("lyft", "Lyft", Category::Transport),
    merchant("shell", "Shell Gas", Category::Transport),
    merchant("chevron", "Chevron Gas", Category::Transport),
    merchant("exxon", "Exxon", Category::Transport),
    merchant("mobil", "Mobil", Category::Transport),
    merchant("bp", "BP Gas", Category::Transport),
    merchant("speedway", "Speedway", Category::Transport),
    merchant("circle k", "Circle K", Category::Transport),
    merchant("7-eleven", "7-Eleven", Category::Transport),
    merchant("wawa", "Wawa", Category::Transport),

    // Pharmacies and care
    merchant("cvs", "CVS Pharmacy", Category::Health),
    merchant("walgreens", "Walgreens", Category::Health),
    merchant("rite aid", "Rite Aid", Category::Health),
    merchant("pharmacy", "Pharmacy", Category::Health),
    merchant("doctor", "Doctor Visit", Category::Health),
    merchant("hospital", "Hospital", Category::Health),
    merchant("clinic", "Clinic", Category::Health),

    // Streaming, cinemas and games
    merchant("netflix", "Netflix", Category::Entertainment),
    merchant("spotify", "Spotify", Category::Entertainment),
    merchant("disney", "Disney+", Category::Entertainment),
    merchant("hulu", "Hulu", Category::Entertainment),
    merchant("hbo", "HBO Max", Category::Entertainment),
    merchant("youtube", "YouTube", Category::Entertainment),
    merchant("twitch", "Twitch", Category::Entertainment),
    merchant("amc", "AMC Theaters", Category::Entertainment),
    merchant("regal", "Regal Cinemas", Category::Entertainment),
    merchant("steam", "Steam", Category::Entertainment),
    merchant("playstation", "PlayStation", Category::Entertainment),
    merchant("xbox", "Xbox", Category::Entertainment),
    merchant("nintendo", "Nintendo", Category::Entertainment),

    // Retail and home
    merchant("home depot", "Home Depot", Category::Shopping),
    merchant("ikea", "IKEA", Category::Shopping),
    merchant("lowe", "Lowe's", Category::Shopping),
    merchant("bed bath", "Bed Bath & Beyond", Category::Shopping),
    merchant("macy", "Macy's", Category::Shopping),
    merchant("nordstrom", "Nordstrom", Category::Shopping),
    merchant("tjmaxx", "TJ Maxx", Category::Shopping),
    merchant("marshalls", "Marshalls", Category::Shopping),
    merchant("ross", "Ross", Category::Shopping),
    merchant("sephora", "Sephora", Category::Shopping),
    merchant("ulta", "Ulta Beauty", Category::Shopping),
    merchant("nike", "Nike", Category::Shopping),
    merchant("adidas", "Adidas", Category::Shopping),
    merchant("gap", "Gap", Category::Shopping),
    merchant("old navy", "Old Navy", Category::Shopping),
    merchant("h&m", "H&M", Category::Shopping),
    merchant("zara", "Zara", Category::Shopping),
    merchant("uniqlo", "Uniqlo", Category::Shopping),
    merchant("dollar tree", "Dollar Tree", Category::Shopping),
    merchant("dollar general", "Dollar General", Category::Shopping),
    merchant("family dollar", "Family Dollar", Category::Shopping),

    // Household bills
    merchant("electric", "Electric Bill", Category::Bills),
    merchant("water bill", "Water Bill", Category::Bills),
    merchant("internet", "Internet Bill", Category::Bills),
    merchant("phone bill", "Phone Bill", Category::Bills),
    merchant("insurance", "Insurance", Category::Bills),
    merchant("rent", "Rent", Category::Bills),
    merchant("mortgage", "Mortgage", Category::Bills),
];

/// A group of keywords that together point at one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordGroup {
    pub keywords: &'static [&'static str],
    pub category: Category,
}

impl KeywordGroup {
    /// Whether any keyword occurs in `haystack` (already lowercased)
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k))
    }
}

/// Category keywords for receipts, used when no merchant matched
pub const RECEIPT_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["restaurant", "cafe", "coffee", "food", "pizza", "burger", "sushi"],
        category: Category::FoodAndDrink,
    },
    KeywordGroup {
        keywords: &["grocery", "supermarket", "market"],
        category: Category::FoodAndDrink,
    },
    KeywordGroup {
        keywords: &["gas", "fuel", "parking", "taxi", "uber", "lyft", "transit"],
        category: Category::Transport,
    },
    KeywordGroup {
        keywords: &["pharmacy", "hospital", "clinic", "medical", "health"],
        category: Category::Health,
    },
    KeywordGroup {
        keywords: &["movie", "cinema", "theater", "concert", "game"],
        category: Category::Entertainment,
    },
    KeywordGroup {
        keywords: &["electric", "water", "internet", "phone", "utility"],
        category: Category::Bills,
    },
    KeywordGroup {
        keywords: &["store", "shop", "mall", "retail", "clothing"],
        category: Category::Shopping,
    },
];

/// Category keywords for voice transcriptions
pub const VOICE_KEYWORDS: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["food", "lunch", "dinner", "breakfast", "coffee", "restaurant"],
        category: Category::FoodAndDrink,
    },
    KeywordGroup {
        keywords: &["uber", "lyft", "taxi", "gas", "transport"],
        category: Category::Transport,
    },
    KeywordGroup {
        keywords: &["shopping", "store", "amazon"],
        category: Category::Shopping,
    },
    KeywordGroup {
        keywords: &["movie", "netflix", "entertainment"],
        category: Category::Entertainment,
    },
];

/// First merchant whose pattern occurs in `haystack` (already lowercased)
pub fn find_merchant(haystack: &str) -> Option<&'static MerchantPattern> {
    MERCHANTS.iter().find(|m| haystack.contains(m.pattern))
}

/// Category of the first matching keyword group, or `Other`
pub fn categorize(groups: &[KeywordGroup], haystack: &str) -> Category {
    groups
        .iter()
        .find(|g| g.matches(haystack))
        .map(|g| g.category)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_are_lowercase() {
        for m in MERCHANTS {
            assert_eq!(m.pattern, m.pattern.to_lowercase(), "{}", m.name);
        }
        for group in RECEIPT_KEYWORDS.iter().chain(VOICE_KEYWORDS) {
            for k in group.keywords {
                assert_eq!(*k, k.to_lowercase());
            }
        }
    }

    #[test]
    fn test_no_merchant_falls_back_to_other() {
        for m in MERCHANTS {
            assert_ne!(m.category, Category::Other);
        }
    }

    #[test]
    fn test_find_merchant_first_wins() {
        // "uber" is listed before "rent"
        let hit = find_merchant("uber trip to rent office").unwrap();
        assert_eq!(hit.name, "Uber");

        assert!(find_merchant("corner deli").is_none());
    }

    #[test]
    fn test_categorize_first_group_wins() {
        // "coffee" (food) and "shop" (shopping) both match; food is declared first
        assert_eq!(categorize(RECEIPT_KEYWORDS, "coffee shop"), Category::FoodAndDrink);
        assert_eq!(categorize(RECEIPT_KEYWORDS, "city parking"), Category::Transport);
        assert_eq!(categorize(RECEIPT_KEYWORDS, "nothing here"), Category::Other);
        assert_eq!(categorize(VOICE_KEYWORDS, "took a taxi"), Category::Transport);
    }
}
