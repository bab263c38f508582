//! Pure text-analysis over article titles and descriptions: category,
//! country focus, breaking flag and engagement score. All functions are
//! deterministic and side-effect free, so they can run per article in
//! any order.

use crate::types::Category;

/// Engagement score above which an article counts as trending.
pub const TRENDING_THRESHOLD: f32 = 7.0;

const BASE_SCORE: f32 = 5.0;
const MAX_SCORE: f32 = 10.0;

const TECH_KEYWORDS: &[&str] = &[
    "technology", "tech", "digital", "ai", "artificial intelligence",
    "startup", "fintech", "mobile", "internet", "software", "app",
];

const BUSINESS_KEYWORDS: &[&str] = &[
    "business", "economy", "economic", "market", "trade", "investment",
    "finance", "bank", "money", "gdp", "inflation", "currency",
];

const POLITICS_KEYWORDS: &[&str] = &[
    "politics", "political", "government", "president", "minister",
    "election", "vote", "parliament", "policy", "law", "constitution",
];

const SPORTS_KEYWORDS: &[&str] = &[
    "sports", "sport", "football", "soccer", "athletics", "olympics",
    "world cup", "match", "player", "team", "coach", "tournament",
];

const HEALTH_KEYWORDS: &[&str] = &[
    "health", "medical", "hospital", "disease", "vaccine", "covid",
    "doctor", "medicine", "healthcare", "pandemic", "virus",
];

const BREAKING_KEYWORDS: &[&str] = &[
    "breaking", "urgent", "just in", "developing", "live",
    "emergency", "crisis", "attack", "explosion", "death",
];

const ENGAGEMENT_KEYWORDS: &[&str] = &[
    "breaking", "urgent", "exclusive", "major", "significant",
    "important", "crisis", "emergency", "historic", "unprecedented",
];

/// Country name, demonym and major-city keywords for country-focus
/// detection. Matching is substring containment over the lowercased
/// title + description.
const COUNTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("nigeria", &["nigeria", "nigerian", "lagos", "abuja", "kano"]),
    ("kenya", &["kenya", "kenyan", "nairobi", "mombasa", "kisumu"]),
    ("south-africa", &["south africa", "south african", "johannesburg", "cape town", "durban", "pretoria"]),
    ("ghana", &["ghana", "ghanaian", "accra", "kumasi", "tamale"]),
    ("ethiopia", &["ethiopia", "ethiopian", "addis ababa", "dire dawa"]),
    ("uganda", &["uganda", "ugandan", "kampala", "entebbe"]),
    ("tanzania", &["tanzania", "tanzanian", "dar es salaam", "dodoma"]),
    ("egypt", &["egypt", "egyptian", "cairo", "alexandria"]),
    ("morocco", &["morocco", "moroccan", "casablanca", "rabat", "marrakech"]),
    ("tunisia", &["tunisia", "tunisian", "tunis"]),
    ("algeria", &["algeria", "algerian", "algiers"]),
    ("zimbabwe", &["zimbabwe", "zimbabwean", "harare", "bulawayo"]),
    ("zambia", &["zambia", "zambian", "lusaka"]),
    ("botswana", &["botswana", "gaborone"]),
    ("rwanda", &["rwanda", "rwandan", "kigali"]),
    ("senegal", &["senegal", "senegalese", "dakar"]),
    ("ivory-coast", &["ivory coast", "cote d'ivoire", "abidjan", "yamoussoukro"]),
    ("cameroon", &["cameroon", "cameroonian", "yaounde", "douala"]),
    ("mali", &["mali", "malian", "bamako"]),
    ("burkina-faso", &["burkina faso", "ouagadougou"]),
    ("niger", &["niger", "niamey"]),
    ("chad", &["chad", "chadian", "n'djamena"]),
    ("sudan", &["sudan", "sudanese", "khartoum"]),
    ("south-sudan", &["south sudan", "juba"]),
    ("somalia", &["somalia", "somali", "mogadishu"]),
    ("djibouti", &["djibouti"]),
    ("eritrea", &["eritrea", "eritrean", "asmara"]),
    ("libya", &["libya", "libyan", "tripoli", "benghazi"]),
    ("madagascar", &["madagascar", "antananarivo"]),
    ("mauritius", &["mauritius", "port louis"]),
    ("seychelles", &["seychelles", "victoria"]),
    ("comoros", &["comoros", "moroni"]),
    ("cape-verde", &["cape verde", "praia"]),
    ("sao-tome", &["sao tome", "principe"]),
    ("equatorial-guinea", &["equatorial guinea", "malabo"]),
    ("gabon", &["gabon", "libreville"]),
    ("republic-congo", &["republic of congo", "brazzaville"]),
    ("drc", &["democratic republic", "drc", "kinshasa"]),
    ("car", &["central african republic", "bangui"]),
    ("angola", &["angola", "angolan", "luanda"]),
    ("namibia", &["namibia", "namibian", "windhoek"]),
    ("lesotho", &["lesotho", "maseru"]),
    ("swaziland", &["swaziland", "eswatini", "mbabane"]),
    ("malawi", &["malawi", "malawian", "lilongwe", "blantyre"]),
    ("mozambique", &["mozambique", "mozambican", "maputo"]),
    ("liberia", &["liberia", "liberian", "monrovia"]),
    ("sierra-leone", &["sierra leone", "freetown"]),
    ("guinea", &["guinea", "conakry"]),
    ("guinea-bissau", &["guinea-bissau", "bissau"]),
    ("gambia", &["gambia", "banjul"]),
    ("benin", &["benin", "porto-novo", "cotonou"]),
    ("togo", &["togo", "lome"]),
];

/// Countries assigned when an international source mentions no country
/// at all.
const DEFAULT_FOCUS: &[&str] = &["nigeria", "kenya", "south-africa", "ghana", "ethiopia"];

fn combined(title: &str, description: &str) -> String {
    format!("{} {}", title, description).to_lowercase()
}

fn matches_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

/// Derive the category from article text, in fixed priority order.
/// Falls back to the source's configured default when nothing matches.
pub fn categorize(title: &str, description: &str, default: Category) -> Category {
    let text = combined(title, description);

    if matches_any(&text, TECH_KEYWORDS) {
        Category::Technology
    } else if matches_any(&text, BUSINESS_KEYWORDS) {
        Category::Business
    } else if matches_any(&text, POLITICS_KEYWORDS) {
        Category::Politics
    } else if matches_any(&text, SPORTS_KEYWORDS) {
        Category::Sports
    } else if matches_any(&text, HEALTH_KEYWORDS) {
        Category::Health
    } else {
        default
    }
}

/// Every country whose keyword list matches is included, so
/// multi-country articles are possible. When nothing matches, the
/// source's own country is used, or the fixed high-traffic set for
/// international sources. The result is never empty.
pub fn country_focus(title: &str, description: &str, source_country: &str) -> Vec<String> {
    let text = combined(title, description);

    let mut countries: Vec<String> = COUNTRY_KEYWORDS
        .iter()
        .filter(|(_, keywords)| matches_any(&text, keywords))
        .map(|(country, _)| country.to_string())
        .collect();

    if countries.is_empty() {
        if source_country != "international" {
            countries.push(source_country.to_string());
        } else {
            countries.extend(DEFAULT_FOCUS.iter().map(|c| c.to_string()));
        }
    }

    countries
}

pub fn is_breaking(title: &str, description: &str) -> bool {
    matches_any(&combined(title, description), BREAKING_KEYWORDS)
}

/// Heuristic 0-10 engagement estimate: base 5.0, +2.0 for breaking news,
/// +0.5 per engagement keyword present, +0.5 for a title between 30 and
/// 80 characters, capped at 10.0.
pub fn engagement_score(title: &str, description: &str, breaking: bool) -> f32 {
    let mut score = BASE_SCORE;

    if breaking {
        score += 2.0;
    }

    let text = combined(title, description);
    for keyword in ENGAGEMENT_KEYWORDS {
        if text.contains(keyword) {
            score += 0.5;
        }
    }

    let title_len = title.chars().count();
    if (30..=80).contains(&title_len) {
        score += 0.5;
    }

    score.min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_priority_order() {
        // Mentions both a business and a politics keyword; business wins.
        assert_eq!(
            categorize("Bank reform vote delayed", "", Category::General),
            Category::Business
        );
        assert_eq!(
            categorize("New fintech startup launches", "", Category::General),
            Category::Technology
        );
        assert_eq!(
            categorize("Parliament passes new bill", "", Category::General),
            Category::Politics
        );
        assert_eq!(
            categorize("Football final this weekend", "", Category::General),
            Category::Sports
        );
        assert_eq!(
            categorize("Hospital opens new wing", "", Category::General),
            Category::Health
        );
    }

    #[test]
    fn test_categorize_falls_back_to_source_default() {
        assert_eq!(
            categorize("Yet another slow tuesday", "", Category::General),
            Category::General
        );
        assert_eq!(
            categorize("Yet another slow tuesday", "", Category::Sports),
            Category::Sports
        );
    }

    #[test]
    fn test_categorize_uses_description_too() {
        assert_eq!(
            categorize("Morning briefing", "the olympics open tomorrow", Category::General),
            Category::Sports
        );
    }

    #[test]
    fn test_country_focus_multiple_matches() {
        let focus = country_focus("Kenya and Ghana sign accord", "", "international");
        assert_eq!(focus, vec!["kenya".to_string(), "ghana".to_string()]);
    }

    #[test]
    fn test_country_focus_city_keyword() {
        let focus = country_focus("Protests reported in Nairobi", "", "international");
        assert_eq!(focus, vec!["kenya".to_string()]);
    }

    #[test]
    fn test_country_focus_falls_back_to_source_country() {
        let focus = country_focus("Quiet weekend expected", "", "zimbabwe");
        assert_eq!(focus, vec!["zimbabwe".to_string()]);
    }

    #[test]
    fn test_country_focus_international_default_set() {
        let focus = country_focus("Quiet weekend expected", "", "international");
        assert_eq!(focus.len(), 5);
        assert!(focus.contains(&"nigeria".to_string()));
        assert!(focus.contains(&"ethiopia".to_string()));
    }

    #[test]
    fn test_country_focus_never_empty() {
        for source_country in ["kenya", "international", "africa", ""] {
            assert!(!country_focus("", "", source_country).is_empty());
            assert!(!country_focus("???", "!!!", source_country).is_empty());
        }
    }

    #[test]
    fn test_is_breaking() {
        assert!(is_breaking("Breaking: floods hit coast", ""));
        assert!(is_breaking("Quiet morning", "a developing situation"));
        assert!(!is_breaking("Quiet morning in town", ""));
    }

    #[test]
    fn test_engagement_score_base() {
        assert_eq!(engagement_score("Short", "", false), 5.0);
    }

    #[test]
    fn test_engagement_score_stacks_signals() {
        // breaking (+2.0), keywords "breaking" + "major" + "crisis" (+1.5),
        // title shorter than 30 chars so no length bonus
        assert_eq!(engagement_score("Breaking: major crisis", "", true), 8.5);
    }

    #[test]
    fn test_engagement_score_title_length_bonus() {
        let title = "A headline of a comfortable middle length";
        assert_eq!(engagement_score(title, "", false), 5.5);
    }

    #[test]
    fn test_engagement_score_clamped_to_ten() {
        let loaded = "breaking urgent exclusive major significant important \
                      crisis emergency historic unprecedented";
        let score = engagement_score(loaded, loaded, true);
        assert_eq!(score, 10.0);
    }

    #[test]
    fn test_engagement_score_always_in_range() {
        for (title, description, breaking) in [
            ("", "", false),
            ("x", "y", true),
            ("breaking breaking breaking", "urgent urgent", true),
        ] {
            let score = engagement_score(title, description, breaking);
            assert!((0.0..=10.0).contains(&score));
        }
    }
}
