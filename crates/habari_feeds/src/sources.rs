//! Static registry of feed endpoints: African national outlets plus the
//! international sources that cover the continent. Loaded once and
//! immutable for the lifetime of the process.

use habari_core::{Category, SourceConfig};

fn source(
    id: &str,
    name: &str,
    feed_url: &str,
    country: &str,
    language: &str,
    default_category: Category,
    credibility: f32,
) -> SourceConfig {
    SourceConfig {
        id: id.to_string(),
        name: name.to_string(),
        feed_url: feed_url.to_string(),
        country: country.to_string(),
        language: language.to_string(),
        default_category,
        credibility,
    }
}

pub fn default_sources() -> Vec<SourceConfig> {
    use Category::{Business, General, Technology};

    vec![
        // International coverage
        source(
            "bbc_africa",
            "BBC Africa",
            "https://feeds.bbci.co.uk/news/world/africa/rss.xml",
            "international",
            "en",
            General,
            9.0,
        ),
        source(
            "aljazeera_africa",
            "Al Jazeera Africa",
            "https://www.aljazeera.com/xml/rss/all.xml",
            "international",
            "en",
            General,
            8.5,
        ),
        source(
            "africanews",
            "Africanews",
            "https://www.africanews.com/api/en/rss",
            "international",
            "en",
            General,
            7.5,
        ),
        // East Africa
        source(
            "daily_nation_kenya",
            "Daily Nation Kenya",
            "https://nation.africa/kenya/rss",
            "kenya",
            "en",
            General,
            7.5,
        ),
        source(
            "the_star_kenya",
            "The Star Kenya",
            "https://www.the-star.co.ke/feed/",
            "kenya",
            "en",
            General,
            7.0,
        ),
        source(
            "daily_monitor_uganda",
            "Daily Monitor",
            "https://www.monitor.co.ug/uganda?view=rssticker",
            "uganda",
            "en",
            General,
            7.5,
        ),
        source(
            "the_citizen_tz",
            "The Citizen",
            "https://www.thecitizen.co.tz/tanzania?view=rssticker",
            "tanzania",
            "en",
            General,
            7.0,
        ),
        source(
            "new_times_rwanda",
            "The New Times",
            "https://www.newtimes.co.rw/rss/all",
            "rwanda",
            "en",
            General,
            7.0,
        ),
        source(
            "capital_ethiopia",
            "Capital Ethiopia",
            "https://capitalethiopia.com/feed/",
            "ethiopia",
            "en",
            Business,
            7.0,
        ),
        // West Africa
        source(
            "punch_nigeria",
            "The Punch Nigeria",
            "https://punchng.com/feed/",
            "nigeria",
            "en",
            General,
            7.5,
        ),
        source(
            "vanguard_nigeria",
            "Vanguard Nigeria",
            "https://www.vanguardngr.com/feed/",
            "nigeria",
            "en",
            General,
            7.0,
        ),
        source(
            "premium_times_nigeria",
            "Premium Times Nigeria",
            "https://www.premiumtimesng.com/feed",
            "nigeria",
            "en",
            General,
            8.0,
        ),
        source(
            "guardian_nigeria",
            "The Guardian Nigeria",
            "https://guardian.ng/feed/",
            "nigeria",
            "en",
            General,
            7.5,
        ),
        source(
            "graphic_ghana",
            "Daily Graphic Ghana",
            "https://www.graphic.com.gh/rss/news.xml",
            "ghana",
            "en",
            General,
            7.0,
        ),
        source(
            "myjoyonline_ghana",
            "MyJoyOnline Ghana",
            "https://www.myjoyonline.com/feed/",
            "ghana",
            "en",
            General,
            7.0,
        ),
        source(
            "seneweb_senegal",
            "Seneweb",
            "https://www.seneweb.com/news/rss.php",
            "senegal",
            "fr",
            General,
            6.5,
        ),
        // Southern Africa
        source(
            "news24_south_africa",
            "News24 South Africa",
            "https://feeds.news24.com/articles/news24/rss",
            "south-africa",
            "en",
            General,
            7.5,
        ),
        source(
            "mail_and_guardian",
            "Mail & Guardian",
            "https://mg.co.za/feed/",
            "south-africa",
            "en",
            General,
            8.0,
        ),
        source(
            "daily_maverick",
            "Daily Maverick",
            "https://www.dailymaverick.co.za/dmrss/",
            "south-africa",
            "en",
            General,
            8.0,
        ),
        source(
            "herald_zimbabwe",
            "The Herald Zimbabwe",
            "https://www.herald.co.zw/feed/",
            "zimbabwe",
            "en",
            General,
            6.0,
        ),
        // North Africa
        source(
            "egypt_independent",
            "Egypt Independent",
            "https://www.egyptindependent.com/feed/",
            "egypt",
            "en",
            General,
            7.5,
        ),
        source(
            "morocco_world_news",
            "Morocco World News",
            "https://www.moroccoworldnews.com/feed/",
            "morocco",
            "en",
            General,
            6.5,
        ),
        source(
            "tunis_afrique_presse",
            "Tunis Afrique Presse",
            "https://www.tap.info.tn/en?format=feed&type=rss",
            "tunisia",
            "en",
            General,
            7.0,
        ),
        // Business and technology
        source(
            "african_business",
            "African Business",
            "https://african.business/feed",
            "international",
            "en",
            Business,
            8.0,
        ),
        source(
            "techcabal",
            "TechCabal",
            "https://techcabal.com/feed/",
            "nigeria",
            "en",
            Technology,
            8.5,
        ),
        source(
            "techpoint_africa",
            "TechPoint Africa",
            "https://techpoint.africa/feed/",
            "nigeria",
            "en",
            Technology,
            7.5,
        ),
        source(
            "disrupt_africa",
            "Disrupt Africa",
            "https://disrupt-africa.com/feed/",
            "international",
            "en",
            Technology,
            7.5,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_source_ids_are_unique() {
        let sources = default_sources();
        let ids: HashSet<_> = sources.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids.len(), sources.len());
    }

    #[test]
    fn test_credibility_in_range() {
        for source in default_sources() {
            assert!(
                (0.0..=10.0).contains(&source.credibility),
                "credibility out of range for {}",
                source.id
            );
        }
    }

    #[test]
    fn test_feed_urls_are_absolute() {
        for source in default_sources() {
            assert!(source.feed_url.starts_with("http"), "bad url for {}", source.id);
        }
    }
}
