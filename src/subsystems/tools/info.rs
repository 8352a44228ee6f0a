//! Destination information providers: overview, weather, attractions,
//! travel tips and currency.

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;

use super::{NoteTable, ToolError, notes};

// ── Destination overview ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct DestinationInfo {
    pub destination: String,
    pub description: String,
    pub best_time_to_visit: &'static str,
    pub local_language: &'static str,
    pub time_zone: &'static str,
    pub visa_requirements: &'static str,
    pub emergency_contacts: &'static str,
    pub currency: &'static str,
    pub climate: &'static str,
}

pub fn destination_info(destination: &str) -> Result<DestinationInfo, ToolError> {
    Ok(DestinationInfo {
        destination: destination.to_string(),
        description: format!(
            "A wonderful destination with rich culture and history. {destination} offers visitors a unique blend of traditional and modern experiences."
        ),
        best_time_to_visit: "Spring and Fall are ideal for pleasant weather and fewer crowds",
        local_language: "Local language varies by region",
        time_zone: "Local timezone information",
        visa_requirements: "Check visa requirements based on your nationality - most countries require valid passport",
        emergency_contacts: "Emergency: 911 (or local equivalent), Tourist Police available",
        currency: "Local currency accepted, major credit cards widely accepted",
        climate: "Temperate climate with seasonal variations",
    })
}

// ── Weather ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DailyForecast {
    pub day: &'static str,
    pub high: &'static str,
    pub low: &'static str,
    pub condition: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherReport {
    pub destination: String,
    pub date: String,
    pub current_temperature: &'static str,
    pub temperature_range: &'static str,
    pub conditions: &'static str,
    pub humidity: &'static str,
    pub precipitation: &'static str,
    pub wind: &'static str,
    pub uv_index: &'static str,
    pub recommendations: &'static [&'static str],
    #[serde(rename = "7_day_forecast")]
    pub seven_day_forecast: &'static [DailyForecast],
}

const FORECAST: &[DailyForecast] = &[
    DailyForecast { day: "Today", high: "26°C", low: "18°C", condition: "Partly cloudy" },
    DailyForecast { day: "Tomorrow", high: "24°C", low: "17°C", condition: "Sunny" },
    DailyForecast { day: "Day 3", high: "25°C", low: "19°C", condition: "Light rain" },
    DailyForecast { day: "Day 4", high: "23°C", low: "16°C", condition: "Cloudy" },
    DailyForecast { day: "Day 5", high: "27°C", low: "20°C", condition: "Sunny" },
    DailyForecast { day: "Day 6", high: "25°C", low: "18°C", condition: "Partly cloudy" },
    DailyForecast { day: "Day 7", high: "24°C", low: "17°C", condition: "Sunny" },
];

/// Weather for `destination`; `date` falls back to `today` as `YYYY-MM-DD`.
pub fn weather_info(destination: &str, date: Option<&str>, today: NaiveDate) -> Result<WeatherReport, ToolError> {
    Ok(WeatherReport {
        destination: destination.to_string(),
        date: date
            .map(str::to_string)
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
        current_temperature: "22°C (72°F)",
        temperature_range: "18-26°C (64-79°F)",
        conditions: "Partly cloudy with occasional sunshine",
        humidity: "65%",
        precipitation: "20% chance of light rain",
        wind: "Light breeze 10-15 km/h",
        uv_index: "Moderate (5/10)",
        recommendations: &[
            "Pack light layers for temperature changes",
            "Bring a light rain jacket or umbrella",
            "Sunscreen recommended for outdoor activities",
            "Comfortable walking shoes are essential",
        ],
        seven_day_forecast: FORECAST,
    })
}

// ── Attractions ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Attraction {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: &'static str,
    pub rating: f32,
    pub description: &'static str,
    pub estimated_time: &'static str,
    pub cost: &'static str,
    pub opening_hours: &'static str,
    pub address: &'static str,
    pub highlights: &'static [&'static str],
}

impl Attraction {
    fn matches_interest(&self, interest: &str) -> bool {
        let interest = interest.to_lowercase();
        self.category.to_lowercase().contains(&interest)
            || self.kind.to_lowercase().contains(&interest)
            || self.description.to_lowercase().contains(&interest)
    }
}

const ATTRACTIONS: &[Attraction] = &[
    Attraction {
        name: "Historic City Center",
        kind: "Historical",
        category: "history",
        rating: 4.5,
        description: "Beautiful historic architecture and cultural sites dating back centuries",
        estimated_time: "2-3 hours",
        cost: "Free",
        opening_hours: "24/7 (outdoor)",
        address: "City Center District",
        highlights: &["Ancient architecture", "Walking tours", "Photo opportunities"],
    },
    Attraction {
        name: "National Art Museum",
        kind: "Cultural",
        category: "art",
        rating: 4.3,
        description: "Extensive collection of local and international art spanning multiple centuries",
        estimated_time: "2-3 hours",
        cost: "$15-25 per person",
        opening_hours: "9:00 AM - 6:00 PM (Closed Mondays)",
        address: "Museum District",
        highlights: &["Classical paintings", "Modern art", "Sculpture garden"],
    },
    Attraction {
        name: "Scenic Viewpoint",
        kind: "Nature",
        category: "nature",
        rating: 4.7,
        description: "Panoramic views of the city and surrounding landscape, perfect for sunrise/sunset",
        estimated_time: "1-2 hours",
        cost: "Free",
        opening_hours: "5:00 AM - 10:00 PM",
        address: "Hill District",
        highlights: &["City panorama", "Sunset views", "Photography"],
    },
    Attraction {
        name: "Central Food Market",
        kind: "Culinary",
        category: "food",
        rating: 4.4,
        description: "Bustling local market with authentic street food and local delicacies",
        estimated_time: "1-2 hours",
        cost: "$10-30 per meal",
        opening_hours: "7:00 AM - 9:00 PM",
        address: "Market Square",
        highlights: &["Local cuisine", "Fresh ingredients", "Cultural experience"],
    },
    Attraction {
        name: "Adventure Park",
        kind: "Recreation",
        category: "adventure",
        rating: 4.2,
        description: "Outdoor adventure activities including hiking trails and zip-lining",
        estimated_time: "Half day",
        cost: "$30-50 per person",
        opening_hours: "8:00 AM - 6:00 PM",
        address: "Forest District",
        highlights: &["Zip-lining", "Hiking trails", "Nature walks"],
    },
    Attraction {
        name: "Local Cultural Center",
        kind: "Cultural",
        category: "culture",
        rating: 4.1,
        description: "Learn about local traditions, customs, and cultural heritage",
        estimated_time: "1-2 hours",
        cost: "$8-15 per person",
        opening_hours: "10:00 AM - 5:00 PM",
        address: "Cultural District",
        highlights: &["Traditional crafts", "Cultural shows", "Local history"],
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct AttractionSearch {
    pub destination: String,
    pub interests_filter: Vec<String>,
    pub attractions: Vec<Attraction>,
    pub total_found: usize,
    pub categories_available: Vec<&'static str>,
    pub planning_tips: &'static [&'static str],
}

/// Attractions at `destination`, filtered to those matching any interest
/// (substring of category, type or description). No interests → all.
pub fn search_attractions(destination: &str, interests: &[String]) -> Result<AttractionSearch, ToolError> {
    let attractions: Vec<Attraction> = if interests.is_empty() {
        ATTRACTIONS.to_vec()
    } else {
        ATTRACTIONS
            .iter()
            .filter(|a| interests.iter().any(|i| a.matches_interest(i)))
            .copied()
            .collect()
    };

    let mut categories_available: Vec<&'static str> = ATTRACTIONS.iter().map(|a| a.category).collect();
    categories_available.sort_unstable();
    categories_available.dedup();

    Ok(AttractionSearch {
        destination: destination.to_string(),
        interests_filter: interests.to_vec(),
        total_found: attractions.len(),
        attractions,
        categories_available,
        planning_tips: &[
            "Book tickets in advance for popular attractions",
            "Check opening hours before visiting",
            "Consider purchasing city tourist passes for discounts",
            "Group nearby attractions for efficient touring",
        ],
    })
}

// ── Travel tips ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TravelTips {
    pub destination: String,
    pub cultural_tips: &'static [&'static str],
    pub safety_tips: &'static [&'static str],
    pub money_tips: &'static [&'static str],
    pub practical_tips: &'static [&'static str],
    pub communication: &'static [&'static str],
    pub health_and_wellness: &'static [&'static str],
}

pub fn travel_tips(destination: &str) -> Result<TravelTips, ToolError> {
    Ok(TravelTips {
        destination: destination.to_string(),
        cultural_tips: &[
            "Respect local customs and traditions",
            "Learn basic phrases in the local language (Hello, Thank you, Please, Excuse me)",
            "Dress appropriately for religious sites and cultural venues",
            "Remove shoes when entering homes or certain establishments",
            "Be patient and polite in all interactions",
            "Show interest in local culture and ask questions respectfully",
        ],
        safety_tips: &[
            "Keep copies of important documents (passport, visa, insurance)",
            "Store emergency contact information in multiple places",
            "Stay aware of your surroundings, especially in crowded areas",
            "Use reputable transportation services and official taxis",
            "Avoid displaying expensive items or large amounts of cash",
            "Trust your instincts and leave situations that feel unsafe",
            "Register with your embassy if staying for extended periods",
        ],
        money_tips: &[
            "Notify your bank of travel plans to avoid card blocks",
            "Keep cash in multiple locations (wallet, bag, hotel safe)",
            "Understand local tipping customs and practices",
            "Learn current exchange rates and common scams",
            "Use ATMs affiliated with major banks when possible",
            "Keep receipts for major purchases for tax refunds",
            "Budget extra for unexpected expenses and souvenirs",
        ],
        practical_tips: &[
            "Download offline maps and translation apps",
            "Pack a portable charger and universal adapter",
            "Research local transportation options and apps",
            "Learn about local dining etiquette and meal times",
            "Pack appropriate clothing for weather and activities",
            "Bring necessary medications with prescriptions",
            "Consider travel insurance for health and trip coverage",
        ],
        communication: &[
            "Download language translation apps",
            "Learn basic local phrases before arrival",
            "Carry hotel address written in local language",
            "Use gestures and patience when language barriers exist",
            "Tourist information centers usually have English speakers",
        ],
        health_and_wellness: &[
            "Check if vaccinations are required or recommended",
            "Bring a basic first aid kit",
            "Research local healthcare options",
            "Stay hydrated and eat safely prepared food",
            "Get adequate rest to avoid travel fatigue",
        ],
    })
}

// ── Currency ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct CurrencyInfo {
    pub country: String,
    pub currency_name: &'static str,
    pub currency_code: &'static str,
    pub symbol: &'static str,
    pub exchange_rate: &'static str,
    pub last_updated: String,
    pub payment_methods: NoteTable,
    pub atm_availability: NoteTable,
    pub tipping_culture: NoteTable,
    pub money_saving_tips: &'static [&'static str],
    pub budgeting_guidance: NoteTable,
}

pub fn currency_info(country: &str, now: DateTime<Local>) -> Result<CurrencyInfo, ToolError> {
    Ok(CurrencyInfo {
        country: country.to_string(),
        currency_name: "Local Currency",
        currency_code: "LC",
        symbol: "₤",
        exchange_rate: "1 USD = 1.20 LC (approximate - rates change daily)",
        last_updated: now.format("%Y-%m-%d %H:%M").to_string(),
        payment_methods: notes(&[
            ("cash", "Widely accepted, essential for small vendors and markets"),
            ("credit_cards", "Visa and Mastercard accepted at most hotels and restaurants"),
            ("debit_cards", "Accepted at ATMs and many establishments"),
            ("mobile_payments", "Apple Pay, Google Pay available in major cities"),
            ("traveler_checks", "Limited acceptance, not recommended"),
        ]),
        atm_availability: notes(&[
            ("urban_areas", "ATMs readily available in cities and towns"),
            ("rural_areas", "Limited availability, plan ahead"),
            ("fees", "Expect $3-5 withdrawal fees plus currency conversion"),
            ("daily_limits", "Usually $200-500 USD equivalent per day"),
        ]),
        tipping_culture: notes(&[
            ("restaurants", "10-15% for good service, sometimes included in bill"),
            ("taxis", "Round up fare or 10%"),
            ("hotels", "$1-2 per bag for porters, $2-5 per day for housekeeping"),
            ("tour_guides", "$5-10 per day per person"),
            ("general", "Not mandatory but appreciated for good service"),
        ]),
        money_saving_tips: &[
            "Use bank ATMs instead of currency exchange shops for better rates",
            "Pay in local currency when possible to avoid conversion fees",
            "Compare exchange rates at different locations",
            "Avoid airport currency exchanges (usually poor rates)",
            "Consider getting some local currency before departure",
        ],
        budgeting_guidance: notes(&[
            ("budget_traveler", "$30-50 per day"),
            ("mid_range", "$50-100 per day"),
            ("luxury", "$100+ per day"),
            ("categories", "Accommodation, food, transport, activities, shopping"),
        ]),
    })
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn destination_is_echoed_into_description() {
        let info = destination_info("Lisbon").unwrap();
        assert_eq!(info.destination, "Lisbon");
        assert!(info.description.contains("Lisbon offers visitors"));
    }

    #[test]
    fn weather_date_defaults_to_today() {
        let w = weather_info("Rome", None, today()).unwrap();
        assert_eq!(w.date, "2025-06-01");
        let w = weather_info("Rome", Some("june 12"), today()).unwrap();
        assert_eq!(w.date, "june 12");
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["7_day_forecast"].as_array().unwrap().len(), 7);
    }

    #[test]
    fn attractions_unfiltered_returns_all() {
        let r = search_attractions("Tokyo", &[]).unwrap();
        assert_eq!(r.total_found, 6);
        assert_eq!(
            r.categories_available,
            ["adventure", "art", "culture", "food", "history", "nature"]
        );
    }

    #[test]
    fn attractions_filter_matches_category_type_or_description() {
        let r = search_attractions("Tokyo", &["art".to_string()]).unwrap();
        let names: Vec<&str> = r.attractions.iter().map(|a| a.name).collect();
        assert!(names.contains(&"National Art Museum"));
        assert_eq!(r.total_found, names.len());

        let r = search_attractions("Tokyo", &["HIKING".to_string()]).unwrap();
        let names: Vec<&str> = r.attractions.iter().map(|a| a.name).collect();
        assert_eq!(names, ["Adventure Park"]);
    }

    #[test]
    fn attractions_with_unmatched_interest_is_empty_not_error() {
        let r = search_attractions("Tokyo", &["skiing".to_string()]).unwrap();
        assert_eq!(r.total_found, 0);
        assert!(r.attractions.is_empty());
    }

    #[test]
    fn currency_stamps_last_updated() {
        let now = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let c = currency_info("Japan", now).unwrap();
        assert_eq!(c.last_updated, "2025-01-02 03:04");
        let keys: Vec<&str> = c.payment_methods.keys().copied().collect();
        assert_eq!(keys[0], "cash");
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn tips_cover_all_sections() {
        let t = travel_tips("Seoul").unwrap();
        assert_eq!(t.cultural_tips.len(), 6);
        assert_eq!(t.safety_tips.len(), 7);
        assert_eq!(t.money_tips.len(), 7);
        assert_eq!(t.practical_tips.len(), 7);
    }
}
