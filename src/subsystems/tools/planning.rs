//! Trip planning providers: itinerary, accommodation, budget and packing.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use super::{BudgetLevel, NoteTable, ToolError, notes};

/// Longest itinerary the planner will lay out day by day.
pub const MAX_ITINERARY_DAYS: u32 = 60;

fn dollars<S: Serializer>(amount: &u32, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("${amount}"))
}

// ── Itinerary ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TripDetails {
    pub destination: String,
    pub duration: u32,
    /// `YYYY-MM-DD`; `None` labels days as "Day N".
    pub start_date: Option<String>,
    pub interests: Vec<String>,
    pub budget_level: String,
    pub travelers: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Activity {
    pub time: &'static str,
    pub activity: &'static str,
    pub duration: &'static str,
    #[serde(serialize_with = "dollars")]
    pub cost: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

const fn act(time: &'static str, activity: &'static str, duration: &'static str, cost: u32, kind: &'static str) -> Activity {
    Activity { time, activity, duration, cost, kind }
}

const DAY_ONE: &[Activity] = &[
    act("09:00", "Arrival and hotel check-in", "2 hours", 0, "logistics"),
    act("11:00", "Welcome city walking tour", "3 hours", 25, "sightseeing"),
    act("14:00", "Lunch at traditional local restaurant", "1.5 hours", 35, "dining"),
    act("16:00", "Visit historic city center", "2 hours", 10, "culture"),
    act("19:00", "Dinner and evening stroll", "3 hours", 45, "dining"),
];

const DAY_TWO: &[Activity] = &[
    act("09:00", "Visit national museum", "3 hours", 20, "culture"),
    act("12:30", "Lunch break", "1 hour", 25, "dining"),
    act("14:00", "Explore local markets", "2 hours", 30, "shopping"),
    act("16:30", "Scenic viewpoint visit", "1.5 hours", 0, "nature"),
    act("19:00", "Traditional dinner experience", "2.5 hours", 50, "dining"),
];

// Reused for every day after the third.
const DAY_THREE: &[Activity] = &[
    act("09:00", "Day trip adventure activity", "4 hours", 60, "adventure"),
    act("13:00", "Picnic lunch", "1 hour", 15, "dining"),
    act("15:00", "Cultural workshop", "2 hours", 40, "culture"),
    act("18:00", "Farewell dinner", "2 hours", 55, "dining"),
    act("20:30", "Evening entertainment", "2 hours", 30, "entertainment"),
];

fn activities_for(day: u32) -> &'static [Activity] {
    match day {
        1 => DAY_ONE,
        2 => DAY_TWO,
        _ => DAY_THREE,
    }
}

fn theme_for(day: u32) -> &'static str {
    match day {
        1 => "Arrival & Exploration",
        2 => "Cultural Immersion",
        _ => "Adventure & Farewell",
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPlan {
    pub day: u32,
    pub date: String,
    pub theme: String,
    pub activities: &'static [Activity],
    #[serde(serialize_with = "dollars")]
    pub estimated_daily_cost: u32,
    pub travel_tips: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct ItinerarySummary {
    pub total_activities: usize,
    #[serde(serialize_with = "dollars")]
    pub estimated_cost: u32,
    pub highlights: &'static [&'static str],
    pub recommendations: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Itinerary {
    pub destination: String,
    pub duration: String,
    pub start_date: Option<String>,
    pub travelers: u32,
    pub budget_level: String,
    pub interests: Vec<String>,
    pub daily_plans: Vec<DayPlan>,
    pub summary: ItinerarySummary,
}

pub fn create_itinerary(details: &TripDetails) -> Result<Itinerary, ToolError> {
    const ACTION: &str = "create itinerary";

    if details.duration > MAX_ITINERARY_DAYS {
        return Err(ToolError::DurationTooLong {
            action: ACTION,
            days: details.duration,
            max: MAX_ITINERARY_DAYS,
        });
    }
    let start = details
        .start_date
        .as_deref()
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ToolError::InvalidDate {
                action: ACTION,
                value: s.to_string(),
            })
        })
        .transpose()?;

    let mut daily_plans = Vec::with_capacity(details.duration as usize);
    let mut total_cost = 0;
    let mut total_activities = 0;
    for day in 1..=details.duration {
        let activities = activities_for(day);
        let daily_cost: u32 = activities.iter().map(|a| a.cost).sum();
        let date = match start {
            Some(start) => (start + Duration::days(i64::from(day - 1))).format("%Y-%m-%d").to_string(),
            None => format!("Day {day}"),
        };
        total_cost += daily_cost;
        total_activities += activities.len();
        daily_plans.push(DayPlan {
            day,
            date,
            theme: format!("Day {day} - {}", theme_for(day)),
            activities,
            estimated_daily_cost: daily_cost,
            travel_tips: &[
                "Start early to avoid crowds",
                "Stay hydrated and take breaks",
                "Keep important documents secure",
            ],
        });
    }

    Ok(Itinerary {
        destination: details.destination.clone(),
        duration: format!("{} days", details.duration),
        start_date: details.start_date.clone(),
        travelers: details.travelers,
        budget_level: details.budget_level.clone(),
        interests: details.interests.clone(),
        daily_plans,
        summary: ItinerarySummary {
            total_activities,
            estimated_cost: total_cost,
            highlights: &[
                "Historic city center exploration",
                "Local culinary experiences",
                "Cultural immersion activities",
                "Scenic viewpoints and nature",
            ],
            recommendations: &[
                "Book popular attractions in advance",
                "Carry comfortable walking shoes",
                "Keep some cash for small vendors",
                "Take photos but respect local photography rules",
            ],
        },
    })
}

// ── Accommodation ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct StayDetails {
    pub destination: String,
    pub budget_level: String,
    pub travelers: u32,
    pub duration: u32,
    pub preferences: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccommodationOption {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub category: &'static str,
    pub rating: f32,
    pub price_per_night: String,
    pub total_cost: String,
    pub amenities: &'static [&'static str],
    pub location: &'static str,
    pub distance_to_center: &'static str,
    pub transport_access: &'static str,
    pub guest_rating: &'static str,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct AccommodationSuggestions {
    pub destination: String,
    pub budget_level: String,
    pub travelers: u32,
    pub duration: String,
    pub options: Vec<AccommodationOption>,
    pub booking_recommendations: &'static [&'static str],
    pub neighborhood_guide: NoteTable,
    pub seasonal_considerations: &'static [&'static str],
}

/// Nightly (min, max) for a tier.
fn nightly_range(level: BudgetLevel) -> (u32, u32) {
    match level {
        BudgetLevel::Budget => (30, 80),
        BudgetLevel::Medium => (80, 200),
        BudgetLevel::Luxury => (200, 500),
    }
}

/// Nightly and whole-stay price ranges. Stay totals are widened to `u64`,
/// which holds any `u32` night count at these rates.
fn price_band(low: u32, high: u32, nights: u32) -> (String, String) {
    let nights = u64::from(nights);
    (
        format!("${low}-{high}"),
        format!("${}-{}", u64::from(low) * nights, u64::from(high) * nights),
    )
}

/// Three fixed options priced from the tier's nightly range. An unknown
/// budget level prices as medium.
pub fn suggest_accommodations(details: &StayDetails) -> Result<AccommodationSuggestions, ToolError> {
    let level = BudgetLevel::parse(&details.budget_level).unwrap_or(BudgetLevel::Medium);
    let (min, max) = nightly_range(level);
    let nights = details.duration;

    let (hotel_night, hotel_total) = price_band(min + 50, max - 20, nights);
    let (flat_night, flat_total) = price_band(min, min + 40, nights);
    let (bnb_night, bnb_total) = price_band(min + 30, max - 50, nights);

    let options = vec![
        AccommodationOption {
            name: "Grand City Hotel",
            kind: "Hotel",
            category: "4-star",
            rating: 4.3,
            price_per_night: hotel_night,
            total_cost: hotel_total,
            amenities: &[
                "Free WiFi",
                "Breakfast included",
                "Fitness center",
                "24/7 reception",
                "Room service",
                "Business center",
            ],
            location: "City center - walking distance to main attractions",
            distance_to_center: "0.3 km",
            transport_access: "Metro station 2 min walk",
            guest_rating: "Excellent location, professional service, clean rooms",
            pros: &["Prime location", "Professional service", "Good facilities"],
            cons: &["Can be busy", "Street noise possible"],
        },
        AccommodationOption {
            name: "Cozy Downtown Apartment",
            kind: "Apartment/Airbnb",
            category: "Local experience",
            rating: 4.6,
            price_per_night: flat_night,
            total_cost: flat_total,
            amenities: &[
                "Full kitchen",
                "WiFi",
                "Washing machine",
                "Local host support",
                "Living area",
                "Private bathroom",
            ],
            location: "Residential neighborhood - authentic local area",
            distance_to_center: "1.5 km",
            transport_access: "Bus stop 5 min walk",
            guest_rating: "Authentic experience, great value, helpful host",
            pros: &["Local experience", "Cost-effective", "Kitchen facilities"],
            cons: &["Further from center", "Limited hotel services"],
        },
        AccommodationOption {
            name: "Boutique Heritage B&B",
            kind: "Bed & Breakfast",
            category: "Boutique",
            rating: 4.7,
            price_per_night: bnb_night,
            total_cost: bnb_total,
            amenities: &[
                "Gourmet breakfast included",
                "Personalized service",
                "Garden terrace",
                "WiFi",
                "Concierge service",
                "Historic building",
            ],
            location: "Historic quarter - charming neighborhood",
            distance_to_center: "0.8 km",
            transport_access: "Walking distance to attractions",
            guest_rating: "Exceptional breakfast, personal touch, beautiful building",
            pros: &["Personal service", "Excellent breakfast", "Unique character"],
            cons: &["Limited rooms", "May book up quickly"],
        },
    ];

    Ok(AccommodationSuggestions {
        destination: details.destination.clone(),
        budget_level: details.budget_level.clone(),
        travelers: details.travelers,
        duration: format!("{nights} nights"),
        options,
        booking_recommendations: &[
            "Book 2-4 weeks in advance for better rates",
            "Check cancellation policies carefully",
            "Read recent guest reviews for current conditions",
            "Consider location vs. budget trade-offs",
            "Look for package deals including breakfast or tours",
            "Verify amenities that are important to you",
        ],
        neighborhood_guide: notes(&[
            ("city_center", "Convenient but can be busy and expensive"),
            ("historic_quarter", "Charming atmosphere, walkable to attractions"),
            ("residential_areas", "Authentic local experience, better value"),
            ("business_district", "Modern amenities, good transport links"),
        ]),
        seasonal_considerations: &[
            "Peak season: Book early, expect higher prices",
            "Off-season: Better rates, fewer crowds",
            "Shoulder season: Good balance of weather and prices",
            "Local events: Check for festivals that might affect availability",
        ],
    })
}

// ── Budget ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BudgetDetails {
    pub destination: String,
    pub duration: u32,
    pub travelers: u32,
    pub budget_level: String,
    pub planned_activities: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostLine {
    pub amount: String,
    pub description: &'static str,
    pub total: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetBreakdown {
    pub daily_costs: IndexMap<&'static str, CostLine>,
    pub one_time_costs: IndexMap<&'static str, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetTotals {
    pub daily_average: String,
    pub trip_total_before_flights: String,
    pub flights_and_fees: String,
    pub grand_total_per_person: String,
    pub grand_total_for_group: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetTips {
    pub save_money: &'static [&'static str],
    pub splurge_worthwhile: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct EmergencyFund {
    pub recommended: String,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetEstimate {
    pub destination: String,
    pub duration: String,
    pub travelers: u32,
    pub budget_level: BudgetLevel,
    pub detailed_breakdown: BudgetBreakdown,
    pub totals: BudgetTotals,
    pub budget_tips: BudgetTips,
    pub emergency_fund: EmergencyFund,
    pub payment_recommendations: &'static [&'static str],
}

/// Per-day spend by category: (key, description, amount).
fn daily_costs(level: BudgetLevel) -> [(&'static str, &'static str, u32); 6] {
    let amounts = match level {
        BudgetLevel::Budget => [45, 30, 8, 15, 10, 12],
        BudgetLevel::Medium => [120, 55, 15, 25, 20, 20],
        BudgetLevel::Luxury => [250, 100, 30, 50, 50, 40],
    };
    [
        ("accommodation", "Hotel/lodging per night", amounts[0]),
        ("meals", "Breakfast, lunch, dinner per day", amounts[1]),
        ("local_transport", "Metro, buses, taxis per day", amounts[2]),
        ("attractions", "Museums, tours, activities per day", amounts[3]),
        ("shopping", "Souvenirs, personal items per day", amounts[4]),
        ("miscellaneous", "Tips, snacks, extras per day", amounts[5]),
    ]
}

fn flight_cost(level: BudgetLevel) -> u32 {
    match level {
        BudgetLevel::Budget => 400,
        BudgetLevel::Medium => 600,
        BudgetLevel::Luxury => 1200,
    }
}

const TRAVEL_INSURANCE: u32 = 50;
const VISA_FEES: u32 = 30;
const AIRPORT_TRANSFERS: u32 = 40;

pub fn estimate_budget(details: &BudgetDetails) -> Result<BudgetEstimate, ToolError> {
    const ACTION: &str = "estimate budget";

    let level = BudgetLevel::parse(&details.budget_level).ok_or_else(|| ToolError::UnknownBudgetLevel {
        action: ACTION,
        level: details.budget_level.clone(),
    })?;
    let days = u64::from(details.duration);
    let costs = daily_costs(level);

    let daily_total: u64 = costs.iter().map(|(_, _, amount)| u64::from(*amount)).sum();
    let trip_total = daily_total * days;
    let flights = u64::from(flight_cost(level));
    let fees = u64::from(TRAVEL_INSURANCE + VISA_FEES + AIRPORT_TRANSFERS);
    // Per-person figures fit in u64 for any u32 duration; the group total may not.
    let per_person = trip_total + flights + fees;
    let group_total = per_person
        .checked_mul(u64::from(details.travelers))
        .ok_or(ToolError::TotalTooLarge {
            action: ACTION,
            days: details.duration,
            travelers: details.travelers,
        })?;

    let daily_costs = costs
        .iter()
        .map(|(key, description, amount)| {
            (*key, CostLine {
                amount: format!("${amount}"),
                description: *description,
                total: format!("${}", u64::from(*amount) * days),
            })
        })
        .collect();

    let one_time_costs = [
        ("flights", flights),
        ("travel_insurance", u64::from(TRAVEL_INSURANCE)),
        ("visa_fees", u64::from(VISA_FEES)),
        ("airport_transfers", u64::from(AIRPORT_TRANSFERS)),
    ]
    .into_iter()
    .map(|(key, amount)| (key, format!("${amount}")))
    .collect();

    Ok(BudgetEstimate {
        destination: details.destination.clone(),
        duration: format!("{} days", details.duration),
        travelers: details.travelers,
        budget_level: level,
        detailed_breakdown: BudgetBreakdown { daily_costs, one_time_costs },
        totals: BudgetTotals {
            daily_average: format!("${daily_total}"),
            trip_total_before_flights: format!("${trip_total}"),
            flights_and_fees: format!("${}", flights + fees),
            grand_total_per_person: format!("${per_person}"),
            grand_total_for_group: format!("${group_total}"),
        },
        budget_tips: BudgetTips {
            save_money: &[
                "Book flights 6-8 weeks in advance",
                "Stay in local neighborhoods vs tourist areas",
                "Eat at local restaurants and markets",
                "Use public transportation",
                "Look for free walking tours and activities",
                "Travel during shoulder season",
                "Cook some meals if staying in apartment",
            ],
            splurge_worthwhile: &[
                "Good location accommodation",
                "One special dining experience",
                "Professional guided tour of highlights",
                "Quality travel insurance",
                "Comfortable walking shoes",
            ],
        },
        emergency_fund: EmergencyFund {
            // 15%, truncated
            recommended: format!("${}", per_person * 15 / 100),
            description: "15% of total budget for unexpected expenses",
        },
        payment_recommendations: &[
            "Notify bank of travel dates",
            "Bring mix of cash and cards",
            "Have backup payment method",
            "Research ATM fees and locations",
            "Consider travel-friendly credit cards",
        ],
    })
}

// ── Packing ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct PackingDetails {
    pub destination: String,
    pub duration: u32,
    pub season: String,
    pub planned_activities: Vec<String>,
    pub budget_level: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Essentials {
    pub documents: &'static [&'static str],
    pub money_and_cards: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct Clothing {
    pub basics: Vec<String>,
    pub weather_specific: &'static [&'static str],
    pub activity_specific: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingCategories {
    pub essentials: Essentials,
    pub clothing: Clothing,
    pub health_and_hygiene: &'static [&'static str],
    pub electronics: &'static [&'static str],
    pub comfort_and_convenience: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingList {
    pub destination: String,
    pub duration: String,
    pub season: String,
    pub budget_level: String,
    pub activities: Vec<String>,
    pub categories: PackingCategories,
    pub packing_tips: Vec<&'static str>,
    pub weight_considerations: NoteTable,
    pub last_minute_checklist: &'static [&'static str],
    pub packing_strategy: NoteTable,
}

fn season_items(season: &str) -> &'static [&'static str] {
    match season.trim().to_ascii_lowercase().as_str() {
        "winter" => &[
            "Heavy winter coat",
            "Warm hat and gloves",
            "Thermal underwear",
            "Warm socks",
            "Waterproof boots",
            "Scarf",
            "Hot packs/warmers",
        ],
        "summer" => &[
            "Sun hat",
            "Sunglasses",
            "Light, breathable clothing",
            "Sandals or breathable shoes",
            "Swimwear",
            "Light cover-up",
            "Cooling towel",
        ],
        "fall" => &[
            "Warm layers",
            "Medium weight jacket",
            "Comfortable boots",
            "Rain protection",
            "Mix of clothing weights",
        ],
        _ => &[
            "Light rain jacket",
            "Layers for temperature changes",
            "Light sweater",
            "Umbrella (compact)",
            "Mix of short and long sleeves",
        ],
    }
}

/// Activity groups: any listed activity equal (case-insensitively) to one of
/// the triggers adds the group's items.
const ACTIVITY_GROUPS: &[(&[&str], &[&str])] = &[
    (
        &["hiking", "walking", "trek"],
        &[
            "Sturdy hiking boots",
            "Moisture-wicking clothing",
            "Daypack with water bottle holder",
            "Trail snacks",
            "Hiking socks",
            "Quick-dry towel",
        ],
    ),
    (
        &["swimming", "beach", "water"],
        &[
            "Swimwear (2 sets)",
            "Beach towel",
            "Waterproof bag",
            "Flip-flops",
            "Snorkeling gear (optional)",
        ],
    ),
    (
        &["business", "meeting", "conference"],
        &[
            "Business attire (2-3 outfits)",
            "Dress shoes",
            "Laptop and charger",
            "Business cards",
            "Professional bag",
        ],
    ),
    (
        &["formal", "dinner", "theater"],
        &[
            "Formal wear",
            "Dress shoes",
            "Accessories (jewelry, ties, etc.)",
            "Small purse/evening bag",
        ],
    ),
];

fn activity_items(activities: &[String]) -> Vec<&'static str> {
    let lowered: Vec<String> = activities.iter().map(|a| a.to_lowercase()).collect();
    ACTIVITY_GROUPS
        .iter()
        .filter(|(triggers, _)| triggers.iter().any(|t| lowered.iter().any(|a| a == t)))
        .flat_map(|(_, items)| items.iter().copied())
        .collect()
}

pub fn generate_packing_list(details: &PackingDetails) -> Result<PackingList, ToolError> {
    let spare = details.duration.saturating_add(2);
    let mut packing_tips = vec![
        "Roll clothes instead of folding to save space",
        "Pack heaviest items closest to your back in backpack",
        "Wear heaviest shoes and jacket while traveling",
        "Leave room for souvenirs (pack 20% less than capacity)",
        "Pack essentials in carry-on bag",
        "Check airline baggage restrictions and fees",
    ];
    if details.duration <= 3 {
        packing_tips.push("Consider carry-on only for short trips");
    }
    if details.duration >= 7 {
        packing_tips.push("Pack for laundry every 5-7 days");
    }

    Ok(PackingList {
        destination: details.destination.clone(),
        duration: format!("{} days", details.duration),
        season: details.season.clone(),
        budget_level: details.budget_level.clone(),
        activities: details.planned_activities.clone(),
        categories: PackingCategories {
            essentials: Essentials {
                documents: &[
                    "Passport (valid for 6+ months)",
                    "Visa (if required)",
                    "Travel insurance documents",
                    "Flight tickets/boarding passes",
                    "Hotel confirmations",
                    "Emergency contact information",
                    "Copies of important documents (stored separately)",
                    "Travel itinerary",
                    "Local embassy contact info",
                ],
                money_and_cards: &[
                    "Credit cards (2 different types)",
                    "Debit card",
                    "Cash (local currency + USD)",
                    "Money belt or hidden wallet",
                    "Backup cards (stored separately)",
                ],
            },
            clothing: Clothing {
                basics: vec![
                    format!("Underwear for {spare} days"),
                    format!("Socks for {spare} days"),
                    "Comfortable walking shoes".into(),
                    "Casual pants/jeans (2 pairs)".into(),
                    "Comfortable shirts/tops (3-4)".into(),
                    "One dressy outfit".into(),
                    "Sleepwear".into(),
                    "Light jacket or sweater".into(),
                ],
                weather_specific: season_items(&details.season),
                activity_specific: activity_items(&details.planned_activities),
            },
            health_and_hygiene: &[
                "Prescription medications (in original containers)",
                "Basic first aid kit",
                "Toothbrush and toothpaste",
                "Shampoo and conditioner (travel size)",
                "Body wash or soap",
                "Deodorant",
                "Sunscreen (SPF 30+)",
                "Hand sanitizer",
                "Personal hygiene items",
                "Any special medical needs",
            ],
            electronics: &[
                "Phone and charger",
                "Portable battery pack/power bank",
                "Universal power adapter",
                "Camera (optional)",
                "Headphones",
                "Tablet/e-reader (optional)",
                "Portable speaker (small, optional)",
            ],
            comfort_and_convenience: &[
                "Reusable water bottle",
                "Day backpack or daypack",
                "Travel pillow",
                "Eye mask and earplugs",
                "Snacks for travel day",
                "Entertainment (book, downloaded movies)",
                "Pen and small notebook",
                "Tissues/napkins",
                "Plastic bags (for dirty clothes, wet items)",
            ],
        },
        packing_tips,
        weight_considerations: notes(&[
            ("carry_on_limit", "Usually 7-10 kg (15-22 lbs)"),
            ("checked_bag_limit", "Usually 23 kg (50 lbs)"),
            ("personal_item", "Small bag that fits under seat"),
        ]),
        last_minute_checklist: &[
            "Check weather forecast before packing",
            "Confirm airline baggage policies",
            "Leave emergency contact with someone at home",
            "Set out-of-office messages",
            "Arrange mail/package holds",
            "Charge all electronic devices",
            "Download offline maps and translation apps",
        ],
        packing_strategy: notes(&[
            ("week_before", "Gather all items, check expiration dates"),
            ("few_days_before", "Do laundry, start packing non-essentials"),
            ("day_before", "Pack essentials, prepare carry-on"),
            ("day_of", "Final checks, pack last-minute items"),
        ]),
    })
}
